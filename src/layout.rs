//! Station layout: deterministic placement of stations on the canvas.
//!
//! Two modes exist. *Generated* layout spreads a line's nominal stations
//! evenly across the canvas from its design-space anchor. *Imported* layout
//! projects real-world coordinates through a linear scale-and-offset
//! transform. Both snap every coordinate to the active grid.

use std::collections::HashMap;

use glam::{DVec2, dvec2};

use crate::errors::{DegenerateInput, DragError};
use crate::model::{GridBounds, Line, Orientation, RawStation, Station};
use crate::types::{Canvas, DESIGN_HEIGHT, DESIGN_WIDTH, MARGIN, Spacing, ViewMode};

/// Compute on-canvas stations for one line in generated mode.
///
/// For a horizontal line the anchor y is scaled from the fixed design
/// height into the canvas and stations distribute across
/// `[MARGIN, width - MARGIN]`; vertical lines are the mirror against the
/// design width. Every coordinate is snapped to `spacing` independently.
///
/// A single-station line sits at the midpoint of its span. A canvas that
/// leaves no room inside the margins is refused rather than clamped.
pub fn compute_line_stations(
    line: &Line,
    canvas: Canvas,
    spacing: Spacing,
) -> Result<Vec<Station>, DegenerateInput> {
    if line.station_count == 0 {
        return Err(DegenerateInput::EmptyLine { line_id: line.id });
    }

    let (extent, axis) = match line.orientation {
        Orientation::Horizontal => (canvas.width, "width"),
        Orientation::Vertical => (canvas.height, "height"),
    };
    let span = extent - 2.0 * MARGIN;
    if span <= 0.0 {
        return Err(DegenerateInput::CanvasTooSmall {
            axis,
            extent,
            margin: MARGIN,
        });
    }

    let count = line.station_count;
    let along = |i: u32| {
        if count == 1 {
            MARGIN + span / 2.0
        } else {
            MARGIN + span * f64::from(i) / f64::from(count - 1)
        }
    };

    let mut stations = Vec::with_capacity(count as usize);
    for i in 0..count {
        let pos = match line.orientation {
            Orientation::Horizontal => {
                let scaled_y = line.anchor / DESIGN_HEIGHT * canvas.height;
                dvec2(spacing.snap(along(i)), spacing.snap(scaled_y))
            }
            Orientation::Vertical => {
                let scaled_x = line.anchor / DESIGN_WIDTH * canvas.width;
                dvec2(spacing.snap(scaled_x), spacing.snap(along(i)))
            }
        };
        stations.push(Station {
            id: Station::derived_id(line.id, i),
            line_id: line.id,
            index: i,
            pos,
            name: format!("{} {}", line.name, i + 1),
            real: None,
            transfer: None,
        });
    }
    Ok(stations)
}

/// Project imported stations from real-world coordinates onto the canvas.
///
/// Each axis gets an independent scale factor from the grid bounding box;
/// results snap to the view mode's effective spacing. A zero-span axis is
/// a single-point dataset: scale collapses to zero and every station lands
/// on the margin, never a division by zero. Like the generated path, a
/// canvas that leaves no room inside the margins is refused rather than
/// projected mirrored.
pub fn compute_imported_stations(
    stations: &[RawStation],
    grid: &GridBounds,
    canvas: Canvas,
    mode: ViewMode,
) -> Result<Vec<Station>, DegenerateInput> {
    for (extent, axis) in [(canvas.width, "width"), (canvas.height, "height")] {
        if extent - 2.0 * MARGIN <= 0.0 {
            return Err(DegenerateInput::CanvasTooSmall {
                axis,
                extent,
                margin: MARGIN,
            });
        }
    }

    let scale = |extent: f64, min: f64, max: f64| {
        let span = max - min;
        if span == 0.0 {
            0.0
        } else {
            (extent - 2.0 * MARGIN) / span
        }
    };
    let scale_x = scale(canvas.width, grid.min_x, grid.max_x);
    let scale_y = scale(canvas.height, grid.min_y, grid.max_y);
    let spacing = mode.effective_spacing(Spacing::BASE);

    let placed = stations
        .iter()
        .map(|st| {
            let x = MARGIN + (st.real_x - grid.min_x) * scale_x;
            let y = MARGIN + (st.real_y - grid.min_y) * scale_y;
            let index = st.station_number.saturating_sub(1);
            Station {
                id: Station::derived_id(st.line, index),
                line_id: st.line,
                index,
                pos: dvec2(spacing.snap(x), spacing.snap(y)),
                name: st.name.clone(),
                real: Some(dvec2(st.real_x, st.real_y)),
                transfer: st.transfer.clone(),
            }
        })
        .collect();
    Ok(placed)
}

/// The anchor station for depot fan-out: the middle of a line's station
/// list (lower middle for an even count).
pub fn middle_station(stations: &[Station]) -> Option<&Station> {
    if stations.is_empty() {
        return None;
    }
    stations.get((stations.len() - 1) / 2)
}

/// Owned station-position table with an exclusive-write drag contract.
///
/// At most one station may be dragged at a time; [`PositionTable::begin_drag`]
/// claims the gesture and [`PositionTable::end_drag`] releases it on
/// pointer-up. Train routes read these positions on their next tick, which
/// keeps them eventually consistent without a lock.
#[derive(Debug, Clone, Default)]
pub struct PositionTable {
    positions: HashMap<String, DVec2>,
    active: Option<ActiveDrag>,
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    station_id: String,
    /// Cursor-to-station offset captured at pointer-down so the station
    /// does not jump under the pointer.
    grab_offset: DVec2,
}

impl PositionTable {
    pub fn from_stations(stations: &[Station]) -> PositionTable {
        PositionTable {
            positions: stations
                .iter()
                .map(|s| (s.id.clone(), s.pos))
                .collect(),
            active: None,
        }
    }

    pub fn get(&self, station_id: &str) -> Option<DVec2> {
        self.positions.get(station_id).copied()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Claim the drag gesture for one station. `cursor` is the pointer
    /// position in model space at pointer-down.
    pub fn begin_drag(&mut self, station_id: &str, cursor: DVec2) -> Result<(), DragError> {
        if let Some(active) = &self.active {
            return Err(DragError::DragInProgress {
                active: active.station_id.clone(),
            });
        }
        let pos = self
            .positions
            .get(station_id)
            .copied()
            .ok_or_else(|| DragError::UnknownStation {
                id: station_id.to_string(),
            })?;
        self.active = Some(ActiveDrag {
            station_id: station_id.to_string(),
            grab_offset: cursor - pos,
        });
        Ok(())
    }

    /// Move the dragged station under the cursor, snapped to the grid.
    /// Returns the station's new position.
    pub fn drag_to(&mut self, cursor: DVec2, spacing: Spacing) -> Result<DVec2, DragError> {
        let active = self.active.as_ref().ok_or(DragError::NoActiveDrag)?;
        let raw = cursor - active.grab_offset;
        let snapped = dvec2(spacing.snap(raw.x), spacing.snap(raw.y));
        let id = active.station_id.clone();
        self.positions.insert(id, snapped);
        Ok(snapped)
    }

    /// Release the gesture. Idempotent: a pointer-up with no active drag is
    /// a no-op.
    pub fn end_drag(&mut self) {
        self.active = None;
    }

    /// Write the table back into a station list, e.g. before recomposing
    /// overlays or train routes.
    pub fn apply_to(&self, stations: &mut [Station]) {
        for st in stations {
            if let Some(pos) = self.positions.get(&st.id) {
                st.pos = *pos;
            }
        }
    }
}
