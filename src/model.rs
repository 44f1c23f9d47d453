//! Domain data model: lines, stations, depots, scissors and the grid
//! bounding box recovered from imported coordinates.

use glam::DVec2;

use crate::errors::UnknownLineReference;

/// Axis a line runs along in the schematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// A transit line. Immutable once loaded for a session.
///
/// `anchor` is the design-space y for a horizontal line or x for a vertical
/// one (the other axis is where stations distribute).
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: u32,
    pub name: String,
    /// Hex color string, e.g. `#EA1975`.
    pub color: String,
    pub orientation: Orientation,
    /// Nominal number of stations, at least 1.
    pub station_count: u32,
    pub anchor: f64,
}

/// Immutable catalog of lines for a session, either the stock network or
/// one produced by an import. Injected into layout code; never a global.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRegistry {
    lines: Vec<Line>,
}

impl LineRegistry {
    /// The stock six-line network used when no map has been imported.
    pub fn default_catalog() -> LineRegistry {
        use Orientation::{Horizontal, Vertical};
        let line = |id, name: &str, color: &str, orientation, station_count, anchor| Line {
            id,
            name: name.to_string(),
            color: color.to_string(),
            orientation,
            station_count,
            anchor,
        };
        LineRegistry {
            lines: vec![
                line(1, "Middle West-East", "#EA1975", Horizontal, 23, 500.0),
                line(2, "Top West-East", "#673067", Horizontal, 24, 200.0),
                line(3, "Middle North-South", "#3D7CBF", Vertical, 13, 800.0),
                line(4, "Right North-South", "#4BB851", Vertical, 6, 1200.0),
                line(5, "Bottom West-East", "#63666B", Horizontal, 29, 800.0),
                line(6, "Left North-South", "#C9CB2B", Vertical, 11, 200.0),
            ],
        }
    }

    pub fn from_lines(lines: Vec<Line>) -> LineRegistry {
        LineRegistry { lines }
    }

    pub fn get(&self, line_id: u32) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// Like [`LineRegistry::get`] but a hard error for callers that cannot
    /// skip the referencing entity.
    pub fn require(&self, line_id: u32) -> Result<&Line, UnknownLineReference> {
        self.get(line_id).ok_or(UnknownLineReference { line_id })
    }

    /// Lines in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A line record as it appears in the serialized map. Carries only the
/// fields the text format round-trips; layout parameters for imported maps
/// come from the stations' real coordinates instead.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLine {
    pub id: u32,
    pub name: String,
    pub color: String,
    pub orientation: Orientation,
}

/// A parsed map document: the import result and the export input.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    pub lines: Vec<MapLine>,
    pub stations: Vec<RawStation>,
    /// Recomputed at import time from the stations' real coordinates.
    /// `None` for a map with no stations.
    pub grid: Option<GridBounds>,
}

impl MapDocument {
    /// Stations belonging to one line, in file order.
    pub fn stations_of_line(&self, line_id: u32) -> impl Iterator<Item = &RawStation> {
        self.stations.iter().filter(move |s| s.line == line_id)
    }
}

impl LineRegistry {
    /// Registry backing an imported session. Station counts are recovered
    /// from the station records; anchors are unused for imported layouts.
    pub fn from_document(doc: &MapDocument) -> LineRegistry {
        let lines = doc
            .lines
            .iter()
            .map(|ml| Line {
                id: ml.id,
                name: ml.name.clone(),
                color: ml.color.clone(),
                orientation: ml.orientation,
                station_count: (doc.stations_of_line(ml.id).count() as u32).max(1),
                anchor: 0.0,
            })
            .collect();
        LineRegistry { lines }
    }
}

/// A station as it appears in the serialized map: real-world coordinates,
/// not yet projected onto the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStation {
    pub name: String,
    /// Referenced line id.
    pub line: u32,
    /// 1-based ordinal along the line, as authored in the file.
    pub station_number: u32,
    /// Transfer group name, if the station belongs to one.
    pub transfer: Option<String>,
    pub real_x: f64,
    pub real_y: f64,
}

/// A station placed on the canvas, produced by station layout.
///
/// Positions are mutated only through the drag table
/// ([`crate::layout::PositionTable`]) and the recompute triggered by a
/// viewport resize or mode change.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Derived id, `line-<lineId>-station-<index>`.
    pub id: String,
    pub line_id: u32,
    /// 0-based position along the line.
    pub index: u32,
    pub pos: DVec2,
    pub name: String,
    /// Source-of-truth plan coordinates, present for imported stations.
    pub real: Option<DVec2>,
    pub transfer: Option<String>,
}

impl Station {
    pub(crate) fn derived_id(line_id: u32, index: u32) -> String {
        format!("line-{line_id}-station-{index}")
    }
}

/// Bounding box of all imported stations' real coordinates. Computed once
/// at import time and used only for the linear projection onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl GridBounds {
    /// Min/max over the stations' real coordinates, or `None` when there
    /// are no stations to bound.
    pub fn from_stations(stations: &[RawStation]) -> Option<GridBounds> {
        let first = stations.first()?;
        let mut bounds = GridBounds {
            min_x: first.real_x,
            max_x: first.real_x,
            min_y: first.real_y,
            max_y: first.real_y,
        };
        for st in &stations[1..] {
            bounds.min_x = bounds.min_x.min(st.real_x);
            bounds.max_x = bounds.max_x.max(st.real_x);
            bounds.min_y = bounds.min_y.min(st.real_y);
            bounds.max_y = bounds.max_y.max(st.real_y);
        }
        Some(bounds)
    }
}

/// One named stabling track inside a depot. Length is in grid units.
#[derive(Debug, Clone, PartialEq)]
pub struct DepotTrack {
    pub code: String,
    pub length: f64,
}

/// A depot attached to a line, holding an ordered fan of tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct Depot {
    pub id: String,
    pub line_id: u32,
    pub name: String,
    pub tracks: Vec<DepotTrack>,
}

/// A scissor crossing between two station-like points, either authored
/// directly or synthesized from a line and its offset parallel track.
#[derive(Debug, Clone, PartialEq)]
pub struct Scissor {
    pub id: String,
    pub line_id: u32,
    pub orientation: Orientation,
    pub station_a: Option<DVec2>,
    pub station_b: Option<DVec2>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_six_lines_with_unique_ids() {
        let registry = LineRegistry::default_catalog();
        assert_eq!(registry.len(), 6);
        let mut ids: Vec<u32> = registry.iter().map(|l| l.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert!(registry.iter().all(|l| l.station_count >= 1));
    }

    #[test]
    fn require_reports_the_missing_id() {
        let registry = LineRegistry::default_catalog();
        assert!(registry.require(3).is_ok());
        let err = registry.require(99).unwrap_err();
        assert_eq!(err.line_id, 99);
    }

    #[test]
    fn grid_bounds_span_all_stations() {
        let st = |x: f64, y: f64| RawStation {
            name: "s".into(),
            line: 1,
            station_number: 1,
            transfer: None,
            real_x: x,
            real_y: y,
        };
        let bounds = GridBounds::from_stations(&[st(2.0, -1.0), st(-3.0, 4.0), st(0.5, 0.0)])
            .unwrap();
        assert_eq!(bounds.min_x, -3.0);
        assert_eq!(bounds.max_x, 2.0);
        assert_eq!(bounds.min_y, -1.0);
        assert_eq!(bounds.max_y, 4.0);
        assert_eq!(GridBounds::from_stations(&[]), None);
    }
}
