//! Overlay geometry: everything the rendering collaborator draws on top of
//! the base station layout.
//!
//! The composer here is the data side only. It assembles, per view mode,
//! the track polylines (single or double), depot fans, scissor crossings,
//! SCADA glyphs and live train positions. Click/drag translation and the
//! screen-to-model transform belong to the rendering layer.

pub mod depot;
pub mod scada;
pub mod scissor;

use glam::{DVec2, dvec2};

use crate::layout::middle_station;
use crate::log::warn;
use crate::model::{Depot, Line, LineRegistry, Orientation, Scissor, Station};
use crate::motion::{TrainMotion, TrainSpec};
use crate::types::{Spacing, ViewMode};

pub use depot::{DepotTrackSegment, compute_depot_tracks};
pub use scada::{Glyph, GlyphShape, ScadaElement, ScadaKind};
pub use scissor::scissor_segments;

/// A straight line segment in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: DVec2,
    pub b: DVec2,
}

impl Segment {
    pub fn new(a: DVec2, b: DVec2) -> Segment {
        Segment { a, b }
    }
}

/// One polyline of a line's track, ready to stroke in the line's color.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPath {
    pub line_id: u32,
    pub color: String,
    pub points: Vec<DVec2>,
}

/// Offset copies of a line's station positions, one grid square away
/// perpendicular to the line: the second track of a double-tracked line.
pub fn parallel_points(
    orientation: Orientation,
    stations: &[Station],
    spacing: Spacing,
) -> Vec<DVec2> {
    let offset = spacing.raw();
    stations
        .iter()
        .map(|st| match orientation {
            Orientation::Horizontal => dvec2(st.pos.x, st.pos.y + offset),
            Orientation::Vertical => dvec2(st.pos.x + offset, st.pos.y),
        })
        .collect()
}

/// Track polylines for one line: a single path in normal mode, main plus
/// parallel track in depot and SCADA modes.
pub fn track_paths(
    line: &Line,
    stations: &[Station],
    mode: ViewMode,
    spacing: Spacing,
) -> Vec<TrackPath> {
    if stations.is_empty() {
        return Vec::new();
    }
    let main = TrackPath {
        line_id: line.id,
        color: line.color.clone(),
        points: stations.iter().map(|s| s.pos).collect(),
    };
    match mode {
        ViewMode::Normal => vec![main],
        ViewMode::Depot | ViewMode::Scada => {
            let parallel = TrackPath {
                line_id: line.id,
                color: line.color.clone(),
                points: parallel_points(line.orientation, stations, spacing),
            };
            vec![main, parallel]
        }
    }
}

/// Synthesize scissor crossings between a line's main and parallel tracks.
///
/// Crossings sit at the midpoints of the first, middle and last segments
/// (every segment when there are fewer than three), connecting the main
/// track's midpoint to the parallel track's.
pub fn synthesize_scissors(
    line: &Line,
    stations: &[Station],
    spacing: Spacing,
) -> Vec<Scissor> {
    if stations.len() < 2 {
        return Vec::new();
    }
    let parallel = parallel_points(line.orientation, stations, spacing);
    let total_segments = stations.len() - 1;
    let indices: Vec<usize> = if total_segments >= 3 {
        vec![0, total_segments / 2, total_segments - 1]
    } else {
        (0..total_segments).collect()
    };

    indices
        .into_iter()
        .map(|idx| {
            let main_mid = (stations[idx].pos + stations[idx + 1].pos) / 2.0;
            let parallel_mid = (parallel[idx] + parallel[idx + 1]) / 2.0;
            Scissor {
                id: format!("scissor-{}-{}", line.id, idx),
                line_id: line.id,
                orientation: line.orientation,
                station_a: Some(main_mid),
                station_b: Some(parallel_mid),
            }
        })
        .collect()
}

/// Split a station label into at most two rows. Labels longer than eight
/// characters wrap after the eighth.
pub fn split_station_name(name: &str) -> (String, Option<String>) {
    let mut chars = name.char_indices();
    match chars.nth(8) {
        Some((byte_idx, _)) => (
            name[..byte_idx].to_string(),
            Some(name[byte_idx..].to_string()),
        ),
        None => (name.to_string(), None),
    }
}

/// Where a merged transfer icon sits: the midpoint of the paired stations.
pub fn merged_transfer_position(a: DVec2, b: DVec2) -> DVec2 {
    (a + b) / 2.0
}

/// A live train position produced by scene composition.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainPosition {
    pub train_code: String,
    pub line_id: u32,
    pub pos: DVec2,
}

/// One train circulating on a line. Motion state persists across scene
/// compositions; tick it from the caller's timer.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainUnit {
    pub line_id: u32,
    pub spec: TrainSpec,
    pub motion: TrainMotion,
}

impl TrainUnit {
    pub fn new(line_id: u32, spec: TrainSpec) -> TrainUnit {
        let motion = spec.motion();
        TrainUnit {
            line_id,
            spec,
            motion,
        }
    }

    /// The stock two-train service for a line.
    pub fn stock_service(line_id: u32, route_len: f64) -> Vec<TrainUnit> {
        TrainSpec::pair_for_line(line_id, route_len)
            .into_iter()
            .map(|spec| TrainUnit::new(line_id, spec))
            .collect()
    }
}

/// Everything scene composition reads. All references; composition never
/// mutates its inputs.
#[derive(Debug, Clone, Copy)]
pub struct SceneInput<'a> {
    pub registry: &'a LineRegistry,
    /// Laid-out stations for every active line, in line order.
    pub stations: &'a [Station],
    pub mode: ViewMode,
    pub depots: &'a [Depot],
    /// Authored scissor crossings.
    pub scissors: &'a [Scissor],
    /// Lines rendered with an explicit double track that also get
    /// synthesized scissor crossings in SCADA mode.
    pub double_lines: &'a [u32],
    pub scada: &'a [ScadaElement],
    pub fleet: &'a [TrainUnit],
}

/// The per-mode drawing data handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub tracks: Vec<TrackPath>,
    pub depot_tracks: Vec<DepotTrackSegment>,
    pub scissors: Vec<[Segment; 4]>,
    pub glyphs: Vec<(String, GlyphShape)>,
    pub trains: Vec<TrainPosition>,
}

impl Scene {
    /// Assemble the overlay geometry for one frame.
    ///
    /// Entities referencing a line id absent from the registry are skipped
    /// with a warning, never fatal.
    pub fn compose(input: &SceneInput<'_>) -> Scene {
        let spacing = input.mode.effective_spacing(Spacing::BASE);
        let stations_of = |line_id: u32| -> Vec<Station> {
            input
                .stations
                .iter()
                .filter(|s| s.line_id == line_id)
                .cloned()
                .collect()
        };

        let mut scene = Scene::default();

        for line in input.registry.iter() {
            let stations = stations_of(line.id);
            scene
                .tracks
                .extend(track_paths(line, &stations, input.mode, spacing));
        }

        if input.mode.shows_depots() {
            for depot in input.depots {
                let Some(line) = input.registry.get(depot.line_id) else {
                    warn!("skipping depot {}: unknown line {}", depot.id, depot.line_id);
                    continue;
                };
                let stations = stations_of(line.id);
                let Some(anchor) = middle_station(&stations) else {
                    warn!("skipping depot {}: line {} has no stations", depot.id, line.id);
                    continue;
                };
                scene.depot_tracks.extend(compute_depot_tracks(
                    depot,
                    anchor.pos,
                    line.orientation,
                    spacing,
                ));
            }

            for unit in input.fleet {
                if input.registry.get(unit.line_id).is_none() {
                    warn!(
                        "skipping train {}: unknown line {}",
                        unit.spec.train_code, unit.line_id
                    );
                    continue;
                }
                let route: Vec<DVec2> =
                    stations_of(unit.line_id).iter().map(|s| s.pos).collect();
                if route.len() < 2 {
                    continue;
                }
                scene.trains.push(TrainPosition {
                    train_code: unit.spec.train_code.clone(),
                    line_id: unit.line_id,
                    pos: unit.motion.position(&route),
                });
            }
        }

        if input.mode.shows_scissors() {
            for scissor in input.scissors {
                if input.registry.get(scissor.line_id).is_none() {
                    warn!(
                        "skipping scissor {}: unknown line {}",
                        scissor.id, scissor.line_id
                    );
                    continue;
                }
                if let Some(segments) = scissor_segments(scissor, spacing) {
                    scene.scissors.push(segments);
                }
            }
            for &line_id in input.double_lines {
                let Some(line) = input.registry.get(line_id) else {
                    warn!("skipping double track: unknown line {line_id}");
                    continue;
                };
                let stations = stations_of(line_id);
                for scissor in synthesize_scissors(line, &stations, spacing) {
                    if let Some(segments) = scissor_segments(&scissor, spacing) {
                        scene.scissors.push(segments);
                    }
                }
            }

            scene
                .glyphs
                .extend(input.scada.iter().map(|el| (el.id.clone(), el.shape())));
        }

        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_line_stations;
    use crate::model::{DepotTrack, LineRegistry};
    use crate::overlay::scada::{Signal, SignalAspect};
    use crate::types::Canvas;

    fn layout(registry: &LineRegistry, mode: ViewMode) -> Vec<Station> {
        let canvas = Canvas::new(2000.0, 1000.0);
        let spacing = mode.effective_spacing(Spacing::BASE);
        let mut all = Vec::new();
        for line in registry.iter() {
            all.extend(compute_line_stations(line, canvas, spacing).unwrap());
        }
        all
    }

    fn sample_depot(line_id: u32) -> Depot {
        Depot {
            id: format!("depot-{line_id}"),
            line_id,
            name: "Yard".into(),
            tracks: vec![
                DepotTrack { code: "A1".into(), length: 6.0 },
                DepotTrack { code: "A2".into(), length: 6.0 },
            ],
        }
    }

    #[test]
    fn normal_mode_composes_single_tracks_only() {
        let registry = LineRegistry::default_catalog();
        let stations = layout(&registry, ViewMode::Normal);
        let scene = Scene::compose(&SceneInput {
            registry: &registry,
            stations: &stations,
            mode: ViewMode::Normal,
            depots: &[sample_depot(1)],
            scissors: &[],
            double_lines: &[1],
            scada: &[],
            fleet: &TrainUnit::stock_service(1, 500.0),
        });
        // One polyline per line, no overlays.
        assert_eq!(scene.tracks.len(), registry.len());
        assert!(scene.depot_tracks.is_empty());
        assert!(scene.scissors.is_empty());
        assert!(scene.glyphs.is_empty());
        assert!(scene.trains.is_empty());
    }

    #[test]
    fn depot_mode_adds_parallel_tracks_fans_and_trains() {
        let registry = LineRegistry::default_catalog();
        let stations = layout(&registry, ViewMode::Depot);
        let scene = Scene::compose(&SceneInput {
            registry: &registry,
            stations: &stations,
            mode: ViewMode::Depot,
            depots: &[sample_depot(1)],
            scissors: &[],
            double_lines: &[],
            scada: &[],
            fleet: &TrainUnit::stock_service(1, 500.0),
        });
        assert_eq!(scene.tracks.len(), registry.len() * 2);
        assert_eq!(scene.depot_tracks.len(), 2);
        assert_eq!(scene.trains.len(), 2);
        // Scissors stay SCADA-only.
        assert!(scene.scissors.is_empty());
    }

    #[test]
    fn scada_mode_composes_scissors_and_glyphs() {
        let registry = LineRegistry::default_catalog();
        let stations = layout(&registry, ViewMode::Scada);
        let scada = [ScadaElement {
            id: "sig-1".into(),
            pos: dvec2(300.0, 500.0),
            kind: ScadaKind::Signal(Signal { aspect: SignalAspect::Green }),
        }];
        let scene = Scene::compose(&SceneInput {
            registry: &registry,
            stations: &stations,
            mode: ViewMode::Scada,
            depots: &[],
            scissors: &[],
            double_lines: &[1],
            scada: &scada,
            fleet: &[],
        });
        // Line 1 has enough segments for the first/middle/last selection.
        assert_eq!(scene.scissors.len(), 3);
        assert_eq!(scene.glyphs.len(), 1);
    }

    #[test]
    fn unknown_line_references_are_skipped_not_fatal() {
        let registry = LineRegistry::default_catalog();
        let stations = layout(&registry, ViewMode::Depot);
        let scene = Scene::compose(&SceneInput {
            registry: &registry,
            stations: &stations,
            mode: ViewMode::Depot,
            depots: &[sample_depot(42)],
            scissors: &[],
            double_lines: &[],
            scada: &[],
            fleet: &TrainUnit::stock_service(42, 100.0),
        });
        assert!(scene.depot_tracks.is_empty());
        assert!(scene.trains.is_empty());
    }

    #[test]
    fn synthesized_scissors_pick_first_middle_last_segments() {
        let registry = LineRegistry::default_catalog();
        let line = registry.get(1).unwrap();
        let stations = layout(&registry, ViewMode::Scada)
            .into_iter()
            .filter(|s| s.line_id == 1)
            .collect::<Vec<_>>();
        let spacing = ViewMode::Scada.effective_spacing(Spacing::BASE);
        let scissors = synthesize_scissors(line, &stations, spacing);
        assert_eq!(scissors.len(), 3);
        assert_eq!(scissors[0].id, "scissor-1-0");
        let total_segments = stations.len() - 1;
        assert_eq!(
            scissors[1].id,
            format!("scissor-1-{}", total_segments / 2)
        );
        assert_eq!(
            scissors[2].id,
            format!("scissor-1-{}", total_segments - 1)
        );
        // Endpoints bridge the main track to the parallel one.
        let a = scissors[0].station_a.unwrap();
        let b = scissors[0].station_b.unwrap();
        assert_eq!(b.y - a.y, spacing.raw());
        assert_eq!(b.x, a.x);
    }

    #[test]
    fn short_lines_get_a_scissor_per_segment() {
        let line = Line {
            id: 9,
            name: "Shuttle".into(),
            color: "#000000".into(),
            orientation: Orientation::Horizontal,
            station_count: 3,
            anchor: 500.0,
        };
        let spacing = Spacing::try_new(12.5).unwrap();
        let stations =
            compute_line_stations(&line, Canvas::new(1000.0, 1000.0), spacing).unwrap();
        assert_eq!(synthesize_scissors(&line, &stations, spacing).len(), 2);
    }

    #[test]
    fn station_labels_wrap_after_eight_characters() {
        assert_eq!(split_station_name("Kadikoy"), ("Kadikoy".into(), None));
        assert_eq!(
            split_station_name("Fistikagaci"),
            ("Fistikag".into(), Some("aci".into()))
        );
        // Multibyte names split on character boundaries, not bytes.
        assert_eq!(
            split_station_name("Üsküdarabc"),
            ("Üsküdara".into(), Some("bc".into()))
        );
    }

    #[test]
    fn transfer_icons_sit_at_the_pair_midpoint() {
        assert_eq!(
            merged_transfer_position(dvec2(100.0, 200.0), dvec2(300.0, 400.0)),
            dvec2(200.0, 300.0)
        );
    }
}
