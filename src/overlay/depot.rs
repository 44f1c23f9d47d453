//! Depot track fans: parallel stabling tracks branching off a host line.

use glam::{DVec2, dvec2};

use crate::model::{Depot, Orientation};
use crate::types::Spacing;

/// One depot track placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct DepotTrackSegment {
    pub code: String,
    pub start: DVec2,
    pub end: DVec2,
}

/// Fan a depot's tracks out perpendicular to the host line, centered on the
/// anchor station.
///
/// Adjacent tracks sit `3 * spacing` apart and each track is
/// `track.length * spacing` long. Tracks on a horizontal host extend upward
/// (negative y); on a vertical host they extend rightward (positive x).
/// The fan is purely additive geometry, not a packing solver: tracks may
/// overlap other map elements.
pub fn compute_depot_tracks(
    depot: &Depot,
    anchor: DVec2,
    line_orientation: Orientation,
    spacing: Spacing,
) -> Vec<DepotTrackSegment> {
    let step = 3.0 * spacing.raw();
    let start_offset = -((depot.tracks.len().saturating_sub(1)) as f64 / 2.0) * step;

    depot
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let offset = start_offset + i as f64 * step;
            let length = track.length * spacing.raw();
            let (start, end) = match line_orientation {
                Orientation::Horizontal => {
                    let start = dvec2(anchor.x + offset, anchor.y);
                    (start, dvec2(start.x, start.y - length))
                }
                Orientation::Vertical => {
                    let start = dvec2(anchor.x, anchor.y + offset);
                    (start, dvec2(start.x + length, start.y))
                }
            };
            DepotTrackSegment {
                code: track.code.clone(),
                start,
                end,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DepotTrack;

    fn depot(lengths: &[f64]) -> Depot {
        Depot {
            id: "depot-1".into(),
            line_id: 1,
            name: "Main Depot".into(),
            tracks: lengths
                .iter()
                .enumerate()
                .map(|(i, &length)| DepotTrack {
                    code: format!("T{}", i + 1),
                    length,
                })
                .collect(),
        }
    }

    #[test]
    fn fan_is_centered_on_the_anchor() {
        let spacing = Spacing::try_new(50.0).unwrap();
        let tracks = compute_depot_tracks(
            &depot(&[6.0, 6.0, 6.0]),
            dvec2(500.0, 500.0),
            Orientation::Horizontal,
            spacing,
        );
        let xs: Vec<f64> = tracks.iter().map(|t| t.start.x).collect();
        assert_eq!(xs, vec![350.0, 500.0, 650.0]);
        // Each track runs 6 grid units upward from the host line.
        for t in &tracks {
            assert_eq!(t.start.y, 500.0);
            assert_eq!(t.end.y, 200.0);
            assert_eq!(t.start.x, t.end.x);
        }
        assert_eq!(tracks[0].code, "T1");
    }

    #[test]
    fn vertical_host_fans_horizontally() {
        let spacing = Spacing::try_new(50.0).unwrap();
        let tracks = compute_depot_tracks(
            &depot(&[4.0, 2.0]),
            dvec2(800.0, 400.0),
            Orientation::Vertical,
            spacing,
        );
        assert_eq!(tracks.len(), 2);
        // Two tracks straddle the anchor, half a step either side.
        assert_eq!(tracks[0].start, dvec2(800.0, 325.0));
        assert_eq!(tracks[1].start, dvec2(800.0, 475.0));
        assert_eq!(tracks[0].end, dvec2(1000.0, 325.0));
        assert_eq!(tracks[1].end, dvec2(900.0, 475.0));
    }

    #[test]
    fn empty_depot_yields_no_tracks() {
        let spacing = Spacing::try_new(50.0).unwrap();
        let tracks = compute_depot_tracks(
            &depot(&[]),
            dvec2(0.0, 0.0),
            Orientation::Horizontal,
            spacing,
        );
        assert!(tracks.is_empty());
    }
}
