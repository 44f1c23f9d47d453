//! Scissor-rail crossings: the four-line "X in a frame" glyph drawn where
//! two parallel tracks cross over.
//!
//! Purely decorative track iconography; no switch-state or interlocking
//! logic is implied.

use glam::dvec2;

use crate::model::{Orientation, Scissor};
use crate::types::Spacing;

use super::Segment;

/// Build the crossing glyph for a scissor: two rails plus the two
/// diagonals. Returns `None` when either endpoint is absent.
///
/// For a horizontal scissor the crossing box is `2 * spacing` wide,
/// centered on the endpoints' mean x, spanning exactly their y values.
/// The vertical orientation is the 90-degree mirror.
pub fn scissor_segments(scissor: &Scissor, spacing: Spacing) -> Option<[Segment; 4]> {
    let a = scissor.station_a?;
    let b = scissor.station_b?;
    let half = spacing.raw();

    Some(match scissor.orientation {
        Orientation::Horizontal => {
            let center_x = (a.x + b.x) / 2.0;
            let (left, right) = (center_x - half, center_x + half);
            let (top, bottom) = (a.y, b.y);
            [
                Segment::new(dvec2(left, top), dvec2(left, bottom)),
                Segment::new(dvec2(right, top), dvec2(right, bottom)),
                Segment::new(dvec2(left, top), dvec2(right, bottom)),
                Segment::new(dvec2(left, bottom), dvec2(right, top)),
            ]
        }
        Orientation::Vertical => {
            let center_y = (a.y + b.y) / 2.0;
            let (top, bottom) = (center_y - half, center_y + half);
            let (left, right) = (a.x, b.x);
            [
                Segment::new(dvec2(left, top), dvec2(right, top)),
                Segment::new(dvec2(left, bottom), dvec2(right, bottom)),
                Segment::new(dvec2(left, top), dvec2(right, bottom)),
                Segment::new(dvec2(right, top), dvec2(left, bottom)),
            ]
        }
    })
}
