//! Train motion: continuous position interpolation along a piecewise-linear
//! route with wraparound looping.
//!
//! Motion is a single scalar distance advanced once per tick; the tick timer
//! itself belongs to the caller and must be cancelled on teardown. Position
//! mapping walks the route's segments and interpolates inside the one the
//! remaining distance falls in.

use glam::DVec2;

/// Total Euclidean length of a polyline route.
pub fn route_length(route: &[DVec2]) -> f64 {
    route
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .sum()
}

/// One train's motion state along a fixed route.
///
/// The route itself is a read-only view of a line's station positions; the
/// motion never mutates it and re-reads it on every position query, so a
/// station dragged mid-trip takes effect on the next tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainMotion {
    /// Distance travelled along the route, in canvas units.
    distance: f64,
    /// Distance added per tick.
    speed: f64,
}

impl TrainMotion {
    /// A train that starts `start_delay` units into the route and advances
    /// `speed` units per tick.
    pub fn new(speed: f64, start_delay: f64) -> TrainMotion {
        TrainMotion {
            distance: start_delay,
            speed,
        }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Advance one tick. When the new distance passes the end of the route
    /// it resets to exactly zero rather than carrying the remainder, so a
    /// speed that does not divide the route length produces a visible snap
    /// back to the start. Wrapping is strict: a train sitting exactly at
    /// the route's end waits one more tick before restarting.
    pub fn tick(&mut self, route: &[DVec2]) {
        let total = route_length(route);
        let next = self.distance + self.speed;
        self.distance = if next > total { 0.0 } else { next };
    }

    /// Map the current distance to a point on the route.
    ///
    /// A route with fewer than two points or a negative distance yields the
    /// first route point (the origin for an empty route). Zero-length
    /// segments are skipped so no interpolation ever divides by zero.
    pub fn position(&self, route: &[DVec2]) -> DVec2 {
        let Some(&first) = route.first() else {
            return DVec2::ZERO;
        };
        if route.len() < 2 || self.distance < 0.0 {
            return first;
        }

        let mut remaining = self.distance;
        for pair in route.windows(2) {
            let (seg_start, seg_end) = (pair[0], pair[1]);
            let seg_length = seg_start.distance(seg_end);
            if remaining > seg_length {
                remaining -= seg_length;
            } else if seg_length == 0.0 {
                return seg_start;
            } else {
                return seg_start.lerp(seg_end, remaining / seg_length);
            }
        }
        // Distance past the last segment (possible only before the next
        // wrap): clamp to the route's end.
        *route.last().unwrap_or(&first)
    }
}

/// A train service definition: which route it runs, its code, and how it
/// moves.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainSpec {
    pub train_code: String,
    pub speed: f64,
    pub start_delay: f64,
}

impl TrainSpec {
    /// The stock service pattern: two trains per line, the second starting
    /// half a route apart, both at unit speed.
    pub fn pair_for_line(line_id: u32, route_len: f64) -> [TrainSpec; 2] {
        [
            TrainSpec {
                train_code: format!("TR{line_id}01"),
                speed: 1.0,
                start_delay: 0.0,
            },
            TrainSpec {
                train_code: format!("TR{line_id}02"),
                speed: 1.0,
                start_delay: route_len / 2.0,
            },
        ]
    }

    pub fn motion(&self) -> TrainMotion {
        TrainMotion::new(self.speed, self.start_delay)
    }
}
