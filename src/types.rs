//! Strongly-typed layout primitives.
//!
//! Design goals:
//! - No raw `f64` grid spacing in domain logic
//! - Illegal states unrepresentable (spacing is always positive and finite)
//! - Snapping goes through [`Spacing`], never ad-hoc arithmetic

use std::fmt;

use crate::errors::NumericError;

/// Margin kept clear around the canvas edge, in canvas units.
pub const MARGIN: f64 = 100.0;

/// Grid spacing in normal view mode, in canvas units.
pub const BASE_GRID_SPACING: f64 = 50.0;

/// Width of the fixed design coordinate system that generated layouts
/// are authored in before scaling to the canvas.
pub const DESIGN_WIDTH: f64 = 2000.0;

/// Height of the fixed design coordinate system.
pub const DESIGN_HEIGHT: f64 = 1000.0;

/// View mode controlling the active grid resolution and which overlays
/// are composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Normal,
    Depot,
    Scada,
}

impl ViewMode {
    /// Parse a mode name, falling back to [`ViewMode::Normal`] for anything
    /// unrecognized. The fallback is the defined default branch, not an
    /// error.
    pub fn parse_lossy(name: &str) -> ViewMode {
        match name {
            "depot" => ViewMode::Depot,
            "scada" => ViewMode::Scada,
            _ => ViewMode::Normal,
        }
    }

    /// Effective grid spacing for this mode. Depot and SCADA views work on
    /// a grid four times finer than the normal schematic view.
    pub fn effective_spacing(self, base: Spacing) -> Spacing {
        match self {
            ViewMode::Normal => base,
            ViewMode::Depot | ViewMode::Scada => Spacing(base.0 / 4.0),
        }
    }

    /// Depot fans and live trains are drawn in depot and SCADA views.
    pub fn shows_depots(self) -> bool {
        matches!(self, ViewMode::Depot | ViewMode::Scada)
    }

    /// Scissor crossings are SCADA-only iconography.
    pub fn shows_scissors(self) -> bool {
        self == ViewMode::Scada
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Normal => write!(f, "normal"),
            ViewMode::Depot => write!(f, "depot"),
            ViewMode::Scada => write!(f, "scada"),
        }
    }
}

/// Grid spacing in canvas units. Always strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Spacing(f64);

impl Spacing {
    /// The normal-mode spacing.
    pub const BASE: Spacing = Spacing(BASE_GRID_SPACING);

    /// Create a spacing with validation (rejects NaN, infinite, zero and
    /// negative values).
    pub fn try_new(val: f64) -> Result<Spacing, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else if val == 0.0 {
            Err(NumericError::Zero)
        } else if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Spacing(val))
        }
    }

    /// Round a coordinate to the nearest grid intersection.
    ///
    /// For any finite `v`, `|snap(v) - v| <= spacing / 2`.
    #[inline]
    pub fn snap(self, v: f64) -> f64 {
        (v / self.0).round() * self.0
    }

    /// Get the raw value (use sparingly, prefer [`Spacing::snap`]).
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canvas dimensions in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Canvas {
        Canvas { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_spacing_quarters_in_depot_and_scada() {
        let base = Spacing::BASE;
        assert_eq!(ViewMode::Depot.effective_spacing(base).raw(), 12.5);
        assert_eq!(ViewMode::Scada.effective_spacing(base).raw(), 12.5);
        assert_eq!(ViewMode::Normal.effective_spacing(base).raw(), 50.0);
    }

    #[test]
    fn unknown_mode_falls_back_to_normal() {
        assert_eq!(ViewMode::parse_lossy("scada"), ViewMode::Scada);
        assert_eq!(ViewMode::parse_lossy("depot"), ViewMode::Depot);
        assert_eq!(ViewMode::parse_lossy("unknownMode"), ViewMode::Normal);
        assert_eq!(
            ViewMode::parse_lossy("unknownMode").effective_spacing(Spacing::BASE),
            Spacing::BASE
        );
    }

    #[test]
    fn snap_error_is_bounded_by_half_spacing() {
        let spacing = Spacing::try_new(50.0).unwrap();
        for v in [-123.4, 0.0, 24.999, 25.0, 77.3, 1000.01] {
            let snapped = spacing.snap(v);
            assert!((snapped - v).abs() <= 25.0, "{v} snapped to {snapped}");
            // Snapped values sit exactly on the grid.
            assert_eq!(snapped % 50.0, 0.0);
        }
    }

    #[test]
    fn spacing_rejects_degenerate_values() {
        assert_eq!(Spacing::try_new(f64::NAN), Err(NumericError::NaN));
        assert_eq!(Spacing::try_new(f64::INFINITY), Err(NumericError::Infinite));
        assert_eq!(Spacing::try_new(0.0), Err(NumericError::Zero));
        assert_eq!(Spacing::try_new(-1.0), Err(NumericError::Negative));
    }
}
