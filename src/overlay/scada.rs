//! SCADA element glyphs: signals, switches, power substations, maintenance
//! alerts and emergency zones rendered over the map in SCADA mode.
//!
//! Element kinds are tagged variants dispatched through [`Glyph`] with
//! `enum_dispatch`; unrecognized kinds degrade to a neutral marker rather
//! than failing.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

/// Geometry primitive a SCADA glyph renders to.
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphShape {
    Rect {
        /// Top-left corner.
        origin: DVec2,
        width: f64,
        height: f64,
        fill: String,
        dashed: bool,
    },
    Circle {
        center: DVec2,
        radius: f64,
        fill: String,
    },
    Triangle {
        points: [DVec2; 3],
        fill: String,
    },
}

/// Render a SCADA element kind at a map position.
#[enum_dispatch]
pub trait Glyph {
    fn glyph(&self, at: DVec2) -> GlyphShape;
}

/// Signal aspect shown by a wayside signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalAspect {
    Green,
    Yellow,
    Red,
}

impl SignalAspect {
    fn color(self) -> &'static str {
        match self {
            SignalAspect::Green => "green",
            SignalAspect::Yellow => "yellow",
            SignalAspect::Red => "red",
        }
    }
}

/// A wayside signal: a small square colored by its aspect.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub aspect: SignalAspect,
}

impl Glyph for Signal {
    fn glyph(&self, at: DVec2) -> GlyphShape {
        GlyphShape::Rect {
            origin: at,
            width: 10.0,
            height: 10.0,
            fill: self.aspect.color().to_string(),
            dashed: false,
        }
    }
}

/// A rail switch: a small triangle pointing along the diverging leg.
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    /// Status color; neutral gray when telemetry is absent.
    pub status: Option<String>,
}

impl Glyph for Switch {
    fn glyph(&self, at: DVec2) -> GlyphShape {
        GlyphShape::Triangle {
            points: [at, dvec2(at.x + 10.0, at.y - 5.0), dvec2(at.x + 10.0, at.y + 5.0)],
            fill: self.status.clone().unwrap_or_else(|| "gray".to_string()),
        }
    }
}

/// A power substation or grid feed point.
#[derive(Debug, Clone, PartialEq)]
pub struct Power {
    pub status: Option<String>,
}

impl Glyph for Power {
    fn glyph(&self, at: DVec2) -> GlyphShape {
        GlyphShape::Circle {
            center: at,
            radius: 6.0,
            fill: self.status.clone().unwrap_or_else(|| "blue".to_string()),
        }
    }
}

/// A maintenance alert: a dashed highlight box around the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Maintenance;

impl Glyph for Maintenance {
    fn glyph(&self, at: DVec2) -> GlyphShape {
        GlyphShape::Rect {
            origin: dvec2(at.x - 5.0, at.y - 5.0),
            width: 15.0,
            height: 15.0,
            fill: "orange".to_string(),
            dashed: true,
        }
    }
}

/// An emergency zone (braking or isolation point).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emergency;

impl Glyph for Emergency {
    fn glyph(&self, at: DVec2) -> GlyphShape {
        GlyphShape::Circle {
            center: at,
            radius: 8.0,
            fill: "red".to_string(),
        }
    }
}

/// Fallback for element kinds this build does not recognize.
#[derive(Debug, Clone, PartialEq)]
pub struct Unknown {
    pub status: Option<String>,
}

impl Glyph for Unknown {
    fn glyph(&self, at: DVec2) -> GlyphShape {
        GlyphShape::Circle {
            center: at,
            radius: 5.0,
            fill: self.status.clone().unwrap_or_else(|| "gray".to_string()),
        }
    }
}

/// Tagged SCADA element kind.
#[enum_dispatch(Glyph)]
#[derive(Debug, Clone, PartialEq)]
pub enum ScadaKind {
    Signal,
    Switch,
    Power,
    Maintenance,
    Emergency,
    Unknown,
}

/// A SCADA element placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct ScadaElement {
    pub id: String,
    pub pos: DVec2,
    pub kind: ScadaKind,
}

impl ScadaElement {
    pub fn shape(&self) -> GlyphShape {
        self.kind.glyph(self.pos)
    }
}
