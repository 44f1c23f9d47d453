//! Error types with rich diagnostics using miette
//!
//! Codec errors carry source spans pointing into the map text; geometry
//! errors name the degenerate input so callers can fail loudly instead of
//! propagating NaN into rendered output.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumericError {
    #[error("value is NaN")]
    NaN,
    #[error("value is infinite")]
    Infinite,
    #[error("value is zero")]
    Zero,
    #[error("value is negative")]
    Negative,
}

// ============================================================================
// Format Errors
// ============================================================================

/// Errors raised while parsing or validating the text map format.
///
/// Imports are all-or-nothing: any of these aborts the import with no
/// partial document.
#[derive(Error, Diagnostic, Debug)]
pub enum FormatError {
    #[error("invalid map file: missing start/end markers")]
    #[diagnostic(
        code(metromap::codec::missing_markers),
        help("a map document begins with the literal `start` and ends with `end`")
    )]
    MissingMarkers {
        #[source_code]
        src: NamedSource<String>,
        #[label("document starts here")]
        span: SourceSpan,
    },

    #[error("invalid map file: missing sections")]
    #[diagnostic(
        code(metromap::codec::missing_sections),
        help("the body carries two `>`-delimited sections: lines, then stations")
    )]
    MissingSections {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected two `>` section separators")]
        span: SourceSpan,
    },

    #[error("malformed map record")]
    #[diagnostic(code(metromap::codec::malformed))]
    Malformed {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
    },

    #[error("invalid number: {value}")]
    #[diagnostic(
        code(metromap::codec::invalid_number),
        help("numeric fields must be finite")
    )]
    InvalidNumber {
        value: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("does not parse to a finite number")]
        span: SourceSpan,
    },

    #[error("unknown orientation: {orientation}")]
    #[diagnostic(
        code(metromap::codec::unknown_orientation),
        help("a line is either 'horizontal' or 'vertical'")
    )]
    UnknownOrientation {
        orientation: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown orientation")]
        span: SourceSpan,
    },
}

// ============================================================================
// Geometry Errors
// ============================================================================

/// Degenerate geometric input that would otherwise divide by zero or emit
/// NaN coordinates.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum DegenerateInput {
    #[error("canvas {axis} extent {extent} leaves no room inside the {margin} margin")]
    #[diagnostic(code(metromap::layout::canvas_too_small))]
    CanvasTooSmall {
        axis: &'static str,
        extent: f64,
        margin: f64,
    },

    #[error("line {line_id} has no stations to lay out")]
    #[diagnostic(code(metromap::layout::empty_line))]
    EmptyLine { line_id: u32 },
}

/// A station, depot or scissor referenced a line id absent from the active
/// registry. Renderers treat this as "skip this entity"; strict callers get
/// it as a hard error from [`crate::model::LineRegistry::require`].
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown line reference: {line_id}")]
#[diagnostic(code(metromap::model::unknown_line))]
pub struct UnknownLineReference {
    pub line_id: u32,
}

/// Violations of the exclusive-write drag contract on the station position
/// table.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum DragError {
    #[error("a drag gesture is already active on station {active}")]
    #[diagnostic(code(metromap::layout::drag_in_progress))]
    DragInProgress { active: String },

    #[error("unknown station: {id}")]
    #[diagnostic(code(metromap::layout::unknown_station))]
    UnknownStation { id: String },

    #[error("no drag gesture is active")]
    #[diagnostic(code(metromap::layout::no_active_drag))]
    NoActiveDrag,
}

// ============================================================================
// Umbrella
// ============================================================================

/// Top-level error for callers that funnel every engine failure into one
/// channel.
#[derive(Error, Diagnostic, Debug)]
pub enum MapError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Degenerate(#[from] DegenerateInput),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnknownLine(#[from] UnknownLineReference),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Drag(#[from] DragError),
}
