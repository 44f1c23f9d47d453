//! metromap: schematic transit map layout and overlay geometry.
//!
//! The engine renders nothing itself. It computes deterministic station
//! placement on a snapping grid, parses and produces the text map format,
//! builds depot track fans and scissor-rail crossings, and interpolates
//! train positions along a line's polyline route. A rendering collaborator
//! (SVG, canvas, TUI) consumes the resulting geometry and owns all event
//! handling.
//!
//! ```
//! use metromap::layout::compute_line_stations;
//! use metromap::model::LineRegistry;
//! use metromap::types::{Canvas, Spacing, ViewMode};
//!
//! let registry = LineRegistry::default_catalog();
//! let spacing = ViewMode::Normal.effective_spacing(Spacing::BASE);
//! let line = registry.require(1)?;
//! let stations = compute_line_stations(line, Canvas::new(1920.0, 1080.0), spacing)?;
//! assert_eq!(stations.len(), line.station_count as usize);
//! # Ok::<(), metromap::errors::MapError>(())
//! ```

use pest_derive::Parser;

pub mod codec;
pub mod errors;
pub mod layout;
pub mod log;
pub mod model;
pub mod motion;
pub mod overlay;
pub mod types;

/// Parser for the text map format (see `mapfile.pest`).
#[derive(Parser)]
#[grammar = "mapfile.pest"]
pub struct MapParser;

pub use codec::{export, import, import_named};
pub use errors::MapError;
pub use model::MapDocument;
