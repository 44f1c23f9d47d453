//! Import/export of the text map format.
//!
//! The format is framed by literal `start`/`end` markers and carries two
//! `>`-separated sections (line records, then station records); the grammar
//! lives in `mapfile.pest`. Imports are all-or-nothing: a malformed record
//! aborts with a [`FormatError`] carrying a span into the source text.

use miette::{NamedSource, SourceSpan};
use pest::Parser;
use pest::iterators::Pair;

use crate::errors::FormatError;
use crate::model::{GridBounds, MapDocument, MapLine, Orientation, RawStation};
use crate::{MapParser, Rule};

/// Parse a map document from text.
pub fn import(text: &str) -> Result<MapDocument, FormatError> {
    import_named("<map>", text)
}

/// Parse a map document, naming the source for diagnostics (e.g. the file
/// name the text was read from).
pub fn import_named(name: &str, text: &str) -> Result<MapDocument, FormatError> {
    let src = || NamedSource::new(name, text.to_string());

    let trimmed = text.trim();
    if !trimmed.starts_with("start") || !trimmed.ends_with("end") {
        return Err(FormatError::MissingMarkers {
            src: src(),
            span: SourceSpan::from(0..text.len().min(5)),
        });
    }
    // The grammar would reject this too, but a dedicated error kind beats a
    // generic "expected `>`" for the most common authoring mistake.
    if trimmed.matches('>').count() < 2 {
        return Err(FormatError::MissingSections {
            src: src(),
            span: SourceSpan::from(0..text.len().min(5)),
        });
    }

    let mut pairs =
        MapParser::parse(Rule::document, text).map_err(|e| pest_error(name, text, e))?;
    let document = pairs.next().expect("document rule always matches once");

    let mut lines = Vec::new();
    let mut stations = Vec::new();
    for section in document.into_inner() {
        match section.as_rule() {
            Rule::line_section => {
                for record in section.into_inner() {
                    lines.push(parse_line_record(record, name, text)?);
                }
            }
            Rule::station_section => {
                for record in section.into_inner() {
                    stations.push(parse_station_record(record, name, text)?);
                }
            }
            Rule::EOI => {}
            _ => {}
        }
    }

    let grid = GridBounds::from_stations(&stations);
    Ok(MapDocument {
        lines,
        stations,
        grid,
    })
}

/// Serialize a document back to text: the exact inverse framing of
/// [`import`]. Every string field is quoted and an absent transfer group is
/// written as the quoted `null` token. The quote character flips to the
/// other style when the value contains the preferred one, so any field that
/// survived [`import`] serializes back to parseable text.
pub fn export(doc: &MapDocument) -> String {
    let lines: Vec<String> = doc
        .lines
        .iter()
        .map(|l| {
            format!(
                "{}| {}| {}| {}",
                l.id,
                quoted(&l.name, '\''),
                quoted(&l.color, '\''),
                quoted(l.orientation.as_str(), '\'')
            )
        })
        .collect();
    let stations: Vec<String> = doc
        .stations
        .iter()
        .map(|s| {
            let transfer = match &s.transfer {
                Some(t) => quoted(t, '\''),
                None => "'null'".to_string(),
            };
            format!(
                "{}|{}|{}|{}|{}|{}",
                quoted(&s.name, '"'),
                s.line,
                s.station_number,
                transfer,
                s.real_x,
                s.real_y
            )
        })
        .collect();

    // A record list is `;`-terminated, but an empty section stays empty so
    // the output re-imports cleanly.
    let terminate = |records: Vec<String>| {
        if records.is_empty() {
            String::new()
        } else {
            format!("{};", records.join(";"))
        }
    };

    format!(
        "start\n>\n{}\n>\n{}\nend",
        terminate(lines),
        terminate(stations)
    )
}

/// Wrap a field in its preferred quote style, falling back to the other
/// style when the value contains the preferred character. A string accepted
/// by the grammar never contains both quote characters, so one of the two
/// always delimits it safely.
fn quoted(value: &str, preferred: char) -> String {
    let quote = if value.contains(preferred) {
        if preferred == '\'' { '"' } else { '\'' }
    } else {
        preferred
    };
    format!("{quote}{value}{quote}")
}

fn pest_error(name: &str, text: &str, err: pest::error::Error<Rule>) -> FormatError {
    let span = match err.location {
        pest::error::InputLocation::Pos(p) => SourceSpan::from(p..(p + 1).min(text.len())),
        pest::error::InputLocation::Span((s, e)) => SourceSpan::from(s..e),
    };
    FormatError::Malformed {
        message: match err.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } => {
                format!("expected {positives:?}")
            }
            other => other.message().to_string(),
        },
        src: NamedSource::new(name, text.to_string()),
        span,
    }
}

fn parse_line_record(pair: Pair<Rule>, name: &str, text: &str) -> Result<MapLine, FormatError> {
    let mut inner = pair.into_inner();
    let id = parse_u32(next_field(&mut inner), name, text)?;
    let line_name = unquote(next_field(&mut inner).as_str());
    let color = unquote(next_field(&mut inner).as_str());
    let orientation_field = next_field(&mut inner);
    let orientation = match unquote(orientation_field.as_str()).as_str() {
        "horizontal" => Orientation::Horizontal,
        "vertical" => Orientation::Vertical,
        other => {
            return Err(FormatError::UnknownOrientation {
                orientation: other.to_string(),
                src: NamedSource::new(name, text.to_string()),
                span: span_of(&orientation_field),
            });
        }
    };
    Ok(MapLine {
        id,
        name: line_name,
        color,
        orientation,
    })
}

fn parse_station_record(
    pair: Pair<Rule>,
    name: &str,
    text: &str,
) -> Result<RawStation, FormatError> {
    let mut inner = pair.into_inner();
    let station_name = unquote(next_field(&mut inner).as_str());
    let line = parse_u32(next_field(&mut inner), name, text)?;
    let station_number = parse_u32(next_field(&mut inner), name, text)?;
    let transfer = match unquote(next_field(&mut inner).as_str()) {
        t if t == "null" => None,
        t => Some(t),
    };
    let real_x = parse_f64(next_field(&mut inner), name, text)?;
    let real_y = parse_f64(next_field(&mut inner), name, text)?;
    Ok(RawStation {
        name: station_name,
        line,
        station_number,
        transfer,
        real_x,
        real_y,
    })
}

fn next_field<'a>(inner: &mut pest::iterators::Pairs<'a, Rule>) -> Pair<'a, Rule> {
    // Field counts are enforced by the grammar.
    inner.next().expect("record arity enforced by grammar")
}

fn span_of(pair: &Pair<Rule>) -> SourceSpan {
    let span = pair.as_span();
    SourceSpan::from(span.start()..span.end())
}

/// Strip the surrounding quote pair the grammar guarantees is present.
fn unquote(field: &str) -> String {
    field[1..field.len() - 1].to_string()
}

fn parse_u32(pair: Pair<Rule>, name: &str, text: &str) -> Result<u32, FormatError> {
    pair.as_str()
        .parse::<u32>()
        .map_err(|_| FormatError::InvalidNumber {
            value: pair.as_str().to_string(),
            src: NamedSource::new(name, text.to_string()),
            span: span_of(&pair),
        })
}

fn parse_f64(pair: Pair<Rule>, name: &str, text: &str) -> Result<f64, FormatError> {
    let parsed = pair.as_str().parse::<f64>().ok();
    // Overflowing literals parse to infinity; reject anything non-finite so
    // NaN never reaches layout code.
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(FormatError::InvalidNumber {
            value: pair.as_str().to_string(),
            src: NamedSource::new(name, text.to_string()),
            span: span_of(&pair),
        }),
    }
}
