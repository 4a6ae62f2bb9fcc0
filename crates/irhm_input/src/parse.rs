//! Line parser.

use irhm_core::{Sample, SampleCollection};

use crate::error::ParseError;

const FIELDS: usize = 5;

/// Parses one line.
///
/// Returns `Ok(None)` for blank and comment-only lines. `line` is the
/// 1-based line number used in errors.
pub fn parse_line(
    raw: &str,
    source_name: &str,
    line: usize,
) -> Result<Option<Sample>, ParseError> {
    let body = match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let body = body.trim();
    if body.is_empty() {
        return Ok(None);
    }

    let tokens: Vec<&str> = body.split_whitespace().collect();
    if tokens.len() != FIELDS {
        return Err(ParseError::TokenCount {
            source_name: source_name.to_string(),
            line,
            found: tokens.len(),
            content: raw.trim().to_string(),
        });
    }

    // `inf` and `nan` parse as f64 but cannot be placed on a grid.
    let number = |field: &'static str, token: &str| {
        token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::InvalidNumber {
                source_name: source_name.to_string(),
                line,
                field,
                token: token.to_string(),
                content: raw.trim().to_string(),
            })
    };

    let value = number("value", tokens[1])?;
    let x = number("x", tokens[2])?;
    let y = number("y", tokens[3])?;

    Ok(Some(
        Sample::new(tokens[0], value, x, y)
            .with_path(tokens[4])
            .with_raw(raw),
    ))
}

/// Parses `text` into `collection`, returning the number of samples added.
///
/// Samples are appended in line order. On error the collection keeps the
/// samples parsed before the failing line.
pub fn parse_into(
    collection: &mut SampleCollection,
    text: &str,
    source_name: &str,
) -> Result<usize, ParseError> {
    let mut added = 0;
    for (idx, raw) in text.lines().enumerate() {
        if let Some(sample) = parse_line(raw, source_name, idx + 1)? {
            collection.push(sample);
            added += 1;
        }
    }
    tracing::debug!(source = source_name, samples = added, "parsed input");
    Ok(added)
}

/// Parses `text` into a new collection.
pub fn parse_str(text: &str, source_name: &str) -> Result<SampleCollection, ParseError> {
    let mut collection = SampleCollection::new();
    parse_into(&mut collection, text, source_name)?;
    Ok(collection)
}
