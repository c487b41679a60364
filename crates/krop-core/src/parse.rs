//! Parsers for the user-facing string formats.
//!
//! | Format | Example | Result |
//! |--------|---------|--------|
//! | Page range | `"1-3, 7, 10-"` | 0-based page indices |
//! | Padding | `"2"`, `"2,4"`, `"1,2,3"`, `"1,2,3,4"` | [`Padding`] in CSS order |
//! | Grid | `"3x2"`, `"4"` | [`GridSpec`] |
//! | Aspect ratio | `"4:3"`, `"1.5"` | width / height |
//!
//! Malformed input is a [`ParseError`]; callers decide on the fallback.

use thiserror::Error;

use crate::config::Padding;
use crate::grid::GridSpec;

/// Error types for malformed user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A page number or padding value is not a number.
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    /// A page range without its first page, such as `"-5"`.
    #[error("Page range is missing its start: {0:?}")]
    MissingRangeStart(String),

    /// A page range whose end lies before its start.
    #[error("Page range ends before it starts: {0:?}")]
    ReversedRange(String),

    /// A page number outside `1..=page_count`.
    #[error("Page {page} is out of range (document has {page_count} pages)")]
    PageOutOfRange { page: usize, page_count: usize },

    /// More than four padding values, or a negative one.
    #[error("Invalid padding: {0:?}")]
    InvalidPadding(String),

    /// A grid that is not `"CxR"` or a single positive integer.
    #[error("Invalid grid: {0:?}")]
    InvalidGrid(String),
}

/// Parse a page range such as `"1-3, 7, 10-"` into 0-based page indices.
///
/// Pages are 1-based in the input. A range `a-b` is inclusive; leaving out
/// `b` means "up to the last page". An empty string selects every page.
/// Indices are returned in the order given, duplicates included.
///
/// # Arguments
///
/// * `s` - Comma-separated page numbers and ranges
/// * `page_count` - Number of pages in the document
pub fn parse_page_range(s: &str, page_count: usize) -> Result<Vec<usize>, ParseError> {
    if s.trim().is_empty() {
        return Ok((0..page_count).collect());
    }

    let mut pages = Vec::new();
    for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let (first, last) = match item.split_once('-') {
            Some((a, b)) => (a.trim(), Some(b.trim())),
            None => (item, None),
        };
        if first.is_empty() {
            return Err(ParseError::MissingRangeStart(item.to_string()));
        }

        let first = parse_page_number(first, page_count)?;
        let last = match last {
            None => first,
            Some("") => page_count,
            Some(b) => parse_page_number(b, page_count)?,
        };
        if last < first {
            return Err(ParseError::ReversedRange(item.to_string()));
        }

        pages.extend(first - 1..last);
    }
    Ok(pages)
}

fn parse_page_number(s: &str, page_count: usize) -> Result<usize, ParseError> {
    let page: usize = s
        .parse()
        .map_err(|_| ParseError::InvalidNumber(s.to_string()))?;
    if page == 0 || page > page_count {
        return Err(ParseError::PageOutOfRange { page, page_count });
    }
    Ok(page)
}

/// Parse a padding shorthand with one to four comma-separated values.
///
/// Values follow CSS order:
///
/// ```text
/// "a"       -> a on all sides
/// "a,b"     -> top/bottom a, right/left b
/// "a,b,c"   -> top a, right/left b, bottom c
/// "a,b,c,d" -> top a, right b, bottom c, left d
/// ```
///
/// An empty string means no padding.
pub fn parse_padding(s: &str) -> Result<Padding, ParseError> {
    let values = s
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber(v.to_string()))
        })
        .collect::<Result<Vec<f64>, ParseError>>()?;

    if values.iter().any(|v| *v < 0.0 || !v.is_finite()) {
        return Err(ParseError::InvalidPadding(s.to_string()));
    }

    let padding = match values.as_slice() {
        [] => Padding::default(),
        [a] => Padding::uniform(*a),
        [a, b] => Padding::new(*a, *b, *a, *b),
        [a, b, c] => Padding::new(*a, *b, *c, *b),
        [a, b, c, d] => Padding::new(*a, *b, *c, *d),
        _ => return Err(ParseError::InvalidPadding(s.to_string())),
    };
    Ok(padding)
}

/// Parse a grid such as `"3x2"` (columns x rows) or `"4"`.
///
/// A single number means rows on a portrait page and columns otherwise.
pub fn parse_grid_spec(s: &str, portrait: bool) -> Result<GridSpec, ParseError> {
    let invalid = || ParseError::InvalidGrid(s.to_string());
    let count = |v: &str| v.trim().parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(invalid);

    let trimmed = s.trim();
    match trimmed.split_once(|c: char| c == 'x' || c == 'X') {
        Some((c, r)) => Ok(GridSpec::new(count(c)?, count(r)?)),
        None => {
            let n = count(trimmed)?;
            Ok(if portrait {
                GridSpec::new(1, n)
            } else {
                GridSpec::new(n, 1)
            })
        }
    }
}

/// Parse an aspect ratio `"w:h"` (or `"w"`, meaning `w:1`).
///
/// Returns `None` for anything that does not give a positive, finite ratio,
/// which leaves selections unconstrained.
pub fn parse_aspect_ratio(s: &str) -> Option<f64> {
    let (w, h) = match s.split_once(':') {
        Some((w, h)) => (w.trim().parse::<f64>().ok()?, h.trim().parse::<f64>().ok()?),
        None => (s.trim().parse::<f64>().ok()?, 1.0),
    };
    Some(w / h).filter(|r| *r > 0.0 && r.is_finite())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
