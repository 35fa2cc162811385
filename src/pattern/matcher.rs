//! Matching input bytes against a compiled pattern.

use super::{Element, MatchError};
use crate::metadata::Metadata;

/// Walks `elements` over `input` with a single forward cursor.
///
/// A variable captures up to the byte of the literal that follows it, or to
/// the end of input when it is the last element. Repeated variable names
/// overwrite earlier captures.
pub(super) fn match_into(
    elements: &[Element],
    input: &[u8],
    meta: &mut Metadata,
) -> Result<(), MatchError> {
    let mut pos = 0;
    for (i, element) in elements.iter().enumerate() {
        pos = match element {
            Element::Literal(expected) => scan_literal(*expected, input, pos)?,
            Element::Variable(name) => {
                // Patterns are validated on construction, so a variable is
                // never followed by another variable.
                let stop = match elements.get(i + 1) {
                    Some(Element::Literal(b)) => Some(*b),
                    _ => None,
                };
                scan_variable(name, stop, input, pos, meta)?
            }
        };
    }

    if pos != input.len() {
        return Err(MatchError::TrailingInput {
            position: pos,
            rest: String::from_utf8_lossy(&input[pos..]).into_owned(),
        });
    }
    Ok(())
}

fn scan_literal(expected: u8, input: &[u8], pos: usize) -> Result<usize, MatchError> {
    match input.get(pos) {
        None => Err(MatchError::UnexpectedEnd {
            expected,
            position: pos,
        }),
        Some(&found) if found != expected => Err(MatchError::UnexpectedByte {
            expected,
            found,
            position: pos,
        }),
        Some(_) => Ok(pos + 1),
    }
}

fn scan_variable(
    name: &str,
    stop: Option<u8>,
    input: &[u8],
    pos: usize,
    meta: &mut Metadata,
) -> Result<usize, MatchError> {
    let rest = &input[pos..];
    let len = match stop {
        Some(stop) => rest.iter().position(|&b| b == stop).unwrap_or(rest.len()),
        None => rest.len(),
    };
    if len == 0 {
        return Err(MatchError::EmptyVariable {
            name: name.to_string(),
            position: pos,
        });
    }

    meta.insert(name, String::from_utf8_lossy(&rest[..len]));
    Ok(pos + len)
}
