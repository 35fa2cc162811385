//! Filename patterns.
//!
//! A pattern is written as a format string of literal bytes interspersed with
//! `$(name)` variables, for example `$(slide) $(subject) $(region) $(stain).tif`.
//! Compiling it yields a [`Pattern`] which extracts a [`Metadata`] mapping from
//! filenames that follow the convention.
//!
//! ```ignore
//! use wvm::Pattern;
//!
//! let pattern = Pattern::compile("$(slide) $(sample) $(region) $(stain).tif")?;
//! let meta = pattern.match_bytes(b"slide-1 sample-1 L1 FFa.tif")?;
//! assert_eq!(meta.value("stain"), "FFa");
//! ```
//!
//! There is no escape for a literal `$(`.

mod error;
mod matcher;
mod parse;

pub use error::{MatchError, PatternError};

use std::fmt;
use std::str::FromStr;

use crate::metadata::Metadata;

/// Default format for microscopy image names.
pub const DEFAULT_FORMAT: &str = "$(slide) $(subject) $(region) $(stain).tif";

/// One element of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// A byte that must appear verbatim.
    Literal(u8),
    /// A named slot capturing one or more bytes.
    Variable(String),
}

impl Element {
    pub fn is_variable(&self) -> bool {
        matches!(self, Element::Variable(_))
    }

    /// Debug form: `<char c>` or `<var name>`.
    pub fn verbose(&self) -> String {
        match self {
            Element::Literal(b) => format!("<char {}>", escape_byte(b)),
            Element::Variable(name) => format!("<var {}>", name),
        }
    }

    fn write_format(&self, out: &mut Vec<u8>) {
        match self {
            Element::Literal(b) => out.push(*b),
            Element::Variable(name) => {
                out.extend_from_slice(b"$(");
                out.extend_from_slice(name.as_bytes());
                out.push(b')');
            }
        }
    }
}

/// A compiled, validated filename pattern.
///
/// Every `Pattern` upholds the invariant that no two variables are adjacent,
/// so each variable is either last or followed by the literal that ends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    elements: Vec<Element>,
}

impl Pattern {
    /// Compiles a format string.
    pub fn compile(format: &str) -> Result<Self, PatternError> {
        let elements = parse::parse(format.as_bytes())?;
        Self::new(elements)
    }

    /// Builds a pattern from elements, rejecting adjacent variables.
    pub fn new(elements: Vec<Element>) -> Result<Self, PatternError> {
        validate(&elements)?;
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Names of the variables, in pattern order (repeats included).
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Variable(name) => Some(name.as_str()),
            Element::Literal(_) => None,
        })
    }

    /// The format string as raw bytes; recompiling it yields an equal pattern.
    pub fn format_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.elements.len());
        for element in &self.elements {
            element.write_format(&mut out);
        }
        out
    }

    /// Debug form listing each element, e.g. `<var slide><char  >`.
    pub fn verbose(&self) -> String {
        self.elements.iter().map(Element::verbose).collect()
    }

    /// Matches `input`, returning a fresh metadata mapping.
    pub fn match_bytes(&self, input: &[u8]) -> Result<Metadata, MatchError> {
        let mut meta = Metadata::new();
        self.match_into(input, &mut meta)?;
        Ok(meta)
    }

    /// Matches `input`, writing captures into `meta`.
    ///
    /// On failure `meta` may hold captures from the elements that matched
    /// before the failing one.
    pub fn match_into(&self, input: &[u8], meta: &mut Metadata) -> Result<(), MatchError> {
        matcher::match_into(&self.elements, input, meta)
    }

    pub fn match_str(&self, input: &str) -> Result<Metadata, MatchError> {
        self.match_bytes(input.as_bytes())
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::compile(DEFAULT_FORMAT).expect("Default format should be valid")
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Pattern {
    /// Prints the format string this pattern compiles from.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Literal bytes come from a &str, so together they are valid UTF-8.
        f.write_str(&String::from_utf8_lossy(&self.format_bytes()))
    }
}

/// Checks that no two variables are adjacent.
///
/// This is the only structural rule: literal/literal and literal/variable
/// neighbours are always fine.
pub fn validate(elements: &[Element]) -> Result<(), PatternError> {
    for (i, pair) in elements.windows(2).enumerate() {
        if let [Element::Variable(first), Element::Variable(second)] = pair {
            return Err(PatternError::AdjacentVariables {
                first: first.clone(),
                second: second.clone(),
                position: i,
            });
        }
    }
    Ok(())
}

/// Renders a byte for messages, escaping anything that isn't printable ASCII.
pub(crate) fn escape_byte(b: &u8) -> String {
    b.escape_ascii().to_string()
}
