//! Declaration fragment IR definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open range of char indices `[start, end)` into a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} after end {}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely inside this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Kind of declaration the generator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationKind {
    /// `struct Name { ... }`
    Struct,
    /// `final class Name { ... }`
    FinalClass,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Struct => write!(f, "struct"),
            DeclarationKind::FinalClass => write!(f, "final class"),
        }
    }
}

/// One declaration treated as an independent unit of generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationFragment {
    /// Declaration kind.
    pub kind: DeclarationKind,

    /// Declared type name.
    pub name: String,

    /// Body text between the braces, with embedded declarations removed and
    /// references to embedded types qualified.
    pub body: String,

    /// Outer type name plus separator, set when this fragment was embedded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifying_prefix: Option<String>,
}

impl DeclarationFragment {
    /// Fully qualified type name (`Outer.Inner` for embedded fragments).
    pub fn qualified_name(&self) -> String {
        match &self.qualifying_prefix {
            Some(prefix) => format!("{}{}", prefix, self.name),
            None => self.name.clone(),
        }
    }

    /// Whether this fragment was embedded in another declaration.
    pub fn is_embedded(&self) -> bool {
        self.qualifying_prefix.is_some()
    }
}
