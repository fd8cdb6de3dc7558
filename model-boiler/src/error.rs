//! Error types for the generator core.
//!
//! Every error aborts generation for the whole input; the core never
//! produces partial output.

use thiserror::Error;

/// Result type alias for generator operations.
pub type BoilerResult<T> = Result<T, BoilerError>;

/// Error raised while turning a model declaration into `Codable` code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoilerError {
    /// The declaration is not a `struct` or `final class`.
    #[error("Unsupported declaration kind '{kind}': only structs and final classes are supported")]
    UnsupportedDeclarationKind { kind: String },

    /// No declaration introducer was found in the input.
    #[error("No struct or class declaration found in the input")]
    NoDeclarationFound,

    /// A statement looked like a stored property but could not be decomposed.
    #[error("Could not parse property '{statement}': {reason}")]
    PropertyUnparseable { statement: String, reason: String },

    /// A property has neither a type annotation nor an inferable initializer.
    #[error("Could not infer a type for property '{property}'")]
    TypeInferenceFailed { property: String },

    /// The declaration's braces are missing or unbalanced.
    #[error("Malformed declaration '{name}': {reason}")]
    MalformedDeclaration { name: String, reason: String },
}

impl BoilerError {
    /// Create an unsupported declaration kind error.
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedDeclarationKind { kind: kind.into() }
    }

    /// Create a property parse error.
    pub fn unparseable(statement: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PropertyUnparseable {
            statement: statement.into(),
            reason: reason.into(),
        }
    }

    /// Create a type inference error.
    pub fn inference_failed(property: impl Into<String>) -> Self {
        Self::TypeInferenceFailed {
            property: property.into(),
        }
    }

    /// Create a malformed declaration error.
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDeclaration {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
