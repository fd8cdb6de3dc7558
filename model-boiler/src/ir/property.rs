//! Property IR definitions.

use serde::{Deserialize, Serialize};

/// One stored property found in a declaration body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    /// Property identifier as written in the source.
    pub name: String,

    /// Explicit type annotation, if present (`String?`, `[Int]`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,

    /// Raw right-hand side of the `=` initializer, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,
}

impl PropertyDeclaration {
    /// Create a declaration with neither type nor initializer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            initializer: None,
        }
    }

    /// Set the explicit type annotation.
    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.declared_type = Some(ty.into());
        self
    }

    /// Set the initializer text.
    pub fn with_initializer(mut self, value: impl Into<String>) -> Self {
        self.initializer = Some(value.into());
        self
    }
}

/// A property after type resolution and key naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedField {
    /// Property identifier, also used as the `CodingKeys` case label.
    pub name: String,

    /// Type emitted in generated code, optional marker included.
    pub emitted_type: String,

    /// Whether the emitted type ends in `?`.
    pub is_optional: bool,

    /// Key used on the wire.
    pub serialized_key: String,
}

impl ResolvedField {
    /// Build a field, deriving optionality from the emitted type.
    pub fn new(
        name: impl Into<String>,
        emitted_type: impl Into<String>,
        serialized_key: impl Into<String>,
    ) -> Self {
        let emitted_type = emitted_type.into();
        Self {
            name: name.into(),
            is_optional: emitted_type.ends_with('?'),
            emitted_type,
            serialized_key: serialized_key.into(),
        }
    }

    /// The type passed to `decode`/`decodeIfPresent`, with the optional
    /// marker stripped.
    pub fn decode_type(&self) -> &str {
        self.emitted_type
            .strip_suffix('?')
            .unwrap_or(&self.emitted_type)
    }
}
