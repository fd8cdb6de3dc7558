//! `Codable` code emitter.
//!
//! Turns resolved fields into the three Swift sections:
//!
//! - `enum CodingKeys` mapping each property to its serialized key
//! - `encode(to:)` encoding every property under its key
//! - `init(from:)` decoding every property, using `decodeIfPresent` for
//!   optionals and `decode` otherwise
//!
//! Emission is pure and cannot fail; field order is preserved.

use crate::ir::ResolvedField;

const INDENT: &str = "    ";

/// Generated code for one declaration fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBlock {
    /// `enum CodingKeys` section.
    pub coding_keys: String,

    /// `encode(to:)` section.
    pub encode: String,

    /// `init(from:)` section.
    pub initializer: String,
}

impl GeneratedBlock {
    /// Render the block.
    ///
    /// With `only_initializer` set, the coding keys and encode sections are
    /// left out.
    pub fn render(&self, only_initializer: bool) -> String {
        if only_initializer {
            return self.initializer.clone();
        }
        [
            self.coding_keys.as_str(),
            self.encode.as_str(),
            self.initializer.as_str(),
        ]
        .join("\n\n")
    }
}

/// Emitter for Swift `Codable` conformance code.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodableEmitter;

impl CodableEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Emit all three sections for the fields, in order.
    pub fn emit(&self, fields: &[ResolvedField]) -> GeneratedBlock {
        GeneratedBlock {
            coding_keys: self.emit_coding_keys(fields),
            encode: self.emit_encode(fields),
            initializer: self.emit_initializer(fields),
        }
    }

    fn emit_coding_keys(&self, fields: &[ResolvedField]) -> String {
        let mut lines = vec!["enum CodingKeys: String, CodingKey {".to_string()];
        lines.extend(fields.iter().map(|field| {
            format!(
                "{}case {} = \"{}\"",
                INDENT, field.name, field.serialized_key
            )
        }));
        lines.push("}".to_string());
        lines.join("\n")
    }

    fn emit_encode(&self, fields: &[ResolvedField]) -> String {
        let mut lines = vec![
            "public func encode(to encoder: Encoder) throws {".to_string(),
            format!(
                "{}var container = encoder.container(keyedBy: CodingKeys.self)",
                INDENT
            ),
        ];
        lines.extend(fields.iter().map(|field| {
            format!(
                "{}try container.encode({}, forKey: .{})",
                INDENT, field.name, field.name
            )
        }));
        lines.push("}".to_string());
        lines.join("\n")
    }

    fn emit_initializer(&self, fields: &[ResolvedField]) -> String {
        let mut lines = vec![
            "public init(from decoder: Decoder) throws {".to_string(),
            format!(
                "{}let container = try decoder.container(keyedBy: CodingKeys.self)",
                INDENT
            ),
        ];
        lines.extend(fields.iter().map(|field| {
            let call = if field.is_optional {
                "decodeIfPresent"
            } else {
                "decode"
            };
            format!(
                "{}{} = try container.{}({}.self, forKey: .{})",
                INDENT,
                field.name,
                call,
                field.decode_type(),
                field.name
            )
        }));
        lines.push("}".to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<ResolvedField> {
        vec![
            ResolvedField::new("userName", "String", "user_name"),
            ResolvedField::new("age", "Int?", "age"),
        ]
    }

    #[test]
    fn test_coding_keys_section() {
        let block = CodableEmitter::new().emit(&fields());
        assert_eq!(
            block.coding_keys,
            "enum CodingKeys: String, CodingKey {\n    case userName = \"user_name\"\n    case age = \"age\"\n}"
        );
    }

    #[test]
    fn test_encode_section() {
        let block = CodableEmitter::new().emit(&fields());
        let lines: Vec<&str> = block.encode.lines().collect();
        assert_eq!(lines[0], "public func encode(to encoder: Encoder) throws {");
        assert_eq!(lines[2], "    try container.encode(userName, forKey: .userName)");
        assert_eq!(lines[3], "    try container.encode(age, forKey: .age)");
        assert_eq!(lines[4], "}");
    }

    #[test]
    fn test_initializer_uses_presence_tolerant_decode_for_optionals() {
        let block = CodableEmitter::new().emit(&fields());
        assert!(block
            .initializer
            .contains("    userName = try container.decode(String.self, forKey: .userName)"));
        assert!(block
            .initializer
            .contains("    age = try container.decodeIfPresent(Int.self, forKey: .age)"));
    }

    #[test]
    fn test_render_only_initializer() {
        let block = CodableEmitter::new().emit(&fields());
        let rendered = block.render(true);
        assert!(rendered.starts_with("public init(from decoder: Decoder) throws {"));
        assert!(!rendered.contains("CodingKeys: String"));
        assert!(!rendered.contains("encode(to"));
    }

    #[test]
    fn test_render_full_block_order() {
        let block = CodableEmitter::new().emit(&fields());
        let rendered = block.render(false);
        let keys = rendered.find("enum CodingKeys").unwrap();
        let encode = rendered.find("public func encode").unwrap();
        let init = rendered.find("public init").unwrap();
        assert!(keys < encode && encode < init);
        assert!(rendered.contains("}\n\npublic func encode"));
        assert!(rendered.contains("}\n\npublic init"));
    }

    #[test]
    fn test_empty_field_list() {
        let block = CodableEmitter::new().emit(&[]);
        assert_eq!(block.coding_keys, "enum CodingKeys: String, CodingKey {\n}");
        assert_eq!(block.initializer.lines().count(), 3);
    }
}
