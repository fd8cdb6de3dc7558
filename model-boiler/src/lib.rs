//! # model-boiler
//!
//! Generates Swift `Codable` conformance code from model declarations.
//!
//! Given the source of a `struct` or `final class`, the generator emits a
//! `CodingKeys` enum, an `encode(to:)` method and an `init(from:)`
//! initializer covering every stored property. Embedded structs and final
//! classes get their own blocks, and references to them are qualified with
//! the outer type name.
//!
//! ## Usage
//!
//! ```rust
//! use model_boiler::{generate, GeneratorConfig};
//!
//! let source = r#"
//! struct User {
//!     let userName: String
//!     var age: Int?
//! }
//! "#;
//!
//! let config = GeneratorConfig::new().with_snake_case(true);
//! let output = generate(source, &config).unwrap();
//!
//! assert!(output.contains(r#"case userName = "user_name""#));
//! assert!(output.contains("age = try container.decodeIfPresent(Int.self, forKey: .age)"));
//! ```
//!
//! ## Type Inference
//!
//! Properties without an annotation get their type from the initializer:
//!
//! - `"..."` → `String`
//! - `2.33` → `Double`
//! - `1` → `Int`
//! - `true` / `false` → `Bool`
//! - `CustomType()` → `CustomType`
//!
//! Anything else fails with [`BoilerError::TypeInferenceFailed`].

pub mod error;
pub mod generator;
pub mod ir;
pub mod parser;

pub use error::{BoilerError, BoilerResult};
pub use generator::{CodableGenerator, GeneratedOutput, GeneratorConfig};
pub use ir::{DeclarationFragment, DeclarationKind, PropertyDeclaration, ResolvedField};

/// Generate `Codable` code for `source` with the given configuration.
pub fn generate(source: &str, config: &GeneratorConfig) -> BoilerResult<String> {
    CodableGenerator::new(*config).generate(source)
}
