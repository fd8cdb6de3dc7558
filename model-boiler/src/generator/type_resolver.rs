//! Type resolution for scanned properties.
//!
//! An explicit annotation always wins. Otherwise the initializer literal is
//! matched against [`InferenceRule::ORDER`], first match wins. This is a
//! shape heuristic, not a type checker: `"3"` is a `String` because the
//! quote check runs before any numeric parse.

use crate::error::{BoilerError, BoilerResult};
use crate::ir::PropertyDeclaration;

/// One literal-shape rule used when a property has no annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceRule {
    /// `"..."` → `String`
    StringLiteral,
    /// `2.33` → `Double`
    DecimalLiteral,
    /// `1` → `Int`
    IntegerLiteral,
    /// `true` / `false` → `Bool`
    BooleanLiteral,
    /// `CustomType()` / `[String]()` → the constructed type
    ConstructorCall,
}

impl InferenceRule {
    /// Rules in priority order.
    pub const ORDER: [InferenceRule; 5] = [
        InferenceRule::StringLiteral,
        InferenceRule::DecimalLiteral,
        InferenceRule::IntegerLiteral,
        InferenceRule::BooleanLiteral,
        InferenceRule::ConstructorCall,
    ];

    /// Type produced by this rule for the literal, if the shape matches.
    pub fn apply(self, literal: &str) -> Option<String> {
        let literal = literal.trim();
        match self {
            InferenceRule::StringLiteral => literal.starts_with('"').then(|| "String".to_string()),
            InferenceRule::DecimalLiteral => {
                let digits = numeric_digits(literal)?;
                let (whole, fraction) = literal.split_once('.')?;
                let digit_on_both_sides = whole.ends_with(|c: char| c.is_ascii_digit())
                    && fraction.starts_with(|c: char| c.is_ascii_digit());
                (digit_on_both_sides && digits.parse::<f64>().is_ok())
                    .then(|| "Double".to_string())
            }
            InferenceRule::IntegerLiteral => numeric_digits(literal)?
                .parse::<i64>()
                .is_ok()
                .then(|| "Int".to_string()),
            InferenceRule::BooleanLiteral => {
                matches!(literal, "true" | "false").then(|| "Bool".to_string())
            }
            InferenceRule::ConstructorCall => constructed_type(literal).map(str::to_string),
        }
    }
}

/// Resolves the type to emit for each property.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeResolver;

impl TypeResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the emitted type for a declaration.
    pub fn resolve(&self, decl: &PropertyDeclaration) -> BoilerResult<String> {
        if let Some(ty) = &decl.declared_type {
            return Ok(ty.clone());
        }

        decl.initializer
            .as_deref()
            .and_then(infer_literal_type)
            .ok_or_else(|| BoilerError::inference_failed(&decl.name))
    }
}

/// Infer a type from an initializer literal alone.
pub fn infer_literal_type(literal: &str) -> Option<String> {
    InferenceRule::ORDER
        .iter()
        .find_map(|rule| rule.apply(literal))
}

/// The type name in a zero-argument constructor call such as `Foo()`,
/// `Outer.Inner()`, `[String]()` or `Array<Int>()`.
fn constructed_type(literal: &str) -> Option<&str> {
    let name = literal.strip_suffix("()")?.trim_end();
    let first = name.chars().next()?;

    let valid_start = first.is_alphabetic() || first == '_' || first == '[';
    let valid_chars = name.chars().all(|c| {
        c.is_alphanumeric() || matches!(c, '_' | '.' | '<' | '>' | '[' | ']' | ':' | ',' | ' ' | '?')
    });

    (valid_start && valid_chars && names_a_type(name)).then_some(name)
}

/// Type names are capitalized; `Date.now()` and `makeDefault()` are calls.
fn names_a_type(name: &str) -> bool {
    if name.starts_with('[') {
        return true;
    }
    let path = name.split('<').next().unwrap_or(name);
    let last = path.rsplit('.').next().unwrap_or(path);
    last.trim_start_matches('_').starts_with(char::is_uppercase)
}

/// Digits of a numeric literal with separators removed, when the text starts
/// with an optional sign followed by a digit.
fn numeric_digits(literal: &str) -> Option<String> {
    let unsigned = literal
        .strip_prefix(|c: char| c == '-' || c == '+')
        .unwrap_or(literal);
    if !unsigned.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(literal.chars().filter(|c| *c != '_').collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(literal: &str) -> Option<String> {
        infer_literal_type(literal)
    }

    #[test]
    fn test_explicit_type_wins() {
        let decl = PropertyDeclaration::new("count")
            .with_type("Int64?")
            .with_initializer("\"not a number\"");
        assert_eq!(TypeResolver::new().resolve(&decl).unwrap(), "Int64?");
    }

    #[test]
    fn test_literal_inference() {
        assert_eq!(infer("1").as_deref(), Some("Int"));
        assert_eq!(infer("-42").as_deref(), Some("Int"));
        assert_eq!(infer("1_000").as_deref(), Some("Int"));
        assert_eq!(infer("2.33").as_deref(), Some("Double"));
        assert_eq!(infer("\"Hello\"").as_deref(), Some("String"));
        assert_eq!(infer("true").as_deref(), Some("Bool"));
        assert_eq!(infer("false").as_deref(), Some("Bool"));
        assert_eq!(infer("CustomType()").as_deref(), Some("CustomType"));
    }

    #[test]
    fn test_quoted_number_is_string() {
        assert_eq!(infer("\"3\"").as_deref(), Some("String"));
        assert_eq!(infer("\"2.5\"").as_deref(), Some("String"));
    }

    #[test]
    fn test_constructor_call_forms() {
        assert_eq!(infer("[String]()").as_deref(), Some("[String]"));
        assert_eq!(infer("[String: Int]()").as_deref(), Some("[String: Int]"));
        assert_eq!(infer("Array<Int>()").as_deref(), Some("Array<Int>"));
        assert_eq!(infer("Outer.Inner()").as_deref(), Some("Outer.Inner"));
    }

    #[test]
    fn test_parentheses_alone_do_not_infer_a_type() {
        assert_eq!(infer("compute(3)"), None);
        assert_eq!(infer("(1, 2)"), None);
        assert_eq!(infer("()"), None);
        assert_eq!(infer("foo() + bar()"), None);
    }

    #[test]
    fn test_unknown_shapes() {
        assert_eq!(infer("someValue"), None);
        assert_eq!(infer("1.2.3"), None);
    }

    #[test]
    fn test_numbers_need_literal_shape() {
        assert_eq!(infer("_1"), None);
        assert_eq!(infer("_1_000"), None);
        assert_eq!(infer(".5"), None);
        assert_eq!(infer("1."), None);
        assert_eq!(infer("-.5"), None);
        assert_eq!(infer("-0.5").as_deref(), Some("Double"));
        assert_eq!(infer("1_000.25").as_deref(), Some("Double"));
        assert_eq!(infer("+7").as_deref(), Some("Int"));
    }

    #[test]
    fn test_lowercase_calls_are_not_constructors() {
        assert_eq!(infer("Date.now()"), None);
        assert_eq!(infer("makeDefault()"), None);
        assert_eq!(infer("Foundation.Date()").as_deref(), Some("Foundation.Date"));
        assert_eq!(infer("_Storage()").as_deref(), Some("_Storage"));
        assert_eq!(infer("Swift.Array<Int>()").as_deref(), Some("Swift.Array<Int>"));
        assert_eq!(infer("[1, 2, 3]"), None);
    }

    #[test]
    fn test_missing_annotation_and_initializer_fails() {
        let decl = PropertyDeclaration::new("mystery");
        let err = TypeResolver::new().resolve(&decl).unwrap_err();
        assert_eq!(
            err,
            BoilerError::TypeInferenceFailed {
                property: "mystery".to_string()
            }
        );
    }

    #[test]
    fn test_rule_order_is_fixed() {
        assert_eq!(InferenceRule::ORDER[0], InferenceRule::StringLiteral);
        assert_eq!(InferenceRule::ORDER[4], InferenceRule::ConstructorCall);
        assert_eq!(InferenceRule::DecimalLiteral.apply("7"), None);
        assert_eq!(InferenceRule::IntegerLiteral.apply("7").as_deref(), Some("Int"));
    }
}
