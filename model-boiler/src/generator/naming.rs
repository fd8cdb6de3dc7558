//! Serialized key naming.

use crate::parser::words::split_words;

/// Map a property name to the key used on the wire.
///
/// Without case conversion the key is the name itself (minus any backtick
/// escaping). With conversion the name is split into words, lowercased and
/// joined with `_`.
pub fn serialized_key(name: &str, convert_case: bool) -> String {
    if !convert_case {
        return name.trim_matches('`').to_string();
    }
    to_snake_case(name)
}

/// Convert a camelCase identifier to snake_case.
pub fn to_snake_case(name: &str) -> String {
    let words: Vec<String> = split_words(name)
        .into_iter()
        .map(|word| word.to_lowercase())
        .collect();
    words.join("_").trim_matches('_').to_string()
}
