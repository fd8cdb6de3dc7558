//! Stored property scanner.
//!
//! Walks a declaration body at brace depth zero, one statement at a time,
//! and keeps the statements shaped like
//! `<modifiers> let|var <name>[: <type>][ = <initializer>]`.
//!
//! Skipped without error:
//! - methods, initializers, subscripts and their bodies
//! - computed properties (a binding followed by a non-observer `{ ... }`)
//! - `static`, `class` and `lazy` properties
//! - comments, attributes on their own line, `case`, `typealias`, directives

use crate::error::{BoilerError, BoilerResult};
use crate::ir::{PropertyDeclaration, Span};
use crate::parser::source::{is_identifier_char, is_identifier_start, SourceText};
use tracing::trace;

/// Modifiers allowed in front of a stored property.
const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "fileprivate",
    "internal",
    "package",
    "open",
    "final",
    "override",
    "dynamic",
    "weak",
    "unowned",
    "required",
    "nonisolated",
    "optional",
];

/// Modifiers marking storage that is not per-instance data.
const NON_INSTANCE_MODIFIERS: &[&str] = &["static", "class", "lazy"];

/// Property observer keywords; a block starting with one keeps the
/// property stored.
const OBSERVERS: &[&str] = &["willSet", "didSet"];

/// One statement at depth zero, optionally followed by a `{ ... }` block.
#[derive(Debug, Clone, Copy)]
struct Statement {
    span: Span,
    block: Option<Span>,
}

/// Scanner extracting stored property declarations from a body.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclarationScanner;

impl DeclarationScanner {
    pub fn new() -> Self {
        Self
    }

    /// Scan a declaration body and return its stored properties in source
    /// order.
    pub fn scan(&self, body: &str) -> BoilerResult<Vec<PropertyDeclaration>> {
        let source = SourceText::without_comments(body);
        let mut properties = Vec::new();

        for statement in split_statements(&source) {
            if let Some(property) = self.scan_statement(&source, statement)? {
                trace!(
                    name = %property.name,
                    declared_type = ?property.declared_type,
                    initializer = ?property.initializer,
                    "Scanned property"
                );
                properties.push(property);
            }
        }

        Ok(properties)
    }

    fn scan_statement(
        &self,
        source: &SourceText,
        statement: Statement,
    ) -> BoilerResult<Option<PropertyDeclaration>> {
        let text = source.slice(statement.span);
        let text = text.trim();

        let Some(binding) = Binding::parse(text) else {
            return Ok(None);
        };

        if binding.non_instance {
            trace!(statement = %text, "Skipping type-level or lazy property");
            return Ok(None);
        }

        let Some(block) = statement.block else {
            return parse_binding(binding.rest, text).map(Some);
        };

        let block_text = source.slice(block);
        if text.ends_with('=') {
            // Closure literal initializer.
            let rest = format!("{} {}", binding.rest.trim_end(), block_text);
            return parse_binding(&rest, text).map(Some);
        }

        let inner = block_text
            .trim_start_matches('{')
            .trim_end_matches('}')
            .trim_start();
        let (first_word, _) = take_identifier(inner);
        if OBSERVERS.contains(&first_word) {
            return parse_binding(binding.rest, text).map(Some);
        }

        trace!(statement = %text, "Skipping computed property");
        Ok(None)
    }
}

/// The `let`/`var` keyword position inside a statement.
struct Binding<'a> {
    /// Text after the `let`/`var` keyword.
    rest: &'a str,
    /// Whether a `static`, `class` or `lazy` modifier was present.
    non_instance: bool,
}

impl<'a> Binding<'a> {
    /// Skip attributes and modifiers; `None` when the statement does not
    /// introduce a `let`/`var` binding.
    fn parse(statement: &'a str) -> Option<Self> {
        let mut remaining = statement.trim_start();
        let mut non_instance = false;

        loop {
            if let Some(attribute) = remaining.strip_prefix('@') {
                let (_, after) = take_identifier(attribute);
                remaining = skip_parenthesized(after.trim_start()).trim_start();
                continue;
            }

            let (word, after) = take_identifier(remaining);
            match word {
                "" => return None,
                "let" | "var" => {
                    return Some(Self {
                        rest: after,
                        non_instance,
                    })
                }
                _ if MODIFIERS.contains(&word) => {
                    // `private(set)` and friends.
                    remaining = skip_parenthesized(after.trim_start()).trim_start();
                }
                _ if NON_INSTANCE_MODIFIERS.contains(&word) => {
                    non_instance = true;
                    remaining = after.trim_start();
                }
                _ => return None,
            }
        }
    }
}

/// Decompose `<name>[: <type>][ = <initializer>]`.
fn parse_binding(rest: &str, statement: &str) -> BoilerResult<PropertyDeclaration> {
    let rest = rest.trim();

    let name_len = if let Some(quoted) = rest.strip_prefix('`') {
        quoted.find('`').map_or(0, |end| end + 2)
    } else if rest.starts_with(is_identifier_start) {
        take_identifier(rest).0.len()
    } else {
        0
    };
    if name_len == 0 {
        return Err(BoilerError::unparseable(statement, "expected a property name"));
    }

    let (name, after) = rest.split_at(name_len);
    let after = after.trim_start();
    if has_top_level_comma(after) {
        return Err(BoilerError::unparseable(
            statement,
            "multiple bindings in one statement",
        ));
    }
    let declaration = PropertyDeclaration::new(name);

    if after.is_empty() {
        return Ok(declaration);
    }

    if let Some(annotation) = after.strip_prefix(':') {
        let (ty, initializer) = split_assignment(annotation);
        let ty = ty.trim();
        if ty.is_empty() {
            return Err(BoilerError::unparseable(
                statement,
                "missing type annotation after ':'",
            ));
        }
        let declaration = declaration.with_type(ty);
        return match initializer {
            Some(value) if value.trim().is_empty() => Err(BoilerError::unparseable(
                statement,
                "missing initializer after '='",
            )),
            Some(value) => Ok(declaration.with_initializer(value.trim())),
            None => Ok(declaration),
        };
    }

    if let Some(value) = after.strip_prefix('=') {
        let value = value.trim();
        if value.is_empty() {
            return Err(BoilerError::unparseable(
                statement,
                "missing initializer after '='",
            ));
        }
        return Ok(declaration.with_initializer(value));
    }

    Err(BoilerError::unparseable(
        statement,
        "expected ':' or '=' after the property name",
    ))
}

/// Split `Type = value` at the first `=` outside brackets and generics.
fn split_assignment(text: &str) -> (&str, Option<&str>) {
    let mut depth = 0usize;
    let mut previous = ' ';

    for (index, c) in text.char_indices() {
        match c {
            '(' | '[' | '<' => depth += 1,
            '>' if previous == '-' => {}
            ')' | ']' | '>' => depth = depth.saturating_sub(1),
            '=' if depth == 0 => return (&text[..index], Some(&text[index + 1..])),
            _ => {}
        }
        previous = c;
    }

    (text, None)
}

/// Whether `text` has a `,` outside strings, brackets, generics and
/// closures, as in `a: Int, b: String`.
fn has_top_level_comma(text: &str) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut previous = ' ';

    for c in text.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' | '[' | '{' | '<' => depth += 1,
            '>' if previous == '-' => {}
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return true,
            _ => {}
        }
        previous = c;
    }

    false
}

/// Break a body into depth-zero statements.
///
/// A statement ends at a newline or `;` when no `(`/`[` group is open, or at
/// a `{` which starts its trailing block.
fn split_statements(source: &SourceText) -> Vec<Statement> {
    let len = source.len();
    let mut statements = Vec::new();
    let mut i = 0;

    while i < len {
        let Some(c) = source.char_at(i) else { break };
        if c.is_whitespace() || c == ';' || c == '}' {
            i += 1;
            continue;
        }

        let start = i;
        let mut end = len;
        let mut block = None;
        let mut group = 0usize;

        while i < len {
            let Some(c) = source.char_at(i) else { break };
            match c {
                '"' => {
                    i = source.string_end(i);
                    continue;
                }
                '(' | '[' => group += 1,
                ')' | ']' => group = group.saturating_sub(1),
                '{' => {
                    let block_end = source.matching_brace(i).map_or(len, |close| close + 1);
                    if group > 0 {
                        // Closure argument inside a call.
                        i = block_end;
                        continue;
                    }
                    end = i;
                    block = Some(Span::new(i, block_end));
                    i = block_end;
                    break;
                }
                '}' => {
                    end = i;
                    break;
                }
                '\n' | ';' if group == 0 => {
                    end = i;
                    i += 1;
                    break;
                }
                _ => {}
            }
            i += 1;
        }

        statements.push(Statement {
            span: Span::new(start, end.min(len)),
            block,
        });
    }

    statements
}

/// Split off a leading identifier.
fn take_identifier(text: &str) -> (&str, &str) {
    let end = text
        .char_indices()
        .find(|(_, c)| !is_identifier_char(*c))
        .map_or(text.len(), |(index, _)| index);
    text.split_at(end)
}

/// Skip a leading balanced `( ... )` group, if any.
fn skip_parenthesized(text: &str) -> &str {
    if !text.starts_with('(') {
        return text;
    }
    let mut depth = 0usize;
    for (index, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return &text[index + 1..];
                }
            }
            _ => {}
        }
    }
    ""
}
