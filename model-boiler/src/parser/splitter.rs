//! Nested declaration splitter.
//!
//! Finds the outermost declaration in a source text, detaches every
//! embedded type declaration into its own fragment and rewrites bare
//! references to embedded types into their qualified form, so
//! `let inner: Inner` inside `struct Outer` reads `let inner: Outer.Inner`.
//!
//! Fragments come out outer first, then depth-first in source order.
//! Embedded enums are removed and qualified but produce no fragment.

use crate::error::{BoilerError, BoilerResult};
use crate::ir::{DeclarationFragment, DeclarationKind, Span};
use crate::parser::source::{is_identifier_char, is_identifier_start, SourceText};
use tracing::{debug, trace, warn};

/// Keywords introducing a type declaration.
const INTRODUCERS: &[&str] = &["struct", "class", "enum", "protocol", "extension", "actor"];

/// Modifiers that may sit between `final` and the introducer.
const TYPE_MODIFIERS: &[&str] = &[
    "public",
    "private",
    "fileprivate",
    "internal",
    "package",
    "open",
    "final",
];

/// Index of the first token in the run of type modifiers written directly
/// before `tokens[keyword_index]`, possibly across line breaks.
fn modifier_chain_start(
    text: &SourceText,
    tokens: &[(Span, String)],
    keyword_index: usize,
    floor: usize,
) -> usize {
    let mut first = keyword_index;
    while first > 0 {
        let (span, token) = &tokens[first - 1];
        let adjacent = text
            .slice(Span::new(span.end, tokens[first].0.start))
            .trim()
            .is_empty();
        let member_access = matches!(
            text.previous_non_whitespace(span.start, floor),
            Some((_, '.'))
        );
        if !TYPE_MODIFIERS.contains(&token.as_str()) || !adjacent || member_access {
            break;
        }
        first -= 1;
    }
    first
}

/// Words after `class` that make it a member modifier rather than a type.
const MEMBER_WORDS: &[&str] = &["func", "var", "let", "subscript", "init", "override", "final"];

/// Words after which an identifier is being bound, not referenced.
const BINDING_WORDS: &[&str] = &["let", "var", "case", "func", "typealias"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Introducer {
    Struct,
    FinalClass,
    Class,
    Enum,
    Other,
}

/// A located declaration inside the comment-free source.
#[derive(Debug, Clone)]
struct Declaration {
    introducer: Introducer,
    keyword: String,
    name: String,
    /// From the start of the header line through the closing brace.
    span: Span,
    /// Between the braces.
    body: Span,
}

impl Declaration {
    /// Fragment kind, or `None` for an enum, which is dropped.
    fn fragment_kind(&self) -> BoilerResult<Option<DeclarationKind>> {
        match self.introducer {
            Introducer::Struct => Ok(Some(DeclarationKind::Struct)),
            Introducer::FinalClass => Ok(Some(DeclarationKind::FinalClass)),
            Introducer::Enum => Ok(None),
            Introducer::Class => Err(BoilerError::unsupported("class")),
            Introducer::Other => Err(BoilerError::unsupported(&self.keyword)),
        }
    }
}

/// Splitter turning one source text into declaration fragments.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclarationSplitter;

impl DeclarationSplitter {
    pub fn new() -> Self {
        Self
    }

    /// Split the source into fragments: the outer declaration first, then
    /// each embedded struct or final class depth-first.
    pub fn split(&self, source: &str) -> BoilerResult<Vec<DeclarationFragment>> {
        let text = SourceText::without_comments(source);
        let outer = self.locate_outer(&text)?;

        let kind = match outer.fragment_kind()? {
            Some(kind) => kind,
            None => return Err(BoilerError::unsupported(&outer.keyword)),
        };

        if outer.span.end < text.len() {
            let trailing = text.slice(Span::new(outer.span.end, text.len()));
            if !trailing.trim().is_empty() {
                warn!(
                    name = %outer.name,
                    ignored_chars = trailing.trim().chars().count(),
                    "Ignoring text after the outer declaration"
                );
            }
        }

        let mut fragments = Vec::new();
        self.collect(&text, &outer, kind, None, &[], &mut fragments)?;
        Ok(fragments)
    }

    fn locate_outer(&self, text: &SourceText) -> BoilerResult<Declaration> {
        let full = text.full_span();

        let Some(open) = text.find_open_brace(full) else {
            let tokens = text.identifiers(full);
            return match tokens
                .iter()
                .position(|(_, token)| INTRODUCERS.contains(&token.as_str()))
            {
                Some(index) => {
                    let name = tokens
                        .get(index + 1)
                        .map_or_else(|| tokens[index].1.clone(), |(_, name)| name.clone());
                    Err(BoilerError::malformed(name, "missing opening brace"))
                }
                None => Err(BoilerError::NoDeclarationFound),
            };
        };

        let tokens = text.identifiers(Span::new(0, open));
        let keyword_index = tokens
            .iter()
            .rposition(|(_, token)| INTRODUCERS.contains(&token.as_str()))
            .ok_or(BoilerError::NoDeclarationFound)?;

        self.declaration_at(text, &tokens, keyword_index, open, 0)
    }

    /// Build the declaration whose introducer is `tokens[keyword_index]` and
    /// whose body opens at `open`.
    fn declaration_at(
        &self,
        text: &SourceText,
        tokens: &[(Span, String)],
        keyword_index: usize,
        open: usize,
        floor: usize,
    ) -> BoilerResult<Declaration> {
        let (_, keyword) = &tokens[keyword_index];

        let name = tokens
            .get(keyword_index + 1)
            .filter(|(span, _)| span.end <= open)
            .map(|(_, name)| name.clone())
            .ok_or_else(|| BoilerError::malformed(keyword.as_str(), "missing type name"))?;

        let chain_start = modifier_chain_start(text, tokens, keyword_index, floor);
        let is_final = tokens[chain_start..keyword_index]
            .iter()
            .any(|(_, token)| token == "final");
        let header_start = tokens[chain_start].0.start;

        let introducer = match keyword.as_str() {
            "struct" => Introducer::Struct,
            "class" if is_final => Introducer::FinalClass,
            "class" => Introducer::Class,
            "enum" => Introducer::Enum,
            _ => Introducer::Other,
        };

        let close = text
            .matching_brace(open)
            .ok_or_else(|| BoilerError::malformed(name.as_str(), "unbalanced braces"))?;

        Ok(Declaration {
            introducer,
            keyword: keyword.clone(),
            name,
            span: Span::new(text.line_start(header_start, floor), close + 1),
            body: Span::new(open + 1, close),
        })
    }

    /// Type declarations directly inside `body`, skipping nested blocks such
    /// as method bodies.
    fn find_embedded(&self, text: &SourceText, body: Span) -> BoilerResult<Vec<Declaration>> {
        let mut found = Vec::new();
        let mut i = body.start;

        while i < body.end {
            let Some(c) = text.char_at(i) else { break };

            if c == '"' {
                i = text.string_end(i);
                continue;
            }
            if c == '{' {
                i = text.matching_brace(i).map_or(body.end, |close| close + 1);
                continue;
            }
            if !is_identifier_start(c) {
                i += 1;
                continue;
            }

            let end = text.identifier_end(i);
            let word = text.slice(Span::new(i, end));
            if !INTRODUCERS.contains(&word.as_str()) || !self.introduces_type(text, i, end, body) {
                i = end;
                continue;
            }

            let open = text
                .find_open_brace(Span::new(end, body.end))
                .ok_or_else(|| BoilerError::malformed(word.as_str(), "missing opening brace"))?;
            let tokens = text.identifiers(Span::new(body.start, open));
            let keyword_index = tokens
                .iter()
                .position(|(span, _)| span.start == i)
                .ok_or_else(|| BoilerError::malformed(word.as_str(), "missing type name"))?;

            let declaration = self.declaration_at(text, &tokens, keyword_index, open, body.start)?;
            trace!(
                keyword = %declaration.keyword,
                name = %declaration.name,
                "Found embedded declaration"
            );
            i = declaration.span.end;
            found.push(declaration);
        }

        Ok(found)
    }

    /// Whether the introducer word at `start..end` opens a type declaration,
    /// as opposed to `class func`, a member access or a property named
    /// `actor`.
    fn introduces_type(&self, text: &SourceText, start: usize, end: usize, body: Span) -> bool {
        if let Some((_, '.')) = text.previous_non_whitespace(start, body.start) {
            return false;
        }

        let mut next = end;
        while next < body.end && text.char_at(next).is_some_and(char::is_whitespace) {
            next += 1;
        }
        if !text.char_at(next).is_some_and(is_identifier_start) {
            return false;
        }

        let following = text.slice(Span::new(next, text.identifier_end(next)));
        !MEMBER_WORDS.contains(&following.as_str())
    }

    /// Emit the fragment for `declaration` and recurse into its embedded
    /// declarations.
    ///
    /// `inherited` maps type names visible from enclosing scopes to the
    /// prefix that qualifies them.
    fn collect(
        &self,
        text: &SourceText,
        declaration: &Declaration,
        kind: DeclarationKind,
        prefix: Option<&str>,
        inherited: &[(String, String)],
        out: &mut Vec<DeclarationFragment>,
    ) -> BoilerResult<()> {
        let embedded = self.find_embedded(text, declaration.body)?;
        let qualified = format!("{}{}", prefix.unwrap_or_default(), declaration.name);
        let child_prefix = format!("{}.", qualified);

        // Names declared here shadow those of enclosing scopes.
        let mut qualifiers: Vec<(String, String)> = inherited
            .iter()
            .filter(|(name, _)| !embedded.iter().any(|child| &child.name == name))
            .cloned()
            .collect();
        qualifiers.extend(
            embedded
                .iter()
                .map(|child| (child.name.clone(), child_prefix.clone())),
        );

        let removals: Vec<Span> = embedded.iter().map(|child| child.span).collect();
        let insertions = qualify_references(text, declaration.body, &removals, &qualifiers);
        let body = text.rebuild(declaration.body, &removals, &insertions);

        debug!(
            name = %qualified,
            kind = %kind,
            embedded = embedded.len(),
            qualified_references = insertions.len(),
            "Split declaration"
        );

        out.push(DeclarationFragment {
            kind,
            name: declaration.name.clone(),
            body,
            qualifying_prefix: prefix.map(str::to_string),
        });

        for child in &embedded {
            match child.fragment_kind()? {
                Some(child_kind) => {
                    self.collect(text, child, child_kind, Some(&child_prefix), &qualifiers, out)?
                }
                None => trace!(name = %child.name, "Dropping embedded enum"),
            }
        }

        Ok(())
    }
}

/// Insertion points qualifying each bare reference to a known type name in
/// `body`, outside the removed spans.
fn qualify_references(
    text: &SourceText,
    body: Span,
    removals: &[Span],
    qualifiers: &[(String, String)],
) -> Vec<(usize, String)> {
    let mut insertions = Vec::new();

    for (span, token) in text.identifiers(body) {
        if removals.iter().any(|removed| removed.contains(&span)) {
            continue;
        }
        let Some((_, prefix)) = qualifiers.iter().find(|(name, _)| *name == token) else {
            continue;
        };
        if let Some((_, '.')) = text.previous_non_whitespace(span.start, body.start) {
            continue;
        }
        if previous_word(text, span.start, body.start)
            .is_some_and(|word| BINDING_WORDS.contains(&word.as_str()))
        {
            continue;
        }
        insertions.push((span.start, prefix.clone()));
    }

    insertions
}

/// The identifier immediately before `index`, ignoring whitespace.
fn previous_word(text: &SourceText, index: usize, floor: usize) -> Option<String> {
    let (last, c) = text.previous_non_whitespace(index, floor)?;
    if !is_identifier_char(c) {
        return None;
    }
    let mut start = last;
    while start > floor && text.char_at(start - 1).is_some_and(is_identifier_char) {
        start -= 1;
    }
    Some(text.slice(Span::new(start, last + 1)))
}
