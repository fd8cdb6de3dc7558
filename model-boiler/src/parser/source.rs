//! Char-indexed view of Swift source text.
//!
//! All extraction works on `(start, end)` char index spans over an immutable
//! buffer. Edits never mutate the buffer: [`SourceText::rebuild`] produces a
//! new string from the kept spans plus inserted text.

use crate::ir::Span;

/// Immutable, char-indexed source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    chars: Vec<char>,
}

impl SourceText {
    /// Wrap the text as-is.
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    /// Wrap the text with `//` and `/* */` comments blanked out.
    ///
    /// Comment characters become spaces (newlines are kept), so indices and
    /// line structure match the original text. String literals are left
    /// untouched, `//` inside `"http://..."` is not a comment.
    pub fn without_comments(text: &str) -> Self {
        let source = Self::new(text);
        let mut chars = source.chars.clone();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            match source.chars[i] {
                '"' => {
                    i = source.string_end(i);
                }
                '/' if source.char_at(i + 1) == Some('/') => {
                    while i < len && source.chars[i] != '\n' {
                        chars[i] = ' ';
                        i += 1;
                    }
                }
                '/' if source.char_at(i + 1) == Some('*') => {
                    // Swift block comments nest.
                    let mut depth = 0usize;
                    while i < len {
                        if source.chars[i] == '/' && source.char_at(i + 1) == Some('*') {
                            depth += 1;
                            chars[i] = ' ';
                            chars[i + 1] = ' ';
                            i += 2;
                        } else if source.chars[i] == '*' && source.char_at(i + 1) == Some('/') {
                            depth -= 1;
                            chars[i] = ' ';
                            chars[i + 1] = ' ';
                            i += 2;
                            if depth == 0 {
                                break;
                            }
                        } else {
                            if chars[i] != '\n' {
                                chars[i] = ' ';
                            }
                            i += 1;
                        }
                    }
                }
                _ => i += 1,
            }
        }

        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Span covering the whole buffer.
    pub fn full_span(&self) -> Span {
        Span::new(0, self.chars.len())
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Text covered by a span.
    pub fn slice(&self, span: Span) -> String {
        self.chars[span.start..span.end].iter().collect()
    }

    /// Index just past the string literal opening at `start`.
    ///
    /// Handles escapes and `"""` multi-line literals. An unterminated
    /// single-line literal ends at the next newline.
    pub fn string_end(&self, start: usize) -> usize {
        let len = self.chars.len();
        if self.char_at(start + 1) == Some('"') && self.char_at(start + 2) == Some('"') {
            let mut i = start + 3;
            while i < len {
                match self.chars[i] {
                    '\\' => i += 2,
                    '"' if self.char_at(i + 1) == Some('"') && self.char_at(i + 2) == Some('"') => {
                        return i + 3;
                    }
                    _ => i += 1,
                }
            }
            return len;
        }

        let mut i = start + 1;
        while i < len {
            match self.chars[i] {
                '\\' => i += 2,
                '"' => return i + 1,
                '\n' => return i,
                _ => i += 1,
            }
        }
        len
    }

    /// Index of the `}` closing the `{` at `open`, skipping string literals.
    pub fn matching_brace(&self, open: usize) -> Option<usize> {
        debug_assert_eq!(self.char_at(open), Some('{'));
        let mut depth = 0usize;
        let mut i = open;

        while i < self.chars.len() {
            match self.chars[i] {
                '"' => {
                    i = self.string_end(i);
                    continue;
                }
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
            i += 1;
        }

        None
    }

    /// First `{` in `span` outside string literals.
    pub fn find_open_brace(&self, span: Span) -> Option<usize> {
        let mut i = span.start;
        while i < span.end {
            match self.chars[i] {
                '"' => {
                    i = self.string_end(i);
                    continue;
                }
                '{' => return Some(i),
                _ => {}
            }
            i += 1;
        }
        None
    }

    /// Identifier tokens inside `span`, skipping string literals.
    ///
    /// Nested braces are not skipped; callers that need depth tracking walk
    /// the buffer themselves.
    pub fn identifiers(&self, span: Span) -> Vec<(Span, String)> {
        let mut tokens = Vec::new();
        let mut i = span.start;

        while i < span.end {
            let c = self.chars[i];
            if c == '"' {
                i = self.string_end(i);
                continue;
            }
            if is_identifier_start(c) {
                let end = self.identifier_end(i).min(span.end);
                let token = Span::new(i, end);
                tokens.push((token, self.slice(token)));
                i = end;
                continue;
            }
            i += 1;
        }

        tokens
    }

    /// Index just past the identifier starting at `start`.
    pub fn identifier_end(&self, start: usize) -> usize {
        let mut i = start;
        while i < self.chars.len() && is_identifier_char(self.chars[i]) {
            i += 1;
        }
        i
    }

    /// Start of the line holding `index`: just after the preceding newline,
    /// `;`, `{` or `}`, never before `floor`.
    pub fn line_start(&self, index: usize, floor: usize) -> usize {
        let mut i = index;
        while i > floor {
            if matches!(self.chars[i - 1], '\n' | ';' | '{' | '}') {
                break;
            }
            i -= 1;
        }
        i
    }

    /// Last non-whitespace char strictly before `index`, not looking before
    /// `floor`.
    pub fn previous_non_whitespace(&self, index: usize, floor: usize) -> Option<(usize, char)> {
        let mut i = index;
        while i > floor {
            i -= 1;
            if !self.chars[i].is_whitespace() {
                return Some((i, self.chars[i]));
            }
        }
        None
    }

    /// Build a new string from `span`, dropping `removals` and inserting each
    /// `(index, text)` right before the char at `index`.
    ///
    /// Removals must lie inside `span` and must not overlap. Insertions that
    /// fall inside a removal are dropped with it.
    pub fn rebuild(&self, span: Span, removals: &[Span], insertions: &[(usize, String)]) -> String {
        let mut removals = removals.to_vec();
        removals.sort_by_key(|r| r.start);
        let mut insertions: Vec<&(usize, String)> = insertions.iter().collect();
        insertions.sort_by_key(|(index, _)| *index);

        let mut out = String::with_capacity(span.len());
        let mut removal_iter = removals.iter().peekable();
        let mut insertion_iter = insertions.into_iter().peekable();
        let mut i = span.start;

        while i < span.end {
            if let Some(removal) = removal_iter.peek() {
                if removal.start == i {
                    i = removal.end;
                    removal_iter.next();
                    while insertion_iter.peek().is_some_and(|(at, _)| *at < i) {
                        insertion_iter.next();
                    }
                    continue;
                }
            }
            while let Some((_, text)) = insertion_iter.next_if(|(at, _)| *at <= i) {
                out.push_str(text);
            }
            out.push(self.chars[i]);
            i += 1;
        }

        out
    }
}

/// Whether `c` can start a Swift identifier.
pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Whether `c` can continue a Swift identifier.
pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_comments_keeps_layout() {
        let text = "let a = 1 // trailing\n/* block */let b = 2";
        let source = SourceText::without_comments(text);
        assert_eq!(source.len(), text.chars().count());
        let stripped = source.slice(source.full_span());
        assert_eq!(stripped.lines().next().unwrap().trim_end(), "let a = 1");
        assert!(stripped.ends_with("let b = 2"));
        assert!(!stripped.contains("block"));
    }

    #[test]
    fn test_without_comments_ignores_slashes_in_strings() {
        let text = r#"let url = "http://example.com" // home"#;
        let source = SourceText::without_comments(text);
        let stripped = source.slice(source.full_span());
        assert!(stripped.contains("\"http://example.com\""));
        assert!(!stripped.contains("home"));
    }

    #[test]
    fn test_nested_block_comments() {
        let text = "/* outer /* inner */ still outer */let x = 1";
        let source = SourceText::without_comments(text);
        assert_eq!(source.slice(source.full_span()).trim(), "let x = 1");
    }

    #[test]
    fn test_matching_brace_skips_strings() {
        let source = SourceText::new(r#"{ let s = "}" ; { } }"#);
        assert_eq!(source.matching_brace(0), Some(source.len() - 1));
    }

    #[test]
    fn test_matching_brace_unbalanced() {
        let source = SourceText::new("{ { }");
        assert_eq!(source.matching_brace(0), None);
    }

    #[test]
    fn test_string_end_multiline() {
        let source = SourceText::new("\"\"\"\na \"quoted\" b\n\"\"\" rest");
        let end = source.string_end(0);
        assert_eq!(source.slice(Span::new(end, source.len())), " rest");
    }

    #[test]
    fn test_identifiers_skip_strings() {
        let source = SourceText::new(r#"let name = "Inner" + Inner"#);
        let names: Vec<String> = source
            .identifiers(source.full_span())
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        assert_eq!(names, vec!["let", "name", "Inner"]);
    }

    #[test]
    fn test_rebuild_removes_and_inserts() {
        let source = SourceText::new("abcdefgh");
        let rebuilt = source.rebuild(
            source.full_span(),
            &[Span::new(2, 4)],
            &[(1, "X".to_string()), (3, "dropped".to_string()), (6, "Y".to_string())],
        );
        assert_eq!(rebuilt, "aXbefYgh");
    }

    #[test]
    fn test_line_start() {
        let source = SourceText::new("a\n  public struct X {");
        let keyword = 11;
        assert_eq!(source.line_start(keyword, 0), 2);
    }
}
