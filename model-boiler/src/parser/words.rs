//! Case-delimited word splitting for identifiers.
//!
//! At each position the splitter tries, in order:
//!
//! 1. a maximal run of lowercase letters,
//! 2. one uppercase letter followed by a maximal run of lowercase letters,
//! 3. a maximal run of uppercase letters. When the run is longer than one
//!    letter and is followed by a lowercase letter, its last letter is left
//!    to start the next word, so `URLPath` splits into `URL` and `Path`.
//!
//! Digits extend whatever word precedes them. Any other character (`_`,
//! backticks, ...) ends the current word and is consumed on its own. A word
//! is never revisited once emitted.

/// Split an identifier into its case-delimited words.
///
/// ```
/// use model_boiler::parser::words::split_words;
///
/// assert_eq!(split_words("userName"), vec!["user", "Name"]);
/// assert_eq!(split_words("URLPath"), vec!["URL", "Path"]);
/// assert_eq!(split_words("foo_bar"), vec!["foo", "bar"]);
/// ```
pub fn split_words(identifier: &str) -> Vec<String> {
    let chars: Vec<char> = identifier.chars().collect();
    let mut words = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let end = next_word_end(&chars, i);
        if end == i {
            // Separator or other non-word character.
            i += 1;
            continue;
        }
        let end = digits_end(&chars, end);
        words.push(chars[i..end].iter().collect());
        i = end;
    }

    words
}

/// End of the word starting at `start`, or `start` when no rule matches.
fn next_word_end(chars: &[char], start: usize) -> usize {
    let lower_end = run_end(chars, start, char::is_lowercase);
    if lower_end > start {
        return lower_end;
    }

    if chars[start].is_uppercase() {
        let lower_end = run_end(chars, start + 1, char::is_lowercase);
        if lower_end > start + 1 {
            return lower_end;
        }

        let upper_end = run_end(chars, start, char::is_uppercase);
        let followed_by_lower = chars.get(upper_end).is_some_and(|c| c.is_lowercase());
        if upper_end - start > 1 && followed_by_lower {
            return upper_end - 1;
        }
        return upper_end;
    }

    // A leading digit run forms its own word.
    run_end(chars, start, |c| c.is_ascii_digit())
}

fn digits_end(chars: &[char], start: usize) -> usize {
    run_end(chars, start, |c| c.is_ascii_digit())
}

fn run_end(chars: &[char], start: usize, predicate: impl Fn(char) -> bool) -> usize {
    let mut end = start;
    while end < chars.len() && predicate(chars[end]) {
        end += 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(split_words("userName"), vec!["user", "Name"]);
        assert_eq!(split_words("firstNameAndAge"), vec!["first", "Name", "And", "Age"]);
    }

    #[test]
    fn test_single_word() {
        assert_eq!(split_words("id"), vec!["id"]);
        assert_eq!(split_words("Id"), vec!["Id"]);
    }

    #[test]
    fn test_acronyms() {
        assert_eq!(split_words("URLPath"), vec!["URL", "Path"]);
        assert_eq!(split_words("userID"), vec!["user", "ID"]);
        assert_eq!(split_words("ID"), vec!["ID"]);
        assert_eq!(split_words("parseHTTPResponse"), vec!["parse", "HTTP", "Response"]);
    }

    #[test]
    fn test_digits_extend_words() {
        assert_eq!(split_words("address2"), vec!["address2"]);
        assert_eq!(split_words("userID2"), vec!["user", "ID2"]);
        assert_eq!(split_words("v2Name"), vec!["v2", "Name"]);
        assert_eq!(split_words("URL2Path"), vec!["URL2", "Path"]);
    }

    #[test]
    fn test_separators_are_consumed() {
        assert_eq!(split_words("foo_bar"), vec!["foo", "bar"]);
        assert_eq!(split_words("_private"), vec!["private"]);
        assert_eq!(split_words("`default`"), vec!["default"]);
    }

    #[test]
    fn test_every_letter_is_kept_in_order() {
        let identifier = "someHTMLValue_withXMLData42";
        let joined: String = split_words(identifier).concat();
        let letters: String = identifier.chars().filter(|c| c.is_alphanumeric()).collect();
        assert_eq!(joined, letters);
    }
}
