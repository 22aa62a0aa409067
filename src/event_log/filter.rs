//! Search-as-you-type name filter.
//!
//! The operator's text is matched case-insensitively against the event name
//! anywhere in the string, as if wrapped in `*...*`. `*` matches any run of
//! characters, `?` a single character and `[...]` a character class
//! (`[!...]` or `[^...]` negated, `a-z` ranges). A pattern that does not
//! compile, such as an unclosed `[`, is matched as a literal substring.

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

/// Compiled form of the filter text
#[derive(Clone, Debug, Default)]
pub enum NameFilter {
    /// Empty filter, everything matches
    #[default]
    All,
    /// Escaped filter text
    Literal(Regex),
    /// Wildcards translated to a regex
    Wildcard(Regex),
}

impl NameFilter {
    /// Compile filter text. Never fails.
    pub fn new(text: &str) -> Self {
        if text.is_empty() {
            return NameFilter::All;
        }

        if text.contains(['*', '?', '[']) {
            match build(&wildcard_to_regex(text)) {
                Ok(regex) => return NameFilter::Wildcard(regex),
                Err(e) => debug!(filter = text, error = %e, "Malformed wildcard, matching literally"),
            }
        }

        match build(&regex::escape(text)) {
            Ok(regex) => NameFilter::Literal(regex),
            Err(e) => {
                warn!(filter = text, error = %e, "Filter too large, showing every event");
                NameFilter::All
            }
        }
    }

    /// Check an event name against the filter
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameFilter::All => true,
            NameFilter::Literal(regex) | NameFilter::Wildcard(regex) => regex.is_match(name),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, NameFilter::Literal(_))
    }
}

fn build(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Translate wildcard syntax to an unanchored regex. Classes pass through
/// with `!` negation rewritten; everything else is escaped.
fn wildcard_to_regex(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() * 2);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            '[' => {
                pattern.push('[');
                if chars.next_if(|&n| n == '!' || n == '^').is_some() {
                    pattern.push('^');
                }
                // A leading ']' is a member, not the end of the class
                if chars.next_if_eq(&']').is_some() {
                    pattern.push_str("\\]");
                }
                for member in chars.by_ref() {
                    match member {
                        ']' => {
                            pattern.push(']');
                            break;
                        }
                        '\\' | '[' | '&' | '~' => {
                            pattern.push('\\');
                            pattern.push(member);
                        }
                        other => pattern.push(other),
                    }
                }
            }
            other => pattern.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    pattern
}
