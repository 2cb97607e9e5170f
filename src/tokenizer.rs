//! Quote-aware splitting of a single CSV line.
//!
//! The scanner is a single forward pass over the characters of a line:
//!
//! - `\"` is an escaped quote and appends a literal `"`
//! - `""` inside a quoted section appends a literal `"`
//! - any other `"` toggles the quoted state
//! - `,` outside quotes terminates the current field
//!
//! The quoted state is never reset within a line. A line with an odd number of
//! toggling quotes therefore treats every later comma as field content; callers
//! can detect this through [`Fields::finish`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::iter::Peekable;
use std::str::Chars;

static WRAPPING_QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?s)^"(.*)"$"#).unwrap());

/// Iterator over the raw fields of one line, in order.
pub struct Fields<'a> {
    chars: Peekable<Chars<'a>>,
    in_quotes: bool,
    done: bool,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            chars: line.chars().peekable(),
            in_quotes: false,
            done: false,
        }
    }

    /// Whether the scanner is currently inside a quoted section.
    ///
    /// After the last field has been yielded this reports an unbalanced line.
    pub fn in_quotes(&self) -> bool {
        self.in_quotes
    }

    /// Consumes the remaining fields; `true` when every toggling quote was matched.
    pub fn finish(mut self) -> bool {
        self.by_ref().for_each(drop);
        !self.in_quotes
    }
}

impl Iterator for Fields<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let mut field = String::new();
        while let Some(c) = self.chars.next() {
            match c {
                '\\' if self.chars.peek() == Some(&'"') => {
                    self.chars.next();
                    field.push('"');
                }
                '"' => {
                    if self.in_quotes && self.chars.peek() == Some(&'"') {
                        self.chars.next();
                        field.push('"');
                    } else {
                        self.in_quotes = !self.in_quotes;
                    }
                }
                ',' if !self.in_quotes => return Some(field),
                _ => field.push(c),
            }
        }

        self.done = true;
        Some(field)
    }
}

/// Splits `line` into raw field values.
///
/// An empty line yields a single empty field.
pub fn fields(line: &str) -> Fields<'_> {
    Fields::new(line)
}

/// Strips one pair of wrapping quotes and drops empty values.
pub fn clean_value(raw: &str) -> Option<String> {
    let value = match WRAPPING_QUOTES.captures(raw) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => raw,
    };
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Returns the cleaned value of the field at `index`, or `None` when the line
/// has fewer fields or the value is empty.
pub fn field(line: &str, index: usize) -> Option<String> {
    fields(line).nth(index).and_then(|raw| clean_value(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<String> {
        fields(line).collect()
    }

    #[test]
    fn splits_plain_fields() {
        assert_eq!(split("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_line_is_one_empty_field() {
        assert_eq!(split(""), vec![""]);
    }

    #[test]
    fn trailing_comma_yields_empty_field() {
        assert_eq!(split("a,"), vec!["a", ""]);
    }

    #[test]
    fn quoted_comma_stays_in_field() {
        assert_eq!(split(r#"1,"a,b",c"#), vec!["1", "a,b", "c"]);
    }

    #[test]
    fn doubled_quote_inside_quotes_is_literal() {
        assert_eq!(split(r#""say ""hi""",x"#), vec![r#"say "hi""#, "x"]);
    }

    #[test]
    fn backslash_quote_is_literal() {
        assert_eq!(split(r#"1,ab\"cd"#), vec!["1", r#"ab"cd"#]);
    }

    #[test]
    fn backslash_without_quote_is_kept() {
        assert_eq!(split(r"a\b,c"), vec![r"a\b", "c"]);
    }

    #[test]
    fn unbalanced_quote_swallows_rest_of_line() {
        let mut scan = fields(r#"1,"0xABC,2,3"#);
        assert_eq!(scan.next().as_deref(), Some("1"));
        assert_eq!(scan.next().as_deref(), Some("0xABC,2,3"));
        assert_eq!(scan.next(), None);
        assert!(scan.in_quotes());
    }

    #[test]
    fn field_by_index() {
        assert_eq!(field(r#"1,"0xABC""#, 1).as_deref(), Some("0xABC"));
        assert_eq!(field("2,0xDEF", 1).as_deref(), Some("0xDEF"));
        assert_eq!(field("2,0xDEF", 0).as_deref(), Some("2"));
    }

    #[test]
    fn missing_field_is_none() {
        assert_eq!(field("only", 1), None);
    }

    #[test]
    fn empty_field_is_dropped() {
        assert_eq!(field("1,,3", 1), None);
        assert_eq!(field(r#"1,"",3"#, 1), None);
    }

    #[test]
    fn triple_quoted_value_loses_wrapping_quotes() {
        // """x""" scans to "x", which is then unwrapped once
        assert_eq!(field(r#"1,"""0xABC""""#, 1).as_deref(), Some("0xABC"));
    }

    #[test]
    fn clean_value_strips_only_one_pair() {
        assert_eq!(clean_value(r#"""x"""#).as_deref(), Some(r#""x""#));
        assert_eq!(clean_value(r#""x"#).as_deref(), Some(r#""x"#));
        assert_eq!(clean_value(r#"""#).as_deref(), Some(r#"""#));
        assert_eq!(clean_value(r#""""#), None);
    }

    #[test]
    fn escaped_quote_survives_extraction() {
        assert_eq!(field(r#"1,0x\"AB"#, 1).as_deref(), Some(r#"0x"AB"#));
    }

    #[test]
    fn finish_reports_balance() {
        assert!(fields(r#"1,"a,b",c"#).finish());
        assert!(fields(r#"1,ab\"c"#).finish());
        assert!(!fields(r#"1,"abc"#).finish());

        let mut scan = fields(r#""x",y,"z"#);
        assert_eq!(scan.next().as_deref(), Some("x"));
        assert!(!scan.finish());
    }
}
