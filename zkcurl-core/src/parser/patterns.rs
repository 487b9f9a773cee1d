//! patterns.rs - Priority-ordered matchers for the supported curl subset.
//!
//! Each request field is recognised by an ordered list of regular
//! expressions. Lists are tried front to back and the first matcher that
//! captures wins. The built-in lists are compiled once and shared.
//!
//! Flags are only recognised at the start of a token, i.e. at the beginning
//! of the input or right after whitespace.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Upper bound for the compiled size of a single matcher.
const MATCHER_SIZE_LIMIT: usize = 1 << 20;

/// Alternation for the body-carrying flags, longest spelling first.
const DATA_FLAGS: &str = r"(?:--data-raw|--data|-d)";

/// Alternation for the header flags.
const HEADER_FLAGS: &str = r"(?:-H|--header)";

/// Alternation for the method flags.
const METHOD_FLAGS: &str = r"(?:-X|--request)";

/// A compiled matcher whose first capture group is the extracted value.
#[derive(Debug)]
pub struct Matcher {
    /// Short label used in debug logs.
    pub name: &'static str,
    pub regex: Regex,
}

impl Matcher {
    /// Returns the first capture group of the leftmost match, if any.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

}

/// Compiles an ordered list of `(name, pattern)` pairs.
pub fn compile_matchers(specs: &[(&'static str, String)]) -> Result<Vec<Matcher>, regex::Error> {
    let mut matchers = Vec::with_capacity(specs.len());
    for (name, pattern) in specs {
        let regex = RegexBuilder::new(pattern)
            .size_limit(MATCHER_SIZE_LIMIT)
            .build()?;
        debug!("Matcher '{}' compiled successfully.", name);
        matchers.push(Matcher { name: *name, regex });
    }
    Ok(matchers)
}

fn compile_builtin(specs: &[(&'static str, String)]) -> Vec<Matcher> {
    compile_matchers(specs).expect("built-in matcher patterns are valid")
}

/// URL recognisers: `--url`, then a URL right after the method flag, then
/// the first scheme-prefixed token after the command name.
pub static URL_MATCHERS: Lazy<Vec<Matcher>> = Lazy::new(|| {
    compile_builtin(&[
        ("url_flag", r#"(?:^|\s)--url\s+['"]?(https?://[^\s'"]+)"#.to_string()),
        (
            "url_after_method",
            format!(r#"(?:^|\s){METHOD_FLAGS}\s+['"]?\w+['"]?\s+['"]?(https?://[^\s'"]+)"#),
        ),
        ("url_first_token", r#"\s['"]?(https?://[^\s'"\\]+)"#.to_string()),
    ])
});

pub static METHOD_MATCHER: Lazy<Vec<Matcher>> = Lazy::new(|| {
    compile_builtin(&[(
        "method_flag",
        format!(r#"(?:^|\s){METHOD_FLAGS}\s+['"]?([A-Z]+)"#),
    )])
});

/// Header clauses in either quote style. Groups 1/2 hold a single-quoted
/// name/value pair, groups 3/4 a double-quoted one.
pub static HEADER_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"(?:^|\s){HEADER_FLAGS}\s+(?:'([^':]+):\s*([^']+)'|"([^":]+):\s*([^"]+)")"#
    ))
    .expect("header clause pattern is valid")
});

/// Body recognisers: single-quoted, double-quoted, then a bare token.
pub static BODY_MATCHERS: Lazy<Vec<Matcher>> = Lazy::new(|| {
    compile_builtin(&[
        ("data_single_quoted", format!(r#"(?s)(?:^|\s){DATA_FLAGS}\s+'([^']+)'"#)),
        ("data_double_quoted", format!(r#"(?s)(?:^|\s){DATA_FLAGS}\s+"([^"]+)""#)),
        ("data_bare", format!(r#"(?:^|\s){DATA_FLAGS}\s+(\S+)"#)),
    ])
});

/// Blanks every recognised header and data argument, leaving the bare
/// arguments in place. Quoted values can contain URLs or flag-like text that
/// must not be mistaken for the request URL.
pub fn without_header_and_data_arguments(text: &str) -> String {
    let mut remaining = HEADER_CLAUSE.replace_all(text, " ").into_owned();
    for matcher in BODY_MATCHERS.iter() {
        remaining = matcher.regex.replace_all(&remaining, " ").into_owned();
    }
    remaining
}

/// Runs `matchers` in order and returns the first capture together with the
/// name of the matcher that produced it.
pub fn first_capture<'t>(matchers: &[Matcher], text: &'t str) -> Option<(&'static str, &'t str)> {
    matchers
        .iter()
        .find_map(|m| m.capture(text).map(|c| (m.name, c)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_matchers_compile() {
        assert_eq!(URL_MATCHERS.len(), 3);
        assert_eq!(METHOD_MATCHER.len(), 1);
        assert_eq!(BODY_MATCHERS.len(), 3);
        assert!(HEADER_CLAUSE.is_match("curl -H 'A: b'"));
    }

    #[test]
    fn first_capture_respects_priority() {
        let text = "curl https://first.example --url https://second.example";
        let (name, url) = first_capture(&URL_MATCHERS, text).unwrap();
        assert_eq!(name, "url_flag");
        assert_eq!(url, "https://second.example");
    }

    #[test]
    fn flags_must_start_a_token() {
        assert!(first_capture(&BODY_MATCHERS, "curl https://x.io/a-d b").is_none());
    }

    #[test]
    fn header_and_data_arguments_are_blanked() {
        let text = "curl -H 'Referer: https://ref.example/a' -d \"u=https://b.example\" https://api.example.com";
        let remaining = without_header_and_data_arguments(text);
        assert!(!remaining.contains("ref.example"));
        assert!(!remaining.contains("b.example"));
        assert!(remaining.contains("https://api.example.com"));
    }
}
