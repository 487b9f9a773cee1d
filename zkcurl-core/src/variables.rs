// zkcurl-core/src/variables.rs
//! Variable name scanning for command-line requests.
//!
//! Only the upper-case convention is recognised: `$NAME` or `${NAME}` where
//! `NAME` matches `[A-Z_][A-Z0-9_]*`. Lower-case references and a bare `$`
//! are treated as literal text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Identifier grammar for variable names.
pub const VARIABLE_NAME_PATTERN: &str = r"[A-Z_][A-Z0-9_]*";

static VARIABLE_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\$(?:\{{({name})\}}|({name}))",
        name = VARIABLE_NAME_PATTERN
    ))
    .expect("variable reference pattern is valid")
});

static VARIABLE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{}$", VARIABLE_NAME_PATTERN)).expect("variable name pattern is valid")
});

/// Returns the variable names referenced in `command_line`, in order of first
/// occurrence and without duplicates.
pub fn scan(command_line: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for caps in VARIABLE_REFERENCE.captures_iter(command_line) {
        let Some(name) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        if seen.insert(name.as_str()) {
            names.push(name.as_str().to_string());
        }
    }

    log::debug!("Scanned {} distinct variable reference(s).", names.len());
    names
}

/// True when `name` follows the variable identifier grammar.
pub fn is_valid_variable_name(name: &str) -> bool {
    VARIABLE_NAME.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_keeps_first_occurrence_order() {
        assert_eq!(
            scan("curl $URL -H 'X: $A' -d '$B'"),
            vec!["URL", "A", "B"]
        );
    }

    #[test]
    fn scan_removes_duplicates_across_spellings() {
        assert_eq!(scan("curl $HOST/${TOKEN}?t=$TOKEN&h=${HOST}"), vec!["HOST", "TOKEN"]);
    }

    #[test]
    fn scan_ignores_lowercase_and_bare_dollars() {
        assert!(scan("curl https://x.com -d 'cost: $ 5, $lower, ${lower}'").is_empty());
    }

    #[test]
    fn scan_accepts_leading_underscore_and_digits() {
        assert_eq!(scan("echo $_PRIVATE_2 $9X"), vec!["_PRIVATE_2"]);
    }

    #[test]
    fn unclosed_brace_is_not_a_reference() {
        assert!(scan("curl ${NAME").is_empty());
    }

    #[test]
    fn validates_names() {
        assert!(is_valid_variable_name("API_KEY"));
        assert!(is_valid_variable_name("_X1"));
        assert!(!is_valid_variable_name("api_key"));
        assert!(!is_valid_variable_name("1ABC"));
        assert!(!is_valid_variable_name(""));
    }
}
