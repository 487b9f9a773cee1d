// zkcurl-core/src/substitution.rs
//! Variable substitution for raw command-line text and for structured values.
//!
//! Both entry points share the same replacement rule: `$NAME` (ending at a
//! word boundary) and `${NAME}` are replaced by the mapped value, literally.
//! Names with no value are left in place so partially configured requests
//! still round-trip.
//!
//! Substitution is purely textual and knows nothing about shell quoting: a
//! value containing quote characters can change how the substituted command
//! line is parsed afterwards. Values are expected to be free of unescaped
//! quotes.
//!
//! License: MIT OR Apache-2.0

use regex::{NoExpand, Regex};
use serde_json::Value;

use crate::redaction::log_substitution_debug;
use crate::request::Variables;

/// Builds the matcher for one variable name.
///
/// The name is escaped, so arbitrary map keys never act as regex syntax.
fn reference_matcher(name: &str) -> Option<Regex> {
    if name.is_empty() {
        return None;
    }
    let escaped = regex::escape(name);
    match Regex::new(&format!(r"\${escaped}\b|\$\{{{escaped}\}}")) {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("Skipping variable '{}': cannot build matcher: {}", name, e);
            None
        }
    }
}

/// Replaces every `$NAME`/`${NAME}` occurrence in `text` with its value.
pub fn substitute_text(text: &str, variables: &Variables) -> String {
    let mut result = text.to_string();
    for (name, value) in variables {
        let Some(matcher) = reference_matcher(name) else {
            continue;
        };
        if matcher.is_match(&result) {
            log_substitution_debug(module_path!(), name, value);
            result = matcher.replace_all(&result, NoExpand(value)).into_owned();
        }
    }
    result
}

/// Walks `value` recursively and substitutes variables into every string leaf.
///
/// Objects and arrays keep their shape; numbers, booleans and null pass
/// through untouched. There is no depth limit.
pub fn substitute(value: &Value, variables: &Variables) -> Value {
    match value {
        Value::String(s) => Value::String(substitute_text(s, variables)),
        Value::Array(items) => Value::Array(items.iter().map(|v| substitute(v, variables)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute(v, variables)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(pairs: &[(&str, &str)]) -> Variables {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn replaces_both_spellings() {
        let v = vars(&[("TOKEN", "abc")]);
        assert_eq!(substitute_text("a $TOKEN b ${TOKEN}", &v), "a abc b abc");
    }

    #[test]
    fn respects_word_boundary() {
        let v = vars(&[("TOKEN", "abc")]);
        assert_eq!(substitute_text("$TOKEN_2 $TOKENX $TOKEN.", &v), "$TOKEN_2 $TOKENX abc.");
    }

    #[test]
    fn missing_variables_stay_literal() {
        let v = vars(&[("A", "1")]);
        assert_eq!(substitute_text("$A $B ${C}", &v), "1 $B ${C}");
    }

    #[test]
    fn values_are_inserted_literally() {
        let v = vars(&[("X", "$1 and ${0}")]);
        assert_eq!(substitute_text("[$X]", &v), "[$1 and ${0}]");
    }

    #[test]
    fn nested_substitution_preserves_structure() {
        let v = vars(&[("X", "v")]);
        let input = json!({"headers": {"A": "$X"}, "list": ["$X", 2]});
        assert_eq!(
            substitute(&input, &v),
            json!({"headers": {"A": "v"}, "list": ["v", 2]})
        );
    }

    #[test]
    fn scalars_pass_through() {
        let v = vars(&[("X", "v")]);
        let input = json!([null, true, 1.5, {"deep": [[["$X"]]]}]);
        assert_eq!(substitute(&input, &v), json!([null, true, 1.5, {"deep": [[["v"]]]}]));
    }

    #[test]
    fn names_with_metacharacters_are_escaped() {
        let v = vars(&[("A.B", "dot")]);
        assert_eq!(substitute_text("$A.B $AxB", &v), "dot $AxB");
    }
}
