// zkcurl-core/src/parser/mod.rs
//! Command-line tokenizer/extractor.
//!
//! Turns a single-line curl invocation into a [`RequestDescriptor`]. The
//! parser targets a constrained subset (one command, no pipes, redirects or
//! subshells) and recognises each field with a priority-ordered list of
//! matchers from [`patterns`] instead of a full shell grammar.
//!
//! Variables are substituted into the raw text first; extraction then runs
//! on the substituted text.
//!
//! License: MIT OR APACHE 2.0

pub mod patterns;

use log::{debug, info};

use crate::errors::CurlError;
use crate::request::{HeaderMap, RequestDescriptor, Variables, DEFAULT_METHOD};
use crate::substitution::substitute_text;

use patterns::{
    first_capture, without_header_and_data_arguments, BODY_MATCHERS, HEADER_CLAUSE, METHOD_MATCHER,
    URL_MATCHERS,
};

/// Parses `command_line` after substituting `variables` into it.
///
/// Fails with [`CurlError::NoUrlFound`] when no URL matcher recognises a
/// request URL. Unknown variables are left in place.
pub fn parse(command_line: &str, variables: &Variables) -> Result<RequestDescriptor, CurlError> {
    let processed = substitute_text(command_line, variables);
    let processed = processed.trim();

    let url = extract_url(processed).ok_or(CurlError::NoUrlFound)?;
    let descriptor = RequestDescriptor {
        url,
        method: extract_method(processed),
        headers: extract_headers(processed),
        body: extract_body(processed),
    };

    info!(
        "Parsed {} request with {} header(s){}.",
        descriptor.method,
        descriptor.headers.len(),
        if descriptor.body.is_some() { " and a body" } else { "" }
    );
    Ok(descriptor)
}

/// Extracts the request URL, trying `--url`, the URL after `-X METHOD`, then
/// the first scheme-prefixed token. Header and data arguments are never
/// searched for a URL.
pub fn extract_url(command_line: &str) -> Option<String> {
    let bare = without_header_and_data_arguments(command_line);
    let (matcher, raw) = first_capture(&URL_MATCHERS, &bare)?;
    let url = raw.trim_end_matches(['\'', '"']).trim();
    if url.is_empty() {
        return None;
    }
    debug!("URL recognised by matcher '{}'.", matcher);
    Some(url.to_string())
}

/// Extracts the HTTP method, defaulting to `GET`.
pub fn extract_method(command_line: &str) -> String {
    first_capture(&METHOD_MATCHER, command_line)
        .map(|(_, method)| method.to_string())
        .unwrap_or_else(|| DEFAULT_METHOD.to_string())
}

/// Extracts every quoted `Name: Value` header clause; a later clause with the
/// same (case-sensitive) name overwrites an earlier one.
pub fn extract_headers(command_line: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for caps in HEADER_CLAUSE.captures_iter(command_line) {
        let pair = match (caps.get(1), caps.get(2)) {
            (Some(name), Some(value)) => Some((name, value)),
            _ => caps.get(3).zip(caps.get(4)),
        };
        if let Some((name, value)) = pair {
            let name = name.as_str().trim();
            if name.is_empty() {
                continue;
            }
            if headers.insert(name.to_string(), value.as_str().trim().to_string()).is_some() {
                debug!("Header '{}' repeated; keeping the last value.", name);
            }
        }
    }
    headers
}

/// Extracts the raw body following `-d`/`--data`/`--data-raw`, verbatim.
pub fn extract_body(command_line: &str) -> Option<String> {
    first_capture(&BODY_MATCHERS, command_line).map(|(matcher, body)| {
        debug!("Body recognised by matcher '{}'.", matcher);
        body.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_vars() -> Variables {
        Variables::new()
    }

    #[test]
    fn url_from_url_flag() {
        let d = parse("curl --url 'https://api.example.com/v1' -H 'A: b'", &no_vars()).unwrap();
        assert_eq!(d.url, "https://api.example.com/v1");
    }

    #[test]
    fn url_after_method() {
        assert_eq!(
            extract_url("curl --request PUT \"http://localhost:8080/items/1\""),
            Some("http://localhost:8080/items/1".to_string())
        );
    }

    #[test]
    fn url_first_token_anywhere() {
        assert_eq!(
            extract_url("curl -s -H 'Accept: */*' https://example.org/path?q=1"),
            Some("https://example.org/path?q=1".to_string())
        );
    }

    #[test]
    fn url_inside_a_header_value_is_not_the_request_url() {
        let original = "curl -H 'Referer: https://ref.example/page' -H 'Authorization: Bearer $T' https://api.example.com/x";
        let d = parse(original, &no_vars()).unwrap();
        assert_eq!(d.url, "https://api.example.com/x");
        assert_eq!(d.headers["Referer"], "https://ref.example/page");
    }

    #[test]
    fn url_inside_data_is_not_the_request_url() {
        assert_eq!(
            extract_url("curl -d 'next=https://evil.example' https://api.example.com/login"),
            Some("https://api.example.com/login".to_string())
        );
        assert_eq!(extract_url("curl -H 'X: --url https://evil.example'"), None);
    }

    #[test]
    fn no_url_is_an_error() {
        let err = parse("curl -X POST -H 'X: 1'", &no_vars()).unwrap_err();
        assert!(matches!(err, CurlError::NoUrlFound));
    }

    #[test]
    fn method_defaults_to_get() {
        assert_eq!(extract_method("curl https://x.io"), "GET");
        assert_eq!(extract_method("curl -X DELETE https://x.io"), "DELETE");
        assert_eq!(extract_method("curl --request 'PATCH' https://x.io"), "PATCH");
    }

    #[test]
    fn headers_in_both_quote_styles() {
        let h = extract_headers(r#"curl https://x.io -H 'A: one' --header "B:two"  -H ' C : three '"#);
        assert_eq!(h.len(), 3);
        assert_eq!(h["A"], "one");
        assert_eq!(h["B"], "two");
        assert_eq!(h["C"], "three");
    }

    #[test]
    fn repeated_header_last_write_wins() {
        let h = extract_headers("curl https://x.io -H 'A: one' -H 'A: two' -H 'a: three'");
        assert_eq!(h["A"], "two");
        assert_eq!(h["a"], "three");
    }

    #[test]
    fn body_priority_single_then_double_then_bare() {
        assert_eq!(
            extract_body(r#"curl https://x.io -d '{"a":1}'"#),
            Some(r#"{"a":1}"#.to_string())
        );
        assert_eq!(
            extract_body(r#"curl https://x.io --data "name=x y""#),
            Some("name=x y".to_string())
        );
        assert_eq!(
            extract_body("curl https://x.io --data-raw a=1&b=2"),
            Some("a=1&b=2".to_string())
        );
        assert_eq!(extract_body("curl https://x.io"), None);
    }

    #[test]
    fn multiline_quoted_body_is_kept_verbatim() {
        let body = extract_body("curl https://x.io -d '{\n  \"a\": 1\n}'").unwrap();
        assert_eq!(body, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn variables_are_substituted_before_extraction() {
        let mut vars = Variables::new();
        vars.insert("HOST".to_string(), "https://api.example.com".to_string());
        vars.insert("TOKEN".to_string(), "abc123".to_string());
        let d = parse("curl ${HOST}/me -H 'Authorization: Bearer $TOKEN'", &vars).unwrap();
        assert_eq!(d.url, "https://api.example.com/me");
        assert_eq!(d.headers["Authorization"], "Bearer abc123");
    }
}
