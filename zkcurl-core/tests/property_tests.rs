// zkcurl-core/tests/property_tests.rs
use proptest::prelude::*;
use serde_json::json;
use std::collections::BTreeSet;

use zkcurl_core::{classify, parse, substitute, substitute_text, Variables};

// ── Substitution is idempotent once every reference is resolved ──────────

proptest! {
    #[test]
    fn substitution_idempotent(
        name in "[A-Z_][A-Z0-9_]{0,8}",
        value in "[a-zA-Z0-9 ._-]{0,16}",
        prefix in "[a-z ]{0,8}",
    ) {
        let vars: Variables = [(name.clone(), value)].into();
        let text = format!("{prefix}${name} and ${{{name}}}");
        let once = substitute_text(&text, &vars);
        let twice = substitute_text(&once, &vars);
        prop_assert_eq!(&once, &twice);

        let doc = json!({"h": {"k": text.clone()}, "l": [text, 1, null]});
        let once = substitute(&doc, &vars);
        let twice = substitute(&once, &vars);
        prop_assert_eq!(twice, once);
    }
}

// ── Classification is total and disjoint ─────────────────────────────────

proptest! {
    #[test]
    fn classification_total_and_disjoint(
        headers in proptest::collection::btree_map("[A-Z][a-z]{1,6}(-[A-Z][a-z]{1,6})?", (any::<bool>(), "[a-z0-9]{1,8}"), 0..6),
        body_private in proptest::option::of(any::<bool>()),
    ) {
        let mut command = String::from("curl https://api.example.com/x");
        for (name, (private, value)) in &headers {
            if *private {
                command.push_str(&format!(" -H '{name}: $SECRET_{value}'"));
            } else {
                command.push_str(&format!(" -H '{name}: {value}'"));
            }
        }
        match body_private {
            Some(true) => command.push_str(" -d '{\"k\":\"$BODY\"}'"),
            Some(false) => command.push_str(" -d '{\"k\":1}'"),
            None => {}
        }

        let descriptor = parse(&command, &Variables::new()).unwrap();
        let partition = classify(&descriptor, &command);

        let public: BTreeSet<String> = partition.public.header_names().into_iter().collect();
        let private: BTreeSet<String> = partition.private.header_names().into_iter().collect();
        let all: BTreeSet<String> = descriptor.headers.keys().cloned().collect();

        prop_assert!(public.is_disjoint(&private));
        prop_assert_eq!(public.union(&private).cloned().collect::<BTreeSet<_>>(), all);
        for (name, (is_private, _)) in &headers {
            prop_assert_eq!(private.contains(name), *is_private);
        }

        prop_assert_eq!(partition.public.headers.is_some(), !public.is_empty());
        prop_assert_eq!(partition.private.headers.is_some(), !private.is_empty());

        match body_private {
            Some(true) => prop_assert!(partition.private.body.is_some() && partition.public.body.is_none()),
            Some(false) => prop_assert!(partition.public.body.is_some() && partition.private.body.is_none()),
            None => prop_assert!(partition.public.body.is_none() && partition.private.body.is_none()),
        }
    }
}
