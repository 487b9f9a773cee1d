//! Tabular rendering of a public/private split.
//!
//! Private rows only ever receive already-masked values.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde_json::Value;

use zkcurl_core::{MaskedBody, MaskedParams, ParamSet};

const PUBLIC: &str = "public";
const PRIVATE: &str = "private";

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn visibility_cell(label: &'static str, supports_color: bool) -> Cell {
    let cell = Cell::new(label);
    match (supports_color, label) {
        (false, _) => cell,
        (true, PRIVATE) => cell.fg(Color::Red),
        (true, _) => cell.fg(Color::Green),
    }
}

/// Builds one row per header and per top-level body field.
pub fn build_partition_table(public: &ParamSet, private: &MaskedParams, supports_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Name", "Value", "Visibility"]);

    if let Some(headers) = &public.headers {
        for (name, value) in headers {
            table.add_row(vec![
                Cell::new("header"),
                Cell::new(name),
                Cell::new(value),
                visibility_cell(PUBLIC, supports_color),
            ]);
        }
    }
    if let Some(headers) = &private.headers {
        for (name, mask) in headers {
            table.add_row(vec![
                Cell::new("header"),
                Cell::new(name),
                Cell::new(mask),
                visibility_cell(PRIVATE, supports_color),
            ]);
        }
    }

    match &public.body {
        Some(Value::Object(fields)) => {
            for (key, value) in fields {
                table.add_row(vec![
                    Cell::new("body"),
                    Cell::new(key),
                    Cell::new(value_text(value)),
                    visibility_cell(PUBLIC, supports_color),
                ]);
            }
        }
        Some(other) => {
            table.add_row(vec![
                Cell::new("body"),
                Cell::new("-"),
                Cell::new(value_text(other)),
                visibility_cell(PUBLIC, supports_color),
            ]);
        }
        None => {}
    }
    match &private.body {
        Some(MaskedBody::Fields(fields)) => {
            for (key, mask) in fields {
                table.add_row(vec![
                    Cell::new("body"),
                    Cell::new(key),
                    Cell::new(mask),
                    visibility_cell(PRIVATE, supports_color),
                ]);
            }
        }
        Some(MaskedBody::Opaque(mask)) => {
            table.add_row(vec![
                Cell::new("body"),
                Cell::new("-"),
                Cell::new(mask),
                visibility_cell(PRIVATE, supports_color),
            ]);
        }
        None => {}
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use zkcurl_core::{mask_private, HeaderMap, MASK};

    #[test]
    fn private_values_never_reach_the_table() {
        let public = ParamSet {
            headers: Some(HeaderMap::from([("Accept".to_string(), "application/json".to_string())])),
            body: Some(json!({"page": 2})),
        };
        let private = ParamSet {
            headers: Some(HeaderMap::from([("Authorization".to_string(), "Bearer topsecret".to_string())])),
            body: None,
        };
        let table = build_partition_table(&public, &mask_private(&private), false).to_string();

        assert!(table.contains("Accept"));
        assert!(table.contains("application/json"));
        assert!(table.contains("page"));
        assert!(table.contains("Authorization"));
        assert!(table.contains(MASK));
        assert!(!table.contains("topsecret"));
    }
}
