//! Partitioning documents into buckets by a field value

use std::collections::BTreeMap;

use serde_json::Value;

use super::comparator::render_text;

/// Bucket name shared by documents whose group field is absent or null.
pub const NULL_GROUP_KEY: &str = "null";

/// Group key to documents, keys in lexical order.
pub type GroupedRecords = BTreeMap<String, Vec<Value>>;

/// Group key of one document.
pub fn group_key(document: &Value, field: &str) -> String {
    match document.get(field) {
        None | Some(Value::Null) => NULL_GROUP_KEY.to_string(),
        Some(value) => render_text(value),
    }
}

/// Partitions `documents` by the rendering of `field`.
///
/// Within a bucket, documents keep the order they were supplied in.
pub fn group_by(documents: impl IntoIterator<Item = Value>, field: &str) -> GroupedRecords {
    let mut groups = GroupedRecords::new();
    for document in documents {
        groups
            .entry(group_key(&document, field))
            .or_default()
            .push(document);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_preserves_supplied_order() {
        let docs = vec![
            json!({"name": "Bob", "city": "LA"}),
            json!({"name": "John", "city": "NYC"}),
            json!({"name": "Jane", "city": "NYC"}),
        ];

        let groups = group_by(docs, "city");

        assert_eq!(groups.len(), 2);
        assert_eq!(groups["LA"], vec![json!({"name": "Bob", "city": "LA"})]);
        let nyc: Vec<&str> = groups["NYC"]
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect();
        assert_eq!(nyc, vec!["John", "Jane"]);
    }

    #[test]
    fn test_missing_and_null_share_bucket() {
        let docs = vec![
            json!({"name": "a"}),
            json!({"name": "b", "city": null}),
            json!({"name": "c", "city": "LA"}),
        ];

        let groups = group_by(docs, "city");
        assert_eq!(groups[NULL_GROUP_KEY].len(), 2);
        assert_eq!(groups["LA"].len(), 1);
    }

    #[test]
    fn test_keys_use_textual_rendering() {
        let docs = vec![
            json!({"age": 30}),
            json!({"age": "30"}),
            json!({"age": true}),
            json!({"age": [1, 2]}),
        ];

        let groups = group_by(docs, "age");
        assert_eq!(groups["30"].len(), 2);
        assert_eq!(groups["true"].len(), 1);
        assert_eq!(groups["[1,2]"].len(), 1);
    }

    #[test]
    fn test_empty_input_yields_no_buckets() {
        assert!(group_by(Vec::new(), "city").is_empty());
    }

    #[test]
    fn test_non_object_documents_land_in_null_bucket() {
        let groups = group_by(vec![json!(5), json!("text")], "city");
        assert_eq!(groups[NULL_GROUP_KEY].len(), 2);
    }
}
