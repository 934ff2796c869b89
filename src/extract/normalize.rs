//! Coercion of loosely-typed model output into drafts.

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::ActionItemDraft;

use super::dates;

/// Coerce one model-produced record into a canonical draft.
///
/// - `task` is stringified when it isn't already text
/// - null or empty `owner` / `due_date` (or `dueDate`) become absent
/// - due dates pass through the date normalizer
/// - `tags` keeps only truthy entries, as text; anything but an array is empty
pub fn normalize_item(item: &Value, today: NaiveDate) -> ActionItemDraft {
    let task = item.get("task").map(to_text).unwrap_or_default();

    let owner = item.get("owner").filter(|v| !is_falsy_text(v)).map(to_text);

    let due_date = ["due_date", "dueDate"]
        .iter()
        .filter_map(|key| item.get(*key))
        .find(|v| !is_falsy_text(v))
        .map(|v| dates::normalize(&to_text(v), today));

    let tags = match item.get("tags") {
        Some(Value::Array(values)) => values
            .iter()
            .filter(|v| !is_falsy(v))
            .map(to_text)
            .collect(),
        _ => Vec::new(),
    };

    ActionItemDraft::new(task)
        .with_owner(owner)
        .with_due_date(due_date)
        .with_tags(tags)
}

/// Text form of a JSON value; strings are taken verbatim, null is empty
fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Null or an empty/blank string
fn is_falsy_text(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    #[test]
    fn test_loose_record_is_coerced() {
        let item = json!({"task": 5, "owner": "", "due_date": null, "tags": ["a", "", null, "b"]});
        let draft = normalize_item(&item, today());

        assert_eq!(draft.task, "5");
        assert_eq!(draft.owner, None);
        assert_eq!(draft.due_date, None);
        assert_eq!(draft.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_due_date_goes_through_normalizer() {
        let item = json!({"task": "ship", "owner": "Robert", "due_date": "tomorrow", "tags": "x"});
        let draft = normalize_item(&item, today());

        assert_eq!(draft.owner.as_deref(), Some("Robert"));
        assert_eq!(draft.due_date.as_deref(), Some("2025-03-04"));
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn test_camel_case_due_date_and_iso_passthrough() {
        let item = json!({"task": "ship", "dueDate": "2025-04-01"});
        let draft = normalize_item(&item, today());
        assert_eq!(draft.due_date.as_deref(), Some("2025-04-01"));

        let item = json!({"task": "ship", "dueDate": "end of quarter"});
        assert_eq!(
            normalize_item(&item, today()).due_date.as_deref(),
            Some("end of quarter")
        );
    }

    #[test]
    fn test_missing_task_is_empty() {
        let draft = normalize_item(&json!({"owner": "Mike"}), today());
        assert_eq!(draft.task, "");
    }

    #[test]
    fn test_non_string_tags_are_stringified() {
        let draft = normalize_item(&json!({"task": "ship", "tags": [1, 0, true, false]}), today());
        assert_eq!(draft.tags, vec!["1", "true"]);
    }
}
