//! Label changes applied by PATCH requests
//!
//! `add` merges values into a label, creating it when missing. `remove`
//! drops the given values, or the whole label when no values are given;
//! a label left without values disappears.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use crate::query::canonical_json;

/// Label change operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelOperation {
    Add,
    Remove,
}

/// One change to an object's labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelChange {
    pub op: LabelOperation,
    pub key: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl LabelChange {
    pub fn add<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            op: LabelOperation::Add,
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remove<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            op: LabelOperation::Remove,
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Apply `changes` in order. Nothing is modified when any change is invalid.
pub fn apply_label_changes(
    labels: &BTreeMap<String, Vec<String>>,
    changes: &[LabelChange],
) -> StoreResult<BTreeMap<String, Vec<String>>> {
    let mut updated = labels.clone();

    for change in changes {
        if change.key.is_empty() {
            return Err(StoreError::InvalidObject("label key must not be empty".to_string()));
        }
        let values: Vec<String> = change.values.iter().map(|v| canonical_json(v)).collect();

        match change.op {
            LabelOperation::Add => {
                if values.is_empty() {
                    return Err(StoreError::InvalidObject(format!(
                        "adding label '{}' requires at least one value",
                        change.key
                    )));
                }
                let existing = updated.entry(change.key.clone()).or_default();
                for value in values {
                    if !existing.contains(&value) {
                        existing.push(value);
                    }
                }
            }
            LabelOperation::Remove if values.is_empty() => {
                updated.remove(&change.key);
            }
            LabelOperation::Remove => {
                if let Some(existing) = updated.get_mut(&change.key) {
                    existing.retain(|v| !values.contains(v));
                    if existing.is_empty() {
                        updated.remove(&change.key);
                    }
                }
            }
        }
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_add_creates_and_merges() {
        let current = labels(&[("env", &["dev"])]);
        let updated = apply_label_changes(
            &current,
            &[
                LabelChange::add("env", ["dev", "test"]),
                LabelChange::add("tier", ["1"]),
            ],
        )
        .unwrap();
        assert_eq!(updated, labels(&[("env", &["dev", "test"]), ("tier", &["1"])]));
    }

    #[test]
    fn test_remove_values_and_keys() {
        let current = labels(&[("env", &["dev", "test"]), ("tier", &["1"])]);

        let updated =
            apply_label_changes(&current, &[LabelChange::remove("env", ["dev"])]).unwrap();
        assert_eq!(updated, labels(&[("env", &["test"]), ("tier", &["1"])]));

        let updated = apply_label_changes(
            &current,
            &[
                LabelChange::remove("tier", Vec::<String>::new()),
                LabelChange::remove("env", ["dev", "test"]),
                LabelChange::remove("missing", ["x"]),
            ],
        )
        .unwrap();
        assert!(updated.is_empty());
    }

    #[test]
    fn test_json_values_are_canonical() {
        let updated = apply_label_changes(
            &BTreeMap::new(),
            &[LabelChange::add("cfg", [r#"{"key2": "val2", "key1": "val1"}"#])],
        )
        .unwrap();
        assert_eq!(updated["cfg"], vec![r#"{"key1":"val1","key2":"val2"}"#]);
    }

    #[test]
    fn test_invalid_changes_leave_labels_untouched() {
        let current = labels(&[("env", &["dev"])]);
        assert!(apply_label_changes(
            &current,
            &[
                LabelChange::remove("env", Vec::<String>::new()),
                LabelChange::add("tier", Vec::<String>::new()),
            ],
        )
        .is_err());
        assert!(apply_label_changes(&current, &[LabelChange::add("", ["x"])]).is_err());
        assert_eq!(current, labels(&[("env", &["dev"])]));
    }

    #[test]
    fn test_wire_format() {
        let change: LabelChange =
            serde_json::from_str(r#"{"op": "add", "key": "labelKey1", "values": ["1"]}"#).unwrap();
        assert_eq!(change, LabelChange::add("labelKey1", ["1"]));

        let change: LabelChange = serde_json::from_str(r#"{"op": "remove", "key": "k"}"#).unwrap();
        assert!(change.values.is_empty());
    }
}
