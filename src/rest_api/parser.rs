//! # List Parameter Parser
//!
//! Extracts the list-endpoint parameters from the query string.
//! Parameters the endpoint does not know are ignored.

use std::collections::HashMap;

use crate::query::QueryType;

/// Page size parameter
pub const MAX_ITEMS: &str = "max_items";

/// Continuation token parameter
pub const TOKEN: &str = "token";

/// Raw list parameters, not yet validated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub field_query: Option<String>,
    pub label_query: Option<String>,
    pub max_items: Option<String>,
    pub token: Option<String>,
}

impl ListParams {
    /// Parse query parameters from a HashMap
    pub fn parse(params: &HashMap<String, String>) -> Self {
        let non_empty = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();

        Self {
            field_query: non_empty(QueryType::Field.param_name()),
            label_query: non_empty(QueryType::Label.param_name()),
            // An empty max_items is present but invalid
            max_items: params.get(MAX_ITEMS).cloned(),
            token: non_empty(TOKEN),
        }
    }

    /// Expression supplied for a namespace
    pub fn expression(&self, query_type: QueryType) -> Option<&str> {
        match query_type {
            QueryType::Field => self.field_query.as_deref(),
            QueryType::Label => self.label_query.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_all() {
        let parsed = ListParams::parse(&params(&[
            ("fieldQuery", "name = a"),
            ("labelQuery", "env in [dev||prod]"),
            ("max_items", "10"),
            ("token", "abc"),
            ("unrelated", "x"),
        ]));
        assert_eq!(parsed.expression(QueryType::Field), Some("name = a"));
        assert_eq!(parsed.expression(QueryType::Label), Some("env in [dev||prod]"));
        assert_eq!(parsed.max_items.as_deref(), Some("10"));
        assert_eq!(parsed.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_empty_values() {
        let parsed = ListParams::parse(&params(&[
            ("fieldQuery", ""),
            ("token", ""),
            ("max_items", ""),
        ]));
        assert_eq!(parsed.field_query, None);
        assert_eq!(parsed.token, None);
        assert_eq!(parsed.max_items.as_deref(), Some(""));
    }

    #[test]
    fn test_absent() {
        assert_eq!(ListParams::parse(&HashMap::new()), ListParams::default());
    }
}
