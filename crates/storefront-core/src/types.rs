//! Shared domain types for the storefront listing subsystem.
//!
//! These mirror the shapes the commerce platform's GraphQL storefront API
//! returns for a product listing: facet groups with result-dependent value
//! counts, Relay-style page info, and the sort/direction vocabulary carried
//! in listing URLs.

use serde::{Deserialize, Serialize};

/// Sort orders accepted by the platform's product listing operations.
///
/// `Relevance` is only meaningful in the search context; collection listings
/// default to `BestSelling` when no sort is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    Title,
    Created,
    Price,
    BestSelling,
    Relevance,
}

impl SortKey {
    /// Wire representation, as carried in the `sortKey` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "TITLE",
            Self::Created => "CREATED",
            Self::Price => "PRICE",
            Self::BestSelling => "BEST_SELLING",
            Self::Relevance => "RELEVANCE",
        }
    }

    /// Parses the `sortKey` query parameter value.
    ///
    /// Returns `None` for unrecognized values; callers treat that as
    /// "no sort active" rather than an error.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TITLE" => Some(Self::Title),
            "CREATED" => Some(Self::Created),
            "PRICE" => Some(Self::Price),
            "BEST_SELLING" => Some(Self::BestSelling),
            "RELEVANCE" => Some(Self::Relevance),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page traversal direction, as carried in the `direction` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }

    /// Parses the `direction` query parameter value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "next" => Some(Self::Next),
            "previous" => Some(Self::Previous),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filterable product attribute (e.g. Color, Categories) and its values,
/// as returned alongside a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetGroup {
    pub id: String,
    pub label: String,
    /// Presentation hint from the platform (e.g. `"TEXT"`, `"SWATCH"`).
    #[serde(default)]
    pub presentation: Option<String>,
    /// Platform facet type (e.g. `"LIST"`, `"PRICE_RANGE"`).
    #[serde(default, rename = "type")]
    pub group_type: Option<String>,
    #[serde(default)]
    pub values: Vec<FacetValue>,
}

/// One selectable value within a [`FacetGroup`].
///
/// Counts are recomputed by the platform on every round trip; a value with
/// `count == 0` is disabled for further narrowing but still rendered so the
/// option stays discoverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub id: String,
    pub label: String,
    /// Opaque constraint token. Carried verbatim into the `filter` query
    /// parameter and back to the platform; equality is byte-for-byte.
    pub input: String,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swatch: Option<Swatch>,
}

/// Color swatch attached to a facet value, when the group presents as one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    #[serde(default)]
    pub color: Option<String>,
}

/// Relay-style page info returned with every listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// Relay-style page window arguments for a listing query.
///
/// Exactly one of `first`/`last` is set; `after` accompanies `first` and
/// `before` accompanies `last`. Serialized into GraphQL variables as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_round_trips_through_wire_form() {
        for key in [
            SortKey::Title,
            SortKey::Created,
            SortKey::Price,
            SortKey::BestSelling,
            SortKey::Relevance,
        ] {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
    }

    #[test]
    fn sort_key_parse_rejects_unknown_value() {
        assert_eq!(SortKey::parse("PRICE_DESC"), None);
        assert_eq!(SortKey::parse(""), None);
        assert_eq!(SortKey::parse("best_selling"), None);
    }

    #[test]
    fn sort_key_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&SortKey::BestSelling).unwrap();
        assert_eq!(json, "\"BEST_SELLING\"");
        let parsed: SortKey = serde_json::from_str("\"TITLE\"").unwrap();
        assert_eq!(parsed, SortKey::Title);
    }

    #[test]
    fn direction_round_trips() {
        assert_eq!(Direction::parse("next"), Some(Direction::Next));
        assert_eq!(Direction::parse("previous"), Some(Direction::Previous));
        assert_eq!(Direction::parse("backwards"), None);
    }

    #[test]
    fn page_info_deserializes_from_camel_case() {
        let info: PageInfo = serde_json::from_str(
            r#"{"hasNextPage":true,"hasPreviousPage":false,"endCursor":"abc"}"#,
        )
        .unwrap();
        assert!(info.has_next_page);
        assert!(!info.has_previous_page);
        assert_eq!(info.end_cursor.as_deref(), Some("abc"));
        assert_eq!(info.start_cursor, None);
    }

    #[test]
    fn facet_group_deserializes_platform_shape() {
        let group: FacetGroup = serde_json::from_str(
            r#"{
                "id": "filter.p.product_type",
                "label": "Categories",
                "presentation": "TEXT",
                "type": "LIST",
                "values": [
                    {"id": "v1", "label": "Apparel", "input": "{\"productType\":\"Apparel\"}", "count": 5},
                    {"id": "v2", "label": "Carry", "input": "{\"productType\":\"Carry\"}", "count": 0, "swatch": null}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(group.group_type.as_deref(), Some("LIST"));
        assert_eq!(group.values.len(), 2);
        assert_eq!(group.values[1].count, 0);
    }

    #[test]
    fn page_args_serialization_skips_unset_window() {
        let args = PageArgs {
            first: Some(12),
            after: Some("abc".to_owned()),
            ..PageArgs::default()
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json, serde_json::json!({"first": 12, "after": "abc"}));
    }
}
