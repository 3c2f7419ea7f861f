//! The storefront's fixed sort option catalog.

use storefront_core::SortKey;

use crate::query_state::SortSelection;

/// One entry in the sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    pub label: &'static str,
    pub selection: SortSelection,
    /// Title and date sorts are not offered by the platform's search
    /// operation, so they are hidden in the search context.
    pub available_in_search: bool,
}

/// Display order matches the sort column top to bottom.
pub const SORT_OPTIONS: [SortOption; 6] = [
    SortOption {
        label: "Alphabetically, A-Z",
        selection: SortSelection {
            sort_key: SortKey::Title,
            reverse: false,
        },
        available_in_search: false,
    },
    SortOption {
        label: "Alphabetically, Z-A",
        selection: SortSelection {
            sort_key: SortKey::Title,
            reverse: true,
        },
        available_in_search: false,
    },
    SortOption {
        label: "Date, New to Old",
        selection: SortSelection {
            sort_key: SortKey::Created,
            reverse: true,
        },
        available_in_search: false,
    },
    SortOption {
        label: "Date, Old to New",
        selection: SortSelection {
            sort_key: SortKey::Created,
            reverse: false,
        },
        available_in_search: false,
    },
    SortOption {
        label: "Price, Low to High",
        selection: SortSelection {
            sort_key: SortKey::Price,
            reverse: false,
        },
        available_in_search: true,
    },
    SortOption {
        label: "Price, High to Low",
        selection: SortSelection {
            sort_key: SortKey::Price,
            reverse: true,
        },
        available_in_search: true,
    },
];

impl SortOption {
    /// JSON token form used by the sort inputs,
    /// e.g. `{"reverse":false,"sortKey":"TITLE"}`.
    #[must_use]
    pub fn token(&self) -> String {
        format!(
            r#"{{"reverse":{},"sortKey":"{}"}}"#,
            self.selection.reverse,
            self.selection.sort_key.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::query_state::{FilterCodec, QueryState};

    use super::*;

    #[test]
    fn catalog_tokens_are_valid_json() {
        for option in SORT_OPTIONS {
            let value: serde_json::Value =
                serde_json::from_str(&option.token()).expect("sort token should parse");
            assert!(value.get("reverse").is_some());
            assert!(value.get("sortKey").is_some());
        }
    }

    #[test]
    fn applying_a_catalog_option_checks_it_and_only_it() {
        let codec = FilterCodec::new();
        let update = codec.set_sort(&QueryState::new(), SORT_OPTIONS[2].selection);

        for (index, option) in SORT_OPTIONS.iter().enumerate() {
            assert_eq!(
                codec.is_sort_checked(&update.query, option.selection),
                index == 2,
                "option {index} checked state mismatch"
            );
        }
    }

    #[test]
    fn price_sorts_remain_available_in_search() {
        let available: Vec<&str> = SORT_OPTIONS
            .iter()
            .filter(|o| o.available_in_search)
            .map(|o| o.label)
            .collect();
        assert_eq!(available, vec!["Price, Low to High", "Price, High to Low"]);
    }
}
