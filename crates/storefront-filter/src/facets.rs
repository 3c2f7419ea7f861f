//! Facet ordering and merge: stable display lists for facet columns.
//!
//! The platform returns facet groups in result-set order, and value counts
//! change on every round trip. Rendering straight from the response makes
//! columns reshuffle as the user narrows the result set. Two mechanisms keep
//! the display stable:
//!
//! - the categories group is merged against a fixed canonical taxonomy, with
//!   zero-count placeholders synthesized for categories absent from the
//!   current result set, so the column never changes shape;
//! - free-form groups are pinned to the ordering they had when first seen,
//!   recorded once per group in a caller-owned [`FacetOrderCache`].

use std::collections::HashMap;

use storefront_core::{FacetGroup, FacetValue};

/// Canonical display order for the categories facet column, lower-cased.
pub const CANONICAL_CATEGORY_ORDER: [&str; 7] = [
    "headware",
    "apparel",
    "leather goods",
    "uniforms",
    "carry",
    "accessories",
    "drinkware",
];

/// Label (case-insensitive) of the group merged against
/// [`CANONICAL_CATEGORY_ORDER`].
pub const CANONICAL_CATEGORY_GROUP: &str = "categories";

/// The legacy category group still carries gendered duplicates of current
/// values; anything matching this marker is dropped from display.
const LEGACY_CATEGORY_GROUP: &str = "category";
const DEPRECATED_LABEL_MARKER: &str = "men";

/// Title-cases a label: splits on single spaces, uppercases each word's
/// first character, rejoins. Empty input yields an empty string.
#[must_use]
pub fn title_case(input: &str) -> String {
    input
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Merges server-returned values against a fixed canonical ordering.
///
/// Produces exactly one entry per canonical label, in canonical order.
/// Labels are matched case-insensitively; a canonical label with no match is
/// synthesized as a zero-count placeholder whose input token is the canonical
/// label itself. Output length always equals `allowed_order.len()`.
#[must_use]
pub fn merge_canonical(allowed_order: &[&str], values: &[FacetValue]) -> Vec<FacetValue> {
    let existing: HashMap<String, &FacetValue> = values
        .iter()
        .map(|value| (value.label.to_lowercase(), value))
        .collect();

    allowed_order
        .iter()
        .map(|label| {
            existing.get(*label).map_or_else(
                || FacetValue {
                    id: format!("missing-{}", slug(label)),
                    label: title_case(label),
                    input: (*label).to_owned(),
                    count: 0,
                    swatch: None,
                },
                |found| (*found).clone(),
            )
        })
        .collect()
}

fn slug(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join("-")
}

/// First-seen ordering store for free-form facet groups.
///
/// Keyed by group label. Each group's ordering is written at most once — the
/// first non-empty value set it is shown with — and read on every subsequent
/// render, so count-only changes can never reshuffle a column. Construct one
/// per facet-column lifetime and thread it through each render.
#[derive(Debug, Default)]
pub struct FacetOrderCache {
    orders: HashMap<String, HashMap<String, usize>>,
}

impl FacetOrderCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `values` as the group's display order, unless an order is
    /// already recorded (write-once).
    pub fn record_initial_order(&mut self, group_label: &str, values: &[FacetValue]) {
        let order = self.orders.entry(group_label.to_owned()).or_default();
        if !order.is_empty() {
            return;
        }
        for (index, value) in values.iter().enumerate() {
            order.entry(value.label.clone()).or_insert(index);
        }
    }

    /// Sorts `values` by the group's recorded order. Labels never seen when
    /// the order was recorded sort last, keeping their relative input order.
    #[must_use]
    pub fn sort_by_stored(&self, group_label: &str, values: &[FacetValue]) -> Vec<FacetValue> {
        let order = self.orders.get(group_label);
        let mut sorted = values.to_vec();
        sorted.sort_by_key(|value| {
            order
                .and_then(|o| o.get(&value.label))
                .copied()
                .unwrap_or(usize::MAX)
        });
        sorted
    }
}

/// Produces the display list for one facet group.
///
/// The categories group goes through the canonical merge; every other group
/// gets the legacy-value exclusion and first-seen ordering. The cache records
/// the group's raw value order before exclusion, matching how the column was
/// first shown.
#[must_use]
pub fn display_values(group: &FacetGroup, cache: &mut FacetOrderCache) -> Vec<FacetValue> {
    if group.label.to_lowercase() == CANONICAL_CATEGORY_GROUP {
        return merge_canonical(&CANONICAL_CATEGORY_ORDER, &group.values);
    }

    cache.record_initial_order(&group.label, &group.values);
    let kept: Vec<FacetValue> = group
        .values
        .iter()
        .filter(|value| {
            !(group.label == LEGACY_CATEGORY_GROUP
                && value.label.contains(DEPRECATED_LABEL_MARKER))
        })
        .cloned()
        .collect();
    cache.sort_by_stored(&group.label, &kept)
}

#[cfg(test)]
#[path = "facets_test.rs"]
mod tests;
