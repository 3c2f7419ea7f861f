//! URL query-string codec for listing filter and sort state.
//!
//! The browser URL is the source of truth for a listing page's filter, sort,
//! and pagination state. This module maps between the raw query string and
//! typed selections, and provides the write operations the filter UI issues.
//!
//! Filter constraints travel as opaque string tokens in the repeatable
//! `filter` parameter. Tokens are usually JSON objects serialized to strings
//! (e.g. `{"productType":"Apparel"}`); the codec only peeks inside a token to
//! extract its facet-group key when deciding whether a new token replaces an
//! existing one. A token that does not parse as JSON is handled per
//! [`UngroupedTokenPolicy`] — the decode path never fails.
//!
//! Every write operation is a pure function over an immutable [`QueryState`]
//! snapshot: the input state is left untouched and a [`QueryUpdate`] carrying
//! the successor state is returned. Any filter or sort change invalidates the
//! pagination position, so all write operations clear `cursor`/`direction`.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use storefront_core::SortKey;

/// Repeatable parameter carrying one opaque filter constraint token per value.
pub const FILTER_PARAM: &str = "filter";
/// Active sort key, as a [`SortKey`] wire string.
pub const SORT_KEY_PARAM: &str = "sortKey";
/// Sort direction flag, `"true"` or `"false"`.
pub const REVERSE_PARAM: &str = "reverse";
/// Opaque pagination cursor issued by the platform.
pub const CURSOR_PARAM: &str = "cursor";
/// Page traversal direction, `"next"` or `"previous"`.
pub const DIRECTION_PARAM: &str = "direction";
/// Search term, present only on the search route.
pub const SEARCH_TERM_PARAM: &str = "q";

/// Characters percent-encoded in query-string components.
///
/// `*`, `-`, `.`, and `_` stay literal, matching what browsers emit for
/// `application/x-www-form-urlencoded` data.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// An ordered multimap of query-string parameters.
///
/// Preserves insertion order and duplicate names, both of which matter: the
/// `filter` parameter repeats, and filter tokens must round-trip in their
/// original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pairs: Vec<(String, String)>,
}

impl QueryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string (with or without a leading `?`).
    ///
    /// Tolerant by design: empty segments are skipped, a segment without `=`
    /// becomes a parameter with an empty value, and undecodable percent
    /// escapes are passed through lossily. Never fails.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = raw
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((name, value)) => (decode_component(name), decode_component(value)),
                None => (decode_component(segment), String::new()),
            })
            .collect();
        Self { pairs }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// First value for `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `name`, in order of appearance.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(n, _)| n == name)
    }

    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serializes back to an encoded query string (no leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(name, COMPONENT),
                    utf8_percent_encode(value, COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl std::fmt::Display for QueryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

fn decode_component(raw: &str) -> String {
    // Form encoding writes spaces as '+'.
    let raw = raw.replace('+', " ");
    percent_decode_str(&raw).decode_utf8_lossy().into_owned()
}

/// An active sort selection. At most one is active at a time; absence means
/// the platform default order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSelection {
    pub sort_key: SortKey,
    pub reverse: bool,
}

/// Successor query state plus the navigation hint that goes with it.
///
/// Filter and sort toggles happen mid-page, so the navigation layer is told
/// not to reset the scroll position when applying the new query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryUpdate {
    pub query: QueryState,
    pub preserve_scroll: bool,
}

/// How [`FilterCodec::add_filter`] treats a token that does not parse as a
/// JSON object (and therefore has no facet-group key).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UngroupedTokenPolicy {
    /// Always append; duplicate tokens are possible.
    #[default]
    Append,
    /// Treat the whole token as its own group key: adding a token that is
    /// already active replaces it instead of duplicating it.
    ReplaceByToken,
}

/// Bidirectional mapping between query parameters and typed filter/sort
/// selections.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterCodec {
    pub ungrouped: UngroupedTokenPolicy,
}

impl FilterCodec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active filter constraint tokens, in URL order. Tokens are opaque here.
    #[must_use]
    pub fn decode_filters<'a>(&self, query: &'a QueryState) -> Vec<&'a str> {
        query.get_all(FILTER_PARAM)
    }

    /// The active sort, present iff both `sortKey` and `reverse` exist and
    /// the key is recognized. Anything else decodes as "no sort active".
    #[must_use]
    pub fn decode_sort(&self, query: &QueryState) -> Option<SortSelection> {
        let sort_key = SortKey::parse(query.get(SORT_KEY_PARAM)?)?;
        let reverse = query.get(REVERSE_PARAM)?;
        Some(SortSelection {
            sort_key,
            reverse: reverse == "true",
        })
    }

    /// Whether `selection` matches the sort currently encoded in `query`.
    #[must_use]
    pub fn is_sort_checked(&self, query: &QueryState, selection: SortSelection) -> bool {
        query.get(REVERSE_PARAM) == Some(if selection.reverse { "true" } else { "false" })
            && query.get(SORT_KEY_PARAM) == Some(selection.sort_key.as_str())
    }

    /// Adds a filter token.
    ///
    /// When the token carries a facet-group key (its first JSON object key)
    /// and a token for the same group is already active, the old token is
    /// replaced; otherwise the token is appended to the `filter` list.
    pub fn add_filter(&self, query: &QueryState, token: &str) -> QueryUpdate {
        let new_group = group_key(token);
        let mut pairs: Vec<(String, String)> = query
            .pairs()
            .iter()
            .filter(|(name, value)| {
                if name != FILTER_PARAM {
                    return true;
                }
                match (&new_group, self.ungrouped) {
                    (Some(group), _) => group_key(value).as_deref() != Some(group),
                    (None, UngroupedTokenPolicy::ReplaceByToken) => value != token,
                    (None, UngroupedTokenPolicy::Append) => true,
                }
            })
            .cloned()
            .collect();
        pairs.push((FILTER_PARAM.to_owned(), token.to_owned()));
        finish(pairs)
    }

    /// Removes every occurrence of exactly `token` (string equality).
    pub fn remove_filter(&self, query: &QueryState, token: &str) -> QueryUpdate {
        let pairs = query
            .pairs()
            .iter()
            .filter(|(name, value)| !(name == FILTER_PARAM && value == token))
            .cloned()
            .collect();
        finish(pairs)
    }

    /// Sets the active sort, replacing any previous one.
    pub fn set_sort(&self, query: &QueryState, selection: SortSelection) -> QueryUpdate {
        let mut pairs: Vec<(String, String)> = query
            .pairs()
            .iter()
            .filter(|(name, _)| name != SORT_KEY_PARAM && name != REVERSE_PARAM)
            .cloned()
            .collect();
        pairs.push((
            SORT_KEY_PARAM.to_owned(),
            selection.sort_key.as_str().to_owned(),
        ));
        pairs.push((
            REVERSE_PARAM.to_owned(),
            if selection.reverse { "true" } else { "false" }.to_owned(),
        ));
        finish(pairs)
    }

    /// Clears the active sort, falling back to the platform default order.
    pub fn clear_sort(&self, query: &QueryState) -> QueryUpdate {
        let pairs = query
            .pairs()
            .iter()
            .filter(|(name, _)| name != SORT_KEY_PARAM && name != REVERSE_PARAM)
            .cloned()
            .collect();
        finish(pairs)
    }
}

/// Extracts a token's facet-group key: the first key of the JSON object it
/// parses to. `None` for anything that is not a non-empty JSON object; such
/// tokens stay opaque.
#[must_use]
pub fn group_key(token: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(token).ok()?;
    value.as_object()?.keys().next().cloned()
}

/// Drops the pagination position — a cursor is only valid for the exact
/// filter+sort combination it was issued under — and wraps the result.
fn finish(pairs: Vec<(String, String)>) -> QueryUpdate {
    let pairs = pairs
        .into_iter()
        .filter(|(name, _)| name != CURSOR_PARAM && name != DIRECTION_PARAM)
        .collect();
    QueryUpdate {
        query: QueryState { pairs },
        preserve_scroll: true,
    }
}

#[cfg(test)]
#[path = "query_state_test.rs"]
mod tests;
