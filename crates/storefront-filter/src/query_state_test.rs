use super::*;

fn codec() -> FilterCodec {
    FilterCodec::new()
}

// ---------------------------------------------------------------------------
// QueryState parse / serialize
// ---------------------------------------------------------------------------

#[test]
fn parse_handles_leading_question_mark_and_empty_segments() {
    let query = QueryState::parse("?a=1&&b=2&");
    assert_eq!(query.get("a"), Some("1"));
    assert_eq!(query.get("b"), Some("2"));
    assert_eq!(query.pairs().len(), 2);
}

#[test]
fn parse_segment_without_equals_becomes_empty_value() {
    let query = QueryState::parse("flag&a=1");
    assert_eq!(query.get("flag"), Some(""));
    assert!(query.contains("flag"));
}

#[test]
fn parse_decodes_percent_escapes_and_plus() {
    let query = QueryState::parse("q=leather+goods&filter=%7B%22tag%22%3A%22red%22%7D");
    assert_eq!(query.get("q"), Some("leather goods"));
    assert_eq!(query.get("filter"), Some(r#"{"tag":"red"}"#));
}

#[test]
fn query_string_round_trips_json_tokens_byte_for_byte() {
    let token = r#"{"productType":"Leather Goods"}"#;
    let update = codec().add_filter(&QueryState::new(), token);
    let reparsed = QueryState::parse(&update.query.to_query_string());
    assert_eq!(reparsed.get_all(FILTER_PARAM), vec![token]);
}

#[test]
fn get_all_preserves_order_of_repeated_params() {
    let query = QueryState::parse("filter=a&sortKey=PRICE&filter=b&filter=c");
    assert_eq!(query.get_all("filter"), vec!["a", "b", "c"]);
}

// ---------------------------------------------------------------------------
// decode_filters / decode_sort
// ---------------------------------------------------------------------------

#[test]
fn decode_filters_returns_every_token() {
    let query = QueryState::parse("filter=%7B%22color%22%3A%22red%22%7D&filter=plain");
    let tokens = codec().decode_filters(&query);
    assert_eq!(tokens, vec![r#"{"color":"red"}"#, "plain"]);
}

#[test]
fn decode_sort_requires_both_params() {
    let c = codec();
    assert_eq!(c.decode_sort(&QueryState::parse("sortKey=PRICE")), None);
    assert_eq!(c.decode_sort(&QueryState::parse("reverse=true")), None);
    let both = QueryState::parse("sortKey=PRICE&reverse=true");
    assert_eq!(
        c.decode_sort(&both),
        Some(SortSelection {
            sort_key: SortKey::Price,
            reverse: true,
        })
    );
}

#[test]
fn decode_sort_treats_unknown_key_as_no_sort() {
    let query = QueryState::parse("sortKey=CHEAPEST&reverse=true");
    assert_eq!(codec().decode_sort(&query), None);
}

#[test]
fn decode_sort_reverse_is_true_only_for_literal_true() {
    let query = QueryState::parse("sortKey=TITLE&reverse=1");
    assert_eq!(
        codec().decode_sort(&query),
        Some(SortSelection {
            sort_key: SortKey::Title,
            reverse: false,
        })
    );
}

// ---------------------------------------------------------------------------
// add_filter
// ---------------------------------------------------------------------------

#[test]
fn add_filter_round_trips_single_token() {
    let token = r#"{"color":"red"}"#;
    let update = codec().add_filter(&QueryState::new(), token);
    assert_eq!(codec().decode_filters(&update.query), vec![token]);
    assert!(update.preserve_scroll);
}

#[test]
fn add_filter_replaces_token_for_same_group() {
    let c = codec();
    let query = QueryState::new();
    let update = c.add_filter(&query, r#"{"color":"red"}"#);
    let update = c.add_filter(&update.query, r#"{"size":"m"}"#);
    let update = c.add_filter(&update.query, r#"{"color":"blue"}"#);

    let tokens = c.decode_filters(&update.query);
    assert_eq!(tokens, vec![r#"{"size":"m"}"#, r#"{"color":"blue"}"#]);
}

#[test]
fn add_filter_leaves_other_groups_untouched() {
    let c = codec();
    let start = QueryState::parse(
        "filter=%7B%22color%22%3A%22red%22%7D&filter=%7B%22tag%22%3A%22new%22%7D",
    );
    let update = c.add_filter(&start, r#"{"color":"green"}"#);
    let tokens = c.decode_filters(&update.query);
    assert_eq!(tokens, vec![r#"{"tag":"new"}"#, r#"{"color":"green"}"#]);
}

#[test]
fn add_filter_appends_non_json_token_by_default() {
    let c = codec();
    let update = c.add_filter(&QueryState::new(), "apparel");
    let update = c.add_filter(&update.query, "apparel");
    assert_eq!(c.decode_filters(&update.query), vec!["apparel", "apparel"]);
}

#[test]
fn add_filter_replace_by_token_policy_dedupes_non_json_tokens() {
    let c = FilterCodec {
        ungrouped: UngroupedTokenPolicy::ReplaceByToken,
    };
    let update = c.add_filter(&QueryState::new(), "apparel");
    let update = c.add_filter(&update.query, "apparel");
    assert_eq!(c.decode_filters(&update.query), vec!["apparel"]);
}

#[test]
fn add_filter_does_not_mutate_previous_state() {
    let start = QueryState::parse("filter=%7B%22color%22%3A%22red%22%7D&cursor=abc");
    let snapshot = start.clone();
    let _ = codec().add_filter(&start, r#"{"color":"blue"}"#);
    assert_eq!(start, snapshot);
}

#[test]
fn add_filter_clears_pagination_position() {
    let start = QueryState::parse("cursor=abc&direction=next&filter=%7B%22tag%22%3A%22a%22%7D");
    let update = codec().add_filter(&start, r#"{"color":"red"}"#);
    assert!(!update.query.contains(CURSOR_PARAM));
    assert!(!update.query.contains(DIRECTION_PARAM));
}

#[test]
fn add_filter_malformed_json_token_does_not_panic() {
    // Truncated JSON falls back to opaque-string treatment.
    let c = codec();
    let update = c.add_filter(&QueryState::new(), r#"{"color":"#);
    assert_eq!(c.decode_filters(&update.query), vec![r#"{"color":"#]);
}

#[test]
fn group_key_extraction() {
    assert_eq!(group_key(r#"{"color":"red"}"#), Some("color".to_owned()));
    assert_eq!(group_key("{}"), None);
    assert_eq!(group_key("[1,2]"), None);
    assert_eq!(group_key("plain"), None);
    assert_eq!(group_key(""), None);
}

// ---------------------------------------------------------------------------
// remove_filter
// ---------------------------------------------------------------------------

#[test]
fn remove_filter_removes_only_the_matching_token() {
    let c = codec();
    let start = QueryState::parse(
        "filter=%7B%22color%22%3A%22red%22%7D&filter=%7B%22size%22%3A%22m%22%7D",
    );
    let update = c.remove_filter(&start, r#"{"color":"red"}"#);
    assert_eq!(c.decode_filters(&update.query), vec![r#"{"size":"m"}"#]);
}

#[test]
fn remove_filter_with_unknown_token_is_a_no_op_on_filters() {
    let c = codec();
    let start = QueryState::parse("filter=%7B%22color%22%3A%22red%22%7D");
    let update = c.remove_filter(&start, r#"{"color":"blue"}"#);
    assert_eq!(c.decode_filters(&update.query), vec![r#"{"color":"red"}"#]);
}

#[test]
fn remove_filter_clears_pagination_and_preserves_scroll() {
    let start = QueryState::parse("filter=a&cursor=xyz&direction=previous");
    let update = codec().remove_filter(&start, "a");
    assert!(!update.query.contains(CURSOR_PARAM));
    assert!(!update.query.contains(DIRECTION_PARAM));
    assert!(update.preserve_scroll);
}

// ---------------------------------------------------------------------------
// set_sort / clear_sort
// ---------------------------------------------------------------------------

#[test]
fn set_sort_writes_both_params_as_strings() {
    let update = codec().set_sort(
        &QueryState::new(),
        SortSelection {
            sort_key: SortKey::Price,
            reverse: true,
        },
    );
    assert_eq!(update.query.get(SORT_KEY_PARAM), Some("PRICE"));
    assert_eq!(update.query.get(REVERSE_PARAM), Some("true"));
}

#[test]
fn set_sort_replaces_existing_sort_and_clears_cursor() {
    let start = QueryState::parse("sortKey=TITLE&reverse=false&cursor=abc&direction=next");
    let update = codec().set_sort(
        &start,
        SortSelection {
            sort_key: SortKey::Created,
            reverse: true,
        },
    );
    assert_eq!(update.query.get_all(SORT_KEY_PARAM), vec!["CREATED"]);
    assert_eq!(update.query.get_all(REVERSE_PARAM), vec!["true"]);
    assert!(!update.query.contains(CURSOR_PARAM));
    assert!(!update.query.contains(DIRECTION_PARAM));
}

#[test]
fn set_sort_keeps_filters_intact() {
    let c = codec();
    let start = QueryState::parse("filter=%7B%22color%22%3A%22red%22%7D");
    let update = c.set_sort(
        &start,
        SortSelection {
            sort_key: SortKey::BestSelling,
            reverse: false,
        },
    );
    assert_eq!(c.decode_filters(&update.query), vec![r#"{"color":"red"}"#]);
}

#[test]
fn clear_sort_deletes_all_four_params() {
    let start = QueryState::parse("sortKey=PRICE&reverse=true&cursor=abc&direction=next&filter=a");
    let update = codec().clear_sort(&start);
    assert!(!update.query.contains(SORT_KEY_PARAM));
    assert!(!update.query.contains(REVERSE_PARAM));
    assert!(!update.query.contains(CURSOR_PARAM));
    assert!(!update.query.contains(DIRECTION_PARAM));
    assert_eq!(update.query.get("filter"), Some("a"));
}

#[test]
fn clear_sort_does_not_mutate_previous_state() {
    let start = QueryState::parse("sortKey=PRICE&reverse=true");
    let snapshot = start.clone();
    let _ = codec().clear_sort(&start);
    assert_eq!(start, snapshot);
}

// ---------------------------------------------------------------------------
// is_sort_checked
// ---------------------------------------------------------------------------

#[test]
fn is_sort_checked_matches_exact_pair() {
    let c = codec();
    let query = QueryState::parse("sortKey=PRICE&reverse=true");
    assert!(c.is_sort_checked(
        &query,
        SortSelection {
            sort_key: SortKey::Price,
            reverse: true,
        }
    ));
    assert!(!c.is_sort_checked(
        &query,
        SortSelection {
            sort_key: SortKey::Price,
            reverse: false,
        }
    ));
    assert!(!c.is_sort_checked(
        &query,
        SortSelection {
            sort_key: SortKey::Title,
            reverse: true,
        }
    ));
}

#[test]
fn is_sort_checked_is_false_when_no_sort_active() {
    let c = codec();
    assert!(!c.is_sort_checked(
        &QueryState::new(),
        SortSelection {
            sort_key: SortKey::BestSelling,
            reverse: false,
        }
    ));
}
