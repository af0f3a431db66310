//! Tests for the filter registry and chain parsing.

use super::*;
use serde_json::json;

// ==================== Registry ====================

#[test]
fn test_every_filter_round_trips_its_name() {
    for filter in Filter::ALL {
        assert_eq!(filter.name().parse::<Filter>().unwrap(), filter);
    }
}

#[test]
fn test_unknown_filter_suggests_close_name() {
    let err = "splt".parse::<Filter>().unwrap_err();
    assert_eq!(err, FilterError::unknown_filter("splt", Some("split".to_string())));
}

#[test]
fn test_unknown_filter_without_close_name() {
    let err = "uppercase_everything".parse::<Filter>().unwrap_err();
    assert_eq!(err, FilterError::unknown_filter("uppercase_everything", None));
}

#[test]
fn test_filter_display() {
    assert_eq!(Filter::ReplaceHtmlTag.to_string(), "replace_html_tag");
}

// ==================== Segment parsing ====================

#[test]
fn test_parse_call_without_args() {
    let call = FilterCall::parse("text").unwrap();
    assert_eq!(call.filter, Filter::Text);
    assert_eq!(call.args, None);
}

#[test]
fn test_parse_call_keeps_raw_args() {
    let call = FilterCall::parse(r#"split(",")"#).unwrap();
    assert_eq!(call.filter, Filter::Split);
    assert_eq!(call.args.as_deref(), Some(r#"(",")"#));
}

#[test]
fn test_parse_call_empty_name() {
    assert_eq!(FilterCall::parse("(x)").unwrap_err(), FilterError::EmptyFilterName);
}

#[test]
fn test_parse_call_unclosed_paren() {
    let err = FilterCall::parse("replace(a:b").unwrap_err();
    assert!(matches!(err, FilterError::UnclosedParenthesis { ref filter } if filter == "replace"));
}

#[test]
fn test_parse_call_trailing_input() {
    let err = FilterCall::parse("indent(2) extra").unwrap_err();
    assert!(matches!(err, FilterError::TrailingInput { ref rest, .. } if rest == "extra"));
}

#[test]
fn test_parse_call_paren_inside_quotes() {
    let call = FilterCall::parse(r#"replace(")":"]")"#).unwrap();
    assert_eq!(call.args.as_deref(), Some(r#"(")":"]")"#));
}

// ==================== Chains ====================

#[test]
fn test_chain_splits_on_top_level_colon_only() {
    let parsed = FilterChain::parse("replace(a:b):split(\",\"):text");
    assert!(parsed.errors.is_empty());
    let filters: Vec<Filter> = parsed.chain.calls().iter().map(|c| c.filter).collect();
    assert_eq!(filters, vec![Filter::Replace, Filter::Split, Filter::Text]);
}

#[test]
fn test_chain_drops_bad_segments_and_keeps_going() {
    let parsed = FilterChain::parse("nope:text::indent(1");
    assert_eq!(parsed.chain.calls().len(), 1);
    assert_eq!(parsed.errors.len(), 3);
    assert_eq!(parsed.errors[1], FilterError::EmptyFilterName);
}

#[test]
fn test_empty_chain_is_identity() {
    let parsed = FilterChain::parse("");
    assert!(parsed.chain.is_empty());
    assert_eq!(parsed.chain.apply(FilterValue::from("x")), FilterValue::from("x"));
}

#[test]
fn test_output_of_one_filter_feeds_the_next() {
    let out = apply_filters(FilterValue::from("a-b"), r#"replace(-:" "):split(" ")"#);
    assert_eq!(out.render(), r#"["a","b"]"#);
}

#[test]
fn test_split_then_wrap() {
    let out = apply_filters(FilterValue::from("x,1,y,2"), r#"split(","):wrap(k,v)"#);
    assert_eq!(out.render(), r#"[{"k":"x","v":"1"},{"k":"y","v":"2"}]"#);
}

// ==================== Argument handling ====================

#[test]
fn test_absent_args_are_no_ops() {
    let input = FilterValue::from("unchanged");
    for filter in [Filter::Replace, Filter::ReplaceHtmlTag, Filter::Template, Filter::Wrap] {
        assert_eq!(filter.apply(input.clone(), None), input);
        assert_eq!(filter.apply(input.clone(), Some("()")), input);
    }
}

#[test]
fn test_split_without_args_wraps_input() {
    assert_eq!(Filter::Split.apply(FilterValue::from("x"), None), FilterValue::from(r#"["x"]"#));
}

#[test]
fn test_whitespace_argument_is_kept() {
    let out = Filter::Split.apply(FilterValue::from("a b"), Some("( )"));
    assert_eq!(out.render(), r#"["a","b"]"#);
    let out = apply_filters(FilterValue::from("x y"), "split( )");
    assert_eq!(out.render(), r#"["x","y"]"#);
}

#[test]
fn test_wrap_plain_text_as_single_item() {
    let out = Filter::Wrap.apply(FilterValue::from("plain"), Some("(a)"));
    assert_eq!(out.render(), r#"[{"a":"plain"}]"#);
}

#[test]
fn test_failed_filter_passes_input_through() {
    let input = FilterValue::from("not a duration");
    assert_eq!(Filter::Dur.apply(input.clone(), None), input);
    assert_eq!(Filter::ToHtml.apply(input.clone(), None), input);
}

#[test]
fn test_try_apply_surfaces_errors() {
    let err = Filter::Dur.try_apply(&FilterValue::from("bad"), None).unwrap_err();
    assert!(matches!(err, FilterError::InvalidDuration { .. }));
}

#[test]
fn test_array_input_is_serialized_for_text_filters() {
    let out = Filter::Replace.apply(FilterValue::Array(vec![json!("a")]), Some("(a:b)"));
    assert_eq!(out, FilterValue::from(r#"["b"]"#));
}

#[test]
fn test_template_filter_over_items() {
    let out = Filter::Template.apply(
        FilterValue::from(r#"[{"n":"one"},{"n":"two"}]"#),
        Some(r#"("- ${n}")"#),
    );
    assert_eq!(out, FilterValue::from("- one\n\n- two"));
}

#[test]
fn test_dur_through_registry() {
    assert_eq!(Filter::Dur.apply(FilterValue::from("PT1H2M3S"), None), FilterValue::from("01:02:03"));
}
