use crate::patterns::{escape_regex, expand_patterns};

#[test]
fn closure_in_method_expands_most_specific_first() {
    let patterns = expand_patterns("github.com/x/y.(*T).M.func1");

    assert_eq!(
        patterns,
        vec![
            "github.com/x/y.(*T).M.func1".to_string(),
            "(*T).M".to_string(),
            r"github\.com/x/y\.\(\*T\)\.M\.func1".to_string(),
            "x/y.(*T).M.func1".to_string(),
            "y.(*T).M.func1".to_string(),
        ]
    );
}

#[test]
fn plain_function_adds_its_trailing_name() {
    let patterns = expand_patterns("main.fibonacci");

    assert_eq!(
        patterns,
        vec![
            "main.fibonacci".to_string(),
            "fibonacci".to_string(),
            r"main\.fibonacci".to_string(),
        ]
    );
}

#[test]
fn method_on_pointer_receiver_keeps_method_name() {
    let patterns = expand_patterns("net/http.(*conn).serve");

    assert_eq!(patterns[0], "net/http.(*conn).serve");
    assert_eq!(patterns[1], "serve");
    assert!(patterns.contains(&r"net/http\.\(\*conn\)\.serve".to_string()));
    assert!(patterns.contains(&"http.(*conn).serve".to_string()));
}

#[test]
fn duplicates_collapse_in_first_seen_order() {
    let patterns = expand_patterns("runtime");

    assert_eq!(patterns, vec!["runtime".to_string()]);
}

#[test]
fn blank_symbol_has_nothing_to_query() {
    assert!(expand_patterns("").is_empty());
    assert!(expand_patterns("   ").is_empty());
}

#[test]
fn escape_regex_covers_brackets_and_backslashes() {
    assert_eq!(escape_regex(r"a[0]\b"), r"a\[0\]\\b");
    assert_eq!(escape_regex("plain"), "plain");
}
