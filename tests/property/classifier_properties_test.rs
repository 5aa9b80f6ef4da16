//! Property-based tests for the input classifier.

use kestrel::services::url_classifier::{classify, scheme_of, SEARCH_URL_PREFIX};
use proptest::prelude::*;

/// Inputs that already carry a scheme.
fn arb_scheme_input() -> impl Strategy<Value = String> {
    ("[a-zA-Z][a-zA-Z0-9+.-]{0,8}", "[ -~]{0,40}")
        .prop_map(|(scheme, rest)| format!("{}:{}", scheme, rest.trim()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn classify_is_idempotent_for_scheme_inputs(input in arb_scheme_input()) {
        let once = classify(&input);
        prop_assert_eq!(classify(&once), once);
    }

    #[test]
    fn classify_is_idempotent_for_any_input(input in "\\PC{0,40}") {
        let once = classify(&input);
        prop_assert_eq!(classify(&once), once);
    }

    #[test]
    fn classify_always_yields_a_scheme(input in "\\PC{0,40}") {
        prop_assert!(scheme_of(&classify(&input)).is_some());
    }

    #[test]
    fn search_queries_contain_only_url_safe_characters(words in "[a-z ]{1,20}[a-z]") {
        prop_assume!(!words.contains('.'));
        let url = classify(&words);
        prop_assert!(url.starts_with(SEARCH_URL_PREFIX));
        let query = &url[SEARCH_URL_PREFIX.len()..];
        prop_assert!(query
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"-._~%".contains(&b)));
    }
}
