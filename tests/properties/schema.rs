//! Property tests for schema placeholder substitution.

use proptest::prelude::*;

use hatch::domain::entities::{derive_schema, substitute, APP_ID_TOKEN, PREFIX_TOKEN};

fn app_id() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,8}(\\.[a-z][a-zA-Z0-9]{0,8}){1,3}").unwrap()
}

fn template() -> impl Strategy<Value = String> {
    let chunk = prop_oneof![
        Just(APP_ID_TOKEN.to_string()),
        Just(PREFIX_TOKEN.to_string()),
        proptest::string::string_regex("[A-Z0-9 <>=\"/\n]{0,24}").unwrap(),
    ];
    proptest::collection::vec(chunk, 0..12).prop_map(|chunks| chunks.concat())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: after derivation no placeholder survives.
    #[test]
    fn property_no_residual_tokens(template in template(), id in app_id()) {
        let prefix = format!("/{}", id.replace('.', "/"));
        let derived = derive_schema(&template, &id, &prefix);

        prop_assert!(!derived.content().contains(APP_ID_TOKEN));
        prop_assert!(!derived.content().contains(PREFIX_TOKEN));
    }

    /// PROPERTY: the substitution count equals the placeholder occurrences.
    #[test]
    fn property_substitution_count_matches_occurrences(template in template(), id in app_id()) {
        let expected = template.matches(APP_ID_TOKEN).count() + template.matches(PREFIX_TOKEN).count();
        let derived = derive_schema(&template, &id, "/p");

        prop_assert_eq!(derived.substitutions(), expected);
        prop_assert_eq!(derived.is_verbatim(), expected == 0);
    }

    /// PROPERTY: text without `@` is never touched.
    #[test]
    fn property_text_without_markers_is_verbatim(text in "[^@]{0,128}") {
        let (out, count) = substitute(&text, &[(APP_ID_TOKEN, "x"), (PREFIX_TOKEN, "y")]);

        prop_assert_eq!(out, text);
        prop_assert_eq!(count, 0);
    }
}
