//! Property-based tests for the template engine and validator
//!
//! These tests verify invariants that should hold for all inputs, not just
//! the hand-picked templates of the unit tests.


use faultline_core::{TemplateEngine, TokenBag, Validator};
use proptest::prelude::*;
use test_support::capitalize;

// Strategy functions for property testing

/// Token names: lowercase letters only
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// Token values that contain no brace syntax
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?]{0,16}"
}

/// Bags with distinct names, in generation order
fn bag_strategy() -> impl Strategy<Value = TokenBag> {
    proptest::collection::vec((name_strategy(), value_strategy()), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// Templates referencing every key of a bag, with literal text between
fn covered_strategy() -> impl Strategy<Value = (String, TokenBag)> {
    (
        proptest::collection::vec((name_strategy(), value_strategy()), 1..6),
        "[a-zA-Z .,]{0,12}",
    )
        .prop_map(|(pairs, filler)| {
            let template = pairs
                .iter()
                .map(|(name, _)| format!("{}{{{}}}", filler, capitalize(name)))
                .collect::<String>();
            let bag: TokenBag = pairs.into_iter().collect();
            (template, bag)
        })
}

proptest! {
    /// Property: text without brace syntax passes through for any bag
    #[test]
    fn prop_plain_text_is_unchanged(
        text in "[a-zA-Z0-9 .,!?:;'-]{0,80}",
        bag in bag_strategy(),
    ) {
        prop_assert_eq!(TemplateEngine::render(&text, Some(&bag)), text.clone());
        prop_assert_eq!(TemplateEngine::render(&text, None), text);
    }

    /// Property: a fully covered template leaves no placeholder behind
    #[test]
    fn prop_covered_template_is_fully_resolved((template, bag) in covered_strategy()) {
        let rendering = TemplateEngine::render_detailed(&template, Some(&bag));
        prop_assert!(!rendering.is_degraded());
        prop_assert!(
            !rendering.text.contains(['{', '}']),
            "residual brace in {:?}",
            rendering.text
        );
    }

    /// Property: a single missing token returns the template exactly
    #[test]
    fn prop_missing_token_returns_template(
        (template, bag) in covered_strategy(),
        position in 0usize..2,
    ) {
        let template = if position == 0 {
            format!("{{Absent9}} {}", template)
        } else {
            format!("{} {{Absent9:D2}}", template)
        };
        let rendering = TemplateEngine::render_detailed(&template, Some(&bag));
        prop_assert!(rendering.is_degraded());
        prop_assert_eq!(rendering.text, template);
    }

    /// Property: doubled braces are never token boundaries
    #[test]
    fn prop_escaped_braces_are_literal(name in name_strategy(), value in value_strategy()) {
        let template = format!("{{{{{}}}}}", capitalize(&name));
        let bag = TokenBag::new().with(name.clone(), value);
        let rendering = TemplateEngine::render_detailed(&template, Some(&bag));
        prop_assert!(!rendering.is_degraded());
        prop_assert_eq!(rendering.text, format!("{{{}}}", capitalize(&name)));
    }

    /// Property: rendering a resolved string again changes nothing
    #[test]
    fn prop_render_is_idempotent_on_output((template, bag) in covered_strategy()) {
        let once = TemplateEngine::render(&template, Some(&bag));
        let twice = TemplateEngine::render(&once, Some(&bag));
        prop_assert_eq!(once, twice);
    }

    /// Property: has_errors is exactly "some rule failed", and every rule runs
    #[test]
    fn prop_validator_verdict(conditions in proptest::collection::vec(any::<bool>(), 0..12)) {
        let ctx = test_support::english();
        let mut validator = Validator::new(&ctx);
        for condition in &conditions {
            validator.validate("validation-error", None, *condition);
        }

        let failures = conditions.iter().filter(|ok| !**ok).count();
        prop_assert_eq!(validator.rules_evaluated(), conditions.len());
        prop_assert_eq!(validator.messages().len(), failures);
        prop_assert_eq!(validator.has_errors(), failures > 0);
    }
}
