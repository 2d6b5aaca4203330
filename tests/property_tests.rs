/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
use proptest::prelude::*;
use serde_json::{json, Value};
use sim_lookup_api::errors::LookupError;
use sim_lookup_api::models::{LookupOutcome, NOT_AVAILABLE};
use sim_lookup_api::normalizer::{normalize, ACCESS_NOT_ALLOWED};
use sim_lookup_api::phone::canonicalize;

fn optional_field() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[A-Za-z0-9 -]{1,16}",
    ])
}

fn record_strategy() -> impl Strategy<Value = Value> {
    (
        prop::sample::select(vec!["number", "Mobile", "SUB_NO"]),
        optional_field(),
        prop::sample::select(vec!["name", "Name", "NAME"]),
        optional_field(),
        prop::sample::select(vec!["cnic", "CNIC", "NIC"]),
        optional_field(),
        prop::sample::select(vec!["address", "Address", "ADDRESS"]),
        optional_field(),
    )
        .prop_map(|(mk, mv, nk, nv, ck, cv, ak, av)| {
            let mut object = serde_json::Map::new();
            for (key, value) in [(mk, mv), (nk, nv), (ck, cv), (ak, av)] {
                if let Some(value) = value {
                    object.insert(key.to_string(), Value::String(value));
                }
            }
            Value::Object(object)
        })
}

// Property: canonicalization
proptest! {
    #[test]
    fn canonicalize_never_panics(input in "\\PC*") {
        let _ = canonicalize(&input);
    }

    #[test]
    fn eleven_digit_trunk_numbers_lose_leading_zero(rest in "[0-9]{10}") {
        let input = format!("0{}", rest);
        prop_assert_eq!(canonicalize(&input), rest);
    }

    #[test]
    fn other_lengths_are_identity_after_stripping(digits in "[0-9]{1,20}") {
        prop_assume!(!(digits.len() == 11 && digits.starts_with('0')));
        let spaced: String = digits.chars().flat_map(|c| [c, ' ']).collect();
        prop_assert_eq!(canonicalize(&spaced), digits);
    }

    #[test]
    fn canonical_form_has_no_whitespace(input in "[0-9 \\t]{0,30}") {
        prop_assert!(!canonicalize(&input).chars().any(char::is_whitespace));
    }
}

// Property: normalized records are always fully populated
proptest! {
    #[test]
    fn result_list_fields_never_empty(items in prop::collection::vec(record_strategy(), 0..8)) {
        let outcome = normalize(&json!({ "result": items }));
        for record in outcome.records() {
            for field in [&record.mobile, &record.name, &record.cnic, &record.address] {
                prop_assert!(!field.trim().is_empty());
            }
            prop_assert!(record.operator.is_some());
            prop_assert!(record.name != NOT_AVAILABLE || record.mobile != NOT_AVAILABLE);
        }
    }

    #[test]
    fn network_map_numbers_are_unique(
        first in prop::collection::vec(record_strategy(), 0..6),
        second in prop::collection::vec(record_strategy(), 0..6),
    ) {
        let outcome = normalize(&json!({ "Jazz": first, "Zong": second }));
        let mut seen = std::collections::HashSet::new();
        for record in outcome.records() {
            prop_assert!(record.mobile != NOT_AVAILABLE);
            prop_assert!(seen.insert(canonicalize(&record.mobile)));
            prop_assert!(record.operator.is_none());
        }
    }

    #[test]
    fn access_sentinel_always_denies(extra in "[a-z]{1,10}", value in "[A-Za-z0-9]{0,10}") {
        prop_assume!(extra != "result");
        let mut payload = json!({ "result": ACCESS_NOT_ALLOWED });
        payload[extra.as_str()] = Value::String(value);
        prop_assert_eq!(
            normalize(&payload),
            LookupOutcome::Failure(LookupError::AccessDenied)
        );
    }
}
