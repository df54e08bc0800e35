//! Property tests for group names and entry points.

use proptest::prelude::*;

use hatch::domain::entities::{compiled_file_name, validate_group_name};
use hatch::domain::value_objects::EntryPoint;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: validation never panics, and accepted names are single
    /// path segments.
    #[test]
    fn property_accepted_group_names_are_single_segments(name in "(?s).{0,32}") {
        if validate_group_name(&name).is_ok() {
            prop_assert!(!name.is_empty());
            prop_assert!(!name.contains('/'));
            prop_assert!(!name.contains('\\'));
            prop_assert!(name != "." && name != "..");
        }
    }

    /// PROPERTY: plain identifiers are always valid group names.
    #[test]
    fn property_identifiers_are_valid_group_names(name in "[A-Za-z0-9_-]{1,24}") {
        prop_assert!(validate_group_name(&name).is_ok());
    }

    /// PROPERTY: compiled output keeps the source stem.
    #[test]
    fn property_compiled_name_keeps_stem(stem in "[a-z][a-z0-9_.]{0,16}[a-z0-9]") {
        let source = std::path::PathBuf::from(format!("src/ui/{stem}.blp"));
        prop_assert_eq!(compiled_file_name(&source), format!("{stem}.ui"));
    }

    /// PROPERTY: entry point parsing never panics and round-trips what it accepts.
    #[test]
    fn property_entry_point_round_trips(s in "(?s).{0,48}") {
        if let Ok(entry) = s.parse::<EntryPoint>() {
            prop_assert_eq!(entry.to_string(), s);
        }
    }
}
