//! Property tests for resource manifest derivation.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use hatch::domain::entities::{CompiledAsset, ResourceManifest, SourceGroup};
use hatch::domain::value_objects::BuildLayout;

fn layout() -> BuildLayout {
    BuildLayout::new("/project", "_build", "_venv", "app")
}

fn group_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_-]{0,11}").unwrap()
}

fn source_stems() -> impl Strategy<Value = Vec<String>> {
    let stem = proptest::string::string_regex("[a-z][a-z0-9_]{0,11}").unwrap();
    proptest::collection::btree_set(stem, 0..6).prop_map(|stems| stems.into_iter().collect())
}

fn groups() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    proptest::collection::vec((group_name(), source_stems()), 0..5)
}

fn assets_for(groups: &[(String, Vec<String>)]) -> Vec<CompiledAsset> {
    let layout = layout();
    groups
        .iter()
        .flat_map(|(name, stems)| {
            let sources: Vec<PathBuf> = stems
                .iter()
                .map(|s| PathBuf::from(format!("/project/src/ui/{name}/{s}.blp")))
                .collect();
            let input = Path::new("/project/src/ui").join(name);
            SourceGroup::new(name.clone(), input, sources, &layout)
                .unwrap()
                .expected_assets()
        })
        .collect()
}

fn relative(asset: &CompiledAsset) -> String {
    layout()
        .relative_to_build(asset.path())
        .unwrap_or_default()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: one manifest entry per compiled source plus one per stylesheet.
    #[test]
    fn property_entry_count_matches_inputs(
        groups in groups(),
        styles in proptest::collection::vec("[a-z]{1,8}\\.css", 0..4),
    ) {
        let assets = assets_for(&groups);
        let styles: Vec<(String, String)> = styles
            .iter()
            .map(|s| (s.clone(), format!("css/{s}")))
            .collect();

        let manifest = ResourceManifest::from_assets("/org/example/App", &assets, &styles, relative);

        let sources: usize = groups.iter().map(|(_, stems)| stems.len()).sum();
        prop_assert_eq!(manifest.len(), sources + styles.len());
    }

    /// PROPERTY: compiled entries keep group order, then source order, and
    /// stylesheets come last.
    #[test]
    fn property_entries_follow_group_then_source_order(
        groups in groups(),
        styles in proptest::collection::vec("[a-z]{1,8}\\.css", 0..4),
    ) {
        let assets = assets_for(&groups);
        let styles: Vec<(String, String)> = styles
            .iter()
            .map(|s| (s.clone(), format!("css/{s}")))
            .collect();

        let manifest = ResourceManifest::from_assets("/org/example/App", &assets, &styles, relative);

        let expected: Vec<String> = groups
            .iter()
            .flat_map(|(name, stems)| stems.iter().map(move |s| format!("ui/{name}/{s}.ui")))
            .chain(styles.iter().map(|(logical, _)| logical.clone()))
            .collect();
        let actual: Vec<String> = manifest
            .entries()
            .iter()
            .map(|e| e.logical_path().to_string())
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// PROPERTY: serialization is deterministic and well-formed enough to
    /// open and close every element it writes.
    #[test]
    fn property_xml_is_deterministic(groups in groups()) {
        let assets = assets_for(&groups);
        let a = ResourceManifest::from_assets("/org/example/App", &assets, &[], relative);
        let b = ResourceManifest::from_assets("/org/example/App", &assets, &[], relative);

        let xml = a.to_xml();
        prop_assert_eq!(&xml, &b.to_xml());
        prop_assert_eq!(xml.matches("<file").count(), a.len());
        prop_assert_eq!(xml.matches("</file>").count(), a.len());
        prop_assert!(xml.ends_with("</gresources>\n"));
    }
}
