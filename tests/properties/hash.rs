//! Property tests for build fingerprints.

use proptest::prelude::*;

use hatch::domain::value_objects::ContentHash;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: hashing is deterministic.
    #[test]
    fn property_hash_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(ContentHash::from_bytes(&bytes), ContentHash::from_bytes(&bytes));
    }

    /// PROPERTY: moving the boundary between parts changes the fingerprint.
    #[test]
    fn property_part_boundaries_matter(
        bytes in proptest::collection::vec(any::<u8>(), 2..64),
        split in 1usize..63,
    ) {
        let split = split.min(bytes.len() - 1);
        let (a, b) = bytes.split_at(split);
        let whole: &[u8] = &bytes;

        prop_assert_ne!(
            ContentHash::from_parts([a, b]),
            ContentHash::from_parts([whole])
        );
    }

    /// PROPERTY: `new` accepts its own output unchanged.
    #[test]
    fn property_new_is_idempotent(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let hash = ContentHash::from_bytes(&bytes);
        prop_assert_eq!(ContentHash::new(hash.as_str()), hash.clone());
        prop_assert_eq!(hash.hex().len(), 64);
    }
}
