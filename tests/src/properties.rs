//! # Property and Statistical Tests
//!
//! The probabilistic contract, checked over generated inputs: membership is
//! never lost, hash outputs always land in range, persistence never changes
//! an answer, and the observed false positive rate stays in the
//! neighborhood the sizing formulas promise.

#[cfg(test)]
mod tests {
    use proptest::collection::vec;
    use proptest::prelude::*;

    use bloom_core::{BitArray, BloomFilter, HashAlgorithm, HasherList};

    fn algorithm_strategy() -> impl Strategy<Value = HashAlgorithm> {
        prop_oneof![
            Just(HashAlgorithm::HmacSha256),
            Just(HashAlgorithm::HmacSha512),
            Just(HashAlgorithm::Murmur3),
            Just(HashAlgorithm::SipHash24),
        ]
    }

    proptest! {
        #[test]
        fn prop_added_items_are_always_found(
            items in vec(vec(any::<u8>(), 0..64), 1..32),
        ) {
            let mut filter = BloomFilter::new(64, 0.01).unwrap();
            for item in &items {
                filter.add(item).unwrap();
            }
            for item in &items {
                prop_assert!(filter.contains(item).unwrap());
            }
        }

        #[test]
        fn prop_hash_indices_stay_in_range(
            algorithm in algorithm_strategy(),
            count in 1usize..12,
            max_result in 1usize..100_000,
            item in vec(any::<u8>(), 0..128),
        ) {
            let hashers = HasherList::new(algorithm, count, max_result).unwrap();
            let indices = hashers.hash(&item);
            prop_assert_eq!(indices.len(), count);
            for index in indices {
                prop_assert!(index < max_result);
            }
        }

        #[test]
        fn prop_hashing_is_deterministic(
            algorithm in algorithm_strategy(),
            item in vec(any::<u8>(), 0..128),
        ) {
            let hashers = HasherList::new(algorithm, 7, 8192).unwrap();
            prop_assert_eq!(hashers.hash(&item), hashers.hash(&item));
        }

        #[test]
        fn prop_round_trip_never_changes_an_answer(
            members in vec(vec(any::<u8>(), 0..32), 0..20),
            probes in vec(vec(any::<u8>(), 0..32), 0..20),
        ) {
            let mut filter = BloomFilter::new(32, 0.05).unwrap();
            for member in &members {
                filter.add(member).unwrap();
            }

            let json = serde_json::to_string(&filter).unwrap();
            let restored: BloomFilter = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(&restored, &filter);

            for probe in members.iter().chain(probes.iter()) {
                prop_assert_eq!(
                    restored.contains(probe).unwrap(),
                    filter.contains(probe).unwrap()
                );
            }
        }

        #[test]
        fn prop_bit_array_round_trip_is_exact(
            length in 0usize..512,
            set_indices in vec(any::<usize>(), 0..32),
        ) {
            let mut array = BitArray::new(length);
            for raw in &set_indices {
                if length > 0 {
                    array.set(raw % length, true).unwrap();
                }
            }

            let json = serde_json::to_string(&array).unwrap();
            let restored: BitArray = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(&restored, &array);
            prop_assert_eq!(restored.len(), length);
            prop_assert_eq!(restored.byte_len(), length.div_ceil(8));
        }
    }

    // =========================================================================
    // STATISTICAL BEHAVIOR
    // =========================================================================

    #[test]
    fn test_false_positive_rate_is_bounded() {
        let mut filter = BloomFilter::new(1000, 0.01).unwrap();
        for i in 0..1000 {
            filter.add(format!("member_{i:05}").as_bytes()).unwrap();
        }

        let probes = 100_000u32;
        let mut false_positives = 0u32;
        for i in 0..probes {
            if filter.contains(format!("absent_{i:06}").as_bytes()).unwrap() {
                false_positives += 1;
            }
        }

        // Target rate is 1%; anything within an order of magnitude passes.
        let observed = f64::from(false_positives) / f64::from(probes);
        assert!(observed < 0.1, "rate {observed} far above the 0.01 target");
        assert!(
            observed > 0.001,
            "rate {observed} suspiciously far below the 0.01 target"
        );
    }

    #[test]
    fn test_hash_positions_spread_across_the_array() {
        // 1000 items through k rounds should land roughly uniformly across
        // ten equal slices of the array.
        let hashers = HasherList::new(HashAlgorithm::HmacSha256, 7, 9585).unwrap();
        let mut counts = [0usize; 10];
        for i in 0..1000 {
            for position in hashers.hash(format!("element_{i}").as_bytes()) {
                counts[position * 10 / 9585] += 1;
            }
        }

        let expected = 700;
        for (bucket, count) in counts.iter().enumerate() {
            assert!(
                *count >= expected / 2 && *count <= expected * 3 / 2,
                "bucket {bucket} has {count} positions, expected ~{expected}"
            );
        }
    }

    #[test]
    fn test_estimated_fpr_tracks_the_target_at_capacity() {
        let mut filter = BloomFilter::new(1000, 0.01).unwrap();
        for i in 0..1000 {
            filter.add(format!("member_{i:05}").as_bytes()).unwrap();
        }

        let estimate = filter.estimated_fpr();
        assert!(
            estimate > 0.001 && estimate < 0.1,
            "estimate {estimate} should sit near the 0.01 target"
        );
    }
}
