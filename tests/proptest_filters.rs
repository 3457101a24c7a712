//! Property-based tests using proptest
//!
//! These tests verify the matcher over randomized listings: ordering,
//! subset behavior, and the per-strategy matching semantics.

use proptest::prelude::*;

use awsweep::resource::{matching_ids, MatchStrategy, ResourceRecord, ResourceTag};

/// Generate a plausible resource name
fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,20}"
}

/// Generate a listing of plain-name records
fn arb_named_records() -> impl Strategy<Value = Vec<ResourceRecord>> {
    prop::collection::vec(arb_name().prop_map(ResourceRecord::new), 0..50)
}

/// True when `sub` appears in `full` in order (not necessarily contiguous)
fn is_subsequence(sub: &[String], full: &[String]) -> bool {
    let mut remaining = full.iter();
    sub.iter()
        .all(|wanted| remaining.any(|candidate| candidate == wanted))
}

proptest! {
    /// Matched identifiers always form a subsequence of the listing order,
    /// for every strategy
    #[test]
    fn matches_preserve_listing_order(
        records in arb_named_records(),
        filter in "[a-z]{0,5}"
    ) {
        let listing_order: Vec<String> =
            records.iter().map(|r| r.id.clone()).collect();

        for strategy in [
            MatchStrategy::IdPrefix,
            MatchStrategy::IdContains,
            MatchStrategy::ArnSuffixPrefix,
            MatchStrategy::NamePrefix,
            MatchStrategy::TagOrGroupName,
        ] {
            let ids = matching_ids(&records, &filter, strategy);
            prop_assert!(is_subsequence(&ids, &listing_order));
        }
    }

    /// Prefix matching returns exactly the identifiers starting with the
    /// filter
    #[test]
    fn id_prefix_is_exact(
        records in arb_named_records(),
        filter in "[a-z]{0,5}"
    ) {
        let ids = matching_ids(&records, &filter, MatchStrategy::IdPrefix);

        for id in &ids {
            prop_assert!(id.starts_with(&filter));
        }
        let expected = records.iter().filter(|r| r.id.starts_with(&filter)).count();
        prop_assert_eq!(ids.len(), expected);
    }

    /// The empty filter matches every plain-name record
    #[test]
    fn empty_filter_matches_all_named(records in arb_named_records()) {
        let ids = matching_ids(&records, "", MatchStrategy::IdPrefix);
        prop_assert_eq!(ids.len(), records.len());
    }

    /// Matching the matched set again yields the same identifiers
    #[test]
    fn matching_is_idempotent(
        records in arb_named_records(),
        filter in "[a-z]{0,5}"
    ) {
        let once = matching_ids(&records, &filter, MatchStrategy::IdPrefix);
        let rematched: Vec<ResourceRecord> =
            once.iter().map(ResourceRecord::new).collect();
        let twice = matching_ids(&rematched, &filter, MatchStrategy::IdPrefix);
        prop_assert_eq!(once, twice);
    }
}

/// Tests for cluster-style ARN suffix matching
mod arn_suffix_tests {
    use super::*;

    fn cluster_arn(name: &str) -> String {
        format!("arn:aws:ecs:eu-west-1:123456789012:cluster/{name}")
    }

    proptest! {
        /// Only the segment after the last slash is consulted
        #[test]
        fn suffix_decides_the_match(
            names in prop::collection::vec(arb_name(), 0..30),
            filter in "[a-z]{1,4}"
        ) {
            let records: Vec<ResourceRecord> = names
                .iter()
                .map(|n| ResourceRecord::new(cluster_arn(n)))
                .collect();

            let ids = matching_ids(&records, &filter, MatchStrategy::ArnSuffixPrefix);
            let expected: Vec<String> = names
                .iter()
                .filter(|n| n.starts_with(&filter))
                .map(|n| cluster_arn(n))
                .collect();
            prop_assert_eq!(ids, expected);
        }

        /// Region and account never cause a match
        #[test]
        fn arn_body_is_ignored(name in arb_name()) {
            let records = vec![ResourceRecord::new(cluster_arn(&name))];
            // "arn" prefixes the full identifier but never the suffix
            let ids = matching_ids(&records, "arn:aws", MatchStrategy::ArnSuffixPrefix);
            prop_assert!(ids.is_empty());
        }
    }
}

/// Tests for tag and group-name matching
mod tag_matching_tests {
    use super::*;

    fn arb_tags() -> impl Strategy<Value = Vec<ResourceTag>> {
        prop::collection::vec(
            (arb_name(), arb_name()).prop_map(|(key, value)| ResourceTag { key, value }),
            0..5,
        )
    }

    proptest! {
        /// A record with neither a group name nor tags never matches,
        /// whatever the filter
        #[test]
        fn bare_records_never_match(
            id in arb_name(),
            filter in "[a-z]{0,5}"
        ) {
            let records = vec![ResourceRecord::new(id)];
            let ids = matching_ids(&records, &filter, MatchStrategy::TagOrGroupName);
            prop_assert!(ids.is_empty());
        }

        /// Tags under keys other than `Name` are invisible to the matcher
        #[test]
        fn only_the_name_key_counts(
            id in arb_name(),
            tags in arb_tags(),
            filter in "[a-z]{1,5}"
        ) {
            let relevant = tags
                .iter()
                .any(|t| t.key == "Name" && t.value.starts_with(&filter));

            let records = vec![ResourceRecord {
                id: id.clone(),
                tags: Some(tags),
                ..ResourceRecord::default()
            }];
            let ids = matching_ids(&records, &filter, MatchStrategy::TagOrGroupName);

            prop_assert_eq!(!ids.is_empty(), relevant);
        }

        /// A record is returned at most once even when both the group name
        /// and a Name tag match
        #[test]
        fn no_duplicate_identifiers(
            id in arb_name(),
            value in "[a-z]{1,8}"
        ) {
            let records = vec![ResourceRecord {
                id,
                group_name: Some(value.clone()),
                tags: Some(vec![ResourceTag {
                    key: "Name".to_string(),
                    value: value.clone(),
                }]),
                ..ResourceRecord::default()
            }];

            let ids = matching_ids(&records, &value[..1], MatchStrategy::TagOrGroupName);
            prop_assert_eq!(ids.len(), 1);
        }
    }
}
