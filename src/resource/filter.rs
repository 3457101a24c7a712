//! Prefix/tag matcher
//!
//! Listings arrive normalized as flat [`ResourceRecord`]s; this module picks
//! out the identifiers that satisfy the category's [`MatchStrategy`] for a
//! given filter string. Matching is pure and order-preserving: identifiers
//! come back in listing order, and a record contributes at most one
//! identifier no matter how many of its fields match.

use super::category::MatchStrategy;

/// One key/value tag on a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTag {
    pub key: String,
    pub value: String,
}

/// A single listed resource, reduced to the fields matching cares about.
#[derive(Debug, Clone, Default)]
pub struct ResourceRecord {
    /// Opaque identifier (name, id, or ARN) passed to the delete call.
    pub id: String,
    /// Separate human-readable name, where the listing exposes one.
    pub name: Option<String>,
    /// Security-group style group name.
    pub group_name: Option<String>,
    /// Tag collection; `None` when the listing carried none.
    pub tags: Option<Vec<ResourceTag>>,
}

impl ResourceRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Identifiers of the records matching `filter` under `strategy`, in
/// listing order.
pub fn matching_ids(
    records: &[ResourceRecord],
    filter: &str,
    strategy: MatchStrategy,
) -> Vec<String> {
    records
        .iter()
        .filter(|record| matches(record, filter, strategy))
        .map(|record| record.id.clone())
        .collect()
}

fn matches(record: &ResourceRecord, filter: &str, strategy: MatchStrategy) -> bool {
    match strategy {
        MatchStrategy::IdPrefix => record.id.starts_with(filter),
        MatchStrategy::IdContains => record.id.contains(filter),
        MatchStrategy::ArnSuffixPrefix => arn_suffix(&record.id).starts_with(filter),
        MatchStrategy::NamePrefix => record
            .name
            .as_deref()
            .is_some_and(|name| name.starts_with(filter)),
        MatchStrategy::TagOrGroupName => {
            let group_matches = record
                .group_name
                .as_deref()
                .is_some_and(|group| group.starts_with(filter));
            let tag_matches = record.tags.as_deref().is_some_and(|tags| {
                tags.iter()
                    .any(|tag| tag.key == "Name" && tag.value.starts_with(filter))
            });
            group_matches || tag_matches
        }
    }
}

/// Last `/`-segment of a cluster-style ARN, e.g.
/// `arn:aws:ecs:eu-west-1:123456789012:cluster/myapp-prod` -> `myapp-prod`.
fn arn_suffix(arn: &str) -> &str {
    arn.rsplit('/').next().unwrap_or(arn)
}
