//! Category registry
//!
//! Every resource type the tool can sweep is one variant of [`Category`],
//! and each variant carries a fixed [`CategorySpec`] describing how it is
//! selected on the command line, how it appears in log lines, and how its
//! listings are matched against the filter string. The set is closed: adding
//! a category means adding a variant here plus its list/delete arms in the
//! AWS adapter.

/// How a category's listing records are matched against the filter string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Identifier starts with the filter (plain-name identifiers).
    IdPrefix,
    /// Identifier contains the filter anywhere (ARN-only identifiers).
    IdContains,
    /// Last `/`-segment of the identifier starts with the filter
    /// (cluster-style ARNs).
    ArnSuffixPrefix,
    /// A separate name field starts with the filter; the identifier is
    /// what gets returned.
    NamePrefix,
    /// The record's group name, or a tag with key `Name`, starts with the
    /// filter. Records carrying neither never match.
    TagOrGroupName,
}

/// One resource category handled by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ec2Instances,
    EcsClusters,
    LambdaFunctions,
    StateMachines,
    SnsTopics,
    AmplifyApps,
    EcrRepositories,
    LoadBalancers,
    TargetGroups,
    CacheClusters,
    DbInstances,
    RedshiftClusters,
    SecurityGroups,
    Buckets,
    Secrets,
    Vpcs,
}

/// Static per-category configuration.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    /// Short key, doubling as the CLI flag name.
    pub key: &'static str,
    /// Human-readable singular name used to build log lines.
    pub resource_name: &'static str,
    pub strategy: MatchStrategy,
    /// Lifecycle state in which a resource needs no delete call. Only EC2
    /// instances expose one (`terminated`).
    pub terminal_state: Option<&'static str>,
}

impl Category {
    /// Every category, in the order categories are processed in a run.
    pub const ALL: [Category; 16] = [
        Category::Ec2Instances,
        Category::EcsClusters,
        Category::LambdaFunctions,
        Category::StateMachines,
        Category::SnsTopics,
        Category::AmplifyApps,
        Category::EcrRepositories,
        Category::LoadBalancers,
        Category::TargetGroups,
        Category::CacheClusters,
        Category::DbInstances,
        Category::RedshiftClusters,
        Category::SecurityGroups,
        Category::Buckets,
        Category::Secrets,
        Category::Vpcs,
    ];

    pub fn spec(self) -> &'static CategorySpec {
        match self {
            Category::Ec2Instances => &CategorySpec {
                key: "ec2",
                resource_name: "EC2 instance",
                strategy: MatchStrategy::TagOrGroupName,
                terminal_state: Some("terminated"),
            },
            Category::EcsClusters => &CategorySpec {
                key: "ecs",
                resource_name: "ECS cluster",
                strategy: MatchStrategy::ArnSuffixPrefix,
                terminal_state: None,
            },
            Category::LambdaFunctions => &CategorySpec {
                key: "lambda",
                resource_name: "Lambda function",
                strategy: MatchStrategy::IdPrefix,
                terminal_state: None,
            },
            Category::StateMachines => &CategorySpec {
                key: "step",
                resource_name: "Step Functions state machine",
                strategy: MatchStrategy::NamePrefix,
                terminal_state: None,
            },
            Category::SnsTopics => &CategorySpec {
                key: "sns",
                resource_name: "SNS topic",
                strategy: MatchStrategy::IdContains,
                terminal_state: None,
            },
            Category::AmplifyApps => &CategorySpec {
                key: "amplify",
                resource_name: "Amplify app",
                strategy: MatchStrategy::NamePrefix,
                terminal_state: None,
            },
            Category::EcrRepositories => &CategorySpec {
                key: "ecr",
                resource_name: "ECR repository",
                strategy: MatchStrategy::IdPrefix,
                terminal_state: None,
            },
            Category::LoadBalancers => &CategorySpec {
                key: "elb",
                resource_name: "load balancer",
                strategy: MatchStrategy::NamePrefix,
                terminal_state: None,
            },
            Category::TargetGroups => &CategorySpec {
                key: "tg",
                resource_name: "target group",
                strategy: MatchStrategy::NamePrefix,
                terminal_state: None,
            },
            Category::CacheClusters => &CategorySpec {
                key: "elasticache",
                resource_name: "ElastiCache cluster",
                strategy: MatchStrategy::IdPrefix,
                terminal_state: None,
            },
            Category::DbInstances => &CategorySpec {
                key: "rds",
                resource_name: "RDS instance",
                strategy: MatchStrategy::IdPrefix,
                terminal_state: None,
            },
            Category::RedshiftClusters => &CategorySpec {
                key: "redshift",
                resource_name: "Redshift cluster",
                strategy: MatchStrategy::IdPrefix,
                terminal_state: None,
            },
            Category::SecurityGroups => &CategorySpec {
                key: "sg",
                resource_name: "security group",
                strategy: MatchStrategy::TagOrGroupName,
                terminal_state: None,
            },
            Category::Buckets => &CategorySpec {
                key: "s3",
                resource_name: "S3 bucket",
                strategy: MatchStrategy::IdPrefix,
                terminal_state: None,
            },
            Category::Secrets => &CategorySpec {
                key: "secrets",
                resource_name: "secret",
                strategy: MatchStrategy::IdPrefix,
                terminal_state: None,
            },
            Category::Vpcs => &CategorySpec {
                key: "vpc",
                resource_name: "VPC",
                strategy: MatchStrategy::TagOrGroupName,
                terminal_state: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_category_has_a_spec() {
        for category in Category::ALL {
            let spec = category.spec();
            assert!(!spec.key.is_empty());
            assert!(!spec.resource_name.is_empty());
        }
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<&str> = Category::ALL.iter().map(|c| c.spec().key).collect();
        assert_eq!(keys.len(), Category::ALL.len(), "Category keys must be unique");
    }

    #[test]
    fn test_only_ec2_instances_have_a_terminal_state() {
        for category in Category::ALL {
            let expected = category == Category::Ec2Instances;
            assert_eq!(
                category.spec().terminal_state.is_some(),
                expected,
                "unexpected terminal state on {category:?}"
            );
        }
    }

    #[test]
    fn test_network_container_matches_on_tags() {
        assert_eq!(Category::Vpcs.spec().strategy, MatchStrategy::TagOrGroupName);
    }
}
