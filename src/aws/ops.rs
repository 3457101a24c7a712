//! Per-category SDK dispatch
//!
//! [`CategoryClient`] is the only implementor of the dispatcher's
//! [`CategoryOps`] boundary: one listing arm and one delete arm per
//! category, each a single typed SDK call whose output is normalized into
//! [`ResourceRecord`]s. The VPC delete arm hands over to the teardown
//! sequencer instead of issuing a bare delete.

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::clients::AwsClients;
use crate::resource::category::Category;
use crate::resource::dispatch::CategoryOps;
use crate::resource::filter::{ResourceRecord, ResourceTag};
use crate::resource::teardown;

/// One category's handle on the AWS API.
pub struct CategoryClient<'a> {
    clients: &'a AwsClients,
    category: Category,
}

impl<'a> CategoryClient<'a> {
    pub fn new(clients: &'a AwsClients, category: Category) -> Self {
        Self { clients, category }
    }
}

#[async_trait]
impl CategoryOps for CategoryClient<'_> {
    async fn list(&self) -> Result<Vec<ResourceRecord>> {
        let c = self.clients;
        match self.category {
            Category::Ec2Instances => list_ec2_instances(c).await,
            Category::EcsClusters => list_ecs_clusters(c).await,
            Category::LambdaFunctions => list_lambda_functions(c).await,
            Category::StateMachines => list_state_machines(c).await,
            Category::SnsTopics => list_sns_topics(c).await,
            Category::AmplifyApps => list_amplify_apps(c).await,
            Category::EcrRepositories => list_ecr_repositories(c).await,
            Category::LoadBalancers => list_load_balancers(c).await,
            Category::TargetGroups => list_target_groups(c).await,
            Category::CacheClusters => list_cache_clusters(c).await,
            Category::DbInstances => list_db_instances(c).await,
            Category::RedshiftClusters => list_redshift_clusters(c).await,
            Category::SecurityGroups => list_security_groups(c).await,
            Category::Buckets => list_buckets(c).await,
            Category::Secrets => list_secrets(c).await,
            Category::Vpcs => list_vpcs(c).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let c = self.clients;
        match self.category {
            Category::Ec2Instances => {
                c.ec2
                    .terminate_instances()
                    .instance_ids(id)
                    .send()
                    .await
                    .context("terminating EC2 instance")?;
            }
            Category::EcsClusters => {
                c.ecs
                    .delete_cluster()
                    .cluster(id)
                    .send()
                    .await
                    .context("deleting ECS cluster")?;
            }
            Category::LambdaFunctions => {
                c.lambda
                    .delete_function()
                    .function_name(id)
                    .send()
                    .await
                    .context("deleting Lambda function")?;
            }
            Category::StateMachines => {
                c.sfn
                    .delete_state_machine()
                    .state_machine_arn(id)
                    .send()
                    .await
                    .context("deleting state machine")?;
            }
            Category::SnsTopics => {
                c.sns
                    .delete_topic()
                    .topic_arn(id)
                    .send()
                    .await
                    .context("deleting SNS topic")?;
            }
            Category::AmplifyApps => {
                c.amplify
                    .delete_app()
                    .app_id(id)
                    .send()
                    .await
                    .context("deleting Amplify app")?;
            }
            Category::EcrRepositories => {
                c.ecr
                    .delete_repository()
                    .repository_name(id)
                    .force(true)
                    .send()
                    .await
                    .context("deleting ECR repository")?;
            }
            Category::LoadBalancers => {
                c.elbv2
                    .delete_load_balancer()
                    .load_balancer_arn(id)
                    .send()
                    .await
                    .context("deleting load balancer")?;
            }
            Category::TargetGroups => {
                c.elbv2
                    .delete_target_group()
                    .target_group_arn(id)
                    .send()
                    .await
                    .context("deleting target group")?;
            }
            Category::CacheClusters => {
                c.elasticache
                    .delete_cache_cluster()
                    .cache_cluster_id(id)
                    .send()
                    .await
                    .context("deleting ElastiCache cluster")?;
            }
            Category::DbInstances => {
                c.rds
                    .delete_db_instance()
                    .db_instance_identifier(id)
                    .skip_final_snapshot(true)
                    .send()
                    .await
                    .context("deleting RDS instance")?;
            }
            Category::RedshiftClusters => {
                c.redshift
                    .delete_cluster()
                    .cluster_identifier(id)
                    .skip_final_snapshot(true)
                    .send()
                    .await
                    .context("deleting Redshift cluster")?;
            }
            Category::SecurityGroups => {
                c.ec2
                    .delete_security_group()
                    .group_id(id)
                    .send()
                    .await
                    .context("deleting security group")?;
            }
            Category::Buckets => {
                c.s3
                    .delete_bucket()
                    .bucket(id)
                    .send()
                    .await
                    .context("deleting S3 bucket")?;
            }
            Category::Secrets => {
                c.secretsmanager
                    .delete_secret()
                    .secret_id(id)
                    .force_delete_without_recovery(true)
                    .send()
                    .await
                    .context("deleting secret")?;
            }
            // A VPC only deletes once its dependents are gone.
            Category::Vpcs => teardown::tear_down_network(c, id).await?,
        }
        Ok(())
    }

    async fn state(&self, id: &str) -> Result<Option<String>> {
        if self.category != Category::Ec2Instances {
            return Ok(None);
        }

        let out = self
            .clients
            .ec2
            .describe_instances()
            .instance_ids(id)
            .send()
            .await
            .context("checking EC2 instance state")?;

        let state = out
            .reservations()
            .iter()
            .flat_map(|reservation| reservation.instances())
            .find_map(|instance| {
                instance
                    .state()
                    .and_then(|s| s.name())
                    .map(|name| name.as_str().to_string())
            });

        Ok(state)
    }
}

// =============================================================================
// EC2
// =============================================================================

async fn list_ec2_instances(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .ec2
        .describe_instances()
        .send()
        .await
        .context("listing EC2 instances")?;

    // Instances arrive grouped by reservation; flatten before matching.
    let records = out
        .reservations()
        .iter()
        .flat_map(|reservation| reservation.instances())
        .filter_map(|instance| {
            let id = instance.instance_id()?;
            Some(ResourceRecord {
                id: id.to_string(),
                tags: ec2_tags(instance.tags()),
                ..ResourceRecord::default()
            })
        })
        .collect();
    Ok(records)
}

async fn list_security_groups(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .ec2
        .describe_security_groups()
        .send()
        .await
        .context("listing security groups")?;

    let records = out
        .security_groups()
        .iter()
        .filter_map(|group| {
            let id = group.group_id()?;
            Some(ResourceRecord {
                id: id.to_string(),
                group_name: group.group_name().map(str::to_string),
                tags: ec2_tags(group.tags()),
                ..ResourceRecord::default()
            })
        })
        .collect();
    Ok(records)
}

async fn list_vpcs(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c.ec2.describe_vpcs().send().await.context("listing VPCs")?;

    let records = out
        .vpcs()
        .iter()
        .filter_map(|vpc| {
            let id = vpc.vpc_id()?;
            Some(ResourceRecord {
                id: id.to_string(),
                tags: ec2_tags(vpc.tags()),
                ..ResourceRecord::default()
            })
        })
        .collect();
    Ok(records)
}

fn ec2_tags(tags: &[aws_sdk_ec2::types::Tag]) -> Option<Vec<ResourceTag>> {
    if tags.is_empty() {
        return None;
    }
    Some(
        tags.iter()
            .filter_map(|tag| {
                Some(ResourceTag {
                    key: tag.key()?.to_string(),
                    value: tag.value()?.to_string(),
                })
            })
            .collect(),
    )
}

// =============================================================================
// Containers and functions
// =============================================================================

async fn list_ecs_clusters(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .ecs
        .list_clusters()
        .send()
        .await
        .context("listing ECS clusters")?;

    Ok(out
        .cluster_arns()
        .iter()
        .map(ResourceRecord::new)
        .collect())
}

async fn list_ecr_repositories(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .ecr
        .describe_repositories()
        .send()
        .await
        .context("listing ECR repositories")?;

    let records = out
        .repositories()
        .iter()
        .filter_map(|repo| repo.repository_name())
        .map(ResourceRecord::new)
        .collect();
    Ok(records)
}

async fn list_lambda_functions(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .lambda
        .list_functions()
        .send()
        .await
        .context("listing Lambda functions")?;

    let records = out
        .functions()
        .iter()
        .filter_map(|function| function.function_name())
        .map(ResourceRecord::new)
        .collect();
    Ok(records)
}

async fn list_state_machines(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .sfn
        .list_state_machines()
        .send()
        .await
        .context("listing state machines")?;

    let records = out
        .state_machines()
        .iter()
        .map(|machine| ResourceRecord::new(machine.state_machine_arn()).with_name(machine.name()))
        .collect();
    Ok(records)
}

async fn list_amplify_apps(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .amplify
        .list_apps()
        .send()
        .await
        .context("listing Amplify apps")?;

    let records = out
        .apps()
        .iter()
        .map(|app| ResourceRecord::new(app.app_id()).with_name(app.name()))
        .collect();
    Ok(records)
}

// =============================================================================
// Messaging
// =============================================================================

async fn list_sns_topics(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .sns
        .list_topics()
        .send()
        .await
        .context("listing SNS topics")?;

    let records = out
        .topics()
        .iter()
        .filter_map(|topic| topic.topic_arn())
        .map(ResourceRecord::new)
        .collect();
    Ok(records)
}

// =============================================================================
// Load balancing
// =============================================================================

async fn list_load_balancers(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .elbv2
        .describe_load_balancers()
        .send()
        .await
        .context("listing load balancers")?;

    let records = out
        .load_balancers()
        .iter()
        .filter_map(|lb| {
            let arn = lb.load_balancer_arn()?;
            let mut record = ResourceRecord::new(arn);
            if let Some(name) = lb.load_balancer_name() {
                record = record.with_name(name);
            }
            Some(record)
        })
        .collect();
    Ok(records)
}

async fn list_target_groups(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .elbv2
        .describe_target_groups()
        .send()
        .await
        .context("listing target groups")?;

    let records = out
        .target_groups()
        .iter()
        .filter_map(|tg| {
            let arn = tg.target_group_arn()?;
            let mut record = ResourceRecord::new(arn);
            if let Some(name) = tg.target_group_name() {
                record = record.with_name(name);
            }
            Some(record)
        })
        .collect();
    Ok(records)
}

// =============================================================================
// Data stores
// =============================================================================

async fn list_cache_clusters(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .elasticache
        .describe_cache_clusters()
        .send()
        .await
        .context("listing ElastiCache clusters")?;

    let records = out
        .cache_clusters()
        .iter()
        .filter_map(|cluster| cluster.cache_cluster_id())
        .map(ResourceRecord::new)
        .collect();
    Ok(records)
}

async fn list_db_instances(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .rds
        .describe_db_instances()
        .send()
        .await
        .context("listing RDS instances")?;

    let records = out
        .db_instances()
        .iter()
        .filter_map(|db| db.db_instance_identifier())
        .map(ResourceRecord::new)
        .collect();
    Ok(records)
}

async fn list_redshift_clusters(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .redshift
        .describe_clusters()
        .send()
        .await
        .context("listing Redshift clusters")?;

    let records = out
        .clusters()
        .iter()
        .filter_map(|cluster| cluster.cluster_identifier())
        .map(ResourceRecord::new)
        .collect();
    Ok(records)
}

async fn list_buckets(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .s3
        .list_buckets()
        .send()
        .await
        .context("listing S3 buckets")?;

    let records = out
        .buckets()
        .iter()
        .filter_map(|bucket| bucket.name())
        .map(ResourceRecord::new)
        .collect();
    Ok(records)
}

async fn list_secrets(c: &AwsClients) -> Result<Vec<ResourceRecord>> {
    let out = c
        .secretsmanager
        .list_secrets()
        .send()
        .await
        .context("listing secrets")?;

    let records = out
        .secret_list()
        .iter()
        .filter_map(|secret| secret.name())
        .map(ResourceRecord::new)
        .collect();
    Ok(records)
}
