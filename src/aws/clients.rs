//! AWS client bundle
//!
//! One typed client per service the tool can sweep, all built from a single
//! shared `SdkConfig`. Credentials and the default region come from the
//! standard provider chain (environment, profile, IMDS); the CLI's
//! `--region`/`--profile` overrides are applied here before the chain runs.

use anyhow::Result;
use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Every service client the sweep can touch.
#[derive(Clone)]
pub struct AwsClients {
    pub amplify: aws_sdk_amplify::Client,
    pub ec2: aws_sdk_ec2::Client,
    pub ecr: aws_sdk_ecr::Client,
    pub ecs: aws_sdk_ecs::Client,
    pub elasticache: aws_sdk_elasticache::Client,
    pub elbv2: aws_sdk_elasticloadbalancingv2::Client,
    pub lambda: aws_sdk_lambda::Client,
    pub rds: aws_sdk_rds::Client,
    pub redshift: aws_sdk_redshift::Client,
    pub s3: aws_sdk_s3::Client,
    pub secretsmanager: aws_sdk_secretsmanager::Client,
    pub sfn: aws_sdk_sfn::Client,
    pub sns: aws_sdk_sns::Client,
}

impl AwsClients {
    /// Resolve shared AWS configuration and build all service clients.
    pub async fn new(region: Option<String>, profile: Option<String>) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        let conf = loader.load().await;

        Ok(Self::from_conf(&conf))
    }

    /// Build all clients from an already-resolved configuration. Tests use
    /// this to point every client at a mocked endpoint.
    pub fn from_conf(conf: &SdkConfig) -> Self {
        Self {
            amplify: aws_sdk_amplify::Client::new(conf),
            ec2: aws_sdk_ec2::Client::new(conf),
            ecr: aws_sdk_ecr::Client::new(conf),
            ecs: aws_sdk_ecs::Client::new(conf),
            elasticache: aws_sdk_elasticache::Client::new(conf),
            elbv2: aws_sdk_elasticloadbalancingv2::Client::new(conf),
            lambda: aws_sdk_lambda::Client::new(conf),
            rds: aws_sdk_rds::Client::new(conf),
            redshift: aws_sdk_redshift::Client::new(conf),
            s3: aws_sdk_s3::Client::new(conf),
            secretsmanager: aws_sdk_secretsmanager::Client::new(conf),
            sfn: aws_sdk_sfn::Client::new(conf),
            sns: aws_sdk_sns::Client::new(conf),
        }
    }
}
