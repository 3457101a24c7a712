use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use awsweep::aws::{AwsClients, CategoryClient};
use awsweep::config::Config;
use awsweep::resource::{run_category, Category, Mode};

/// Bulk cleanup for AWS accounts: find and delete resources matching a
/// name prefix across services. Runs in plan mode unless --execute is given.
#[derive(Parser, Debug)]
#[command(name = "awsweep", version, about, long_about = None)]
struct Args {
    /// Name prefix to match resources against
    #[arg(short, long)]
    prefix: String,

    /// Actually delete matched resources (default is plan mode)
    #[arg(long)]
    execute: bool,

    /// Sweep every resource category
    #[arg(long)]
    all: bool,

    /// Sweep EC2 instances (matched by Name tag)
    #[arg(long)]
    ec2: bool,

    /// Sweep ECS clusters
    #[arg(long)]
    ecs: bool,

    /// Sweep Lambda functions
    #[arg(long)]
    lambda: bool,

    /// Sweep Step Functions state machines
    #[arg(long)]
    step: bool,

    /// Sweep SNS topics
    #[arg(long)]
    sns: bool,

    /// Sweep Amplify apps
    #[arg(long)]
    amplify: bool,

    /// Sweep ECR repositories
    #[arg(long)]
    ecr: bool,

    /// Sweep application/network load balancers
    #[arg(long)]
    elb: bool,

    /// Sweep ELBv2 target groups
    #[arg(long)]
    tg: bool,

    /// Sweep ElastiCache clusters
    #[arg(long)]
    elasticache: bool,

    /// Sweep RDS instances
    #[arg(long)]
    rds: bool,

    /// Sweep Redshift clusters
    #[arg(long)]
    redshift: bool,

    /// Sweep security groups (matched by group name or Name tag)
    #[arg(long)]
    sg: bool,

    /// Sweep S3 buckets
    #[arg(long)]
    s3: bool,

    /// Sweep Secrets Manager secrets
    #[arg(long)]
    secrets: bool,

    /// Sweep VPCs, emptying each one before deleting it
    #[arg(long)]
    vpc: bool,

    /// AWS region override
    #[arg(long)]
    region: Option<String>,

    /// AWS credentials profile
    #[arg(long)]
    profile: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

impl Args {
    fn selected(&self, category: Category) -> bool {
        if self.all {
            return true;
        }
        match category {
            Category::Ec2Instances => self.ec2,
            Category::EcsClusters => self.ecs,
            Category::LambdaFunctions => self.lambda,
            Category::StateMachines => self.step,
            Category::SnsTopics => self.sns,
            Category::AmplifyApps => self.amplify,
            Category::EcrRepositories => self.ecr,
            Category::LoadBalancers => self.elb,
            Category::TargetGroups => self.tg,
            Category::CacheClusters => self.elasticache,
            Category::DbInstances => self.rds,
            Category::RedshiftClusters => self.redshift,
            Category::SecurityGroups => self.sg,
            Category::Buckets => self.s3,
            Category::Secrets => self.secrets,
            Category::Vpcs => self.vpc,
        }
    }

    fn selected_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|&category| self.selected(category))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Log to an append-only run log and to the console, timestamped.
fn setup_logging(level: LogLevel) -> tracing_appender::non_blocking::WorkerGuard {
    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .expect("Failed to open log file");

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(level.to_tracing_level())
        .with_writer(non_blocking.and(std::io::stdout))
        .with_ansi(false)
        .with_target(false)
        .init();

    info!("Run log: {:?}", log_path);

    guard
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("awsweep").join("awsweep.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".awsweep").join("awsweep.log");
    }
    PathBuf::from("awsweep.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let selected = args.selected_categories();
    if selected.is_empty() {
        anyhow::bail!("No resource categories selected. Pass --all or one or more category flags.");
    }

    let config = Config::load();
    let region = args.region.clone().or_else(|| config.region.clone());
    let profile = args.profile.clone().or_else(|| config.profile.clone());

    let clients = AwsClients::new(region, profile).await?;

    let mode = if args.execute {
        Mode::Execute
    } else {
        Mode::Plan
    };

    for category in selected {
        let spec = category.spec();
        match mode {
            Mode::Execute => info!(
                "Executing {} deletion with prefix '{}'",
                spec.resource_name, args.prefix
            ),
            Mode::Plan => info!(
                "Planning {} deletion with prefix '{}'",
                spec.resource_name, args.prefix
            ),
        }

        let ops = CategoryClient::new(&clients, category);
        // One category's failure must not stop the rest of the run.
        if let Err(e) = run_category(&ops, spec, &args.prefix, mode).await {
            error!("{} sweep failed: {:#}", spec.resource_name, e);
        }
    }

    Ok(())
}
