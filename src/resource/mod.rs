//! Resource abstraction layer
//!
//! Everything in this module is cloud-agnostic: the closed category
//! registry, the matcher, the plan/execute dispatcher, and the network
//! teardown sequencer all talk to the cloud only through the capability
//! traits defined here. The AWS adapter in [`crate::aws`] is the sole
//! implementor.
//!
//! # Architecture
//!
//! - [`category`] - closed enum of sweepable categories and their static specs
//! - [`filter`] - normalized listing records and the prefix/tag matcher
//! - [`dispatch`] - `run_category`, the plan/execute deletion dispatcher
//! - [`teardown`] - dependency-ordered VPC teardown sequencer

pub mod category;
pub mod dispatch;
pub mod filter;
pub mod teardown;

pub use category::{Category, CategorySpec, MatchStrategy};
pub use dispatch::{run_category, CategoryOps, CategoryOutcome, Mode};
pub use filter::{matching_ids, ResourceRecord, ResourceTag};
pub use teardown::{tear_down_network, NetworkOps, RouteTable};
