//! AWS adapter
//!
//! The only code that talks to AWS. Builds one typed client per service
//! from a shared configuration and implements the two capability traits
//! the cloud-agnostic core dispatches through.
//!
//! # Module Structure
//!
//! - [`clients`] - shared configuration and the per-service client bundle
//! - [`ops`] - per-category list/delete/state dispatch ([`CategoryClient`])
//! - [`network`] - VPC-scoped EC2 calls backing the teardown sequencer

pub mod clients;
pub mod network;
pub mod ops;

pub use clients::AwsClients;
pub use ops::CategoryClient;
