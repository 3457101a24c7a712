//! Deletion dispatcher
//!
//! `run_category` drives one category through list -> match -> report or
//! delete. The cloud API is reached only through [`CategoryOps`], so the
//! dispatcher itself never knows which service it is sweeping. Failures are
//! isolated per identifier: a delete that errors is logged and recorded in
//! the outcome, and the remaining identifiers are still attempted. Nothing
//! is retried and nothing is rolled back.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info};

use super::category::CategorySpec;
use super::filter::{matching_ids, ResourceRecord};

/// Plan reports what would be deleted; Execute deletes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Plan,
    Execute,
}

/// One category's view of the cloud API.
#[async_trait]
pub trait CategoryOps {
    /// Full single-page listing for the category.
    async fn list(&self) -> Result<Vec<ResourceRecord>>;

    /// Delete one resource.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Current lifecycle state, for categories that expose one.
    async fn state(&self, _id: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// What happened to each matched identifier.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CategoryOutcome {
    pub planned: Vec<String>,
    pub deleted: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

/// Run one category: list, match, then report (plan) or delete (execute).
///
/// A listing failure propagates and aborts the category; everything after
/// the listing is best-effort per identifier.
pub async fn run_category(
    ops: &dyn CategoryOps,
    spec: &CategorySpec,
    filter: &str,
    mode: Mode,
) -> Result<CategoryOutcome> {
    let records = ops.list().await?;
    let ids = matching_ids(&records, filter, spec.strategy);

    let mut outcome = CategoryOutcome::default();

    if ids.is_empty() {
        info!("No {}s found with prefix '{}'", spec.resource_name, filter);
        return Ok(outcome);
    }

    info!(
        "Found {} {}s with prefix '{}'",
        ids.len(),
        spec.resource_name,
        filter
    );

    match mode {
        Mode::Plan => {
            for id in &ids {
                info!("Planning to delete {}: {}", spec.resource_name, id);
            }
            outcome.planned = ids;
        }
        Mode::Execute => {
            for id in &ids {
                if skip_or_fail_on_state(ops, spec, id, &mut outcome).await {
                    continue;
                }

                info!("Deleting {}: {}", spec.resource_name, id);
                match ops.delete(id).await {
                    Ok(()) => outcome.deleted.push(id.clone()),
                    Err(e) => {
                        error!("Failed to delete {} {}: {:#}", spec.resource_name, id, e);
                        outcome.failed.push(id.clone());
                    }
                }
            }

            if !outcome.deleted.is_empty() {
                info!("Deleted {}s: {:?}", spec.resource_name, outcome.deleted);
            }
            if !outcome.failed.is_empty() {
                error!(
                    "Failed to delete {} {}s: {:?}",
                    outcome.failed.len(),
                    spec.resource_name,
                    outcome.failed
                );
            }
        }
    }

    Ok(outcome)
}

/// Probe the resource's lifecycle state where the category has a terminal
/// one. Returns true when the caller should move on to the next identifier,
/// either because the resource needs no delete call or because the probe
/// itself failed.
async fn skip_or_fail_on_state(
    ops: &dyn CategoryOps,
    spec: &CategorySpec,
    id: &str,
    outcome: &mut CategoryOutcome,
) -> bool {
    let Some(terminal) = spec.terminal_state else {
        return false;
    };

    match ops.state(id).await {
        Ok(Some(state)) if state == terminal => {
            info!(
                "{} {} is already {}, skipping",
                spec.resource_name, id, state
            );
            outcome.skipped.push(id.to_string());
            true
        }
        Ok(_) => false,
        Err(e) => {
            error!(
                "Failed to check state of {} {}: {:#}",
                spec.resource_name, id, e
            );
            outcome.failed.push(id.to_string());
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::category::Category;
    use crate::resource::filter::ResourceTag;
    use anyhow::anyhow;
    use std::sync::Mutex;

    /// In-memory stand-in for one category's cloud API, recording every
    /// mutating call it receives.
    struct FakeOps {
        records: Vec<ResourceRecord>,
        fail_on: Option<&'static str>,
        states: Vec<(&'static str, &'static str)>,
        deletes: Mutex<Vec<String>>,
        state_probes: Mutex<Vec<String>>,
    }

    impl FakeOps {
        fn with_records(records: Vec<ResourceRecord>) -> Self {
            Self {
                records,
                fail_on: None,
                states: Vec::new(),
                deletes: Mutex::new(Vec::new()),
                state_probes: Mutex::new(Vec::new()),
            }
        }

        fn deletes(&self) -> Vec<String> {
            self.deletes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CategoryOps for FakeOps {
        async fn list(&self) -> Result<Vec<ResourceRecord>> {
            Ok(self.records.clone())
        }

        async fn delete(&self, id: &str) -> Result<()> {
            self.deletes.lock().unwrap().push(id.to_string());
            if self.fail_on == Some(id) {
                return Err(anyhow!("AccessDenied"));
            }
            Ok(())
        }

        async fn state(&self, id: &str) -> Result<Option<String>> {
            self.state_probes.lock().unwrap().push(id.to_string());
            Ok(self
                .states
                .iter()
                .find(|(probe_id, _)| *probe_id == id)
                .map(|(_, state)| state.to_string()))
        }
    }

    fn named_records(names: &[&str]) -> Vec<ResourceRecord> {
        names.iter().map(|n| ResourceRecord::new(*n)).collect()
    }

    #[tokio::test]
    async fn test_plan_mode_never_deletes() {
        let ops = FakeOps::with_records(named_records(&["staging-a", "staging-b"]));
        let spec = Category::Buckets.spec();

        let outcome = run_category(&ops, spec, "staging", Mode::Plan).await.unwrap();

        assert_eq!(outcome.planned, vec!["staging-a", "staging-b"]);
        assert!(ops.deletes().is_empty());
    }

    #[tokio::test]
    async fn test_no_matches_reports_and_returns() {
        let ops = FakeOps::with_records(named_records(&["prod-a"]));
        let spec = Category::Buckets.spec();

        let outcome = run_category(&ops, spec, "staging", Mode::Execute)
            .await
            .unwrap();

        assert_eq!(outcome, CategoryOutcome::default());
        assert!(ops.deletes().is_empty());
    }

    #[tokio::test]
    async fn test_failure_in_the_middle_keeps_going() {
        let mut ops = FakeOps::with_records(named_records(&[
            "staging-a",
            "staging-b",
            "staging-c",
        ]));
        ops.fail_on = Some("staging-b");
        let spec = Category::Buckets.spec();

        let outcome = run_category(&ops, spec, "staging", Mode::Execute)
            .await
            .unwrap();

        assert_eq!(
            ops.deletes(),
            vec!["staging-a", "staging-b", "staging-c"],
            "the third identifier must still be attempted"
        );
        assert_eq!(outcome.deleted, vec!["staging-a", "staging-c"]);
        assert_eq!(outcome.failed, vec!["staging-b"]);
    }

    #[tokio::test]
    async fn test_terminated_instance_is_skipped_not_deleted() {
        let records = vec![ResourceRecord {
            id: "i-0dead".to_string(),
            tags: Some(vec![ResourceTag {
                key: "Name".to_string(),
                value: "staging-worker".to_string(),
            }]),
            ..ResourceRecord::default()
        }];
        let mut ops = FakeOps::with_records(records);
        ops.states = vec![("i-0dead", "terminated")];
        let spec = Category::Ec2Instances.spec();

        let outcome = run_category(&ops, spec, "staging", Mode::Execute)
            .await
            .unwrap();

        assert!(ops.deletes().is_empty());
        assert_eq!(outcome.skipped, vec!["i-0dead"]);
        assert!(outcome.failed.is_empty());
    }

    #[tokio::test]
    async fn test_running_instance_is_deleted() {
        let records = vec![ResourceRecord {
            id: "i-0live".to_string(),
            tags: Some(vec![ResourceTag {
                key: "Name".to_string(),
                value: "staging-worker".to_string(),
            }]),
            ..ResourceRecord::default()
        }];
        let mut ops = FakeOps::with_records(records);
        ops.states = vec![("i-0live", "running")];
        let spec = Category::Ec2Instances.spec();

        let outcome = run_category(&ops, spec, "staging", Mode::Execute)
            .await
            .unwrap();

        assert_eq!(ops.deletes(), vec!["i-0live"]);
        assert_eq!(outcome.deleted, vec!["i-0live"]);
    }

    #[tokio::test]
    async fn test_state_probe_only_happens_for_ec2() {
        let ops = FakeOps::with_records(named_records(&["staging-a"]));
        let spec = Category::Buckets.spec();

        run_category(&ops, spec, "staging", Mode::Execute)
            .await
            .unwrap();

        assert!(ops.state_probes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_run_with_nothing_left_is_a_no_op() {
        let ops = FakeOps::with_records(Vec::new());
        let spec = Category::Buckets.spec();

        for _ in 0..2 {
            let outcome = run_category(&ops, spec, "staging", Mode::Execute)
                .await
                .unwrap();
            assert_eq!(outcome, CategoryOutcome::default());
        }
        assert!(ops.deletes().is_empty());
    }

    #[tokio::test]
    async fn test_listing_failure_aborts_the_category() {
        struct BrokenList;

        #[async_trait]
        impl CategoryOps for BrokenList {
            async fn list(&self) -> Result<Vec<ResourceRecord>> {
                Err(anyhow!("ThrottlingException"))
            }

            async fn delete(&self, _id: &str) -> Result<()> {
                panic!("delete must not be reached when listing fails");
            }
        }

        let spec = Category::Buckets.spec();
        let result = run_category(&BrokenList, spec, "staging", Mode::Execute).await;
        assert!(result.is_err());
    }
}
