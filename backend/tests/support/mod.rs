//! Shared embedded PostgreSQL helpers for integration tests.
//!
//! Each suite gets a fresh temporary database on the process-wide embedded
//! cluster, migrated with the same embedded migrations the server applies at
//! startup.

use std::time::Duration;

use bookshelf::outbound::persistence::run_migrations;
use pg_embedded_setup_unpriv::{BootstrapResult, ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Returns the shared cluster handle, retrying while a sibling test process
/// is still bootstrapping the same data directory.
pub fn shared_cluster_handle() -> BootstrapResult<&'static ClusterHandle> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= SHARED_CLUSTER_RETRIES => return Err(error),
            Err(_) => {
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Creates a temporary database and applies all migrations to it.
pub fn provision_migrated_database(runtime: &Runtime) -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| err.to_string())?;
    let database = cluster
        .temporary_database(format!("test_{}", uuid::Uuid::new_v4().simple()))
        .map_err(|err| format!("create temporary database: {err:?}"))?;
    runtime
        .block_on(run_migrations(database.url()))
        .map_err(|err| format!("migrate: {err}"))?;
    Ok(database)
}

/// Returns true when `SKIP_TEST_CLUSTER` is set to "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handles embedded cluster setup failures consistently across suites.
///
/// With `SKIP_TEST_CLUSTER` set, prints a skip marker and returns `None`;
/// otherwise panics so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
