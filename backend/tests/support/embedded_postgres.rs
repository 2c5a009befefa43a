//! Per-test databases on the shared embedded cluster.
//!
//! Each database is created empty and brought up to date with the crate's
//! embedded migrations, so test schemas never drift from production.

use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use weight_journey::outbound::persistence::run_pending_migrations_blocking;

/// Create a temporary database and apply every migration to it.
///
/// The database is dropped with the returned handle.
pub fn provision_migrated_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let database_name = format!("test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(database_name.as_str())
        .map_err(|err| format!("create temporary database: {err:?}"))?;
    run_pending_migrations_blocking(database.url())
        .map_err(|err| format!("migrate temporary database: {err}"))?;
    Ok(database)
}
