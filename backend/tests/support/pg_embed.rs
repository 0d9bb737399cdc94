//! Embedded PostgreSQL bootstrap for the Diesel adapter suites.
//!
//! `pg-embed-setup-unpriv` installs into `/var/tmp` unless `PG_RUNTIME_DIR`
//! and `PG_DATA_DIR` are set. When either is missing both are pointed at
//! unique directories under the target directory for the duration of the
//! bootstrap, with environment mutation serialised across parallel tests.
//!
//! Set `SKIP_TEST_CLUSTER=1` to skip suites when the cluster cannot start;
//! otherwise a failed bootstrap fails the test.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use finance_backend::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;
use uuid::Uuid;

static PG_EMBED_BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;
const DATABASE_NAME: &str = "postgres";

fn pg_embed_target_dir() -> PathBuf {
    if let Some(target_dir) = std::env::var_os("CARGO_TARGET_DIR") {
        return PathBuf::from(target_dir).join("pg-embed");
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("pg-embed")
}

fn create_unique_pg_embed_dirs() -> Result<(PathBuf, PathBuf), std::io::Error> {
    let unique = format!("bootstrap-{}-{}", std::process::id(), Uuid::new_v4());
    let base = pg_embed_target_dir().join(unique);
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");

    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;

    Ok((runtime_dir, data_dir))
}

fn is_transient_error(err: &str) -> bool {
    let err_lower = err.to_lowercase();
    [
        "error decoding response body",
        "connection reset",
        "connection refused",
        "timed out",
        "timeout",
        "temporarily unavailable",
        "dns error",
    ]
    .iter()
    .any(|pattern| err_lower.contains(pattern))
}

/// Start a cluster, retrying transient download failures.
fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap_guard = PG_EMBED_BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();

    let _env_guard = if needs_override {
        let (runtime_dir, data_dir) =
            create_unique_pg_embed_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt < MAX_RETRIES && is_transient_error(&last_error) {
                    let delay = Duration::from_millis(RETRY_DELAY_MS * (1 << attempt));
                    eprintln!(
                        "pg-embed: transient error on attempt {}/{}, retrying in {delay:?}: {last_error}",
                        attempt + 1,
                        MAX_RETRIES + 1,
                    );
                    std::thread::sleep(delay);
                } else {
                    break;
                }
            }
        }
    }

    Err(last_error)
}

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// A migrated database with a pool and the runtime that drives it.
///
/// Fields drop in declaration order, so the pool closes before the cluster
/// stops.
pub struct EmbeddedDatabase {
    pub pool: DbPool,
    pub runtime: Runtime,
    _cluster: TestCluster,
}

fn setup(max_connections: u32) -> Result<EmbeddedDatabase, String> {
    let cluster = test_cluster()?;
    let url = cluster.connection().database_url(DATABASE_NAME);
    let runtime = Runtime::new().map_err(|err| err.to_string())?;

    runtime
        .block_on(apply_migrations(&url))
        .map_err(|err| err.to_string())?;
    let config = PoolConfig::new(url)
        .with_max_size(max_connections)
        .with_connection_timeout(Duration::from_secs(10));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(EmbeddedDatabase {
        pool,
        runtime,
        _cluster: cluster,
    })
}

/// Bootstrap a fresh cluster with the schema applied.
///
/// Returns `None` only when the cluster is unavailable and
/// `SKIP_TEST_CLUSTER` is set. Must be called outside a Tokio runtime.
pub fn embedded_database(max_connections: u32) -> Option<EmbeddedDatabase> {
    match setup(max_connections) {
        Ok(database) => Some(database),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
