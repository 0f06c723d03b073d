//! Embedded PostgreSQL for the Diesel suites.
//!
//! One cluster is shared per test binary. A template database carrying the
//! current migrations is created once, keyed by a hash of `migrations/`, and
//! every test clones its own database from it.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use uuid::Uuid;

use papersign::outbound::persistence::run_pending_migrations;

const TEMPLATE_PREFIX: &str = "papersign_template";
const PG_PASSWORD: &str = "papersign_embedded_test";
const RETRIES: usize = 5;
const RETRY_DELAY: Duration = Duration::from_millis(500);

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

/// Keep `PG_PASSWORD` stable so a reused data directory still accepts logins.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster bootstrap spawns threads; callers
        // hold the template lock.
        unsafe {
            std::env::set_var("PG_PASSWORD", PG_PASSWORD);
        }
    }
}

fn retry<T, E: std::fmt::Debug>(
    what: &str,
    mut attempt: impl FnMut() -> Result<T, E>,
) -> Result<T, String> {
    let mut last = String::new();
    for round in 1..=RETRIES {
        match attempt() {
            Ok(value) => return Ok(value),
            Err(err) => last = format!("{what}: attempt {round}/{RETRIES}: {err:?}"),
        }
        if round < RETRIES {
            std::thread::sleep(RETRY_DELAY);
        }
    }
    Err(last)
}

/// Process-wide cluster, started on first use.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());
    ensure_stable_password();
    retry("start cluster", pg_embedded_setup_unpriv::test_support::shared_cluster_handle)
}

fn template_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err:?}"))?;
    let short = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_PREFIX}_{short}"))
}

fn ensure_template(cluster: &ClusterHandle) -> Result<String, String> {
    let name = template_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());
    let exists = cluster
        .database_exists(name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&name);
        run_pending_migrations(&url).map_err(|err| format!("migrate template: {err}"))?;
    }
    Ok(name)
}

/// Fresh migrated database cloned from the template.
pub fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let template = ensure_template(cluster)?;
    retry("clone template", || {
        let name = format!("test_{}", Uuid::new_v4().simple());
        cluster.temporary_database_from_template(name.as_str(), template.as_str())
    })
}
