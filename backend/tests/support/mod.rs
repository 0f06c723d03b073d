//! Shared helpers for Diesel integration tests.
//!
//! Each test gets its own database cloned from a migrated template on the
//! embedded cluster. Setting `PAPERSIGN_TEST_DATABASE_URL` points the suites
//! at an external, already reachable server instead. When neither works the
//! suite fails unless `SKIP_TEST_CLUSTER` is set.
#![allow(dead_code, reason = "each suite uses a subset of the helpers")]

pub mod cluster_skip;
pub mod embedded_postgres;

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::sql_types::{BigInt, Nullable, Text, Timestamptz, Uuid as SqlUuid};
use diesel::{Connection, RunQueryDsl};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use uuid::Uuid;

use papersign::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

pub use cluster_skip::handle_cluster_setup_failure;

pub const TEST_DATABASE_ENV: &str = "PAPERSIGN_TEST_DATABASE_URL";

static EXTERNAL_MIGRATED: OnceLock<Result<(), String>> = OnceLock::new();

/// Database handed to one test; an embedded clone is dropped with it.
pub struct TestDatabase {
    url: String,
    _embedded: Option<TemporaryDatabase>,
}

impl TestDatabase {
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn external_database(url: String) -> Result<TestDatabase, String> {
    EXTERNAL_MIGRATED
        .get_or_init(|| {
            run_pending_migrations(&url)
                .map(|_| ())
                .map_err(|err| format!("migrate {TEST_DATABASE_ENV}: {err}"))
        })
        .clone()?;
    Ok(TestDatabase {
        url,
        _embedded: None,
    })
}

fn embedded_database() -> Result<TestDatabase, String> {
    let cluster = embedded_postgres::shared_cluster()?;
    let database = embedded_postgres::provision_database(cluster)?;
    Ok(TestDatabase {
        url: database.url().to_string(),
        _embedded: Some(database),
    })
}

fn provision() -> Option<TestDatabase> {
    let result = match std::env::var(TEST_DATABASE_ENV) {
        Ok(url) if !url.trim().is_empty() => external_database(url),
        _ => embedded_database(),
    };
    match result {
        Ok(database) => Some(database),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

/// Migrated database for one test, or `None` when the cluster is opted out.
///
/// Cluster bootstrap blocks, so it runs on the blocking pool.
pub async fn test_database() -> Option<TestDatabase> {
    tokio::task::spawn_blocking(provision)
        .await
        .unwrap_or_else(|err| std::panic::resume_unwind(err.into_panic()))
}

/// Small pool for one test.
pub async fn pool(url: &str) -> DbPool {
    DbPool::new(PoolConfig::new(url).with_max_size(2).with_min_idle(Some(1)))
        .await
        .expect("pool builds")
}

fn connect(url: &str) -> PgConnection {
    PgConnection::establish(url).expect("sync connection")
}

/// Insert a user row directly and return its id.
pub fn seed_user(url: &str, email: &str) -> Uuid {
    let id = Uuid::new_v4();
    diesel::sql_query(
        "INSERT INTO users (id, email, display_name, password_hash) VALUES ($1, $2, $3, $4)",
    )
    .bind::<SqlUuid, _>(id)
    .bind::<Text, _>(email)
    .bind::<Text, _>("Seeded user")
    .bind::<Text, _>("$argon2id$v=19$m=19456,t=2,p=1$c2VlZA$c2VlZA")
    .execute(&mut connect(url))
    .expect("insert user");
    id
}

/// Row values for [`seed_document`].
pub struct SeedDocument<'a> {
    pub owner: Uuid,
    pub name: &'a str,
    pub status: &'a str,
    pub size: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Insert a document row directly and return its id.
pub fn seed_document(url: &str, seed: SeedDocument<'_>) -> Uuid {
    let id = Uuid::new_v4();
    diesel::sql_query(
        "INSERT INTO documents (id, name, size, mime_type, file_key, status, owner_id, created_at, updated_at) \
         VALUES ($1, $2, $3, 'application/pdf', $4, $5, $6, $7, $7)",
    )
    .bind::<SqlUuid, _>(id)
    .bind::<Text, _>(seed.name)
    .bind::<Nullable<BigInt>, _>(seed.size)
    .bind::<Text, _>(format!("uploads/{id}.pdf"))
    .bind::<Text, _>(seed.status)
    .bind::<SqlUuid, _>(seed.owner)
    .bind::<Timestamptz, _>(seed.created_at)
    .execute(&mut connect(url))
    .expect("insert document");
    id
}

/// Unique email so suites do not collide on `users_email_key`.
pub fn unique_email(label: &str) -> String {
    format!("{label}-{}@example.com", Uuid::new_v4().simple())
}
