//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - Repository implementations only translate between Diesel rows and domain
//!   types. No business rules live here.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Every database failure is mapped to the port's error type.
//!
//! # Example
//!
//! ```ignore
//! use papersign::outbound::persistence::{DbPool, DieselDocumentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/papersign")).await?;
//! let documents = DieselDocumentRepository::new(pool);
//! ```

mod diesel_document_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_document_repository::DieselDocumentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, migrate, run_pending_migrations};
pub use pool::{DEFAULT_POOL_SIZE, DbPool, PoolConfig, PoolError};
