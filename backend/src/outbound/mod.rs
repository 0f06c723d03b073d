//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//!
//! Adapters are thin translators between domain types and storage
//! representations. They contain no business logic.

pub mod persistence;
