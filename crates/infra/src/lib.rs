//! `afterschool-infra` — store implementations and fixtures.
//!
//! The domain crates define the storage contracts; this crate provides an
//! in-memory implementation (dev/test) and a Postgres implementation.

pub mod seed;
pub mod store;

#[cfg(test)]
mod integration_tests;

pub use store::in_memory::{InMemoryCatalogStore, InMemoryOrderStore};
pub use store::postgres::{PostgresCatalogStore, PostgresOrderStore, ensure_schema};
