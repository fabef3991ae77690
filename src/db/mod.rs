//! Database layer
//!
//! This module provides database access for the AssetMagnets back-office:
//! - a SQLite connection pool created once at startup and closed on shutdown
//! - code-based migrations embedded in the binary
//! - one repository per entity exposing the typed CRUD contract
//!
//! Repositories are defined as traits so the SQLx implementations can be
//! swapped for the HTTP-backed implementations in `crate::client` without
//! touching callers.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool, ping, DbPool};
