//! wp-db - Database client layer for Waypoint
//!
//! This crate provides the `PsqlExecutor` implementation of the wp-core
//! `Executor` trait, running migration scripts through the PostgreSQL
//! command-line client.

pub mod psql;

pub use psql::PsqlExecutor;
