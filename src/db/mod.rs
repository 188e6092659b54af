//! Database module
//!
//! Read-side SQLite access to foods and their measures.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
