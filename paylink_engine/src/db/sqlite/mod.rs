//! # SQLite backend
//!
//! [`SqliteDatabase`] implements every storage trait in [`crate::traits`] on top of an `sqlx` connection pool.
//!
//! The "low-level" table interactions live in the [`merchants`], [`products`] and [`transactions`] modules as plain
//! functions that accept a `&mut SqliteConnection`. Callers obtain a connection from the pool, or open an atomic
//! transaction, and call through to them without any other changes.
use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Error as SqlxError,
    SqlitePool,
};

pub mod merchants;
pub mod products;
pub mod transactions;

mod sqlite_impl;

pub use sqlite_impl::SqliteDatabase;

/// Opens a connection pool, creating the database file if it does not exist yet.
pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}
