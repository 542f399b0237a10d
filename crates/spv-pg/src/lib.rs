//! PostgreSQL integration.
//!
//! ## Connectivity
//!
//! - [`db()`]: Establishes a database connection from a URL
//! - [`migrate()`]: Creates a table if missing
//!
//! ## Schema
//!
//! - [`Schema`]: Table metadata and DDL generation
//!
//! ## Table Names
//!
//! Constants for all persistent entities.
mod schema;

pub use schema::*;

use std::sync::Arc;
use tokio_postgres::Client;

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Establishes a database connection.
///
/// The connection task is spawned onto the current tokio runtime.
/// Returns an `Arc<Client>` suitable for sharing across workers.
pub async fn db(url: &str) -> Result<Arc<Client>, PgErr> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

/// Creates the table described by `S`, constraints and their indices
/// included.
pub async fn migrate<S: Schema>(client: &Client) -> Result<(), PgErr> {
    log::info!("migrating table {}", S::name());
    client.batch_execute(S::creates()).await
}

/// Table for registered user accounts and their credentials.
pub const USERS: &str = "users";
