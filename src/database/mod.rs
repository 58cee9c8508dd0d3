// ABOUTME: SQLite database connection, pool setup, and schema migrations
// ABOUTME: Table-specific queries live in the profiles, daily_logs, and estimations submodules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! `SQLite` storage for the engine. Schema creation is idempotent and runs on
//! every connect. Identifiers are stored as hyphenated UUID text and dates as
//! ISO-8601 `YYYY-MM-DD` text, so lexical order matches calendar order.

mod daily_logs;
mod estimations;
mod profiles;

pub use estimations::{EstimationCommit, GoalTargetUpdate, WindowWrite};

use crate::config::environment::DatabaseConfig;
use crate::errors::{AppError, AppResult, DatabaseError};
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// How long a writer waits on a locked database file
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database manager for profiles, goals, logs, and estimation windows
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect and run migrations
    ///
    /// In-memory databases use a single pooled connection that is never
    /// recycled, since each `SQLite` memory connection is a separate database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed, the connection fails, or a
    /// migration fails
    pub async fn new(database_url: &str, max_connections: u32) -> AppResult<Self> {
        let is_memory = database_url.contains(":memory:");
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL '{database_url}': {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool_options = if is_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionError {
                context: format!("connect: {e}"),
            })?;

        let db = Self { pool };
        db.migrate().await?;
        info!(memory = is_memory, "Database ready");
        Ok(db)
    }

    /// Connect using a [`DatabaseConfig`]
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        Self::new(&config.url.to_connection_string(), config.max_connections).await
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any `CREATE` statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        // Goals first: profiles reference them
        self.migrate_goals().await?;
        self.migrate_profiles().await?;
        self.migrate_daily_logs().await?;
        self.migrate_estimation_windows().await?;
        debug!("Database migrations complete");
        Ok(())
    }
}

fn migration_error(table: &str, e: &sqlx::Error) -> DatabaseError {
    DatabaseError::MigrationError {
        context: format!("{table}: {e}"),
    }
}

fn parse_uuid(value: &str, field: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(value).map_err(|e| DatabaseError::InvalidData {
        field: field.to_owned(),
        reason: format!("'{value}' is not a UUID: {e}"),
    })
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| DatabaseError::InvalidData {
        field: field.to_owned(),
        reason: format!("'{value}' is not a YYYY-MM-DD date: {e}"),
    })
}
