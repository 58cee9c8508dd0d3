// ABOUTME: RAII transaction guard that rolls back unless explicitly committed
// ABOUTME: Keeps window and goal writes all-or-nothing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Transaction management with an RAII guard
//!
//! ```text
//! let tx = pool.begin().await?;
//! let mut guard = SqliteTransactionGuard::new(tx);
//!
//! sqlx::query("INSERT INTO estimation_windows ...").execute(guard.executor()?).await?;
//! sqlx::query("UPDATE goals ...").execute(guard.executor()?).await?;
//!
//! // If this line isn't reached, the transaction rolls back
//! guard.commit().await?;
//! ```

use crate::errors::{AppError, AppResult, DatabaseError};
use sqlx::{Database, Transaction};
use tracing::{debug, warn};

/// RAII guard for database transactions ensuring rollback on drop
///
/// Dropping the guard without calling [`commit`](Self::commit) rolls the
/// transaction back, so an early `?` return never leaves a partial write.
pub struct TransactionGuard<'c, DB: Database> {
    transaction: Option<Transaction<'c, DB>>,
}

impl<'c, DB: Database> TransactionGuard<'c, DB> {
    /// Wrap a transaction obtained from `pool.begin().await`
    #[must_use]
    pub fn new(transaction: Transaction<'c, DB>) -> Self {
        debug!("TransactionGuard created");
        Self {
            transaction: Some(transaction),
        }
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails
    pub async fn commit(mut self) -> AppResult<()> {
        let tx = self
            .transaction
            .take()
            .ok_or_else(|| AppError::internal("Transaction already consumed - cannot commit"))?;
        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionError {
                context: format!("commit failed: {e}"),
            })?;
        debug!("TransactionGuard committed");
        Ok(())
    }

    /// Connection for executing queries inside the transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already committed
    pub fn executor(&mut self) -> AppResult<&mut <DB as Database>::Connection> {
        self.transaction.as_deref_mut().ok_or_else(|| {
            AppError::internal("Transaction already consumed - guard used after commit")
        })
    }
}

impl<DB: Database> Drop for TransactionGuard<'_, DB> {
    fn drop(&mut self) {
        if self.transaction.is_some() {
            warn!("TransactionGuard dropped without commit - rolling back");
        }
    }
}

/// `SQLite` transaction guard
pub type SqliteTransactionGuard<'c> = TransactionGuard<'c, sqlx::Sqlite>;
