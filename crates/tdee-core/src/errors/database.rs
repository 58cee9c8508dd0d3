// ABOUTME: Structured error types for database operations
// ABOUTME: Provides domain-specific errors with context and conversion into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Could not open or acquire a connection
    #[error("Database connection failed: {context}")]
    ConnectionError {
        /// What was being connected to
        context: String,
    },

    /// A query or command failed
    #[error("Database query failed: {context}")]
    QueryError {
        /// Operation that failed
        context: String,
    },

    /// Schema migration failed
    #[error("Database migration failed: {context}")]
    MigrationError {
        /// Migration step that failed
        context: String,
    },

    /// A row that must exist was missing
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        /// Kind of entity (profile, goal, window)
        entity_type: &'static str,
        /// Identifier that was looked up
        entity_id: String,
    },

    /// A stored row could not be turned into a domain record
    #[error("Invalid stored data in {field}: {reason}")]
    InvalidData {
        /// Column or field name
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Transaction could not be committed or rolled back
    #[error("Transaction failed: {context}")]
    TransactionError {
        /// Transaction step that failed
        context: String,
    },
}

impl DatabaseError {
    /// Build a query error with the given context
    pub fn query(context: impl Into<String>) -> Self {
        Self::QueryError {
            context: context.into(),
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        let code = match &error {
            DatabaseError::NotFound { .. } => ErrorCode::ResourceNotFound,
            DatabaseError::InvalidData { .. } => ErrorCode::StorageError,
            DatabaseError::ConnectionError { .. }
            | DatabaseError::QueryError { .. }
            | DatabaseError::MigrationError { .. }
            | DatabaseError::TransactionError { .. } => ErrorCode::DatabaseError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_resource_not_found() {
        let error: AppError = DatabaseError::NotFound {
            entity_type: "goal",
            entity_id: "abc".to_owned(),
        }
        .into();
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert!(error.message.contains("goal not found: abc"));
    }

    #[test]
    fn test_query_error_is_store_failure() {
        let error: AppError = DatabaseError::query("insert estimation window").into();
        assert!(error.code.is_store_failure());
    }
}
