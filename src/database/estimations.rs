// ABOUTME: Database operations for expenditure estimation windows
// ABOUTME: Window lookups plus the atomic window-and-goal commit used by catch-up and retroactive runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::profiles::write_goal_target;
use super::{migration_error, parse_date, parse_uuid, Database};
use crate::database_plugins::transactions::SqliteTransactionGuard;
use crate::errors::{AppError, AppResult, DatabaseError, ErrorCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tdee_core::models::EstimationWindow;
use tracing::debug;
use uuid::Uuid;

/// Window change written by one estimation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowWrite {
    /// Insert a new window
    Create(EstimationWindow),
    /// Recompute an existing window; its bounds stay fixed
    Update {
        /// Window to update
        window_id: Uuid,
        /// New estimate (kcal/day)
        estimated_expenditure: f64,
        /// New mean body weight
        reference_weight: f64,
    },
}

/// New weekly target for a goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalTargetUpdate {
    /// Goal to update
    pub goal_id: Uuid,
    /// Weekly change in the profile's weight unit
    pub weekly_weight_change_target: f64,
}

/// Everything one estimation run persists, committed as a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationCommit {
    /// Profile the window belongs to
    pub profile_id: Uuid,
    /// Window insert or update
    pub window: WindowWrite,
    /// Goal target recomputed from the new reference weight
    pub goal_target: GoalTargetUpdate,
}

impl Database {
    pub(super) async fn migrate_estimation_windows(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS estimation_windows (
                id TEXT PRIMARY KEY,
                profile_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                estimated_expenditure REAL NOT NULL,
                reference_weight REAL NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                CHECK (start_date <= end_date)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("estimation_windows", &e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_estimation_windows_profile_start ON estimation_windows(profile_id, start_date)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("estimation_windows", &e))?;
        Ok(())
    }

    /// List a profile's windows ordered by `start_date` ascending
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn list_estimation_windows(&self, profile_id: Uuid) -> AppResult<Vec<EstimationWindow>> {
        let rows = sqlx::query(
            r"
            SELECT id, profile_id, start_date, end_date, estimated_expenditure, reference_weight
            FROM estimation_windows
            WHERE profile_id = ?
            ORDER BY start_date ASC
            ",
        )
        .bind(profile_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::query(format!("list estimation windows: {e}")))?;

        rows.iter().map(row_to_window).collect()
    }

    /// Find the window whose inclusive bounds contain `date`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn find_window_containing(
        &self,
        profile_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<EstimationWindow>> {
        let row = sqlx::query(
            r"
            SELECT id, profile_id, start_date, end_date, estimated_expenditure, reference_weight
            FROM estimation_windows
            WHERE profile_id = ? AND start_date <= ? AND end_date >= ?
            ORDER BY start_date ASC
            LIMIT 1
            ",
        )
        .bind(profile_id.to_string())
        .bind(date.to_string())
        .bind(date.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::query(format!("find estimation window: {e}")))?;

        row.as_ref().map(row_to_window).transpose()
    }

    /// Get the window with the latest `end_date`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn get_latest_window(&self, profile_id: Uuid) -> AppResult<Option<EstimationWindow>> {
        let row = sqlx::query(
            r"
            SELECT id, profile_id, start_date, end_date, estimated_expenditure, reference_weight
            FROM estimation_windows
            WHERE profile_id = ?
            ORDER BY end_date DESC
            LIMIT 1
            ",
        )
        .bind(profile_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::query(format!("get latest estimation window: {e}")))?;

        row.as_ref().map(row_to_window).transpose()
    }

    /// Persist a window write and the goal target in one transaction
    ///
    /// A new window that would overlap an existing one is rejected. If any
    /// statement fails the transaction rolls back and prior state is kept.
    ///
    /// # Errors
    ///
    /// Returns an error on overlap, a missing window or goal, or a failed write
    pub async fn commit_estimation(&self, commit: &EstimationCommit) -> AppResult<()> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionError {
                context: format!("begin failed: {e}"),
            })?;
        let mut guard = SqliteTransactionGuard::new(tx);

        match &commit.window {
            WindowWrite::Create(window) => {
                if window.profile_id != commit.profile_id {
                    return Err(AppError::invalid_input(format!(
                        "Window {} belongs to profile {}, not {}",
                        window.id, window.profile_id, commit.profile_id
                    )));
                }
                insert_window(guard.executor()?, window).await?;
            }
            WindowWrite::Update {
                window_id,
                estimated_expenditure,
                reference_weight,
            } => {
                update_window(
                    guard.executor()?,
                    commit.profile_id,
                    *window_id,
                    *estimated_expenditure,
                    *reference_weight,
                )
                .await?;
            }
        }

        write_goal_target(
            guard.executor()?,
            commit.goal_target.goal_id,
            commit.goal_target.weekly_weight_change_target,
        )
        .await?;

        guard.commit().await?;
        debug!(profile_id = %commit.profile_id, "Estimation committed");
        Ok(())
    }
}

async fn insert_window(conn: &mut SqliteConnection, window: &EstimationWindow) -> AppResult<()> {
    let overlapping: i64 = sqlx::query_scalar(
        r"
        SELECT COUNT(*) FROM estimation_windows
        WHERE profile_id = ? AND start_date <= ? AND end_date >= ?
        ",
    )
    .bind(window.profile_id.to_string())
    .bind(window.end_date.to_string())
    .bind(window.start_date.to_string())
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| DatabaseError::query(format!("check window overlap: {e}")))?;

    if overlapping > 0 {
        return Err(AppError::new(
            ErrorCode::ResourceAlreadyExists,
            format!(
                "Window {}..={} overlaps an existing window",
                window.start_date, window.end_date
            ),
        ));
    }

    sqlx::query(
        r"
        INSERT INTO estimation_windows (
            id, profile_id, start_date, end_date, estimated_expenditure, reference_weight
        )
        VALUES (?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(window.id.to_string())
    .bind(window.profile_id.to_string())
    .bind(window.start_date.to_string())
    .bind(window.end_date.to_string())
    .bind(window.estimated_expenditure)
    .bind(window.reference_weight)
    .execute(&mut *conn)
    .await
    .map_err(|e| DatabaseError::query(format!("create estimation window: {e}")))?;
    Ok(())
}

async fn update_window(
    conn: &mut SqliteConnection,
    profile_id: Uuid,
    window_id: Uuid,
    estimated_expenditure: f64,
    reference_weight: f64,
) -> AppResult<()> {
    if !estimated_expenditure.is_finite() || !reference_weight.is_finite() {
        return Err(AppError::invalid_input(
            "Window estimate and reference weight must be finite",
        ));
    }

    let result = sqlx::query(
        r"
        UPDATE estimation_windows
        SET estimated_expenditure = ?, reference_weight = ?, updated_at = CURRENT_TIMESTAMP
        WHERE id = ? AND profile_id = ?
        ",
    )
    .bind(estimated_expenditure)
    .bind(reference_weight)
    .bind(window_id.to_string())
    .bind(profile_id.to_string())
    .execute(&mut *conn)
    .await
    .map_err(|e| DatabaseError::query(format!("update estimation window: {e}")))?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "estimation window",
            entity_id: window_id.to_string(),
        }
        .into());
    }
    Ok(())
}

fn row_to_window(row: &SqliteRow) -> AppResult<EstimationWindow> {
    let id: String = row.get("id");
    let profile_id: String = row.get("profile_id");
    let start_date: String = row.get("start_date");
    let end_date: String = row.get("end_date");

    Ok(EstimationWindow {
        id: parse_uuid(&id, "window id")?,
        profile_id: parse_uuid(&profile_id, "profile id")?,
        start_date: parse_date(&start_date, "window start date")?,
        end_date: parse_date(&end_date, "window end date")?,
        estimated_expenditure: row.get("estimated_expenditure"),
        reference_weight: row.get("reference_weight"),
    })
}
