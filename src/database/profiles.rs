// ABOUTME: Database operations for profiles and goals
// ABOUTME: Onboarding inserts, profile/goal lookups, and the weekly target update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{migration_error, parse_uuid, Database};
use crate::database_plugins::transactions::SqliteTransactionGuard;
use crate::errors::{AppError, AppResult, DatabaseError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tdee_core::models::{Approach, Goal, GoalType, MeasurementSystem, Profile, Sex};
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_goals(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS goals (
                id TEXT PRIMARY KEY,
                goal_type TEXT NOT NULL CHECK (goal_type IN ('build_muscle', 'lose_fat', 'maintain')),
                approach TEXT NOT NULL CHECK (approach IN ('bulk', 'cut', 'maintain')),
                weekly_weight_change_target REAL NOT NULL,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("goals", &e))?;
        Ok(())
    }

    pub(super) async fn migrate_profiles(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                initial_expenditure_estimate REAL NOT NULL CHECK (initial_expenditure_estimate > 0),
                initial_body_weight REAL NOT NULL CHECK (initial_body_weight > 0),
                sex TEXT NOT NULL CHECK (sex IN ('male', 'female')),
                measurement_system TEXT NOT NULL CHECK (measurement_system IN ('metric', 'imperial')),
                goal_id TEXT NOT NULL REFERENCES goals(id),
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("profiles", &e))?;
        Ok(())
    }

    /// Insert a profile together with its goal
    ///
    /// # Errors
    ///
    /// Returns an error if the profile's `goal_id` does not match the goal, or
    /// if either insert fails. Nothing is written on failure.
    pub async fn create_profile(&self, profile: &Profile, goal: &Goal) -> AppResult<()> {
        if profile.goal_id != goal.id {
            return Err(AppError::invalid_input(format!(
                "Profile {} references goal {}, not {}",
                profile.id, profile.goal_id, goal.id
            )));
        }

        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionError {
                context: format!("begin failed: {e}"),
            })?;
        let mut guard = SqliteTransactionGuard::new(tx);

        sqlx::query(
            r"
            INSERT INTO goals (id, goal_type, approach, weekly_weight_change_target)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(goal.id.to_string())
        .bind(goal.goal_type.as_str())
        .bind(goal.approach.as_str())
        .bind(goal.weekly_weight_change_target)
        .execute(guard.executor()?)
        .await
        .map_err(|e| DatabaseError::query(format!("create goal: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO profiles (
                id, initial_expenditure_estimate, initial_body_weight,
                sex, measurement_system, goal_id
            )
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(profile.id.to_string())
        .bind(profile.initial_expenditure_estimate)
        .bind(profile.initial_body_weight)
        .bind(profile.sex.as_str())
        .bind(profile.measurement_system.as_str())
        .bind(goal.id.to_string())
        .execute(guard.executor()?)
        .await
        .map_err(|e| DatabaseError::query(format!("create profile: {e}")))?;

        guard.commit().await
    }

    /// Get a profile by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn get_profile(&self, profile_id: Uuid) -> AppResult<Option<Profile>> {
        let row = sqlx::query(
            r"
            SELECT id, initial_expenditure_estimate, initial_body_weight,
                   sex, measurement_system, goal_id
            FROM profiles WHERE id = ?
            ",
        )
        .bind(profile_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::query(format!("get profile: {e}")))?;

        row.as_ref().map(row_to_profile).transpose()
    }

    /// Get a goal by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn get_goal(&self, goal_id: Uuid) -> AppResult<Option<Goal>> {
        let row = sqlx::query(
            r"
            SELECT id, goal_type, approach, weekly_weight_change_target
            FROM goals WHERE id = ?
            ",
        )
        .bind(goal_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::query(format!("get goal: {e}")))?;

        row.as_ref().map(row_to_goal).transpose()
    }

    /// Set a goal's weekly weight change target
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the goal does not exist
    pub async fn update_goal_weekly_target(&self, goal_id: Uuid, target: f64) -> AppResult<()> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| DatabaseError::ConnectionError {
                context: format!("acquire connection: {e}"),
            })?;
        write_goal_target(&mut conn, goal_id, target).await
    }
}

/// Update a goal's target on an existing connection or transaction
pub(super) async fn write_goal_target(
    conn: &mut SqliteConnection,
    goal_id: Uuid,
    target: f64,
) -> AppResult<()> {
    if !target.is_finite() {
        return Err(AppError::invalid_input(
            "Weekly weight change target must be a finite number",
        ));
    }

    let result = sqlx::query(
        r"
        UPDATE goals
        SET weekly_weight_change_target = ?, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        ",
    )
    .bind(target)
    .bind(goal_id.to_string())
    .execute(conn)
    .await
    .map_err(|e| DatabaseError::query(format!("update goal target: {e}")))?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "goal",
            entity_id: goal_id.to_string(),
        }
        .into());
    }
    Ok(())
}

fn row_to_profile(row: &SqliteRow) -> AppResult<Profile> {
    let id: String = row.get("id");
    let goal_id: String = row.get("goal_id");
    let sex: String = row.get("sex");
    let measurement_system: String = row.get("measurement_system");

    Ok(Profile {
        id: parse_uuid(&id, "profile id")?,
        initial_expenditure_estimate: row.get("initial_expenditure_estimate"),
        initial_body_weight: row.get("initial_body_weight"),
        sex: sex.parse::<Sex>()?,
        measurement_system: measurement_system.parse::<MeasurementSystem>()?,
        goal_id: parse_uuid(&goal_id, "goal id")?,
    })
}

fn row_to_goal(row: &SqliteRow) -> AppResult<Goal> {
    let id: String = row.get("id");
    let goal_type: String = row.get("goal_type");
    let approach: String = row.get("approach");

    Ok(Goal {
        id: parse_uuid(&id, "goal id")?,
        goal_type: goal_type.parse::<GoalType>()?,
        approach: approach.parse::<Approach>()?,
        weekly_weight_change_target: row.get("weekly_weight_change_target"),
    })
}
