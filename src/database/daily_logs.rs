// ABOUTME: Database operations for daily intake and body-weight logs
// ABOUTME: Upsert by (profile, date) and date-range reads with optional completeness filter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{migration_error, parse_date, parse_uuid, Database};
use crate::errors::{AppResult, DatabaseError};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::ops::Bound;
use tdee_core::models::{CompleteLog, DailyLog};
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_daily_logs(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS daily_logs (
                profile_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                caloric_intake REAL CHECK (caloric_intake IS NULL OR caloric_intake >= 0),
                body_weight REAL CHECK (body_weight IS NULL OR body_weight > 0),
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (profile_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("daily_logs", &e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_daily_logs_profile_date ON daily_logs(profile_id, date)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| migration_error("daily_logs", &e))?;
        Ok(())
    }

    /// Insert or replace the log for `(profile_id, date)`
    ///
    /// # Errors
    ///
    /// Returns an error if the profile does not exist or the write fails
    pub async fn upsert_daily_log(&self, log: &DailyLog) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO daily_logs (profile_id, date, caloric_intake, body_weight)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (profile_id, date) DO UPDATE SET
                caloric_intake = excluded.caloric_intake,
                body_weight = excluded.body_weight,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(log.profile_id.to_string())
        .bind(log.date.to_string())
        .bind(log.caloric_intake)
        .bind(log.body_weight)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::query(format!("upsert daily log: {e}")))?;
        Ok(())
    }

    /// Get all logs for a profile within a date range, ordered by date
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn get_daily_logs(
        &self,
        profile_id: Uuid,
        start: Bound<NaiveDate>,
        end: Bound<NaiveDate>,
    ) -> AppResult<Vec<DailyLog>> {
        let rows = self.fetch_log_rows(profile_id, start, end, false).await?;
        rows.iter().map(row_to_daily_log).collect()
    }

    /// Get complete logs (intake and weight present) within a date range, ordered by date
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn get_complete_logs(
        &self,
        profile_id: Uuid,
        start: Bound<NaiveDate>,
        end: Bound<NaiveDate>,
    ) -> AppResult<Vec<CompleteLog>> {
        let rows = self.fetch_log_rows(profile_id, start, end, true).await?;
        rows.iter().map(row_to_complete_log).collect()
    }

    async fn fetch_log_rows(
        &self,
        profile_id: Uuid,
        start: Bound<NaiveDate>,
        end: Bound<NaiveDate>,
        complete_only: bool,
    ) -> AppResult<Vec<SqliteRow>> {
        let mut query = String::from(
            r"
            SELECT profile_id, date, caloric_intake, body_weight
            FROM daily_logs WHERE profile_id = ?
            ",
        );

        match start {
            Bound::Included(_) => query.push_str(" AND date >= ?"),
            Bound::Excluded(_) => query.push_str(" AND date > ?"),
            Bound::Unbounded => {}
        }
        match end {
            Bound::Included(_) => query.push_str(" AND date <= ?"),
            Bound::Excluded(_) => query.push_str(" AND date < ?"),
            Bound::Unbounded => {}
        }
        if complete_only {
            query.push_str(" AND caloric_intake IS NOT NULL AND body_weight IS NOT NULL");
        }
        query.push_str(" ORDER BY date ASC");

        let mut sql_query = sqlx::query(&query).bind(profile_id.to_string());
        if let Bound::Included(date) | Bound::Excluded(date) = start {
            sql_query = sql_query.bind(date.to_string());
        }
        if let Bound::Included(date) | Bound::Excluded(date) = end {
            sql_query = sql_query.bind(date.to_string());
        }

        sql_query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::query(format!("get daily logs: {e}")).into())
    }
}

fn row_to_daily_log(row: &SqliteRow) -> AppResult<DailyLog> {
    let profile_id: String = row.get("profile_id");
    let date: String = row.get("date");

    DailyLog::new(
        parse_uuid(&profile_id, "profile id")?,
        parse_date(&date, "log date")?,
        row.get("caloric_intake"),
        row.get("body_weight"),
    )
}

fn row_to_complete_log(row: &SqliteRow) -> AppResult<CompleteLog> {
    let date: String = row.get("date");
    let caloric_intake: Option<f64> = row.get("caloric_intake");
    let body_weight: Option<f64> = row.get("body_weight");

    match (caloric_intake, body_weight) {
        (Some(calories), Some(weight)) => {
            CompleteLog::new(parse_date(&date, "log date")?, calories, weight)
        }
        _ => Err(DatabaseError::InvalidData {
            field: "daily_logs".to_owned(),
            reason: format!("incomplete log on {date} returned by completeness filter"),
        }
        .into()),
    }
}
