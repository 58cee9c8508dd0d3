// ABOUTME: SQLite backend for the DatabaseProvider trait
// ABOUTME: Thin delegation to the database module's Database type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{DatabaseProvider, EstimationCommit};
use crate::config::environment::DatabaseConfig;
use crate::database::Database;
use crate::errors::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::ops::Bound;
use tdee_core::models::{CompleteLog, DailyLog, EstimationWindow, Goal, Profile};
use uuid::Uuid;

/// Default pool size when connecting through [`DatabaseProvider::new`]
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// `SQLite` database implementation
#[derive(Clone)]
pub struct SqliteDatabase {
    inner: Database,
}

impl SqliteDatabase {
    /// Connect using a [`DatabaseConfig`]
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        let inner = Database::from_config(config).await?;
        Ok(Self { inner })
    }

    /// Get a reference to the inner database
    #[must_use]
    pub const fn inner(&self) -> &Database {
        &self.inner
    }
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn new(database_url: &str) -> AppResult<Self> {
        let inner = Database::new(database_url, DEFAULT_MAX_CONNECTIONS).await?;
        Ok(Self { inner })
    }

    async fn migrate(&self) -> AppResult<()> {
        self.inner.migrate().await
    }

    async fn create_profile(&self, profile: &Profile, goal: &Goal) -> AppResult<()> {
        self.inner.create_profile(profile, goal).await
    }

    async fn get_profile(&self, profile_id: Uuid) -> AppResult<Option<Profile>> {
        self.inner.get_profile(profile_id).await
    }

    async fn get_goal(&self, goal_id: Uuid) -> AppResult<Option<Goal>> {
        self.inner.get_goal(goal_id).await
    }

    async fn update_goal_weekly_target(&self, goal_id: Uuid, target: f64) -> AppResult<()> {
        self.inner.update_goal_weekly_target(goal_id, target).await
    }

    async fn upsert_daily_log(&self, log: &DailyLog) -> AppResult<()> {
        self.inner.upsert_daily_log(log).await
    }

    async fn get_daily_logs(
        &self,
        profile_id: Uuid,
        start: Bound<NaiveDate>,
        end: Bound<NaiveDate>,
    ) -> AppResult<Vec<DailyLog>> {
        self.inner.get_daily_logs(profile_id, start, end).await
    }

    async fn get_complete_logs(
        &self,
        profile_id: Uuid,
        start: Bound<NaiveDate>,
        end: Bound<NaiveDate>,
    ) -> AppResult<Vec<CompleteLog>> {
        self.inner.get_complete_logs(profile_id, start, end).await
    }

    async fn list_estimation_windows(&self, profile_id: Uuid) -> AppResult<Vec<EstimationWindow>> {
        self.inner.list_estimation_windows(profile_id).await
    }

    async fn find_window_containing(
        &self,
        profile_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<EstimationWindow>> {
        self.inner.find_window_containing(profile_id, date).await
    }

    async fn get_latest_window(&self, profile_id: Uuid) -> AppResult<Option<EstimationWindow>> {
        self.inner.get_latest_window(profile_id).await
    }

    async fn commit_estimation(&self, commit: &EstimationCommit) -> AppResult<()> {
        self.inner.commit_estimation(commit).await
    }
}
