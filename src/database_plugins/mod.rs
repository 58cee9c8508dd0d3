// ABOUTME: Database abstraction layer consumed by the expenditure service
// ABOUTME: DatabaseProvider trait with the SQLite backend and transaction guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Storage abstraction for the estimation engine.
//!
//! The service reads profiles, goals, and complete daily logs, and writes only
//! estimation windows and one goal field. Window writes and the goal update go
//! through [`DatabaseProvider::commit_estimation`] so they land atomically.

use crate::errors::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::ops::Bound;
use tdee_core::models::{CompleteLog, DailyLog, EstimationWindow, Goal, Profile};
use uuid::Uuid;

pub use crate::database::{EstimationCommit, GoalTargetUpdate, WindowWrite};

/// `SQLite` implementation of [`DatabaseProvider`]
pub mod sqlite;

/// RAII transaction guard
pub mod transactions;

/// Core database abstraction trait
///
/// All database implementations must implement this trait to provide
/// a consistent interface for the service layer.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone + 'static {
    /// Create a new database connection and run migrations
    async fn new(database_url: &str) -> AppResult<Self>
    where
        Self: Sized;

    /// Run database migrations to set up schema
    async fn migrate(&self) -> AppResult<()>;

    // ================================
    // Profiles & Goals
    // ================================

    /// Insert a profile and its goal (onboarding)
    async fn create_profile(&self, profile: &Profile, goal: &Goal) -> AppResult<()>;

    /// Get profile by ID
    async fn get_profile(&self, profile_id: Uuid) -> AppResult<Option<Profile>>;

    /// Get goal by ID
    async fn get_goal(&self, goal_id: Uuid) -> AppResult<Option<Goal>>;

    /// Set a goal's weekly weight change target directly
    async fn update_goal_weekly_target(&self, goal_id: Uuid, target: f64) -> AppResult<()>;

    // ================================
    // Daily Logs
    // ================================

    /// Insert or replace the log for its `(profile, date)`
    async fn upsert_daily_log(&self, log: &DailyLog) -> AppResult<()>;

    /// Logs in a date range, ordered by date ascending
    async fn get_daily_logs(
        &self,
        profile_id: Uuid,
        start: Bound<NaiveDate>,
        end: Bound<NaiveDate>,
    ) -> AppResult<Vec<DailyLog>>;

    /// Complete logs in a date range, ordered by date ascending
    async fn get_complete_logs(
        &self,
        profile_id: Uuid,
        start: Bound<NaiveDate>,
        end: Bound<NaiveDate>,
    ) -> AppResult<Vec<CompleteLog>>;

    // ================================
    // Estimation Windows
    // ================================

    /// Windows ordered by `start_date` ascending
    async fn list_estimation_windows(&self, profile_id: Uuid) -> AppResult<Vec<EstimationWindow>>;

    /// The window whose inclusive bounds contain `date`
    async fn find_window_containing(
        &self,
        profile_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<EstimationWindow>>;

    /// The window with the latest `end_date`
    async fn get_latest_window(&self, profile_id: Uuid) -> AppResult<Option<EstimationWindow>>;

    /// Persist a window write and goal target atomically
    async fn commit_estimation(&self, commit: &EstimationCommit) -> AppResult<()>;
}
