// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, profile fixtures, and log seeding helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `tdee_engine`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use std::sync::Once;
use tdee_engine::{
    database_plugins::{sqlite::SqliteDatabase, DatabaseProvider},
    intelligence::EstimationConfig,
    models::{Approach, DailyLog, Goal, GoalType, MeasurementSystem, Profile, Sex},
    services::ExpenditureService,
};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<SqliteDatabase> {
    init_test_logging();
    Ok(SqliteDatabase::new("sqlite::memory:").await?)
}

/// Service over a fresh in-memory database with default parameters
pub async fn create_test_service() -> Result<ExpenditureService<SqliteDatabase>> {
    let database = create_test_database().await?;
    Ok(ExpenditureService::with_config(
        database,
        EstimationConfig::default(),
    ))
}

/// First day of seeded logs
pub fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Duration::days(offset)
}

/// Onboarding values for a fixture profile
#[derive(Debug, Clone, Copy)]
pub struct ProfileSpec {
    pub sex: Sex,
    pub measurement_system: MeasurementSystem,
    pub goal_type: GoalType,
    pub approach: Approach,
    pub initial_expenditure: f64,
    pub initial_weight: f64,
    pub weekly_target: f64,
}

impl Default for ProfileSpec {
    fn default() -> Self {
        Self {
            sex: Sex::Male,
            measurement_system: MeasurementSystem::Metric,
            goal_type: GoalType::LoseFat,
            approach: Approach::Cut,
            initial_expenditure: 2500.0,
            initial_weight: 80.0,
            weekly_target: -0.5,
        }
    }
}

/// Insert a profile and goal built from `spec`
pub async fn create_profile<D: DatabaseProvider>(
    database: &D,
    spec: ProfileSpec,
) -> Result<(Profile, Goal)> {
    let goal = Goal::new(spec.goal_type, spec.approach, spec.weekly_target)?;
    let profile = Profile::new(
        spec.initial_expenditure,
        spec.initial_weight,
        spec.sex,
        spec.measurement_system,
        goal.id,
    )?;
    database.create_profile(&profile, &goal).await?;
    Ok((profile, goal))
}

/// Insert the default cutting profile
pub async fn create_default_profile<D: DatabaseProvider>(database: &D) -> Result<(Profile, Goal)> {
    create_profile(database, ProfileSpec::default()).await
}

/// Upsert one complete log per entry, starting at `day(first_offset)`
pub async fn seed_complete_logs<D: DatabaseProvider>(
    database: &D,
    profile_id: Uuid,
    first_offset: i64,
    entries: &[(f64, f64)],
) -> Result<()> {
    for ((calories, weight), i) in entries.iter().zip(first_offset..) {
        let log = DailyLog::new(profile_id, day(i), Some(*calories), Some(*weight))?;
        database.upsert_daily_log(&log).await?;
    }
    Ok(())
}

/// `days` entries at constant intake and weight
pub fn steady(days: usize, calories: f64, weight: f64) -> Vec<(f64, f64)> {
    vec![(calories, weight); days]
}

/// Assert two floats agree to within 1e-6
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
