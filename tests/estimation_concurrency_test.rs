// ABOUTME: Concurrency and failure-injection tests for estimation runs
// ABOUTME: Verifies per-profile serialization and that failed commits leave stored state unchanged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::{
    assert_close, create_default_profile, create_test_database, create_test_service, day,
    seed_complete_logs, steady,
};
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tdee_engine::{
    database_plugins::{sqlite::SqliteDatabase, DatabaseProvider, EstimationCommit},
    errors::{AppError, AppResult, ErrorCode},
    intelligence::EstimationConfig,
    models::{CompleteLog, DailyLog, EstimationWindow, Goal, Profile},
    services::{EstimationOutcome, ExpenditureService},
};
use uuid::Uuid;

// ============================================================================
// Failure-injecting provider
// ============================================================================

/// Delegates to `SQLite` but can be told to fail every commit
#[derive(Clone)]
struct FlakyDatabase {
    inner: SqliteDatabase,
    fail_commits: Arc<AtomicBool>,
    commit_attempts: Arc<AtomicU32>,
}

impl FlakyDatabase {
    fn wrap(inner: SqliteDatabase) -> Self {
        Self {
            inner,
            fail_commits: Arc::new(AtomicBool::new(false)),
            commit_attempts: Arc::new(AtomicU32::new(0)),
        }
    }

    fn set_failing(&self, failing: bool) {
        self.fail_commits.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl DatabaseProvider for FlakyDatabase {
    async fn new(database_url: &str) -> AppResult<Self> {
        Ok(Self::wrap(SqliteDatabase::new(database_url).await?))
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
        self.commit_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(AppError::database("injected commit failure"));
        }
        self.inner.commit_estimation(commit).await
    }
}

async fn flaky_service() -> (ExpenditureService<FlakyDatabase>, FlakyDatabase) {
    let database = FlakyDatabase::wrap(create_test_database().await.unwrap());
    let service = ExpenditureService::with_config(database.clone(), EstimationConfig::default());
    (service, database)
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_catch_ups_create_one_window() {
    let service = create_test_service().await.unwrap();
    let (profile, _) = create_default_profile(service.database()).await.unwrap();
    seed_complete_logs(service.database(), profile.id, 0, &steady(7, 2400.0, 80.0))
        .await
        .unwrap();

    let profile_id = profile.id;
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.run_catch_up(profile_id).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        match outcome {
            EstimationOutcome::Created { .. } => created += 1,
            EstimationOutcome::InsufficientData { available, .. } => assert_eq!(available, 0),
            EstimationOutcome::Updated { .. } => panic!("catch-up never updates"),
        }
    }

    assert_eq!(created, 1);
    let windows = service
        .database()
        .list_estimation_windows(profile.id)
        .await
        .unwrap();
    assert_eq!(windows.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_log_recording_keeps_windows_disjoint() {
    let service = create_test_service().await.unwrap();
    let (profile, _) = create_default_profile(service.database()).await.unwrap();

    let profile_id = profile.id;
    let handles: Vec<_> = (0..21)
        .map(|offset| {
            let service = service.clone();
            tokio::spawn(async move {
                let log = DailyLog::new(profile_id, day(offset), Some(2400.0), Some(80.0))?;
                service.record_daily_log(&log).await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    service.run_catch_up(profile.id).await.unwrap();

    let windows = service
        .database()
        .list_estimation_windows(profile.id)
        .await
        .unwrap();
    assert!(!windows.is_empty());
    for pair in windows.windows(2) {
        assert!(!pair[0].overlaps(&pair[1]));
    }
    for window in &windows {
        assert_close(window.estimated_expenditure, 2400.0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_profiles_progress_independently() {
    let service = create_test_service().await.unwrap();
    let (first, _) = create_default_profile(service.database()).await.unwrap();
    let (second, _) = create_default_profile(service.database()).await.unwrap();
    seed_complete_logs(service.database(), first.id, 0, &steady(7, 2400.0, 80.0))
        .await
        .unwrap();
    seed_complete_logs(service.database(), second.id, 0, &steady(7, 2100.0, 65.0))
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        service.run_catch_up(first.id),
        service.run_catch_up(second.id)
    );

    assert_close(a.unwrap().window().unwrap().estimated_expenditure, 2400.0);
    assert_close(b.unwrap().window().unwrap().estimated_expenditure, 2100.0);
}

// ============================================================================
// Failure injection
// ============================================================================

#[tokio::test]
async fn test_failed_commit_leaves_no_window() {
    let (service, database) = flaky_service().await;
    let (profile, goal) = create_default_profile(&database).await.unwrap();
    seed_complete_logs(&database, profile.id, 0, &steady(7, 2400.0, 80.0))
        .await
        .unwrap();

    database.set_failing(true);
    let error = service.run_catch_up(profile.id).await.unwrap_err();

    assert_eq!(error.code, ErrorCode::DatabaseError);
    assert_eq!(database.commit_attempts.load(Ordering::SeqCst), 1);
    assert!(database
        .list_estimation_windows(profile.id)
        .await
        .unwrap()
        .is_empty());
    let stored_goal = database.get_goal(goal.id).await.unwrap().unwrap();
    assert_close(stored_goal.weekly_weight_change_target, -0.5);

    database.set_failing(false);
    let outcome = service.run_catch_up(profile.id).await.unwrap();
    assert!(matches!(outcome, EstimationOutcome::Created { .. }));
}

#[tokio::test]
async fn test_failed_retroactive_commit_keeps_prior_estimate() {
    let (service, database) = flaky_service().await;
    let (profile, goal) = create_default_profile(&database).await.unwrap();
    seed_complete_logs(&database, profile.id, 0, &steady(7, 2400.0, 80.0))
        .await
        .unwrap();
    service.run_catch_up(profile.id).await.unwrap();
    let before = database.list_estimation_windows(profile.id).await.unwrap();
    let goal_before = database.get_goal(goal.id).await.unwrap().unwrap();

    database.set_failing(true);
    let log = DailyLog::new(profile.id, day(2), Some(3500.0), Some(90.0)).unwrap();
    let error = service.record_daily_log(&log).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::DatabaseError);

    assert_eq!(
        database.list_estimation_windows(profile.id).await.unwrap(),
        before
    );
    assert_eq!(database.get_goal(goal.id).await.unwrap().unwrap(), goal_before);

    // The edited log itself was stored; a later run picks it up
    database.set_failing(false);
    let outcome = service.run_retroactive(profile.id, day(2)).await.unwrap();
    assert!(matches!(outcome, EstimationOutcome::Updated { .. }));
}

#[tokio::test]
async fn test_insufficient_data_never_commits() {
    let (service, database) = flaky_service().await;
    let (profile, _) = create_default_profile(&database).await.unwrap();
    seed_complete_logs(&database, profile.id, 0, &steady(3, 2400.0, 80.0))
        .await
        .unwrap();

    service.run_catch_up(profile.id).await.unwrap();
    service.run_retroactive(profile.id, day(1)).await.unwrap();

    assert_eq!(database.commit_attempts.load(Ordering::SeqCst), 0);
}
