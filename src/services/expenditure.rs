// ABOUTME: Expenditure service maintaining estimation windows for each profile
// ABOUTME: Catch-up, retroactive and initial runs serialized per profile, plus strategy and series reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Expenditure estimation service
//!
//! Three triggers maintain a profile's windows:
//!
//! - **Catch-up**: estimate over complete logs newer than the latest window,
//!   or over every complete log when no window exists yet
//! - **Retroactive**: a log edit inside an existing window recomputes that
//!   window with its bounds unchanged; an edit outside every window runs a
//!   catch-up instead
//! - **Record**: store a log, then run the retroactive trigger for its date
//!
//! Runs for the same profile are serialized through a per-profile async lock.
//! Every run persists its window write and the recomputed goal target in one
//! [`DatabaseProvider::commit_estimation`] call.

use crate::database_plugins::{DatabaseProvider, EstimationCommit, GoalTargetUpdate, WindowWrite};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::ops::Bound;
use std::sync::Arc;
use tdee_core::models::{CompleteLog, DailyLog, EstimationWindow, Goal, Profile};
use tdee_intelligence::{
    estimate_expenditure, minimum_logs, nutrition_targets, recommended_weekly_weight_change,
    reference_weight_in_kg, score_series, smooth_weights, EstimationConfig, ExpenditureEstimate,
    SmoothingMode,
};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Result of one estimation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EstimationOutcome {
    /// A new window was committed
    Created {
        /// The committed window
        window: EstimationWindow,
    },
    /// An existing window was recomputed in place
    Updated {
        /// The window with its new estimate
        window: EstimationWindow,
    },
    /// Too few complete logs; nothing was written
    InsufficientData {
        /// Complete logs found
        available: usize,
        /// Complete logs needed
        required: usize,
    },
}

impl EstimationOutcome {
    /// The window written by this run, if any
    #[must_use]
    pub const fn window(&self) -> Option<&EstimationWindow> {
        match self {
            Self::Created { window } | Self::Updated { window } => Some(window),
            Self::InsufficientData { .. } => None,
        }
    }
}

/// Calorie and protein recommendation for a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    /// Latest estimate adjusted by the goal's daily surplus or deficit
    pub recommended_daily_calories: i64,
    /// Protein target from the reference weight
    pub recommended_protein_grams: i64,
    /// Goal the recommendation was derived from
    pub goal: Goal,
    /// Expenditure estimate the recommendation starts from
    pub latest_estimate: f64,
    /// Body weight the protein target is based on
    pub reference_weight: f64,
}

/// One window with its stability score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenditurePoint {
    /// Estimation window
    pub window: EstimationWindow,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
}

/// One logged weight with its moving average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTrendPoint {
    /// Log date
    pub date: NaiveDate,
    /// Logged body weight
    pub weight: f64,
    /// Centered moving average
    pub smoothed_weight: f64,
}

/// Profile and goal loaded once per run
struct ProfileContext {
    profile: Profile,
    goal: Goal,
}

/// Exclusive hold on one profile's runs
///
/// Dropping the last holder removes the profile's entry from the registry.
struct ProfileGuard<'a> {
    locks: &'a DashMap<Uuid, Arc<Mutex<()>>>,
    profile_id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for ProfileGuard<'_> {
    fn drop(&mut self) {
        // Release the mutex and its Arc before checking for other holders
        self.guard.take();
        self.locks
            .remove_if(&self.profile_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Expenditure estimation service over a storage backend
///
/// Runs for the same profile are serialized through a lock registry shared
/// by all clones. An entry lives only while some run holds or awaits it.
#[derive(Clone)]
pub struct ExpenditureService<D: DatabaseProvider> {
    database: D,
    config: Arc<EstimationConfig>,
    profile_locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl<D: DatabaseProvider> ExpenditureService<D> {
    /// Create a service using the process-wide estimation config
    #[must_use]
    pub fn new(database: D) -> Self {
        Self::with_config(database, EstimationConfig::global().clone())
    }

    /// Create a service with an explicit config
    #[must_use]
    pub fn with_config(database: D, config: EstimationConfig) -> Self {
        Self {
            database,
            config: Arc::new(config),
            profile_locks: Arc::new(DashMap::new()),
        }
    }

    /// Storage backend
    #[must_use]
    pub const fn database(&self) -> &D {
        &self.database
    }

    /// Estimation config in use
    #[must_use]
    pub fn config(&self) -> &EstimationConfig {
        &self.config
    }

    /// Insert a new profile together with its goal
    ///
    /// # Errors
    ///
    /// Returns an error if the profile does not reference the goal or the write fails
    #[instrument(skip(self, profile, goal), fields(profile_id = %profile.id))]
    pub async fn create_profile(&self, profile: &Profile, goal: &Goal) -> AppResult<()> {
        self.database.create_profile(profile, goal).await?;
        info!(
            goal_type = goal.goal_type.as_str(),
            approach = goal.approach.as_str(),
            "Profile created"
        );
        Ok(())
    }

    /// Estimate over complete logs not yet covered by a window
    ///
    /// With no prior window this is the initial estimation and covers every
    /// complete log.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is missing or storage fails
    #[instrument(skip(self))]
    pub async fn run_catch_up(&self, profile_id: Uuid) -> AppResult<EstimationOutcome> {
        let _guard = self.lock_profile(profile_id).await;

        let context = self.load_context(profile_id).await?;
        self.catch_up_locked(&context).await
    }

    /// Recompute the window containing `edited_date`, keeping its bounds
    ///
    /// Falls back to a catch-up when no window contains the date.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is missing or storage fails
    #[instrument(skip(self))]
    pub async fn run_retroactive(
        &self,
        profile_id: Uuid,
        edited_date: NaiveDate,
    ) -> AppResult<EstimationOutcome> {
        let _guard = self.lock_profile(profile_id).await;

        let context = self.load_context(profile_id).await?;
        self.retroactive_locked(&context, edited_date).await
    }

    /// Store a log and re-estimate the window it falls in
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is missing or storage fails
    #[instrument(skip(self, log), fields(profile_id = %log.profile_id, date = %log.date))]
    pub async fn record_daily_log(&self, log: &DailyLog) -> AppResult<EstimationOutcome> {
        let _guard = self.lock_profile(log.profile_id).await;

        let context = self.load_context(log.profile_id).await?;
        self.database.upsert_daily_log(log).await?;
        debug!(complete = log.is_complete(), "Daily log stored");

        self.retroactive_locked(&context, log.date).await
    }

    /// Override the goal's weekly target until the next estimation run
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is missing, the target is not finite,
    /// or storage fails
    #[instrument(skip(self))]
    pub async fn set_weekly_target(&self, profile_id: Uuid, target: f64) -> AppResult<Goal> {
        let _guard = self.lock_profile(profile_id).await;

        let context = self.load_context(profile_id).await?;
        self.database
            .update_goal_weekly_target(context.goal.id, target)
            .await?;
        info!(target, "Weekly weight change target set");

        Ok(Goal {
            weekly_weight_change_target: target,
            ..context.goal
        })
    }

    /// Current calorie and protein recommendation
    ///
    /// Uses the latest window, or the profile's onboarding values before any
    /// window exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is missing or storage fails
    #[instrument(skip(self))]
    pub async fn get_strategy(&self, profile_id: Uuid) -> AppResult<Strategy> {
        let context = self.load_context(profile_id).await?;
        let (latest_estimate, reference_weight) =
            match self.database.get_latest_window(profile_id).await? {
                Some(window) => (window.estimated_expenditure, window.reference_weight),
                None => (
                    context.profile.initial_expenditure_estimate,
                    context.profile.initial_body_weight,
                ),
            };

        let targets = nutrition_targets(
            latest_estimate,
            reference_weight,
            context.goal.weekly_weight_change_target,
            context.profile.measurement_system,
            &self.config.strategy,
        );

        Ok(Strategy {
            recommended_daily_calories: targets.recommended_daily_calories,
            recommended_protein_grams: targets.recommended_protein_grams,
            goal: context.goal,
            latest_estimate,
            reference_weight,
        })
    }

    /// Windows newest first, each with its confidence score
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is missing or storage fails
    #[instrument(skip(self))]
    pub async fn get_expenditure_series(&self, profile_id: Uuid) -> AppResult<Vec<ExpenditurePoint>> {
        self.load_context(profile_id).await?;

        let mut windows = self.database.list_estimation_windows(profile_id).await?;
        windows.sort_by(|a, b| b.end_date.cmp(&a.end_date));
        let scores = score_series(&windows, &self.config.confidence);

        Ok(windows
            .into_iter()
            .zip(scores)
            .map(|(window, confidence)| ExpenditurePoint { window, confidence })
            .collect())
    }

    /// Logged weights in date order with their moving average
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is missing or storage fails
    #[instrument(skip(self))]
    pub async fn get_weight_trend(&self, profile_id: Uuid) -> AppResult<Vec<WeightTrendPoint>> {
        self.load_context(profile_id).await?;

        let logs = self
            .database
            .get_daily_logs(profile_id, Bound::Unbounded, Bound::Unbounded)
            .await?;
        let weighed: Vec<(NaiveDate, f64)> = logs
            .iter()
            .filter_map(|log| log.body_weight.map(|weight| (log.date, weight)))
            .collect();
        let weights: Vec<f64> = weighed.iter().map(|(_, weight)| *weight).collect();
        let smoothed = smooth_weights(&weights, SmoothingMode::Padded, &self.config.smoothing);

        Ok(weighed
            .into_iter()
            .zip(smoothed)
            .map(|((date, weight), smoothed_weight)| WeightTrendPoint {
                date,
                weight,
                smoothed_weight,
            })
            .collect())
    }

    // ================================
    // Runs (caller holds the profile lock)
    // ================================

    async fn catch_up_locked(&self, context: &ProfileContext) -> AppResult<EstimationOutcome> {
        let profile_id = context.profile.id;
        let start = match self.database.get_latest_window(profile_id).await? {
            Some(latest) => Bound::Excluded(latest.end_date),
            None => Bound::Unbounded,
        };

        let logs = self
            .database
            .get_complete_logs(profile_id, start, Bound::Unbounded)
            .await?;
        let required = minimum_logs(&self.config);
        let (Some(first), Some(last)) = (logs.first(), logs.last()) else {
            return Ok(Self::insufficient(0, required));
        };
        if logs.len() < required {
            return Ok(Self::insufficient(logs.len(), required));
        }

        let estimate = self.estimate(&logs)?;
        let window = EstimationWindow::new(
            profile_id,
            first.date,
            last.date,
            estimate.estimate,
            estimate.reference_weight,
        )?;

        self.database
            .commit_estimation(&EstimationCommit {
                profile_id,
                window: WindowWrite::Create(window.clone()),
                goal_target: self.goal_target(context, estimate.reference_weight),
            })
            .await?;

        info!(
            window_id = %window.id,
            start_date = %window.start_date,
            end_date = %window.end_date,
            estimate = window.estimated_expenditure,
            "Estimation window created"
        );
        Ok(EstimationOutcome::Created { window })
    }

    async fn retroactive_locked(
        &self,
        context: &ProfileContext,
        edited_date: NaiveDate,
    ) -> AppResult<EstimationOutcome> {
        let profile_id = context.profile.id;
        let Some(window) = self
            .database
            .find_window_containing(profile_id, edited_date)
            .await?
        else {
            debug!("No window contains the edited date, running catch-up");
            return self.catch_up_locked(context).await;
        };

        let logs = self
            .database
            .get_complete_logs(
                profile_id,
                Bound::Included(window.start_date),
                Bound::Included(window.end_date),
            )
            .await?;
        let required = minimum_logs(&self.config);
        if logs.len() < required {
            return Ok(Self::insufficient(logs.len(), required));
        }

        let estimate = self.estimate(&logs)?;
        self.database
            .commit_estimation(&EstimationCommit {
                profile_id,
                window: WindowWrite::Update {
                    window_id: window.id,
                    estimated_expenditure: estimate.estimate,
                    reference_weight: estimate.reference_weight,
                },
                goal_target: self.goal_target(context, estimate.reference_weight),
            })
            .await?;

        let window = EstimationWindow {
            estimated_expenditure: estimate.estimate,
            reference_weight: estimate.reference_weight,
            ..window
        };
        info!(
            window_id = %window.id,
            estimate = window.estimated_expenditure,
            "Estimation window recomputed"
        );
        Ok(EstimationOutcome::Updated { window })
    }

    // ================================
    // Helpers
    // ================================

    fn profile_lock(&self, profile_id: Uuid) -> Arc<Mutex<()>> {
        let entry = self
            .profile_locks
            .entry(profile_id)
            .or_insert_with(|| Arc::new(Mutex::new(())));
        Arc::clone(entry.value())
    }

    async fn lock_profile(&self, profile_id: Uuid) -> ProfileGuard<'_> {
        let guard = self.profile_lock(profile_id).lock_owned().await;
        ProfileGuard {
            locks: &self.profile_locks,
            profile_id,
            guard: Some(guard),
        }
    }

    async fn load_context(&self, profile_id: Uuid) -> AppResult<ProfileContext> {
        let profile = self
            .database
            .get_profile(profile_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Profile {profile_id}")))?;
        let goal = self
            .database
            .get_goal(profile.goal_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Goal {}", profile.goal_id)))?;
        Ok(ProfileContext { profile, goal })
    }

    fn estimate(&self, logs: &[CompleteLog]) -> AppResult<ExpenditureEstimate> {
        let estimate = estimate_expenditure(logs, &self.config)?;
        debug!(
            logs = logs.len(),
            estimate = estimate.estimate,
            reference_weight = estimate.reference_weight,
            weight_change = estimate.weight_change,
            "Expenditure estimated"
        );
        Ok(estimate)
    }

    fn goal_target(&self, context: &ProfileContext, reference_weight: f64) -> GoalTargetUpdate {
        let unit = context.profile.weight_unit();
        let weight_kg = reference_weight_in_kg(reference_weight, unit, &self.config.strategy);
        let pace = recommended_weekly_weight_change(
            context.goal.approach,
            context.profile.sex,
            weight_kg,
            &self.config.strategy,
        );
        GoalTargetUpdate {
            goal_id: context.goal.id,
            weekly_weight_change_target: pace.in_unit(unit),
        }
    }

    fn insufficient(available: usize, required: usize) -> EstimationOutcome {
        debug!(available, required, "Not enough complete logs to estimate");
        EstimationOutcome::InsufficientData {
            available,
            required,
        }
    }
}
