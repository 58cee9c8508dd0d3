// ABOUTME: Profile commands for tdee-cli
// ABOUTME: Onboarding a profile with its goal and overriding the weekly target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tdee_engine::{
    database_plugins::sqlite::SqliteDatabase,
    errors::AppResult,
    intelligence::{recommended_weekly_weight_change, reference_weight_in_kg},
    models::{Approach, Goal, GoalType, MeasurementSystem, Profile, Sex},
    services::ExpenditureService,
};
use tracing::info;
use uuid::Uuid;

use crate::helpers::display::{display_goal, display_profile, OutputFormat};

type Result<T> = AppResult<T>;

/// Onboarding answers for a new profile
pub struct NewProfile {
    pub initial_expenditure: f64,
    pub weight: f64,
    pub sex: Sex,
    pub measurement_system: MeasurementSystem,
    pub goal_type: GoalType,
    pub approach: Approach,
    pub weekly_target: Option<f64>,
}

/// Create a profile and its goal
pub async fn create(
    service: &ExpenditureService<SqliteDatabase>,
    answers: NewProfile,
    format: OutputFormat,
) -> Result<()> {
    let unit = answers.measurement_system.weight_unit();
    let weekly_target = answers.weekly_target.unwrap_or_else(|| {
        let strategy = &service.config().strategy;
        let weight_kg = reference_weight_in_kg(answers.weight, unit, strategy);
        recommended_weekly_weight_change(answers.approach, answers.sex, weight_kg, strategy)
            .in_unit(unit)
    });

    let goal = Goal::new(answers.goal_type, answers.approach, weekly_target)?;
    let profile = Profile::new(
        answers.initial_expenditure,
        answers.weight,
        answers.sex,
        answers.measurement_system,
        goal.id,
    )?;

    service.create_profile(&profile, &goal).await?;
    info!("Profile {} created", profile.id);
    display_profile(&profile, &goal, format)
}

/// Override the weekly weight change target
pub async fn set_target(
    service: &ExpenditureService<SqliteDatabase>,
    profile_id: Uuid,
    target: f64,
    format: OutputFormat,
) -> Result<()> {
    let goal = service.set_weekly_target(profile_id, target).await?;
    display_goal(&goal, format)
}
