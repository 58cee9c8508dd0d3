// ABOUTME: Estimation commands for tdee-cli
// ABOUTME: Log recording, catch-up and retroactive runs, and the read-side views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use tdee_engine::{
    database_plugins::sqlite::SqliteDatabase,
    errors::{AppError, AppResult},
    models::DailyLog,
    services::ExpenditureService,
};
use uuid::Uuid;

use crate::helpers::display::{
    display_outcome, display_series, display_strategy, display_trend, OutputFormat,
};

type Result<T> = AppResult<T>;
type Service = ExpenditureService<SqliteDatabase>;

/// Record one day and re-estimate the window it falls in
pub async fn log(
    service: &Service,
    profile_id: Uuid,
    date: NaiveDate,
    calories: Option<f64>,
    weight: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    if calories.is_none() && weight.is_none() {
        return Err(AppError::invalid_input(
            "Provide --calories, --weight, or both",
        ));
    }

    let entry = DailyLog::new(profile_id, date, calories, weight)?;
    let outcome = service.record_daily_log(&entry).await?;
    display_outcome(&outcome, format)
}

pub async fn catch_up(service: &Service, profile_id: Uuid, format: OutputFormat) -> Result<()> {
    let outcome = service.run_catch_up(profile_id).await?;
    display_outcome(&outcome, format)
}

pub async fn retroactive(
    service: &Service,
    profile_id: Uuid,
    date: NaiveDate,
    format: OutputFormat,
) -> Result<()> {
    let outcome = service.run_retroactive(profile_id, date).await?;
    display_outcome(&outcome, format)
}

pub async fn strategy(service: &Service, profile_id: Uuid, format: OutputFormat) -> Result<()> {
    let strategy = service.get_strategy(profile_id).await?;
    display_strategy(&strategy, format)
}

pub async fn series(service: &Service, profile_id: Uuid, format: OutputFormat) -> Result<()> {
    let points = service.get_expenditure_series(profile_id).await?;
    display_series(&points, format)
}

pub async fn trend(service: &Service, profile_id: Uuid, format: OutputFormat) -> Result<()> {
    let points = service.get_weight_trend(profile_id).await?;
    display_trend(&points, format)
}
