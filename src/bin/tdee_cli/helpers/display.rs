// ABOUTME: Output formatting helpers for tdee-cli
// ABOUTME: Renders outcomes, strategies, series, and trends as text or JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;
use tdee_engine::{
    errors::{AppError, AppResult},
    models::{Goal, Profile},
    services::{EstimationOutcome, ExpenditurePoint, Strategy, WeightTrendPoint},
};

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub const fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to render JSON: {e}")))?;
    println!("{rendered}");
    Ok(())
}

pub fn display_profile(profile: &Profile, goal: &Goal, format: OutputFormat) -> AppResult<()> {
    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({ "profile": profile, "goal": goal }));
    }

    let unit = profile.weight_unit();
    println!("Profile created");
    println!("   Profile ID: {}", profile.id);
    println!("   Goal: {} ({})", goal.goal_type.as_str(), goal.approach.as_str());
    println!(
        "   Starting point: {:.0} kcal/day at {:.1} {unit}",
        profile.initial_expenditure_estimate, profile.initial_body_weight
    );
    println!(
        "   Weekly target: {:+.2} {unit}/week",
        goal.weekly_weight_change_target
    );
    Ok(())
}

pub fn display_goal(goal: &Goal, format: OutputFormat) -> AppResult<()> {
    if format == OutputFormat::Json {
        return print_json(goal);
    }
    println!(
        "Weekly target set to {:+.2}/week for goal {}",
        goal.weekly_weight_change_target, goal.id
    );
    Ok(())
}

pub fn display_outcome(outcome: &EstimationOutcome, format: OutputFormat) -> AppResult<()> {
    if format == OutputFormat::Json {
        return print_json(outcome);
    }

    match outcome {
        EstimationOutcome::Created { window } | EstimationOutcome::Updated { window } => {
            let verb = if matches!(outcome, EstimationOutcome::Created { .. }) {
                "created"
            } else {
                "updated"
            };
            println!(
                "Window {verb}: {} to {}",
                window.start_date, window.end_date
            );
            println!("   Expenditure: {:.0} kcal/day", window.estimated_expenditure);
            println!("   Reference weight: {:.2}", window.reference_weight);
        }
        EstimationOutcome::InsufficientData {
            available,
            required,
        } => {
            println!("Not enough complete logs yet ({available} of {required}); nothing changed");
        }
    }
    Ok(())
}

pub fn display_strategy(strategy: &Strategy, format: OutputFormat) -> AppResult<()> {
    if format == OutputFormat::Json {
        return print_json(strategy);
    }

    println!("Strategy ({})", strategy.goal.approach.as_str());
    println!("   Calories: {} kcal/day", strategy.recommended_daily_calories);
    println!("   Protein: {} g/day", strategy.recommended_protein_grams);
    println!(
        "   Based on {:.0} kcal/day expenditure and {:.2} reference weight",
        strategy.latest_estimate, strategy.reference_weight
    );
    println!(
        "   Weekly target: {:+.2}",
        strategy.goal.weekly_weight_change_target
    );
    Ok(())
}

pub fn display_series(points: &[ExpenditurePoint], format: OutputFormat) -> AppResult<()> {
    if format == OutputFormat::Json {
        return print_json(&points);
    }
    if points.is_empty() {
        println!("No estimation windows yet");
        return Ok(());
    }

    println!(
        "{:<12} {:<12} {:>10} {:>10} {:>10}",
        "START", "END", "KCAL/DAY", "WEIGHT", "CONFIDENCE"
    );
    for point in points {
        println!(
            "{:<12} {:<12} {:>10.0} {:>10.2} {:>10.2}",
            point.window.start_date,
            point.window.end_date,
            point.window.estimated_expenditure,
            point.window.reference_weight,
            point.confidence
        );
    }
    Ok(())
}

pub fn display_trend(points: &[WeightTrendPoint], format: OutputFormat) -> AppResult<()> {
    if format == OutputFormat::Json {
        return print_json(&points);
    }
    if points.is_empty() {
        println!("No weights logged yet");
        return Ok(());
    }

    println!("{:<12} {:>10} {:>10}", "DATE", "WEIGHT", "TREND");
    for point in points {
        println!(
            "{:<12} {:>10.2} {:>10.2}",
            point.date, point.weight, point.smoothed_weight
        );
    }
    Ok(())
}
