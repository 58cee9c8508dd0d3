// ABOUTME: Nutrition strategy derivation from the latest expenditure estimate
// ABOUTME: Recommended weekly pace, daily calorie delta, and calorie/protein targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_possible_truncation)] // Safe: rounded kcal and gram targets fit in i64

//! Strategy derivation.
//!
//! Pace is expressed as a percentage of body weight per month and divided by
//! `weeks_per_month`:
//!
//! | Approach | Monthly change (kg)                         | Sign |
//! |----------|---------------------------------------------|------|
//! | bulk     | `min(weight / 100 * pct, 1)`, pct 1% male, 0.5% female | +    |
//! | cut      | `weight / 100 * 1.25`                        | -    |
//! | maintain | 0                                           |      |
//!
//! A weekly target converts to a daily calorie delta at 3500 kcal/lb or
//! 7700 kcal/kg over seven days.

use crate::config::StrategyConfig;
use serde::{Deserialize, Serialize};
use tdee_core::models::{Approach, MeasurementSystem, Sex, WeightUnit};

/// Recommended weekly weight change in both units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyWeightChange {
    /// Kilograms per week
    pub kg: f64,
    /// Pounds per week
    pub lb: f64,
}

impl WeeklyWeightChange {
    /// The component matching a weight unit
    #[must_use]
    pub const fn in_unit(&self, unit: WeightUnit) -> f64 {
        match unit {
            WeightUnit::Kg => self.kg,
            WeightUnit::Lb => self.lb,
        }
    }
}

/// Daily targets handed to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// Calories per day
    pub recommended_daily_calories: i64,
    /// Protein grams per day
    pub recommended_protein_grams: i64,
}

/// Recommended weekly pace for an approach
///
/// `reference_weight_kg` must be in kilograms; see [`reference_weight_in_kg`].
#[must_use]
pub fn recommended_weekly_weight_change(
    approach: Approach,
    sex: Sex,
    reference_weight_kg: f64,
    config: &StrategyConfig,
) -> WeeklyWeightChange {
    let weekly_kg = match approach {
        Approach::Bulk => {
            let percent = match sex {
                Sex::Male => config.bulk_male_percent,
                Sex::Female => config.bulk_female_percent,
            };
            let monthly_kg = (reference_weight_kg / 100.0 * percent).min(config.max_monthly_bulk_kg);
            monthly_kg / config.weeks_per_month
        }
        Approach::Cut => {
            let monthly_kg = reference_weight_kg / 100.0 * config.cut_percent;
            -monthly_kg / config.weeks_per_month
        }
        Approach::Maintain => {
            return WeeklyWeightChange { kg: 0.0, lb: 0.0 };
        }
    };

    WeeklyWeightChange {
        kg: weekly_kg,
        lb: weekly_kg * config.lb_per_kg,
    }
}

/// Daily calorie surplus (positive) or deficit (negative) for a weekly target
#[must_use]
pub fn daily_calorie_delta(
    unit: WeightUnit,
    weekly_weight_change_target: f64,
    config: &StrategyConfig,
) -> f64 {
    let calories_per_unit = match unit {
        WeightUnit::Lb => config.kcal_per_lb,
        WeightUnit::Kg => config.kcal_per_kg,
    };
    weekly_weight_change_target * calories_per_unit / config.days_per_week
}

/// Rounded daily calorie and protein targets
///
/// `reference_weight` and `weekly_weight_change_target` are in the unit of
/// `measurement_system`.
#[must_use]
pub fn nutrition_targets(
    latest_estimate: f64,
    reference_weight: f64,
    weekly_weight_change_target: f64,
    measurement_system: MeasurementSystem,
    config: &StrategyConfig,
) -> NutritionTargets {
    let unit = measurement_system.weight_unit();
    let delta = daily_calorie_delta(unit, weekly_weight_change_target, config);
    let protein_per_unit = match unit {
        WeightUnit::Lb => config.protein_g_per_lb,
        WeightUnit::Kg => config.protein_g_per_kg,
    };

    NutritionTargets {
        recommended_daily_calories: (latest_estimate + delta).round() as i64,
        recommended_protein_grams: (reference_weight * protein_per_unit).round() as i64,
    }
}

/// Convert a weight logged in `unit` to kilograms
#[must_use]
pub fn reference_weight_in_kg(weight: f64, unit: WeightUnit, config: &StrategyConfig) -> f64 {
    match unit {
        WeightUnit::Kg => weight,
        WeightUnit::Lb => weight / config.lb_per_kg,
    }
}
