// ABOUTME: User profile fields read by the estimation engine
// ABOUTME: Sex, measurement system, and initial expenditure/weight from onboarding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Biological sex, used for bulk pace recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
}

impl Sex {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(AppError::invalid_input(format!("Unknown sex: {other}"))),
        }
    }
}

/// Unit system the user logs body weight in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementSystem {
    /// Kilograms
    Metric,
    /// Pounds
    Imperial,
}

impl MeasurementSystem {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Weight unit logged under this system
    #[must_use]
    pub const fn weight_unit(&self) -> WeightUnit {
        match self {
            Self::Metric => WeightUnit::Kg,
            Self::Imperial => WeightUnit::Lb,
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.to_lowercase().as_str() {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            other => Err(AppError::invalid_input(format!(
                "Unknown measurement system: {other}"
            ))),
        }
    }
}

/// Body-weight unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    /// Kilograms
    Kg,
    /// Pounds
    Lb,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kg => write!(f, "kg"),
            Self::Lb => write!(f, "lb"),
        }
    }
}

/// Profile inputs the engine reads; written only by onboarding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile identifier
    pub id: Uuid,
    /// Expenditure estimate captured at onboarding (kcal/day)
    pub initial_expenditure_estimate: f64,
    /// Body weight captured at onboarding, in the profile's unit
    pub initial_body_weight: f64,
    /// Biological sex
    pub sex: Sex,
    /// Unit system for logged weights
    pub measurement_system: MeasurementSystem,
    /// Active goal
    pub goal_id: Uuid,
}

impl Profile {
    /// Create a validated profile
    ///
    /// # Errors
    ///
    /// Returns an error if the initial estimate or weight is not positive
    pub fn new(
        initial_expenditure_estimate: f64,
        initial_body_weight: f64,
        sex: Sex,
        measurement_system: MeasurementSystem,
        goal_id: Uuid,
    ) -> AppResult<Self> {
        if !initial_expenditure_estimate.is_finite() || initial_expenditure_estimate <= 0.0 {
            return Err(AppError::invalid_input(
                "Initial expenditure estimate must be positive",
            ));
        }
        if !initial_body_weight.is_finite() || initial_body_weight <= 0.0 {
            return Err(AppError::invalid_input(
                "Initial body weight must be positive",
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            initial_expenditure_estimate,
            initial_body_weight,
            sex,
            measurement_system,
            goal_id,
        })
    }

    /// Weight unit this profile logs in
    #[must_use]
    pub const fn weight_unit(&self) -> WeightUnit {
        self.measurement_system.weight_unit()
    }
}
