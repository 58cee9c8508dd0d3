// ABOUTME: Weight-change goal definitions
// ABOUTME: Goal type, dieting approach, and the weekly weight-change target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// What the user wants to achieve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Gain lean mass
    BuildMuscle,
    /// Lose body fat
    LoseFat,
    /// Hold current weight
    Maintain,
}

impl GoalType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BuildMuscle => "build_muscle",
            Self::LoseFat => "lose_fat",
            Self::Maintain => "maintain",
        }
    }
}

impl FromStr for GoalType {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "build_muscle" => Ok(Self::BuildMuscle),
            "lose_fat" => Ok(Self::LoseFat),
            "maintain" => Ok(Self::Maintain),
            other => Err(AppError::invalid_input(format!("Unknown goal type: {other}"))),
        }
    }
}

/// Energy-balance approach used to reach the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Approach {
    /// Caloric surplus
    Bulk,
    /// Caloric deficit
    Cut,
    /// Caloric balance
    Maintain,
}

impl Approach {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bulk => "bulk",
            Self::Cut => "cut",
            Self::Maintain => "maintain",
        }
    }
}

impl FromStr for Approach {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.to_lowercase().as_str() {
            "bulk" => Ok(Self::Bulk),
            "cut" => Ok(Self::Cut),
            "maintain" => Ok(Self::Maintain),
            other => Err(AppError::invalid_input(format!("Unknown approach: {other}"))),
        }
    }
}

/// A user's weight-change goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Goal identifier
    pub id: Uuid,
    /// Desired outcome
    pub goal_type: GoalType,
    /// Surplus, deficit, or balance
    pub approach: Approach,
    /// Target change per week in the profile's weight unit (negative = loss)
    pub weekly_weight_change_target: f64,
}

impl Goal {
    /// Create a goal with a fresh identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the weekly target is not a finite number
    pub fn new(
        goal_type: GoalType,
        approach: Approach,
        weekly_weight_change_target: f64,
    ) -> AppResult<Self> {
        if !weekly_weight_change_target.is_finite() {
            return Err(AppError::invalid_input(
                "Weekly weight change target must be a finite number",
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            goal_type,
            approach,
            weekly_weight_change_target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_type_accepts_dashed_names() {
        assert_eq!("build-muscle".parse::<GoalType>().ok(), Some(GoalType::BuildMuscle));
        assert_eq!("lose_fat".parse::<GoalType>().ok(), Some(GoalType::LoseFat));
        assert!("shred".parse::<GoalType>().is_err());
    }

    #[test]
    fn test_approach_round_trips_through_db_string() {
        for approach in [Approach::Bulk, Approach::Cut, Approach::Maintain] {
            assert_eq!(approach.as_str().parse::<Approach>().ok(), Some(approach));
        }
    }
}
