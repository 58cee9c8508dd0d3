// ABOUTME: Daily log records of caloric intake and body weight
// ABOUTME: DailyLog allows missing fields; CompleteLog guarantees both are present
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One calendar day of user-entered data, unique per profile and date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    /// Owning profile
    pub profile_id: Uuid,
    /// Calendar day this log describes
    pub date: NaiveDate,
    /// Calories eaten (kcal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caloric_intake: Option<f64>,
    /// Body weight in the profile's measurement unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_weight: Option<f64>,
}

impl DailyLog {
    /// Create a validated daily log
    ///
    /// # Errors
    ///
    /// Returns an error if calories are negative or weight is not positive
    pub fn new(
        profile_id: Uuid,
        date: NaiveDate,
        caloric_intake: Option<f64>,
        body_weight: Option<f64>,
    ) -> AppResult<Self> {
        if let Some(calories) = caloric_intake {
            validate_calories(calories)?;
        }
        if let Some(weight) = body_weight {
            validate_weight(weight)?;
        }
        Ok(Self {
            profile_id,
            date,
            caloric_intake,
            body_weight,
        })
    }

    /// A log is complete when both intake and weight are present
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.caloric_intake.is_some() && self.body_weight.is_some()
    }

    /// View this log as a complete log, if both fields are present
    #[must_use]
    pub fn as_complete(&self) -> Option<CompleteLog> {
        match (self.caloric_intake, self.body_weight) {
            (Some(caloric_intake), Some(body_weight)) => Some(CompleteLog {
                date: self.date,
                caloric_intake,
                body_weight,
            }),
            _ => None,
        }
    }
}

/// A daily log with both intake and weight present
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompleteLog {
    /// Calendar day
    pub date: NaiveDate,
    /// Calories eaten (kcal)
    pub caloric_intake: f64,
    /// Body weight in the profile's measurement unit
    pub body_weight: f64,
}

impl CompleteLog {
    /// Create a validated complete log
    ///
    /// # Errors
    ///
    /// Returns an error if calories are negative or weight is not positive
    pub fn new(date: NaiveDate, caloric_intake: f64, body_weight: f64) -> AppResult<Self> {
        validate_calories(caloric_intake)?;
        validate_weight(body_weight)?;
        Ok(Self {
            date,
            caloric_intake,
            body_weight,
        })
    }
}

impl TryFrom<&DailyLog> for CompleteLog {
    type Error = AppError;

    fn try_from(log: &DailyLog) -> AppResult<Self> {
        log.as_complete().ok_or_else(|| {
            AppError::invalid_input(format!(
                "Daily log for {} is missing intake or body weight",
                log.date
            ))
        })
    }
}

fn validate_calories(calories: f64) -> AppResult<()> {
    if !calories.is_finite() || calories < 0.0 {
        return Err(AppError::invalid_input(
            "Caloric intake must be a non-negative number",
        ));
    }
    Ok(())
}

fn validate_weight(weight: f64) -> AppResult<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(AppError::invalid_input("Body weight must be positive"));
    }
    Ok(())
}
