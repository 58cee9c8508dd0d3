// ABOUTME: Estimation window model holding one expenditure estimate per date range
// ABOUTME: Windows are owned by the engine and never split or merged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A contiguous date range over which one expenditure estimate holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationWindow {
    /// Window identifier
    pub id: Uuid,
    /// Owning profile
    pub profile_id: Uuid,
    /// First day covered (inclusive)
    pub start_date: NaiveDate,
    /// Last day covered (inclusive)
    pub end_date: NaiveDate,
    /// Estimated total daily energy expenditure (kcal/day)
    pub estimated_expenditure: f64,
    /// Mean body weight over the window, in the profile's unit
    pub reference_weight: f64,
}

impl EstimationWindow {
    /// Create a new window with a fresh identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are reversed or the values are not finite
    pub fn new(
        profile_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        estimated_expenditure: f64,
        reference_weight: f64,
    ) -> AppResult<Self> {
        if start_date > end_date {
            return Err(AppError::invalid_input(format!(
                "Window start {start_date} is after end {end_date}"
            )));
        }
        if !estimated_expenditure.is_finite() || !reference_weight.is_finite() {
            return Err(AppError::invalid_input(
                "Window estimate and reference weight must be finite",
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            profile_id,
            start_date,
            end_date,
            estimated_expenditure,
            reference_weight,
        })
    }

    /// Whether `date` falls within this window (both bounds inclusive)
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether two windows share at least one day
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}
