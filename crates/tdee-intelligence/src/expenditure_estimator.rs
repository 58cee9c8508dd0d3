// ABOUTME: Bounded-adjustment expenditure estimate over a window of complete daily logs
// ABOUTME: Average intake shifted by a capped multiple of the smoothed weight change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: log counts are small day counts

//! Bounded adjustment estimator.
//!
//! Given at least `min_window_days` complete logs ordered by date:
//!
//! 1. Smooth the weight series in trailing mode and take
//!    `weight_change = smoothed[last] - smoothed[0]`.
//! 2. Drop the final log and average the remaining intake.
//! 3. `k = weight_change` when `weight_change <= cap`, otherwise `cap`;
//!    `delta = max_caloric_change * k`.
//! 4. Loss: `estimate = average + delta`. Gain: `estimate = average - delta`.
//!    No change: `estimate = average`.
//! 5. `reference_weight` is the mean weight of every log, final day included.
//!
//! Because `delta` carries the sign of a loss, step 4 lowers the estimate when
//! weight falls.
//!
//! No rounding happens here.

use crate::config::EstimationConfig;
use crate::weight_smoother::{smooth_weights, SmoothingMode};
use serde::{Deserialize, Serialize};
use tdee_core::errors::{AppError, AppResult};
use tdee_core::models::CompleteLog;

/// Result of estimating one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenditureEstimate {
    /// Estimated daily energy expenditure (kcal/day)
    pub estimate: f64,
    /// Mean body weight over all logs
    pub reference_weight: f64,
    /// Last minus first trailing-smoothed weight
    pub weight_change: f64,
    /// Mean intake over all logs except the last
    pub average_daily_calories: f64,
}

/// Complete logs needed before [`estimate_expenditure`] may be called
#[must_use]
pub fn minimum_logs(config: &EstimationConfig) -> usize {
    config
        .adjustment
        .min_window_days
        .max(config.smoothing.window_days)
        .max(2)
}

/// Estimate daily expenditure from date-ordered complete logs
///
/// # Errors
///
/// Returns an error if fewer than [`minimum_logs`] logs are supplied. Callers
/// are expected to check the threshold first and treat a short window as
/// "insufficient data" rather than calling this.
pub fn estimate_expenditure(
    logs: &[CompleteLog],
    config: &EstimationConfig,
) -> AppResult<ExpenditureEstimate> {
    let required = minimum_logs(config);
    if logs.len() < required {
        return Err(AppError::invalid_input(format!(
            "Expenditure estimation requires at least {required} complete logs, got {}",
            logs.len()
        )));
    }

    let weights: Vec<f64> = logs.iter().map(|log| log.body_weight).collect();
    let smoothed = smooth_weights(&weights, SmoothingMode::Trailing, &config.smoothing);
    let weight_change = match (smoothed.first(), smoothed.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    };

    // The last day's intake belongs to the period that follows it.
    let sliced = &logs[..logs.len() - 1];
    let average_daily_calories =
        sliced.iter().map(|log| log.caloric_intake).sum::<f64>() / sliced.len() as f64;

    let adjustment = &config.adjustment;
    let k = if weight_change <= adjustment.weight_change_cap {
        weight_change
    } else {
        adjustment.weight_change_cap
    };
    let delta = adjustment.max_caloric_change * k;

    let estimate = if weight_change < 0.0 {
        average_daily_calories + delta
    } else if weight_change > 0.0 {
        average_daily_calories - delta
    } else {
        average_daily_calories
    };

    let reference_weight = weights.iter().sum::<f64>() / weights.len() as f64;

    tracing::trace!(
        weight_change,
        average_daily_calories,
        estimate,
        reference_weight,
        logs = logs.len(),
        "Computed bounded-adjustment estimate"
    );

    Ok(ExpenditureEstimate {
        estimate,
        reference_weight,
        weight_change,
        average_daily_calories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn logs(entries: &[(f64, f64)]) -> Vec<CompleteLog> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
        entries
            .iter()
            .zip(0_i64..)
            .map(|((calories, weight), i)| CompleteLog {
                date: start + Duration::days(i),
                caloric_intake: *calories,
                body_weight: *weight,
            })
            .collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_seven_logs_have_no_smoothed_change() {
        let entries = [
            (2500.0, 80.0),
            (2400.0, 79.8),
            (2600.0, 79.6),
            (2500.0, 79.5),
            (2500.0, 79.3),
            (2500.0, 79.1),
            (9999.0, 79.0),
        ];
        let result = estimate_expenditure(&logs(&entries), &EstimationConfig::default())
            .unwrap_or_else(|e| panic!("estimate failed: {e}"));

        assert_close(result.weight_change, 0.0);
        // Final day's 9999 kcal is excluded
        assert_close(result.average_daily_calories, 2500.0);
        assert_close(result.estimate, 2500.0);
        let mean_weight = entries.iter().map(|(_, w)| w).sum::<f64>() / 7.0;
        assert_close(result.reference_weight, mean_weight);
    }

    #[test]
    fn test_weight_loss_lowers_estimate() {
        // trailing means: mean(w[0..7]) and mean(w[1..8]); change = (77.9 - 80.0) / 7 = -0.3
        let mut entries = vec![(2500.0, 80.0)];
        entries.extend([(2500.0, 79.0); 6]);
        entries.push((2500.0, 77.9));
        let result = estimate_expenditure(&logs(&entries), &EstimationConfig::default())
            .unwrap_or_else(|e| panic!("estimate failed: {e}"));

        assert_close(result.weight_change, -0.3);
        // delta = 200 * -0.3 = -60, added on loss
        assert_close(result.estimate, 2440.0);
    }

    #[test]
    fn test_small_gain_subtracts_proportional_delta() {
        let mut entries = vec![(3000.0, 80.0)];
        entries.extend([(3000.0, 80.5); 6]);
        entries.push((3000.0, 83.5));
        let result = estimate_expenditure(&logs(&entries), &EstimationConfig::default())
            .unwrap_or_else(|e| panic!("estimate failed: {e}"));

        assert_close(result.weight_change, 0.5);
        assert_close(result.estimate, 2900.0);
    }

    #[test]
    fn test_large_gain_is_capped() {
        let mut entries = vec![(3000.0, 80.0)];
        entries.extend([(3000.0, 81.0); 6]);
        entries.push((3000.0, 87.7));
        let result = estimate_expenditure(&logs(&entries), &EstimationConfig::default())
            .unwrap_or_else(|e| panic!("estimate failed: {e}"));

        assert_close(result.weight_change, 1.1);
        assert_close(result.estimate, 2800.0);
    }

    #[test]
    fn test_large_loss_is_not_capped() {
        let mut entries = vec![(2000.0, 90.0)];
        entries.extend([(2000.0, 89.0); 6]);
        entries.push((2000.0, 79.5));
        let result = estimate_expenditure(&logs(&entries), &EstimationConfig::default())
            .unwrap_or_else(|e| panic!("estimate failed: {e}"));

        assert_close(result.weight_change, -1.5);
        assert_close(result.estimate, 1700.0);
    }

    #[test]
    fn test_minimum_logs_defaults_to_seven() {
        assert_eq!(minimum_logs(&EstimationConfig::default()), 7);
    }

    #[test]
    fn test_rejects_short_window() {
        let entries = [(2500.0, 80.0); 6];
        assert!(estimate_expenditure(&logs(&entries), &EstimationConfig::default()).is_err());
    }
}
