// ABOUTME: Moving averages over a body-weight series for display and estimation
// ABOUTME: Padded centered mode keeps series length; trailing mode feeds the estimator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: window lengths are small day counts

//! Weight smoothing.
//!
//! Daily scale readings swing with water and food volume, so both the chart
//! and the estimator work from a simple moving average:
//!
//! - [`SmoothingMode::Padded`] repeats the first and last reading
//!   `window / 2` times at each end, then averages each window. The output is
//!   as long as the input.
//! - [`SmoothingMode::Trailing`] averages `weights[i..i + window]` for every
//!   full window, with no padding. The output is `window - 1` shorter than the
//!   input and empty when the input is shorter than one window.

use crate::config::SmoothingConfig;
use serde::{Deserialize, Serialize};

/// How the series ends are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMode {
    /// Centered average over an edge-padded series (display)
    Padded,
    /// Forward average over full windows only (estimation)
    Trailing,
}

/// Smooth a date-ordered weight series
#[must_use]
pub fn smooth_weights(weights: &[f64], mode: SmoothingMode, config: &SmoothingConfig) -> Vec<f64> {
    match mode {
        SmoothingMode::Padded => padded_average(weights, config.window_days),
        SmoothingMode::Trailing => trailing_average(weights, config.window_days),
    }
}

fn padded_average(weights: &[f64], window: usize) -> Vec<f64> {
    let (Some(&first), Some(&last)) = (weights.first(), weights.last()) else {
        return Vec::new();
    };
    if window == 0 {
        return Vec::new();
    }

    let pad = window / 2;
    let mut padded = Vec::with_capacity(weights.len() + 2 * pad);
    padded.extend(std::iter::repeat(first).take(pad));
    padded.extend_from_slice(weights);
    padded.extend(std::iter::repeat(last).take(pad));

    (0..weights.len())
        .map(|i| mean(&padded[i..(i + window).min(padded.len())]))
        .collect()
}

fn trailing_average(weights: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || weights.len() < window {
        return Vec::new();
    }
    weights.windows(window).map(mean).collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmoothingConfig {
        SmoothingConfig::default()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_trailing_length_is_n_minus_six() {
        for n in 7..30 {
            let weights: Vec<f64> = (0..n).map(|i| 80.0 + f64::from(i) * 0.1).collect();
            let smoothed = smooth_weights(&weights, SmoothingMode::Trailing, &config());
            assert_eq!(smoothed.len(), weights.len() - 6);
        }
    }

    #[test]
    fn test_trailing_short_series_is_empty() {
        assert!(smooth_weights(&[], SmoothingMode::Trailing, &config()).is_empty());
        assert!(smooth_weights(&[80.0], SmoothingMode::Trailing, &config()).is_empty());
        assert!(smooth_weights(&[80.0; 6], SmoothingMode::Trailing, &config()).is_empty());
    }

    #[test]
    fn test_trailing_values_are_forward_means() {
        let weights = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let smoothed = smooth_weights(&weights, SmoothingMode::Trailing, &config());
        assert_eq!(smoothed.len(), 2);
        assert_close(smoothed[0], 4.0);
        assert_close(smoothed[1], 5.0);
    }

    #[test]
    fn test_padded_preserves_length() {
        for n in 1..20 {
            let weights: Vec<f64> = (0..n).map(|i| 70.0 - f64::from(i) * 0.2).collect();
            let smoothed = smooth_weights(&weights, SmoothingMode::Padded, &config());
            assert_eq!(smoothed.len(), weights.len());
        }
    }

    #[test]
    fn test_padded_single_value_is_constant() {
        let smoothed = smooth_weights(&[5.0], SmoothingMode::Padded, &config());
        assert_eq!(smoothed, vec![5.0]);
    }

    #[test]
    fn test_padded_repeats_edges() {
        let weights = [10.0, 20.0, 30.0];
        let smoothed = smooth_weights(&weights, SmoothingMode::Padded, &config());
        // padded: 10 10 10 10 20 30 30 30 30
        assert_close(smoothed[0], (10.0 * 4.0 + 20.0 + 30.0 * 2.0) / 7.0);
        assert_close(smoothed[1], (10.0 * 3.0 + 20.0 + 30.0 * 3.0) / 7.0);
        assert_close(smoothed[2], (10.0 * 2.0 + 20.0 + 30.0 * 4.0) / 7.0);
    }

    #[test]
    fn test_padded_empty_input() {
        assert!(smooth_weights(&[], SmoothingMode::Padded, &config()).is_empty());
    }
}
