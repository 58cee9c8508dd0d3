// ABOUTME: Confidence scoring of an expenditure estimate against recent history
// ABOUTME: Display-only tiering; never feeds back into stored estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Confidence scoring.
//!
//! Windows are scored newest-first. For the window at `index`, the windows at
//! offsets 1, 2 and 3 further down the list (the three previous estimates) are
//! compared in that order. Every offset whose estimate lies within the
//! tolerance overwrites the score with that offset's tier, so the result is
//! the tier of the most distant agreeing offset. Intermediate offsets do not
//! have to agree.
//!
//! With the default tolerance of 50 kcal and estimates `[250, 240, 600, 245]`,
//! index 0 agrees at offset 1 (0.5), disagrees at offset 2 and agrees again at
//! offset 3, so it scores 1.0.

use crate::config::ConfidenceConfig;
use tdee_core::models::EstimationWindow;

/// Score the window at `index` in a list sorted by `end_date` descending
///
/// An `index` outside the list scores the base tier.
#[must_use]
pub fn score_confidence(
    windows_newest_first: &[EstimationWindow],
    index: usize,
    config: &ConfidenceConfig,
) -> f64 {
    let Some(current) = windows_newest_first.get(index) else {
        return config.base_tier;
    };

    let mut confidence = config.base_tier;
    for (offset, tier) in config.offset_tiers.iter().enumerate() {
        let Some(previous) = windows_newest_first.get(index + offset + 1) else {
            continue;
        };
        let difference = (current.estimated_expenditure - previous.estimated_expenditure).abs();
        if difference <= config.tolerance_kcal {
            confidence = *tier;
        }
    }
    confidence
}

/// Score every window in a list sorted by `end_date` descending
#[must_use]
pub fn score_series(windows_newest_first: &[EstimationWindow], config: &ConfidenceConfig) -> Vec<f64> {
    (0..windows_newest_first.len())
        .map(|index| score_confidence(windows_newest_first, index, config))
        .collect()
}
