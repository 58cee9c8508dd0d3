// ABOUTME: Adaptive expenditure estimation algorithms extracted from the engine crate
// ABOUTME: Weight smoothing, bounded adjustment, confidence scoring, and strategy derivation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # TDEE Intelligence
//!
//! Pure computations behind the adaptive energy-expenditure engine. Nothing in
//! this crate performs I/O or suspends; the engine crate feeds it logs loaded
//! from storage and persists what it returns.
//!
//! Data flows leaf-first:
//! `weight_smoother` → `expenditure_estimator` → (engine persists windows) →
//! `confidence` and `strategy` on the read path.

/// Tunable constants for every algorithm in this crate
pub mod config;

/// Stability scoring of an estimate against recent history
pub mod confidence;

/// Bounded-adjustment expenditure estimate over a window of complete logs
pub mod expenditure_estimator;

/// Calorie/protein targets and recommended weekly pace
pub mod strategy;

/// Moving averages over a body-weight series
pub mod weight_smoother;

pub use config::{
    AdjustmentConfig, ConfidenceConfig, ConfigError, EstimationConfig, SmoothingConfig,
    StrategyConfig,
};
pub use confidence::{score_confidence, score_series};
pub use expenditure_estimator::{estimate_expenditure, minimum_logs, ExpenditureEstimate};
pub use strategy::{
    daily_calorie_delta, nutrition_targets, recommended_weekly_weight_change,
    reference_weight_in_kg, NutritionTargets, WeeklyWeightChange,
};
pub use weight_smoother::{smooth_weights, SmoothingMode};
