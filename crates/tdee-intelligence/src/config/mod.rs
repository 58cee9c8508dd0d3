// ABOUTME: Estimation configuration with defaults, environment overrides, and validation
// ABOUTME: Groups smoothing, adjustment, confidence, and strategy constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the estimation algorithms.
//!
//! Defaults come from `tdee_core::constants`. A process-wide instance is
//! available through [`EstimationConfig::global`], loaded once from defaults
//! plus `TDEE_*` environment overrides.

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tdee_core::constants::{confidence, energy, estimation, strategy, units};

/// Root configuration for all estimation algorithms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimationConfig {
    /// Weight smoothing
    pub smoothing: SmoothingConfig,
    /// Bounded adjustment estimator
    pub adjustment: AdjustmentConfig,
    /// Confidence scoring
    pub confidence: ConfidenceConfig,
    /// Strategy derivation
    pub strategy: StrategyConfig,
}

/// Moving-average parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Window length in days
    pub window_days: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window_days: estimation::SMOOTHING_WINDOW_DAYS,
        }
    }
}

/// Bounded adjustment parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentConfig {
    /// Complete logs required before a window is estimated
    pub min_window_days: usize,
    /// Maximum kcal/day shift applied to average intake
    pub max_caloric_change: f64,
    /// Smoothed weight change above which the shift is capped
    pub weight_change_cap: f64,
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            min_window_days: estimation::MIN_WINDOW_DAYS,
            max_caloric_change: estimation::MAX_CALORIC_CHANGE,
            weight_change_cap: estimation::WEIGHT_CHANGE_CAP,
        }
    }
}

/// Confidence tiers and agreement tolerance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    /// Estimates closer than this (kcal/day) agree
    pub tolerance_kcal: f64,
    /// Score when no earlier estimate agrees
    pub base_tier: f64,
    /// Score for a match at offset 1, 2, 3
    pub offset_tiers: [f64; 3],
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            tolerance_kcal: confidence::TOLERANCE_KCAL,
            base_tier: confidence::BASE_TIER,
            offset_tiers: confidence::OFFSET_TIERS,
        }
    }
}

/// Pace, energy-density, and protein parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Monthly bulk rate, percent of body weight (male)
    pub bulk_male_percent: f64,
    /// Monthly bulk rate, percent of body weight (female)
    pub bulk_female_percent: f64,
    /// Monthly cut rate, percent of body weight
    pub cut_percent: f64,
    /// Cap on monthly bulk gain (kg)
    pub max_monthly_bulk_kg: f64,
    /// Weeks per month
    pub weeks_per_month: f64,
    /// Pounds per kilogram
    pub lb_per_kg: f64,
    /// kcal per pound of body weight
    pub kcal_per_lb: f64,
    /// kcal per kilogram of body weight
    pub kcal_per_kg: f64,
    /// Days per week
    pub days_per_week: f64,
    /// Protein g per kg reference weight
    pub protein_g_per_kg: f64,
    /// Protein g per lb reference weight
    pub protein_g_per_lb: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            bulk_male_percent: strategy::BULK_MALE_PERCENT,
            bulk_female_percent: strategy::BULK_FEMALE_PERCENT,
            cut_percent: strategy::CUT_PERCENT,
            max_monthly_bulk_kg: strategy::MAX_MONTHLY_BULK_KG,
            weeks_per_month: strategy::WEEKS_PER_MONTH,
            lb_per_kg: units::LB_PER_KG,
            kcal_per_lb: energy::KCAL_PER_LB,
            kcal_per_kg: energy::KCAL_PER_KG,
            days_per_week: energy::DAYS_PER_WEEK,
            protein_g_per_kg: strategy::PROTEIN_G_PER_KG,
            protein_g_per_lb: strategy::PROTEIN_G_PER_LB,
        }
    }
}

/// Global configuration singleton
static ESTIMATION_CONFIG: OnceLock<EstimationConfig> = OnceLock::new();

impl EstimationConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        ESTIMATION_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                tracing::warn!("Failed to load estimation config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(days) = env_override("TDEE_MIN_WINDOW_DAYS")? {
            self.adjustment.min_window_days = days;
        }
        if let Some(days) = env_override("TDEE_SMOOTHING_WINDOW_DAYS")? {
            self.smoothing.window_days = days;
        }
        if let Some(kcal) = env_override("TDEE_MAX_CALORIC_CHANGE")? {
            self.adjustment.max_caloric_change = kcal;
        }
        if let Some(kcal) = env_override("TDEE_CONFIDENCE_TOLERANCE_KCAL")? {
            self.confidence.tolerance_kcal = kcal;
        }
        Ok(self)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.smoothing.window_days == 0 {
            return Err(ConfigError::InvalidRange(
                "smoothing window must be at least one day",
            ));
        }
        // The estimator needs a non-empty trailing series.
        if self.adjustment.min_window_days < self.smoothing.window_days {
            return Err(ConfigError::InvalidRange(
                "min_window_days must be >= smoothing window_days",
            ));
        }
        if !is_non_negative(self.adjustment.max_caloric_change)
            || !is_non_negative(self.adjustment.weight_change_cap)
        {
            return Err(ConfigError::InvalidRange(
                "max_caloric_change and weight_change_cap must be finite and non-negative",
            ));
        }
        if !is_non_negative(self.confidence.tolerance_kcal) {
            return Err(ConfigError::InvalidRange(
                "tolerance_kcal must be finite and non-negative",
            ));
        }

        let mut previous = self.confidence.base_tier;
        if !(0.0..=1.0).contains(&previous) {
            return Err(ConfigError::InvalidTiers("base tier must lie in [0, 1]"));
        }
        for tier in self.confidence.offset_tiers {
            if !(previous..=1.0).contains(&tier) {
                return Err(ConfigError::InvalidTiers(
                    "offset tiers must ascend from the base tier and not exceed 1",
                ));
            }
            previous = tier;
        }

        let s = &self.strategy;
        let factors = [
            s.weeks_per_month,
            s.lb_per_kg,
            s.kcal_per_lb,
            s.kcal_per_kg,
            s.days_per_week,
            s.protein_g_per_kg,
            s.protein_g_per_lb,
        ];
        if !factors.iter().all(|&factor| factor.is_finite() && factor > 0.0) {
            return Err(ConfigError::InvalidRange(
                "unit, energy and protein factors must be finite and positive",
            ));
        }
        let paces = [
            s.bulk_male_percent,
            s.bulk_female_percent,
            s.cut_percent,
            s.max_monthly_bulk_kg,
        ];
        if !paces.iter().copied().all(is_non_negative) {
            return Err(ConfigError::InvalidRange(
                "pace percentages and the monthly bulk cap must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn env_override<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(val) => val
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Parse(format!("Invalid {key}"))),
        Err(_) => Ok(None),
    }
}
