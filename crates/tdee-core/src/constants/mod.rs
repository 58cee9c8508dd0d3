// ABOUTME: Application constants organized by domain
// ABOUTME: Estimation thresholds, energy densities, unit conversions, and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants used as defaults by the estimation configuration.
//!
//! Runtime code reads these through `EstimationConfig` so they can be
//! overridden per deployment; the values here are the canonical defaults.

/// Expenditure estimation window thresholds
pub mod estimation {
    /// Minimum complete daily logs required to create or revise a window
    pub const MIN_WINDOW_DAYS: usize = 7;

    /// Moving-average window length for weight smoothing (days)
    pub const SMOOTHING_WINDOW_DAYS: usize = 7;

    /// Maximum kcal/day an estimate moves away from average intake
    pub const MAX_CALORIC_CHANGE: f64 = 200.0;

    /// Smoothed weight change above which the adjustment is capped
    pub const WEIGHT_CHANGE_CAP: f64 = 1.0;
}

/// Confidence scoring for estimate stability
pub mod confidence {
    /// Two estimates within this many kcal/day are considered in agreement
    pub const TOLERANCE_KCAL: f64 = 50.0;

    /// Confidence when no earlier estimate agrees
    pub const BASE_TIER: f64 = 0.25;

    /// Confidence assigned per matching offset (offset 1, 2, 3)
    pub const OFFSET_TIERS: [f64; 3] = [0.5, 0.75, 1.0];
}

/// Energy content of body-weight change
pub mod energy {
    /// kcal per pound of body weight
    pub const KCAL_PER_LB: f64 = 3500.0;

    /// kcal per kilogram of body weight
    pub const KCAL_PER_KG: f64 = 7700.0;

    /// Days per week
    pub const DAYS_PER_WEEK: f64 = 7.0;
}

/// Weekly pace and protein recommendations
pub mod strategy {
    /// Monthly bulk rate as percent of body weight (male)
    pub const BULK_MALE_PERCENT: f64 = 1.0;

    /// Monthly bulk rate as percent of body weight (female)
    pub const BULK_FEMALE_PERCENT: f64 = 0.5;

    /// Monthly cut rate as percent of body weight (any sex)
    pub const CUT_PERCENT: f64 = 1.25;

    /// Upper bound on monthly bulk gain (kg)
    pub const MAX_MONTHLY_BULK_KG: f64 = 1.0;

    /// Weeks per month used to turn monthly rates into weekly ones
    pub const WEEKS_PER_MONTH: f64 = 4.0;

    /// Protein grams per kg of reference weight
    pub const PROTEIN_G_PER_KG: f64 = 2.2;

    /// Protein grams per lb of reference weight
    pub const PROTEIN_G_PER_LB: f64 = 1.0;
}

/// Unit conversion factors
pub mod units {
    /// Pounds per kilogram
    pub const LB_PER_KG: f64 = 2.205;
}

/// Service identifiers used in logs
pub mod service_names {
    /// Engine service name
    pub const TDEE_ENGINE: &str = "tdee-engine";
}
