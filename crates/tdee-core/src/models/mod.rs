// ABOUTME: Core data models for daily logs, profiles, goals, and estimation windows
// ABOUTME: Explicit tagged records with constructors that reject invalid rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Daily intake and body-weight logs
pub mod daily_log;
/// Time windows carrying an expenditure estimate
pub mod estimation;
/// Weight-change goals
pub mod goal;
/// User profile inputs to the engine
pub mod profile;

pub use daily_log::{CompleteLog, DailyLog};
pub use estimation::EstimationWindow;
pub use goal::{Approach, Goal, GoalType};
pub use profile::{MeasurementSystem, Profile, Sex, WeightUnit};
