// ABOUTME: Configuration management module for engine settings
// ABOUTME: Environment-driven server config plus estimation algorithm parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: database location, deployment environment, log level
//! - **Estimation**: algorithm constants from `tdee_intelligence`, with
//!   `TDEE_*` environment overrides

/// Environment and server configuration
pub mod environment;

pub use environment::{DatabaseConfig, DatabaseUrl, Environment, LogLevel, ServerConfig};
pub use tdee_intelligence::config::{
    AdjustmentConfig, ConfidenceConfig, ConfigError, EstimationConfig, SmoothingConfig,
    StrategyConfig,
};
