// ABOUTME: Main library entry point for the adaptive TDEE engine
// ABOUTME: Wires configuration, logging, SQLite persistence, and the expenditure service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # TDEE Engine
//!
//! Turns daily logs of body weight and caloric intake into a running,
//! self-correcting estimate of daily energy expenditure, and derives calorie
//! and protein targets from it.
//!
//! ## Architecture
//!
//! - **`tdee_core`**: error types, domain models, constants
//! - **`tdee_intelligence`**: pure smoothing, estimation, confidence, and strategy math
//! - **`database`**: `SQLite` tables for profiles, goals, daily logs, and windows
//! - **`database_plugins`**: the [`DatabaseProvider`](database_plugins::DatabaseProvider)
//!   abstraction the service depends on
//! - **`services`**: the estimation window manager and read paths
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tdee_engine::config::environment::ServerConfig;
//! use tdee_engine::database_plugins::{sqlite::SqliteDatabase, DatabaseProvider};
//! use tdee_engine::errors::AppResult;
//! use tdee_engine::services::ExpenditureService;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = SqliteDatabase::new(&config.database.url.to_connection_string()).await?;
//!     let service = ExpenditureService::new(database);
//!
//!     let outcome = service.run_catch_up(Uuid::new_v4()).await;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

/// Environment-driven runtime configuration
pub mod config;

/// `SQLite` storage for profiles, goals, daily logs, and estimation windows
pub mod database;

/// Storage abstraction consumed by the service layer
pub mod database_plugins;

/// Error types re-exported from `tdee_core`
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Estimation window management and read paths
pub mod services;

pub use tdee_core::models;
pub use tdee_intelligence as intelligence;
