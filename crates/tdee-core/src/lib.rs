// ABOUTME: Core types and constants for the adaptive TDEE engine
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # TDEE Core
//!
//! Foundation crate providing shared types and constants for the adaptive
//! energy-expenditure engine. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Estimation, energy, and unit-conversion constants
//! - **models**: Daily logs, profiles, goals, and estimation windows

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`DailyLog`, `Profile`, `Goal`, `EstimationWindow`)
pub mod models;
