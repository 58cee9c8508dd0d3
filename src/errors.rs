// ABOUTME: Error handling for the engine crate, re-exported from tdee-core
// ABOUTME: AppError, ErrorCode, DatabaseError, and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The error types live in `tdee_core` so the algorithm crate can share them.
//! This module re-exports them for the engine's own modules and for callers.

pub use tdee_core::errors::{AppError, AppResult, DatabaseError, ErrorCode};
