// ABOUTME: Domain service layer wiring storage to the estimation algorithms
// ABOUTME: Exposes the expenditure service used by the CLI and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services own the orchestration between a [`DatabaseProvider`](crate::database_plugins::DatabaseProvider)
//! and the pure computations in [`tdee_intelligence`]. They are generic over the
//! provider so tests can substitute a backend.

/// Window maintenance, strategy, and read-side series for a profile
pub mod expenditure;

pub use expenditure::{
    EstimationOutcome, ExpenditurePoint, ExpenditureService, Strategy, WeightTrendPoint,
};
