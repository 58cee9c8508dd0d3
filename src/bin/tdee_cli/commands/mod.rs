// ABOUTME: Re-exports command modules for tdee-cli
// ABOUTME: Profile setup and estimation commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod estimation;
pub mod profile;
