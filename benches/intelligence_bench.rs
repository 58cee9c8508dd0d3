// ABOUTME: Criterion benchmarks for the estimation algorithms
// ABOUTME: Measures weight smoothing, bounded-adjustment estimation, and confidence scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the estimation algorithms.
//!
//! Series sizes cover a single window (7 days), a quarter, and several years
//! of daily logs.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tdee_engine::intelligence::{
    estimate_expenditure, score_series, smooth_weights, EstimationConfig, SmoothingMode,
};
use tdee_engine::models::{CompleteLog, EstimationWindow};
use uuid::Uuid;

const SERIES_SIZES: [usize; 3] = [7, 90, 1500];

/// Deterministic logs drifting down about 0.05 kg/day with daily noise
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
fn generate_logs(count: usize) -> Vec<CompleteLog> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    (0..count)
        .map(|index| CompleteLog {
            date: start + Duration::days(index as i64),
            caloric_intake: 2100.0 + ((index * 137) % 400) as f64,
            body_weight: 85.0 - index as f64 * 0.05 + ((index * 31) % 10) as f64 / 20.0,
        })
        .collect()
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
fn generate_windows(count: usize) -> Vec<EstimationWindow> {
    let profile_id = Uuid::new_v4();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    (0..count)
        .rev()
        .map(|index| {
            let first = start + Duration::days(index as i64 * 7);
            EstimationWindow {
                id: Uuid::new_v4(),
                profile_id,
                start_date: first,
                end_date: first + Duration::days(6),
                estimated_expenditure: 2400.0 + ((index * 53) % 120) as f64,
                reference_weight: 80.0,
            }
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn bench_weight_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("weight_smoothing");
    let config = EstimationConfig::default();

    for count in SERIES_SIZES {
        let weights: Vec<f64> = generate_logs(count)
            .iter()
            .map(|log| log.body_weight)
            .collect();
        group.throughput(Throughput::Elements(count as u64));

        for (label, mode) in [
            ("padded", SmoothingMode::Padded),
            ("trailing", SmoothingMode::Trailing),
        ] {
            group.bench_with_input(BenchmarkId::new(label, count), &weights, |b, weights| {
                b.iter(|| smooth_weights(black_box(weights), mode, &config.smoothing));
            });
        }
    }

    group.finish();
}

#[allow(clippy::cast_possible_truncation)]
fn bench_expenditure_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("expenditure_estimate");
    let config = EstimationConfig::default();

    for count in SERIES_SIZES {
        let logs = generate_logs(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("bounded_adjustment", count), &logs, |b, logs| {
            b.iter(|| estimate_expenditure(black_box(logs), &config));
        });
    }

    group.finish();
}

#[allow(clippy::cast_possible_truncation)]
fn bench_confidence_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("confidence");
    let config = EstimationConfig::default();

    for count in [4, 52, 520] {
        let windows = generate_windows(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("score_series", count),
            &windows,
            |b, windows| {
                b.iter(|| score_series(black_box(windows), &config.confidence));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_weight_smoothing,
    bench_expenditure_estimate,
    bench_confidence_series
);
criterion_main!(benches);
