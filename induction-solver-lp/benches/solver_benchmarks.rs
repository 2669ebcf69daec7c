//! Criterion benchmarks for the LP solver.
//!
//! Measures plan time across fleet sizes (25, 100, 400 vehicles) to track
//! performance and detect regressions.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package induction-solver-lp
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use induction_core::{
    CertificateStatus, Certificates, ComplianceStatus, Fleet, InductionPlanner, PlannerConfig,
    RiskLevel, Vehicle,
};
use induction_solver_lp::LpSolver;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Fleet sizes to benchmark.
const FLEET_SIZES: &[usize] = &[25, 100, 400];

/// Fixed seed so every run plans the same fleets.
const BENCHMARK_SEED: u64 = 0x1D0C_7104;

const LEVELS: [RiskLevel; 4] = [
    RiskLevel::Critical,
    RiskLevel::High,
    RiskLevel::Medium,
    RiskLevel::Low,
];

fn random_level(rng: &mut ChaCha8Rng) -> RiskLevel {
    LEVELS
        .get(rng.gen_range(0..LEVELS.len()))
        .copied()
        .unwrap_or(RiskLevel::Low)
}

/// Generate a deterministic fleet where roughly one vehicle in ten is locked
/// out and one in four is overdue for cleaning.
fn generate_fleet(size: usize, seed: u64) -> Fleet {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let vehicles = (1..=size)
        .map(|position| {
            let mut builder = Vehicle::builder(format!("TS-{position:03}"))
                .branding_risk(random_level(&mut rng))
                .mileage_urgency(random_level(&mut rng))
                .shunting_minutes(rng.gen_range(0..30))
                .cleaning(
                    if rng.gen_bool(0.25) {
                        ComplianceStatus::Overdue
                    } else {
                        ComplianceStatus::Compliant
                    },
                    rng.gen_range(0..40),
                );
            if rng.gen_bool(0.1) {
                builder = builder.certificates(Certificates {
                    telecom: CertificateStatus::Expired,
                    ..Certificates::ALL_VALID
                });
            }
            builder.build()
        })
        .collect();
    Fleet::new(vehicles).unwrap_or_default()
}

/// Scale quotas with the fleet so every size stays feasible.
fn config_for(size: usize) -> PlannerConfig {
    let scaled = |divisor: usize| u32::try_from(size / divisor).unwrap_or(u32::MAX);
    PlannerConfig {
        required_service_count: scaled(3),
        min_standby_count: scaled(8),
        max_maintenance_count: scaled(5),
        max_cleaning_count: scaled(4),
        ..PlannerConfig::default()
    }
}

fn bench_plan_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_time");
    group.sample_size(30);
    group.measurement_time(Duration::from_secs(10));

    let planner = InductionPlanner::new(LpSolver::new());
    for &size in FLEET_SIZES {
        let fleet = generate_fleet(size, BENCHMARK_SEED);
        let config = config_for(size);

        #[expect(
            clippy::as_conversions,
            reason = "Safe conversion for small fleet sizes"
        )]
        let throughput_size = size as u64;
        group.throughput(Throughput::Elements(throughput_size));
        group.bench_with_input(BenchmarkId::new("vehicles", size), &size, |b, _| {
            b.iter(|| {
                #[expect(
                    clippy::let_underscore_must_use,
                    reason = "Benchmarking plan performance, result is intentionally discarded"
                )]
                let _ = planner.plan(&fleet, &config);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_plan_times);
criterion_main!(benches);
