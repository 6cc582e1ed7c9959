// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub fn criterion() -> Criterion {
    let frequency = env_parse("PROFILE_FREQ", 100i32).clamp(1, 1000);
    let sample_size = env_parse("BENCH_SAMPLE_SIZE", 60usize).clamp(10, 200);
    let warmup_secs = env_parse("BENCH_WARMUP_SECS", 3u64).clamp(1, 60);
    let measurement_secs = env_parse("BENCH_MEASUREMENT_SECS", 5u64).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
