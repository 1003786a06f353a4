/// Benchmarks for the hymod kernel and the per-step realization loop.
///
/// Timing uses std::time::Instant with median-of-repeats; forcing comes
/// from a deterministic LCG so repeated invocations time identical work,
/// and std::hint::black_box keeps the optimizer honest.
use std::hint::black_box;
use std::time::{Duration, Instant};

use hymod_core::et::EtParams;
use hymod_core::forcing::{ForcingConfig, ForcingData, Resolution};
use hymod_core::output::NullSink;
use hymod_core::params::Parameters;
use hymod_core::realization::LumpedRealization;
use hymod_core::run;

const REPEATS: usize = 7;

/// Intermittent rainfall (roughly two dry days in five) and a PET demand
/// in the 0.5-5 mm range, from a deterministic LCG.
fn make_forcing(n: usize, seed: u64) -> ForcingData {
    let mut state = seed;
    let mut next_f64 = || -> f64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    let precip: Vec<f64> = (0..n).map(|_| (next_f64() * 25.0 - 10.0).max(0.0)).collect();
    let pet: Vec<f64> = (0..n).map(|_| 0.5 + next_f64() * 4.5).collect();
    ForcingData::new(precip, pet, Resolution::Daily).unwrap()
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn bench_kernel(sizes: &[usize]) -> Vec<(&'static str, usize, Duration)> {
    let params = Parameters::new(200.0, 0.5, 0.3, 0.1, 0.5, 3).unwrap();
    let mut results = Vec::new();

    for &n in sizes {
        let forcing = make_forcing(n, 42);

        // Warmup
        black_box(run::run_forcing(&params, &forcing, None).unwrap());

        let dur = median_time(|| {
            black_box(run::run_forcing(&params, &forcing, None).unwrap());
        });
        results.push(("kernel run", n, dur));
    }
    results
}

fn bench_realization(sizes: &[usize]) -> Vec<(&'static str, usize, Duration)> {
    let mut results = Vec::new();

    for &n in sizes {
        let data = make_forcing(n, 42);
        let forcing =
            ForcingConfig::new("bench", Resolution::Daily, 0, n as i64).unwrap();

        let dur = median_time(|| {
            let mut model = LumpedRealization::new(
                forcing.clone(),
                Box::new(NullSink),
                50.0,
                200.0,
                0.5,
                0.3,
                0.1,
                0.5,
                3,
                &[0.0; 4],
                0,
            )
            .unwrap();
            model.add_time(0, n).unwrap();

            for t in 0..n {
                let et = EtParams::Potential { pet: data.pet[t] };
                black_box(
                    model
                        .get_response(data.precip[t], (t + 1) as i64, 1, &et)
                        .unwrap(),
                );
            }
        });
        results.push(("realization", n, dur));
    }
    results
}

fn main() {
    println!("hymod core benchmarks");
    println!("============================================================");
    println!("{:<18} {:>6}   {:>12}", "Target", "N", "Median (ms)");
    println!("--------------------------------------------");

    let mut all_results: Vec<(&str, usize, Duration)> = Vec::new();
    all_results.extend(bench_kernel(&[3650, 36500]));
    all_results.extend(bench_realization(&[3650, 36500]));

    for (target, n, dur) in &all_results {
        let ms = dur.as_secs_f64() * 1000.0;
        println!("{:<18} {:>6}      {:>8.2}", target, n, ms);
    }

    println!("============================================================");
}
