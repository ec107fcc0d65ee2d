use std::time::Instant;
use std::hint::black_box;

use crate::diag::NullSink;
use crate::dsp::PhaseOffsetFilter;
use crate::util::{measure, qpsk_symbols, run_block, symbol_phases};

// --- small helpers ------------------------------------------------------

fn minsps_from_env(default_msps: f32) -> f32 {
    std::env::var("PHASE_OFFSET_THROUGHPUT_MINSPS")
        .ok()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(default_msps)
}

/// Run `repeats` passes, return (msamples/sec, elapsed_secs).
fn measure_throughput(mut f: impl FnMut() -> usize, samples_per_pass: usize, repeats: usize) -> (f32, f64) {
    let start = Instant::now();
    let mut sink = 0.0f64;
    for _ in 0..repeats {
        // black_box to avoid optimizing away work
        let n = f();
        sink = black_box(sink + (n as f64) * 1e-12);
    }
    let dt = start.elapsed().as_secs_f64();
    let total_samples = samples_per_pass as f64 * repeats as f64;
    let msps = (total_samples / dt) / 1.0e6;
    black_box(sink);
    (msps as f32, dt)
}

// --- DAB mode I sized symbols ---------------------------------------------

#[test]
fn throughput_dab_mode_i_symbols() {
    let vlen = 1536;
    let symbols = 76; // one transmission frame
    let n = vlen * symbols;
    let repeats = 20;

    let phases = symbol_phases(&qpsk_symbols(n, 0.05, 1));
    let mut out = vec![0.0f32; n];
    let mut f = PhaseOffsetFilter::with_sink(vlen, 0.01, NullSink).unwrap();

    let (msps, dt) = measure_throughput(
        || {
            let wr = run_block(&mut f, black_box(&phases), &mut out);
            black_box(&out);
            wr.out_written
        },
        n,
        repeats,
    );

    let min_msps = minsps_from_env(1.0);
    eprintln!("phase offset: {:.1} Msps over {:.3} s", msps, dt);
    assert!(msps > min_msps, "phase offset filter too slow: {msps:.2} Msps < {min_msps:.2}");
}

#[test]
fn huge_phases_cost_the_same_as_small_ones() {
    let vlen = 256;
    let n = vlen * 200;
    let small = symbol_phases(&qpsk_symbols(n, 0.0, 2));
    let huge: Vec<f32> = small.iter().map(|&p| p + 1.0e7).collect();

    let mut f_small = PhaseOffsetFilter::with_sink(vlen, 0.1, NullSink).unwrap();
    let mut f_huge = PhaseOffsetFilter::with_sink(vlen, 0.1, NullSink).unwrap();
    let mut out = vec![0.0f32; n];

    let (_, t_small) = measure(|| run_block(&mut f_small, &small, &mut out).out_written, n);
    let (_, t_huge) = measure(|| run_block(&mut f_huge, &huge, &mut out).out_written, n);

    // a stepwise fold would need ~6e6 iterations per value here
    assert!(t_huge < t_small * 20.0 + 0.05, "small {t_small:.4}s vs huge {t_huge:.4}s");
}
