use num_complex::Complex32 as C32;
use crate::core::{Block, WorkReport};
use crate::dsp::fold::EIGHTH_TURN;

/// Root-mean-square of a real slice.
#[inline]
pub fn rms(x: &[f32]) -> f32 {
    if x.is_empty() { return 0.0; }
    let s: f32 = x.iter().map(|v| v*v).sum();
    (s / (x.len() as f32)).sqrt()
}

/// Per-carrier phase (radians, `(-π, π]`) of a block of complex subcarriers.
pub fn symbol_phases(carriers: &[C32]) -> Vec<f32> {
    carriers.iter().map(|z| z.arg()).collect()
}

/// Deterministic QPSK carriers at `(2k+1)·π/4`, every one rotated by `bias`.
///
/// Symbol choice comes from a 32-bit LCG seeded with `seed`, so tests and
/// throughput runs see the same constellation every time.
pub fn qpsk_symbols(n: usize, bias: f32, seed: u32) -> Vec<C32> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let quadrant = (state >> 30) as f32;
            C32::from_polar(1.0, (2.0 * quadrant + 1.0) * EIGHTH_TURN + bias)
        })
        .collect()
}

/// Measure throughput of a closure that processes `n` samples; returns (Msps, seconds).
pub fn measure<F: FnMut() -> usize>(mut f: F, n: usize) -> (f32, f32) {
    let t0 = std::time::Instant::now();
    let _ = f();
    let dt = t0.elapsed().as_secs_f32();
    let msps = (n as f32) / dt / 1e6;
    (msps, dt)
}

/// Run a `Block` into a preallocated output buffer.
#[inline]
pub fn run_block<B: Block>(blk: &mut B, input: &[B::In], output: &mut [B::Out]) -> WorkReport {
    blk.process(input, output)
}

/// Convenience: run a `Block` and collect output into a Vec of the same length as input.
/// Values the block did not write keep their default.
#[inline]
pub fn run_block_vec<B: Block>(blk: &mut B, input: &[B::In]) -> (Vec<B::Out>, WorkReport)
where
    B::Out: Default,
{
    let mut out = vec![B::Out::default(); input.len()];
    let wr = blk.process(input, &mut out);
    (out, wr)
}
