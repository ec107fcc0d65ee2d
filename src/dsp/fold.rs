// src/dsp/fold.rs
use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};

/// One quadrant of the unit circle (π/2).
pub const QUARTER_TURN: f32 = FRAC_PI_2;
/// Midpoint of a quadrant (π/4); the fold reference for QPSK carriers.
pub const EIGHTH_TURN: f32 = FRAC_PI_4;

/// Fold a phase into `[0, π/2)`.
///
/// Euclidean remainder evaluated in f64, so the cost does not depend on the
/// magnitude of `v` and negative inputs land on the same representative as
/// repeated `+π/2` steps would give. A result that rounds up to `π/2` when
/// narrowed back to f32 is the start of the next quadrant and maps to `0.0`.
/// Non-finite input yields NaN.
#[inline]
pub fn fold_quadrant(v: f32) -> f32 {
    let r = f64::from(v).rem_euclid(core::f64::consts::FRAC_PI_2) as f32;
    if r >= QUARTER_TURN { 0.0 } else { r }
}

/// Offset of `v` from the nearest-below quadrant midpoint, in `[-π/4, π/4)`.
#[inline]
pub fn quadrant_bias(v: f32) -> f32 {
    fold_quadrant(v) - EIGHTH_TURN
}
