// src/dsp/mod.rs

pub mod fold;
pub use fold::{fold_quadrant, quadrant_bias, EIGHTH_TURN, QUARTER_TURN};

pub mod phase_offset;
pub use phase_offset::PhaseOffsetFilter;
