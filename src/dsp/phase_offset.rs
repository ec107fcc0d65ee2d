use crate::config::{AlphaPolicy, PhaseOffsetConfig};
use crate::core::{Block, WorkReport};
use crate::diag::{format_snapshot, DiagnosticsSink, TracingSink};
use crate::dsp::fold::quadrant_bias;
use crate::error::{PhaseOffsetError, Result};

/// Per-carrier phase offset tracker for OFDM symbol vectors.
///
/// Each item is `vlen` phases (radians), one per carrier. For carrier `j` the
/// filter folds the phase into `[0, π/2)`, measures its distance from `π/4`,
/// and runs that through a one-pole average:
///
/// `est[j] = (1 - α)·est[j] + α·(fold(v) - π/4)`, output `v - est[j]`.
///
/// The fold only drives the estimate; the output is the raw phase minus the
/// freshly updated estimate. Every `diag_interval` items a snapshot of the
/// estimates goes to the diagnostics sink.
#[derive(Debug, Clone)]
pub struct PhaseOffsetFilter<S = TracingSink> {
    vlen: usize,
    alpha: f32,
    one_minus_alpha: f32,
    estimates: Vec<f32>,
    items: u64,
    diag_interval: u64,
    sink: S,
}

impl PhaseOffsetFilter<TracingSink> {
    /// Filter with snapshots logged through `tracing`.
    pub fn new(vlen: usize, alpha: f32) -> Result<Self> {
        Self::with_sink(vlen, alpha, TracingSink)
    }
}

impl<S: DiagnosticsSink> PhaseOffsetFilter<S> {
    pub fn with_sink(vlen: usize, alpha: f32, sink: S) -> Result<Self> {
        Self::from_config(&PhaseOffsetConfig::new(vlen, alpha), sink)
    }

    pub fn from_config(cfg: &PhaseOffsetConfig, sink: S) -> Result<Self> {
        cfg.validate()?;
        if !cfg.alpha_in_range() {
            match cfg.alpha_policy {
                AlphaPolicy::Reject => return Err(PhaseOffsetError::AlphaOutOfRange(cfg.alpha)),
                AlphaPolicy::Accept => tracing::warn!(
                    alpha = cfg.alpha,
                    "smoothing factor outside [0, 1]; offset estimates will not settle"
                ),
            }
        }

        let mut estimates = Vec::new();
        estimates
            .try_reserve_exact(cfg.vlen)
            .map_err(|source| PhaseOffsetError::Allocation { vlen: cfg.vlen, source })?;
        estimates.resize(cfg.vlen, 0.0);

        tracing::debug!(
            vlen = cfg.vlen,
            alpha = cfg.alpha,
            diag_interval = cfg.diag_interval,
            "phase offset filter ready"
        );

        Ok(Self {
            vlen: cfg.vlen,
            alpha: cfg.alpha,
            one_minus_alpha: 1.0 - cfg.alpha,
            estimates,
            items: 0,
            diag_interval: cfg.diag_interval,
            sink,
        })
    }

    #[inline] pub fn vlen(&self) -> usize { self.vlen }
    #[inline] pub fn alpha(&self) -> f32 { self.alpha }
    #[inline] pub fn items_processed(&self) -> u64 { self.items }
    #[inline] pub fn diag_interval(&self) -> u64 { self.diag_interval }

    /// Current per-carrier estimates (read-only).
    #[inline]
    pub fn estimates(&self) -> &[f32] { &self.estimates }

    pub fn sink(&self) -> &S { &self.sink }
    pub fn sink_mut(&mut self) -> &mut S { &mut self.sink }
    pub fn into_sink(self) -> S { self.sink }

    /// Zero every estimate and the item counter.
    pub fn reset(&mut self) {
        self.estimates.fill(0.0);
        self.items = 0;
    }

    /// Diagnostics line for the current estimates.
    pub fn snapshot(&self) -> String {
        format_snapshot(&self.estimates)
    }

    /// Correct one item. `output` may be longer than `vlen`; the excess is
    /// left alone.
    pub fn process_item(&mut self, item: &[f32], output: &mut [f32]) -> Result<()> {
        if item.len() != self.vlen {
            return Err(PhaseOffsetError::ShapeMismatch { expected: self.vlen, actual: item.len() });
        }
        if output.len() < self.vlen {
            return Err(PhaseOffsetError::OutputTooShort { needed: self.vlen, actual: output.len() });
        }
        self.correct_item(item, &mut output[..self.vlen]);
        Ok(())
    }

    /// Correct a batch of items in order. Widths are checked up front, so a
    /// rejected batch leaves the estimates untouched.
    pub fn process_items<I: AsRef<[f32]>>(&mut self, items: &[I]) -> Result<Vec<Vec<f32>>> {
        if let Some(bad) = items.iter().map(|it| it.as_ref().len()).find(|&n| n != self.vlen) {
            return Err(PhaseOffsetError::ShapeMismatch { expected: self.vlen, actual: bad });
        }
        let mut out = Vec::with_capacity(items.len());
        for it in items {
            let mut y = vec![0.0f32; self.vlen];
            self.correct_item(it.as_ref(), &mut y);
            out.push(y);
        }
        Ok(out)
    }

    /// Correct a flat buffer of back-to-back items.
    pub fn process_flat(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        let mut out = vec![0.0f32; input.len()];
        self.process_flat_into(input, &mut out)?;
        Ok(out)
    }

    /// Flat-buffer path into caller storage. `input` must hold whole items.
    pub fn process_flat_into(&mut self, input: &[f32], output: &mut [f32]) -> Result<WorkReport> {
        let partial = if self.vlen == 0 { input.len() } else { input.len() % self.vlen };
        if partial != 0 {
            return Err(PhaseOffsetError::ShapeMismatch { expected: self.vlen, actual: partial });
        }
        if output.len() < input.len() {
            return Err(PhaseOffsetError::OutputTooShort { needed: input.len(), actual: output.len() });
        }
        let n = self.correct_flat(input, output);
        Ok(WorkReport { in_read: n, out_written: n })
    }

    /// Whole items from interleaved buffers; returns values consumed.
    fn correct_flat(&mut self, input: &[f32], output: &mut [f32]) -> usize {
        if self.vlen == 0 {
            return 0;
        }
        let vlen = self.vlen;
        let n_items = input.len().min(output.len()) / vlen;
        let n = n_items * vlen;
        for (x, y) in input[..n].chunks_exact(vlen).zip(output[..n].chunks_exact_mut(vlen)) {
            self.correct_item(x, y);
        }
        n
    }

    #[inline]
    fn correct_item(&mut self, item: &[f32], output: &mut [f32]) {
        let a = self.alpha;
        let b = self.one_minus_alpha;
        for ((est, &v), y) in self.estimates.iter_mut().zip(item).zip(output.iter_mut()) {
            // hold the estimate on NaN/inf so one bad sample cannot poison the carrier
            if v.is_finite() {
                *est = b * *est + a * quadrant_bias(v);
            }
            *y = v - *est;
        }

        self.items += 1;
        if self.diag_interval != 0 && self.items % self.diag_interval == 0 {
            let line = format_snapshot(&self.estimates);
            self.sink.emit(&line);
        }
    }
}

impl<S: DiagnosticsSink> Block for PhaseOffsetFilter<S> {
    type In = f32;
    type Out = f32;

    /// Consumes as many whole items as both buffers hold; a trailing partial
    /// item stays unread.
    fn process(&mut self, input: &[f32], output: &mut [f32]) -> WorkReport {
        let n = self.correct_flat(input, output);
        WorkReport { in_read: n, out_written: n }
    }
}
