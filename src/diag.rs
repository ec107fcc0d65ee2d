//! Periodic estimate snapshots.
//!
//! The filter formats its estimate array as `offset=[e0,e1,...,];` and hands
//! the line to a [`DiagnosticsSink`]. Sinks only observe; nothing they do can
//! reach back into filter state.

use std::fmt::Write as _;

/// Target used by [`TracingSink`] events.
pub const DIAG_TARGET: &str = "phase_offset::diag";

pub trait DiagnosticsSink {
    fn emit(&mut self, line: &str);
}

impl<S: DiagnosticsSink + ?Sized> DiagnosticsSink for &mut S {
    #[inline]
    fn emit(&mut self, line: &str) {
        (**self).emit(line)
    }
}

impl<S: DiagnosticsSink + ?Sized> DiagnosticsSink for Box<S> {
    #[inline]
    fn emit(&mut self, line: &str) {
        (**self).emit(line)
    }
}

/// Forwards snapshots to `tracing` at INFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn emit(&mut self, line: &str) {
        tracing::info!(target: DIAG_TARGET, "{}", line);
    }
}

/// Writes snapshots straight to stdout, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl DiagnosticsSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Keeps every snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    lines: Vec<String>,
}

impl CaptureSink {
    pub fn new() -> Self { Self::default() }
    pub fn lines(&self) -> &[String] { &self.lines }
    pub fn len(&self) -> usize { self.lines.len() }
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }
    pub fn clear(&mut self) { self.lines.clear(); }
}

impl DiagnosticsSink for CaptureSink {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    #[inline]
    fn emit(&mut self, _line: &str) {}
}

/// Closure adapter: `FnSink(|line| ...)`.
pub struct FnSink<F: FnMut(&str)>(pub F);

impl<F: FnMut(&str)> DiagnosticsSink for FnSink<F> {
    #[inline]
    fn emit(&mut self, line: &str) {
        (self.0)(line)
    }
}

/// `offset=[` + `{:.6},` per carrier + `];`
pub fn format_snapshot(estimates: &[f32]) -> String {
    // "-0.785398," is 10 bytes; leave some slack for larger magnitudes
    let mut s = String::with_capacity(10 + estimates.len() * 12);
    s.push_str("offset=[");
    for e in estimates {
        // writing into a String cannot fail
        let _ = write!(s, "{e:.6},");
    }
    s.push_str("];");
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_format_is_comma_terminated() {
        assert_eq!(format_snapshot(&[0.0, -0.5, 1.25]), "offset=[0.000000,-0.500000,1.250000,];");
    }

    #[test]
    fn empty_snapshot() {
        assert_eq!(format_snapshot(&[]), "offset=[];");
    }

    #[test]
    fn six_decimal_rounding() {
        let s = format_snapshot(&[core::f32::consts::FRAC_PI_4, -core::f32::consts::FRAC_PI_8]);
        assert_eq!(s, "offset=[0.785398,-0.392699,];");
    }

    #[test]
    fn boxed_and_borrowed_sinks_forward() {
        fn emit_via<S: DiagnosticsSink>(mut sink: S, line: &str) { sink.emit(line); }

        let mut cap = CaptureSink::new();
        emit_via(&mut cap, "a");
        assert_eq!(cap.lines(), ["a".to_string()]);

        let mut boxed: Box<dyn DiagnosticsSink + Send> = Box::new(NullSink);
        boxed.emit("dropped");

        let mut seen = Vec::new();
        let mut f = FnSink(|l: &str| seen.push(l.len()));
        f.emit("abc");
        drop(f);
        assert_eq!(seen, vec![3]);
    }
}
