//! phase-offset-sdr
//!
//! Per-carrier phase offset estimation and correction for streams of OFDM
//! symbol phase vectors.

pub mod config;
pub mod core;
pub mod diag;
pub mod dsp;
pub mod error;
pub mod observe;
pub mod util;

pub use config::{AlphaPolicy, PhaseOffsetConfig};
pub use diag::{CaptureSink, DiagnosticsSink, FnSink, NullSink, StdoutSink, TracingSink};
pub use dsp::PhaseOffsetFilter;
pub use error::{PhaseOffsetError, Result};

/// `version()` is here so dependents can sanity-check linkage.
pub fn version() -> &'static str { env!("CARGO_PKG_VERSION") }

#[cfg(test)]
mod tests;

// =============================
// PyO3 bindings
// =============================
#[cfg(feature = "python")]
mod python {
    use numpy::{PyArray1, PyReadonlyArray1};
    use pyo3::exceptions::PyValueError;
    use pyo3::{prelude::*, Bound};

    use crate::diag::TracingSink;
    use crate::dsp::PhaseOffsetFilter;

    #[pyclass(name = "PhaseOffsetFilter")]
    struct PyPhaseOffsetFilter {
        inner: PhaseOffsetFilter<TracingSink>,
    }

    #[pymethods]
    impl PyPhaseOffsetFilter {
        #[new]
        fn new(vlen: usize, alpha: f32) -> PyResult<Self> {
            let inner = PhaseOffsetFilter::new(vlen, alpha)
                .map_err(|e| PyValueError::new_err(e.to_string()))?;
            Ok(Self { inner })
        }

        #[getter]
        fn vlen(&self) -> usize { self.inner.vlen() }
        #[getter]
        fn alpha(&self) -> f32 { self.inner.alpha() }
        #[getter]
        fn items_processed(&self) -> u64 { self.inner.items_processed() }

        fn reset(&mut self) { self.inner.reset(); }

        fn estimates<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
            PyArray1::from_slice_bound(py, self.inner.estimates())
        }

        /// Correct a flat float32 array of back-to-back items (length must be
        /// a multiple of `vlen`).
        fn process<'py>(
            &mut self,
            py: Python<'py>,
            phases: PyReadonlyArray1<f32>,
        ) -> PyResult<Bound<'py, PyArray1<f32>>> {
            let phases = phases.as_slice()?;
            let out = self
                .inner
                .process_flat(phases)
                .map_err(|e| PyValueError::new_err(e.to_string()))?;
            Ok(PyArray1::from_vec_bound(py, out))
        }
    }

    #[pymodule]
    fn phase_offset(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<PyPhaseOffsetFilter>()?;
        m.add("__version__", crate::version())?;
        Ok(())
    }
}
