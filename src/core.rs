/// Values consumed from the input and written to the output by one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkReport {
    pub in_read: usize,
    pub out_written: usize,
}

impl WorkReport {
    /// Whole items covered by this report for a given item width.
    #[inline]
    pub fn items(&self, vlen: usize) -> usize {
        if vlen == 0 { 0 } else { self.out_written / vlen }
    }
}

/// Streaming block: transform a slice of input into a slice of output.
/// Vector blocks take interleaved buffers, item `i` at `[i*vlen, (i+1)*vlen)`.
pub trait Block {
    type In: Copy;
    type Out: Copy;
    fn process(&mut self, input: &[Self::In], output: &mut [Self::Out]) -> WorkReport;
}
