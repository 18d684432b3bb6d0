use log::debug;
use ndarray::Array2;
use crate::seismic::error::{Result, SectionError};
use crate::seismic::header;
use crate::seismic::reader::TraceFile;
/// A 2D line ready for display: amplitudes as samples x traces plus
/// both axes.
#[derive(Clone, Debug)]
pub struct Section {
    /// `[sample, trace]`
    pub amplitudes: Array2<f32>,
    /// Header value of every trace, in file order.
    pub coords: Vec<i32>,
    /// Sample times in milliseconds.
    pub samples_ms: Vec<f32>,
}
impl Section {
    pub fn trace_count(&self) -> usize {
        self.amplitudes.ncols()
    }
    pub fn sample_count(&self) -> usize {
        self.amplitudes.nrows()
    }
    /// Spacing of the first two samples, in seconds.
    pub fn sample_interval_seconds(&self) -> Result<f32> {
        match self.samples_ms.as_slice() {
            [first, second, ..] => Ok((second - first) / 1000.0),
            _ => Err(SectionError::DegenerateSpectrum {
                samples: self.samples_ms.len(),
            }),
        }
    }
    /// (min, max) of the coordinate axis.
    pub fn coord_extent(&self) -> (i32, i32) {
        let min = self.coords.iter().copied().min().unwrap_or(0);
        let max = self.coords.iter().copied().max().unwrap_or(0);
        (min, max)
    }
    /// (first, last) sample time.
    pub fn time_extent(&self) -> (f32, f32) {
        let first = self.samples_ms.first().copied().unwrap_or(0.0);
        let last = self.samples_ms.last().copied().unwrap_or(0.0);
        (first, last)
    }
}
/// Read every trace of `file` into a section labelled by the header word
/// starting at `coord_byte`.
pub fn assemble(file: &TraceFile, coord_byte: usize) -> Result<Section> {
    let trace_count = file.trace_count();
    if trace_count == 0 {
        return Err(SectionError::EmptyFile);
    }
    header::word_width(coord_byte)?;
    let sample_count = file.sample_count();
    let mut coords = Vec::with_capacity(trace_count);
    let mut stacked = Vec::with_capacity(trace_count * sample_count);
    for (index, trace) in file.traces().enumerate() {
        coords.push(file.header_field(index, coord_byte)?);
        stacked.extend(trace?);
    }
    // One row per trace as read, then flipped so rows are samples.
    let by_trace = Array2::from_shape_vec((trace_count, sample_count), stacked)
        .map_err(|e| SectionError::Format(format!("trace lengths disagree: {e}")))?;
    let amplitudes = by_trace.reversed_axes().as_standard_layout().into_owned();
    debug!(
        "assembled section {}x{} on header byte {coord_byte}",
        amplitudes.nrows(),
        amplitudes.ncols()
    );
    Ok(Section {
        amplitudes,
        coords,
        samples_ms: file.sample_axis(),
    })
}
