use ndarray::{Array2, Axis};
use rustfft::{num_complex::Complex32, FftPlanner};
use crate::seismic::error::{Result, SectionError};
/// Amplitude spectrum averaged over all traces of a section.
#[derive(Clone, Debug)]
pub struct AverageSpectrum {
    pub frequencies_hz: Vec<f32>,
    pub mean_magnitude: Vec<f32>,
}
impl AverageSpectrum {
    pub fn nyquist_hz(&self) -> f32 {
        self.frequencies_hz.last().copied().unwrap_or(0.0)
    }
    /// (frequency, magnitude) of the strongest bin.
    pub fn peak(&self) -> Option<(f32, f32)> {
        self.mean_magnitude
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, &mag)| (self.frequencies_hz[k], mag))
    }
}
/// Non-negative frequency bins of a real transform of `n` samples.
pub fn rfft_frequencies(n: usize, sample_interval_seconds: f32) -> Vec<f32> {
    let span = n as f32 * sample_interval_seconds;
    (0..=n / 2).map(|k| k as f32 / span).collect()
}
/// Transform each column (trace) of `matrix` along the sample axis and
/// average the bin magnitudes across traces. Magnitudes are unnormalised.
pub fn compute_spectrum(
    matrix: &Array2<f32>,
    sample_interval_seconds: f32,
) -> Result<AverageSpectrum> {
    let (sample_count, trace_count) = matrix.dim();
    if sample_count < 2 {
        return Err(SectionError::DegenerateSpectrum {
            samples: sample_count,
        });
    }
    if trace_count == 0 {
        return Err(SectionError::EmptyFile);
    }
    if !(sample_interval_seconds > 0.0) || !sample_interval_seconds.is_finite() {
        return Err(SectionError::InvalidSampleInterval(sample_interval_seconds));
    }
    let bins = sample_count / 2 + 1;
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(sample_count);
    let mut buffer = vec![Complex32::ZERO; sample_count];
    let mut sums = vec![0.0f64; bins];
    for trace in matrix.axis_iter(Axis(1)) {
        for (slot, &v) in buffer.iter_mut().zip(trace.iter()) {
            *slot = Complex32::new(v, 0.0);
        }
        fft.process(&mut buffer);
        for (sum, c) in sums.iter_mut().zip(&buffer) {
            *sum += c.norm() as f64;
        }
    }
    let mean_magnitude = sums
        .into_iter()
        .map(|s| (s / trace_count as f64) as f32)
        .collect();
    Ok(AverageSpectrum {
        frequencies_hz: rfft_frequencies(sample_count, sample_interval_seconds),
        mean_magnitude,
    })
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;
    #[test]
    fn bin_mapping_reaches_nyquist() {
        let matrix = Array2::<f32>::zeros((8, 3));
        let spectrum = compute_spectrum(&matrix, 0.002).unwrap();
        let expected = [0.0, 62.5, 125.0, 187.5, 250.0];
        assert_eq!(spectrum.frequencies_hz.len(), 5);
        for (got, want) in spectrum.frequencies_hz.iter().zip(expected) {
            assert!((got - want).abs() < 1e-3, "{got} != {want}");
        }
        assert!((spectrum.nyquist_hz() - 250.0).abs() < 1e-3);
    }
    #[test]
    fn odd_length_bins() {
        let freqs = rfft_frequencies(7, 0.004);
        assert_eq!(freqs.len(), 4);
        assert!((freqs[3] - 3.0 / 0.028).abs() < 1e-3);
    }
    #[test]
    fn sinusoid_peaks_at_its_frequency() {
        let n = 256;
        let dt = 0.004;
        let f0 = 30.0;
        let matrix = Array2::from_shape_fn((n, 1), |(s, _)| (2.0 * PI * f0 * s as f32 * dt).sin());
        let spectrum = compute_spectrum(&matrix, dt).unwrap();
        let (peak_hz, _) = spectrum.peak().unwrap();
        let resolution = 1.0 / (n as f32 * dt);
        assert!((peak_hz - f0).abs() <= resolution / 2.0, "peak at {peak_hz}");
    }
    #[test]
    fn constant_trace_is_pure_dc() {
        let matrix = Array2::from_elem((16, 2), 3.0f32);
        let spectrum = compute_spectrum(&matrix, 0.001).unwrap();
        assert!((spectrum.mean_magnitude[0] - 48.0).abs() < 1e-3);
        assert!(spectrum.mean_magnitude[1..].iter().all(|m| m.abs() < 1e-3));
        assert_eq!(spectrum.peak().unwrap().0, 0.0);
    }
    #[test]
    fn magnitudes_are_averaged_across_traces() {
        let mut matrix = Array2::<f32>::zeros((4, 2));
        matrix.column_mut(0).fill(1.0);
        matrix.column_mut(1).fill(3.0);
        let spectrum = compute_spectrum(&matrix, 0.002).unwrap();
        // DC magnitudes 4 and 12
        assert!((spectrum.mean_magnitude[0] - 8.0).abs() < 1e-4);
    }
    #[test]
    fn needs_two_samples_and_positive_interval() {
        for rows in [0, 1] {
            let matrix = Array2::<f32>::zeros((rows, 3));
            assert!(matches!(
                compute_spectrum(&matrix, 0.002),
                Err(SectionError::DegenerateSpectrum { samples }) if samples == rows
            ));
        }
        let matrix = Array2::<f32>::zeros((2, 1));
        assert!(compute_spectrum(&matrix, 0.002).is_ok());
        assert!(matches!(
            compute_spectrum(&matrix, 0.0),
            Err(SectionError::InvalidSampleInterval(_))
        ));
    }
}
