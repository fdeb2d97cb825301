use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Turns one sample window into a normalized magnitude spectrum.
///
/// The FFT plan is built once and reused for every window of the session.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window_len: usize,
}

impl SpectrumAnalyzer {
    pub fn new(window_len: usize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(window_len);
        Self { fft, window_len }
    }

    /// Magnitudes of the first N/2 bins, log1p-compressed, then divided by
    /// the post-compression maximum. Pure silence stays all-zero: the
    /// normalization step is skipped rather than dividing by zero.
    pub fn analyze(&self, window: &[f32]) -> Vec<f32> {
        debug_assert_eq!(window.len(), self.window_len);

        let mut buffer: Vec<Complex<f32>> =
            window.iter().map(|&s| Complex::new(s, 0.0)).collect();
        self.fft.process(&mut buffer);

        let mut magnitudes: Vec<f32> = buffer[..self.window_len / 2]
            .iter()
            .map(|c| c.norm().ln_1p())
            .collect();

        let max = magnitudes.iter().copied().fold(0.0f32, f32::max);
        if max > 0.0 {
            for m in &mut magnitudes {
                *m /= max;
            }
        }

        magnitudes
    }
}

/// Centered moving average, valid mode: no padding, output length
/// `len - kernel + 1`. Kernel sizes of 0/1, or inputs shorter than the
/// kernel, pass the spectrum through unchanged.
pub fn smooth(spectrum: &[f32], kernel: usize) -> Vec<f32> {
    if kernel <= 1 || spectrum.len() < kernel {
        return spectrum.to_vec();
    }
    let inv = 1.0 / kernel as f32;
    spectrum
        .windows(kernel)
        .map(|w| w.iter().sum::<f32>() * inv)
        .collect()
}

/// Pointwise multiply by a symmetric bell centered on the middle index,
/// width proportional to length: `exp(-(i - L/2)^2 / (L/4)^2)`. De-emphasizes
/// the spectrum's extremes; never increases a value.
pub fn weight_bell(spectrum: &[f32]) -> Vec<f32> {
    let len = spectrum.len();
    if len == 0 {
        return Vec::new();
    }
    let center = len as f32 / 2.0;
    let width = (len as f32 / 4.0).max(f32::MIN_POSITIVE);
    spectrum
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let d = (i as f32 - center) / width;
            v * (-d * d).exp()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spectrum_has_half_window_length_and_unit_range() {
        let analyzer = SpectrumAnalyzer::new(1024);
        let window: Vec<f32> = (0..1024)
            .map(|i| (2.0 * std::f32::consts::PI * 60.0 * i as f32 / 1024.0).sin())
            .collect();
        let spectrum = analyzer.analyze(&window);
        assert_eq!(spectrum.len(), 512);
        assert!(spectrum.iter().all(|&v| (0.0..=1.0).contains(&v)));
        // Something normalized to exactly 1.0 must exist.
        assert!(spectrum.iter().any(|&v| v == 1.0));
    }

    #[test]
    fn silence_yields_all_zero_without_nan() {
        let analyzer = SpectrumAnalyzer::new(1024);
        let spectrum = analyzer.analyze(&vec![0.0; 1024]);
        assert_eq!(spectrum.len(), 512);
        assert!(spectrum.iter().all(|&v| v == 0.0 && v.is_finite()));
    }

    #[test]
    fn single_tone_peaks_at_its_bin() {
        let analyzer = SpectrumAnalyzer::new(1024);
        // Bin 60 of a 1024-point transform.
        let window: Vec<f32> = (0..1024)
            .map(|i| (2.0 * std::f32::consts::PI * 60.0 * i as f32 / 1024.0).sin())
            .collect();
        let spectrum = analyzer.analyze(&window);
        let peak = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 60);
        assert_eq!(spectrum[60], 1.0);
    }

    #[test]
    fn smoothing_reduces_length_by_kernel_minus_one() {
        let spectrum: Vec<f32> = (0..32).map(|i| i as f32).collect();
        let smoothed = smooth(&spectrum, 5);
        assert_eq!(smoothed.len(), 32 - 5 + 1);
        // Moving average of a ramp is the center value.
        assert!((smoothed[0] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn smoothing_is_deterministic() {
        let spectrum: Vec<f32> = (0..64).map(|i| ((i * 7) % 13) as f32 / 13.0).collect();
        assert_eq!(smooth(&spectrum, 5), smooth(&spectrum, 5));
    }

    #[test]
    fn smoothing_passes_through_short_input() {
        let spectrum = vec![0.5, 0.25];
        assert_eq!(smooth(&spectrum, 5), spectrum);
        assert_eq!(smooth(&spectrum, 1), spectrum);
    }

    #[test]
    fn weighting_never_increases_values() {
        let spectrum: Vec<f32> = (0..100).map(|i| (i as f32 / 99.0).sqrt()).collect();
        let weighted = weight_bell(&spectrum);
        assert_eq!(weighted.len(), spectrum.len());
        for (w, s) in weighted.iter().zip(spectrum.iter()) {
            assert!(w <= s);
        }
    }

    #[test]
    fn weighting_emphasizes_the_middle() {
        let spectrum = vec![1.0; 101];
        let weighted = weight_bell(&spectrum);
        assert!(weighted[50] > weighted[0]);
        assert!(weighted[50] > weighted[100]);
        assert!((weighted[50] - 1.0).abs() < 0.01);
    }

    #[test]
    fn weighting_handles_empty_input() {
        assert!(weight_bell(&[]).is_empty());
    }
}
