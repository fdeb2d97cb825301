use crate::config::DotsConfig;

use super::{lerp_rgb, ParameterMapper, Rgb, VisualParams};

/// Ring of dots whose shared radius breathes with low-frequency energy.
///
/// A single scalar, the mean of the first `len / (dots/2)` bins, drives
/// everything: a power-law response sets the ring radius, the radius sets the
/// dot size, and the same scalar picks the dot color off a two-segment
/// gradient.
pub struct RadialDots {
    cfg: DotsConfig,
}

impl RadialDots {
    pub fn new(cfg: DotsConfig) -> Self {
        Self { cfg }
    }

    fn band_average(&self, spectrum: &[f32]) -> f32 {
        if spectrum.is_empty() {
            return 0.0;
        }
        let divisor = (self.cfg.dot_count / 2).max(1);
        let take = (spectrum.len() / divisor).clamp(1, spectrum.len());
        spectrum[..take].iter().sum::<f32>() / take as f32
    }

    fn gradient(&self, value: f32) -> Rgb {
        let low = Rgb::from(self.cfg.gradient_low);
        let mid = Rgb::from(self.cfg.gradient_mid);
        let high = Rgb::from(self.cfg.gradient_high);
        if value < 0.5 {
            lerp_rgb(low, mid, value * 2.0)
        } else {
            lerp_rgb(mid, high, (value - 0.5) * 2.0)
        }
    }
}

impl ParameterMapper for RadialDots {
    fn style(&self) -> &'static str {
        "dots"
    }

    fn map(&self, spectrum: &[f32], _elapsed: f32) -> VisualParams {
        let cfg = &self.cfg;
        let average = self.band_average(spectrum);
        let swing = average.powf(cfg.power);
        let ring_radius = cfg.base_radius + swing * (cfg.max_radius - cfg.base_radius);
        let dot_radius = cfg.min_dot_radius
            + (ring_radius / cfg.max_radius) * (cfg.max_dot_radius - cfg.min_dot_radius);

        VisualParams::Dots {
            ring_radius,
            dot_radius,
            dot_count: cfg.dot_count,
            color: self.gradient(average),
            ring_width: cfg.ring_width,
            dot_gap: cfg.dot_gap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> RadialDots {
        RadialDots::new(DotsConfig::default())
    }

    #[test]
    fn zero_spectrum_collapses_to_base_radius() {
        let m = mapper();
        match m.map(&vec![0.0; 512], 0.0) {
            VisualParams::Dots {
                ring_radius, color, ..
            } => {
                assert_eq!(ring_radius, 50.0);
                // Gradient 0-endpoint.
                assert_eq!(color, Rgb::new(0, 0, 255));
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn empty_spectrum_collapses_to_base_radius() {
        let m = mapper();
        match m.map(&[], 0.0) {
            VisualParams::Dots { ring_radius, .. } => assert_eq!(ring_radius, 50.0),
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn saturated_low_band_approaches_max_radius() {
        let m = mapper();
        // Every bin in the averaged sub-band at the normalization ceiling.
        match m.map(&vec![1.0; 512], 0.0) {
            VisualParams::Dots {
                ring_radius, color, ..
            } => {
                assert!((ring_radius - 250.0).abs() < 1e-3);
                assert_eq!(color, Rgb::new(255, 0, 255));
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn low_band_spike_raises_the_ring() {
        let m = mapper();
        // A single normalized peak inside the averaged sub-band.
        let mut spectrum = vec![0.0f32; 512];
        spectrum[4] = 1.0;
        match m.map(&spectrum, 0.0) {
            VisualParams::Dots { ring_radius, .. } => {
                assert!(ring_radius > 50.0);
                assert!(ring_radius < 250.0);
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn mapping_is_deterministic() {
        let m = mapper();
        let spectrum: Vec<f32> = (0..512).map(|i| (i % 17) as f32 / 16.0).collect();
        assert_eq!(m.map(&spectrum, 1.5), m.map(&spectrum, 1.5));
    }

    #[test]
    fn dot_radius_tracks_ring_radius() {
        let m = mapper();
        let quiet = m.map(&vec![0.0; 512], 0.0);
        let loud = m.map(&vec![1.0; 512], 0.0);
        let radius_of = |p: &VisualParams| match p {
            VisualParams::Dots { dot_radius, .. } => *dot_radius,
            _ => unreachable!(),
        };
        assert!(radius_of(&loud) > radius_of(&quiet));
        assert!(radius_of(&loud) <= 4.0 + 1e-6);
        assert!(radius_of(&quiet) >= 2.0);
    }
}
