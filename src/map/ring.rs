use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::RingConfig;

use super::{ParameterMapper, Rgb, VisualParams};

/// Sine waves orbiting a fixed ring: spectral energy displaces each point
/// radially, the whole figure rotates with elapsed time, and the color cycles
/// through phase-shifted sine waves.
///
/// Per-wave frequencies are drawn once, from a seeded generator, so the same
/// seed always reproduces the same motion.
pub struct TimeRing {
    cfg: RingConfig,
    wave_frequencies: Vec<f32>,
}

impl TimeRing {
    pub fn new(cfg: RingConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let wave_frequencies = (0..cfg.waves)
            .map(|_| {
                if cfg.max_wave_freq > cfg.min_wave_freq {
                    rng.random_range(cfg.min_wave_freq..cfg.max_wave_freq)
                } else {
                    cfg.min_wave_freq
                }
            })
            .collect();
        Self {
            cfg,
            wave_frequencies,
        }
    }
}

/// Color cycling with elapsed time: red and green ride phase-shifted sines,
/// blue stays saturated.
fn time_color(elapsed: f32) -> Rgb {
    let channel = |phase: f32| {
        (127.5 * ((elapsed + phase).sin() + 1.0)).clamp(0.0, 255.0) as u8
    };
    Rgb::new(channel(0.0), channel(2.0), 255)
}

impl ParameterMapper for TimeRing {
    fn style(&self) -> &'static str {
        "ring"
    }

    fn map(&self, spectrum: &[f32], elapsed: f32) -> VisualParams {
        let cfg = &self.cfg;
        let points = cfg.points.max(1);

        let amplitudes: Vec<f32> = (0..points)
            .map(|p| {
                if spectrum.is_empty() {
                    return 0.0;
                }
                let bin = ((p as f32 / points as f32) * (spectrum.len() - 1) as f32) as usize;
                spectrum[bin % spectrum.len()].powf(cfg.power) * cfg.radius * 0.5
            })
            .collect();

        let tau = 2.0 * std::f32::consts::PI;
        let wave_offsets: Vec<f32> = self
            .wave_frequencies
            .iter()
            .enumerate()
            .map(|(i, &freq)| i as f32 * tau / cfg.waves.max(1) as f32 + elapsed * freq)
            .collect();

        VisualParams::Ring {
            radius: cfg.radius,
            rotation: elapsed * cfg.dance_speed,
            wave_offsets,
            amplitudes,
            color: time_color(elapsed),
        }
    }
}
