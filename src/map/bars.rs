use crate::audio::spectrum::{smooth, weight_bell};
use crate::config::BarsConfig;

use super::{hue_to_rgb, ParameterMapper, Rgb, VisualParams};

/// Horizontal bar spectrum: the shaped spectrum is partitioned into bands by
/// integer division, each band's representative bin sets a bar height through
/// a power-law response, and the bar color sweeps the hue wheel with band
/// position.
pub struct BarSpectrum {
    cfg: BarsConfig,
}

impl BarSpectrum {
    pub fn new(cfg: BarsConfig) -> Self {
        Self { cfg }
    }

    fn shape(&self, spectrum: &[f32]) -> Vec<f32> {
        let smoothed = smooth(spectrum, self.cfg.smooth_kernel);
        if self.cfg.weighting {
            weight_bell(&smoothed)
        } else {
            smoothed
        }
    }
}

impl ParameterMapper for BarSpectrum {
    fn style(&self) -> &'static str {
        "bars"
    }

    fn map(&self, spectrum: &[f32], _elapsed: f32) -> VisualParams {
        let cfg = &self.cfg;
        let shaped = self.shape(spectrum);
        let division = cfg.band_division.max(1);
        let bands = shaped.len() / division;

        let mut heights = Vec::with_capacity(bands);
        let mut colors = Vec::with_capacity(bands);
        for i in 0..bands {
            // Band indices wrap so the band count stays decoupled from
            // spectrum length.
            let bin = (i * division) % shaped.len();
            let height = (shaped[bin].powf(cfg.power) * cfg.max_height).max(cfg.min_height);
            heights.push(height);
            colors.push(hue_to_rgb(i as f32 / bands as f32 * 360.0));
        }

        VisualParams::Bars { heights, colors }
    }
}
