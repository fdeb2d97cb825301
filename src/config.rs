use serde::Deserialize;
use std::path::PathBuf;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Render the leftover sub-window tail as one final zero-padded frame.
    #[serde(default)]
    pub drain_partial_frame: bool,
    #[serde(default)]
    pub dots: DotsConfig,
    #[serde(default)]
    pub bars: BarsConfig,
    #[serde(default)]
    pub ring: RingConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_crf")]
    pub crf: u32,
    #[serde(default = "default_codec")]
    pub codec: String,
    #[serde(default = "default_pix_fmt")]
    pub pix_fmt: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_window_len")]
    pub window_len: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DotsConfig {
    #[serde(default = "default_base_radius")]
    pub base_radius: f32,
    #[serde(default = "default_max_radius")]
    pub max_radius: f32,
    #[serde(default = "default_dots_power")]
    pub power: f32,
    #[serde(default = "default_dot_count")]
    pub dot_count: usize,
    #[serde(default = "default_min_dot_radius")]
    pub min_dot_radius: f32,
    #[serde(default = "default_max_dot_radius")]
    pub max_dot_radius: f32,
    #[serde(default = "default_gradient_low")]
    pub gradient_low: [u8; 3],
    #[serde(default = "default_gradient_mid")]
    pub gradient_mid: [u8; 3],
    #[serde(default = "default_gradient_high")]
    pub gradient_high: [u8; 3],
    /// Width of a solid ring drawn under the dot orbit; 0 disables it.
    #[serde(default)]
    pub ring_width: f32,
    #[serde(default = "default_dot_gap")]
    pub dot_gap: f32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BarsConfig {
    #[serde(default = "default_band_division")]
    pub band_division: usize,
    #[serde(default = "default_bars_power")]
    pub power: f32,
    #[serde(default = "default_max_height")]
    pub max_height: f32,
    #[serde(default = "default_min_height")]
    pub min_height: f32,
    #[serde(default = "default_smooth_kernel")]
    pub smooth_kernel: usize,
    #[serde(default = "default_weighting")]
    pub weighting: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RingConfig {
    #[serde(default = "default_ring_radius")]
    pub radius: f32,
    #[serde(default = "default_ring_power")]
    pub power: f32,
    #[serde(default = "default_waves")]
    pub waves: usize,
    #[serde(default = "default_points")]
    pub points: usize,
    #[serde(default = "default_dance_speed")]
    pub dance_speed: f32,
    #[serde(default = "default_min_wave_freq")]
    pub min_wave_freq: f32,
    #[serde(default = "default_max_wave_freq")]
    pub max_wave_freq: f32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            crf: default_crf(),
            codec: default_codec(),
            pix_fmt: default_pix_fmt(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_len: default_window_len(),
        }
    }
}

impl Default for DotsConfig {
    fn default() -> Self {
        Self {
            base_radius: default_base_radius(),
            max_radius: default_max_radius(),
            power: default_dots_power(),
            dot_count: default_dot_count(),
            min_dot_radius: default_min_dot_radius(),
            max_dot_radius: default_max_dot_radius(),
            gradient_low: default_gradient_low(),
            gradient_mid: default_gradient_mid(),
            gradient_high: default_gradient_high(),
            ring_width: 0.0,
            dot_gap: default_dot_gap(),
        }
    }
}

impl Default for BarsConfig {
    fn default() -> Self {
        Self {
            band_division: default_band_division(),
            power: default_bars_power(),
            max_height: default_max_height(),
            min_height: default_min_height(),
            smooth_kernel: default_smooth_kernel(),
            weighting: default_weighting(),
        }
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radius: default_ring_radius(),
            power: default_ring_power(),
            waves: default_waves(),
            points: default_points(),
            dance_speed: default_dance_speed(),
            min_wave_freq: default_min_wave_freq(),
            max_wave_freq: default_max_wave_freq(),
        }
    }
}

fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }
fn default_fps() -> u32 { 30 }
fn default_crf() -> u32 { 18 }
fn default_codec() -> String { "libx264".into() }
fn default_pix_fmt() -> String { "yuv420p".into() }
fn default_window_len() -> usize { 1024 }
fn default_base_radius() -> f32 { 50.0 }
fn default_max_radius() -> f32 { 250.0 }
fn default_dots_power() -> f32 { 1.5 }
fn default_dot_count() -> usize { 50 }
fn default_min_dot_radius() -> f32 { 2.0 }
fn default_max_dot_radius() -> f32 { 4.0 }
fn default_gradient_low() -> [u8; 3] { [0, 0, 255] }
fn default_gradient_mid() -> [u8; 3] { [0, 255, 255] }
fn default_gradient_high() -> [u8; 3] { [255, 0, 255] }
fn default_dot_gap() -> f32 { 30.0 }
fn default_band_division() -> usize { 4 }
fn default_bars_power() -> f32 { 0.5 }
fn default_max_height() -> f32 { 300.0 }
fn default_min_height() -> f32 { 5.0 }
fn default_smooth_kernel() -> usize { 5 }
fn default_weighting() -> bool { true }
fn default_ring_radius() -> f32 { 150.0 }
fn default_ring_power() -> f32 { 2.0 }
fn default_waves() -> usize { 3 }
fn default_points() -> usize { 360 }
fn default_dance_speed() -> f32 { 0.1 }
fn default_min_wave_freq() -> f32 { 0.02 }
fn default_max_wave_freq() -> f32 { 0.05 }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.output.width, 800);
        assert_eq!(cfg.output.fps, 30);
        assert_eq!(cfg.analysis.window_len, 1024);
        assert!(!cfg.drain_partial_frame);
        assert_eq!(cfg.dots.dot_count, 50);
        assert_eq!(cfg.bars.band_division, 4);
        assert_eq!(cfg.ring.waves, 3);
    }

    #[test]
    fn partial_sections_fill_in() {
        let cfg: Config = toml::from_str(
            r#"
            drain_partial_frame = true

            [output]
            width = 1080
            height = 1080

            [dots]
            power = 2.0
            "#,
        )
        .unwrap();
        assert!(cfg.drain_partial_frame);
        assert_eq!(cfg.output.width, 1080);
        assert_eq!(cfg.output.fps, 30);
        assert_eq!(cfg.dots.power, 2.0);
        assert_eq!(cfg.dots.base_radius, 50.0);
    }
}
