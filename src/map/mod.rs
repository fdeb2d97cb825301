pub mod bars;
pub mod dots;
pub mod ring;

use anyhow::Result;

use crate::config::Config;

/// An RGB triple, channels in 0-255.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Rgb::new(c[0], c[1], c[2])
    }
}

/// The drawable parameters for one tick, one variant per visual style.
/// Produced fresh every tick and never mutated afterwards; the renderer
/// consumes it as an immutable snapshot.
#[derive(Clone, Debug, PartialEq)]
pub enum VisualParams {
    Dots {
        /// Radius of the ring all dots sit on.
        ring_radius: f32,
        dot_radius: f32,
        dot_count: usize,
        color: Rgb,
        /// Width of the optional solid inner ring; 0 disables it.
        ring_width: f32,
        /// Extra distance between the inner ring and the dot orbit.
        dot_gap: f32,
    },
    Bars {
        /// Bar heights in pixels, one per band.
        heights: Vec<f32>,
        colors: Vec<Rgb>,
    },
    Ring {
        radius: f32,
        /// Shared rotation of all waves, radians.
        rotation: f32,
        /// Additional per-wave angular offset (base offset plus phase drift).
        wave_offsets: Vec<f32>,
        /// Radial displacement per sample point around the circle.
        amplitudes: Vec<f32>,
        color: Rgb,
    },
}

/// Converts a magnitude spectrum plus elapsed time into drawable parameters.
/// The one place where behavior varies per visual style.
pub trait ParameterMapper {
    fn style(&self) -> &'static str;
    fn map(&self, spectrum: &[f32], elapsed: f32) -> VisualParams;
}

pub const STYLES: &[&str] = &["dots", "bars", "ring"];

pub fn create_mapper(style: &str, config: &Config, seed: u64) -> Result<Box<dyn ParameterMapper>> {
    match style {
        "dots" => Ok(Box::new(dots::RadialDots::new(config.dots.clone()))),
        "bars" => Ok(Box::new(bars::BarSpectrum::new(config.bars.clone()))),
        "ring" => Ok(Box::new(ring::TimeRing::new(config.ring.clone(), seed))),
        other => anyhow::bail!("Unknown style '{}'. Available styles: {:?}", other, STYLES),
    }
}

/// Linear interpolation between two colors.
pub(crate) fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

/// Hue (degrees) at full saturation and value, for the hue-sweep bar colors.
pub(crate) fn hue_to_rgb(hue: f32) -> Rgb {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    Rgb::new(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        let a = Rgb::new(0, 0, 255);
        let b = Rgb::new(255, 0, 255);
        assert_eq!(lerp_rgb(a, b, 0.0), a);
        assert_eq!(lerp_rgb(a, b, 1.0), b);
        assert_eq!(lerp_rgb(a, b, 0.5), Rgb::new(128, 0, 255));
    }

    #[test]
    fn lerp_clamps_fraction() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(200, 100, 0);
        assert_eq!(lerp_rgb(a, b, -1.0), a);
        assert_eq!(lerp_rgb(a, b, 2.0), b);
    }

    #[test]
    fn hue_sweep_hits_primaries() {
        assert_eq!(hue_to_rgb(0.0), Rgb::new(255, 0, 0));
        assert_eq!(hue_to_rgb(120.0), Rgb::new(0, 255, 0));
        assert_eq!(hue_to_rgb(240.0), Rgb::new(0, 0, 255));
        assert_eq!(hue_to_rgb(360.0), Rgb::new(255, 0, 0));
    }
}
