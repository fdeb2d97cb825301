use crate::map::{Rgb, VisualParams};

use super::canvas::Canvas;

const BAR_BASELINE_MARGIN: u32 = 50;
const RING_POINT_RADIUS: f32 = 2.0;
const RING_OUTLINE_THICKNESS: f32 = 5.0;

/// Draw one parameter set onto the canvas. The only place pixels and
/// parameters meet; the analysis pipeline never sees this side.
pub fn paint(canvas: &mut Canvas, params: &VisualParams) {
    canvas.clear(Rgb::BLACK);
    let cx = canvas.width() as f32 / 2.0;
    let cy = canvas.height() as f32 / 2.0;

    match params {
        VisualParams::Dots {
            ring_radius,
            dot_radius,
            dot_count,
            color,
            ring_width,
            dot_gap,
        } => {
            let mut orbit = *ring_radius;
            if *ring_width > 0.0 {
                canvas.stroke_circle(cx, cy, ring_radius + ring_width, *ring_width, *color);
                orbit += dot_gap;
            }
            let tau = 2.0 * std::f32::consts::PI;
            for i in 0..*dot_count {
                let angle = tau / (*dot_count).max(1) as f32 * i as f32;
                let x = cx + orbit * angle.cos();
                let y = cy + orbit * angle.sin();
                canvas.fill_circle(x, y, *dot_radius, *color);
            }
        }
        VisualParams::Bars { heights, colors } => {
            if heights.is_empty() {
                return;
            }
            let band_width = (canvas.width() / heights.len() as u32).max(1);
            let baseline = canvas.height().saturating_sub(BAR_BASELINE_MARGIN) as i32;
            for (i, (&height, color)) in heights.iter().zip(colors.iter()).enumerate() {
                let h = height.round().max(1.0) as u32;
                let x = i as i32 * band_width as i32;
                let y = baseline - h as i32;
                canvas.fill_rect(x, y, band_width.saturating_sub(2).max(1), h, *color);
            }
        }
        VisualParams::Ring {
            radius,
            rotation,
            wave_offsets,
            amplitudes,
            color,
        } => {
            let points = amplitudes.len().max(1);
            let tau = 2.0 * std::f32::consts::PI;
            for &offset in wave_offsets {
                for (p, &amp) in amplitudes.iter().enumerate() {
                    let theta = tau * p as f32 / points as f32 + offset + rotation;
                    let x = cx + (radius + amp) * theta.cos();
                    let y = cy + (radius + amp) * theta.sin();
                    canvas.fill_circle(x, y, RING_POINT_RADIUS, *color);
                }
            }
            canvas.stroke_circle(cx, cy, *radius, RING_OUTLINE_THICKNESS, *color);
        }
    }
}
