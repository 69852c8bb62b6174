//! Per-pixel mist opacity.

use mistveil_core::MaskParameters;

use crate::easing::{dramatic_pull, lerp, smoothstep};
use crate::noise::NoiseField;
use crate::transition::TransitionState;

/// Weights of the four taps blended into each noise layer.
const TAP_WEIGHTS: [f32; 4] = [0.5, 0.25, 0.15, 0.1];

/// One tap: uv scale and drift velocity in uv units per second.
#[derive(Debug, Clone, Copy)]
struct Tap {
    scale: f32,
    drift: (f32, f32),
}

const fn tap(scale: f32, dx: f32, dy: f32) -> Tap {
    Tap {
        scale,
        drift: (dx, dy),
    }
}

/// Broad billows.
const BILLOW_TAPS: [Tap; 4] = [
    tap(0.5, 0.020, 0.010),
    tap(1.0, -0.030, 0.015),
    tap(2.0, 0.045, -0.020),
    tap(4.0, -0.060, 0.030),
];

/// Fine edge tatters.
const DETAIL_TAPS: [Tap; 4] = [
    tap(2.0, 0.050, 0.020),
    tap(4.0, -0.070, 0.035),
    tap(8.0, 0.090, -0.040),
    tap(16.0, -0.120, 0.060),
];

/// Texture inside the cloud body.
const BODY_TAPS: [Tap; 4] = [
    tap(1.5, 0.015, 0.030),
    tap(3.0, -0.025, 0.040),
    tap(6.0, 0.035, -0.050),
    tap(12.0, -0.050, 0.070),
];

/// Edge wobble sinusoids: amplitude, spatial frequency, time speed, phase.
const EDGE_WAVES: [(f32, f32, f32, f32); 4] = [
    (0.25, 2.0, 0.50, 0.0),
    (0.18, 3.7, -0.70, 1.3),
    (0.12, 6.1, 1.10, 2.1),
    (0.07, 11.3, -1.60, 0.7),
];

fn layered(field: &NoiseField, taps: &[Tap; 4], x: f32, y: f32, time: f32) -> f32 {
    taps.iter()
        .zip(TAP_WEIGHTS)
        .map(|(tap, weight)| {
            let u = x * tap.scale + tap.drift.0 * time;
            let v = y * tap.scale + tap.drift.1 * time;
            field.sample(u, v) * weight
        })
        .sum()
}

fn edge_offset(x: f32, time: f32) -> f32 {
    EDGE_WAVES
        .iter()
        .map(|&(amplitude, frequency, speed, phase)| {
            amplitude * (frequency * x + speed * time + phase).sin()
        })
        .sum()
}

/// Opacity of the mist at one point.
///
/// `uv` is in `[0, 1]²` with `uv.1 == 0` at the bottom of the frame; the x
/// axis is aspect-corrected here. `progress` is already scroll-eased. Pure in
/// all of its inputs.
pub fn mist_opacity(
    field: &NoiseField,
    params: &MaskParameters,
    uv: (f32, f32),
    progress: f32,
    time: f32,
) -> f32 {
    let x = uv.0 * params.aspect();
    let y = uv.1;
    let time = if time.is_finite() { time } else { 0.0 };

    let noise = layered(field, &BILLOW_TAPS, x, y, time);
    let detail_noise = layered(field, &DETAIL_TAPS, x, y, time);
    let cloud_detail = layered(field, &BODY_TAPS, x, y, time);

    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let pull = if params.compound_easing {
        dramatic_pull(progress)
    } else {
        progress
    };
    let base_position = lerp(-1.2, 1.8, pull);

    let mut cloud_height = base_position + edge_offset(x, time);
    if noise > 0.3 && noise < 0.7 {
        cloud_height -= (noise - 0.3) * 2.5 * 0.5;
    }
    if detail_noise > 0.4 && detail_noise < 0.6 {
        cloud_height -= (detail_noise - 0.4) * 0.25;
    }

    let distance = y - cloud_height;
    let base_opacity = 1.0 - smoothstep(-0.5, 0.35, distance);

    let transition_zone = smoothstep(-0.9, 0.25, distance);
    let opacity = lerp(
        base_opacity,
        base_opacity * (0.5 + cloud_detail),
        transition_zone,
    );

    // Keep the ground solid.
    let ground = (0.6 - y).max(0.0) * 2.0;
    let opacity = lerp(opacity, 1.0, ground);
    if opacity.is_nan() {
        0.0
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

/// Owned alpha buffer, one value per cell, reused across frames.
#[derive(Debug, Clone, Default)]
pub struct MaskRaster {
    width: u16,
    height: u16,
    alpha: Vec<f32>,
}

impl MaskRaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Alpha at a cell, zero outside the raster.
    pub fn alpha(&self, x: u16, y: u16) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.alpha[y as usize * self.width as usize + x as usize]
    }

    /// Mean alpha over the whole raster.
    pub fn coverage(&self) -> f32 {
        if self.alpha.is_empty() {
            return 0.0;
        }
        self.alpha.iter().sum::<f32>() / self.alpha.len() as f32
    }

    /// Re-evaluate every cell for this frame.
    ///
    /// Row 0 is the top of the terminal, which is `uv.y == 1`.
    pub fn fill(
        &mut self,
        field: &NoiseField,
        params: &MaskParameters,
        state: &TransitionState,
        width: u16,
        height: u16,
    ) {
        let len = width as usize * height as usize;
        self.width = width;
        self.height = height;
        self.alpha.resize(len, 0.0);

        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        for row in 0..height {
            let v = 1.0 - (row as f32 + 0.5) / h;
            for col in 0..width {
                let u = (col as f32 + 0.5) / w;
                self.alpha[row as usize * width as usize + col as usize] =
                    mist_opacity(field, params, (u, v), state.progress, state.elapsed_time);
            }
        }
    }
}
