//! Snowfall particles (stateful).

use mistveil_core::AnimationSpeed;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};
use tracing::debug;

use crate::chars::SNOW_CHARS;

/// Cells per flake at spawn.
const CELLS_PER_FLAKE: usize = 14;

/// Seconds for one horizontal drift cycle.
const DRIFT_PERIOD_SECS: f32 = 3.0;

/// A single snowflake.
#[derive(Debug, Clone, PartialEq)]
pub struct Flake {
    /// Column position.
    pub x: f32,
    /// Row position, negative while above the screen.
    pub y: f32,
    /// Fall speed multiplier.
    pub speed: f32,
    /// Horizontal drift phase offset.
    pub drift_phase: f32,
    /// Size category (0=small, 1=medium, 2=large).
    pub size: u8,
    /// Seed for character selection.
    pub char_seed: usize,
}

/// Owned particle buffer, advanced in place each frame.
#[derive(Debug, Clone)]
pub struct SnowField {
    flakes: Vec<Flake>,
    width: u16,
    height: u16,
    rng: Pcg64Mcg,
}

impl SnowField {
    /// Create an empty field. Call [`SnowField::resize`] before use.
    pub fn new(seed: u64) -> Self {
        Self {
            flakes: Vec::new(),
            width: 0,
            height: 0,
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn flakes(&self) -> &[Flake] {
        &self.flakes
    }

    /// Respawn flakes for new dimensions. Returns whether anything was
    /// respawned; unchanged dimensions are a no-op even with no flakes.
    pub fn resize(&mut self, width: u16, height: u16) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;

        let count = (width as usize * height as usize) / CELLS_PER_FLAKE;
        let rng = &mut self.rng;
        self.flakes = (0..count)
            .map(|_| spawn(rng, width, height, true))
            .collect();
        debug!(width, height, count, "snow reseeded");
        true
    }

    /// Move every flake down by `dt` seconds of fall.
    pub fn advance(&mut self, dt: f32, speed: AnimationSpeed) {
        let fall = dt.max(0.0) * speed.snow_fall_speed();
        let bottom = self.height as f32 + 1.0;
        for flake in &mut self.flakes {
            flake.y += fall * flake.speed;
            if flake.y > bottom {
                *flake = spawn(&mut self.rng, self.width, self.height, false);
            }
        }
    }
}

/// Spawn a flake, anywhere on screen when `scatter` is set, otherwise just
/// above the top edge.
fn spawn(rng: &mut Pcg64Mcg, width: u16, height: u16, scatter: bool) -> Flake {
    let y = if scatter {
        rng.random_range(-(height as f32)..=height as f32)
    } else {
        -rng.random_range(1.0..=3.0)
    };
    Flake {
        x: rng.random_range(0.0..width.max(1) as f32),
        y,
        speed: rng.random_range(0.5..=1.5),
        drift_phase: rng.random::<f32>(),
        size: rng.random_range(0..3),
        char_seed: rng.random::<u32>() as usize,
    }
}

/// Widget drawing a [`SnowField`].
#[derive(Debug, Clone, Copy)]
pub struct SnowLayer<'a> {
    field: &'a SnowField,
    elapsed_secs: f32,
}

impl<'a> SnowLayer<'a> {
    pub fn new(field: &'a SnowField, elapsed_secs: f32) -> Self {
        Self {
            field,
            elapsed_secs,
        }
    }
}

impl Widget for SnowLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        for flake in self.field.flakes() {
            let drift = ((self.elapsed_secs / DRIFT_PERIOD_SECS + flake.drift_phase)
                * std::f32::consts::TAU)
                .sin()
                * 1.5;

            let x = (flake.x + drift).round();
            let y = flake.y.round();
            if x < 0.0 || y < 0.0 {
                continue;
            }
            let (x, y) = (area.x + x as u16, area.y + y as u16);
            if x >= area.right() || y >= area.bottom() {
                continue;
            }

            let char_idx = flake.size as usize * 3 + flake.char_seed % 3;
            let ch = SNOW_CHARS[char_idx % SNOW_CHARS.len()];

            let color = match flake.size {
                0 => Color::Rgb(150, 170, 200),
                1 => Color::Rgb(195, 210, 235),
                _ => Color::Rgb(240, 245, 255),
            };

            buf[(x, y)].set_char(ch).set_style(Style::new().fg(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_spawns_density() {
        let mut snow = SnowField::new(1);
        snow.resize(70, 20);
        assert_eq!(snow.flakes().len(), 70 * 20 / CELLS_PER_FLAKE);
        for flake in snow.flakes() {
            assert!(flake.x >= 0.0 && flake.x < 70.0);
            assert!(flake.size < 3);
        }
    }

    #[test]
    fn test_resize_same_size_keeps_flakes() {
        let mut snow = SnowField::new(1);
        snow.resize(40, 10);
        let before = snow.flakes().to_vec();
        assert!(!snow.resize(40, 10));
        assert_eq!(snow.flakes(), before.as_slice());
    }

    #[test]
    fn test_tiny_area_reseeds_once() {
        let mut snow = SnowField::new(4);
        assert!(snow.resize(3, 3));
        assert!(snow.flakes().is_empty());
        for _ in 0..5 {
            assert!(!snow.resize(3, 3));
        }
        assert!(snow.resize(40, 10));
        assert!(!snow.flakes().is_empty());
    }

    #[test]
    fn test_advance_moves_down_and_wraps() {
        let mut snow = SnowField::new(9);
        snow.resize(30, 10);
        for _ in 0..500 {
            let before: Vec<f32> = snow.flakes().iter().map(|f| f.y).collect();
            snow.advance(0.05, AnimationSpeed::Fast);
            for (flake, y) in snow.flakes().iter().zip(before) {
                // Either fell or respawned above the top.
                assert!(flake.y > y || flake.y < 0.0);
                assert!(flake.y <= 11.0 + 0.05 * 8.0 * 1.5);
                assert!(flake.x >= 0.0 && flake.x < 30.0);
            }
        }
    }

    #[test]
    fn test_seeded_snow_is_reproducible() {
        let mut a = SnowField::new(77);
        let mut b = SnowField::new(77);
        a.resize(50, 12);
        b.resize(50, 12);
        a.advance(0.3, AnimationSpeed::Medium);
        b.advance(0.3, AnimationSpeed::Medium);
        assert_eq!(a.flakes(), b.flakes());
    }

    #[test]
    fn test_layer_draws_inside_area() {
        let mut snow = SnowField::new(3);
        snow.resize(30, 10);
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        SnowLayer::new(&snow, 0.0).render(area, &mut buf);
        let drawn = buf.content().iter().filter(|c| c.symbol() != " ").count();
        assert!(drawn > 0);
    }
}
