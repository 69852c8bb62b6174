//! Mist overlay widget.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::chars::{MIST_GLYPH_THRESHOLD, MIST_SHADES};
use crate::color::{MIST_WHITE, TERMINAL_BACKGROUND, mist_over};
use crate::mask::MaskRaster;

/// Alpha below which a cell is left untouched.
const MIN_VISIBLE_ALPHA: f32 = 0.02;

/// Composites a [`MaskRaster`] as translucent white over whatever is already
/// in the buffer.
#[derive(Debug, Clone, Copy)]
pub struct MistOverlay<'a> {
    raster: &'a MaskRaster,
}

impl<'a> MistOverlay<'a> {
    pub fn new(raster: &'a MaskRaster) -> Self {
        Self { raster }
    }
}

/// Shade glyph for an alpha above the glyph threshold.
fn shade_for(alpha: f32) -> char {
    let span = 1.0 - MIST_GLYPH_THRESHOLD;
    let t = ((alpha - MIST_GLYPH_THRESHOLD) / span).clamp(0.0, 1.0);
    let idx = (t * (MIST_SHADES.len() - 1) as f32).round() as usize;
    MIST_SHADES[idx.min(MIST_SHADES.len() - 1)]
}

impl Widget for MistOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let alpha = self.raster.alpha(x - area.x, y - area.y);
                if alpha < MIN_VISIBLE_ALPHA {
                    continue;
                }
                let Some(cell) = buf.cell_mut((x, y)) else {
                    continue;
                };

                let bg = mist_over(cell.bg, alpha, TERMINAL_BACKGROUND);
                if alpha >= MIST_GLYPH_THRESHOLD {
                    let (r, g, b) = MIST_WHITE;
                    cell.set_char(shade_for(alpha));
                    cell.set_fg(Color::Rgb(r, g, b));
                } else {
                    let fg = mist_over(cell.fg, alpha, MIST_WHITE);
                    cell.set_fg(fg);
                }
                cell.set_bg(bg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseField;
    use crate::transition::TransitionState;
    use mistveil_core::MaskParameters;

    fn raster(progress: f32, width: u16, height: u16) -> MaskRaster {
        let field = NoiseField::generate(32, 8);
        let params = MaskParameters::default().with_terminal_size(width, height);
        let state = TransitionState {
            raw_offset: 0.0,
            progress,
            elapsed_time: 1.0,
        };
        let mut raster = MaskRaster::new();
        raster.fill(&field, &params, &state, width, height);
        raster
    }

    #[test]
    fn test_overlay_leaves_clear_cells() {
        let raster = raster(0.0, 10, 10);
        let area = Rect::new(0, 0, 10, 10);
        let mut buf = Buffer::empty(area);
        buf.set_string(0, 0, "hello", ratatui::style::Style::new());

        MistOverlay::new(&raster).render(area, &mut buf);

        // Top row is outside the mist at rest.
        assert_eq!(buf[(0, 0)].symbol(), "h");
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
        // Bottom row is fully covered.
        assert_eq!(buf[(0, 9)].symbol(), "█");
        assert_ne!(buf[(0, 9)].bg, Color::Reset);
    }

    #[test]
    fn test_shade_ramp() {
        assert_eq!(shade_for(MIST_GLYPH_THRESHOLD), '░');
        assert_eq!(shade_for(1.0), '█');
    }

    #[test]
    fn test_overlay_clips_to_buffer() {
        let raster = raster(0.5, 20, 20);
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 5));
        MistOverlay::new(&raster).render(Rect::new(0, 0, 20, 20), &mut buf);
        assert_eq!(buf.area, Rect::new(0, 0, 5, 5));
    }
}
