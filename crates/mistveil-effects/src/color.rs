//! Color blending for the mist overlay.

use ratatui::style::Color;

/// Color the terminal shows for an unset background.
pub const TERMINAL_BACKGROUND: (u8, u8, u8) = (12, 14, 20);

/// Color of the mist itself.
pub const MIST_WHITE: (u8, u8, u8) = (235, 240, 245);

/// Approximate RGB of any ratatui color.
///
/// Named colors use the xterm defaults; `Reset` resolves to `fallback`.
pub fn to_rgb(color: Color, fallback: (u8, u8, u8)) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Reset => fallback,
        Color::Black => (0, 0, 0),
        Color::Red => (205, 0, 0),
        Color::Green => (0, 205, 0),
        Color::Yellow => (205, 205, 0),
        Color::Blue => (0, 0, 238),
        Color::Magenta => (205, 0, 205),
        Color::Cyan => (0, 205, 205),
        Color::Gray => (229, 229, 229),
        Color::DarkGray => (127, 127, 127),
        Color::LightRed => (255, 0, 0),
        Color::LightGreen => (0, 255, 0),
        Color::LightYellow => (255, 255, 0),
        Color::LightBlue => (92, 92, 255),
        Color::LightMagenta => (255, 0, 255),
        Color::LightCyan => (0, 255, 255),
        Color::White => (255, 255, 255),
        Color::Indexed(i) => indexed_to_rgb(i),
    }
}

/// xterm 256-color cube and grayscale ramp.
fn indexed_to_rgb(i: u8) -> (u8, u8, u8) {
    match i {
        0..=15 => {
            let v = if i & 8 != 0 { 255 } else { 205 };
            let bit = |b: u8| if i & b != 0 { v } else { 0 };
            (bit(1), bit(2), bit(4))
        }
        16..=231 => {
            let i = i - 16;
            let level = |c: u8| if c == 0 { 0 } else { 55 + c * 40 };
            (level(i / 36), level((i / 6) % 6), level(i % 6))
        }
        _ => {
            let v = 8 + (i - 232) * 10;
            (v, v, v)
        }
    }
}

/// Linear blend of two colors, `t` clamped to `[0, 1]`.
pub fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Composite translucent white mist over a color.
pub fn mist_over(base: Color, alpha: f32, fallback: (u8, u8, u8)) -> Color {
    blend(to_rgb(base, fallback), MIST_WHITE, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 5.0), Color::Rgb(200, 100, 50));
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
    }

    #[test]
    fn test_mist_over_reset_uses_fallback() {
        assert_eq!(
            mist_over(Color::Reset, 0.0, TERMINAL_BACKGROUND),
            Color::Rgb(12, 14, 20)
        );
        let (r, g, b) = MIST_WHITE;
        assert_eq!(mist_over(Color::Blue, 1.0, TERMINAL_BACKGROUND), Color::Rgb(r, g, b));
    }

    #[test]
    fn test_indexed_colors() {
        assert_eq!(to_rgb(Color::Indexed(16), (1, 1, 1)), (0, 0, 0));
        assert_eq!(to_rgb(Color::Indexed(231), (1, 1, 1)), (255, 255, 255));
        assert_eq!(to_rgb(Color::Indexed(232), (1, 1, 1)), (8, 8, 8));
        assert_eq!(to_rgb(Color::Indexed(9), (1, 1, 1)), (255, 0, 0));
    }
}
