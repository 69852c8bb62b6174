//! Character constants for the effects.

/// Characters used for snowflakes, three per size class.
pub const SNOW_CHARS: &[char] = &['·', '.', '°', '*', '•', '✧', '❄', '❅', '❆'];

/// Mist shading from thin to dense.
pub const MIST_SHADES: &[char] = &['░', '▒', '▓', '█'];

/// Alpha above which the mist hides the glyph underneath.
pub const MIST_GLYPH_THRESHOLD: f32 = 0.55;
