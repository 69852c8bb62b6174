//! Floating text label tied to an anchor point by a connector line.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

/// Vertical bob amplitude in rows.
const BOB_AMPLITUDE: f32 = 1.0;

const LINE_COLOR: Color = Color::Rgb(120, 140, 170);
const TEXT_COLOR: Color = Color::Rgb(225, 232, 245);
const ANCHOR: char = '●';

/// A label that floats above and to the right of an anchor point.
#[derive(Debug, Clone)]
pub struct FloatingLabel {
    /// Label text, drawn on one line.
    pub text: String,
    /// Anchor position as fractions of the area.
    pub anchor: (f32, f32),
    /// Offset of the label box from the anchor, in cells.
    pub offset: (i32, i32),
}

impl FloatingLabel {
    pub fn new(text: impl Into<String>, anchor: (f32, f32)) -> Self {
        Self {
            text: text.into(),
            anchor,
            offset: (6, -6),
        }
    }

    /// Vertical bob in rows for the given time.
    pub fn bob(elapsed_ms: u64, period_ms: u64) -> f32 {
        let period = period_ms.max(1);
        let phase = (elapsed_ms % period) as f32 / period as f32;
        (phase * std::f32::consts::TAU).sin() * BOB_AMPLITUDE
    }

    /// Anchor cell inside `area`.
    pub fn anchor_cell(&self, area: Rect) -> (u16, u16) {
        let fx = self.anchor.0.clamp(0.0, 1.0);
        let fy = self.anchor.1.clamp(0.0, 1.0);
        let x = area.x + ((area.width.saturating_sub(1)) as f32 * fx).round() as u16;
        let y = area.y + ((area.height.saturating_sub(1)) as f32 * fy).round() as u16;
        (x, y)
    }

    /// Box the label occupies for a given bob, clipped to `area`.
    ///
    /// The box flips to the left of the anchor when it would not fit on the
    /// right.
    pub fn label_rect(&self, area: Rect, bob: f32) -> Rect {
        let (ax, ay) = self.anchor_cell(area);
        let width = Line::from(self.text.as_str()).width() as i32 + 4;
        let (ax, ay) = (ax as i32, ay as i32);

        let mut x = ax + self.offset.0;
        if x + width > area.right() as i32 {
            x = ax - self.offset.0 - width + 1;
        }
        let x = x.clamp(area.x as i32, (area.right() as i32 - width).max(area.x as i32));
        let y = (ay + self.offset.1 + bob.round() as i32)
            .clamp(area.y as i32, (area.bottom() as i32 - 3).max(area.y as i32));

        Rect::new(x as u16, y as u16, width as u16, 3).intersection(area)
    }

    /// Widget for a specific frame.
    pub fn at(&self, elapsed_ms: u64, period_ms: u64) -> LabelLayer<'_> {
        LabelLayer {
            label: self,
            bob: Self::bob(elapsed_ms, period_ms),
        }
    }
}

/// A [`FloatingLabel`] frozen at one bob position.
#[derive(Debug, Clone, Copy)]
pub struct LabelLayer<'a> {
    label: &'a FloatingLabel,
    bob: f32,
}

impl Widget for LabelLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        let (ax, ay) = self.label.anchor_cell(area);
        let rect = self.label.label_rect(area, self.bob);
        let line_style = Style::new().fg(LINE_COLOR);

        // Connector: vertical from the anchor to the box's middle row, then
        // horizontal to the nearest box edge.
        let target_y = rect.y + rect.height / 2;
        let on_right = rect.x > ax;
        let on_left = rect.right() <= ax;
        if !rect.is_empty() && (on_right || on_left) {
            let corner = match (on_right, target_y < ay) {
                (true, true) => '╭',
                (true, false) => '╰',
                (false, true) => '╮',
                (false, false) => '╯',
            };
            let (low, high) = (target_y.min(ay), target_y.max(ay));
            for y in low + 1..high {
                buf[(ax, y)].set_char('│').set_style(line_style);
            }
            if target_y != ay {
                buf[(ax, target_y)].set_char(corner).set_style(line_style);
            }
            let span = if on_right {
                ax + 1..rect.x
            } else {
                rect.right()..ax
            };
            for x in span {
                buf[(x, target_y)].set_char('─').set_style(line_style);
            }
        }
        buf[(ax, ay)].set_char(ANCHOR).set_style(line_style);

        if !rect.is_empty() {
            Paragraph::new(Line::from(self.label.text.as_str()).fg(TEXT_COLOR).bold())
                .centered()
                .block(Block::bordered().border_style(line_style))
                .render(rect, buf);
        }
    }
}
