//! Loading screen shown while the noise field is synthesized.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Gauge, Widget},
};

/// Full-screen loading widget with a progress gauge.
#[derive(Debug, Clone)]
pub struct LoadingScreen<'a> {
    title: &'a str,
    message: &'a str,
    progress: f32,
}

impl<'a> LoadingScreen<'a> {
    pub fn new(title: &'a str, message: &'a str, progress: f32) -> Self {
        Self {
            title,
            message,
            progress: if progress.is_nan() {
                0.0
            } else {
                progress.clamp(0.0, 1.0)
            },
        }
    }

    /// Progress as a whole percentage.
    pub fn percent(&self) -> u16 {
        (self.progress * 100.0).round() as u16
    }
}

impl Widget for LoadingScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, title, _, gauge, message, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, gauge, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Max(48),
            Constraint::Fill(1),
        ])
        .areas(gauge);

        Line::from(self.title)
            .bold()
            .fg(Color::Rgb(225, 232, 245))
            .centered()
            .render(title, buf);

        Gauge::default()
            .gauge_style(Style::new().fg(Color::Rgb(180, 195, 220)).bg(Color::Rgb(30, 34, 44)))
            .ratio(self.progress as f64)
            .label(format!("{:>3}%", self.percent()))
            .render(gauge, buf);

        Line::from(self.message)
            .dark_gray()
            .centered()
            .render(message, buf);
    }
}
