//! The two scenes the mist transitions between.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Widget,
};

/// Ridge glyphs from low to high.
const RIDGE_CHARS: &[char] = &['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Which scene is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Valley,
    Summit,
}

impl Scene {
    /// Scene for a transition progress. The swap happens under full mist.
    pub fn for_progress(progress: f32) -> Self {
        if progress < 0.5 { Scene::Valley } else { Scene::Summit }
    }

    fn title(self) -> &'static str {
        match self {
            Scene::Valley => "T H E   V A L L E Y",
            Scene::Summit => "T H E   S U M M I T",
        }
    }

    fn subtitle(self) -> &'static str {
        match self {
            Scene::Valley => "scroll down to climb",
            Scene::Summit => "above the clouds",
        }
    }

    fn accent(self) -> Color {
        match self {
            Scene::Valley => Color::Rgb(120, 170, 150),
            Scene::Summit => Color::Rgb(230, 190, 140),
        }
    }

    /// Ridge height, as a fraction of the area, at column fraction `x`.
    fn ridge(self, x: f32) -> f32 {
        let tau = std::f32::consts::TAU;
        match self {
            Scene::Valley => {
                0.22 + 0.10 * (x * tau * 1.3 + 0.4).sin() + 0.05 * (x * tau * 3.1).sin()
            }
            Scene::Summit => {
                let peak = 1.0 - ((x - 0.55).abs() * 2.2).min(1.0);
                0.12 + 0.45 * peak * peak + 0.03 * (x * tau * 5.0).sin()
            }
        }
    }
}

impl Widget for Scene {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }

        // Ridge silhouette along the bottom.
        let ridge_style = Style::new().fg(self.accent());
        let levels = RIDGE_CHARS.len() as f32;
        for col in 0..area.width {
            let x = col as f32 / area.width.max(1) as f32;
            let height = self.ridge(x).clamp(0.0, 1.0) * area.height as f32;
            let full = height.floor() as u16;
            let partial = ((height - height.floor()) * levels).floor() as usize;
            for row in 0..full.min(area.height) {
                let y = area.bottom() - 1 - row;
                buf[(area.x + col, y)].set_char('█').set_style(ridge_style);
            }
            if full < area.height && partial > 0 {
                let y = area.bottom() - 1 - full;
                buf[(area.x + col, y)]
                    .set_char(RIDGE_CHARS[partial - 1])
                    .set_style(ridge_style);
            }
        }

        let [_, title, _, subtitle, _] = Layout::vertical([
            Constraint::Percentage(25),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        Line::from(self.title())
            .bold()
            .fg(self.accent())
            .centered()
            .render(title, buf);
        Line::from(self.subtitle())
            .dark_gray()
            .centered()
            .render(subtitle, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_swaps_at_midpoint() {
        assert_eq!(Scene::for_progress(0.0), Scene::Valley);
        assert_eq!(Scene::for_progress(0.49), Scene::Valley);
        assert_eq!(Scene::for_progress(0.5), Scene::Summit);
        assert_eq!(Scene::for_progress(1.0), Scene::Summit);
    }

    #[test]
    fn test_scene_renders_title_and_ridge() {
        let area = Rect::new(0, 0, 50, 16);
        let mut buf = Buffer::empty(area);
        Scene::Summit.render(area, &mut buf);

        let row = |y: u16| -> String {
            (0..50).map(|x| buf[(x, y)].symbol().to_string()).collect()
        };
        assert!((0..16).any(|y| row(y).contains("S U M M I T")));
        // The peak reaches well above the bottom row.
        assert_eq!(buf[(27, 15)].symbol(), "█");
        assert_eq!(buf[(27, 12)].symbol(), "█");
    }
}
