mod logging;
mod scene;

use std::io::stdout;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use color_eyre::eyre::WrapErr;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use mistveil_config::Config;
use mistveil_core::{AnimationSpeed, ProgressCurve};
use mistveil_effects::{
    EffectState, FloatingLabel, Layers, LoadingScreen, NoiseSynthesis, TransitionState,
    progress_for_offset,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};
use tracing::info;

use crate::scene::Scene;

/// How long to wait for input before drawing the next frame.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Rows of noise synthesized between loading screen frames.
const SYNTHESIS_BAND: usize = 8;

/// Multiplier for PgUp/PgDn over a single scroll step.
const PAGE_STEPS: f32 = 5.0;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init();
    info!(?log_path, "mistveil starting");

    let config = Config::load().wrap_err("failed to load configuration")?;

    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture)
        .wrap_err("failed to enable mouse capture")
        .and_then(|()| App::new(config).run(terminal));
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Loaded configuration.
    config: Config,
    /// Seed for all randomness in this run.
    seed: u64,
    /// Current scroll offset, owned here and passed to the effects each frame.
    offset: f32,
    /// Current animation speed.
    speed: AnimationSpeed,
    /// Current scroll easing curve.
    curve: ProgressCurve,
    /// Which ambient layers are drawn.
    layers: Layers,
    /// Effect state carried between frames.
    effects: EffectState,
    /// When the app started, for elapsed time.
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let seed = config.seed.unwrap_or_else(|| {
            // Capture system time as seed when none is configured
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });

        let mut effects = EffectState::new(seed);
        effects.set_label(Some(FloatingLabel::new(
            config.label_text.clone(),
            (0.25, 0.72),
        )));

        Self {
            running: false,
            seed,
            offset: 0.0,
            speed: config.speed,
            curve: config.curve,
            layers: Layers {
                snow: config.snow,
                label: config.label,
            },
            effects,
            started: Instant::now(),
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        if !self.effects.has_noise() {
            self.synthesize_noise(&mut terminal)?;
        }
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Build the noise field band by band behind the loading screen.
    fn synthesize_noise(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let started = Instant::now();
        let mut synthesis = NoiseSynthesis::new(self.config.noise_size, self.seed);
        while !synthesis.is_done() {
            synthesis.step(SYNTHESIS_BAND);
            let progress = synthesis.progress();
            terminal.draw(|frame| {
                let screen = LoadingScreen::new("m i s t v e i l", "gathering mist", progress);
                frame.render_widget(screen, frame.area());
            })?;

            // Let the user bail out of a slow synthesis.
            if event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?);
                if !self.running {
                    return Ok(());
                }
            }
        }
        self.effects.install_noise(synthesis.finish());
        info!(elapsed_ms = started.elapsed().as_millis() as u64, "noise ready");
        Ok(())
    }

    /// Elapsed time since start in milliseconds.
    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Largest scroll offset worth reaching: the end of the transition plus
    /// the same distance again.
    fn max_offset(&self) -> f32 {
        let end = self.config.transition_start + self.config.transition_duration;
        end + self.config.transition_duration.max(self.config.scroll_step * 10.0)
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let mut params = self.config.mask_parameters(area.width, area.height);
        params.curve = self.curve;

        let progress = progress_for_offset(&params, self.offset);
        frame.render_widget(Scene::for_progress(progress), area);

        let elapsed_ms = self.elapsed_ms();
        let transition = self.effects.render(
            frame,
            &params,
            self.offset,
            elapsed_ms,
            self.speed,
            self.layers,
        );

        let [_, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        frame.render_widget(self.footer(&transition), footer);
    }

    /// Status and help line.
    fn footer(&self, transition: &TransitionState) -> Line<'static> {
        Line::from(vec![
            format!("offset {:.3}  ", transition.raw_offset).dark_gray(),
            format!("progress {:.2}  ", transition.progress).dark_gray(),
            "↑↓".bold(),
            " scroll  ".dark_gray(),
            "e".bold(),
            format!(" curve:{}  ", self.curve.name()).dark_gray(),
            "c".bold(),
            format!(" speed:{}  ", self.speed.name()).dark_gray(),
            "s".bold(),
            " snow  ".dark_gray(),
            "l".bold(),
            " label  ".dark_gray(),
            "q".bold(),
            " quit".dark_gray(),
        ])
        .centered()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with timeout so animations keep running.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_INTERVAL)? {
            self.handle_event(event::read()?);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => self.on_mouse_event(mouse),
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let step = self.config.scroll_step;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Down | KeyCode::Char('j')) => self.scroll(step),
            (_, KeyCode::Up | KeyCode::Char('k')) => self.scroll(-step),
            (_, KeyCode::PageDown) => self.scroll(step * PAGE_STEPS),
            (_, KeyCode::PageUp) => self.scroll(-step * PAGE_STEPS),
            (_, KeyCode::Home) => self.offset = 0.0,
            (_, KeyCode::Char('s')) => self.layers.snow = !self.layers.snow,
            (_, KeyCode::Char('l')) => self.layers.label = !self.layers.label,
            (_, KeyCode::Char('e')) => self.curve = self.curve.toggle(),
            (_, KeyCode::Char('c')) => self.speed = self.speed.next(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll(self.config.scroll_step),
            MouseEventKind::ScrollUp => self.scroll(-self.config.scroll_step),
            _ => {}
        }
    }

    /// Move the scroll offset, clamped to the reachable range.
    fn scroll(&mut self, delta: f32) {
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset());
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> App {
        App::new(Config {
            seed: Some(42),
            ..Config::default()
        })
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut app = app();
        app.handle_event(press(KeyCode::Up));
        assert_eq!(app.offset, 0.0);

        for _ in 0..1000 {
            app.handle_event(press(KeyCode::PageDown));
        }
        assert!((app.offset - app.max_offset()).abs() < 1e-6);

        app.handle_event(press(KeyCode::Home));
        assert_eq!(app.offset, 0.0);
    }

    #[test]
    fn test_scroll_through_transition() {
        let mut app = app();
        let steps = ((0.125 / app.config.scroll_step).round()) as usize;
        for _ in 0..steps {
            app.handle_event(press(KeyCode::Char('j')));
        }
        let params = app.config.mask_parameters(80, 24);
        let progress = progress_for_offset(&params, app.offset);
        assert!(progress > 0.0 && progress < 1.0);
    }

    #[test]
    fn test_toggles() {
        let mut app = app();
        assert!(app.layers.snow);
        app.handle_event(press(KeyCode::Char('s')));
        assert!(!app.layers.snow);
        app.handle_event(press(KeyCode::Char('e')));
        assert_eq!(app.curve, ProgressCurve::Continuous);
        app.handle_event(press(KeyCode::Char('c')));
        assert_eq!(app.speed, AnimationSpeed::Fast);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.running = true;
        app.handle_event(press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_configured_seed_is_used() {
        assert_eq!(app().seed, 42);
    }
}
