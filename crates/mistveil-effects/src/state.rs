//! Effect state carried between frames.

use mistveil_core::{AnimationSpeed, MaskParameters};
use ratatui::Frame;
use tracing::info;

use crate::animations::{
    label::FloatingLabel,
    mist::MistOverlay,
    snow::{SnowField, SnowLayer},
};
use crate::mask::MaskRaster;
use crate::noise::NoiseField;
use crate::transition::TransitionState;

/// Which ambient layers to draw under the mist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layers {
    pub snow: bool,
    pub label: bool,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            snow: true,
            label: true,
        }
    }
}

/// Effect state: the cached noise field, the mask raster, and the snow.
#[derive(Debug)]
pub struct EffectState {
    /// Noise field, synthesized once and reused every frame.
    noise: Option<NoiseField>,
    /// Alpha buffer refilled each active frame.
    raster: MaskRaster,
    /// Snow particles.
    snow: SnowField,
    /// Optional floating label.
    label: Option<FloatingLabel>,
    /// Last update time in milliseconds.
    last_update_ms: u64,
}

impl EffectState {
    /// Create effect state whose randomness derives from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            noise: None,
            raster: MaskRaster::new(),
            snow: SnowField::new(seed.wrapping_add(1)),
            label: None,
            last_update_ms: 0,
        }
    }

    /// Adopt a noise field synthesized elsewhere (e.g. behind a loading screen).
    pub fn install_noise(&mut self, field: NoiseField) {
        info!(size = field.size(), seed = field.seed(), "noise field installed");
        self.noise = Some(field);
    }

    pub fn has_noise(&self) -> bool {
        self.noise.is_some()
    }

    pub fn set_label(&mut self, label: Option<FloatingLabel>) {
        self.label = label;
    }

    pub fn raster(&self) -> &MaskRaster {
        &self.raster
    }

    /// Advance the effects and draw them over whatever is already in the
    /// frame. Returns the transition state used for this frame.
    ///
    /// `offset` is the host's current scroll offset.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        params: &MaskParameters,
        offset: f32,
        elapsed_ms: u64,
        speed: AnimationSpeed,
        layers: Layers,
    ) -> TransitionState {
        let area = frame.area();

        let delta_ms = elapsed_ms.saturating_sub(self.last_update_ms);
        self.last_update_ms = elapsed_ms;

        if layers.snow {
            self.snow.resize(area.width, area.height);
            self.snow.advance(delta_ms as f32 / 1000.0, speed);
            frame.render_widget(SnowLayer::new(&self.snow, elapsed_ms as f32 / 1000.0), area);
        }

        if layers.label
            && let Some(label) = &self.label
        {
            frame.render_widget(label.at(elapsed_ms, speed.label_bob_period_ms()), area);
        }

        let mist_time = elapsed_ms as f32 / 1000.0 * speed.mist_time_scale();
        let state = TransitionState::new(params, offset, mist_time);

        if state.is_active()
            && let Some(field) = &self.noise
        {
            self.raster.fill(field, params, &state, area.width, area.height);
            frame.render_widget(MistOverlay::new(&self.raster), area);
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_no_mist_without_noise() {
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        let mut state = EffectState::new(1);
        assert!(!state.has_noise());
        let params = MaskParameters::default().with_terminal_size(20, 8);
        let layers = Layers {
            snow: false,
            label: false,
        };
        terminal
            .draw(|frame| {
                state.render(frame, &params, 0.125, 50, AnimationSpeed::Medium, layers);
            })
            .unwrap();
        assert_eq!(state.raster().width(), 0);

        state.install_noise(NoiseField::generate(16, 9));
        assert!(state.has_noise());
    }

    #[test]
    fn test_render_draws_mist_only_while_active() {
        let mut terminal = Terminal::new(TestBackend::new(30, 10)).unwrap();
        let mut state = EffectState::new(5);
        state.install_noise(NoiseField::generate(32, 5));
        let params = MaskParameters::default().with_terminal_size(30, 10);
        let layers = Layers {
            snow: false,
            label: false,
        };

        let mut transition = None;
        terminal
            .draw(|frame| {
                let speed = AnimationSpeed::Medium;
                transition = Some(state.render(frame, &params, 0.0, 100, speed, layers));
            })
            .unwrap();
        assert_eq!(transition.map(|t| t.progress), Some(0.0));
        assert_eq!(state.raster().width(), 0);

        terminal
            .draw(|frame| {
                let speed = AnimationSpeed::Medium;
                transition = Some(state.render(frame, &params, 0.125, 200, speed, layers));
            })
            .unwrap();
        assert!(transition.is_some_and(|t| t.is_active()));
        assert_eq!(state.raster().width(), 30);
        assert!(state.raster().coverage() > 0.0);
    }
}
