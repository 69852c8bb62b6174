//! Scroll-driven terminal effects for mistveil.
//!
//! The centerpiece is a procedural mist transition: a tileable noise field is
//! synthesized once, then a per-cell opacity mask is evaluated every frame
//! from the scroll-derived progress and elapsed time, and composited as a
//! translucent white overlay. Snowfall, a floating label and a loading screen
//! round out the scene.

mod animations;
mod chars;
mod color;
pub mod easing;
pub mod mask;
pub mod noise;
mod state;
pub mod transition;

pub use animations::label::{FloatingLabel, LabelLayer};
pub use animations::loading::LoadingScreen;
pub use animations::mist::MistOverlay;
pub use animations::snow::{Flake, SnowField, SnowLayer};
pub use mask::{MaskRaster, mist_opacity};
pub use noise::{NoiseField, NoiseSynthesis};
pub use state::{EffectState, Layers};
pub use transition::{TransitionState, progress_for_offset};
