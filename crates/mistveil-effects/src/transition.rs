//! Per-frame transition state derived from the scroll offset.

use mistveil_core::MaskParameters;

use crate::easing::remap_progress;

/// Snapshot of a transition for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionState {
    /// Scroll offset as reported by the host.
    pub raw_offset: f32,
    /// Eased progress in `[0, 1]`.
    pub progress: f32,
    /// Seconds since the effect started.
    pub elapsed_time: f32,
}

impl TransitionState {
    /// Derive the state for this frame from an explicit scroll offset.
    pub fn new(params: &MaskParameters, raw_offset: f32, elapsed_time: f32) -> Self {
        Self {
            raw_offset,
            progress: progress_for_offset(params, raw_offset),
            elapsed_time,
        }
    }

    /// True while the mist is partly on screen.
    pub fn is_active(&self) -> bool {
        self.progress > 0.0 && self.progress < 1.0
    }
}

/// Map a scroll offset to eased progress.
///
/// A zero (or negative) duration is a step at `transition_start`.
pub fn progress_for_offset(params: &MaskParameters, offset: f32) -> f32 {
    let start = params.transition_start;
    let duration = params.transition_duration;

    if offset.is_nan() || offset <= start {
        return 0.0;
    }
    if duration <= 0.0 || offset >= start + duration {
        return 1.0;
    }

    remap_progress((offset - start) / duration, params.curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mistveil_core::ProgressCurve;

    fn params(start: f32, duration: f32) -> MaskParameters {
        MaskParameters {
            transition_start: start,
            transition_duration: duration,
            ..Default::default()
        }
    }

    #[test]
    fn test_window_examples() {
        let p = params(0.1, 0.05);
        assert_eq!(progress_for_offset(&p, 0.08), 0.0);
        assert_eq!(progress_for_offset(&p, 0.16), 1.0);
        assert!((progress_for_offset(&p, 0.125) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_clamped_outside_window() {
        let p = params(2.0, 3.0);
        for offset in [-100.0, 0.0, 1.999, 2.0] {
            assert_eq!(progress_for_offset(&p, offset), 0.0);
        }
        for offset in [5.0, 5.001, 1e6] {
            assert_eq!(progress_for_offset(&p, offset), 1.0);
        }
    }

    #[test]
    fn test_zero_duration_is_a_step() {
        let p = params(0.5, 0.0);
        assert_eq!(progress_for_offset(&p, 0.5), 0.0);
        assert_eq!(progress_for_offset(&p, 0.5001), 1.0);
    }

    #[test]
    fn test_nan_offset() {
        let p = params(0.1, 0.05);
        assert_eq!(progress_for_offset(&p, f32::NAN), 0.0);
    }

    #[test]
    fn test_continuous_curve_window_is_monotonic() {
        let p = MaskParameters {
            curve: ProgressCurve::Continuous,
            ..params(1.0, 2.0)
        };
        let mut last = 0.0;
        for i in 0..=400 {
            let offset = i as f32 / 100.0;
            let progress = progress_for_offset(&p, offset);
            assert!(progress + 1e-6 >= last);
            last = progress;
        }
    }

    #[test]
    fn test_state_activity() {
        let p = params(0.1, 0.05);
        assert!(!TransitionState::new(&p, 0.0, 1.0).is_active());
        assert!(TransitionState::new(&p, 0.125, 1.0).is_active());
        assert!(!TransitionState::new(&p, 0.2, 1.0).is_active());
        assert_eq!(TransitionState::new(&p, 0.2, 3.5).elapsed_time, 3.5);
    }
}
