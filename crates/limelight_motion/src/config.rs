//! Engine tuning
//!
//! Every threshold, duration, and interval the engine uses lives in
//! [`Tuning`], grouped the way the effect modules consume them. Defaults
//! reproduce the stock page feel; hosts can override any subset from a TOML
//! snippet. Unknown keys are rejected so a typo fails loudly instead of
//! silently running with defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning file could not be read into a [`Tuning`]
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] toml::de::Error),
}

// =============================================================================
// Tuning
// =============================================================================

/// Complete effect-engine tuning
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    pub reveal: RevealTuning,
    pub scroll: ScrollTuning,
    pub feedback: FeedbackTuning,
    pub sequence: SequenceTuning,
    pub monitor: MonitorTuning,
}

impl Tuning {
    /// Parse from TOML; missing keys keep their defaults
    pub fn from_toml_str(s: &str) -> Result<Self, TuningError> {
        Ok(toml::from_str(s)?)
    }
}

/// Visibility thresholds and reveal transition timing, per category
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RevealTuning {
    /// Fraction of a fade node that must be visible to trigger
    pub fade_threshold: f32,
    /// Bottom inset applied to the viewport for fade checks
    pub fade_margin_bottom: f32,
    pub fade_duration_ms: f32,

    pub slide_threshold: f32,
    pub slide_margin_bottom: f32,
    pub slide_duration_ms: f32,

    pub scale_threshold: f32,
    pub scale_duration_ms: f32,
}

impl Default for RevealTuning {
    fn default() -> Self {
        Self {
            fade_threshold: 0.1,
            fade_margin_bottom: 50.0,
            fade_duration_ms: 600.0,
            slide_threshold: 0.2,
            slide_margin_bottom: 100.0,
            slide_duration_ms: 800.0,
            scale_threshold: 0.3,
            scale_duration_ms: 600.0,
        }
    }
}

/// Scroll-linked effect tuning
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollTuning {
    /// Parallax speed used when a node doesn't specify one
    pub default_parallax_speed: f32,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            default_parallax_speed: 0.5,
        }
    }
}

/// Pointer feedback tuning
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FeedbackTuning {
    /// Per-item delay when service card features cascade in
    pub service_feature_stagger_ms: f32,
    /// Per-item delay for pricing card features
    pub plan_feature_stagger_ms: f32,
    /// How long ripple and click-burst overlays live
    pub overlay_lifetime_ms: f32,
}

impl Default for FeedbackTuning {
    fn default() -> Self {
        Self {
            service_feature_stagger_ms: 50.0,
            plan_feature_stagger_ms: 30.0,
            overlay_lifetime_ms: 600.0,
        }
    }
}

/// Utility sequence tuning
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceTuning {
    /// Default count-up duration
    pub count_up_duration_ms: f32,
    /// Nominal frame length used to size count-up increments
    pub count_up_frame_ms: f32,
    /// Delay between typewriter characters
    pub typewriter_interval_ms: f32,
    /// Default shape morph duration
    pub path_morph_duration_ms: f32,
}

impl Default for SequenceTuning {
    fn default() -> Self {
        Self {
            count_up_duration_ms: 2000.0,
            count_up_frame_ms: 16.0,
            typewriter_interval_ms: 50.0,
            path_morph_duration_ms: 1000.0,
        }
    }
}

/// Frame-rate monitor tuning
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorTuning {
    /// Sampling window length
    pub window_ms: f32,
    /// Below this average the engine degrades itself
    pub low_fps_threshold: u32,
    /// Transition duration cap once degraded
    pub reduced_duration_ms: f32,
}

impl Default for MonitorTuning {
    fn default() -> Self {
        Self {
            window_ms: 1000.0,
            low_fps_threshold: 30,
            reduced_duration_ms: 100.0,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = Tuning::default();
        assert_eq!(t.reveal.fade_threshold, 0.1);
        assert_eq!(t.reveal.slide_margin_bottom, 100.0);
        assert_eq!(t.reveal.scale_threshold, 0.3);
        assert_eq!(t.scroll.default_parallax_speed, 0.5);
        assert_eq!(t.feedback.service_feature_stagger_ms, 50.0);
        assert_eq!(t.feedback.overlay_lifetime_ms, 600.0);
        assert_eq!(t.sequence.count_up_duration_ms, 2000.0);
        assert_eq!(t.monitor.low_fps_threshold, 30);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let t = Tuning::from_toml_str(
            r#"
            [reveal]
            fade_threshold = 0.25

            [scroll]
            default_parallax_speed = 0.8
            "#,
        )
        .unwrap();

        assert_eq!(t.reveal.fade_threshold, 0.25);
        assert_eq!(t.scroll.default_parallax_speed, 0.8);
        // Untouched sections and fields stay stock
        assert_eq!(t.reveal.slide_threshold, 0.2);
        assert_eq!(t.monitor.window_ms, 1000.0);
    }

    #[test]
    fn test_empty_input_is_default() {
        let t = Tuning::from_toml_str("").unwrap();
        assert_eq!(t, Tuning::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Tuning::from_toml_str(
            r#"
            [reveal]
            fade_treshold = 0.25
            "#,
        );
        assert!(matches!(err, Err(TuningError::Parse(_))));

        let err = Tuning::from_toml_str("[revea1]\n");
        assert!(matches!(err, Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_round_trip() {
        let mut t = Tuning::default();
        t.monitor.low_fps_threshold = 45;
        let text = toml::to_string(&t).unwrap();
        assert_eq!(Tuning::from_toml_str(&text).unwrap(), t);
    }
}
