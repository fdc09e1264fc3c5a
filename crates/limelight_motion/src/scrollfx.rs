//! Scroll-linked effects: parallax layers and scroll progress
//!
//! Scroll events only raise a flag; the actual style writes happen at most
//! once per frame no matter how many events arrived in between. This is the
//! classic ticking pattern: the event handler stays cheap and the work runs
//! on frame cadence.

use limelight_core::{Marker, Stage, Transform};

use crate::config::ScrollTuning;

/// Frame-batched scroll effect runner
pub struct ScrollFx {
    pending: bool,
    parallax_enabled: bool,
}

impl Default for ScrollFx {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollFx {
    pub fn new() -> Self {
        Self {
            pending: false,
            parallax_enabled: true,
        }
    }

    /// Note that the scroll position changed; the recompute runs at the
    /// next frame. Calling this many times between frames coalesces into
    /// one recompute.
    pub fn request_recompute(&mut self) {
        self.pending = true;
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Drop any batched recompute without running it
    pub fn cancel_pending(&mut self) {
        self.pending = false;
    }

    /// Run the batched recompute, if one is pending. Returns whether any
    /// work ran.
    pub fn run_if_pending(&mut self, stage: &mut Stage, tuning: &ScrollTuning) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.run(stage, tuning);
        true
    }

    fn run(&self, stage: &mut Stage, tuning: &ScrollTuning) {
        let scroll_y = stage.viewport().scroll_y;

        if self.parallax_enabled {
            for id in stage.nodes_with_marker(Marker::Parallax) {
                let Some(node) = stage.get_mut(id) else {
                    continue;
                };
                let speed = node.parallax.unwrap_or(tuning.default_parallax_speed);
                node.style.transform = Some(Transform::translate_y(-(scroll_y * speed)));
            }
        }

        let progress = Self::progress_percent(scroll_y, stage.scroll_range());
        for id in stage.nodes_with_marker(Marker::ScrollProgress) {
            if let Some(style) = stage.style_mut(id) {
                style.width_pct = Some(progress);
            }
        }
    }

    /// Scroll position as a percentage of the scrollable range.
    ///
    /// Clamped to `0.0..=100.0`; a document with nothing to scroll reports
    /// 0 rather than dividing by zero.
    fn progress_percent(scroll_y: f32, scroll_range: f32) -> f32 {
        if scroll_range <= 0.0 {
            return 0.0;
        }
        (scroll_y / scroll_range * 100.0).clamp(0.0, 100.0)
    }

    /// Pin every parallax layer at explicit identity and stop moving them.
    ///
    /// Identity, not a cleared override: a stylesheet transform must not
    /// resurface when the engine backs off. Progress indicators keep
    /// updating afterwards.
    pub fn disable_parallax(&mut self, stage: &mut Stage) {
        self.parallax_enabled = false;
        for id in stage.nodes_with_marker(Marker::Parallax) {
            if let Some(style) = stage.style_mut(id) {
                style.transform = Some(Transform::IDENTITY);
            }
        }
    }

    pub fn parallax_enabled(&self) -> bool {
        self.parallax_enabled
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use limelight_core::{NodeId, Rect, StageNode, Viewport};

    fn scroll_stage() -> (Stage, NodeId, NodeId) {
        let mut stage = Stage::new(Viewport::new(800.0, 600.0));
        stage.set_content_height(2000.0); // scroll range 1400
        let layer = stage.insert(
            StageNode::new(Rect::new(0.0, 0.0, 800.0, 400.0)).with_parallax(2.0),
        );
        let bar = stage.insert(
            StageNode::new(Rect::new(0.0, 0.0, 800.0, 4.0)).with_marker(Marker::ScrollProgress),
        );
        (stage, layer, bar)
    }

    #[test]
    fn test_events_coalesce_into_one_recompute() {
        let (mut stage, _, _) = scroll_stage();
        let mut fx = ScrollFx::new();

        for y in [10.0, 20.0, 30.0] {
            stage.set_scroll_y(y);
            fx.request_recompute();
        }
        assert!(fx.has_pending());

        // One frame, one recompute, computed from the latest offset
        assert!(fx.run_if_pending(&mut stage, &ScrollTuning::default()));
        assert!(!fx.run_if_pending(&mut stage, &ScrollTuning::default()));
    }

    #[test]
    fn test_parallax_offset() {
        let (mut stage, layer, _) = scroll_stage();
        let mut fx = ScrollFx::new();

        stage.set_scroll_y(100.0);
        fx.request_recompute();
        fx.run_if_pending(&mut stage, &ScrollTuning::default());

        // speed 2.0 at offset 100 pulls the layer up 200
        assert_eq!(
            stage.style(layer).transform,
            Some(Transform::translate_y(-200.0))
        );
    }

    #[test]
    fn test_parallax_default_speed() {
        let mut stage = Stage::new(Viewport::new(800.0, 600.0));
        stage.set_content_height(2000.0);
        let layer = stage.insert(
            StageNode::new(Rect::new(0.0, 0.0, 800.0, 400.0)).with_marker(Marker::Parallax),
        );

        let mut fx = ScrollFx::new();
        stage.set_scroll_y(100.0);
        fx.request_recompute();
        fx.run_if_pending(&mut stage, &ScrollTuning::default());

        assert_eq!(
            stage.style(layer).transform,
            Some(Transform::translate_y(-50.0))
        );
    }

    #[test]
    fn test_progress_clamps() {
        let (mut stage, _, bar) = scroll_stage();
        let mut fx = ScrollFx::new();
        let tuning = ScrollTuning::default();

        stage.set_scroll_y(700.0);
        fx.request_recompute();
        fx.run_if_pending(&mut stage, &tuning);
        assert_eq!(stage.style(bar).width_pct, Some(50.0));

        // Overscroll past the end stays at 100
        stage.set_scroll_y(5000.0);
        fx.request_recompute();
        fx.run_if_pending(&mut stage, &tuning);
        assert_eq!(stage.style(bar).width_pct, Some(100.0));

        // Rubber-banding above the top stays at 0
        stage.set_scroll_y(-50.0);
        fx.request_recompute();
        fx.run_if_pending(&mut stage, &tuning);
        assert_eq!(stage.style(bar).width_pct, Some(0.0));
    }

    #[test]
    fn test_unscrollable_document_reports_zero() {
        let mut stage = Stage::new(Viewport::new(800.0, 600.0));
        let bar = stage.insert(
            StageNode::new(Rect::new(0.0, 0.0, 800.0, 4.0)).with_marker(Marker::ScrollProgress),
        );

        let mut fx = ScrollFx::new();
        stage.set_scroll_y(10.0);
        fx.request_recompute();
        fx.run_if_pending(&mut stage, &ScrollTuning::default());

        assert_eq!(stage.style(bar).width_pct, Some(0.0));
    }

    #[test]
    fn test_disable_parallax_pins_layers() {
        let (mut stage, layer, bar) = scroll_stage();
        let mut fx = ScrollFx::new();
        let tuning = ScrollTuning::default();

        stage.set_scroll_y(100.0);
        fx.request_recompute();
        fx.run_if_pending(&mut stage, &tuning);

        fx.disable_parallax(&mut stage);
        assert!(!fx.parallax_enabled());
        assert_eq!(stage.style(layer).transform, Some(Transform::IDENTITY));

        // Further scrolling moves the progress bar but not the layer
        stage.set_scroll_y(1400.0);
        fx.request_recompute();
        fx.run_if_pending(&mut stage, &tuning);
        assert_eq!(stage.style(layer).transform, Some(Transform::IDENTITY));
        assert_eq!(stage.style(bar).width_pct, Some(100.0));
    }
}
