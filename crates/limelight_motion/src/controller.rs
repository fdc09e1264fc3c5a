//! Engine facade
//!
//! [`Controller`] owns the stage and every effect subsystem, and is the only
//! type hosts need to talk to. The host feeds it input events as they
//! arrive and calls [`Controller::frame`] once per rendered frame; each
//! frame runs a fixed phase order:
//!
//! 1. apply reveal styles committed last frame
//! 2. recompute scroll effects, if a scroll arrived since the last frame
//! 3. measure armed reveal nodes and write hidden styles for any that fire
//! 4. apply due staggered hover writes and sweep expired overlays
//! 5. tick utility sequences
//! 6. sample the frame-rate monitor and degrade if it reports a low rate
//!
//! Degradation is one-way for the life of the controller: parallax pins to
//! identity and every transition duration written afterwards is capped.

use std::time::Instant;

use limelight_core::{NodeId, Stage, StageEvent, TimingFunction, Transition};
use tracing::{debug, warn};

use crate::config::Tuning;
use crate::feedback::Feedback;
use crate::monitor::FrameRateMonitor;
use crate::overlay::{overlay_keyframes, OverlayKeyframes, OverlayRegistry};
use crate::reveal::{RevealCommit, RevealRegistry};
use crate::scrollfx::ScrollFx;
use crate::sequence::{SequenceId, Sequences};

/// Owns the stage and runs every effect against it
pub struct Controller {
    stage: Stage,
    tuning: Tuning,
    reveals: RevealRegistry,
    scrollfx: ScrollFx,
    feedback: Feedback,
    sequences: Sequences,
    monitor: FrameRateMonitor,
    /// Reveals triggered last frame, waiting for their visible style
    commit_queue: Vec<RevealCommit>,
    reduced: bool,
    destroyed: bool,
}

impl Controller {
    pub fn new(stage: Stage) -> Self {
        Self::with_tuning(stage, Tuning::default())
    }

    pub fn with_tuning(stage: Stage, tuning: Tuning) -> Self {
        Self {
            stage,
            tuning,
            reveals: RevealRegistry::new(),
            scrollfx: ScrollFx::new(),
            feedback: Feedback::new(),
            sequences: Sequences::new(),
            monitor: FrameRateMonitor::new(),
            commit_queue: Vec::new(),
            reduced: false,
            destroyed: false,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Scan the stage and wire up every marked node: reveal watchers armed,
    /// hover and click targets registered.
    ///
    /// Call again after adding or removing nodes. Re-registering re-arms
    /// nodes that already revealed.
    pub fn register_all(&mut self) {
        if self.destroyed {
            debug!("register_all ignored; controller destroyed");
            return;
        }
        self.reveals.register_all(&self.stage);
        self.feedback.register_all(&self.stage);
        self.scrollfx.request_recompute();
    }

    /// Route one input event at `now`.
    ///
    /// Scrolls update the viewport immediately but defer effect recomputes
    /// to the next frame, so any number of same-frame scrolls cost one
    /// recompute. Pointer events run their feedback choreography inline.
    pub fn handle_event(&mut self, event: StageEvent, now: Instant) {
        if self.destroyed {
            return;
        }
        match event {
            StageEvent::Scrolled { to } => {
                self.stage.set_scroll_y(to);
                self.scrollfx.request_recompute();
            }
            _ => {
                self.feedback
                    .handle_event(&mut self.stage, &event, now, &self.tuning.feedback);
            }
        }
    }

    /// Advance one frame at `now`.
    ///
    /// After [`Controller::destroy`] this only sweeps out overlays that were
    /// still live at teardown.
    pub fn frame(&mut self, now: Instant) {
        if self.destroyed {
            self.feedback.sweep_overlays(now);
            return;
        }

        for commit in std::mem::take(&mut self.commit_queue) {
            RevealRegistry::commit(&mut self.stage, &commit);
        }

        self.scrollfx.run_if_pending(&mut self.stage, &self.tuning.scroll);

        let cap = self.duration_cap();
        let fired = self.reveals.evaluate(&mut self.stage, &self.tuning.reveal, cap);
        self.commit_queue.extend(fired);

        self.feedback.frame(&mut self.stage, now);
        self.sequences.tick(&mut self.stage, now);

        if let Some(fps) = self.monitor.sample(now, self.tuning.monitor.window_ms) {
            if fps < self.tuning.monitor.low_fps_threshold && !self.reduced {
                warn!(
                    fps,
                    threshold = self.tuning.monitor.low_fps_threshold,
                    "low frame rate; reducing motion fidelity"
                );
                self.scrollfx.disable_parallax(&mut self.stage);
                self.reduced = true;
            }
        }
    }

    /// Tear the engine down: disarm watchers, drop queued work, stop the
    /// monitor. Overlays still on screen keep their deadlines and later
    /// `frame` calls sweep them out; nothing else runs again.
    pub fn destroy(&mut self) {
        self.reveals.clear();
        self.commit_queue.clear();
        self.scrollfx.cancel_pending();
        self.feedback.clear_interactions();
        self.sequences.cancel_all();
        self.monitor.stop();
        self.destroyed = true;
        debug!("controller destroyed");
    }

    /// Begin frame-rate monitoring. Off by default; once a window measures
    /// below the tuned threshold the controller reduces fidelity for good.
    pub fn start_performance_monitoring(&mut self) {
        if !self.destroyed {
            self.monitor.start();
        }
    }

    // =========================================================================
    // Utility sequences
    // =========================================================================

    /// Count `node`'s text up to `target` over the tuned default duration
    pub fn start_count_up(&mut self, node: NodeId, target: u64) -> Option<SequenceId> {
        self.start_count_up_over(node, target, self.tuning.sequence.count_up_duration_ms)
    }

    pub fn start_count_up_over(
        &mut self,
        node: NodeId,
        target: u64,
        duration_ms: f32,
    ) -> Option<SequenceId> {
        if self.destroyed {
            return None;
        }
        Some(self.sequences.start_count_up(
            node,
            target,
            duration_ms,
            self.tuning.sequence.count_up_frame_ms,
        ))
    }

    /// Type `text` into `node` at the tuned default pace
    pub fn start_typewriter(
        &mut self,
        node: NodeId,
        text: &str,
        now: Instant,
    ) -> Option<SequenceId> {
        self.start_typewriter_paced(node, text, now, self.tuning.sequence.typewriter_interval_ms)
    }

    pub fn start_typewriter_paced(
        &mut self,
        node: NodeId,
        text: &str,
        now: Instant,
        interval_ms: f32,
    ) -> Option<SequenceId> {
        if self.destroyed {
            return None;
        }
        Some(
            self.sequences
                .start_typewriter(&mut self.stage, node, text, now, interval_ms),
        )
    }

    /// Morph a shape node's path over the tuned default duration.
    ///
    /// Returns `None` for nodes without path data.
    pub fn morph_path(&mut self, node: NodeId, new_path: impl Into<String>) -> Option<SequenceId> {
        self.morph_path_over(node, new_path, self.tuning.sequence.path_morph_duration_ms)
    }

    pub fn morph_path_over(
        &mut self,
        node: NodeId,
        new_path: impl Into<String>,
        duration_ms: f32,
    ) -> Option<SequenceId> {
        if self.destroyed {
            return None;
        }
        let duration = match self.duration_cap() {
            Some(cap) => duration_ms.min(cap),
            None => duration_ms,
        };
        self.sequences.start_path_morph(
            &mut self.stage,
            node,
            new_path,
            Transition::new(duration, TimingFunction::EaseInOut),
        )
    }

    pub fn cancel_sequence(&mut self, id: SequenceId) {
        self.sequences.cancel(id);
    }

    pub fn is_sequence_running(&self, id: SequenceId) -> bool {
        self.sequences.is_running(id)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable stage access, for hosts updating bounds or content
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn into_stage(self) -> Stage {
        self.stage
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        self.feedback.overlays()
    }

    /// Visual duration for sampling overlays, shortened once degraded.
    /// Overlay lifetimes are unaffected.
    pub fn overlay_visual_duration_ms(&self) -> f32 {
        match self.duration_cap() {
            Some(cap) => cap,
            None => self.tuning.feedback.overlay_lifetime_ms,
        }
    }

    /// Published overlay effect definitions at the current fidelity
    pub fn overlay_keyframes(&self) -> [OverlayKeyframes; 2] {
        overlay_keyframes(self.overlay_visual_duration_ms())
    }

    /// True once the low-frame-rate latch has tripped
    pub fn reduced_motion(&self) -> bool {
        self.reduced
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn duration_cap(&self) -> Option<f32> {
        self.reduced
            .then_some(self.tuning.monitor.reduced_duration_ms)
    }
}

// =============================================================================
// Tests
// =============================================================================
