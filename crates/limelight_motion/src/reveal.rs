//! Reveal-on-scroll
//!
//! Three watcher categories (fade, slide, scale) arm themselves over nodes
//! carrying their markers. Each frame the registry measures how much of an
//! armed node sits inside the category's trigger window; past the threshold
//! the node is disarmed and revealed in two steps:
//!
//! 1. immediately: hidden starting style plus the transition the host
//!    should run
//! 2. next frame: the visible target style, so the host has rendered the
//!    hidden state once before interpolation starts
//!
//! Disarming first is what makes reveals one-shot: scrolling an already
//! revealed node out and back in does nothing.

use limelight_core::{Marker, NodeId, Stage, TimingFunction, Transform, Transition};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::debug;

use crate::config::RevealTuning;

// =============================================================================
// Categories
// =============================================================================

/// Reveal watcher category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealKind {
    Fade,
    Slide,
    Scale,
}

impl RevealKind {
    /// Evaluation order; later categories overwrite shared properties when
    /// a node belongs to several.
    pub const ALL: [RevealKind; 3] = [RevealKind::Fade, RevealKind::Slide, RevealKind::Scale];

    /// Does this marker opt a node into the category?
    pub fn claims(&self, marker: Marker) -> bool {
        match self {
            RevealKind::Fade => matches!(marker, Marker::FadeUp | Marker::FadeIn | Marker::Fade),
            RevealKind::Slide => matches!(
                marker,
                Marker::SlideUp | Marker::SlideLeft | Marker::SlideRight | Marker::Slide
            ),
            RevealKind::Scale => matches!(marker, Marker::ScaleUp | Marker::Scale),
        }
    }

    fn threshold(&self, tuning: &RevealTuning) -> f32 {
        match self {
            RevealKind::Fade => tuning.fade_threshold,
            RevealKind::Slide => tuning.slide_threshold,
            RevealKind::Scale => tuning.scale_threshold,
        }
    }

    fn margin_bottom(&self, tuning: &RevealTuning) -> f32 {
        match self {
            RevealKind::Fade => tuning.fade_margin_bottom,
            RevealKind::Slide => tuning.slide_margin_bottom,
            RevealKind::Scale => 0.0,
        }
    }

    fn transition(&self, tuning: &RevealTuning) -> Transition {
        match self {
            RevealKind::Fade => Transition::new(tuning.fade_duration_ms, TimingFunction::Ease),
            RevealKind::Slide => Transition::new(
                tuning.slide_duration_ms,
                TimingFunction::CubicBezier {
                    x1: 0.4,
                    y1: 0.0,
                    x2: 0.2,
                    y2: 1.0,
                },
            ),
            RevealKind::Scale => Transition::new(tuning.scale_duration_ms, TimingFunction::Ease),
        }
    }

    /// Starting transform for a node about to reveal
    fn hidden_transform(&self, markers: &[Marker]) -> Transform {
        match self {
            RevealKind::Fade => Transform::translate_y(30.0),
            RevealKind::Slide => match slide_direction(markers) {
                SlideDirection::Left => Transform::translate_x(-50.0),
                SlideDirection::Right => Transform::translate_x(50.0),
                SlideDirection::Up => Transform::translate_y(30.0),
            },
            RevealKind::Scale => Transform::uniform_scale(0.9),
        }
    }
}

/// Which way a slide node enters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideDirection {
    /// Rises from below (the default)
    Up,
    Left,
    Right,
}

/// Resolve a node's slide direction from its markers.
///
/// Left beats right beats up when a node carries several; the bare
/// `slide`/`slide-up` markers mean up.
pub fn slide_direction(markers: &[Marker]) -> SlideDirection {
    if markers.contains(&Marker::SlideLeft) {
        SlideDirection::Left
    } else if markers.contains(&Marker::SlideRight) {
        SlideDirection::Right
    } else {
        SlideDirection::Up
    }
}

// =============================================================================
// Registry
// =============================================================================

/// A reveal that fired this frame; its visible style lands next frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealCommit {
    pub node: NodeId,
    pub kind: RevealKind,
}

struct Watcher {
    kind: RevealKind,
    armed: FxHashSet<NodeId>,
}

/// All three category watchers plus their armed sets
pub struct RevealRegistry {
    watchers: [Watcher; 3],
}

impl Default for RevealRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealRegistry {
    pub fn new() -> Self {
        Self {
            watchers: RevealKind::ALL.map(|kind| Watcher {
                kind,
                armed: FxHashSet::default(),
            }),
        }
    }

    /// Arm watchers over every marked node currently on the stage.
    ///
    /// Calling this again re-arms nodes that already revealed; they will
    /// hide and reveal once more when they next qualify.
    pub fn register_all(&mut self, stage: &Stage) {
        for watcher in &mut self.watchers {
            watcher.armed.clear();
            for (id, node) in stage.iter() {
                if node.markers.iter().any(|m| watcher.kind.claims(*m)) {
                    watcher.armed.insert(id);
                }
            }
            debug!(
                kind = ?watcher.kind,
                armed = watcher.armed.len(),
                "reveal watcher armed"
            );
        }
    }

    /// Is the node still waiting to reveal in any category?
    pub fn is_armed(&self, node: NodeId) -> bool {
        self.watchers.iter().any(|w| w.armed.contains(&node))
    }

    /// Total armed entries across categories
    pub fn armed_count(&self) -> usize {
        self.watchers.iter().map(|w| w.armed.len()).sum()
    }

    /// Measure every armed node and fire those past their threshold.
    ///
    /// Fired nodes get their hidden style written immediately; the returned
    /// commits must be applied on the *next* frame via [`Self::commit`].
    /// `duration_cap_ms` caps written transition durations when the engine
    /// is running degraded.
    pub fn evaluate(
        &mut self,
        stage: &mut Stage,
        tuning: &RevealTuning,
        duration_cap_ms: Option<f32>,
    ) -> SmallVec<[RevealCommit; 4]> {
        let mut fired = SmallVec::new();
        let viewport = stage.viewport().rect();

        for watcher in &mut self.watchers {
            let threshold = watcher.kind.threshold(tuning);
            let window = viewport.shrink_bottom(watcher.kind.margin_bottom(tuning));

            // Collect first: the armed set can't be mutated mid-iteration.
            let mut triggered: SmallVec<[NodeId; 4]> = SmallVec::new();
            for &id in &watcher.armed {
                let Some(node) = stage.get(id) else {
                    // Node left the stage; drop it silently on the next sweep.
                    continue;
                };
                let fraction = node.bounds.visible_fraction(&window);
                if fraction > 0.0 && fraction >= threshold {
                    triggered.push(id);
                }
            }

            for id in triggered {
                watcher.armed.remove(&id);

                let Some(node) = stage.get_mut(id) else {
                    continue;
                };
                let mut transition = watcher.kind.transition(tuning);
                if let Some(cap) = duration_cap_ms {
                    transition = transition.with_duration(transition.duration_ms.min(cap));
                }
                let markers = node.markers.clone();
                node.style.opacity = Some(0.0);
                node.style.transform = Some(watcher.kind.hidden_transform(&markers));
                node.style.transition = Some(transition);

                debug!(node = ?id, kind = ?watcher.kind, "reveal triggered");
                fired.push(RevealCommit {
                    node: id,
                    kind: watcher.kind,
                });
            }

            // Stale ids from removed nodes get retained out here.
            watcher.armed.retain(|id| stage.contains(*id));
        }

        fired
    }

    /// Apply a pending reveal's visible style.
    ///
    /// Writes an explicit identity transform rather than clearing the
    /// override: the node must interpolate to a pinned upright pose, not
    /// snap back to whatever the stylesheet says. The transition written at
    /// trigger time stays on the node.
    pub fn commit(stage: &mut Stage, commit: &RevealCommit) {
        if let Some(style) = stage.style_mut(commit.node) {
            style.opacity = Some(1.0);
            style.transform = Some(Transform::IDENTITY);
        }
    }

    /// Disarm everything; no further reveals fire until re-registered
    pub fn clear(&mut self) {
        for watcher in &mut self.watchers {
            watcher.armed.clear();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use limelight_core::{Rect, StageNode, Viewport};

    fn stage_with(markers: &[Marker], bounds: Rect) -> (Stage, NodeId) {
        let mut stage = Stage::new(Viewport::new(800.0, 600.0));
        stage.set_content_height(2000.0);
        let id = stage.insert(StageNode::new(bounds).with_markers(markers.iter().copied()));
        (stage, id)
    }

    fn evaluate(reg: &mut RevealRegistry, stage: &mut Stage) -> SmallVec<[RevealCommit; 4]> {
        reg.evaluate(stage, &RevealTuning::default(), None)
    }

    #[test]
    fn test_reveal_fires_once() {
        // Node fully visible at the top of the page
        let (mut stage, id) = stage_with(&[Marker::FadeIn], Rect::new(0.0, 100.0, 200.0, 100.0));
        let mut reg = RevealRegistry::new();
        reg.register_all(&stage);
        assert!(reg.is_armed(id));

        let fired = evaluate(&mut reg, &mut stage);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].node, id);
        assert!(!reg.is_armed(id));

        // Hidden style written at trigger time
        let style = stage.style(id);
        assert_eq!(style.opacity, Some(0.0));
        assert_eq!(style.transform, Some(Transform::translate_y(30.0)));
        let transition = style.transition.unwrap();
        assert_eq!(transition.duration_ms, 600.0);
        assert_eq!(transition.timing, TimingFunction::Ease);

        // Next frame: visible target
        RevealRegistry::commit(&mut stage, &fired[0]);
        let style = stage.style(id);
        assert_eq!(style.opacity, Some(1.0));
        assert_eq!(style.transform, Some(Transform::IDENTITY));

        // Scrolling away and back cannot re-fire
        stage.set_scroll_y(1400.0);
        assert!(evaluate(&mut reg, &mut stage).is_empty());
        stage.set_scroll_y(0.0);
        assert!(evaluate(&mut reg, &mut stage).is_empty());
    }

    #[test]
    fn test_slide_quarter_visible_triggers() {
        // 100px-tall node with its top 25px inside the slide window once
        // scrolled: 0.25 clears the 0.2 threshold.
        let (mut stage, id) =
            stage_with(&[Marker::SlideLeft], Rect::new(0.0, 775.0, 200.0, 100.0));
        let mut reg = RevealRegistry::new();
        reg.register_all(&stage);

        // Off screen at the top of the page (window is 0..500 after margin)
        assert!(evaluate(&mut reg, &mut stage).is_empty());

        stage.set_scroll_y(300.0);
        let fired = evaluate(&mut reg, &mut stage);
        assert_eq!(fired.len(), 1);

        let style = stage.style(id);
        assert_eq!(style.transform, Some(Transform::translate_x(-50.0)));
        let transition = style.transition.unwrap();
        assert_eq!(transition.duration_ms, 800.0);
        assert_eq!(
            transition.timing,
            TimingFunction::CubicBezier { x1: 0.4, y1: 0.0, x2: 0.2, y2: 1.0 }
        );

        RevealRegistry::commit(&mut stage, &fired[0]);
        assert_eq!(stage.style(id).transform, Some(Transform::IDENTITY));
    }

    #[test]
    fn test_slide_direction_precedence() {
        assert_eq!(
            slide_direction(&[Marker::SlideRight, Marker::SlideLeft]),
            SlideDirection::Left
        );
        assert_eq!(
            slide_direction(&[Marker::SlideUp, Marker::SlideRight]),
            SlideDirection::Right
        );
        assert_eq!(slide_direction(&[Marker::Slide]), SlideDirection::Up);

        let (mut stage, id) = stage_with(
            &[Marker::SlideLeft, Marker::SlideRight],
            Rect::new(0.0, 0.0, 200.0, 100.0),
        );
        let mut reg = RevealRegistry::new();
        reg.register_all(&stage);
        evaluate(&mut reg, &mut stage);
        assert_eq!(stage.style(id).transform, Some(Transform::translate_x(-50.0)));
    }

    #[test]
    fn test_below_threshold_does_not_fire() {
        // 20% visible against the scale threshold of 0.3
        let (mut stage, id) = stage_with(&[Marker::ScaleUp], Rect::new(0.0, 580.0, 200.0, 100.0));
        let mut reg = RevealRegistry::new();
        reg.register_all(&stage);

        assert!(evaluate(&mut reg, &mut stage).is_empty());
        assert!(reg.is_armed(id));
        assert!(stage.style(id).is_empty());

        // Ten more pixels of scroll puts it at 0.3 exactly
        stage.set_scroll_y(10.0);
        assert_eq!(evaluate(&mut reg, &mut stage).len(), 1);
    }

    #[test]
    fn test_fade_margin_shrinks_window() {
        // Bottom 50px of the viewport doesn't count for fade: a node whose
        // visible sliver sits entirely in that band stays hidden.
        let (mut stage, id) = stage_with(&[Marker::FadeUp], Rect::new(0.0, 560.0, 200.0, 100.0));
        let mut reg = RevealRegistry::new();
        reg.register_all(&stage);

        assert!(evaluate(&mut reg, &mut stage).is_empty());

        // Scroll past the margin band and it fires
        stage.set_scroll_y(30.0);
        assert_eq!(evaluate(&mut reg, &mut stage).len(), 1);
        assert!(!reg.is_armed(id));
    }

    #[test]
    fn test_multi_category_node_triggers_in_order() {
        // A node in both fade and scale categories: both fire, and the
        // later scale write owns the shared transform property.
        let (mut stage, id) = stage_with(
            &[Marker::FadeIn, Marker::ScaleUp],
            Rect::new(0.0, 0.0, 200.0, 100.0),
        );
        let mut reg = RevealRegistry::new();
        reg.register_all(&stage);
        assert_eq!(reg.armed_count(), 2);

        let fired = evaluate(&mut reg, &mut stage);
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0].kind, RevealKind::Fade);
        assert_eq!(fired[1].kind, RevealKind::Scale);
        assert_eq!(stage.style(id).transform, Some(Transform::uniform_scale(0.9)));
    }

    #[test]
    fn test_register_all_rearms() {
        let (mut stage, id) = stage_with(&[Marker::FadeIn], Rect::new(0.0, 0.0, 200.0, 100.0));
        let mut reg = RevealRegistry::new();
        reg.register_all(&stage);
        assert_eq!(evaluate(&mut reg, &mut stage).len(), 1);
        assert!(!reg.is_armed(id));

        reg.register_all(&stage);
        assert!(reg.is_armed(id));
        assert_eq!(evaluate(&mut reg, &mut stage).len(), 1);
    }

    #[test]
    fn test_duration_cap_applies_when_degraded() {
        let (mut stage, id) = stage_with(&[Marker::FadeIn], Rect::new(0.0, 0.0, 200.0, 100.0));
        let mut reg = RevealRegistry::new();
        reg.register_all(&stage);

        reg.evaluate(&mut stage, &RevealTuning::default(), Some(100.0));
        assert_eq!(stage.style(id).transition.unwrap().duration_ms, 100.0);
    }

    #[test]
    fn test_removed_node_is_dropped() {
        let (mut stage, id) = stage_with(&[Marker::FadeIn], Rect::new(0.0, 5000.0, 200.0, 100.0));
        let mut reg = RevealRegistry::new();
        reg.register_all(&stage);
        assert!(reg.is_armed(id));

        stage.remove(id);
        assert!(evaluate(&mut reg, &mut stage).is_empty());
        assert!(!reg.is_armed(id));
    }
}
