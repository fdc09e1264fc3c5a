//! Pointer feedback choreography
//!
//! Hover and click effects for the interactive roles: service cards lift
//! and cascade their feature list, pricing cards emphasize their price,
//! buttons rise and ripple, click targets burst at the pointer.
//!
//! Each interactive node gets a tiny idle/hovered state machine, so
//! repeated enter events while already hovered are no-ops and a leave
//! without a prior enter does nothing. Staggered feature writes are owned
//! by the hovering card: leaving cancels whatever hasn't fired yet, which
//! keeps a quick enter/leave from replaying half a cascade onto a card
//! that already reset itself.
//!
//! Everything here writes styles; un-hovering writes `None` back into the
//! exact fields the enter wrote, returning those properties to the host
//! stylesheet.

use std::time::{Duration, Instant};

use limelight_core::{
    event_types, Color, ColorRole, Marker, NodeId, Point, Shadow, Stage, StageEvent, StateMachine,
    Transform,
};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::config::FeedbackTuning;
use crate::overlay::{Overlay, OverlayRegistry};

// =============================================================================
// Hover styling constants
// =============================================================================

const SERVICE_CARD_LIFT: Transform = Transform::translate_y(-10.0).with_scale(1.02);
const SERVICE_CARD_SHADOW: Shadow = Shadow::new(0.0, 20.0, 40.0, Color::BLACK.with_alpha(0.15));
const SERVICE_ICON_POP: Transform = Transform::uniform_scale(1.05);
const SERVICE_FEATURE_NUDGE: Transform = Transform::translate_x(10.0);

const PRICING_CARD_LIFT: Transform = Transform::translate_y(-5.0).with_scale(1.03);
const PLAN_PRICE_POP: Transform = Transform::uniform_scale(1.1);
const PLAN_BUTTON_POP: Transform = Transform::uniform_scale(1.05);
const PLAN_FEATURE_NUDGE: Transform = Transform::translate_x(5.0);

const BUTTON_LIFT: Transform = Transform::translate_y(-2.0);
const BUTTON_SHADOW: Shadow = Shadow::new(0.0, 8.0, 25.0, Color::BLACK.with_alpha(0.15));

/// Hover state machine states
const IDLE: u32 = 0;
const HOVERED: u32 = 1;

// =============================================================================
// Roles
// =============================================================================

/// How a node reacts to hover
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HoverRole {
    ServiceCard,
    PricingCard,
    Button,
}

/// A node's hover role; card roles win over the plain button role when a
/// node carries several markers.
fn hover_role(markers: &[Marker]) -> Option<HoverRole> {
    if markers.contains(&Marker::ServiceCard) {
        Some(HoverRole::ServiceCard)
    } else if markers.contains(&Marker::PricingCard) {
        Some(HoverRole::PricingCard)
    } else if markers.contains(&Marker::Button) {
        Some(HoverRole::Button)
    } else {
        None
    }
}

fn is_click_target(markers: &[Marker]) -> bool {
    markers
        .iter()
        .any(|m| matches!(m, Marker::Button | Marker::NavLink | Marker::PagerDot))
}

fn hover_fsm() -> StateMachine {
    StateMachine::builder(IDLE)
        .on(IDLE, event_types::POINTER_ENTER, HOVERED)
        .on(HOVERED, event_types::POINTER_LEAVE, IDLE)
        .build()
}

// =============================================================================
// Feedback engine
// =============================================================================

struct HoverEntry {
    role: HoverRole,
    fsm: StateMachine,
}

/// A feature-list write waiting for its stagger delay
struct StaggeredWrite {
    /// Hovered card this write belongs to; leaving the card cancels it
    owner: NodeId,
    target: NodeId,
    due: Instant,
    transform: Transform,
    color: Option<ColorRole>,
}

/// Hover/click choreography plus the overlay registry it feeds
pub struct Feedback {
    hover: FxHashMap<NodeId, HoverEntry>,
    click_targets: FxHashSet<NodeId>,
    pending: Vec<StaggeredWrite>,
    overlays: OverlayRegistry,
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new()
    }
}

impl Feedback {
    pub fn new() -> Self {
        Self {
            hover: FxHashMap::default(),
            click_targets: FxHashSet::default(),
            pending: Vec::new(),
            overlays: OverlayRegistry::new(),
        }
    }

    /// Wire up every interactive node currently on the stage.
    ///
    /// Rebuilds from scratch: hover states reset to idle, but live overlays
    /// are left to run out their lifetimes.
    pub fn register_all(&mut self, stage: &Stage) {
        self.hover.clear();
        self.click_targets.clear();
        self.pending.clear();

        for (id, node) in stage.iter() {
            if let Some(role) = hover_role(&node.markers) {
                self.hover.insert(
                    id,
                    HoverEntry {
                        role,
                        fsm: hover_fsm(),
                    },
                );
            }
            if is_click_target(&node.markers) {
                self.click_targets.insert(id);
            }
        }
        debug!(
            hover = self.hover.len(),
            click = self.click_targets.len(),
            "feedback targets registered"
        );
    }

    /// Route one input event. `now` anchors stagger delays and overlay
    /// lifetimes.
    pub fn handle_event(
        &mut self,
        stage: &mut Stage,
        event: &StageEvent,
        now: Instant,
        tuning: &FeedbackTuning,
    ) {
        // A target node removed since registration is skipped, never an error
        if event.node().is_some_and(|node| stage.get(node).is_none()) {
            return;
        }
        match *event {
            StageEvent::PointerEntered { node } | StageEvent::PointerLeft { node } => {
                self.hover_transition(stage, node, event, now, tuning)
            }
            StageEvent::Clicked { node, x, y } => self.clicked(stage, node, x, y, now, tuning),
            StageEvent::Scrolled { .. } => {}
        }
    }

    /// Apply due staggered writes and sweep expired overlays
    pub fn frame(&mut self, stage: &mut Stage, now: Instant) {
        if !self.pending.is_empty() {
            let mut i = 0;
            while i < self.pending.len() {
                if self.pending[i].due <= now {
                    let write = self.pending.remove(i);
                    if let Some(style) = stage.style_mut(write.target) {
                        style.transform = Some(write.transform);
                        if write.color.is_some() {
                            style.color = write.color;
                        }
                    }
                } else {
                    i += 1;
                }
            }
        }

        self.overlays.sweep(now);
    }

    pub fn overlays(&self) -> &OverlayRegistry {
        &self.overlays
    }

    /// Staggered writes still waiting to fire
    pub fn pending_stagger_count(&self) -> usize {
        self.pending.len()
    }

    /// Forget all interaction wiring and scheduled writes. Overlays stay;
    /// the sweep remains responsible for them.
    pub fn clear_interactions(&mut self) {
        self.hover.clear();
        self.click_targets.clear();
        self.pending.clear();
    }

    /// Sweep overlays without touching anything else (post-teardown frames)
    pub fn sweep_overlays(&mut self, now: Instant) -> usize {
        self.overlays.sweep(now)
    }

    // ── hover ────────────────────────────────────────────────────────────

    /// Feed the event into the node's hover machine and run the choreography
    /// for whichever state it lands in. Events the machine ignores (double
    /// enter, leave without enter) change nothing.
    fn hover_transition(
        &mut self,
        stage: &mut Stage,
        node: NodeId,
        event: &StageEvent,
        now: Instant,
        tuning: &FeedbackTuning,
    ) {
        let Some(entry) = self.hover.get_mut(&node) else {
            return;
        };
        let was = entry.fsm.current_state();
        let state = entry.fsm.send(event.event_type());
        if state == was {
            return;
        }
        let role = entry.role;

        if state == HOVERED {
            debug!(?node, ?role, "hover enter");
            match role {
                HoverRole::ServiceCard => self.enter_service_card(stage, node, now, tuning),
                HoverRole::PricingCard => self.enter_pricing_card(stage, node, now, tuning),
                HoverRole::Button => self.enter_button(stage, node, now, tuning),
            }
        } else {
            debug!(?node, ?role, "hover leave");
            self.leave(stage, node, role);
        }
    }

    fn enter_service_card(
        &mut self,
        stage: &mut Stage,
        card: NodeId,
        now: Instant,
        tuning: &FeedbackTuning,
    ) {
        if let Some(style) = stage.style_mut(card) {
            style.transform = Some(SERVICE_CARD_LIFT);
            style.shadow = Some(SERVICE_CARD_SHADOW);
        }

        if let Some(icon) = stage.child_with_marker(card, Marker::ServiceIcon) {
            if let Some(style) = stage.style_mut(icon) {
                style.transform = Some(SERVICE_ICON_POP);
            }
        }
        if let Some(title) = stage.child_with_marker(card, Marker::ServiceTitle) {
            if let Some(style) = stage.style_mut(title) {
                style.color = Some(ColorRole::Accent);
            }
        }

        self.schedule_stagger(
            stage.children_with_marker(card, Marker::ServiceFeature).as_slice(),
            card,
            now,
            tuning.service_feature_stagger_ms,
            SERVICE_FEATURE_NUDGE,
            Some(ColorRole::Emphasis),
        );
    }

    fn enter_pricing_card(
        &mut self,
        stage: &mut Stage,
        card: NodeId,
        now: Instant,
        tuning: &FeedbackTuning,
    ) {
        if let Some(style) = stage.style_mut(card) {
            style.transform = Some(PRICING_CARD_LIFT);
        }

        if let Some(price) = stage.child_with_marker(card, Marker::PlanPrice) {
            if let Some(style) = stage.style_mut(price) {
                style.transform = Some(PLAN_PRICE_POP);
                style.color = Some(ColorRole::Accent);
            }
        }
        if let Some(button) = stage.child_with_marker(card, Marker::Button) {
            if let Some(style) = stage.style_mut(button) {
                style.transform = Some(PLAN_BUTTON_POP);
            }
        }

        self.schedule_stagger(
            stage.children_with_marker(card, Marker::PlanFeature).as_slice(),
            card,
            now,
            tuning.plan_feature_stagger_ms,
            PLAN_FEATURE_NUDGE,
            None,
        );
    }

    fn enter_button(
        &mut self,
        stage: &mut Stage,
        button: NodeId,
        now: Instant,
        tuning: &FeedbackTuning,
    ) {
        let Some(bounds) = stage.get(button).map(|n| n.bounds) else {
            return;
        };
        if let Some(style) = stage.style_mut(button) {
            style.transform = Some(BUTTON_LIFT);
            style.shadow = Some(BUTTON_SHADOW);
            // The ripple needs the button as a clipping anchor; these are
            // one-way latches, never reset on leave.
            style.anchored = Some(true);
            style.clipped = Some(true);
        }

        self.overlays
            .spawn(Overlay::ripple(button, bounds, now, tuning.overlay_lifetime_ms));
    }

    fn schedule_stagger(
        &mut self,
        features: &[NodeId],
        owner: NodeId,
        now: Instant,
        interval_ms: f32,
        transform: Transform,
        color: Option<ColorRole>,
    ) {
        for (i, &target) in features.iter().enumerate() {
            // f64 keeps the stagger slots on exact boundaries
            let delay =
                Duration::from_secs_f64(f64::from(interval_ms.max(0.0)) * i as f64 / 1000.0);
            self.pending.push(StaggeredWrite {
                owner,
                target,
                due: now + delay,
                transform,
                color,
            });
        }
    }

    // ── leave ────────────────────────────────────────────────────────────

    fn leave(&mut self, stage: &mut Stage, node: NodeId, role: HoverRole) {
        // Unfired cascade writes die with the hover
        self.pending.retain(|w| w.owner != node);

        match role {
            HoverRole::ServiceCard => {
                if let Some(style) = stage.style_mut(node) {
                    style.transform = None;
                    style.shadow = None;
                }
                if let Some(icon) = stage.child_with_marker(node, Marker::ServiceIcon) {
                    if let Some(style) = stage.style_mut(icon) {
                        style.transform = None;
                    }
                }
                if let Some(title) = stage.child_with_marker(node, Marker::ServiceTitle) {
                    if let Some(style) = stage.style_mut(title) {
                        style.color = None;
                    }
                }
                for feature in stage.children_with_marker(node, Marker::ServiceFeature) {
                    if let Some(style) = stage.style_mut(feature) {
                        style.transform = None;
                        style.color = None;
                    }
                }
            }
            HoverRole::PricingCard => {
                if let Some(style) = stage.style_mut(node) {
                    style.transform = None;
                }
                if let Some(price) = stage.child_with_marker(node, Marker::PlanPrice) {
                    if let Some(style) = stage.style_mut(price) {
                        style.transform = None;
                        style.color = None;
                    }
                }
                if let Some(button) = stage.child_with_marker(node, Marker::Button) {
                    if let Some(style) = stage.style_mut(button) {
                        style.transform = None;
                    }
                }
                for feature in stage.children_with_marker(node, Marker::PlanFeature) {
                    if let Some(style) = stage.style_mut(feature) {
                        style.transform = None;
                    }
                }
            }
            HoverRole::Button => {
                if let Some(style) = stage.style_mut(node) {
                    style.transform = None;
                    style.shadow = None;
                }
            }
        }
    }

    // ── click ────────────────────────────────────────────────────────────

    fn clicked(
        &mut self,
        stage: &mut Stage,
        node: NodeId,
        x: f32,
        y: f32,
        now: Instant,
        tuning: &FeedbackTuning,
    ) {
        if !self.click_targets.contains(&node) {
            return;
        }
        let Some(bounds) = stage.get(node).map(|n| n.bounds) else {
            return;
        };

        // Burst center in node-local coordinates
        let local = Point::new(x - bounds.x(), y - bounds.y());
        if let Some(style) = stage.style_mut(node) {
            style.anchored = Some(true);
        }
        self.overlays
            .spawn(Overlay::burst(node, local, now, tuning.overlay_lifetime_ms));
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlayKind;
    use limelight_core::{Rect, StageNode, Viewport};

    struct ServiceFixture {
        stage: Stage,
        card: NodeId,
        icon: NodeId,
        title: NodeId,
        features: Vec<NodeId>,
    }

    fn service_fixture() -> ServiceFixture {
        let mut stage = Stage::new(Viewport::new(800.0, 600.0));
        let card = stage.insert(
            StageNode::new(Rect::new(50.0, 50.0, 300.0, 200.0)).with_marker(Marker::ServiceCard),
        );
        let icon = stage.insert_child(
            card,
            StageNode::new(Rect::new(60.0, 60.0, 40.0, 40.0)).with_marker(Marker::ServiceIcon),
        );
        let title = stage.insert_child(
            card,
            StageNode::new(Rect::new(60.0, 110.0, 200.0, 24.0)).with_marker(Marker::ServiceTitle),
        );
        let features = (0..3)
            .map(|i| {
                stage.insert_child(
                    card,
                    StageNode::new(Rect::new(60.0, 140.0 + 20.0 * i as f32, 200.0, 18.0))
                        .with_marker(Marker::ServiceFeature),
                )
            })
            .collect();
        ServiceFixture {
            stage,
            card,
            icon,
            title,
            features,
        }
    }

    fn enter(fb: &mut Feedback, stage: &mut Stage, node: NodeId, now: Instant) {
        fb.handle_event(
            stage,
            &StageEvent::PointerEntered { node },
            now,
            &FeedbackTuning::default(),
        );
    }

    fn leave(fb: &mut Feedback, stage: &mut Stage, node: NodeId) {
        fb.handle_event(
            stage,
            &StageEvent::PointerLeft { node },
            Instant::now(),
            &FeedbackTuning::default(),
        );
    }

    #[test]
    fn test_service_card_enter_and_cascade() {
        let mut fx = service_fixture();
        let mut fb = Feedback::new();
        fb.register_all(&fx.stage);

        let t0 = Instant::now();
        enter(&mut fb, &mut fx.stage, fx.card, t0);

        // Card, icon, and title style immediately
        assert_eq!(fx.stage.style(fx.card).transform, Some(SERVICE_CARD_LIFT));
        assert_eq!(fx.stage.style(fx.card).shadow, Some(SERVICE_CARD_SHADOW));
        assert_eq!(fx.stage.style(fx.icon).transform, Some(SERVICE_ICON_POP));
        assert_eq!(fx.stage.style(fx.title).color, Some(ColorRole::Accent));

        // Features wait for their stagger slots
        assert_eq!(fb.pending_stagger_count(), 3);
        assert!(fx.stage.style(fx.features[0]).is_empty());

        // First feature fires on the next frame, the rest exactly on their
        // 50ms slots
        fb.frame(&mut fx.stage, t0);
        assert_eq!(
            fx.stage.style(fx.features[0]).transform,
            Some(SERVICE_FEATURE_NUDGE)
        );
        assert_eq!(fx.stage.style(fx.features[0]).color, Some(ColorRole::Emphasis));
        assert!(fx.stage.style(fx.features[1]).is_empty());

        fb.frame(&mut fx.stage, t0 + Duration::from_millis(50));
        assert_eq!(
            fx.stage.style(fx.features[1]).transform,
            Some(SERVICE_FEATURE_NUDGE)
        );
        assert!(fx.stage.style(fx.features[2]).is_empty());

        fb.frame(&mut fx.stage, t0 + Duration::from_millis(100));
        assert_eq!(
            fx.stage.style(fx.features[2]).transform,
            Some(SERVICE_FEATURE_NUDGE)
        );
        assert_eq!(fb.pending_stagger_count(), 0);
    }

    #[test]
    fn test_leave_resets_and_cancels_cascade() {
        let mut fx = service_fixture();
        let mut fb = Feedback::new();
        fb.register_all(&fx.stage);

        let t0 = Instant::now();
        enter(&mut fb, &mut fx.stage, fx.card, t0);
        fb.frame(&mut fx.stage, t0); // first feature lands

        leave(&mut fb, &mut fx.stage, fx.card);

        // Everything the enter wrote is back to stylesheet defaults
        assert!(fx.stage.style(fx.card).is_empty());
        assert!(fx.stage.style(fx.icon).is_empty());
        assert!(fx.stage.style(fx.title).is_empty());
        assert!(fx.stage.style(fx.features[0]).is_empty());

        // The unfired writes are gone; a late frame can't resurrect them
        assert_eq!(fb.pending_stagger_count(), 0);
        fb.frame(&mut fx.stage, t0 + Duration::from_millis(200));
        assert!(fx.stage.style(fx.features[1]).is_empty());
        assert!(fx.stage.style(fx.features[2]).is_empty());
    }

    #[test]
    fn test_double_enter_is_debounced() {
        let mut fx = service_fixture();
        let mut fb = Feedback::new();
        fb.register_all(&fx.stage);

        let t0 = Instant::now();
        enter(&mut fb, &mut fx.stage, fx.card, t0);
        assert_eq!(fb.pending_stagger_count(), 3);

        // Second enter while hovered schedules nothing new
        enter(&mut fb, &mut fx.stage, fx.card, t0 + Duration::from_millis(10));
        assert_eq!(fb.pending_stagger_count(), 3);

        // Leave without enter is equally inert
        leave(&mut fb, &mut fx.stage, fx.card);
        leave(&mut fb, &mut fx.stage, fx.card);
        assert!(fx.stage.style(fx.card).is_empty());
    }

    #[test]
    fn test_event_for_removed_node_is_skipped() {
        let mut stage = Stage::new(Viewport::new(800.0, 600.0));
        let button = stage.insert(
            StageNode::new(Rect::new(0.0, 0.0, 100.0, 40.0)).with_marker(Marker::Button),
        );

        let mut fb = Feedback::new();
        fb.register_all(&stage);
        stage.remove(button);

        // Hover and click on the stale id spawn nothing
        let t0 = Instant::now();
        enter(&mut fb, &mut stage, button, t0);
        assert!(fb.overlays().is_empty());

        fb.handle_event(
            &mut stage,
            &StageEvent::Clicked { node: button, x: 10.0, y: 10.0 },
            t0,
            &FeedbackTuning::default(),
        );
        assert!(fb.overlays().is_empty());
    }

    #[test]
    fn test_pricing_card_choreography() {
        let mut stage = Stage::new(Viewport::new(800.0, 600.0));
        let card = stage.insert(
            StageNode::new(Rect::new(0.0, 0.0, 300.0, 400.0)).with_marker(Marker::PricingCard),
        );
        let price = stage.insert_child(
            card,
            StageNode::new(Rect::new(10.0, 10.0, 100.0, 40.0)).with_marker(Marker::PlanPrice),
        );
        let button = stage.insert_child(
            card,
            StageNode::new(Rect::new(10.0, 340.0, 120.0, 40.0)).with_marker(Marker::Button),
        );
        let feature = stage.insert_child(
            card,
            StageNode::new(Rect::new(10.0, 60.0, 200.0, 18.0)).with_marker(Marker::PlanFeature),
        );

        let mut fb = Feedback::new();
        fb.register_all(&stage);

        let t0 = Instant::now();
        enter(&mut fb, &mut stage, card, t0);
        assert_eq!(stage.style(card).transform, Some(PRICING_CARD_LIFT));
        assert_eq!(stage.style(card).shadow, None);
        assert_eq!(stage.style(price).transform, Some(PLAN_PRICE_POP));
        assert_eq!(stage.style(price).color, Some(ColorRole::Accent));
        assert_eq!(stage.style(button).transform, Some(PLAN_BUTTON_POP));

        fb.frame(&mut stage, t0);
        assert_eq!(stage.style(feature).transform, Some(PLAN_FEATURE_NUDGE));
        // Plan features move without a color change
        assert_eq!(stage.style(feature).color, None);

        leave(&mut fb, &mut stage, card);
        assert!(stage.style(card).is_empty());
        assert!(stage.style(price).is_empty());
        assert!(stage.style(button).is_empty());
        assert!(stage.style(feature).is_empty());
    }

    #[test]
    fn test_button_hover_spawns_ripple() {
        let mut stage = Stage::new(Viewport::new(800.0, 600.0));
        let button = stage.insert(
            StageNode::new(Rect::new(100.0, 100.0, 160.0, 48.0)).with_marker(Marker::Button),
        );

        let mut fb = Feedback::new();
        fb.register_all(&stage);

        let t0 = Instant::now();
        enter(&mut fb, &mut stage, button, t0);

        let style = stage.style(button);
        assert_eq!(style.transform, Some(BUTTON_LIFT));
        assert_eq!(style.shadow, Some(BUTTON_SHADOW));
        assert_eq!(style.anchored, Some(true));
        assert_eq!(style.clipped, Some(true));

        assert_eq!(fb.overlays().len(), 1);
        let (_, ripple) = fb.overlays().iter().next().unwrap();
        assert_eq!(ripple.kind, OverlayKind::PointerRipple);
        assert_eq!(ripple.anchor, button);
        assert_eq!(ripple.base_diameter, 160.0);
        assert_eq!(ripple.position, Point::new(80.0, 24.0));

        // Leave resets lift and shadow but the anchor latches stay
        leave(&mut fb, &mut stage, button);
        let style = stage.style(button);
        assert_eq!(style.transform, None);
        assert_eq!(style.shadow, None);
        assert_eq!(style.anchored, Some(true));
        assert_eq!(style.clipped, Some(true));

        // The ripple outlives the hover and dies at its deadline
        assert_eq!(fb.overlays().len(), 1);
        fb.frame(&mut stage, t0 + Duration::from_millis(599));
        assert_eq!(fb.overlays().len(), 1);
        fb.frame(&mut stage, t0 + Duration::from_millis(600));
        assert_eq!(fb.overlays().len(), 0);
    }

    #[test]
    fn test_click_burst_at_pointer() {
        let mut stage = Stage::new(Viewport::new(800.0, 600.0));
        let link = stage.insert(
            StageNode::new(Rect::new(200.0, 20.0, 80.0, 30.0)).with_marker(Marker::NavLink),
        );
        let plain = stage.insert(StageNode::new(Rect::new(0.0, 0.0, 50.0, 50.0)));

        let mut fb = Feedback::new();
        fb.register_all(&stage);

        let t0 = Instant::now();
        fb.handle_event(
            &mut stage,
            &StageEvent::Clicked { node: link, x: 213.0, y: 49.0 },
            t0,
            &FeedbackTuning::default(),
        );

        assert_eq!(fb.overlays().len(), 1);
        let (_, burst) = fb.overlays().iter().next().unwrap();
        assert_eq!(burst.kind, OverlayKind::ClickBurst);
        assert_eq!(burst.position, Point::new(13.0, 29.0));
        assert_eq!(stage.style(link).anchored, Some(true));
        assert_eq!(stage.style(link).clipped, None);

        // Clicks on unmarked nodes do nothing
        fb.handle_event(
            &mut stage,
            &StageEvent::Clicked { node: plain, x: 10.0, y: 10.0 },
            t0,
            &FeedbackTuning::default(),
        );
        assert_eq!(fb.overlays().len(), 1);
    }

    #[test]
    fn test_clear_interactions_keeps_overlays() {
        let mut stage = Stage::new(Viewport::new(800.0, 600.0));
        let button = stage.insert(
            StageNode::new(Rect::new(0.0, 0.0, 100.0, 40.0)).with_marker(Marker::Button),
        );

        let mut fb = Feedback::new();
        fb.register_all(&stage);

        let t0 = Instant::now();
        enter(&mut fb, &mut stage, button, t0);
        assert_eq!(fb.overlays().len(), 1);

        fb.clear_interactions();

        // Hover wiring is gone
        enter(&mut fb, &mut stage, button, t0);
        assert_eq!(fb.overlays().len(), 1);

        // But the live overlay still expires on schedule
        assert_eq!(fb.sweep_overlays(t0 + Duration::from_millis(600)), 1);
    }
}
