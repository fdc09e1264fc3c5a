//! Transient feedback overlays
//!
//! Ripples and click bursts are short-lived nodes the engine creates and
//! owns outright; the host just draws whatever is in the registry each
//! frame. An overlay's removal deadline is fixed the moment it spawns and
//! the frame sweep is the only thing that removes it, so teardown and hover
//! churn can never strand one.
//!
//! Appearance over the overlay's life is pure keyframe sampling: callers
//! ask for an [`OverlaySample`] at a given time and draw that.

use std::time::{Duration, Instant};

use limelight_core::{Color, NodeId, Point, Rect, TimingFunction, Transition};
use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::easing::TimingFunctionExt;

new_key_type! {
    /// Stable handle for a live overlay
    pub struct OverlayId;
}

/// Final diameter of a click burst, in px
const BURST_DIAMETER: f32 = 200.0;

/// Ripples end at twice their starting diameter
const RIPPLE_END_SCALE: f32 = 2.0;

// =============================================================================
// Overlay
// =============================================================================

/// What kind of feedback an overlay renders
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    /// Hover ripple filling a button from its center
    PointerRipple,
    /// Expanding dot at the click position
    ClickBurst,
}

impl OverlayKind {
    /// Draw order hint; bursts sit above regular content
    pub fn z_index(&self) -> i32 {
        match self {
            OverlayKind::PointerRipple => 0,
            OverlayKind::ClickBurst => 1000,
        }
    }
}

/// Sampled overlay appearance for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlaySample {
    /// Current circle diameter, in px
    pub diameter: f32,
    /// Whole-overlay opacity multiplier in `0.0..=1.0`
    pub opacity: f32,
}

/// One live overlay
#[derive(Clone, Debug)]
pub struct Overlay {
    pub kind: OverlayKind,
    /// Node the overlay is anchored to; `position` is relative to its
    /// top-left corner
    pub anchor: NodeId,
    /// Circle center in anchor-local coordinates
    pub position: Point,
    /// Diameter at spawn (bursts start at zero and grow)
    pub base_diameter: f32,
    pub fill: Color,
    spawned_at: Instant,
    expires_at: Instant,
}

impl Overlay {
    /// Hover ripple: centered on the anchor, sized to its larger dimension
    pub fn ripple(anchor: NodeId, anchor_bounds: Rect, now: Instant, lifetime_ms: f32) -> Self {
        let size = anchor_bounds.width().max(anchor_bounds.height());
        Self {
            kind: OverlayKind::PointerRipple,
            anchor,
            position: Point::new(anchor_bounds.width() / 2.0, anchor_bounds.height() / 2.0),
            base_diameter: size,
            fill: Color::WHITE.with_alpha(0.3),
            spawned_at: now,
            expires_at: now + lifetime(lifetime_ms),
        }
    }

    /// Click burst: grows out of the exact pointer position
    pub fn burst(anchor: NodeId, local: Point, now: Instant, lifetime_ms: f32) -> Self {
        Self {
            kind: OverlayKind::ClickBurst,
            anchor,
            position: local,
            base_diameter: 0.0,
            fill: Color::rgb8(255, 107, 53).with_alpha(0.3),
            spawned_at: now,
            expires_at: now + lifetime(lifetime_ms),
        }
    }

    pub fn spawned_at(&self) -> Instant {
        self.spawned_at
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Appearance at `now`, animating over `duration_ms` with ease-out.
    ///
    /// `duration_ms` is the *visual* duration and may be shorter than the
    /// overlay's lifetime (degraded mode shrinks it); a finished overlay
    /// holds its end state until the sweep collects it.
    pub fn sample(&self, now: Instant, duration_ms: f32) -> OverlaySample {
        let t = if duration_ms <= 0.0 {
            1.0
        } else {
            let elapsed = now.saturating_duration_since(self.spawned_at);
            (elapsed.as_secs_f32() * 1000.0 / duration_ms).clamp(0.0, 1.0)
        };
        let eased = TimingFunction::EaseOut.apply(t);

        let diameter = match self.kind {
            OverlayKind::PointerRipple => {
                self.base_diameter * (1.0 + (RIPPLE_END_SCALE - 1.0) * eased)
            }
            OverlayKind::ClickBurst => BURST_DIAMETER * eased,
        };

        OverlaySample {
            diameter,
            opacity: 1.0 - eased,
        }
    }
}

// f64 so round millisecond spans land on exact nanosecond deadlines;
// through f32, 600ms becomes 600.000024ms and an exact-time sweep misses
fn lifetime(ms: f32) -> Duration {
    Duration::from_secs_f64(f64::from(ms.max(0.0)) / 1000.0)
}

// =============================================================================
// Published keyframes
// =============================================================================

/// How an overlay's circle grows over its life
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlayGrowth {
    /// Multiply the spawn diameter up to this factor
    Scale(f32),
    /// Grow from zero to this diameter, in px
    Diameter(f32),
}

/// Declarative description of one overlay effect, for hosts that drive
/// the drawing themselves instead of sampling every frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayKeyframes {
    pub kind: OverlayKind,
    pub growth: OverlayGrowth,
    /// Opacity at the end of the effect; it always starts at 1
    pub fade_to: f32,
    pub transition: Transition,
}

/// The two overlay effect definitions.
///
/// Equivalent to what [`Overlay::sample`] computes frame by frame.
pub fn overlay_keyframes(lifetime_ms: f32) -> [OverlayKeyframes; 2] {
    let transition = Transition::new(lifetime_ms, TimingFunction::EaseOut);
    [
        OverlayKeyframes {
            kind: OverlayKind::PointerRipple,
            growth: OverlayGrowth::Scale(RIPPLE_END_SCALE),
            fade_to: 0.0,
            transition,
        },
        OverlayKeyframes {
            kind: OverlayKind::ClickBurst,
            growth: OverlayGrowth::Diameter(BURST_DIAMETER),
            fade_to: 0.0,
            transition,
        },
    ]
}

// =============================================================================
// Registry
// =============================================================================

/// Live overlays, removed only by the per-frame sweep
#[derive(Default)]
pub struct OverlayRegistry {
    overlays: SlotMap<OverlayId, Overlay>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, overlay: Overlay) -> OverlayId {
        debug!(kind = ?overlay.kind, anchor = ?overlay.anchor, "overlay spawned");
        self.overlays.insert(overlay)
    }

    /// Remove every overlay whose deadline has passed. Returns how many
    /// were collected.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.overlays.len();
        self.overlays.retain(|_, overlay| !overlay.is_expired(now));
        before - self.overlays.len()
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverlayId, &Overlay)> {
        self.overlays.iter()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
