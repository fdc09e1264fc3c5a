//! Scroll and pointer effect engine
//!
//! Drives the animated behavior of a long scrolling document staged in
//! [`limelight_core`]: nodes reveal themselves as they scroll into view,
//! background layers drift at their own speed, cards and buttons react to
//! the pointer, and counters and headlines animate their content. The host
//! owns rendering and input; this crate owns deciding what every node
//! should look like each frame.
//!
//! - **Reveals**: one-shot hidden-to-visible transitions per category
//!   (fade, slide, scale), armed by markers and fired by visibility
//! - **Scroll effects**: parallax offsets and a read-progress bar, batched
//!   to one recompute per frame
//! - **Pointer feedback**: hover choreography for cards and buttons,
//!   staggered child cascades, ripple and click-burst overlays
//! - **Sequences**: count-up counters, typewriter text, path morphs
//! - **Monitoring**: opt-in frame-rate watch that trades fidelity for
//!   smoothness on slow hosts, one way
//!
//! # Quick Start
//!
//! ```
//! use limelight_core::{Marker, Rect, Stage, StageEvent, StageNode, Viewport};
//! use limelight_motion::Controller;
//! use std::time::Instant;
//!
//! let mut stage = Stage::new(Viewport::new(1280.0, 800.0));
//! stage.set_content_height(4000.0);
//! let hero = stage.insert(
//!     StageNode::new(Rect::new(0.0, 900.0, 600.0, 200.0)).with_marker(Marker::FadeUp),
//! );
//!
//! let mut engine = Controller::new(stage);
//! engine.register_all();
//!
//! // Scrolling the hero into view hides it, then reveals it a frame later
//! let now = Instant::now();
//! engine.handle_event(StageEvent::Scrolled { to: 600.0 }, now);
//! engine.frame(now);
//! engine.frame(now);
//! assert_eq!(engine.stage().style(hero).opacity, Some(1.0));
//! ```

pub mod config;
pub mod controller;
pub mod easing;
pub mod feedback;
pub mod monitor;
pub mod overlay;
pub mod reveal;
pub mod scrollfx;
pub mod sequence;

// Engine facade
pub use controller::Controller;

// Tuning
pub use config::{
    FeedbackTuning, MonitorTuning, RevealTuning, ScrollTuning, SequenceTuning, Tuning, TuningError,
};

// Reveal categories
pub use reveal::{slide_direction, RevealCommit, RevealKind, RevealRegistry, SlideDirection};

// Scroll-linked effects
pub use scrollfx::ScrollFx;

// Pointer feedback and overlays
pub use feedback::Feedback;
pub use overlay::{
    overlay_keyframes, Overlay, OverlayGrowth, OverlayId, OverlayKeyframes, OverlayKind,
    OverlayRegistry, OverlaySample,
};

// Utility sequences
pub use sequence::{SequenceId, Sequences};

// Frame-rate monitoring
pub use monitor::FrameRateMonitor;

// Easing
pub use easing::TimingFunctionExt;
