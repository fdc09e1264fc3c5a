//! Limelight Core Model
//!
//! This crate provides the foundational primitives for the Limelight effect
//! engine:
//!
//! - **Stage**: the registry of host-mirrored nodes with document-space
//!   bounds and markers
//! - **Inline Styles**: the typed override model the engine writes and the
//!   host renders (`None` = stylesheet default)
//! - **Markers**: the tagging vocabulary that opts nodes into effects
//! - **Events**: the input events the host forwards
//! - **State Machines**: flat statecharts for per-node interaction states
//!
//! # Example
//!
//! ```rust
//! use limelight_core::geometry::Rect;
//! use limelight_core::marker::Marker;
//! use limelight_core::stage::{Stage, StageNode, Viewport};
//!
//! let mut stage = Stage::new(Viewport::new(1280.0, 720.0));
//! let hero = stage.insert(
//!     StageNode::new(Rect::new(0.0, 0.0, 1280.0, 480.0)).with_marker(Marker::FadeIn),
//! );
//!
//! assert!(stage.has_marker(hero, Marker::FadeIn));
//! assert!(stage.style(hero).is_empty());
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;
pub mod marker;
pub mod stage;
pub mod style;

pub use events::{event_types, StageEvent};
pub use fsm::{EventId, StateId, StateMachine, StateMachineBuilder};
pub use geometry::{Point, Rect, Size};
pub use marker::{parse_markers, Marker, MarkerSet, ParseMarkerError};
pub use stage::{NodeId, Stage, StageNode, Viewport};
pub use style::{Color, ColorRole, InlineStyle, Shadow, TimingFunction, Transform, Transition};
