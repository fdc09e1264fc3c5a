//! Stage input events
//!
//! The host forwards raw input as [`StageEvent`]s. Each carries the minimum
//! the engine needs: scroll events carry the new offset, pointer events the
//! node they hit, clicks the document-space pointer position.

use crate::fsm::EventId;
use crate::stage::NodeId;

/// Numeric event identifiers fed into interaction state machines
pub mod event_types {
    use crate::fsm::EventId;

    pub const POINTER_UP: EventId = 1;
    pub const POINTER_ENTER: EventId = 2;
    pub const POINTER_LEAVE: EventId = 3;
    pub const SCROLL: EventId = 4;
}

/// An input event forwarded by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StageEvent {
    /// Vertical scroll offset changed
    Scrolled { to: f32 },
    /// Pointer moved onto a node
    PointerEntered { node: NodeId },
    /// Pointer moved off a node
    PointerLeft { node: NodeId },
    /// Node was clicked at a document-space position
    Clicked { node: NodeId, x: f32, y: f32 },
}

impl StageEvent {
    /// The event id used when driving a node's state machine
    pub fn event_type(&self) -> EventId {
        match self {
            StageEvent::Scrolled { .. } => event_types::SCROLL,
            StageEvent::PointerEntered { .. } => event_types::POINTER_ENTER,
            StageEvent::PointerLeft { .. } => event_types::POINTER_LEAVE,
            StageEvent::Clicked { .. } => event_types::POINTER_UP,
        }
    }

    /// The node this event targets, if any
    pub fn node(&self) -> Option<NodeId> {
        match self {
            StageEvent::Scrolled { .. } => None,
            StageEvent::PointerEntered { node }
            | StageEvent::PointerLeft { node }
            | StageEvent::Clicked { node, .. } => Some(*node),
        }
    }
}
