//! Interaction state machines
//!
//! A small flat statechart: states and events are plain `u32`s, transitions
//! are an explicit table built up front. Events with no transition from the
//! current state are ignored, which is exactly the debouncing hover logic
//! wants (a second enter while already hovered is a no-op).
//!
//! # Example
//!
//! ```
//! use limelight_core::events::event_types;
//! use limelight_core::fsm::StateMachine;
//!
//! let mut fsm = StateMachine::builder(0)
//!     .on(0, event_types::POINTER_ENTER, 1)
//!     .on(1, event_types::POINTER_LEAVE, 0)
//!     .build();
//!
//! fsm.send(event_types::POINTER_ENTER);
//! assert_eq!(fsm.current_state(), 1);
//! ```

use smallvec::SmallVec;

pub type StateId = u32;
pub type EventId = u32;

/// A single edge in the transition table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub event: EventId,
    pub to: StateId,
}

/// Flat state machine with a fixed transition table
#[derive(Clone, Debug)]
pub struct StateMachine {
    current: StateId,
    transitions: SmallVec<[Transition; 4]>,
}

impl StateMachine {
    pub fn builder(initial: StateId) -> StateMachineBuilder {
        StateMachineBuilder {
            initial,
            transitions: SmallVec::new(),
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Feed an event. Returns the (possibly unchanged) current state.
    ///
    /// The first matching transition wins; events with no match from the
    /// current state leave the machine where it is.
    pub fn send(&mut self, event: EventId) -> StateId {
        if let Some(t) = self
            .transitions
            .iter()
            .find(|t| t.from == self.current && t.event == event)
        {
            self.current = t.to;
        }
        self.current
    }
}

/// Builder for [`StateMachine`]
pub struct StateMachineBuilder {
    initial: StateId,
    transitions: SmallVec<[Transition; 4]>,
}

impl StateMachineBuilder {
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition { from, event, to });
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            current: self.initial,
            transitions: self.transitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_types;

    fn hover_machine() -> StateMachine {
        StateMachine::builder(0)
            .on(0, event_types::POINTER_ENTER, 1)
            .on(1, event_types::POINTER_LEAVE, 0)
            .build()
    }

    #[test]
    fn test_transitions() {
        let mut fsm = hover_machine();
        assert_eq!(fsm.current_state(), 0);

        assert_eq!(fsm.send(event_types::POINTER_ENTER), 1);
        assert_eq!(fsm.send(event_types::POINTER_LEAVE), 0);
    }

    #[test]
    fn test_unmatched_event_is_ignored() {
        let mut fsm = hover_machine();

        // Leave before any enter does nothing
        assert_eq!(fsm.send(event_types::POINTER_LEAVE), 0);

        // Double enter stays hovered
        fsm.send(event_types::POINTER_ENTER);
        assert_eq!(fsm.send(event_types::POINTER_ENTER), 1);
    }
}
