//! Utility sequences: count-up, typewriter, path morph
//!
//! Small frame-driven animations that rewrite node content rather than
//! style. Each node runs at most one sequence at a time; starting a new one
//! replaces whatever was running there, so a restarted counter never has
//! two writers racing over the same text.

use std::time::{Duration, Instant};

use limelight_core::{NodeId, Stage, Transition};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use tracing::debug;

new_key_type! {
    /// Handle for a running sequence
    pub struct SequenceId;
}

// =============================================================================
// Sequence kinds
// =============================================================================

/// Counts a node's text from 0 to a target integer.
///
/// Advances one fixed increment per frame, the increment sized so the run
/// takes `duration_ms` at the nominal frame length. Intermediate frames
/// show the floor of the running value; the final frame snaps to the exact
/// target.
#[derive(Clone, Debug)]
struct CountUp {
    target: u64,
    increment: f64,
    current: f64,
    steps_left: u32,
}

impl CountUp {
    fn new(target: u64, duration_ms: f32, frame_ms: f32) -> Self {
        let steps = (duration_ms / frame_ms.max(1.0)).max(1.0).ceil();
        Self {
            target,
            increment: target as f64 / steps as f64,
            current: 0.0,
            steps_left: steps as u32,
        }
    }

    /// Returns the text to show, and whether the count finished
    fn tick(&mut self) -> (String, bool) {
        self.current += self.increment;
        self.steps_left = self.steps_left.saturating_sub(1);

        if self.steps_left == 0 || self.current >= self.target as f64 {
            (self.target.to_string(), true)
        } else {
            let shown = (self.current.floor() as u64).min(self.target);
            (shown.to_string(), false)
        }
    }
}

/// Reveals text one character per fixed interval
#[derive(Clone, Debug)]
struct Typewriter {
    chars: Vec<char>,
    shown: usize,
    next_due: Instant,
    interval: Duration,
}

impl Typewriter {
    /// Returns the new character count to show, if it changed, and whether
    /// the text is complete
    fn tick(&mut self, now: Instant) -> (Option<usize>, bool) {
        let before = self.shown;
        while self.shown < self.chars.len() && now >= self.next_due {
            self.shown += 1;
            self.next_due += self.interval;
        }
        let changed = (self.shown != before).then_some(self.shown);
        (changed, self.shown == self.chars.len())
    }

    fn visible(&self, count: usize) -> String {
        self.chars[..count].iter().collect()
    }
}

/// Swaps a shape node's path data one frame after the transition is set,
/// so the host has the interpolation instruction before the data changes
#[derive(Clone, Debug)]
struct PathMorph {
    new_path: String,
}

enum SequenceKind {
    CountUp(CountUp),
    Typewriter(Typewriter),
    PathMorph(PathMorph),
}

struct Sequence {
    node: NodeId,
    kind: SequenceKind,
}

// =============================================================================
// Runner
// =============================================================================

/// All running sequences, ticked once per frame
#[derive(Default)]
pub struct Sequences {
    running: SlotMap<SequenceId, Sequence>,
    by_node: FxHashMap<NodeId, SequenceId>,
}

impl Sequences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `node`'s text from 0 to `target` over roughly `duration_ms`
    pub fn start_count_up(
        &mut self,
        node: NodeId,
        target: u64,
        duration_ms: f32,
        frame_ms: f32,
    ) -> SequenceId {
        debug!(?node, target, duration_ms, "count-up started");
        self.replace(
            node,
            SequenceKind::CountUp(CountUp::new(target, duration_ms, frame_ms)),
        )
    }

    /// Type `text` into `node`, one character per `interval_ms`.
    ///
    /// The first character appears immediately, matching how a human-visible
    /// typing effect should not start with a beat of silence.
    pub fn start_typewriter(
        &mut self,
        stage: &mut Stage,
        node: NodeId,
        text: &str,
        now: Instant,
        interval_ms: f32,
    ) -> SequenceId {
        let chars: Vec<char> = text.chars().collect();
        // f64 keeps the per-character deadlines on exact boundaries
        let interval = Duration::from_secs_f64(f64::from(interval_ms.max(0.0)) / 1000.0);

        // An empty string still registers and retires on the first tick
        let shown = usize::from(!chars.is_empty());
        let tw = Typewriter {
            chars,
            shown,
            next_due: now + interval,
            interval,
        };
        if let Some(n) = stage.get_mut(node) {
            n.text = Some(tw.visible(shown));
        }
        debug!(?node, chars = tw.chars.len(), "typewriter started");

        self.replace(node, SequenceKind::Typewriter(tw))
    }

    /// Morph a shape node's path to `new_path`.
    ///
    /// Writes the transition now and defers the path swap one frame.
    /// Returns `None` when the node has no path data to morph.
    pub fn start_path_morph(
        &mut self,
        stage: &mut Stage,
        node: NodeId,
        new_path: impl Into<String>,
        transition: Transition,
    ) -> Option<SequenceId> {
        let target = stage.get_mut(node)?;
        target.path_data.as_ref()?;
        target.style.transition = Some(transition);

        debug!(?node, "path morph started");
        Some(self.replace(
            node,
            SequenceKind::PathMorph(PathMorph {
                new_path: new_path.into(),
            }),
        ))
    }

    /// Advance every sequence one frame
    pub fn tick(&mut self, stage: &mut Stage, now: Instant) {
        let mut finished: Vec<SequenceId> = Vec::new();

        for (id, seq) in self.running.iter_mut() {
            let Some(node) = stage.get_mut(seq.node) else {
                finished.push(id);
                continue;
            };

            let done = match &mut seq.kind {
                SequenceKind::CountUp(count) => {
                    let (text, done) = count.tick();
                    node.text = Some(text);
                    done
                }
                SequenceKind::Typewriter(tw) => {
                    let (changed, done) = tw.tick(now);
                    if let Some(count) = changed {
                        node.text = Some(tw.visible(count));
                    }
                    done
                }
                SequenceKind::PathMorph(morph) => {
                    node.path_data = Some(morph.new_path.clone());
                    true
                }
            };

            if done {
                finished.push(id);
            }
        }

        for id in finished {
            if let Some(seq) = self.running.remove(id) {
                if self.by_node.get(&seq.node) == Some(&id) {
                    self.by_node.remove(&seq.node);
                }
            }
        }
    }

    pub fn cancel(&mut self, id: SequenceId) {
        if let Some(seq) = self.running.remove(id) {
            if self.by_node.get(&seq.node) == Some(&id) {
                self.by_node.remove(&seq.node);
            }
        }
    }

    pub fn cancel_all(&mut self) {
        self.running.clear();
        self.by_node.clear();
    }

    pub fn is_running(&self, id: SequenceId) -> bool {
        self.running.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// One sequence per node: unseat whatever is already there
    fn replace(&mut self, node: NodeId, kind: SequenceKind) -> SequenceId {
        if let Some(old) = self.by_node.remove(&node) {
            self.running.remove(old);
        }
        let id = self.running.insert(Sequence { node, kind });
        self.by_node.insert(node, id);
        id
    }
}

// =============================================================================
// Tests
// =============================================================================
