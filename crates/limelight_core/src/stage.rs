//! The stage: every node the engine can touch
//!
//! The host owns the real surface (DOM, scene graph, widget tree). It
//! mirrors the animatable part of that surface onto a [`Stage`]: one
//! [`StageNode`] per element, with document-space bounds, markers, and the
//! engine-written [`InlineStyle`] the host reads back when rendering.
//!
//! Nodes form a shallow tree. Parent links exist so card effects can find
//! their icon/title/feature children; nothing deeper than that is modeled.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::warn;

use crate::geometry::Rect;
use crate::marker::{Marker, MarkerSet};
use crate::style::InlineStyle;

new_key_type! {
    /// Stable handle for a stage node
    pub struct NodeId;
}

// ─────────────────────────────────────────────────────────────────────────────
// Viewport
// ─────────────────────────────────────────────────────────────────────────────

/// The window the host currently shows, in document space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Vertical scroll offset; 0 shows the top of the document
    pub scroll_y: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// The visible window as a document-space rect
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// StageNode
// ─────────────────────────────────────────────────────────────────────────────

/// One animatable element mirrored from the host surface
#[derive(Clone, Debug, Default)]
pub struct StageNode {
    /// Layout bounds in document space (unaffected by inline transforms)
    pub bounds: Rect,
    /// Markers this node was tagged with
    pub markers: MarkerSet,
    /// Parallax speed override. Participation comes from [`Marker::Parallax`];
    /// `None` here means the engine's tuned default speed.
    pub parallax: Option<f32>,
    /// Text content, for nodes whose text the engine rewrites
    pub text: Option<String>,
    /// Vector path data, for morphable shape nodes
    pub path_data: Option<String>,
    /// Engine-written style overrides
    pub style: InlineStyle,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 8]>,
}

impl StageNode {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_markers(mut self, markers: impl IntoIterator<Item = Marker>) -> Self {
        self.markers.extend(markers);
        self
    }

    /// Tag as a parallax layer with an explicit speed
    pub fn with_parallax(mut self, speed: f32) -> Self {
        if !self.has_marker(Marker::Parallax) {
            self.markers.push(Marker::Parallax);
        }
        self.parallax = Some(speed);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_path_data(mut self, d: impl Into<String>) -> Self {
        self.path_data = Some(d.into());
        self
    }

    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stage
// ─────────────────────────────────────────────────────────────────────────────

/// Node registry plus viewport state
#[derive(Debug, Default)]
pub struct Stage {
    nodes: SlotMap<NodeId, StageNode>,
    viewport: Viewport,
    content_height: f32,
}

impl Stage {
    /// New stage showing `viewport`. Content height starts equal to the
    /// viewport height, i.e. nothing to scroll until the host says so.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            viewport,
            content_height: viewport.height,
        }
    }

    // ── nodes ────────────────────────────────────────────────────────────

    pub fn insert(&mut self, node: StageNode) -> NodeId {
        self.nodes.insert(node)
    }

    /// Insert a node as a child of `parent`.
    ///
    /// A dead parent id degrades to a root insert; card child lookups will
    /// simply never find the node.
    pub fn insert_child(&mut self, parent: NodeId, mut node: StageNode) -> NodeId {
        if !self.nodes.contains_key(parent) {
            warn!(?parent, "insert_child with unknown parent, inserting as root");
            return self.nodes.insert(node);
        }
        node.parent = Some(parent);
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        id
    }

    /// Remove a node, detaching it from its parent and orphaning its
    /// children (they stay on the stage as roots).
    pub fn remove(&mut self, id: NodeId) -> Option<StageNode> {
        let node = self.nodes.remove(id)?;
        if let Some(parent) = node.parent {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|c| *c != id);
            }
        }
        for child in &node.children {
            if let Some(c) = self.nodes.get_mut(*child) {
                c.parent = None;
            }
        }
        Some(node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&StageNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut StageNode> {
        self.nodes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &StageNode)> {
        self.nodes.iter()
    }

    // ── marker queries ───────────────────────────────────────────────────

    pub fn has_marker(&self, id: NodeId, marker: Marker) -> bool {
        self.nodes.get(id).is_some_and(|n| n.has_marker(marker))
    }

    /// All nodes carrying `marker`, in registry order
    pub fn nodes_with_marker(&self, marker: Marker) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.has_marker(marker))
            .map(|(id, _)| id)
            .collect()
    }

    /// First direct child of `parent` carrying `marker`
    pub fn child_with_marker(&self, parent: NodeId, marker: Marker) -> Option<NodeId> {
        self.children_with_marker(parent, marker).first().copied()
    }

    /// All direct children of `parent` carrying `marker`, in insertion order
    pub fn children_with_marker(&self, parent: NodeId, marker: Marker) -> SmallVec<[NodeId; 8]> {
        let Some(node) = self.nodes.get(parent) else {
            return SmallVec::new();
        };
        node.children
            .iter()
            .copied()
            .filter(|c| self.has_marker(*c, marker))
            .collect()
    }

    // ── styles ───────────────────────────────────────────────────────────

    /// Current overrides for a node; empty if the node is gone
    pub fn style(&self, id: NodeId) -> InlineStyle {
        self.nodes.get(id).map(|n| n.style).unwrap_or_default()
    }

    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut InlineStyle> {
        self.nodes.get_mut(id).map(|n| &mut n.style)
    }

    // ── viewport / scrolling ─────────────────────────────────────────────

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_scroll_y(&mut self, scroll_y: f32) {
        self.viewport.scroll_y = scroll_y;
    }

    /// Total document height the host reports
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height;
    }

    /// How far the viewport can scroll; zero or negative means the document
    /// fits entirely on screen.
    pub fn scroll_range(&self) -> f32 {
        self.content_height - self.viewport.height
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
