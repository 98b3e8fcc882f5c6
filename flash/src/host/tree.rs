//! In-memory view hierarchy
//!
//! `ViewTree` is a complete [`HostSurface`] for hosts that do not have a view
//! system of their own, for headless rendering and for tests. Nodes live in an
//! arena indexed by [`NodeId`]; later siblings are drawn above earlier ones.

use std::cell::{Cell, RefCell};

use tracing::trace;

use super::{HostSurface, Node, NodeId, NodeRole};
use crate::flash::{Flash, FlashId};
use crate::geometry::{EdgeInsets, Point, Rect};
use crate::style::ContentSizeCategory;

#[derive(Debug, Clone)]
struct TreeNode {
    node: Node,
    children: Vec<NodeId>,
}

pub struct ViewTree {
    bounds: Cell<Rect>,
    safe_area: Cell<EdgeInsets>,
    content_size: Cell<ContentSizeCategory>,
    nodes: RefCell<Vec<TreeNode>>,
    roots: RefCell<Vec<NodeId>>,
    flashes: RefCell<Vec<Flash>>,
}

impl ViewTree {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds: Cell::new(bounds),
            safe_area: Cell::new(EdgeInsets::ZERO),
            content_size: Cell::new(ContentSizeCategory::default()),
            nodes: RefCell::new(Vec::new()),
            roots: RefCell::new(Vec::new()),
            flashes: RefCell::new(Vec::new()),
        }
    }

    pub fn with_safe_area_insets(self, insets: EdgeInsets) -> Self {
        self.safe_area.set(insets);
        self
    }

    /// Adds a node above its existing siblings.
    pub fn add_node(&self, parent: Option<NodeId>, role: NodeRole, frame: Rect) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len() as u64);
        nodes.push(TreeNode {
            node: Node { role, frame, parent },
            children: Vec::new(),
        });

        match parent.and_then(|p| nodes.get_mut(p.0 as usize)) {
            Some(parent) => parent.children.push(id),
            None => self.roots.borrow_mut().push(id),
        }
        id
    }

    /// Moves a node under a new parent (or to the root level).
    pub fn set_parent(&self, id: NodeId, parent: Option<NodeId>) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(old_parent) = nodes.get(id.0 as usize).map(|n| n.node.parent) else {
            return;
        };

        match old_parent.and_then(|p| nodes.get_mut(p.0 as usize)) {
            Some(old) => old.children.retain(|c| *c != id),
            None => self.roots.borrow_mut().retain(|c| *c != id),
        }
        match parent.and_then(|p| nodes.get_mut(p.0 as usize)) {
            Some(new) => new.children.push(id),
            None => self.roots.borrow_mut().push(id),
        }
        if let Some(entry) = nodes.get_mut(id.0 as usize) {
            entry.node.parent = parent;
        }
    }

    /// Resizes the surface and lays out attached flashes again.
    pub fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(bounds);
        self.relayout();
    }

    pub fn set_safe_area_insets(&self, insets: EdgeInsets) {
        self.safe_area.set(insets);
        self.relayout();
    }

    /// Changes the text size and notifies attached flashes.
    pub fn set_content_size_category(&self, category: ContentSizeCategory) {
        self.content_size.set(category);
        for flash in self.flashes() {
            flash.environment_did_change();
        }
    }

    fn relayout(&self) {
        for flash in self.flashes() {
            flash.layout();
        }
    }

    fn hit_test_node(nodes: &[TreeNode], id: NodeId, point: Point, depth: usize) -> Option<NodeId> {
        if depth >= super::MAX_ANCESTOR_DEPTH {
            return None;
        }
        let entry = nodes.get(id.0 as usize)?;
        if !entry.node.frame.contains(point) {
            return None;
        }
        entry
            .children
            .iter()
            .rev()
            .find_map(|child| Self::hit_test_node(nodes, *child, point, depth + 1))
            .or(Some(id))
    }
}

impl HostSurface for ViewTree {
    fn bounds(&self) -> Rect {
        self.bounds.get()
    }

    fn safe_area_insets(&self) -> EdgeInsets {
        self.safe_area.get()
    }

    fn content_size_category(&self) -> ContentSizeCategory {
        self.content_size.get()
    }

    fn hit_test(&self, point: Point) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        let roots = self.roots.borrow();
        let hit = roots
            .iter()
            .rev()
            .find_map(|root| Self::hit_test_node(&nodes, *root, point, 0));
        trace!(?point, ?hit, "hit test");
        hit
    }

    fn node(&self, id: NodeId) -> Option<Node> {
        self.nodes.borrow().get(id.0 as usize).map(|entry| entry.node)
    }

    fn flashes(&self) -> Vec<Flash> {
        self.flashes.borrow().clone()
    }

    fn add_flash(&self, flash: Flash) {
        let mut flashes = self.flashes.borrow_mut();
        if !flashes.iter().any(|f| f.id() == flash.id()) {
            flashes.push(flash);
        }
    }

    fn remove_flash(&self, id: FlashId) {
        self.flashes.borrow_mut().retain(|f| f.id() != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_prefers_deepest_then_topmost() {
        let tree = ViewTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let content = tree.add_node(None, NodeRole::Other, Rect::new(0.0, 0.0, 100.0, 100.0));
        let below = tree.add_node(Some(content), NodeRole::Other, Rect::new(0.0, 0.0, 50.0, 50.0));
        let above = tree.add_node(Some(content), NodeRole::Toolbar, Rect::new(0.0, 0.0, 50.0, 50.0));

        assert_eq!(tree.hit_test(Point::new(10.0, 10.0)), Some(above));
        assert_ne!(tree.hit_test(Point::new(10.0, 10.0)), Some(below));
        assert_eq!(tree.hit_test(Point::new(80.0, 80.0)), Some(content));
        assert_eq!(tree.hit_test(Point::new(180.0, 80.0)), None);
    }

    #[test]
    fn test_set_parent_moves_node() {
        let tree = ViewTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let a = tree.add_node(None, NodeRole::Other, Rect::new(0.0, 0.0, 100.0, 100.0));
        let b = tree.add_node(None, NodeRole::Other, Rect::new(0.0, 0.0, 10.0, 10.0));
        tree.set_parent(b, Some(a));

        assert_eq!(tree.node(b).and_then(|n| n.parent), Some(a));
        assert_eq!(tree.hit_test(Point::new(5.0, 5.0)), Some(b));
    }

    #[test]
    fn test_geometry_setters() {
        let tree = ViewTree::new(Rect::new(0.0, 0.0, 100.0, 100.0))
            .with_safe_area_insets(EdgeInsets::new(20.0, 0.0, 10.0, 0.0));
        assert_eq!(tree.safe_area_insets().top, 20.0);

        tree.set_bounds(Rect::new(0.0, 0.0, 200.0, 100.0));
        tree.set_content_size_category(ContentSizeCategory::ExtraLarge);
        assert_eq!(tree.bounds().width(), 200.0);
        assert_eq!(tree.content_size_category(), ContentSizeCategory::ExtraLarge);
    }
}
