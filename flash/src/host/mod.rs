//! Host surfaces
//!
//! A flash is drawn on top of a host surface (a window or a view) owned by the
//! application's UI toolkit. The toolkit exposes the surface through
//! [`HostSurface`]: its geometry, a way to hit-test and walk its view
//! hierarchy, and the list of flashes currently attached to it.

mod resolver;
mod tree;

pub use resolver::{
    FixedHostResolver, HostResolver, KeyWindowResolver, SceneActivationState, SceneInfo,
    SceneResolver, WindowInfo, WindowProvider,
};
pub use tree::ViewTree;

use crate::flash::{Flash, FlashId};
use crate::geometry::{EdgeInsets, Point, Rect};
use crate::style::ContentSizeCategory;

/// Ancestor walks stop after this many steps, so a malformed tree with a
/// parent cycle cannot hang the layout.
pub const MAX_ANCESTOR_DEPTH: usize = 256;

/// Identifies a node in a host's view hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// What a node in the view hierarchy is, as far as flash placement cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeRole {
    NavigationBar,
    TabBar,
    Toolbar,
    #[default]
    Other,
}

/// A node in a host's view hierarchy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub role: NodeRole,
    /// Frame in host coordinates
    pub frame: Rect,
    /// `None` for the root
    pub parent: Option<NodeId>,
}

/// A surface flashes can be shown on.
///
/// Methods take `&self`; hosts are shared and use interior mutability for the
/// attached flash list.
pub trait HostSurface {
    fn bounds(&self) -> Rect;

    fn safe_area_insets(&self) -> EdgeInsets;

    fn content_size_category(&self) -> ContentSizeCategory {
        ContentSizeCategory::Large
    }

    /// Deepest node under `point`, if any
    fn hit_test(&self, point: Point) -> Option<NodeId>;

    fn node(&self, id: NodeId) -> Option<Node>;

    /// Flashes currently attached to the surface
    fn flashes(&self) -> Vec<Flash>;

    fn add_flash(&self, flash: Flash);

    fn remove_flash(&self, id: FlashId);
}

/// Walks from `start` up through its ancestors and returns the first node
/// matching `predicate`, `start` included.
pub fn first_ancestor(
    host: &dyn HostSurface,
    start: NodeId,
    predicate: impl Fn(&Node) -> bool,
) -> Option<(NodeId, Node)> {
    let mut current = Some(start);
    for _ in 0..MAX_ANCESTOR_DEPTH {
        let id = current?;
        let node = host.node(id)?;
        if predicate(&node) {
            return Some((id, node));
        }
        current = node.parent;
    }
    None
}

/// Finds the first ancestor of the node under `point` with the given role.
pub fn find_chrome(host: &dyn HostSurface, point: Point, role: NodeRole) -> Option<Node> {
    let hit = host.hit_test(point)?;
    first_ancestor(host, hit, |node| node.role == role).map(|(_, node)| node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_ancestor_includes_start() {
        let tree = ViewTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let bar = tree.add_node(None, NodeRole::NavigationBar, Rect::new(0.0, 0.0, 100.0, 44.0));
        let found = first_ancestor(&tree, bar, |n| n.role == NodeRole::NavigationBar);
        assert_eq!(found.map(|(id, _)| id), Some(bar));
    }

    #[test]
    fn test_first_ancestor_walks_parents() {
        let tree = ViewTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let bar = tree.add_node(None, NodeRole::TabBar, Rect::new(0.0, 50.0, 100.0, 50.0));
        let button = tree.add_node(Some(bar), NodeRole::Other, Rect::new(10.0, 60.0, 20.0, 20.0));
        let label = tree.add_node(Some(button), NodeRole::Other, Rect::new(12.0, 62.0, 10.0, 10.0));

        let found = first_ancestor(&tree, label, |n| n.role == NodeRole::TabBar);
        assert_eq!(found.map(|(id, _)| id), Some(bar));
        assert!(first_ancestor(&tree, label, |n| n.role == NodeRole::Toolbar).is_none());
    }

    #[test]
    fn test_first_ancestor_survives_cycles() {
        let tree = ViewTree::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let a = tree.add_node(None, NodeRole::Other, Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = tree.add_node(Some(a), NodeRole::Other, Rect::new(0.0, 0.0, 10.0, 10.0));
        tree.set_parent(a, Some(b));

        assert!(first_ancestor(&tree, b, |n| n.role == NodeRole::NavigationBar).is_none());
    }

    #[test]
    fn test_find_chrome() {
        let tree = ViewTree::new(Rect::new(0.0, 0.0, 100.0, 200.0));
        let nav = tree.add_node(None, NodeRole::NavigationBar, Rect::new(0.0, 0.0, 100.0, 44.0));
        tree.add_node(Some(nav), NodeRole::Other, Rect::new(0.0, 0.0, 40.0, 44.0));

        let found = find_chrome(&tree, Point::new(5.0, 5.0), NodeRole::NavigationBar);
        assert_eq!(found.map(|n| n.frame), Some(Rect::new(0.0, 0.0, 100.0, 44.0)));
        assert!(find_chrome(&tree, Point::new(5.0, 150.0), NodeRole::NavigationBar).is_none());
    }
}
