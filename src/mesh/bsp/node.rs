//! Tree node for [BSP](super) partitioning

use crate::mesh::plane::Plane;
use crate::mesh::polygon::Polygon;

/// One cell of a BSP tree.
///
/// `plane` is `None` only for a node that has never been built into. Polygons
/// lying on `plane` are stored here; everything else lives in the subtrees.
#[derive(Debug, Clone)]
pub struct Node<S: Clone> {
    pub plane: Option<Plane>,
    /// Subtree on the side `plane.normal` points to
    pub front: Option<Box<Node<S>>>,
    /// Subtree behind `plane`
    pub back: Option<Box<Node<S>>>,
    pub polygons: Vec<Polygon<S>>,
}

impl<S: Clone> Default for Node<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> Node<S> {
    /// An empty tree: clipping against it keeps every polygon.
    pub const fn new() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }
}

// Trees over convex solids degenerate into long chains; tear them down
// without recursion.
impl<S: Clone> Drop for Node<S> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node<S>>> = self.front.take().into_iter().collect();
        pending.extend(self.back.take());

        while let Some(mut node) = pending.pop() {
            pending.extend(node.front.take());
            pending.extend(node.back.take());
        }
    }
}
