//! Binary Space Partitioning (BSP) tree implementation
//!
//! Every traversal here uses an explicit stack: BSP trees built over convex
//! solids (spheres, cylinders, lofts) are chains as deep as the polygon count.

pub mod node;
pub mod traits;

pub use node::Node;
pub use traits::{BalancedSplittingStrategy, SplittingPlaneStrategy};

use crate::mesh::polygon::Polygon;
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Node<S> {
    /// Creates a new BSP node from polygons
    pub fn from_polygons(polygons: &[Polygon<S>]) -> Self {
        let mut node = Self::new();
        if !polygons.is_empty() {
            node.build(polygons);
        }
        node
    }

    /// Invert all polygons in the BSP tree (turn solid space into empty space)
    pub fn invert(&mut self) {
        let mut stack = vec![self];

        while let Some(current) = stack.pop() {
            current.polygons.iter_mut().for_each(|p| p.flip());
            if let Some(ref mut plane) = current.plane {
                plane.flip();
            }

            std::mem::swap(&mut current.front, &mut current.back);

            if let Some(front) = current.front.as_deref_mut() {
                stack.push(front);
            }
            if let Some(back) = current.back.as_deref_mut() {
                stack.push(back);
            }
        }
    }

    /// Remove all parts of `polygons` that are inside the solid this tree bounds
    pub fn clip_polygons(&self, polygons: &[Polygon<S>]) -> Vec<Polygon<S>> {
        let mut result = Vec::with_capacity(polygons.len());
        let mut stack: Vec<(&Node<S>, Vec<Polygon<S>>)> = vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            let Some(plane) = node.plane.as_ref() else {
                result.extend(polys);
                continue;
            };

            let mut front_polys = Vec::with_capacity(polys.len());
            let mut back_polys = Vec::with_capacity(polys.len());

            for polygon in &polys {
                let (coplanar_front, coplanar_back, front_parts, back_parts) =
                    plane.split_polygon(polygon);
                front_polys.extend(coplanar_front);
                front_polys.extend(front_parts);
                back_polys.extend(coplanar_back);
                back_polys.extend(back_parts);
            }

            match node.front.as_deref() {
                Some(front) if !front_polys.is_empty() => stack.push((front, front_polys)),
                Some(_) => {},
                None => result.extend(front_polys),
            }

            // Back fragments without a back subtree are inside the solid: dropped
            if let Some(back) = node.back.as_deref() {
                if !back_polys.is_empty() {
                    stack.push((back, back_polys));
                }
            }
        }

        result
    }

    /// Remove all polygons in this BSP tree that are inside the other BSP tree
    pub fn clip_to(&mut self, bsp: &Node<S>) {
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            node.polygons = bsp.clip_polygons(&node.polygons);

            if let Some(front) = node.front.as_deref_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_deref_mut() {
                stack.push(back);
            }
        }
    }

    /// Return all polygons in this BSP tree
    pub fn all_polygons(&self) -> Vec<Polygon<S>> {
        let mut result = Vec::new();
        let mut stack = vec![self];

        while let Some(current) = stack.pop() {
            result.extend_from_slice(&current.polygons);

            stack.extend(
                [&current.front, &current.back]
                    .iter()
                    .filter_map(|child| child.as_deref()),
            );
        }
        result
    }

    /// Build a BSP tree from the given polygons using the default strategy.
    ///
    /// Polygons are filtered into an existing tree if this node already has a plane.
    pub fn build(&mut self, polygons: &[Polygon<S>]) {
        self.build_with(polygons, &BalancedSplittingStrategy::default());
    }

    /// Build a BSP tree from the given polygons, choosing planes with `strategy`.
    pub fn build_with<SP: SplittingPlaneStrategy<S>>(
        &mut self,
        polygons: &[Polygon<S>],
        strategy: &SP,
    ) {
        if polygons.is_empty() {
            return;
        }

        let mut stack: Vec<(&mut Node<S>, Vec<Polygon<S>>)> = vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            let plane = node
                .plane
                .get_or_insert_with(|| strategy.pick_best_splitting_plane(&polys))
                .clone();

            let mut front = Vec::with_capacity(polys.len() / 2);
            let mut back = Vec::with_capacity(polys.len() / 2);

            for polygon in &polys {
                let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                    plane.split_polygon(polygon);

                node.polygons.extend(coplanar_front);
                node.polygons.extend(coplanar_back);
                front.append(&mut front_parts);
                back.append(&mut back_parts);
            }

            if !front.is_empty() {
                let child = node.front.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((child.as_mut(), front));
            }

            if !back.is_empty() {
                let child = node.back.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((child.as_mut(), back));
            }
        }
    }
}
