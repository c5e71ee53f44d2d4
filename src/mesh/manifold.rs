//! Watertightness checks on the triangulated boundary

use crate::float_types::{Real, tolerance};
use crate::mesh::Mesh;
use hashbrown::HashMap;
use nalgebra::Point3;
use std::fmt::Debug;

type QuantizedPoint = (i64, i64, i64);

fn quantize(p: &Point3<Real>, scale: Real) -> QuantizedPoint {
    (
        (p.x * scale).round() as i64,
        (p.y * scale).round() as i64,
        (p.z * scale).round() as i64,
    )
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Count how many triangles use each undirected edge.
    ///
    /// Vertex positions are welded on a grid ten times coarser than [`tolerance`].
    fn edge_usage(&self) -> HashMap<(QuantizedPoint, QuantizedPoint), usize> {
        let scale = 1.0 / (tolerance() * 10.0);
        let mut edges: HashMap<(QuantizedPoint, QuantizedPoint), usize> = HashMap::new();

        for poly in &self.polygons {
            for tri in poly.triangulate() {
                for i in 0..3 {
                    let a = quantize(&tri[i].pos, scale);
                    let b = quantize(&tri[(i + 1) % 3].pos, scale);
                    if a == b {
                        continue;
                    }
                    let key = if a < b { (a, b) } else { (b, a) };
                    *edges.entry(key).or_insert(0) += 1;
                }
            }
        }

        edges
    }

    /// Returns `true` if every edge is shared by exactly two triangles.
    ///
    /// Boolean results usually fail this even when watertight, because
    /// splitting leaves T-junctions; use it on primitives and lofts.
    pub fn is_manifold(&self) -> bool {
        let edges = self.edge_usage();
        !edges.is_empty() && edges.values().all(|&count| count == 2)
    }

    /// Number of edges not shared by exactly two triangles.
    pub fn open_edge_count(&self) -> usize {
        self.edge_usage().values().filter(|&&count| count != 2).count()
    }
}
