use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use nalgebra::Point3;
use std::fmt::Debug;
use std::io::Cursor;
use std::path::Path;

/// STL flavour to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    #[default]
    Ascii,
    Binary,
}

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    /// Export to ASCII STL
    /// Convert this Mesh to an **ASCII STL** string with the given `name`.
    ///
    /// Each polygon is fan-triangulated; every facet uses the polygon's plane normal.
    ///
    /// ```rust
    /// # use banshee::mesh::Mesh;
    /// let rod = Mesh::<()>::cylinder(1.0, 2.0, 8, None).unwrap();
    /// let stl_text = rod.to_stl_ascii("my_solid");
    /// assert!(stl_text.starts_with("solid my_solid"));
    /// ```
    pub fn to_stl_ascii(&self, name: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("solid {name}\n"));

        for poly in &self.polygons {
            let n = poly.plane.normal();
            for tri in poly.triangulate() {
                out.push_str(&format!(
                    "  facet normal {:.6} {:.6} {:.6}\n",
                    n.x, n.y, n.z
                ));
                out.push_str("    outer loop\n");
                for v in &tri {
                    out.push_str(&format!(
                        "      vertex {:.6} {:.6} {:.6}\n",
                        v.pos.x, v.pos.y, v.pos.z
                    ));
                }
                out.push_str("    endloop\n");
                out.push_str("  endfacet\n");
            }
        }

        out.push_str(&format!("endsolid {name}\n"));
        out
    }

    /// Export to BINARY STL (returns `Vec<u8>`)
    ///
    /// The binary header is left blank by `stl_io`, so `_name` is unused.
    pub fn to_stl_binary(&self, _name: &str) -> std::io::Result<Vec<u8>> {
        use stl_io::{Normal, Triangle, Vertex, write_stl};

        let mut triangles = Vec::<Triangle>::with_capacity(self.triangle_count());
        for poly in &self.polygons {
            let n = poly.plane.normal();
            for tri in poly.triangulate() {
                triangles.push(Triangle {
                    normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                    vertices: tri.map(|v| {
                        Vertex::new([v.pos.x as f32, v.pos.y as f32, v.pos.z as f32])
                    }),
                });
            }
        }

        let mut cursor = Cursor::new(Vec::new());
        write_stl(&mut cursor, triangles.iter())?;
        Ok(cursor.into_inner())
    }

    /// Write this Mesh to `path` in the requested format.
    pub fn write_stl(
        &self,
        path: impl AsRef<Path>,
        name: &str,
        format: StlFormat,
    ) -> std::io::Result<()> {
        let bytes = match format {
            StlFormat::Ascii => self.to_stl_ascii(name).into_bytes(),
            StlFormat::Binary => self.to_stl_binary(name)?,
        };
        std::fs::write(path, bytes)
    }

    /// Read an ASCII or binary STL; every facet becomes a triangle.
    ///
    /// Degenerate facets (zero area) are skipped.
    pub fn from_stl(stl_data: &[u8], metadata: Option<S>) -> std::io::Result<Mesh<S>> {
        let mut cursor = Cursor::new(stl_data);
        let stl = stl_io::read_stl(&mut cursor)?;

        let point = |index: usize| {
            let v = &stl.vertices[index];
            Point3::new(v[0] as Real, v[1] as Real, v[2] as Real)
        };

        let polygons = stl
            .faces
            .iter()
            .filter_map(|face| {
                let [a, b, c] = face.vertices;
                Polygon::triangle([point(a), point(b), point(c)], metadata.clone())
            })
            .collect();

        Ok(Mesh::from_polygons(polygons))
    }
}
