mod support;

use banshee::{io::StlFormat, mesh::Mesh};

use crate::support::approx_eq;

fn rod() -> Mesh<()> {
    Mesh::cylinder(1.0, 2.0, 8, None).unwrap()
}

#[test]
fn mesh_to_stl_ascii() {
    let stl_str = rod().to_stl_ascii("test_rod");

    assert!(stl_str.starts_with("solid test_rod\n"));
    assert!(stl_str.trim_end().ends_with("endsolid test_rod"));
    // 8 side quads and two octagon caps
    assert_eq!(stl_str.matches("facet normal").count(), 8 * 2 + 2 * 6);
    assert_eq!(stl_str.matches("outer loop").count(), 28);
    assert_eq!(stl_str.matches("vertex ").count(), 28 * 3);
    assert_eq!(stl_str.matches("endfacet").count(), 28);
}

#[test]
fn ascii_facets_carry_face_normals() {
    let stl_str = rod().to_stl_ascii("rod");
    let normals: Vec<[f64; 3]> = stl_str
        .lines()
        .filter_map(|line| line.trim().strip_prefix("facet normal "))
        .map(|rest| {
            let n: Vec<f64> = rest.split_whitespace().map(|c| c.parse().unwrap()).collect();
            [n[0], n[1], n[2]]
        })
        .collect();

    assert_eq!(normals.iter().filter(|n| approx_eq(n[2], 1.0, 1e-6)).count(), 6);
    assert_eq!(normals.iter().filter(|n| approx_eq(n[2], -1.0, 1e-6)).count(), 6);
    assert!(normals.iter().all(|n| {
        approx_eq((n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt(), 1.0, 1e-5)
    }));
    assert!(stl_str.contains("vertex 1.000000 0.000000 2.000000"));
}

#[test]
fn ascii_round_trip_through_reader() -> Result<(), Box<dyn std::error::Error>> {
    let original = rod();
    let text = original.to_stl_ascii("rod");
    let read: Mesh<()> = Mesh::from_stl(text.as_bytes(), None)?;

    assert_eq!(read.polygons.len(), original.triangle_count());
    assert!(approx_eq(read.volume(), original.volume(), 1e-4));
    Ok(())
}

#[test]
fn binary_stl_layout() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = rod().to_stl_binary("rod")?;
    // 80 byte header, u32 count, 50 bytes per facet
    assert_eq!(bytes.len(), 84 + 50 * 28);
    assert_eq!(u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]), 28);

    let read: Mesh<()> = Mesh::from_stl(&bytes, None)?;
    assert_eq!(read.polygons.len(), 28);
    Ok(())
}

#[test]
fn write_stl_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir();
    let ascii_path = dir.join(format!("banshee_rod_{}.stl", std::process::id()));
    let binary_path = dir.join(format!("banshee_rod_{}_bin.stl", std::process::id()));

    let mesh = rod();
    mesh.write_stl(&ascii_path, "rod", StlFormat::Ascii)?;
    mesh.write_stl(&binary_path, "rod", StlFormat::Binary)?;

    let text = std::fs::read_to_string(&ascii_path)?;
    assert_eq!(text, mesh.to_stl_ascii("rod"));
    assert_eq!(std::fs::read(&binary_path)?.len(), 84 + 50 * 28);

    let _ = std::fs::remove_file(ascii_path);
    let _ = std::fs::remove_file(binary_path);
    Ok(())
}

#[test]
fn empty_mesh_is_an_empty_solid() {
    let empty: Mesh<()> = Mesh::from_polygons(Vec::new());
    assert_eq!(empty.to_stl_ascii("nothing"), "solid nothing\nendsolid nothing\n");
}
