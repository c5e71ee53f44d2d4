mod support;

use banshee::{
    float_types::Real,
    mesh::{
        Mesh,
        bsp::{BalancedSplittingStrategy, Node, SplittingPlaneStrategy},
        plane::{BACK, COPLANAR, FRONT, Plane, SPANNING},
        polygon::Polygon,
    },
    traits::CSGOps,
};
use nalgebra::{Point3, Vector3};

use crate::support::{approx_eq, make_polygon_3d};

fn area(polygons: &[Polygon<()>]) -> Real {
    polygons.iter().map(|p| p.area()).sum()
}

#[test]
fn single_polygon_tree() {
    let p = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let node: Node<()> = Node::from_polygons(&[p.clone()]);

    assert_eq!(node.plane.as_ref(), Some(&p.plane));
    assert_eq!(node.polygons.len(), 1);
    assert!(node.front.is_none());
    assert!(node.back.is_none());
}

#[test]
fn empty_tree_keeps_everything() {
    let node: Node<()> = Node::from_polygons(&[]);
    assert!(node.plane.is_none());

    let p = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    assert_eq!(node.clip_polygons(&[p]).len(), 1);
}

#[test]
fn tree_preserves_surface() {
    let cylinder: Mesh<()> = Mesh::cylinder(1.0, 2.0, 12, None).unwrap();
    let node = Node::from_polygons(&cylinder.polygons);
    let all = node.all_polygons();

    assert!(all.len() >= cylinder.polygons.len());
    assert!(approx_eq(area(&all), cylinder.surface_area(), 1e-9));
}

#[test]
fn invert_twice_restores_planes() {
    let sphere: Mesh<()> = Mesh::sphere(1.0, 8, 4, None).unwrap();
    let original = Node::from_polygons(&sphere.polygons);
    let mut node = Node::from_polygons(&sphere.polygons);

    node.invert();
    let root = node.plane.clone().unwrap();
    assert!((root.normal() + original.plane.as_ref().unwrap().normal()).norm() < 1e-12);
    assert!(node.all_polygons().iter().all(|p| {
        let centroid = p.vertices[0].pos.coords;
        p.plane.normal().dot(&centroid) < 0.0
    }));

    node.invert();
    assert_eq!(node.plane, original.plane);
    assert_eq!(node.all_polygons().len(), original.all_polygons().len());
}

#[test]
fn clip_polygons_drops_inside_and_keeps_outside() {
    let cylinder: Mesh<()> = Mesh::cylinder(1.0, 2.0, 8, None).unwrap();
    let node = Node::from_polygons(&cylinder.polygons);

    let inside = make_polygon_3d(&[[0.0, 0.0, 1.0], [0.2, 0.0, 1.0], [0.0, 0.2, 1.0]]);
    let outside = make_polygon_3d(&[[5.0, 0.0, 1.0], [5.2, 0.0, 1.0], [5.0, 0.2, 1.0]]);
    assert!(node.clip_polygons(&[inside]).is_empty());
    assert_eq!(node.clip_polygons(&[outside]).len(), 1);

    // A triangle poking out through the side keeps only its outer part
    let crossing = make_polygon_3d(&[[0.0, -0.1, 1.0], [3.0, 0.0, 1.0], [0.0, 0.1, 1.0]]);
    let kept = node.clip_polygons(&[crossing]);
    assert!(!kept.is_empty());
    assert!(
        kept.iter()
            .flat_map(|p| p.vertices.iter())
            .all(|v| v.pos.x > 0.9)
    );
}

#[test]
fn clip_to_removes_overlap() {
    let a: Mesh<()> = Mesh::cylinder(1.0, 2.0, 8, None).unwrap();
    let b: Mesh<()> = Mesh::sphere(0.5, 8, 4, None).unwrap().translate(0.0, 0.0, 1.0);

    let mut inner = Node::from_polygons(&b.polygons);
    let outer = Node::from_polygons(&a.polygons);

    inner.clip_to(&outer);
    assert!(inner.all_polygons().is_empty());
}

#[test]
fn classification_bits() {
    let plane = Plane::from_normal(Vector3::z(), 0.0);
    let above = make_polygon_3d(&[[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]]);
    let below = make_polygon_3d(&[[0.0, 0.0, -1.0], [1.0, 0.0, -1.0], [0.0, 1.0, -1.0]]);
    let on = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let across = make_polygon_3d(&[[0.0, 0.0, -1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]]);

    assert_eq!(plane.classify_polygon(&above), FRONT);
    assert_eq!(plane.classify_polygon(&below), BACK);
    assert_eq!(plane.classify_polygon(&on), COPLANAR);
    assert_eq!(plane.classify_polygon(&across), SPANNING);
    assert_eq!(plane.orient_point(&Point3::new(0.0, 0.0, 1e-9)), COPLANAR);
}

#[test]
fn split_preserves_area() {
    let plane = Plane::from_normal(Vector3::new(1.0, 1.0, 0.0), 0.5);
    let quad = make_polygon_3d(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ]);
    let (cf, cb, front, back) = plane.split_polygon(&quad);
    assert!(cf.is_empty() && cb.is_empty());
    assert_eq!((front.len(), back.len()), (1, 1));
    assert!(approx_eq(front[0].area() + back[0].area(), 1.0, 1e-12));
    assert!(front[0].vertices.iter().all(|v| plane.signed_distance(&v.pos) > -1e-9));
}

#[test]
fn balanced_strategy_prefers_planes_without_spanning() {
    let strategy = BalancedSplittingStrategy::default();
    // Two separate triangles and one that would be cut by the first plane
    let polygons = vec![
        make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]),
        make_polygon_3d(&[[0.0, 0.0, 5.0], [1.0, 0.0, 5.0], [0.0, 1.0, 5.0]]),
        make_polygon_3d(&[[0.0, -1.0, 2.0], [1.0, 1.0, 2.0], [0.0, 1.0, 2.0]]),
    ];
    let plane = strategy.pick_best_splitting_plane(&polygons);
    let spanning = polygons
        .iter()
        .filter(|p| plane.classify_polygon(p) == SPANNING)
        .count();
    assert_eq!(spanning, 0);
}
