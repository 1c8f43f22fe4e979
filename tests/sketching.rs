#![allow(clippy::unwrap_used)]

mod common;

use approx::assert_relative_eq;
use common::{init_tracing, rect, square_stroke};
use floorsketch::math::Point2;
use floorsketch::operations::creation::MakeRegularPolygon;
use floorsketch::{Handle, Scene, VertexHandle};

#[test]
fn stroke_becomes_square_room() {
    init_tracing();
    let mut scene = Scene::new();
    let id = scene.add_stroke(&square_stroke(0.0), 1.0).unwrap();
    let poly = scene.polygon(id).unwrap();
    assert_eq!(poly.len(), 4);
    assert!(poly.can_exist());
    for i in 0..4 {
        assert_eq!(poly.interior_angle_degrees(i), 90);
    }
    let full = (500.0 * 500.0 * 2.0 * floorsketch::scene::AREA_UNIT_FACTOR * 100.0).round() / 100.0;
    assert!((poly.area() - full).abs() < 0.05 * full);
}

#[test]
fn overlapping_stroke_is_discarded() {
    init_tracing();
    let mut scene = Scene::new();
    scene.add_stroke(&square_stroke(0.0), 1.0).unwrap();
    assert!(scene.add_stroke(&square_stroke(250.0), 1.0).is_none());
    assert_eq!(scene.len(), 1);
    assert!(scene.add_stroke(&square_stroke(1000.0), 1.0).is_some());
    assert_eq!(scene.len(), 2);
}

#[test]
fn scribble_too_short_is_ignored() {
    init_tracing();
    let mut scene = Scene::new();
    let stroke = [Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)];
    assert!(scene.add_stroke(&stroke, 1.0).is_none());
    assert!(scene.is_empty());
}

#[test]
fn press_corner_and_drag_snaps_to_wall_line() {
    init_tracing();
    let mut scene = Scene::new();
    let id = scene.add_polygon(rect(0.0, 0.0, 100.0, 100.0));

    let picked = scene.press(Point2::new(105.0, 104.0), 1.0).unwrap();
    assert_eq!(picked, Handle::Vertex(VertexHandle::new(id, 2)));

    let guides = scene.drag(Point2::new(110.0, 300.0)).unwrap();
    assert!(!guides.is_empty());
    let p = scene.polygon(id).unwrap().position(2);
    assert_relative_eq!(p.x, 100.0, epsilon = 1e-9);
    assert_relative_eq!(p.y, 300.0, epsilon = 1e-9);
}

#[test]
fn press_wall_and_drag_moves_segment() {
    init_tracing();
    let mut scene = Scene::new();
    let id = scene.add_polygon(rect(0.0, 0.0, 100.0, 100.0));
    scene.add_polygon(rect(200.0, -50.0, 300.0, 150.0));

    let picked = scene.press(Point2::new(110.0, 50.0), 1.0).unwrap();
    assert_eq!(picked, Handle::Vertex(VertexHandle::new(id, 1)));
    assert!(scene.polygon(id).unwrap().vertices()[2].is_selected());

    scene.drag(Point2::new(170.0, 50.0)).unwrap();
    let poly = scene.polygon(id).unwrap();
    assert_relative_eq!(poly.position(1).x, 200.0, epsilon = 1e-9);
    assert_relative_eq!(poly.position(2).x, 200.0, epsilon = 1e-9);
    assert_relative_eq!(poly.position(2).y, 100.0, epsilon = 1e-9);

    scene.clear_selection();
    let poly = scene.polygon(id).unwrap();
    assert!(poly.vertices().iter().all(|v| !v.is_selected()));
}

#[test]
fn press_inside_and_drag_translates_room() {
    init_tracing();
    let mut scene = Scene::new();
    let id = scene.add_polygon(rect(0.0, 0.0, 100.0, 100.0));

    assert_eq!(scene.press(Point2::new(50.0, 50.0), 1.0), Some(Handle::Polygon(id)));
    scene.drag(Point2::new(50.0, 50.0)).unwrap();
    scene.drag(Point2::new(70.0, 40.0)).unwrap();
    let poly = scene.polygon(id).unwrap();
    assert_eq!(poly.position(0), Point2::new(20.0, -10.0));
    assert_eq!(poly.position(2), Point2::new(120.0, 90.0));
}

#[test]
fn press_on_empty_space_clears_selection() {
    init_tracing();
    let mut scene = Scene::new();
    scene.add_polygon(rect(0.0, 0.0, 100.0, 100.0));
    scene.press(Point2::new(50.0, 50.0), 1.0).unwrap();
    assert!(scene.press(Point2::new(800.0, 800.0), 1.0).is_none());
    assert!(scene.selection().is_empty());
}

#[test]
fn regular_room_scales_and_rotates_in_place() {
    init_tracing();
    let mut poly = MakeRegularPolygon::new(5, 100.0, Point2::new(300.0, 300.0))
        .execute()
        .unwrap();
    let area = poly.area();
    poly.set_scale(1.0);
    assert!(poly.area() > 3.9 * area && poly.area() < 4.1 * area);
    poly.set_rotation(0.5);
    assert!(poly.can_exist());
    assert_relative_eq!(poly.centroid().x, 300.0, epsilon = 1e-6);
    assert_relative_eq!(poly.centroid().y, 300.0, epsilon = 1e-6);
}

#[cfg(feature = "serde")]
#[test]
fn scene_survives_json() {
    use floorsketch::PolygonData;

    init_tracing();
    let mut scene = Scene::new();
    let id = scene.add_polygon(rect(0.0, 0.0, 120.0, 80.0));
    scene.polygon_mut(id).unwrap().set_label("Study");
    let json = serde_json::to_string(&scene.to_data()).unwrap();
    let records: Vec<PolygonData> = serde_json::from_str(&json).unwrap();
    let restored = Scene::from_data(&records).unwrap();
    let (_, poly) = restored.polygons().next().unwrap();
    assert_eq!(poly.label(), "Study");
    assert_eq!(poly.positions(), scene.polygon(id).unwrap().positions());
}
