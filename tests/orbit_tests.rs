// Orbit controller driven through a shared scene, the way the frontends use it.

use glam::Vec3;
use piano_core::constants::*;
use piano_core::orbit::{orbit_position, polar_bounds};
use piano_core::{CameraOrbitState, OrbitCameraController, OrbitConfig, PointScene};
use std::cell::RefCell;
use std::rc::Rc;

fn shared() -> Rc<RefCell<PointScene>> {
    Rc::new(RefCell::new(PointScene::new()))
}

#[test]
fn drag_rotates_then_apply_moves_scene_camera() {
    let scene = shared();
    let mut cam = OrbitCameraController::with_defaults(scene.clone());
    let before = *cam.state();

    cam.on_drag_start(100.0, 100.0);
    cam.on_drag_move(150.0, 110.0);
    cam.on_drag_end();
    cam.apply();

    let s = cam.state();
    assert!((s.azimuth - (before.azimuth + 0.5)).abs() < 1e-5);
    assert!((s.polar - (before.polar + 0.1)).abs() < 1e-5);
    assert_eq!(s.radius, before.radius);

    let eye = scene.borrow().camera_eye;
    assert!((eye - orbit_position(s)).length() < 1e-5);
    assert!(((eye - s.target).length() - s.radius).abs() < 1e-4);
}

#[test]
fn moves_without_press_are_ignored() {
    let mut cam = OrbitCameraController::with_defaults(shared());
    let before = *cam.state();
    cam.on_drag_move(500.0, 500.0);
    assert_eq!(*cam.state(), before);

    cam.on_drag_start(0.0, 0.0);
    cam.on_drag_end();
    cam.on_drag_move(500.0, 500.0);
    assert_eq!(*cam.state(), before);
}

#[test]
fn scroll_clamps_to_distance_limits() {
    let mut cam = OrbitCameraController::with_defaults(shared());
    cam.on_scroll(-500.0);
    assert!((cam.state().radius - (ORBIT_INITIAL_RADIUS - 5.0)).abs() < 1e-4);
    cam.on_scroll(-10_000.0);
    assert_eq!(cam.state().radius, ORBIT_MIN_DISTANCE);
    cam.on_scroll(1e6);
    assert_eq!(cam.state().radius, ORBIT_MAX_DISTANCE);
    cam.on_scroll(f32::NAN);
    assert_eq!(cam.state().radius, ORBIT_MAX_DISTANCE);
}

#[test]
fn polar_never_reaches_the_poles() {
    let (lo, hi) = polar_bounds();
    let mut cam = OrbitCameraController::with_defaults(shared());
    cam.on_drag_start(0.0, 0.0);
    cam.on_drag_move(0.0, 10_000.0);
    assert_eq!(cam.state().polar, hi);
    cam.on_drag_move(0.0, -10_000.0);
    assert_eq!(cam.state().polar, lo);
    assert!(lo > 0.0 && hi < std::f32::consts::PI);
}

#[test]
fn reset_restores_start_and_ends_drag() {
    let mut cam = OrbitCameraController::with_defaults(shared());
    let start = *cam.state();
    cam.on_drag_start(0.0, 0.0);
    cam.on_drag_move(40.0, 40.0);
    cam.on_scroll(300.0);
    cam.reset();
    assert_eq!(*cam.state(), start);
    assert!(!cam.is_dragging());
}

#[test]
fn bad_config_is_rejected() {
    let config = OrbitConfig {
        min_distance: 10.0,
        max_distance: 5.0,
        ..OrbitConfig::default()
    };
    assert!(OrbitCameraController::new(shared(), config).is_err());
}

#[test]
fn orbit_position_axes() {
    let at = |azimuth, polar| {
        orbit_position(&CameraOrbitState {
            azimuth,
            polar,
            radius: 2.0,
            target: Vec3::new(1.0, 0.0, 0.0),
        })
    };
    let top = at(0.0, 0.0);
    assert!((top - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    let side = at(0.0, std::f32::consts::FRAC_PI_2);
    assert!((side - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
}
