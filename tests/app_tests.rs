// End-to-end flows through PianoApp with a recording synth.

use glam::Vec3;
use piano_core::constants::{KEY_PRESS_SEC, STAR_COUNT};
use piano_core::{AppConfig, BurstConfig, InputEvent, Note, PianoApp, PointScene, RecordingSink};
use std::cell::RefCell;
use std::rc::Rc;

type Shared = Rc<RefCell<PointScene>>;

fn app_with(config: AppConfig) -> (Shared, PianoApp<Shared, RecordingSink>) {
    let scene = Rc::new(RefCell::new(PointScene::new()));
    let app = PianoApp::new(scene.clone(), RecordingSink::default(), config)
        .expect("config is valid");
    (scene, app)
}

fn key(k: &str) -> InputEvent {
    InputEvent::KeyDown {
        key: k.to_string(),
        repeat: false,
    }
}

fn note(s: &str) -> Note {
    s.parse().expect("valid note")
}

#[test]
fn enter_and_tab_are_notes() {
    let (_, mut app) = app_with(AppConfig::seeded());
    app.push(key("Enter"));
    app.push(key("Tab"));
    app.tick(0.016);
    let played: Vec<Note> = app.audio().played.iter().map(|(n, _)| *n).collect();
    assert_eq!(played, vec![note("B3"), note("B2")]);
    assert_eq!(app.animator().active_burst_count(), 2);
}

#[test]
fn burst_spawns_over_the_pressed_key() {
    let (scene, mut app) = app_with(AppConfig::seeded());
    app.push(key("q"));
    app.tick(0.016);
    let c4 = app.piano().key(note("C4")).expect("C4 on keyboard");
    assert!(c4.is_pressed());
    let x = c4.rest_position.x;
    let bursts: Vec<_> = app.animator().bursts().to_vec();
    assert_eq!(bursts.len(), 1);
    for p in &bursts[0].particles {
        let point = scene.borrow().get(p.id).copied().expect("live primitive");
        assert!((point.position.x - x).abs() <= 1.0 + 1e-3);
    }
}

#[test]
fn key_springs_back() {
    let (_, mut app) = app_with(AppConfig::seeded());
    app.push(key("p"));
    app.tick(0.016);
    assert!(app.piano().key(note("A4")).is_some_and(|k| k.is_pressed()));
    app.tick(KEY_PRESS_SEC);
    assert!(app.piano().key(note("A4")).is_some_and(|k| !k.is_pressed()));
}

#[test]
fn particle_cap_applies_across_presses() {
    let config = AppConfig {
        bursts: BurstConfig {
            max_particles: Some(25),
            ..BurstConfig::default()
        },
        ..AppConfig::seeded()
    };
    let (scene, mut app) = app_with(config);
    app.push(key("q"));
    app.push(key("w"));
    app.tick(0.016);
    assert_eq!(app.animator().active_particle_count(), 25);
    assert_eq!(scene.borrow().len(), 25);
    // Audio is not capped.
    assert_eq!(app.audio().played.len(), 2);
}

#[test]
fn hidden_particles_keep_bursts() {
    let (scene, mut app) = app_with(AppConfig::seeded());
    app.toggles_mut().particles_visible = false;
    app.push(key("a"));
    app.tick(0.016);
    let frame = app.frame_instances(&scene.borrow());
    assert_eq!(frame.points.len(), 20);

    app.toggles_mut().particles_visible = true;
    let frame = app.frame_instances(&scene.borrow());
    assert!(frame.points.len() > STAR_COUNT);
}

#[test]
fn reset_button_returns_to_front_view() {
    let (scene, mut app) = app_with(AppConfig::seeded());
    app.tick(0.016);
    let start = scene.borrow().camera_eye;
    assert!((start.length() - 20.0).abs() < 1e-3);

    app.push(InputEvent::DragStart { x: 10.0, y: 10.0 });
    app.push(InputEvent::DragMove { x: 90.0, y: 40.0 });
    app.push(InputEvent::DragEnd);
    app.tick(0.016);
    app.reset_camera();
    app.tick(0.016);
    let eye = scene.borrow().camera_eye;
    assert!((eye - Vec3::new(0.0, 10.0, 20.0)).length() < 1e-3, "{eye:?}");
    assert_eq!(scene.borrow().camera_target, Vec3::ZERO);
}

#[test]
fn invalid_burst_config_is_rejected() {
    let config = AppConfig {
        bursts: BurstConfig {
            spread_radius: f32::NAN,
            ..BurstConfig::default()
        },
        ..AppConfig::seeded()
    };
    let scene = Rc::new(RefCell::new(PointScene::new()));
    assert!(PianoApp::new(scene, RecordingSink::default(), config).is_err());
}
