//! Per-frame driver shared by the web and native frontends.
//!
//! Platform callbacks only [`push`](PianoApp::push) events. Once per display
//! refresh the frontend calls [`tick`](PianoApp::tick), which drains the queue,
//! advances every animation and writes the camera to the scene, then asks for
//! [`frame_instances`](PianoApp::frame_instances) to draw.

use crate::audio::NoteSink;
use crate::constants::*;
use crate::error::Result;
use crate::gpu::{self, FrameInstances, SceneUniforms};
use crate::input::{ClickTracker, InputEvent, InputQueue};
use crate::keymap::note_for_key;
use crate::materials::{CameraMode, LightRig, MaterialKind, SceneToggles};
use crate::note::Note;
use crate::orbit::{OrbitCameraController, OrbitConfig};
use crate::particles::{BurstConfig, TransientParticleAnimator};
use crate::piano::Piano;
use crate::picking::{pick_key, screen_to_world_ray};
use crate::scene::{PointScene, SceneHandle};
use crate::starfield::{ambient_cloud, star_field, PointCloud};
use crate::stats::FrameStats;
use glam::{Vec2, Vec3};

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub orbit: OrbitConfig,
    pub bursts: BurstConfig,
    pub star_seed: u64,
    pub burst_seed: u64,
}

impl AppConfig {
    pub fn seeded() -> Self {
        Self {
            orbit: OrbitConfig {
                reset_eye: Some(Vec3::from(RESET_CAMERA_EYE)),
                ..OrbitConfig::default()
            },
            bursts: BurstConfig::default(),
            star_seed: STAR_SEED,
            burst_seed: BURST_SEED,
        }
    }
}

pub struct PianoApp<H: SceneHandle + Clone, N: NoteSink> {
    scene: H,
    controller: OrbitCameraController<H>,
    animator: TransientParticleAnimator<H>,
    bursts: BurstConfig,
    piano: Piano,
    stars: PointCloud,
    ambient: PointCloud,
    lights: LightRig,
    toggles: SceneToggles,
    input: InputQueue,
    click: ClickTracker,
    last_pointer: Vec2,
    viewport: (f32, f32),
    stats: FrameStats,
    audio: N,
    elapsed: f32,
}

impl<H: SceneHandle + Clone, N: NoteSink> PianoApp<H, N> {
    pub fn new(scene: H, audio: N, config: AppConfig) -> Result<Self> {
        config.bursts.validate()?;
        let controller = OrbitCameraController::new(scene.clone(), config.orbit)?;
        let animator =
            TransientParticleAnimator::with_config(scene.clone(), &config.bursts, config.burst_seed);
        log::info!(
            "[app] ready: {} stars, {} ambient points",
            STAR_COUNT,
            AMBIENT_PARTICLE_COUNT
        );
        Ok(Self {
            scene,
            controller,
            animator,
            bursts: config.bursts,
            piano: Piano::new(),
            stars: star_field(STAR_COUNT, config.star_seed),
            ambient: ambient_cloud(AMBIENT_PARTICLE_COUNT, config.star_seed.wrapping_add(1)),
            lights: LightRig::default(),
            toggles: SceneToggles::default(),
            input: InputQueue::new(),
            click: ClickTracker::default(),
            last_pointer: Vec2::ZERO,
            viewport: (1.0, 1.0),
            stats: FrameStats::default(),
            audio,
            elapsed: 0.0,
        })
    }

    pub fn push(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn pending_events(&self) -> usize {
        self.input.len()
    }

    /// Canvas size in pixels, used to turn clicks into picking rays.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = (width, height);
        }
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn tick(&mut self, dt: f32) {
        let mut pending = std::mem::take(&mut self.input);
        for event in pending.drain() {
            self.handle(event);
        }
        self.piano.tick(dt);
        self.stars.tick();
        self.ambient.tick();
        self.animator.tick(dt, self.bursts.opacity_decay_per_tick);
        self.controller.apply();
        self.stats.record_frame(dt);
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    fn handle(&mut self, event: InputEvent) {
        let orbiting = self.toggles.camera_mode == CameraMode::Orbit;
        match event {
            InputEvent::DragStart { x, y } => {
                self.click.down(x, y);
                self.last_pointer = Vec2::new(x, y);
                if orbiting {
                    self.controller.on_drag_start(x, y);
                }
            }
            InputEvent::DragMove { x, y } => {
                self.click.moved_to(x, y);
                self.last_pointer = Vec2::new(x, y);
                if orbiting {
                    self.controller.on_drag_move(x, y);
                }
            }
            InputEvent::DragEnd => {
                self.controller.on_drag_end();
                if self.click.up() {
                    let p = self.last_pointer;
                    self.click_at(p.x, p.y);
                }
            }
            InputEvent::Scroll { delta_y } => {
                if orbiting {
                    self.controller.on_scroll(delta_y);
                }
            }
            InputEvent::Click { x, y } => self.click_at(x, y),
            InputEvent::KeyDown { key, repeat } => {
                if repeat {
                    return;
                }
                if let Some(note) = note_for_key(&key) {
                    self.trigger_note(note);
                }
            }
            InputEvent::NoteTriggered { note } => {
                self.trigger_note(note);
            }
        }
    }

    fn click_at(&mut self, x: f32, y: f32) {
        let (eye, target) = self.controller.compute_camera_transform();
        let (w, h) = self.viewport;
        let (origin, dir) = screen_to_world_ray(x, y, w, h, eye, target, CAMERA_FOVY_RADIANS);
        if let Some(i) = pick_key(origin, dir, self.piano.keys()) {
            let note = self.piano.keys()[i].note;
            log::debug!("[pick] {} at ({:.0},{:.0})", note, x, y);
            self.trigger_note(note);
        }
    }

    /// Play a note: press its key, send it to the synth and spawn a burst.
    /// Notes outside the keyboard are ignored.
    pub fn trigger_note(&mut self, note: Note) -> bool {
        let Some(origin) = self.piano.press(note) else {
            log::debug!("[keys] {} is not on the keyboard", note);
            return false;
        };
        self.audio.play_note(note, NOTE_DURATION_SEC);
        self.animator.spawn_burst(
            origin,
            self.bursts.count,
            self.bursts.spread_radius,
            self.bursts.velocity_range,
        );
        log::debug!("[keys] {} ({:.1} Hz)", note, note.frequency_hz());
        true
    }

    pub fn reset_camera(&mut self) {
        self.controller.reset();
    }

    pub fn set_material(&mut self, material: MaterialKind) {
        self.toggles.material = material;
        log::info!("[ui] material {:?}", material);
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        if mode != CameraMode::Orbit {
            self.controller.on_drag_end();
        }
        self.toggles.camera_mode = mode;
        log::info!("[ui] camera mode {:?}", mode);
    }

    pub fn scene(&self) -> &H {
        &self.scene
    }

    pub fn controller(&self) -> &OrbitCameraController<H> {
        &self.controller
    }

    pub fn animator(&self) -> &TransientParticleAnimator<H> {
        &self.animator
    }

    pub fn piano(&self) -> &Piano {
        &self.piano
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut LightRig {
        &mut self.lights
    }

    pub fn toggles(&self) -> &SceneToggles {
        &self.toggles
    }

    pub fn toggles_mut(&mut self) -> &mut SceneToggles {
        &mut self.toggles
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut FrameStats {
        &mut self.stats
    }

    pub fn audio(&self) -> &N {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut N {
        &mut self.audio
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Instances for the current frame; `scene` is the retained point scene
    /// this app writes to.
    pub fn frame_instances(&self, scene: &PointScene) -> FrameInstances {
        FrameInstances {
            boxes: gpu::piano_boxes(self.piano.keys(), &self.lights, &self.toggles),
            points: gpu::point_instances(scene, &self.stars, &self.ambient, &self.toggles),
            wireframe: self.toggles.wireframe,
        }
    }

    pub fn uniforms(&self) -> SceneUniforms {
        let (eye, target) = self.controller.compute_camera_transform();
        let (w, h) = self.viewport;
        gpu::scene_uniforms(eye, target, w / h, &self.lights, &self.toggles, self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingSink;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Shared = Rc<RefCell<PointScene>>;

    fn app() -> (Shared, PianoApp<Shared, RecordingSink>) {
        let scene = Rc::new(RefCell::new(PointScene::new()));
        let app = PianoApp::new(scene.clone(), RecordingSink::default(), AppConfig::seeded())
            .expect("default config is valid");
        (scene, app)
    }

    #[test]
    fn key_press_plays_note_and_spawns_burst() {
        let (scene, mut app) = app();
        app.push(InputEvent::KeyDown {
            key: "q".into(),
            repeat: false,
        });
        assert_eq!(app.pending_events(), 1);
        app.tick(1.0 / 60.0);
        assert_eq!(app.pending_events(), 0);
        let c4: Note = "C4".parse().unwrap();
        assert_eq!(app.audio().played, vec![(c4, 1.5)]);
        assert_eq!(app.animator().active_burst_count(), 1);
        assert_eq!(scene.borrow().len(), 20);
        assert!(app.piano().key(c4).unwrap().is_pressed());
    }

    #[test]
    fn burst_is_gone_after_fifty_ticks() {
        let (scene, mut app) = app();
        app.trigger_note("E4".parse().unwrap());
        for _ in 0..49 {
            app.tick(1.0 / 60.0);
        }
        assert_eq!(app.animator().active_particle_count(), 20);
        app.tick(1.0 / 60.0);
        assert_eq!(app.animator().active_particle_count(), 0);
        assert!(scene.borrow().is_empty());
    }

    #[test]
    fn repeated_and_unmapped_keys_are_ignored() {
        let (_, mut app) = app();
        app.push(InputEvent::KeyDown {
            key: "q".into(),
            repeat: true,
        });
        app.push(InputEvent::KeyDown {
            key: "F5".into(),
            repeat: false,
        });
        app.tick(0.016);
        assert!(app.audio().played.is_empty());
        assert!(!app.trigger_note("C7".parse().unwrap()));
    }

    #[test]
    fn drag_and_scroll_reach_the_camera() {
        let (scene, mut app) = app();
        let before = *app.controller().state();
        app.push(InputEvent::DragStart { x: 100.0, y: 100.0 });
        app.push(InputEvent::DragMove { x: 150.0, y: 110.0 });
        app.push(InputEvent::DragEnd);
        app.push(InputEvent::Scroll { delta_y: -2000.0 });
        app.tick(0.016);
        let after = *app.controller().state();
        assert!((after.azimuth - (before.azimuth + 0.5)).abs() < 1e-5);
        assert!((after.polar - (before.polar + 0.1)).abs() < 1e-5);
        assert_eq!(after.radius, ORBIT_MIN_DISTANCE);
        // A drag is not a click.
        assert!(app.audio().played.is_empty());
        let (eye, _) = app.controller().compute_camera_transform();
        assert_eq!(scene.borrow().camera_eye, eye);
    }

    #[test]
    fn click_on_middle_c_plays_it() {
        let (_, mut app) = app();
        app.set_viewport(800.0, 600.0);
        // Project C4's top face centre to the screen and click there.
        let key = app.piano().key("C4".parse().unwrap()).unwrap().clone();
        let top = key.rest_position + glam::Vec3::new(0.0, key.size.y * 0.5, 1.0);
        let u = app.uniforms();
        let clip = glam::Mat4::from_cols_array_2d(&u.view_proj) * top.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x + 1.0) * 0.5 * 800.0;
        let y = (1.0 - ndc.y) * 0.5 * 600.0;
        app.push(InputEvent::DragStart { x, y });
        app.push(InputEvent::DragEnd);
        app.tick(0.016);
        assert_eq!(app.audio().played.len(), 1);
        assert_eq!(app.audio().played[0].0, key.note);
    }

    #[test]
    fn non_orbit_modes_freeze_the_camera() {
        let (_, mut app) = app();
        app.set_camera_mode(CameraMode::Fly);
        let before = *app.controller().state();
        app.push(InputEvent::DragStart { x: 0.0, y: 0.0 });
        app.push(InputEvent::DragMove { x: 300.0, y: 0.0 });
        app.push(InputEvent::Scroll { delta_y: 200.0 });
        app.tick(0.016);
        assert_eq!(*app.controller().state(), before);
    }

    #[test]
    fn frame_instances_cover_scene() {
        let (scene, mut app) = app();
        app.trigger_note("C4".parse().unwrap());
        app.tick(0.016);
        let frame = app.frame_instances(&scene.borrow());
        // 54 casters, the ground, 54 shadows
        assert_eq!(frame.boxes.len(), 54 + 1 + 54);
        assert_eq!(frame.points.len(), 2000 + 20);
        assert!(!frame.wireframe);

        app.toggles_mut().shadows = false;
        let frame = app.frame_instances(&scene.borrow());
        assert_eq!(frame.boxes.len(), 55);
    }
}
