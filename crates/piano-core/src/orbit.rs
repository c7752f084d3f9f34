//! Orbit camera driven by pointer drag and wheel input.
//!
//! The camera lives on a sphere around a fixed target. Drags change the two
//! angles, the wheel changes the radius, and the scene only sees the result of
//! [`OrbitCameraController::compute_camera_transform`] once per frame.

use crate::constants::*;
use crate::error::{ensure_finite, ensure_positive, ConfigError, Result};
use crate::scene::SceneHandle;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraOrbitState {
    pub azimuth: f32,
    pub polar: f32,
    pub radius: f32,
    pub target: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitConfig {
    pub sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub initial_radius: f32,
    pub initial_polar: f32,
    pub initial_azimuth: f32,
    pub target: Vec3,
    /// Eye position `reset` returns to; `None` means the initial angles.
    pub reset_eye: Option<Vec3>,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            sensitivity: ORBIT_DRAG_SENSITIVITY,
            zoom_sensitivity: ORBIT_ZOOM_SENSITIVITY,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            initial_radius: ORBIT_INITIAL_RADIUS,
            initial_polar: ORBIT_INITIAL_POLAR,
            initial_azimuth: 0.0,
            target: Vec3::ZERO,
            reset_eye: None,
        }
    }
}

impl OrbitConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("sensitivity", self.sensitivity)?;
        ensure_finite("zoom_sensitivity", self.zoom_sensitivity)?;
        ensure_positive("min_distance", self.min_distance)?;
        ensure_positive("max_distance", self.max_distance)?;
        ensure_finite("initial_radius", self.initial_radius)?;
        ensure_finite("initial_polar", self.initial_polar)?;
        ensure_finite("initial_azimuth", self.initial_azimuth)?;
        if let Some(eye) = self.reset_eye {
            for c in eye.to_array() {
                ensure_finite("reset_eye", c)?;
            }
        }
        if self.min_distance > self.max_distance {
            return Err(ConfigError::EmptyDistanceRange {
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        Ok(())
    }

    fn initial_state(&self) -> CameraOrbitState {
        CameraOrbitState {
            azimuth: self.initial_azimuth,
            polar: clamp_polar(self.initial_polar),
            radius: self
                .initial_radius
                .clamp(self.min_distance, self.max_distance),
            target: self.target,
        }
    }

    fn reset_state(&self) -> CameraOrbitState {
        match self.reset_eye {
            Some(eye) => {
                let mut s = orbit_state_from_eye(eye, self.target);
                s.polar = clamp_polar(s.polar);
                s.radius = s.radius.clamp(self.min_distance, self.max_distance);
                s
            }
            None => self.initial_state(),
        }
    }
}

#[inline]
pub fn polar_bounds() -> (f32, f32) {
    (ORBIT_POLAR_MARGIN, std::f32::consts::PI - ORBIT_POLAR_MARGIN)
}

#[inline]
fn clamp_polar(polar: f32) -> f32 {
    let (lo, hi) = polar_bounds();
    polar.clamp(lo, hi)
}

/// Cartesian to spherical around `target`; the inverse of [`orbit_position`].
/// An eye on the target gives radius 0 and the straight-up polar angle.
pub fn orbit_state_from_eye(eye: Vec3, target: Vec3) -> CameraOrbitState {
    let offset = eye - target;
    let radius = offset.length();
    let polar = if radius > 0.0 {
        (offset.y / radius).clamp(-1.0, 1.0).acos()
    } else {
        0.0
    };
    CameraOrbitState {
        azimuth: offset.z.atan2(offset.x),
        polar,
        radius,
        target,
    }
}

/// Spherical to cartesian, Y up.
#[inline]
pub fn orbit_position(state: &CameraOrbitState) -> Vec3 {
    let (sin_p, cos_p) = state.polar.sin_cos();
    let (sin_a, cos_a) = state.azimuth.sin_cos();
    state.target + state.radius * Vec3::new(sin_p * cos_a, cos_p, sin_p * sin_a)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

pub struct OrbitCameraController<H: SceneHandle> {
    scene: H,
    config: OrbitConfig,
    state: CameraOrbitState,
    phase: DragPhase,
    last_pointer: Vec2,
}

impl<H: SceneHandle> OrbitCameraController<H> {
    /// Build a controller with a checked configuration.
    pub fn new(scene: H, config: OrbitConfig) -> Result<Self> {
        config.validate()?;
        let state = config.initial_state();
        Ok(Self {
            scene,
            config,
            state,
            phase: DragPhase::Idle,
            last_pointer: Vec2::ZERO,
        })
    }

    pub fn with_defaults(scene: H) -> Self {
        let config = OrbitConfig::default();
        let state = config.initial_state();
        Self {
            scene,
            config,
            state,
            phase: DragPhase::Idle,
            last_pointer: Vec2::ZERO,
        }
    }

    pub fn state(&self) -> &CameraOrbitState {
        &self.state
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    pub fn on_drag_start(&mut self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.last_pointer = Vec2::new(x, y);
        self.phase = DragPhase::Dragging;
    }

    pub fn on_drag_move(&mut self, x: f32, y: f32) {
        if self.phase == DragPhase::Idle || !(x.is_finite() && y.is_finite()) {
            return;
        }
        let pointer = Vec2::new(x, y);
        let delta = pointer - self.last_pointer;
        self.state.azimuth += delta.x * self.config.sensitivity;
        self.state.polar = clamp_polar(self.state.polar + delta.y * self.config.sensitivity);
        self.last_pointer = pointer;
    }

    pub fn on_drag_end(&mut self) {
        self.phase = DragPhase::Idle;
    }

    pub fn on_scroll(&mut self, delta_y: f32) {
        if !delta_y.is_finite() {
            return;
        }
        self.state.radius = (self.state.radius + delta_y * self.config.zoom_sensitivity)
            .clamp(self.config.min_distance, self.config.max_distance);
    }

    /// Camera eye and look-at point for the current state.
    pub fn compute_camera_transform(&self) -> (Vec3, Vec3) {
        (orbit_position(&self.state), self.state.target)
    }

    /// Push the current transform to the scene.
    pub fn apply(&mut self) {
        let (eye, look_at) = self.compute_camera_transform();
        self.scene.set_camera_transform(eye, look_at);
    }

    /// Back to the configured reset view; ends any drag in progress.
    pub fn reset(&mut self) {
        self.state = self.config.reset_state();
        self.phase = DragPhase::Idle;
        log::info!("[camera] reset to radius {:.1}", self.state.radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::PointScene;
    use std::f32::consts::{FRAC_PI_4, PI};

    fn controller() -> OrbitCameraController<PointScene> {
        OrbitCameraController::with_defaults(PointScene::new())
    }

    #[test]
    fn drag_move_without_start_is_ignored() {
        let mut c = controller();
        let before = *c.state();
        c.on_drag_move(300.0, 400.0);
        assert_eq!(*c.state(), before);
        assert_eq!(c.phase(), DragPhase::Idle);
    }

    #[test]
    fn drag_updates_angles_from_last_pointer() {
        let mut c = controller();
        c.on_drag_start(100.0, 100.0);
        c.on_drag_move(110.0, 105.0);
        c.on_drag_move(120.0, 110.0);
        let s = c.state();
        assert!((s.azimuth - 0.2).abs() < 1e-5);
        assert!((s.polar - (FRAC_PI_4 + 0.1)).abs() < 1e-5);
        c.on_drag_end();
        c.on_drag_move(500.0, 500.0);
        assert!((c.state().azimuth - 0.2).abs() < 1e-5);
    }

    #[test]
    fn restarting_a_drag_overwrites_origin() {
        let mut c = controller();
        c.on_drag_start(0.0, 0.0);
        c.on_drag_start(50.0, 0.0);
        c.on_drag_move(60.0, 0.0);
        assert!((c.state().azimuth - 0.1).abs() < 1e-5);
    }

    #[test]
    fn polar_saturates_at_bounds() {
        let mut c = controller();
        c.on_drag_start(0.0, 0.0);
        c.on_drag_move(0.0, 10_000.0);
        assert!((c.state().polar - (PI - 0.1)).abs() < 1e-6);
        // further downward drags are absorbed; an upward drag moves off the bound at once
        c.on_drag_move(0.0, 20_000.0);
        assert!((c.state().polar - (PI - 0.1)).abs() < 1e-6);
        c.on_drag_move(0.0, 19_990.0);
        assert!((c.state().polar - (PI - 0.2)).abs() < 1e-5);
    }

    #[test]
    fn transform_matches_spherical_formula() {
        let c = controller();
        let (eye, look) = c.compute_camera_transform();
        let r = 20.0_f32;
        let expected = Vec3::new(r * FRAC_PI_4.sin(), r * FRAC_PI_4.cos(), 0.0);
        assert!((eye - expected).length() < 1e-4);
        assert_eq!(look, Vec3::ZERO);
        assert!((eye.length() - r).abs() < 1e-4);
    }

    #[test]
    fn apply_writes_camera_to_scene() {
        let mut c = controller();
        c.apply();
        let (eye, _) = c.compute_camera_transform();
        assert_eq!(c.scene.camera_eye, eye);
    }

    #[test]
    fn config_rejects_inverted_range() {
        let cfg = OrbitConfig {
            min_distance: 60.0,
            ..OrbitConfig::default()
        };
        assert!(matches!(
            OrbitCameraController::new(PointScene::new(), cfg),
            Err(ConfigError::EmptyDistanceRange { .. })
        ));
    }

    #[test]
    fn initial_values_are_clamped() {
        let cfg = OrbitConfig {
            initial_radius: 500.0,
            initial_polar: 0.0,
            ..OrbitConfig::default()
        };
        let c = OrbitCameraController::new(PointScene::new(), cfg).unwrap();
        assert_eq!(c.state().radius, 50.0);
        assert!((c.state().polar - 0.1).abs() < 1e-6);
    }

    #[test]
    fn reset_restores_start_view() {
        let mut c = controller();
        c.on_drag_start(0.0, 0.0);
        c.on_drag_move(40.0, 40.0);
        c.on_scroll(900.0);
        c.reset();
        assert_eq!(c.state().radius, 20.0);
        assert_eq!(c.state().azimuth, 0.0);
        assert!(!c.is_dragging());
    }

    #[test]
    fn reset_eye_overrides_start_view() {
        let cfg = OrbitConfig {
            reset_eye: Some(Vec3::new(0.0, 10.0, 20.0)),
            ..OrbitConfig::default()
        };
        let mut c = OrbitCameraController::new(PointScene::new(), cfg).unwrap();
        // the initial view is untouched
        assert_eq!(c.state().radius, 20.0);
        c.reset();
        let (eye, look) = c.compute_camera_transform();
        assert!((eye - Vec3::new(0.0, 10.0, 20.0)).length() < 1e-4);
        assert_eq!(look, Vec3::ZERO);
    }

    #[test]
    fn state_from_eye_inverts_orbit_position() {
        let s = CameraOrbitState {
            azimuth: 1.3,
            polar: 0.7,
            radius: 12.0,
            target: Vec3::new(1.0, 2.0, 3.0),
        };
        let back = orbit_state_from_eye(orbit_position(&s), s.target);
        assert!((back.azimuth - s.azimuth).abs() < 1e-4);
        assert!((back.polar - s.polar).abs() < 1e-4);
        assert!((back.radius - s.radius).abs() < 1e-4);
    }

    #[test]
    fn non_finite_reset_eye_is_rejected() {
        let cfg = OrbitConfig {
            reset_eye: Some(Vec3::new(f32::NAN, 0.0, 0.0)),
            ..OrbitConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut c = controller();
        c.on_scroll(f32::NAN);
        assert_eq!(c.state().radius, 20.0);
        c.on_drag_start(f32::INFINITY, 0.0);
        assert!(!c.is_dragging());
    }
}
