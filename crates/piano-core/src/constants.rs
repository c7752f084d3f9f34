use glam::Vec3;

// Shared scene/audio tuning constants used by both web and native frontends.

// Orbit camera
pub const ORBIT_DRAG_SENSITIVITY: f32 = 0.01; // radians per pointer pixel
pub const ORBIT_ZOOM_SENSITIVITY: f32 = 0.01; // world units per wheel pixel
pub const ORBIT_MIN_DISTANCE: f32 = 5.0;
pub const ORBIT_MAX_DISTANCE: f32 = 50.0;
pub const ORBIT_INITIAL_RADIUS: f32 = 20.0;
pub const ORBIT_INITIAL_POLAR: f32 = std::f32::consts::FRAC_PI_4;
pub const RESET_CAMERA_EYE: [f32; 3] = [0.0, 10.0, 20.0]; // "reset camera" button view
pub const ORBIT_POLAR_MARGIN: f32 = 0.1; // keeps the camera off the poles
pub const CAMERA_FOVY_RADIANS: f32 = 75.0 * std::f32::consts::PI / 180.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Note bursts
pub const BURST_PARTICLE_COUNT: usize = 20;
pub const BURST_SPREAD_RADIUS: f32 = 2.0;
pub const BURST_VELOCITY_MIN: [f32; 3] = [-0.05, 0.1, -0.05];
pub const BURST_VELOCITY_MAX: [f32; 3] = [0.05, 0.3, 0.05];
pub const BURST_OPACITY_DECAY_PER_TICK: f32 = 0.02;
pub const BURST_COLOR: [f32; 3] = [0.29, 0.62, 1.0]; // 0x4a9eff
pub const OPACITY_EPSILON: f32 = 1e-5; // below this a particle counts as spent

// Piano layout
pub const KEY_SPACING: f32 = 0.9;
pub const KEY_CENTER_INDEX: f32 = 14.0; // white key at x = 0 (C4)
pub const WHITE_KEY_SIZE: [f32; 3] = [0.8, 0.2, 4.0];
pub const BLACK_KEY_SIZE: [f32; 3] = [0.5, 0.3, 2.5];
pub const WHITE_KEY_Y: f32 = 0.1;
pub const BLACK_KEY_Y: f32 = 0.25;
pub const BLACK_KEY_Z: f32 = -0.75;
pub const KEY_PRESS_DEPTH: f32 = 0.05;
pub const KEY_PRESS_SEC: f32 = 0.15;

// Piano body (static boxes drawn under the keys)
pub const BODY_SIZE: [f32; 3] = [15.0, 2.0, 6.0];
pub const BODY_POSITION: [f32; 3] = [0.0, -1.0, 0.0];
pub const LEG_SIZE: [f32; 3] = [0.4, 3.0, 0.4];
pub const LEG_POSITIONS: [[f32; 3]; 4] = [
    [-6.0, -2.5, -2.0],
    [6.0, -2.5, -2.0],
    [-6.0, -2.5, 2.0],
    [6.0, -2.5, 2.0],
];
pub const BODY_COLOR: [f32; 3] = [0.55, 0.27, 0.07]; // wood, 0x8b4513
pub const LEG_COLOR: [f32; 3] = [0.17, 0.17, 0.17]; // 0x2c2c2c

// Ground plane, translucent; shadows are flattened onto its top face
pub const GROUND_SIZE: [f32; 3] = [100.0, 0.01, 100.0];
pub const GROUND_Y: f32 = -4.0;
pub const GROUND_COLOR: [f32; 3] = [0.067, 0.067, 0.067]; // 0x111111
pub const GROUND_OPACITY: f32 = 0.3;
pub const SHADOW_OPACITY: f32 = 0.35;
pub const SHADOW_THICKNESS: f32 = 0.01;

// Background
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.067]; // 0x000011
pub const STAR_COUNT: usize = 1000;
pub const STAR_FIELD_EXTENT: f32 = 200.0;
pub const STAR_ROTATION_PER_TICK: f32 = 0.0005;
pub const AMBIENT_PARTICLE_COUNT: usize = 1000;
pub const AMBIENT_EXTENT_XZ: f32 = 20.0;
pub const AMBIENT_Y_RANGE: [f32; 2] = [3.0, 18.0];
pub const AMBIENT_COLOR: [f32; 3] = [0.2, 0.5, 1.0];
pub const AMBIENT_ROTATION_PER_TICK: f32 = 0.001;
pub const DEFAULT_POINT_SIZE: f32 = 0.05;
pub const BURST_POINT_SIZE: f32 = 0.04; // sphere radius 0.02 in the reference scene

// Audio
pub const NOTE_DURATION_SEC: f32 = 1.5;
pub const ENVELOPE_ATTACK_SEC: f32 = 0.02;
pub const ENVELOPE_DECAY_SEC: f32 = 0.3;
pub const ENVELOPE_SUSTAIN_LEVEL: f32 = 0.4;
pub const ENVELOPE_RELEASE_SEC: f32 = 0.8;
pub const REVERB_SECONDS: f32 = 1.0;
pub const MASTER_GAIN: f32 = 0.3;

// Input
pub const WHEEL_LINE_PX: f32 = 40.0; // pixels per wheel "line"
pub const WHEEL_PAGE_PX: f32 = 800.0;

// Seeds
pub const STAR_SEED: u64 = 42;
pub const BURST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[inline]
pub fn burst_velocity_range() -> (Vec3, Vec3) {
    (Vec3::from(BURST_VELOCITY_MIN), Vec3::from(BURST_VELOCITY_MAX))
}
