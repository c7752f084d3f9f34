pub mod app;
pub mod audio;
pub mod constants;
pub mod error;
pub mod gpu;
pub mod input;
pub mod keymap;
pub mod loading;
pub mod materials;
pub mod note;
pub mod orbit;
pub mod particles;
pub mod piano;
pub mod picking;
#[cfg(feature = "gpu")]
pub mod render;
pub mod scene;
pub mod starfield;
pub mod stats;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use app::{AppConfig, PianoApp};
pub use audio::{Envelope, NoteSink, RecordingSink, Waveform};
pub use constants::*;
pub use error::ConfigError;
pub use input::{InputEvent, InputQueue};
pub use materials::{CameraMode, LightKind, LightRig, MaterialKind, SceneToggles};
pub use note::Note;
pub use orbit::{CameraOrbitState, OrbitCameraController, OrbitConfig};
pub use particles::{BurstConfig, TransientParticleAnimator, VelocityIntegration};
pub use piano::{KeyKind, Piano, PianoKey};
pub use scene::{PointScene, PrimitiveId, SceneHandle};
