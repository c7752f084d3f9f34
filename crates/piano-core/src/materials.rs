//! Key materials, the light rig and the scene toggles driven by the UI panel.

use crate::piano::KeyKind;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MaterialKind {
    Basic,
    #[default]
    Physical,
    Shader,
}

impl MaterialKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "basic" => Some(Self::Basic),
            "physical" => Some(Self::Physical),
            "shader" => Some(Self::Shader),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialDescriptor {
    pub color: [f32; 3],
    pub opacity: f32,
    pub metalness: f32,
    pub roughness: f32,
    /// Ignores lights when true.
    pub unlit: bool,
    /// Sine-banded intensity that scrolls with time.
    pub animated: bool,
}

#[inline]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Material for one key. Each call returns a fresh value; nothing is shared.
pub fn material_for(kind: KeyKind, material: MaterialKind) -> MaterialDescriptor {
    let color = match kind {
        KeyKind::White => hex_to_rgb(0xffffff),
        KeyKind::Black => hex_to_rgb(0x111111),
    };
    match material {
        MaterialKind::Basic => MaterialDescriptor {
            color,
            opacity: 0.8,
            metalness: 0.0,
            roughness: 1.0,
            unlit: true,
            animated: false,
        },
        MaterialKind::Physical => {
            let (metalness, roughness) = match kind {
                KeyKind::White => (0.1, 0.3),
                KeyKind::Black => (0.8, 0.2),
            };
            MaterialDescriptor {
                color,
                opacity: 1.0,
                metalness,
                roughness,
                unlit: false,
                animated: false,
            }
        }
        MaterialKind::Shader => MaterialDescriptor {
            color,
            opacity: 1.0,
            metalness: 0.0,
            roughness: 0.5,
            unlit: true,
            animated: true,
        },
    }
}

pub const LIGHT_INTENSITY_MAX: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Directional,
    Point,
    Spot,
}

impl LightKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ambient" => Some(Self::Ambient),
            "directional" => Some(Self::Directional),
            "point" => Some(Self::Point),
            "spot" => Some(Self::Spot),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: Light,
    pub directional: Light,
    pub point: Light,
    pub point_range: f32,
    pub spot: Light,
    pub spot_target: Vec3,
    pub spot_angle: f32,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: Light {
                color: hex_to_rgb(0x404040),
                intensity: 0.3,
                position: Vec3::ZERO,
            },
            directional: Light {
                color: [1.0; 3],
                intensity: 0.8,
                position: Vec3::new(10.0, 10.0, 5.0),
            },
            point: Light {
                color: hex_to_rgb(0x4a9eff),
                intensity: 1.0,
                position: Vec3::new(0.0, 5.0, 0.0),
            },
            point_range: 50.0,
            spot: Light {
                color: [1.0; 3],
                intensity: 0.5,
                position: Vec3::new(-10.0, 15.0, 10.0),
            },
            spot_target: Vec3::ZERO,
            spot_angle: std::f32::consts::PI / 6.0,
        }
    }
}

impl LightRig {
    pub fn light_mut(&mut self, kind: LightKind) -> &mut Light {
        match kind {
            LightKind::Ambient => &mut self.ambient,
            LightKind::Directional => &mut self.directional,
            LightKind::Point => &mut self.point,
            LightKind::Spot => &mut self.spot,
        }
    }

    /// Slider input; NaN leaves the light unchanged.
    pub fn set_intensity(&mut self, kind: LightKind, value: f32) {
        if value.is_nan() {
            return;
        }
        self.light_mut(kind).intensity = value.clamp(0.0, LIGHT_INTENSITY_MAX);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Orbit,
    FirstPerson,
    Fly,
}

impl CameraMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "orbit" => Some(Self::Orbit),
            "fps" => Some(Self::FirstPerson),
            "fly" => Some(Self::Fly),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneToggles {
    pub fog: bool,
    pub shadows: bool,
    pub particles_visible: bool,
    pub bloom: bool,
    pub wireframe: bool,
    pub physics: bool,
    pub particle_size: f32,
    pub material: MaterialKind,
    pub camera_mode: CameraMode,
}

impl Default for SceneToggles {
    fn default() -> Self {
        Self {
            fog: true,
            shadows: true,
            particles_visible: true,
            bloom: true,
            wireframe: false,
            physics: false,
            particle_size: crate::constants::DEFAULT_POINT_SIZE,
            material: MaterialKind::Physical,
            camera_mode: CameraMode::Orbit,
        }
    }
}

impl SceneToggles {
    pub fn set_particle_size(&mut self, size: f32) {
        if size.is_nan() {
            return;
        }
        self.particle_size = size.clamp(0.01, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_colors_follow_key_kind_for_every_material() {
        for m in [MaterialKind::Basic, MaterialKind::Physical, MaterialKind::Shader] {
            assert_eq!(material_for(KeyKind::White, m).color, [1.0; 3]);
            let black = material_for(KeyKind::Black, m).color;
            assert!(black.iter().all(|c| (*c - 17.0 / 255.0).abs() < 1e-6));
        }
    }

    #[test]
    fn physical_black_keys_are_metallic() {
        let w = material_for(KeyKind::White, MaterialKind::Physical);
        let b = material_for(KeyKind::Black, MaterialKind::Physical);
        assert!(b.metalness > w.metalness);
        assert!(!b.unlit);
        assert_eq!(material_for(KeyKind::White, MaterialKind::Basic).opacity, 0.8);
    }

    #[test]
    fn light_intensity_is_clamped() {
        let mut rig = LightRig::default();
        rig.set_intensity(LightKind::Point, 9.0);
        assert_eq!(rig.point.intensity, LIGHT_INTENSITY_MAX);
        rig.set_intensity(LightKind::Ambient, -1.0);
        assert_eq!(rig.ambient.intensity, 0.0);
        rig.set_intensity(LightKind::Spot, f32::NAN);
        assert_eq!(rig.spot.intensity, 0.5);
    }

    #[test]
    fn names_resolve() {
        assert_eq!(MaterialKind::from_name("shader"), Some(MaterialKind::Shader));
        assert_eq!(LightKind::from_name("spot"), Some(LightKind::Spot));
        assert_eq!(LightKind::from_name("sun"), None);
        assert_eq!(CameraMode::from_name("fps"), Some(CameraMode::FirstPerson));
    }
}
