//! Instance and uniform packing shared by the web and native renderers.

use crate::constants::*;
use crate::materials::{material_for, LightRig, MaterialDescriptor, SceneToggles};
use crate::piano::PianoKey;
use crate::scene::PointScene;
use crate::starfield::PointCloud;
use glam::{Mat4, Vec3};

// Star and ambient sprites are scaled up from the UI point size so distant
// points stay visible as world-space billboards.
pub const STAR_SIZE_SCALE: f32 = 10.0;
pub const AMBIENT_SIZE_SCALE: f32 = 2.0;
pub const FOG_NEAR: f32 = 50.0;
pub const FOG_FAR: f32 = 200.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
}

/// One lit box: a key, the body or a leg.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BoxInstance {
    pub center: [f32; 4],
    pub size: [f32; 4],
    /// rgb + opacity
    pub color: [f32; 4],
    /// metalness, roughness, unlit, animated
    pub material: [f32; 4],
}

/// One additive billboard: xyz + size, rgb + opacity.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub pos_size: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    /// xyz eye, w = seconds since start
    pub camera_pos: [f32; 4],
    pub ambient: [f32; 4],
    pub dir_light_dir: [f32; 4],
    pub dir_light_color: [f32; 4],
    /// xyz position, w = range
    pub point_light_pos: [f32; 4],
    pub point_light_color: [f32; 4],
    /// xyz position, w = cos(cone angle)
    pub spot_light_pos: [f32; 4],
    pub spot_light_dir: [f32; 4],
    pub spot_light_color: [f32; 4],
    /// rgb fog color, w = enabled
    pub fog: [f32; 4],
    /// x fog near, y fog far, z point scale
    pub params: [f32; 4],
}

/// Everything a renderer uploads for one frame.
#[derive(Clone, Debug, Default)]
pub struct FrameInstances {
    pub boxes: Vec<BoxInstance>,
    pub points: Vec<PointInstance>,
    pub wireframe: bool,
}

const CUBE_FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    // normal, u axis, v axis
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

/// Unit cube (-0.5..0.5) as a counter-clockwise triangle list, 36 vertices.
pub fn cube_vertices() -> Vec<CubeVertex> {
    let mut out = Vec::with_capacity(36);
    for (n, u, v) in CUBE_FACES {
        let (n, u, v) = (Vec3::from(n), Vec3::from(u), Vec3::from(v));
        let corner = |su: f32, sv: f32| CubeVertex {
            pos: ((n + u * su + v * sv) * 0.5).to_array(),
            normal: n.to_array(),
        };
        let quad = [
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        ];
        out.extend_from_slice(&quad);
    }
    out
}

/// The twelve cube edges as a line list, 24 vertices.
pub fn cube_edge_vertices() -> Vec<CubeVertex> {
    let mut out = Vec::with_capacity(24);
    let c = |x: f32, y: f32, z: f32| Vec3::new(x, y, z) * 0.5;
    let corners = [
        c(-1.0, -1.0, -1.0),
        c(1.0, -1.0, -1.0),
        c(1.0, 1.0, -1.0),
        c(-1.0, 1.0, -1.0),
        c(-1.0, -1.0, 1.0),
        c(1.0, -1.0, 1.0),
        c(1.0, 1.0, 1.0),
        c(-1.0, 1.0, 1.0),
    ];
    // bottom ring, top ring, then the four uprights
    let edges = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    for (a, b) in edges {
        for p in [corners[a], corners[b]] {
            out.push(CubeVertex {
                pos: p.to_array(),
                normal: p.normalize_or_zero().to_array(),
            });
        }
    }
    out
}

fn pack_box(center: Vec3, size: Vec3, m: &MaterialDescriptor) -> BoxInstance {
    BoxInstance {
        center: center.extend(1.0).to_array(),
        size: size.extend(0.0).to_array(),
        color: [m.color[0], m.color[1], m.color[2], m.opacity],
        material: [
            m.metalness,
            m.roughness,
            if m.unlit { 1.0 } else { 0.0 },
            if m.animated { 1.0 } else { 0.0 },
        ],
    }
}

/// Unit vector the directional light travels along, if it reaches the ground.
fn shadow_direction(lights: &LightRig) -> Option<Vec3> {
    let d = -lights.directional.position.normalize_or_zero();
    (d.y < -1e-3 && lights.directional.intensity > 0.0).then_some(d)
}

/// A caster flattened onto the ground's top face along `toward_ground`.
fn ground_shadow(caster: &BoxInstance, toward_ground: Vec3) -> BoxInstance {
    let ground_top = GROUND_Y + GROUND_SIZE[1] * 0.5;
    let center = Vec3::new(caster.center[0], caster.center[1], caster.center[2]);
    let t = (center.y - ground_top) / -toward_ground.y;
    let hit = center + toward_ground * t;
    BoxInstance {
        center: [hit.x, ground_top + SHADOW_THICKNESS, hit.z, 1.0],
        size: [caster.size[0], SHADOW_THICKNESS, caster.size[2], 0.0],
        color: [0.0, 0.0, 0.0, SHADOW_OPACITY],
        material: [0.0, 1.0, 1.0, 0.0],
    }
}

/// Piano body, legs and keys (pressed keys drawn lowered), then the ground
/// plane, then one projected shadow per caster while shadows are on.
///
/// Translucent boxes come last so they blend over what is already drawn.
pub fn piano_boxes(
    keys: &[PianoKey],
    lights: &LightRig,
    toggles: &SceneToggles,
) -> Vec<BoxInstance> {
    let casters = keys.len() + 1 + LEG_POSITIONS.len();
    let mut out = Vec::with_capacity(casters * 2 + 1);
    let body = MaterialDescriptor {
        color: BODY_COLOR,
        opacity: 1.0,
        metalness: 0.1,
        roughness: 0.8,
        unlit: false,
        animated: false,
    };
    out.push(pack_box(
        Vec3::from(BODY_POSITION),
        Vec3::from(BODY_SIZE),
        &body,
    ));
    let leg = MaterialDescriptor {
        color: LEG_COLOR,
        metalness: 0.8,
        roughness: 0.2,
        ..body
    };
    for p in LEG_POSITIONS {
        out.push(pack_box(Vec3::from(p), Vec3::from(LEG_SIZE), &leg));
    }
    for key in keys {
        let m = material_for(key.kind, toggles.material);
        out.push(pack_box(key.position(), key.size, &m));
    }

    let ground = MaterialDescriptor {
        color: GROUND_COLOR,
        opacity: GROUND_OPACITY,
        metalness: 0.0,
        roughness: 1.0,
        unlit: false,
        animated: false,
    };
    out.push(pack_box(
        Vec3::new(0.0, GROUND_Y, 0.0),
        Vec3::from(GROUND_SIZE),
        &ground,
    ));

    if toggles.shadows {
        if let Some(d) = shadow_direction(lights) {
            let shadows: Vec<_> = out[..casters].iter().map(|b| ground_shadow(b, d)).collect();
            out.extend(shadows);
        }
    }
    out
}

fn push_cloud(out: &mut Vec<PointInstance>, cloud: &PointCloud, size: f32, opacity: f32) {
    out.extend(cloud.world_points().map(|p| PointInstance {
        pos_size: p.position.extend(size).to_array(),
        color: [p.color[0], p.color[1], p.color[2], opacity],
    }));
}

/// Background clouds (when visible) followed by the live burst points.
pub fn point_instances(
    scene: &PointScene,
    stars: &PointCloud,
    ambient: &PointCloud,
    toggles: &SceneToggles,
) -> Vec<PointInstance> {
    let mut out = Vec::with_capacity(stars.points.len() + ambient.points.len() + scene.len());
    if toggles.particles_visible {
        push_cloud(&mut out, stars, toggles.particle_size * STAR_SIZE_SCALE, 0.8);
        push_cloud(&mut out, ambient, toggles.particle_size * AMBIENT_SIZE_SCALE, 0.6);
    }
    for (_, p) in scene.points_sorted() {
        out.push(PointInstance {
            pos_size: p.position.extend(BURST_POINT_SIZE).to_array(),
            color: [p.color[0], p.color[1], p.color[2], p.opacity],
        });
    }
    out
}

fn scaled(color: [f32; 3], intensity: f32) -> [f32; 4] {
    [
        color[0] * intensity,
        color[1] * intensity,
        color[2] * intensity,
        1.0,
    ]
}

pub fn scene_uniforms(
    eye: Vec3,
    target: Vec3,
    aspect: f32,
    lights: &LightRig,
    toggles: &SceneToggles,
    time_sec: f32,
) -> SceneUniforms {
    let view = Mat4::look_at_rh(eye, target, Vec3::Y);
    let proj = Mat4::perspective_rh(CAMERA_FOVY_RADIANS, aspect.max(1e-3), CAMERA_ZNEAR, CAMERA_ZFAR);
    // Camera basis from the inverse view for billboard expansion.
    let inv_view = view.inverse();
    let right = inv_view.x_axis.truncate();
    let up = inv_view.y_axis.truncate();
    let spot_dir = (lights.spot_target - lights.spot.position).normalize_or_zero();
    let fog = [
        CLEAR_COLOR[0] as f32,
        CLEAR_COLOR[1] as f32,
        CLEAR_COLOR[2] as f32,
        if toggles.fog { 1.0 } else { 0.0 },
    ];
    SceneUniforms {
        view_proj: (proj * view).to_cols_array_2d(),
        camera_right: right.extend(0.0).to_array(),
        camera_up: up.extend(0.0).to_array(),
        camera_pos: eye.extend(time_sec).to_array(),
        ambient: scaled(lights.ambient.color, lights.ambient.intensity),
        dir_light_dir: lights.directional.position.normalize_or_zero().extend(0.0).to_array(),
        dir_light_color: scaled(lights.directional.color, lights.directional.intensity),
        point_light_pos: lights.point.position.extend(lights.point_range).to_array(),
        point_light_color: scaled(lights.point.color, lights.point.intensity),
        spot_light_pos: lights.spot.position.extend(lights.spot_angle.cos()).to_array(),
        spot_light_dir: spot_dir.extend(0.0).to_array(),
        spot_light_color: scaled(lights.spot.color, lights.spot.intensity),
        fog,
        params: [FOG_NEAR, FOG_FAR, 1.0, 0.0],
    }
}
