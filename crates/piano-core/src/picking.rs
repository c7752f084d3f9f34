use crate::piano::PianoKey;
use glam::{Mat4, Vec3, Vec4};

#[inline]
/// Compute a world-space ray from canvas pixel coordinates.
///
/// - `sx`, `sy`: pixel coordinates in the canvas' backing store space
/// - `width`, `height`: backing store size in pixels
/// - `eye`, `target`, `fovy`: the camera the frame was drawn with
///
/// Returns `(ray_origin, ray_direction)` in world space.
pub fn screen_to_world_ray(
    sx: f32,
    sy: f32,
    width: f32,
    height: f32,
    eye: Vec3,
    target: Vec3,
    fovy: f32,
) -> (Vec3, Vec3) {
    let width = width.max(1.0);
    let height = height.max(1.0);
    let ndc_x = (2.0 * sx / width) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height);
    let aspect = width / height;
    let proj = Mat4::perspective_rh(fovy, aspect, 0.1, 1000.0);
    let view = Mat4::look_at_rh(eye, target, Vec3::Y);
    let inv = (proj * view).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    (eye, (p1 - eye).normalize())
}

/// Slab test against an axis-aligned box. Returns the entry distance, or the
/// exit distance when the origin is inside the box.
#[inline]
pub fn ray_aabb(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, half_extents: Vec3) -> Option<f32> {
    let min = center - half_extents;
    let max = center + half_extents;
    let inv = ray_dir.recip();
    let t1 = (min - ray_origin) * inv;
    let t2 = (max - ray_origin) * inv;
    let t_near = t1.min(t2).max_element();
    let t_far = t1.max(t2).min_element();
    if t_near > t_far || t_far < 0.0 || t_near.is_nan() || t_far.is_nan() {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

/// Index of the nearest key hit by the ray.
pub fn pick_key(ray_origin: Vec3, ray_dir: Vec3, keys: &[PianoKey]) -> Option<usize> {
    let mut best = None::<(usize, f32)>;
    for (i, key) in keys.iter().enumerate() {
        if let Some(t) = ray_aabb(ray_origin, ray_dir, key.position(), key.half_extents()) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}
