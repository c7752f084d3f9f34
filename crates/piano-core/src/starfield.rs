use crate::constants::*;
use glam::{Quat, Vec3};
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundPoint {
    pub position: Vec3,
    pub color: [f32; 3],
}

/// A rotating cloud of background points.
#[derive(Clone, Debug)]
pub struct PointCloud {
    pub points: Vec<BackgroundPoint>,
    pub rotation_y: f32,
    pub spin_per_tick: f32,
}

impl PointCloud {
    pub fn tick(&mut self) {
        self.rotation_y = (self.rotation_y + self.spin_per_tick) % std::f32::consts::TAU;
    }

    /// Points rotated by the current spin.
    pub fn world_points(&self) -> impl Iterator<Item = BackgroundPoint> + '_ {
        let rot = Quat::from_rotation_y(self.rotation_y);
        self.points.iter().map(move |p| BackgroundPoint {
            position: rot * p.position,
            color: p.color,
        })
    }
}

pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hue = |mut t: f32| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    [hue(h + 1.0 / 3.0), hue(h), hue(h - 1.0 / 3.0)]
}

/// Distant stars scattered through a cube, cool blue-cyan hues.
pub fn star_field(count: usize, seed: u64) -> PointCloud {
    let mut rng = StdRng::seed_from_u64(seed);
    let half = STAR_FIELD_EXTENT * 0.5;
    let points = (0..count)
        .map(|_| {
            let position = Vec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            );
            let h = rng.gen::<f32>() * 0.2 + 0.5;
            let l = rng.gen::<f32>() * 0.25 + 0.55;
            BackgroundPoint {
                position,
                color: hsl_to_rgb(h, 0.55, l),
            }
        })
        .collect();
    PointCloud {
        points,
        rotation_y: 0.0,
        spin_per_tick: STAR_ROTATION_PER_TICK,
    }
}

/// Blue note dust floating above the keyboard.
pub fn ambient_cloud(count: usize, seed: u64) -> PointCloud {
    let mut rng = StdRng::seed_from_u64(seed);
    let half = AMBIENT_EXTENT_XZ * 0.5;
    let points = (0..count)
        .map(|_| BackgroundPoint {
            position: Vec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(AMBIENT_Y_RANGE[0]..AMBIENT_Y_RANGE[1]),
                rng.gen_range(-half..half),
            ),
            color: AMBIENT_COLOR,
        })
        .collect();
    PointCloud {
        points,
        rotation_y: 0.0,
        spin_per_tick: AMBIENT_ROTATION_PER_TICK,
    }
}
