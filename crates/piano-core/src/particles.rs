//! Short-lived particle bursts spawned per triggered note.
//!
//! Each burst is a handful of points thrown upward from a key. Every tick the
//! points move by their velocity and fade by a fixed amount; spent points are
//! removed from the scene and empty bursts are dropped.

use crate::constants::*;
use crate::error::{ensure_finite, Result};
use crate::scene::{PrimitiveId, SceneHandle};
use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub id: PrimitiveId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub opacity: f32,
}

#[derive(Clone, Debug, Default)]
pub struct ParticleBurst {
    pub particles: SmallVec<[Particle; BURST_PARTICLE_COUNT]>,
}

impl ParticleBurst {
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }
}

/// How velocity is integrated on each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VelocityIntegration {
    /// `position += velocity` once per call, regardless of `dt`.
    PerTick,
    /// `position += velocity * dt * reference_hz`; matches `PerTick` at `reference_hz`.
    PerSecond { reference_hz: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct BurstConfig {
    pub count: usize,
    pub spread_radius: f32,
    pub velocity_range: (Vec3, Vec3),
    pub opacity_decay_per_tick: f32,
    pub color: [f32; 3],
    pub integration: VelocityIntegration,
    /// Upper bound on live particles across all bursts; `None` is unbounded.
    pub max_particles: Option<usize>,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: BURST_PARTICLE_COUNT,
            spread_radius: BURST_SPREAD_RADIUS,
            velocity_range: burst_velocity_range(),
            opacity_decay_per_tick: BURST_OPACITY_DECAY_PER_TICK,
            color: BURST_COLOR,
            integration: VelocityIntegration::PerTick,
            max_particles: None,
        }
    }
}

impl BurstConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("spread_radius", self.spread_radius)?;
        ensure_finite("opacity_decay_per_tick", self.opacity_decay_per_tick)?;
        for v in [self.velocity_range.0, self.velocity_range.1] {
            ensure_finite("velocity_range", v.x)?;
            ensure_finite("velocity_range", v.y)?;
            ensure_finite("velocity_range", v.z)?;
        }
        if let VelocityIntegration::PerSecond { reference_hz } = self.integration {
            crate::error::ensure_positive("reference_hz", reference_hz)?;
        }
        Ok(())
    }
}

#[inline]
fn lerp_sample(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    // Works for lo > hi and lo == hi, unlike gen_range.
    lo + (hi - lo) * rng.gen::<f32>()
}

pub struct TransientParticleAnimator<H: SceneHandle> {
    scene: H,
    bursts: Vec<ParticleBurst>,
    color: [f32; 3],
    integration: VelocityIntegration,
    max_particles: Option<usize>,
    live: usize,
    rng: StdRng,
}

impl<H: SceneHandle> TransientParticleAnimator<H> {
    pub fn new(scene: H, seed: u64) -> Self {
        Self::with_config(scene, &BurstConfig::default(), seed)
    }

    pub fn with_config(scene: H, config: &BurstConfig, seed: u64) -> Self {
        Self {
            scene,
            bursts: Vec::new(),
            color: config.color,
            integration: config.integration,
            max_particles: config.max_particles,
            live: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn bursts(&self) -> &[ParticleBurst] {
        &self.bursts
    }

    pub fn active_burst_count(&self) -> usize {
        self.bursts.len()
    }

    pub fn active_particle_count(&self) -> usize {
        self.live
    }

    /// Spawn `count` particles around `origin`. Zero is a no-op.
    ///
    /// Jitter is `[-spread/2, spread/2]` on X and Z and `[0, spread]` on Y so the
    /// burst opens upward. Velocities are drawn per axis from `velocity_range`.
    pub fn spawn_burst(
        &mut self,
        origin: Vec3,
        count: usize,
        spread_radius: f32,
        velocity_range: (Vec3, Vec3),
    ) {
        let count = match self.max_particles {
            Some(cap) => count.min(cap.saturating_sub(self.live)),
            None => count,
        };
        if count == 0 {
            return;
        }
        let half = spread_radius * 0.5;
        let (vmin, vmax) = velocity_range;
        let mut burst = ParticleBurst::default();
        for _ in 0..count {
            let jitter = Vec3::new(
                lerp_sample(&mut self.rng, -half, half),
                lerp_sample(&mut self.rng, 0.0, spread_radius),
                lerp_sample(&mut self.rng, -half, half),
            );
            let velocity = Vec3::new(
                lerp_sample(&mut self.rng, vmin.x, vmax.x),
                lerp_sample(&mut self.rng, vmin.y, vmax.y),
                lerp_sample(&mut self.rng, vmin.z, vmax.z),
            );
            let position = origin + jitter;
            let id = self.scene.create_point_primitive(position, self.color, 1.0);
            burst.particles.push(Particle {
                id,
                position,
                velocity,
                opacity: 1.0,
            });
        }
        self.live += burst.len();
        self.bursts.push(burst);
    }

    /// Advance every live particle once and retire the spent ones.
    pub fn tick(&mut self, dt: f32, opacity_decay_per_tick: f32) {
        let decay = opacity_decay_per_tick.max(0.0);
        let step = match self.integration {
            VelocityIntegration::PerTick => 1.0,
            VelocityIntegration::PerSecond { reference_hz } => {
                if dt.is_finite() {
                    dt.max(0.0) * reference_hz
                } else {
                    0.0
                }
            }
        };
        let scene = &mut self.scene;
        let mut removed = 0usize;
        for burst in &mut self.bursts {
            burst.particles.retain(|p| {
                p.position += p.velocity * step;
                p.opacity -= decay;
                if p.opacity <= OPACITY_EPSILON {
                    scene.remove_primitive(p.id);
                    removed += 1;
                    false
                } else {
                    scene.update_primitive(p.id, p.position, p.opacity);
                    true
                }
            });
        }
        self.bursts.retain(|b| !b.is_empty());
        self.live -= removed;
    }

    /// Remove every live particle from the scene.
    pub fn clear(&mut self) {
        for burst in self.bursts.drain(..) {
            for p in burst.particles {
                self.scene.remove_primitive(p.id);
            }
        }
        self.live = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::PointScene;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn animator() -> (Rc<RefCell<PointScene>>, TransientParticleAnimator<Rc<RefCell<PointScene>>>) {
        let scene = Rc::new(RefCell::new(PointScene::new()));
        let anim = TransientParticleAnimator::new(scene.clone(), 7);
        (scene, anim)
    }

    #[test]
    fn spawn_adds_exactly_count_particles() {
        let (scene, mut anim) = animator();
        anim.spawn_burst(Vec3::ZERO, 20, 2.0, burst_velocity_range());
        anim.spawn_burst(Vec3::X, 5, 2.0, burst_velocity_range());
        assert_eq!(anim.active_particle_count(), 25);
        assert_eq!(anim.active_burst_count(), 2);
        assert_eq!(scene.borrow().len(), 25);
    }

    #[test]
    fn zero_count_is_a_no_op() {
        let (scene, mut anim) = animator();
        anim.spawn_burst(Vec3::ZERO, 0, 2.0, burst_velocity_range());
        assert_eq!(anim.active_burst_count(), 0);
        assert!(scene.borrow().is_empty());
    }

    #[test]
    fn jitter_and_velocity_stay_in_range() {
        let (_scene, mut anim) = animator();
        let origin = Vec3::new(1.0, 5.0, -2.0);
        let range = (Vec3::new(-0.1, 0.1, -0.1), Vec3::new(0.1, 0.3, 0.1));
        anim.spawn_burst(origin, 200, 2.0, range);
        for p in &anim.bursts()[0].particles {
            let d = p.position - origin;
            assert!(d.x.abs() <= 1.0 && d.z.abs() <= 1.0);
            assert!(d.y >= 0.0 && d.y <= 2.0);
            assert!(p.velocity.cmpge(range.0).all() && p.velocity.cmple(range.1).all());
            assert_eq!(p.opacity, 1.0);
        }
    }

    #[test]
    fn particles_move_by_velocity_each_tick() {
        let (scene, mut anim) = animator();
        anim.spawn_burst(Vec3::ZERO, 3, 0.0, (Vec3::Y, Vec3::Y));
        anim.tick(1.0 / 60.0, 0.1);
        anim.tick(1.0 / 30.0, 0.1);
        for p in &anim.bursts()[0].particles {
            assert!((p.position - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-6);
            assert!((p.opacity - 0.8).abs() < 1e-6);
            let seen = scene.borrow().get(p.id).copied().unwrap();
            assert_eq!(seen.position, p.position);
        }
    }

    #[test]
    fn per_second_integration_scales_by_dt() {
        let scene = Rc::new(RefCell::new(PointScene::new()));
        let cfg = BurstConfig {
            integration: VelocityIntegration::PerSecond { reference_hz: 60.0 },
            ..BurstConfig::default()
        };
        let mut anim = TransientParticleAnimator::with_config(scene, &cfg, 1);
        anim.spawn_burst(Vec3::ZERO, 1, 0.0, (Vec3::X, Vec3::X));
        anim.tick(1.0 / 30.0, 0.01);
        let p = anim.bursts()[0].particles[0];
        assert!((p.position.x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn fifty_ticks_at_two_percent_retire_everything() {
        let (scene, mut anim) = animator();
        anim.spawn_burst(Vec3::ZERO, 4, 2.0, burst_velocity_range());
        for tick in 1..=49 {
            anim.tick(1.0 / 60.0, 0.02);
            assert_eq!(anim.active_particle_count(), 4, "early removal at tick {tick}");
        }
        anim.tick(1.0 / 60.0, 0.02);
        assert_eq!(anim.active_particle_count(), 0);
        assert_eq!(anim.active_burst_count(), 0);
        assert!(scene.borrow().is_empty());
    }

    #[test]
    fn opacity_strictly_decreases() {
        let (_scene, mut anim) = animator();
        anim.spawn_burst(Vec3::ZERO, 2, 1.0, burst_velocity_range());
        let mut prev = 1.0;
        while anim.active_particle_count() > 0 {
            anim.tick(0.016, 0.05);
            if let Some(b) = anim.bursts().first() {
                let o = b.particles[0].opacity;
                assert!(o < prev);
                prev = o;
            }
        }
    }

    #[test]
    fn negative_decay_never_brightens() {
        let (_scene, mut anim) = animator();
        anim.spawn_burst(Vec3::ZERO, 1, 0.0, (Vec3::ZERO, Vec3::ZERO));
        anim.tick(0.016, -0.5);
        assert_eq!(anim.bursts()[0].particles[0].opacity, 1.0);
    }

    #[test]
    fn cap_truncates_new_bursts() {
        let scene = Rc::new(RefCell::new(PointScene::new()));
        let cfg = BurstConfig {
            max_particles: Some(30),
            ..BurstConfig::default()
        };
        let mut anim = TransientParticleAnimator::with_config(scene, &cfg, 3);
        anim.spawn_burst(Vec3::ZERO, 20, 2.0, burst_velocity_range());
        anim.spawn_burst(Vec3::ZERO, 20, 2.0, burst_velocity_range());
        anim.spawn_burst(Vec3::ZERO, 20, 2.0, burst_velocity_range());
        assert_eq!(anim.active_particle_count(), 30);
        assert_eq!(anim.active_burst_count(), 2);
    }

    #[test]
    fn clear_empties_scene() {
        let (scene, mut anim) = animator();
        anim.spawn_burst(Vec3::ZERO, 8, 2.0, burst_velocity_range());
        anim.clear();
        assert_eq!(anim.active_particle_count(), 0);
        assert!(scene.borrow().is_empty());
    }
}
