//! Render-engine surface used by the camera controller and particle animator.
//!
//! The core never talks to a GPU. It issues small mutation commands on a
//! [`SceneHandle`]; the frontends keep a [`PointScene`] that records them and
//! read it back when building instance buffers each frame.

use fnv::FnvHashMap;
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

/// Opaque handle for a point primitive created in a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub u32);

pub trait SceneHandle {
    fn create_point_primitive(&mut self, position: Vec3, color: [f32; 3], opacity: f32)
        -> PrimitiveId;
    fn update_primitive(&mut self, id: PrimitiveId, position: Vec3, opacity: f32);
    fn remove_primitive(&mut self, id: PrimitiveId);
    fn set_camera_transform(&mut self, position: Vec3, look_at: Vec3);
}

// Lets the controller and the animator each hold a clone of one shared scene.
impl<S: SceneHandle> SceneHandle for Rc<RefCell<S>> {
    fn create_point_primitive(
        &mut self,
        position: Vec3,
        color: [f32; 3],
        opacity: f32,
    ) -> PrimitiveId {
        self.borrow_mut()
            .create_point_primitive(position, color, opacity)
    }

    fn update_primitive(&mut self, id: PrimitiveId, position: Vec3, opacity: f32) {
        self.borrow_mut().update_primitive(id, position, opacity);
    }

    fn remove_primitive(&mut self, id: PrimitiveId) {
        self.borrow_mut().remove_primitive(id);
    }

    fn set_camera_transform(&mut self, position: Vec3, look_at: Vec3) {
        self.borrow_mut().set_camera_transform(position, look_at);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointPrimitive {
    pub position: Vec3,
    pub color: [f32; 3],
    pub opacity: f32,
}

/// Retained scene: live point primitives plus the current camera transform.
#[derive(Debug)]
pub struct PointScene {
    points: FnvHashMap<PrimitiveId, PointPrimitive>,
    next_id: u32,
    pub camera_eye: Vec3,
    pub camera_target: Vec3,
}

impl Default for PointScene {
    fn default() -> Self {
        Self {
            points: FnvHashMap::default(),
            next_id: 0,
            camera_eye: Vec3::new(0.0, 10.0, 20.0),
            camera_target: Vec3::ZERO,
        }
    }
}

impl PointScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&PointPrimitive> {
        self.points.get(&id)
    }

    /// Iterate live points in creation order so draws are stable frame to frame.
    pub fn points_sorted(&self) -> Vec<(PrimitiveId, PointPrimitive)> {
        let mut out: Vec<_> = self.points.iter().map(|(k, v)| (*k, *v)).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }
}

impl SceneHandle for PointScene {
    fn create_point_primitive(
        &mut self,
        position: Vec3,
        color: [f32; 3],
        opacity: f32,
    ) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.points.insert(
            id,
            PointPrimitive {
                position,
                color,
                opacity: opacity.clamp(0.0, 1.0),
            },
        );
        id
    }

    fn update_primitive(&mut self, id: PrimitiveId, position: Vec3, opacity: f32) {
        if let Some(p) = self.points.get_mut(&id) {
            p.position = position;
            p.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    fn remove_primitive(&mut self, id: PrimitiveId) {
        self.points.remove(&id);
    }

    fn set_camera_transform(&mut self, position: Vec3, look_at: Vec3) {
        self.camera_eye = position;
        self.camera_target = look_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_removal_is_idempotent() {
        let mut scene = PointScene::new();
        let a = scene.create_point_primitive(Vec3::ZERO, [1.0; 3], 1.0);
        let b = scene.create_point_primitive(Vec3::ONE, [1.0; 3], 0.5);
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);
        scene.remove_primitive(a);
        scene.remove_primitive(a);
        assert_eq!(scene.len(), 1);
        assert!(scene.get(a).is_none());
    }

    #[test]
    fn update_of_unknown_id_is_ignored() {
        let mut scene = PointScene::new();
        scene.update_primitive(PrimitiveId(99), Vec3::ONE, 0.3);
        assert!(scene.is_empty());
    }

    #[test]
    fn shared_handle_writes_through() {
        let shared = Rc::new(RefCell::new(PointScene::new()));
        let mut handle = shared.clone();
        let id = handle.create_point_primitive(Vec3::Y, [0.0; 3], 2.0);
        handle.set_camera_transform(Vec3::X, Vec3::ZERO);
        let scene = shared.borrow();
        assert_eq!(scene.get(id).map(|p| p.opacity), Some(1.0));
        assert_eq!(scene.camera_eye, Vec3::X);
    }
}
