//! Tinyverse Physics - Collision for the player capsule using rapier3d
//!
//! Nothing here is simulated. The world is a set of static colliders plus the
//! player's kinematic capsule, and all movement is resolved with shape casts
//! against the query pipeline.

mod character_controller;

pub use character_controller::{CharacterController, CharacterControllerConfig};

use glam::Vec3;
use rapier3d::prelude::*;

/// Static collision geometry and the query pipeline over it
pub struct PhysicsWorld {
    /// Always empty; rapier's query filters still take a body set
    bodies: RigidBodySet,
    colliders: ColliderSet,
    /// Only needed to satisfy `ColliderSet::remove`
    islands: IslandManager,
    queries: QueryPipeline,
}

impl PhysicsWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            islands: IslandManager::new(),
            queries: QueryPipeline::new(),
        }
    }

    /// Rebuild the query pipeline from the current collider positions
    ///
    /// Call once per frame, and after adding or moving geometry, so that shape
    /// casts see it.
    pub fn update_queries(&mut self) {
        self.queries.update(&self.colliders);
    }

    /// Add a collider with no parent body
    pub fn add_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.colliders.insert(collider)
    }

    /// Remove a collider; returns false if it was already gone
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> bool {
        self.colliders
            .remove(handle, &mut self.islands, &mut self.bodies, false)
            .is_some()
    }

    /// Get a collider by handle
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    /// Move a collider's center
    pub fn set_collider_translation(&mut self, handle: ColliderHandle, center: Vec3) {
        if let Some(collider) = self.colliders.get_mut(handle) {
            collider.set_translation(vector![center.x, center.y, center.z]);
        }
    }

    /// Create a static box collider centered on `position`
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.add_collider(collider)
    }

    /// Number of colliders, the player capsule included
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn bodies(&self) -> &RigidBodySet {
        &self.bodies
    }

    pub fn colliders(&self) -> &ColliderSet {
        &self.colliders
    }

    pub fn query_pipeline(&self) -> &QueryPipeline {
        &self.queries
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
