// Rapier-backed implementation of the teleport world query surface.
//
// The controller itself only depends on the `TeleportWorld` trait; this
// module is the concrete scene representation used by the runtimes and
// integration tests: a static collider set, a query pipeline for ray
// casts, and a registry associating collider handles with teleport
// anchors.

pub mod util;

use std::collections::HashMap;

use rapier3d::prelude::*;
use tracing::trace;

use crate::raycast::{
    RayHit, RaycastQuery, SurfaceHandle, TeleportAnchor, TeleportLayers, TeleportWorld,
};
use self::util::{npoint_to_point, point_to_npoint, vec_to_nvec};

fn surface_handle(handle: ColliderHandle) -> SurfaceHandle {
    let (index, generation) = handle.into_raw_parts();
    SurfaceHandle(((generation as u64) << 32) | index as u64)
}

/// Collision groups for a surface that lives on the given teleport
/// layers and blocks rays from any group.
pub fn surface_groups(layers: TeleportLayers) -> InteractionGroups {
    InteractionGroups::new(Group::from_bits_truncate(layers.bits()), Group::ALL)
}

/// Static collision scene with per-surface anchor associations.
pub struct PhysicsWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    query_pipeline: QueryPipeline,
    anchors: HashMap<SurfaceHandle, Box<dyn TeleportAnchor>>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        PhysicsWorld {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
            anchors: HashMap::new(),
        }
    }

    /// Insert a blocking surface with no teleport destination (walls,
    /// terrain). Rays stop on it; target resolution yields nothing.
    pub fn add_surface(&mut self, collider: Collider) -> SurfaceHandle {
        surface_handle(self.colliders.insert(collider))
    }

    /// Insert a surface that doubles as a teleport destination.
    pub fn add_anchor(
        &mut self,
        collider: Collider,
        anchor: Box<dyn TeleportAnchor>,
    ) -> SurfaceHandle {
        let surface = surface_handle(self.colliders.insert(collider));
        self.anchors.insert(surface, anchor);
        surface
    }

    /// Rebuild the query acceleration structure. Call once after the
    /// scene is assembled (and again after any later mutation).
    pub fn refresh(&mut self) {
        self.query_pipeline.update(&self.bodies, &self.colliders);
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TeleportWorld for PhysicsWorld {
    fn cast_ray(&self, query: &RaycastQuery) -> Option<RayHit> {
        let ray = Ray::new(
            point_to_npoint(query.origin),
            vec_to_nvec(query.direction),
        );
        let filter = QueryFilter::new().groups(InteractionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(query.filter.bits()),
        ));

        let (handle, toi) = self.query_pipeline.cast_ray(
            &self.bodies,
            &self.colliders,
            &ray,
            query.max_distance,
            true,
            filter,
        )?;

        trace!(
            hit_point = ?npoint_to_point(ray.point_at(toi)),
            distance = toi,
            "ray hit collider"
        );

        Some(RayHit {
            surface: surface_handle(handle),
            distance: toi,
        })
    }

    fn resolve_anchor(&self, surface: SurfaceHandle) -> Option<&dyn TeleportAnchor> {
        self.anchors.get(&surface).map(|anchor| anchor.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point3, point3, vec3};
    use std::cell::Cell;

    struct PadAnchor {
        destination: Point3<f32>,
        requests: Cell<usize>,
    }

    impl TeleportAnchor for PadAnchor {
        fn position(&self) -> Point3<f32> {
            self.destination
        }

        fn request_teleport(&self) {
            self.requests.set(self.requests.get() + 1);
        }
    }

    fn pad(destination: Point3<f32>) -> Box<PadAnchor> {
        Box::new(PadAnchor {
            destination,
            requests: Cell::new(0),
        })
    }

    fn wall(x: f32, y: f32, z: f32, layers: TeleportLayers) -> Collider {
        ColliderBuilder::cuboid(0.5, 2.0, 0.5)
            .translation(vector![x, y, z])
            .collision_groups(surface_groups(layers))
            .build()
    }

    fn query(direction: cgmath::Vector3<f32>, filter: TeleportLayers) -> RaycastQuery {
        RaycastQuery {
            origin: point3(0.0, 1.6, 0.0),
            direction,
            max_distance: 15.0,
            filter,
        }
    }

    #[test]
    fn test_ray_hits_anchored_surface() {
        let mut world = PhysicsWorld::new();
        let surface = world.add_anchor(
            wall(0.0, 1.6, -5.0, TeleportLayers::ANCHOR),
            pad(point3(0.0, 0.0, -5.0)),
        );
        world.refresh();

        let hit = world
            .cast_ray(&query(vec3(0.0, 0.0, -1.0), TeleportLayers::all()))
            .unwrap();
        assert_eq!(hit.surface, surface);
        assert!((hit.distance - 4.5).abs() < 1e-3);

        let anchor = world.resolve_anchor(hit.surface).unwrap();
        assert_eq!(anchor.position(), point3(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_plain_surface_has_no_anchor() {
        let mut world = PhysicsWorld::new();
        let surface = world.add_surface(wall(0.0, 1.6, -5.0, TeleportLayers::TERRAIN));
        world.refresh();

        let hit = world
            .cast_ray(&query(vec3(0.0, 0.0, -1.0), TeleportLayers::all()))
            .unwrap();
        assert_eq!(hit.surface, surface);
        assert!(world.resolve_anchor(hit.surface).is_none());
    }

    #[test]
    fn test_layer_filter_excludes_surfaces() {
        let mut world = PhysicsWorld::new();
        world.add_surface(wall(0.0, 1.6, -5.0, TeleportLayers::PROP));
        world.refresh();

        let hit = world.cast_ray(&query(vec3(0.0, 0.0, -1.0), TeleportLayers::ANCHOR));
        assert!(hit.is_none());
    }

    #[test]
    fn test_nearest_surface_wins() {
        let mut world = PhysicsWorld::new();
        world.add_surface(wall(0.0, 1.6, -8.0, TeleportLayers::TERRAIN));
        let near = world.add_anchor(
            wall(0.0, 1.6, -4.0, TeleportLayers::ANCHOR),
            pad(point3(0.0, 0.0, -4.0)),
        );
        world.refresh();

        let hit = world
            .cast_ray(&query(vec3(0.0, 0.0, -1.0), TeleportLayers::all()))
            .unwrap();
        assert_eq!(hit.surface, near);
    }

    #[test]
    fn test_max_distance_limits_the_ray() {
        let mut world = PhysicsWorld::new();
        world.add_anchor(
            wall(0.0, 1.6, -20.0, TeleportLayers::ANCHOR),
            pad(point3(0.0, 0.0, -20.0)),
        );
        world.refresh();

        let hit = world.cast_ray(&query(vec3(0.0, 0.0, -1.0), TeleportLayers::all()));
        assert!(hit.is_none());
    }
}
