use bitflags::bitflags;
use cgmath::{InnerSpace, Point3, Quaternion, Vector3, vec3};
use tracing::trace;

use crate::cardinal::Cardinal;
use crate::config::SnapTeleportConfig;

bitflags! {
    /// Layer mask restricting which surfaces the target raycast may hit.
    pub struct TeleportLayers: u32 {
        const TERRAIN = 1 << 0;
        const ANCHOR = 1 << 1;
        const PROP = 1 << 2;
    }
}

impl Default for TeleportLayers {
    fn default() -> Self {
        TeleportLayers::all()
    }
}

/// Head/camera pose sampled once per tick.
#[derive(Clone, Copy, Debug)]
pub struct HeadPose {
    pub position: Point3<f32>,
    pub rotation: Quaternion<f32>,
}

/// Per-tick source of the current head pose.
pub trait PoseSource {
    fn head_pose(&self) -> HeadPose;
}

/// A single immutable ray query against the world.
#[derive(Clone, Copy, Debug)]
pub struct RaycastQuery {
    pub origin: Point3<f32>,
    /// Unit direction of travel.
    pub direction: Vector3<f32>,
    pub max_distance: f32,
    pub filter: TeleportLayers,
}

/// Opaque identity of a surface reported by a ray hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// First blocking surface along a query ray.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub surface: SurfaceHandle,
    pub distance: f32,
}

/// A designated valid destination in the environment.
///
/// Anchors are owned by the world; the controller only borrows one for
/// the duration of a single tick. `request_teleport` hands the actual
/// move off to whatever executes locomotion and is fire-and-forget
/// from this crate's perspective.
pub trait TeleportAnchor {
    fn position(&self) -> Point3<f32>;
    fn request_teleport(&self);
}

/// Read-only query surface the controller needs from the scene: a ray
/// cast plus a surface-to-anchor lookup (a surface may carry no anchor).
pub trait TeleportWorld {
    fn cast_ray(&self, query: &RaycastQuery) -> Option<RayHit>;
    fn resolve_anchor(&self, surface: SurfaceHandle) -> Option<&dyn TeleportAnchor>;
}

/// Horizontal forward/right basis derived from the head rotation.
///
/// Vertical components are zeroed and the vectors renormalized so the
/// target ray travels strictly horizontally regardless of head pitch or
/// roll. Looking straight up or down collapses the basis; that yields
/// `None` and the tick simply resolves no target.
pub fn horizontal_basis(rotation: Quaternion<f32>) -> Option<(Vector3<f32>, Vector3<f32>)> {
    let mut forward = rotation * vec3(0.0, 0.0, -1.0);
    forward.y = 0.0;
    let mut right = rotation * vec3(1.0, 0.0, 0.0);
    right.y = 0.0;

    const MIN_LENGTH2: f32 = 1e-6;
    if forward.magnitude2() < MIN_LENGTH2 || right.magnitude2() < MIN_LENGTH2 {
        return None;
    }

    Some((forward.normalize(), right.normalize()))
}

/// Resolves a classified cardinal to a teleport destination by casting
/// a single horizontal ray from the player origin.
pub struct DirectionalRaycaster;

impl DirectionalRaycaster {
    pub fn find_target<'w>(
        cardinal: Cardinal,
        pose: &HeadPose,
        config: &SnapTeleportConfig,
        world: &'w dyn TeleportWorld,
    ) -> Option<&'w dyn TeleportAnchor> {
        let (forward, right) = horizontal_basis(pose.rotation)?;

        let direction = match cardinal {
            Cardinal::None => return None,
            Cardinal::North => forward,
            Cardinal::South => -forward,
            Cardinal::East if config.strafing_enabled => right,
            Cardinal::West if config.strafing_enabled => -right,
            // Strafing disabled: lateral input issues no query at all.
            Cardinal::East | Cardinal::West => return None,
        };

        let query = RaycastQuery {
            origin: pose.position,
            direction,
            max_distance: config.max_teleport_distance,
            filter: config.collision_filter,
        };

        let hit = world.cast_ray(&query)?;
        trace!(
            ?cardinal,
            distance = hit.distance,
            "teleport ray hit surface {:?}",
            hit.surface
        );

        // A surface with no anchor association is a valid "no
        // destination here" outcome, not an error.
        world.resolve_anchor(hit.surface)
    }
}
