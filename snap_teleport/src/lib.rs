// Snap Teleport Movement System
//
// Resolves continuous two-handed thumbstick input into discrete "snap"
// teleports: input is classified into one of four cardinal directions,
// a horizontal ray is cast along that direction to find a teleport
// anchor, and a debounce timer rate-limits successful teleports so held
// input auto-repeats once per window instead of flooding requests.

pub mod cardinal;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod input;
pub mod physics;
pub mod raycast;
pub mod time;

pub use cardinal::{Cardinal, nearest_cardinal};
pub use config::SnapTeleportConfig;
pub use controller::{SnapTeleportController, TickOutcome};
pub use debounce::{DebounceGate, DebouncePhase, TeleportDebouncer};
pub use error::TeleportError;
pub use input::{Handedness, InputAggregator, InputReader};
pub use physics::PhysicsWorld;
pub use raycast::{
    DirectionalRaycaster, HeadPose, PoseSource, RayHit, RaycastQuery, SurfaceHandle,
    TeleportAnchor, TeleportLayers, TeleportWorld,
};
pub use time::Time;
