use std::rc::Rc;

use cgmath::vec2;
use tracing::{debug, info};

use crate::cardinal::{Cardinal, nearest_cardinal};
use crate::config::SnapTeleportConfig;
use crate::debounce::{DebounceGate, DebouncePhase, TeleportDebouncer};
use crate::error::TeleportError;
use crate::input::InputAggregator;
use crate::raycast::{DirectionalRaycaster, PoseSource, TeleportAnchor, TeleportWorld};
use crate::time::Time;

/// What a single tick of the controller did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Debounce window still open; nothing was evaluated.
    CoolingDown,
    /// Combined input was the zero vector.
    NoInput,
    /// Directional input held but no destination resolved; the next
    /// tick retries immediately.
    NoTarget { cardinal: Cardinal },
    /// A teleport request was issued and a cooldown window started.
    Teleported { cardinal: Cardinal },
}

/// Orchestrates input aggregation, cardinal classification, the target
/// raycast and the teleport debounce, once per simulation tick.
///
/// The host loop owns the cadence: it calls `initialize` once,
/// `tick(&Time)` every simulation step, and `shutdown` when done.
pub struct SnapTeleportController {
    config: SnapTeleportConfig,
    input: InputAggregator,
    pose: Rc<dyn PoseSource>,
    world: Rc<dyn TeleportWorld>,
    debouncer: TeleportDebouncer,
}

impl SnapTeleportController {
    pub fn new(
        config: SnapTeleportConfig,
        input: InputAggregator,
        pose: Rc<dyn PoseSource>,
        world: Rc<dyn TeleportWorld>,
    ) -> Self {
        SnapTeleportController {
            config,
            input,
            pose,
            world,
            debouncer: TeleportDebouncer::new(),
        }
    }

    /// Acquire the hand input readers. Must succeed before the first
    /// tick; a controller never runs with partial inputs.
    pub fn initialize(&mut self) -> Result<(), TeleportError> {
        self.input.enable()?;
        debug!("snap teleport controller initialized");
        Ok(())
    }

    /// Release the hand input readers.
    pub fn shutdown(&mut self) {
        self.input.disable();
        debug!("snap teleport controller shut down");
    }

    pub fn config(&self) -> &SnapTeleportConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SnapTeleportConfig) {
        self.config = config;
    }

    pub fn debounce_phase(&self) -> DebouncePhase {
        self.debouncer.phase()
    }

    /// Evaluate one simulation tick.
    pub fn tick(&mut self, time: &Time) -> TickOutcome {
        // A still-open cooldown skips the whole tick: no input read, no
        // raycast. A window that has just elapsed falls through and may
        // teleport again on this same tick.
        match self
            .debouncer
            .poll(time.total, self.config.debounce_window)
        {
            DebounceGate::Blocked => return TickOutcome::CoolingDown,
            DebounceGate::Ready => {}
        }

        let movement = self.input.read_combined();
        if movement == vec2(0.0, 0.0) {
            return TickOutcome::NoInput;
        }

        let cardinal = nearest_cardinal(movement);
        let pose = self.pose.head_pose();

        match DirectionalRaycaster::find_target(cardinal, &pose, &self.config, self.world.as_ref())
        {
            Some(anchor) => {
                // Arm first so exactly one request fires per window even
                // if the executor re-enters the host loop.
                self.debouncer.arm(time.total);
                info!(?cardinal, destination = ?anchor.position(), "teleport requested");
                anchor.request_teleport();
                TickOutcome::Teleported { cardinal }
            }
            // No cooldown on a failed probe; held input retries next tick.
            None => TickOutcome::NoTarget { cardinal },
        }
    }

    /// Narrow target-computation capability for collaborators that only
    /// want to know where held input currently points, without touching
    /// the debounce state or issuing a request.
    pub fn compute_target(&self) -> Option<&dyn TeleportAnchor> {
        let movement = self.input.read_combined();
        if movement == vec2(0.0, 0.0) {
            return None;
        }
        let cardinal = nearest_cardinal(movement);
        let pose = self.pose.head_pose();
        DirectionalRaycaster::find_target(cardinal, &pose, &self.config, self.world.as_ref())
    }
}
