use std::time::Duration;

use tracing::debug;

/// Phase of the teleport rate limiter. `Cooling` carries its activation
/// time so the phase can never exist without one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebouncePhase {
    Idle,
    Cooling { activated_at: Duration },
}

/// Whether the current tick may attempt a teleport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebounceGate {
    Ready,
    Blocked,
}

/// Two-state timer gating how often a teleport may fire.
///
/// Only successful teleports arm the timer; failed probes leave it idle
/// so held input retries every tick.
#[derive(Clone, Copy, Debug)]
pub struct TeleportDebouncer {
    phase: DebouncePhase,
}

impl TeleportDebouncer {
    pub fn new() -> Self {
        TeleportDebouncer {
            phase: DebouncePhase::Idle,
        }
    }

    pub fn phase(&self) -> DebouncePhase {
        self.phase
    }

    /// Evaluate the gate for this tick. A cooling timer whose window has
    /// elapsed flips back to `Idle` and reports `Ready`, so the same
    /// tick that exits cooldown is free to attempt a new teleport.
    pub fn poll(&mut self, now: Duration, window: Duration) -> DebounceGate {
        match self.phase {
            DebouncePhase::Idle => DebounceGate::Ready,
            DebouncePhase::Cooling { activated_at } => {
                let elapsed = now.saturating_sub(activated_at);
                if elapsed < window {
                    DebounceGate::Blocked
                } else {
                    debug!(?elapsed, "debounce window elapsed, back to idle");
                    self.phase = DebouncePhase::Idle;
                    DebounceGate::Ready
                }
            }
        }
    }

    /// Start a cooldown window at `now`. Called exactly once per
    /// successful teleport.
    pub fn arm(&mut self, now: Duration) {
        self.phase = DebouncePhase::Cooling { activated_at: now };
    }
}

impl Default for TeleportDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
