use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::raycast::TeleportLayers;

/// Configuration for the snap teleport controller
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapTeleportConfig {
    /// Maximum raycast distance for a teleport target, in world units.
    pub max_teleport_distance: f32,
    /// Minimum time between two successful teleports.
    pub debounce_window: Duration,
    /// Controls whether left & right strafing is enabled.
    pub strafing_enabled: bool,
    /// Restricts which surfaces are eligible for the target raycast.
    #[serde(skip)]
    pub collision_filter: TeleportLayers,
}

impl Default for SnapTeleportConfig {
    fn default() -> Self {
        SnapTeleportConfig {
            max_teleport_distance: 15.0,
            debounce_window: Duration::from_millis(500),
            strafing_enabled: true,
            collision_filter: TeleportLayers::all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_tuning() {
        let config = SnapTeleportConfig::default();
        assert_eq!(config.max_teleport_distance, 15.0);
        assert_eq!(config.debounce_window, Duration::from_millis(500));
        assert!(config.strafing_enabled);
        assert_eq!(config.collision_filter, TeleportLayers::all());
    }

    #[test]
    fn test_partial_config_file_falls_back_to_defaults() {
        let parsed: SnapTeleportConfig =
            serde_json::from_str(r#"{ "strafing_enabled": false }"#).unwrap();
        assert!(!parsed.strafing_enabled);
        assert_eq!(parsed.max_teleport_distance, 15.0);
        assert_eq!(parsed.collision_filter, TeleportLayers::all());
    }
}
