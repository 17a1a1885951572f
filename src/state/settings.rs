use serde::{Deserialize, Serialize};

use crate::util::{load_json, save_json};

pub const SETTINGS_KEY: &str = "bm_settings";
pub const MIN_TICK_MS: u32 = 50;
pub const MAX_TICK_MS: u32 = 2000;

/// Player preferences kept in localStorage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Delay between two replayed actions.
    pub tick_ms: u32,
    pub show_scan_pulse: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { tick_ms: 500, show_scan_pulse: true }
    }
}

impl Settings {
    pub fn load() -> Self {
        load_json::<Settings>(SETTINGS_KEY).unwrap_or_default().sanitized()
    }

    pub fn save(&self) {
        save_json(SETTINGS_KEY, self);
    }

    pub fn sanitized(self) -> Self {
        Self { tick_ms: self.tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS), ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"tick_ms": 5}"#).unwrap();
        assert!(s.show_scan_pulse);
        assert_eq!(s.sanitized().tick_ms, MIN_TICK_MS);
    }
}
