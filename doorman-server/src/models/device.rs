use serde::Deserialize;
use serde_json::Value;

/// The only device type surfaced by the status endpoints.
pub const GARAGE_OPENER: &str = "virtualgaragedooropener";

/// Projection of one vendor device. `state` carries the raw payload exactly
/// as the vendor reported it; the accessors below interpret it lazily.
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    pub name: String,
    pub device_type: String,
    #[serde(default)]
    pub state: Value,
}

impl Device {
    pub fn is_garage_opener(&self) -> bool {
        self.device_type == GARAGE_OPENER
    }

    /// Door position as reported by the vendor, `"unknown"` when the payload
    /// has no usable `door_state`.
    pub fn door_state(&self) -> &str {
        self.state
            .get("door_state")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    }

    /// Raw last-changed timestamp. A present `last_update` key wins over
    /// `updated_date` even when its value is empty; non-string values count
    /// as absent.
    pub fn last_changed(&self) -> Option<&str> {
        match self.state.get("last_update") {
            Some(value) => value.as_str(),
            None => self.state.get("updated_date").and_then(Value::as_str),
        }
    }
}
