use serde::Serialize;
use utoipa::ToSchema;

/// One device's row in the status payload. `last_changed` echoes the raw
/// vendor timestamp; `duration` is present only when that timestamp parsed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeviceStatus {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_changed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub locked: bool,
}
