use serde::{Deserialize, Serialize};

/// On-disk value of one lockout entry: `{ "locked": <bool> }`. An entry
/// whose flag is missing reads as unlocked rather than failing the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEntry {
    #[serde(default)]
    pub locked: bool,
}
