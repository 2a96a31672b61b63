use std::sync::Mutex;

use rand::Rng;
use serde_json::{Value, json};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::settings::Settings;

/// An actuation command accepted by the simulated cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorAction {
    Open,
    Close,
}

impl DoorAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "open" => Some(DoorAction::Open),
            "close" => Some(DoorAction::Close),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DoorAction::Open => "open",
            DoorAction::Close => "close",
        }
    }

    fn resulting_state(self) -> &'static str {
        match self {
            DoorAction::Open => "open",
            DoorAction::Close => "closed",
        }
    }
}

/// One commanded actuation, kept so callers can audit what the cloud was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub device: String,
    pub action: DoorAction,
}

#[derive(Debug, Clone)]
pub struct SimDevice {
    pub name: String,
    pub device_type: String,
    pub door_state: String,
    pub last_update: Option<OffsetDateTime>,
}

impl SimDevice {
    fn to_wire(&self) -> Value {
        let mut state = json!({ "door_state": self.door_state });
        if let Some(instant) = self.last_update {
            state["last_update"] = Value::String(format_timestamp(instant));
        }

        json!({
            "name": self.name,
            "device_type": self.device_type,
            "state": state,
        })
    }
}

/// Render an instant the way the vendor cloud does: fractional seconds, trailing `Z`.
pub fn format_timestamp(instant: OffsetDateTime) -> String {
    instant
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
        ))
        .unwrap_or_default()
}

/// In-memory stand-in for the vendor cloud: credentials, session tokens,
/// a device registry and the history of actuations it was asked to perform.
pub struct VendorSim {
    username: String,
    password: String,
    tokens: Mutex<Vec<String>>,
    devices: Mutex<Vec<SimDevice>>,
    actions: Mutex<Vec<ActionRecord>>,
}

impl VendorSim {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            tokens: Mutex::new(Vec::new()),
            devices: Mutex::new(Vec::new()),
            actions: Mutex::new(Vec::new()),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let sim = Self::new(&settings.vendor.username, &settings.vendor.password);

        for seed in &settings.device {
            sim.push_device(SimDevice {
                name: seed.name.clone(),
                device_type: seed.device_type.clone(),
                door_state: seed.state.clone(),
                last_update: Some(OffsetDateTime::now_utc()),
            });
        }

        sim
    }

    pub fn with_device(self, device: SimDevice) -> Self {
        self.push_device(device);
        self
    }

    pub fn push_device(&self, device: SimDevice) {
        self.devices.lock().unwrap().push(device);
    }

    /// Issue a fresh session token when the credentials match.
    pub fn login(&self, username: &str, password: &str) -> Option<String> {
        if username != self.username || password != self.password {
            return None;
        }

        let token = format!("{:032x}", rand::rng().random::<u128>());
        self.tokens.lock().unwrap().push(token.clone());

        Some(token)
    }

    pub fn verify_token(&self, token: &str) -> bool {
        self.tokens.lock().unwrap().iter().any(|t| t == token)
    }

    pub fn devices_wire(&self) -> Vec<Value> {
        self.devices
            .lock()
            .unwrap()
            .iter()
            .map(SimDevice::to_wire)
            .collect()
    }

    /// Apply an actuation to the named device (case-insensitive), recording it.
    /// Returns false when no such device exists.
    pub fn actuate(&self, name: &str, action: DoorAction) -> bool {
        let mut devices = self.devices.lock().unwrap();
        let Some(device) = devices
            .iter_mut()
            .find(|d| d.name.to_lowercase() == name.to_lowercase())
        else {
            return false;
        };

        device.door_state = action.resulting_state().to_string();
        device.last_update = Some(OffsetDateTime::now_utc());
        self.actions.lock().unwrap().push(ActionRecord {
            device: device.name.clone(),
            action,
        });

        true
    }

    pub fn actions(&self) -> Vec<ActionRecord> {
        self.actions.lock().unwrap().clone()
    }
}
