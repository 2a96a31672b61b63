use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use time::OffsetDateTime;

use crate::errors::ApiError;
use crate::models::DeviceStatus;
use crate::services::{
    LockService, PasscodeService, VendorService, format_duration, parse_timestamp,
};

#[derive(Clone)]
pub struct StatusState {
    pub passcode_service: Arc<PasscodeService>,
    pub lock_service: Arc<LockService>,
    pub vendor_service: Arc<VendorService>,
}

pub fn status_router(state: StatusState) -> Router {
    Router::new()
        .route("/status", get(get_fleet_status))
        .route("/status/", get(get_fleet_status))
        .route("/status/:composite", get(get_device_status))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/status",
    tag = "status",
    responses(
        (status = 200, description = "State of every garage door opener, keyed by device name"),
        (status = 502, description = "Vendor cloud rejected the request")
    )
)]
pub async fn get_fleet_status(
    State(state): State<StatusState>,
) -> Result<Json<BTreeMap<String, DeviceStatus>>, ApiError> {
    build_status(&state, None).await
}

#[utoipa::path(
    get,
    path = "/status/{composite}",
    tag = "status",
    params(
        ("composite" = String, Path, description = "Device name plus passcode, `name:passcode`")
    ),
    responses(
        (status = 200, description = "State of the matching garage door opener", body = DeviceStatus),
        (status = 401, description = "Missing or wrong passcode"),
        (status = 502, description = "Vendor cloud rejected the request")
    )
)]
pub async fn get_device_status(
    State(state): State<StatusState>,
    Path(composite): Path<String>,
) -> Result<Json<BTreeMap<String, DeviceStatus>>, ApiError> {
    let name = state.passcode_service.authorize(Some(&composite))?;

    build_status(&state, name.as_deref()).await
}

async fn build_status(
    state: &StatusState,
    name_filter: Option<&str>,
) -> Result<Json<BTreeMap<String, DeviceStatus>>, ApiError> {
    let devices = state.vendor_service.list_devices(name_filter).await?;

    let mut payload = BTreeMap::new();
    for device in devices {
        if !device.is_garage_opener() {
            continue;
        }

        let last_changed = device.last_changed().map(str::to_string);
        let duration = device
            .last_changed()
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| match parse_timestamp(raw) {
                Ok(instant) => Some(format_duration(OffsetDateTime::now_utc() - instant)),
                Err(e) => {
                    tracing::warn!("Unparseable timestamp {:?} on {}: {}", raw, device.name, e);
                    None
                }
            });
        let locked = state.lock_service.is_locked(&device.name).await?;

        payload.insert(
            device.name.clone(),
            DeviceStatus {
                state: device.door_state().to_string(),
                last_changed,
                duration,
                locked,
            },
        );
    }

    Ok(Json(payload))
}
