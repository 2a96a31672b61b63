use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::errors::ApiError;
use crate::services::{LockService, PasscodeService, VendorService};

#[derive(Clone)]
pub struct ControlState {
    pub passcode_service: Arc<PasscodeService>,
    pub lock_service: Arc<LockService>,
    pub vendor_service: Arc<VendorService>,
}

pub fn control_router(state: ControlState) -> Router {
    Router::new()
        .route("/lockout/:composite", get(lockout_device))
        .route("/open/:composite", get(open_device))
        .route("/close/:composite", get(close_device))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/lockout/{composite}",
    tag = "control",
    params(
        ("composite" = String, Path, description = "Device name plus passcode, `name:passcode`")
    ),
    responses(
        (status = 302, description = "Lockout recorded, redirects to the device status"),
        (status = 401, description = "Missing or wrong passcode"),
        (status = 500, description = "Lock store unavailable")
    )
)]
pub async fn lockout_device(
    State(state): State<ControlState>,
    Path(composite): Path<String>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let name = state
        .passcode_service
        .authorize(Some(&composite))?
        .unwrap_or_default();

    state.lock_service.lock(&name).await?;

    tracing::info!("{} locked out; the next open/close lifts it", name);

    Ok(redirect_to_own_status(&uri))
}

#[utoipa::path(
    get,
    path = "/open/{composite}",
    tag = "control",
    params(
        ("composite" = String, Path, description = "Device name plus passcode, `name:passcode`")
    ),
    responses(
        (status = 302, description = "Door commanded (or lockout lifted), redirects to status"),
        (status = 401, description = "Missing or wrong passcode"),
        (status = 502, description = "Vendor cloud rejected the request")
    )
)]
pub async fn open_device(
    State(state): State<ControlState>,
    Path(composite): Path<String>,
    uri: Uri,
) -> Result<Response, ApiError> {
    actuate_device(&state, &composite, &uri, false).await
}

#[utoipa::path(
    get,
    path = "/close/{composite}",
    tag = "control",
    params(
        ("composite" = String, Path, description = "Device name plus passcode, `name:passcode`")
    ),
    responses(
        (status = 302, description = "Door commanded (or lockout lifted), redirects to status"),
        (status = 401, description = "Missing or wrong passcode"),
        (status = 502, description = "Vendor cloud rejected the request")
    )
)]
pub async fn close_device(
    State(state): State<ControlState>,
    Path(composite): Path<String>,
    uri: Uri,
) -> Result<Response, ApiError> {
    actuate_device(&state, &composite, &uri, true).await
}

async fn actuate_device(
    state: &ControlState,
    composite: &str,
    uri: &Uri,
    close: bool,
) -> Result<Response, ApiError> {
    let name = state
        .passcode_service
        .authorize(Some(composite))?
        .unwrap_or_default();
    let wanted = if close { "close" } else { "open" };

    let devices = state.vendor_service.list_devices(Some(&name)).await?;
    if devices.is_empty() {
        tracing::warn!("No device matches {:?}; nothing to {}", name, wanted);

        return Ok(redirect("/status/"));
    }

    // A lockout is a one-shot guard: the next actuation attempt lifts it
    // instead of moving the door.
    if state.lock_service.is_locked(&name).await? {
        state.lock_service.unlock(&name).await?;
        tracing::info!("{} was locked out; lifted the lockout instead", name);
    } else if state.vendor_service.set_device_state(&name, close).await? {
        tracing::info!("{} commanded to {}", name, wanted);
    }

    Ok(redirect_to_own_status(uri))
}

/// Redirect to the status view for the device this request named, reusing
/// the raw composite segment so the target is itself authorized and any
/// percent-encoding survives untouched.
fn redirect_to_own_status(uri: &Uri) -> Response {
    let segment = uri.path().rsplit('/').next().unwrap_or_default();

    redirect(&format!("/status/{segment}"))
}

fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
