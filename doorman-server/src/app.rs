use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::configs::Settings;
use crate::handles::{ControlState, StatusState, control_router, site_router, status_router};
use crate::services::{LockService, PasscodeService, VendorService};

pub fn create_app(settings: &Arc<Settings>) -> Router {
    let passcode_service = Arc::new(PasscodeService::new(settings.auth.clone()));
    let lock_service = Arc::new(LockService::new(settings.store.clone()));
    let vendor_service = Arc::new(VendorService::new(settings.vendor.clone()));

    let site = site_router();

    let status = status_router(StatusState {
        passcode_service: passcode_service.clone(),
        lock_service: lock_service.clone(),
        vendor_service: vendor_service.clone(),
    });

    let control = control_router(ControlState {
        passcode_service,
        lock_service,
        vendor_service,
    });

    Router::new()
        .merge(site)
        .merge(status)
        .merge(control)
        .layer(TraceLayer::new_for_http())
}
