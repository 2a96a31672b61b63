use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

use crate::settings::Settings;
use crate::sim::{DoorAction, VendorSim};

pub mod settings;
pub mod sim;

#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct ActionForm {
    action: String,
}

pub fn create_app(sim: Arc<VendorSim>) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/devices", get(list_devices))
        .route("/api/devices/:name/actions", put(run_action))
        .with_state(sim)
}

pub async fn run(settings: &Arc<Settings>) {
    let sim = Arc::new(VendorSim::from_settings(settings));

    let app = create_app(sim);

    let ip_addr = settings.server.host.parse::<IpAddr>().unwrap();

    let address = SocketAddr::from((ip_addr, settings.server.port));

    let listener = TcpListener::bind(&address).await.unwrap();

    tracing::info!("simulated vendor cloud listening on {:?}", address);

    axum::serve(listener, app).await.unwrap();
}

async fn login(State(sim): State<Arc<VendorSim>>, Json(form): Json<LoginForm>) -> Response {
    match sim.login(&form.username, &form.password) {
        Some(token) => {
            tracing::debug!("issued token for {}", form.username);

            Json(json!({ "security_token": token })).into_response()
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "The username/password combination is not valid" })),
        )
            .into_response(),
    }
}

async fn list_devices(State(sim): State<Arc<VendorSim>>, headers: HeaderMap) -> Response {
    if !token_accepted(&sim, &headers) {
        return invalid_token();
    }

    Json(json!({ "devices": sim.devices_wire() })).into_response()
}

async fn run_action(
    State(sim): State<Arc<VendorSim>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(form): Json<ActionForm>,
) -> Response {
    if !token_accepted(&sim, &headers) {
        return invalid_token();
    }

    let Some(action) = DoorAction::parse(&form.action) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Unsupported action: {}", form.action) })),
        )
            .into_response();
    };

    if sim.actuate(&name, action) {
        tracing::info!("{} commanded to {}", name, action.as_str());

        Json(json!({ "message": "ok" })).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Device not found" })),
        )
            .into_response()
    }
}

fn token_accepted(sim: &VendorSim, headers: &HeaderMap) -> bool {
    headers
        .get("SecurityToken")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|token| sim.verify_token(token))
}

fn invalid_token() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Missing or invalid security token" })),
    )
        .into_response()
}
