use axum::Router;
use axum::routing::get;

pub fn site_router() -> Router {
    Router::new()
        .route("/", get(empty))
        .route("/favicon.ico", get(empty))
        .route("/robots.txt", get(robots))
}

/// Empty 200 for the root page and favicon probes.
async fn empty() -> &'static str {
    ""
}

async fn robots() -> &'static str {
    "User agent: *\nDisallow: /"
}
