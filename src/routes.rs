use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers::{favorites, people, planets, root, users};
use crate::state::AppState;

/// Every (method, path) the router serves; `GET /` publishes this list.
pub const ROUTES: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/health"),
    ("GET", "/user"),
    ("GET", "/users"),
    ("GET", "/users/:user_id/favorites"),
    ("POST", "/users/:user_id/favorite/planet/:planet_id"),
    ("DELETE", "/users/:user_id/favorite/planet/:planet_id"),
    ("POST", "/users/:user_id/favorite/people/:people_id"),
    ("DELETE", "/users/:user_id/favorite/people/:people_id"),
    ("POST", "/people"),
    ("PUT", "/people/:people_id"),
    ("DELETE", "/people/:people_id"),
    ("POST", "/planets"),
    ("PUT", "/planets/:planet_id"),
    ("DELETE", "/planets/:planet_id"),
];

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(root::sitemap))
        .route("/health", get(root::health))
        .route("/user", get(root::hello))
        .merge(user_routes())
        .merge(people_routes())
        .merge(planet_routes())
        .fallback(root::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list))
        .route("/users/:user_id/favorites", get(users::favorites))
        .route(
            "/users/:user_id/favorite/planet/:planet_id",
            post(favorites::add_planet).delete(favorites::remove_planet),
        )
        .route(
            "/users/:user_id/favorite/people/:people_id",
            post(favorites::add_people).delete(favorites::remove_people),
        )
}

fn people_routes() -> Router<AppState> {
    Router::new()
        .route("/people", post(people::create))
        .route("/people/:people_id", axum::routing::put(people::update).delete(people::delete))
}

fn planet_routes() -> Router<AppState> {
    Router::new()
        .route("/planets", post(planets::create))
        .route("/planets/:planet_id", axum::routing::put(planets::update).delete(planets::delete))
}
