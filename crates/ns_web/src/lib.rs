use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod charts;
pub mod error;
pub mod handlers;
pub mod search;
pub mod session;
pub mod state;
pub mod views;

pub use error::WebError;
pub use state::{AppState, WebSettings};

/// Build the router. Account routes are only mounted when the state carries
/// an account store.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();
    let static_files = ServeDir::new(&state.settings.static_dir);
    let auth_enabled = state.requires_login();

    let mut router = Router::new()
        .route("/", get(handlers::index).post(handlers::index))
        .route("/api/search", get(handlers::api_search));

    if auth_enabled {
        router = router
            .route("/register", get(handlers::register_page).post(handlers::register))
            .route("/login", get(handlers::login_page).post(handlers::login))
            .route("/logout", get(handlers::logout));
    }

    router
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{create_app, AppState, WebSettings};
    pub use ns_core::{Error, Result};
}
