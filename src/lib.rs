// src/lib.rs

use axum::{middleware as axum_middleware, routing::get, Router};

pub mod common;
pub mod config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use crate::config::{AppState, Config};
use crate::middleware::auth::auth_guard;

/// Monta o Router completo da aplicação.
pub fn build_router(app_state: AppState) -> Router {
    // Rotas do menu (protegidas pelo middleware)
    let menu_routes = Router::new()
        .route("/", get(handlers::menu::get_menu))
        .route("/preview", get(handlers::menu::preview_menu))
        .route("/resources", get(handlers::menu::list_resources))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/menu", menu_routes)
        .nest("/api/users", user_routes)
        .with_state(app_state)
}
