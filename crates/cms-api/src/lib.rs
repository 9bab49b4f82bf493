//! # CMS API
//! 
//! HTTP handlers, identity middleware and the response envelope.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod state;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use handlers::{health, menu_items, menu_order, navigation};
use state::AppState;

/// All routes, with the requesting actor resolved before any handler runs.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/menu-items", get(menu_items::list).post(menu_items::create))
        .route("/menu-items/update-order", post(menu_order::update_order))
        .route("/menu-items/{id}", put(menu_items::update).delete(menu_items::delete))
        .route("/navigation", get(navigation::menu_context))
        .layer(from_fn_with_state(state.clone(), middleware::actor::resolve_actor))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
