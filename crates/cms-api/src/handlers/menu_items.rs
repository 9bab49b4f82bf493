// ============================================================================
// CMS API - Menu Item Handlers
// File: crates/cms-api/src/handlers/menu_items.rs
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use cms_core::services::{MenuNodeChanges, NewMenuNode};
use cms_core::{Actor, MenuNode};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /menu-items
pub async fn list(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ApiResponse<Vec<MenuNode>>>, ApiError> {
    if !actor.may_manage_menu() {
        return Err(ApiError::Forbidden(format!(
            "{} may not change menu items",
            actor.username
        )));
    }
    let nodes = state.menus.list_editable(&actor).await?;
    Ok(Json(ApiResponse::success(nodes)))
}

/// POST /menu-items
pub async fn create(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<NewMenuNode>,
) -> Result<(StatusCode, Json<ApiResponse<MenuNode>>), ApiError> {
    let node = state.menus.create(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(node))))
}

/// PUT /menu-items/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MenuNodeChanges>,
) -> Result<Json<ApiResponse<MenuNode>>, ApiError> {
    let node = state.menus.update(&actor, &id, payload).await?;
    Ok(Json(ApiResponse::success(node)))
}

/// DELETE /menu-items/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.menus.delete(&actor, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
