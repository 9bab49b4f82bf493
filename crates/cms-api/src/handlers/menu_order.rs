// ============================================================================
// CMS API - Menu Order Handler
// File: crates/cms-api/src/handlers/menu_order.rs
// ============================================================================
//! Drag-and-drop save of the whole menu arrangement.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use cms_core::{Actor, DesiredOrderEntry, ReorderOutcome};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

pub const MAIN_MENU_EMPTY: &str = "The main menu must contain at least one item.";
pub const FOOTER_EMPTY: &str = "The footer must contain at least one item.";

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub main_menu_items: Vec<DesiredOrderEntry>,
    #[serde(default)]
    pub footer_items: Vec<DesiredOrderEntry>,
}

/// Validation problems come back as `messages` on a 200; a forest that was
/// rejected or not processed has no outcome.
#[derive(Debug, Default, Serialize)]
pub struct UpdateOrderResponse {
    pub messages: Vec<String>,
    pub main_menu: Option<ReorderOutcome>,
    pub footer: Option<ReorderOutcome>,
}

/// POST /menu-items/update-order
pub async fn update_order(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<ApiResponse<UpdateOrderResponse>>, ApiError> {
    if !actor.may_manage_menu() {
        return Err(ApiError::Forbidden(format!(
            "{} may not change menu items",
            actor.username
        )));
    }

    let mut response = UpdateOrderResponse::default();

    if actor.is_superuser {
        if payload.main_menu_items.is_empty() {
            warn!("Rejected empty main menu from {}", actor.username);
            response.messages.push(MAIN_MENU_EMPTY.to_string());
        } else {
            response.main_menu = Some(
                state
                    .reorder
                    .reorder_main_menu(&payload.main_menu_items, &actor)
                    .await?,
            );
        }

        if payload.footer_items.is_empty() {
            warn!("Rejected empty footer from {}", actor.username);
            response.messages.push(FOOTER_EMPTY.to_string());
        } else {
            response.footer = Some(state.reorder.reorder_footer(&payload.footer_items, &actor).await?);
        }
    } else {
        // members cannot touch the footer; whatever they sent is dropped
        response.main_menu = Some(
            state
                .reorder
                .reorder_main_menu(&payload.main_menu_items, &actor)
                .await?,
        );
    }

    info!(
        "Menu order saved by {} ({} messages)",
        actor.username,
        response.messages.len()
    );
    Ok(Json(ApiResponse::success(response)))
}
