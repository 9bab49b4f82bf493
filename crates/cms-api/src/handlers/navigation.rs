//! Navigation context for page rendering

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use cms_core::{Actor, CurrentRoute, MenuContext};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// `route` is the resolved view name of the page being rendered; `slug`
/// is the document slug for document pages.
#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    pub route: Option<String>,
    pub slug: Option<String>,
}

/// GET /navigation
pub async fn menu_context(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<NavigationQuery>,
) -> Result<Json<ApiResponse<MenuContext>>, ApiError> {
    let route = query.route.filter(|r| !r.is_empty()).map(|view_name| {
        let route = CurrentRoute::new(view_name);
        match query.slug {
            Some(slug) => route.with_kwarg(state.navigation.slug_param(), slug),
            None => route,
        }
    });

    let context = state.navigation.menu_context(&actor, route.as_ref()).await?;
    Ok(Json(ApiResponse::success(context)))
}
