//! Resolves the acting user for every request

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use cms_core::Actor;
use cms_shared::constants::ACTOR_ID_HEADER;

use crate::error::ApiError;
use crate::state::AppState;

/// Puts the [`Actor`] behind `x-actor-id` into the request extensions.
/// Requests without the header run as the anonymous actor.
pub async fn resolve_actor(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let actor = match request.headers().get(ACTOR_ID_HEADER) {
        None => Actor::anonymous(),
        Some(value) => {
            let id = value
                .to_str()
                .ok()
                .and_then(|v| Uuid::parse_str(v.trim()).ok())
                .ok_or_else(|| ApiError::Unauthorized("malformed actor id".to_string()))?;
            state
                .actors
                .find_by_id(&id)
                .await?
                .ok_or_else(|| ApiError::Unauthorized(format!("unknown actor {}", id)))?
        }
    };

    debug!("Request by {}", actor.username);
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}
