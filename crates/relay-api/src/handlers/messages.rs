//! Message handlers
//!
//! The whole relay surface hangs off a single /messages route: GET lists,
//! POST appends, PATCH bumps a reaction counter addressed via the query
//! string.

use axum::{
    extract::{Query, State},
    Json,
};
use relay_service::{ListRequest, MessageResponse, PostMessageRequest, RelayService};

use crate::extractors::{ClientIp, ReactionParams};
use crate::response::{ApiError, ApiResult, NoContent};
use crate::state::AppState;

/// List messages
///
/// GET /messages?limit&offset&q&author
pub async fn list_messages(
    State(state): State<AppState>,
    Query(request): Query<ListRequest>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let service = RelayService::new(state.service_context());
    let messages = service.list(request).await?;
    Ok(Json(messages))
}

/// Post a message
///
/// POST /messages
pub async fn post_message(
    State(state): State<AppState>,
    client_ip: ClientIp,
    Json(request): Json<PostMessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = RelayService::new(state.service_context());
    let response = service.post(client_ip.key(), request).await?;
    Ok(Json(response))
}

/// Increment a reaction counter
///
/// PATCH /messages?id&kind
pub async fn react_to_message(
    State(state): State<AppState>,
    client_ip: ClientIp,
    Query(params): Query<ReactionParams>,
) -> ApiResult<Json<MessageResponse>> {
    let id = params
        .id
        .as_deref()
        .ok_or_else(|| ApiError::invalid_query("Missing id"))?;
    let kind = params
        .kind
        .as_deref()
        .ok_or_else(|| ApiError::invalid_query("Missing kind"))?;

    let service = RelayService::new(state.service_context());
    let response = service.react(client_ip.key(), id, kind).await?;
    Ok(Json(response))
}

/// Preflight fallback for clients that probe without CORS headers
///
/// OPTIONS /messages
pub async fn options_messages() -> NoContent {
    NoContent
}
