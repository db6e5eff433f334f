use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::modules::entities::inbound::http::CurrentPrincipal;
use crate::shell::state::AppState;

/// `POST /api/authenticated-user`: the caller's User row, or null.
pub async fn authenticated_user(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Response {
    match state.authenticated_user.get(principal.as_ref()).await {
        Ok(user) => Json(user).into_response(),
        Err(err) => err.into_response(),
    }
}
