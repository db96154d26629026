use axum::{extract::State, Json};
use models::table_state::Model as TableState;
use service::table_state::domain::SaveTableState;

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    get, path = "/table-state", tag = "table-state",
    responses(
        (status = 200, description = "Current state, or null before the first save", body = models::table_state::TableState),
        (status = 500, description = "Storage Error")
    )
)]
pub async fn get_state(State(state): State<ServerState>) -> Result<Json<Option<TableState>>, JsonApiError> {
    let current = state.table_state.get_state().await?;
    Ok(Json(current))
}

#[utoipa::path(
    post, path = "/table-state", tag = "table-state",
    request_body = service::table_state::domain::SaveTableState,
    responses(
        (status = 200, description = "Saved state", body = models::table_state::TableState),
        (status = 500, description = "Storage Error")
    )
)]
pub async fn save_state(
    State(state): State<ServerState>,
    Json(input): Json<SaveTableState>,
) -> Result<Json<TableState>, JsonApiError> {
    let saved = state.table_state.save_state(input).await?;
    Ok(Json(saved))
}
