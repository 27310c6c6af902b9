use axum::{Json, extract::State, response::IntoResponse};

use folio_types::Scope;

use crate::{
    AppState,
    dto::{ApiResponse, CurrentScopeDTO, ScopeDTO, SetScopeRequest},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/scopes",
    tag = "Scope",
    responses(
        (status = 200, description = "Every scope in display order", body = Vec<ScopeDTO>)
    )
)]
pub async fn list_scopes() -> Result<impl IntoResponse, ApiError> {
    let scopes: Vec<ScopeDTO> = Scope::ALL.into_iter().map(ScopeDTO::from).collect();
    Ok(Json(ApiResponse::ok(scopes)))
}

#[utoipa::path(
    get,
    path = "/scope",
    tag = "Scope",
    responses(
        (status = 200, description = "Selected scope", body = CurrentScopeDTO)
    )
)]
pub async fn get_scope(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let scope = state.store.scope().await;
    Ok(Json(ApiResponse::ok(CurrentScopeDTO {
        scope: scope.into(),
        changed: false,
    })))
}

#[utoipa::path(
    put,
    path = "/scope",
    tag = "Scope",
    request_body = SetScopeRequest,
    responses(
        (status = 200, description = "Scope selected", body = CurrentScopeDTO),
        (status = 400, description = "Unknown scope")
    )
)]
pub async fn set_scope(
    State(state): State<AppState>,
    Json(request): Json<SetScopeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let changed = state.store.set_scope(request.scope).await;
    Ok(Json(ApiResponse::ok(CurrentScopeDTO {
        scope: request.scope.into(),
        changed,
    })))
}
