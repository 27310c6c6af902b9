use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};

use utoipa::OpenApi as OpenApiT;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AppState, handlers};

pub fn api_router<T: OpenApiT>(_state: AppState) -> Router<AppState> {
    let open_api = T::openapi();

    let addresses_router = Router::new()
        .route(
            "/",
            get(handlers::list_addresses).post(handlers::add_address),
        )
        .route("/{address}", delete(handlers::remove_address));

    let chart_router = Router::new()
        .route("/", get(handlers::get_chart))
        .route("/crosshair", get(handlers::get_crosshair));

    Router::new()
        .route("/health", get(health))
        .route("/v1/health", get(health))
        .nest("/v1/addresses", addresses_router)
        .nest("/v1/chart", chart_router)
        .route("/v1/scopes", get(handlers::list_scopes))
        .route(
            "/v1/scope",
            get(handlers::get_scope).put(handlers::set_scope),
        )
        .route("/v1/requests", get(handlers::list_requests))
        .route("/v1/holdings", get(handlers::get_holdings))
        .merge(SwaggerUi::new("/v1/docs").url("/v1/docs/openapi.json", open_api))
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
