use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    AppState,
    dto::{ApiResponse, ChartDTO, ChartQuery, CrosshairDTO, CrosshairQuery, HoldingsDTO, HoldingsQuery},
    errors::ApiError,
    helpers::{chart_dto, current_view, holdings_dto, validate_dimension},
};

#[utoipa::path(
    get,
    path = "/chart",
    tag = "Chart",
    params(ChartQuery),
    responses(
        (status = 200, description = "Gap-fixed value series projected on the chart area", body = ChartDTO),
        (status = 400, description = "Invalid chart size")
    )
)]
pub async fn get_chart(
    State(state): State<AppState>,
    Query(params): Query<ChartQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let width = validate_dimension("width", params.width)?;
    let height = validate_dimension("height", params.height)?;

    let view = current_view(&state).await;
    Ok(Json(ApiResponse::ok(chart_dto(&view, width, height))))
}

#[utoipa::path(
    get,
    path = "/chart/crosshair",
    tag = "Chart",
    params(CrosshairQuery),
    responses(
        (status = 200, description = "Point nearest to the pointer", body = CrosshairDTO),
        (status = 400, description = "Invalid pointer position or chart width"),
        (status = 404, description = "No data to locate")
    )
)]
pub async fn get_crosshair(
    State(state): State<AppState>,
    Query(params): Query<CrosshairQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let width = validate_dimension("width", params.width)?;
    if !params.x.is_finite() {
        return Err(ApiError::BadRequest("x must be a finite number".to_string()));
    }

    let view = current_view(&state).await;
    let (crosshair, delta) = view
        .crosshair(params.x, width)
        .ok_or_else(|| ApiError::NotFound(folio_chart::NO_DATA.to_string()))?;

    Ok(Json(ApiResponse::ok(CrosshairDTO {
        point: crosshair.point,
        x: crosshair.x,
        delta,
    })))
}

#[utoipa::path(
    get,
    path = "/holdings",
    tag = "Chart",
    params(HoldingsQuery),
    responses(
        (status = 200, description = "Token breakdown of the focused bucket, largest value first", body = HoldingsDTO)
    )
)]
pub async fn get_holdings(
    State(state): State<AppState>,
    Query(params): Query<HoldingsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(ApiResponse::ok(holdings_dto(&state, params.at).await)))
}
