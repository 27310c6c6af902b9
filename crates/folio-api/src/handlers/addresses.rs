use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use folio_types::Address;

use crate::{
    AppState,
    dto::{AddAddressDTO, AddAddressRequest, AddressesDTO, ApiResponse, RequestDTO},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/addresses",
    tag = "Addresses",
    responses(
        (status = 200, description = "Tracked addresses, in insertion order", body = AddressesDTO)
    )
)]
pub async fn list_addresses(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let addresses = state.store.addresses().await;
    Ok(Json(ApiResponse::ok(AddressesDTO { addresses })))
}

#[utoipa::path(
    post,
    path = "/addresses",
    tag = "Addresses",
    request_body = AddAddressRequest,
    responses(
        (status = 201, description = "Address tracked", body = AddAddressDTO),
        (status = 200, description = "Address was already tracked", body = AddAddressDTO),
        (status = 400, description = "Empty address")
    )
)]
pub async fn add_address(
    State(state): State<AppState>,
    Json(request): Json<AddAddressRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let address = Address::new(&request.address);
    let added = state.store.add_address(address.clone()).await?;

    let status = if added { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(ApiResponse::ok(AddAddressDTO { address, added }))))
}

#[utoipa::path(
    delete,
    path = "/addresses/{address}",
    tag = "Addresses",
    params(
        ("address" = String, Path, description = "Tracked wallet address")
    ),
    responses(
        (status = 200, description = "Address and its cached data removed", body = AddressesDTO),
        (status = 404, description = "Address not tracked")
    )
)]
pub async fn remove_address(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.remove_address(&Address::new(&address)).await?;

    let addresses = state.store.addresses().await;
    Ok(Json(ApiResponse::ok(AddressesDTO { addresses })))
}

#[utoipa::path(
    get,
    path = "/requests",
    tag = "Addresses",
    responses(
        (status = 200, description = "Fetch state of every (address, scope) pair", body = Vec<RequestDTO>)
    )
)]
pub async fn list_requests(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let requests: Vec<RequestDTO> = state
        .store
        .requests()
        .await
        .into_iter()
        .map(RequestDTO::from)
        .collect();
    Ok(Json(ApiResponse::ok(requests)))
}

#[cfg(test)]
mod tests {
    use folio_store::{PortfolioConfig, PortfolioStore};

    use super::*;

    fn state() -> AppState {
        AppState::new(PortfolioStore::new(&PortfolioConfig::default()))
    }

    #[tokio::test]
    async fn test_add_then_remove() {
        let state = state();

        let created = add_address(
            State(state.clone()),
            Json(AddAddressRequest {
                address: " 0xa ".to_string(),
            }),
        )
        .await
        .unwrap()
        .into_response();
        assert_eq!(created.status(), StatusCode::CREATED);

        let again = add_address(
            State(state.clone()),
            Json(AddAddressRequest {
                address: "0xa".to_string(),
            }),
        )
        .await
        .unwrap()
        .into_response();
        assert_eq!(again.status(), StatusCode::OK);

        assert_eq!(state.store.requests().await.len(), 9);

        remove_address(State(state.clone()), Path("0xa".to_string()))
            .await
            .unwrap();
        assert!(state.store.requests().await.is_empty());

        let missing = remove_address(State(state), Path("0xa".to_string())).await;
        assert!(matches!(missing, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_address_is_rejected() {
        let result = add_address(
            State(state()),
            Json(AddAddressRequest {
                address: "   ".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
