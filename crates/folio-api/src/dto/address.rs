use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use folio_store::RequestState;
use folio_types::{Address, FetchStatus, Scope};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddAddressRequest {
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddressesDTO {
    pub addresses: Vec<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddAddressDTO {
    pub address: Address,
    /// False when the address was already tracked
    pub added: bool,
}

/// Fetch state of one (address, scope) pair
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestDTO {
    pub address: Address,
    pub scope: Scope,
    pub status: FetchStatus,
    pub records: usize,
}

impl From<RequestState> for RequestDTO {
    fn from(request: RequestState) -> Self {
        Self {
            address: request.key.address,
            scope: request.key.scope,
            status: request.status,
            records: request.records,
        }
    }
}
