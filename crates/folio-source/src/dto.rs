use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_types::{Address, FetchKey};

use crate::error::SourceError;

/// Parameters of one upstream query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotRequest {
    pub address: Address,
    pub interval: &'static str,
    pub samples: u32,
}

impl SpotRequest {
    pub fn for_key(key: &FetchKey) -> Self {
        Self {
            address: key.address.clone(),
            interval: key.scope.interval(),
            samples: key.scope.samples(),
        }
    }
}

/// Raw row returned by the historical balances query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotRow {
    pub owner_address: String,
    pub timestamp: String,
    pub token_address: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub decimals: Option<u32>,
    #[serde(default)]
    pub balance: Option<Decimal>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub value: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TransposeRequest<'a> {
    pub sql: &'a str,
    pub parameters: QueryParameters<'a>,
    pub options: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryParameters<'a> {
    pub wallet: &'a str,
    pub interval: &'a str,
    pub samples: String,
}

/// Envelope of every Transpose SQL response.
#[derive(Debug, Deserialize)]
pub struct TransposeResponse {
    #[serde(default)]
    pub results: Option<Vec<SpotRow>>,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl TransposeResponse {
    pub fn into_rows(self) -> Result<Vec<SpotRow>, SourceError> {
        if self.error {
            return Err(SourceError::Upstream {
                code: self.error_code.unwrap_or_default(),
                message: self.error_message.unwrap_or_default(),
            });
        }

        self.results.ok_or(SourceError::NoResults)
    }
}
