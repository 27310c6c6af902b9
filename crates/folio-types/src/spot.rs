use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{fetch::Address, scope::Scope};

/// Descriptive token metadata carried along with a spot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenMeta {
    pub description: Option<String>,
    pub external_url: Option<String>,
    pub image_url: Option<String>,
}

/// One token's balance, price and value held by one address at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SpotRecord {
    pub owner_address: Address,
    pub token_address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
    pub timestamp: DateTime<Utc>,
    /// Balance in token units (already divided by `10^decimals`)
    pub balance: Decimal,
    /// Unit price in the quote currency
    pub price: Decimal,
    /// `balance * price`, as reported upstream
    pub value: Decimal,
    /// Scope the record was fetched for
    pub scope: Scope,
    #[serde(default)]
    pub meta: TokenMeta,
}

impl SpotRecord {
    pub fn has_balance(&self) -> bool {
        self.balance > Decimal::ZERO
    }

    /// Price implied by value and balance, if both are known.
    pub fn quote(&self) -> Option<Decimal> {
        if self.balance.is_zero() || self.value.is_zero() {
            return None;
        }
        self.value.checked_div(self.balance)
    }
}

/// Drops records whose (token, owner, timestamp) was already seen, keeping
/// the first occurrence and the original order.
pub fn dedup_spots(records: Vec<SpotRecord>) -> Vec<SpotRecord> {
    let mut seen: HashSet<(String, Address, DateTime<Utc>)> = HashSet::with_capacity(records.len());

    records
        .into_iter()
        .filter(|record| {
            seen.insert((
                record.token_address.clone(),
                record.owner_address.clone(),
                record.timestamp,
            ))
        })
        .collect()
}
