use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use folio_types::{Scope, SpotRecord, ValuePoint};

use crate::bucket::{DisplayPolicy, bucket_records};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    None,
}

impl Direction {
    pub fn of(percent: Option<Decimal>) -> Self {
        match percent {
            None => Self::None,
            Some(p) if p.is_sign_negative() && !p.is_zero() => Self::Down,
            Some(_) => Self::Up,
        }
    }
}

/// Change between the first value of a series and the value being read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Delta {
    pub percent: Option<Decimal>,
    pub formatted: String,
    pub direction: Direction,
}

impl Delta {
    pub fn between(start: Decimal, current: Decimal) -> Self {
        let percent = calculate_delta(start, current);
        Self {
            percent,
            formatted: format_delta(percent),
            direction: Direction::of(percent),
        }
    }
}

/// `(current / start - 1) * 100`, undefined when `start` is zero.
pub fn calculate_delta(start: Decimal, current: Decimal) -> Option<Decimal> {
    let ratio = current.checked_div(start)?;
    (ratio - Decimal::ONE).checked_mul(Decimal::ONE_HUNDRED)
}

pub fn format_delta(percent: Option<Decimal>) -> String {
    percent.map_or_else(
        || "-".to_string(),
        |p| {
            let rounded = p
                .abs()
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.2}%")
        },
    )
}

/// One token line of the focused-bucket breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub token_address: String,
    pub balance: Decimal,
    /// Unit price implied by value over balance.
    pub quote: Option<Decimal>,
    pub value: Decimal,
    pub image_url: Option<String>,
}

impl From<&SpotRecord> for Holding {
    fn from(record: &SpotRecord) -> Self {
        Self {
            symbol: record.symbol.clone(),
            name: record.name.clone(),
            token_address: record.token_address.clone(),
            balance: record.balance,
            quote: record.quote(),
            value: record.value,
            image_url: record.meta.image_url.clone(),
        }
    }
}

/// Records in the bucket containing `focused`, largest value first. Empty
/// when that bucket has no records.
pub fn focused_holdings(
    records: &[SpotRecord],
    scope: Scope,
    policy: DisplayPolicy,
    focused: DateTime<Utc>,
) -> Vec<Holding> {
    let bucket_key = scope.resolution().floor(focused);
    let mut buckets = bucket_records(records, scope, policy);
    let Some(bucket) = buckets.remove(&bucket_key) else {
        return Vec::new();
    };

    let mut holdings: Vec<Holding> = bucket.into_iter().map(Holding::from).collect();
    holdings.sort_by_key(|h| Reverse(h.value));
    holdings
}

/// Sum of the focused holdings, or the latest series value when nothing is
/// focused.
pub fn focused_value(holdings: Option<&[Holding]>, series: &[ValuePoint]) -> Option<Decimal> {
    match holdings {
        Some(holdings) => Some(holdings.iter().map(|h| h.value).sum()),
        None => series.last().map(|p| p.value),
    }
}
