use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Portfolio value at a bucket-aligned instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValuePoint {
    pub timestamp: DateTime<Utc>,
    pub value: Decimal,
}

impl ValuePoint {
    pub const fn new(timestamp: DateTime<Utc>, value: Decimal) -> Self {
        Self { timestamp, value }
    }

    /// Zero marks "no data at this point" for gap purposes.
    pub fn is_absent(&self) -> bool {
        self.value.is_zero()
    }

    /// Same value, moved to another instant.
    #[must_use]
    pub const fn at(self, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            value: self.value,
        }
    }
}
