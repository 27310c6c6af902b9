use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use folio_types::{Scope, SpotRecord, ValuePoint};

/// Which records take part in bucketing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayPolicy {
    /// Every record counts.
    All,
    /// Records with no positive balance are left out, as the dashboard shows them.
    #[default]
    SkipZeroBalance,
}

impl DisplayPolicy {
    pub fn admits(self, record: &SpotRecord) -> bool {
        match self {
            Self::All => true,
            Self::SkipZeroBalance => record.has_balance(),
        }
    }
}

/// Groups records by their UTC-floored bucket instant for `scope`.
///
/// Within a bucket the records keep their input order.
pub fn bucket_records(
    records: &[SpotRecord],
    scope: Scope,
    policy: DisplayPolicy,
) -> BTreeMap<DateTime<Utc>, Vec<&SpotRecord>> {
    let resolution = scope.resolution();
    let mut buckets: BTreeMap<DateTime<Utc>, Vec<&SpotRecord>> = BTreeMap::new();

    for record in records.iter().filter(|r| policy.admits(r)) {
        buckets
            .entry(resolution.floor(record.timestamp))
            .or_default()
            .push(record);
    }

    buckets
}

/// Sums record values per bucket into an ascending series with one point per
/// bucket. An empty record set gives an empty series.
pub fn bucket_values(records: &[SpotRecord], scope: Scope, policy: DisplayPolicy) -> Vec<ValuePoint> {
    bucket_records(records, scope, policy)
        .into_iter()
        .map(|(timestamp, bucket)| {
            let value = bucket.iter().map(|r| r.value).sum::<Decimal>();
            ValuePoint::new(timestamp, value)
        })
        .collect()
}
