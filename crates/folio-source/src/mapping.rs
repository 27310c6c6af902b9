use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use folio_types::{Address, Scope, SpotRecord, TokenMeta};

use crate::{dto::SpotRow, error::SourceError};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses an upstream timestamp. Zone-less timestamps are read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, SourceError> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| SourceError::InvalidRow(format!("unparseable timestamp '{raw}'")))
}

/// Converts upstream rows into records tagged with `scope`.
///
/// One bad timestamp fails the whole batch; missing balances and prices read
/// as zero.
pub fn rows_into_records(rows: Vec<SpotRow>, scope: Scope) -> Result<Vec<SpotRecord>, SourceError> {
    rows.into_iter()
        .map(|row| row_into_record(row, scope))
        .collect()
}

fn row_into_record(row: SpotRow, scope: Scope) -> Result<SpotRecord, SourceError> {
    let timestamp = parse_timestamp(&row.timestamp)?;
    let symbol = row.symbol.unwrap_or_default();

    Ok(SpotRecord {
        owner_address: Address::new(&row.owner_address),
        name: row.name.unwrap_or_else(|| symbol.clone()),
        symbol,
        token_address: row.token_address,
        decimals: row.decimals.unwrap_or_default(),
        timestamp,
        balance: row.balance.unwrap_or(Decimal::ZERO),
        price: row.price.unwrap_or(Decimal::ZERO),
        value: row.value.unwrap_or(Decimal::ZERO),
        scope,
        meta: TokenMeta {
            description: row.description,
            external_url: row.external_url,
            image_url: row.image_url,
        },
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    fn row(timestamp: &str) -> SpotRow {
        SpotRow {
            owner_address: " 0xowner ".to_string(),
            timestamp: timestamp.to_string(),
            token_address: "0xtoken".to_string(),
            symbol: Some("USDC".to_string()),
            name: None,
            description: None,
            external_url: None,
            image_url: Some("https://example.invalid/usdc.png".to_string()),
            decimals: Some(6),
            balance: Some(dec!(12.5)),
            price: None,
            value: Some(dec!(12.5)),
        }
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = DateTime::from_timestamp(1_684_332_538, 0).unwrap();

        assert_eq!(parse_timestamp("2023-05-17T14:08:58Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2023-05-17T16:08:58+02:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2023-05-17 14:08:58").unwrap(), expected);
        assert_eq!(parse_timestamp("2023-05-17T14:08:58.000").unwrap(), expected);
        assert!(parse_timestamp("17/05/2023").is_err());
    }

    #[test]
    fn test_rows_are_tagged_with_scope() {
        let records = rows_into_records(vec![row("2023-05-17 14:08:58")], Scope::OneMonth).unwrap();

        let record = &records[0];
        assert_eq!(record.scope, Scope::OneMonth);
        assert_eq!(record.owner_address.as_str(), "0xowner");
        assert_eq!(record.name, "USDC");
        assert_eq!(record.price, Decimal::ZERO);
        assert_eq!(record.value, dec!(12.5));
        assert_eq!(
            record.meta.image_url.as_deref(),
            Some("https://example.invalid/usdc.png")
        );
    }

    #[test]
    fn test_one_bad_row_fails_the_batch() {
        let result = rows_into_records(
            vec![row("2023-05-17 14:08:58"), row("not a date")],
            Scope::OneYear,
        );
        assert!(matches!(result, Err(SourceError::InvalidRow(_))));
    }
}
