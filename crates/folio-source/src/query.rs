//! SQL sent to the Transpose endpoint.
//!
//! `{{wallet}}`, `{{interval}}` and `{{samples}}` are bound server-side from
//! the request parameters. The query rebuilds running balances from token and
//! native transfers, samples them on an evenly spaced series ending now, and
//! prices every sample with the latest known token price.

// Native ETH is reported under the zero address.
pub const HISTORICAL_SPOTS_SQL: &str = r"
WITH transfers AS (
    SELECT timestamp, contract_address, sum(quantity) quantity
    FROM ethereum.token_transfers
    WHERE to_address = '{{wallet}}' AND __confirmed = true
    GROUP BY timestamp, contract_address
  UNION ALL
    SELECT timestamp, contract_address, sum(-quantity) quantity
    FROM ethereum.token_transfers
    WHERE from_address = '{{wallet}}' AND __confirmed = true
    GROUP BY timestamp, contract_address
  UNION ALL
    SELECT timestamp, '0x0000000000000000000000000000000000000000' AS contract_address, sum(quantity) quantity
    FROM ethereum.native_token_transfers
    WHERE to_address = '{{wallet}}' AND __confirmed = true
    GROUP BY timestamp, contract_address
  UNION ALL
    SELECT timestamp, '0x0000000000000000000000000000000000000000' AS contract_address, sum(-quantity) quantity
    FROM ethereum.native_token_transfers
    WHERE from_address = '{{wallet}}' AND __confirmed = true
    GROUP BY timestamp, contract_address
),
balances AS (
    SELECT contract_address AS token_address,
           timestamp AS timestamp,
           SUM(quantity) OVER (PARTITION BY contract_address ORDER BY timestamp) AS balance
    FROM transfers
),
tokens AS (
    SELECT dt.token_address, et.decimals, et.symbol, et.name, et.description, et.external_url, et.image_url
    FROM (SELECT DISTINCT token_address FROM balances) dt
    JOIN ethereum.tokens et ON et.contract_address = dt.token_address
  UNION
    SELECT '0x0000000000000000000000000000000000000000' AS token_address,
           18 AS decimals,
           'ETH' AS symbol,
           'Ethereum' AS name,
           'Ethereum is a decentralized, open-source blockchain with smart contract functionality.' AS description,
           'https://ethereum.org' AS external_url,
           'https://ethereum.org/favicon-32x32.png' AS image_url
),
series AS (
    SELECT GENERATE_SERIES(NOW(), NOW() - INTERVAL '{{interval}}', INTERVAL '-{{interval}}' / '{{samples}}') AS timestamp
),
sampled AS (
    SELECT tokens.*,
           series.timestamp,
           (SELECT balance FROM balances b
             WHERE b.token_address = tokens.token_address AND b.timestamp <= series.timestamp
             ORDER BY b.timestamp DESC LIMIT 1) AS raw_balance,
           (SELECT price FROM ethereum.token_prices etp
             WHERE etp.token_address = tokens.token_address AND etp.timestamp <= series.timestamp
             ORDER BY etp.timestamp DESC LIMIT 1) AS price
    FROM tokens CROSS JOIN series
)
SELECT '{{wallet}}' AS owner_address,
       token_address, symbol, name, description, external_url, image_url, decimals,
       timestamp,
       raw_balance / POWER(10, decimals) AS balance,
       price,
       COALESCE((price * raw_balance) / POWER(10, decimals), 0) AS value
FROM sampled;
";
