use clap::Parser;

use folio_source::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use folio_types::Scope;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct FolioCli {
    /// OTEL collector endpoint
    #[arg(long, env = "OTEL_COLLECTOR_ENDPOINT")]
    pub otel_collector_endpoint: Option<String>,

    /// API port
    #[arg(long, env = "API_PORT", default_value = "8080")]
    pub api_port: u16,

    /// Transpose API key sent with every historical balance query
    #[arg(long, env = "TRANSPOSE_API_KEY")]
    pub transpose_api_key: String,

    /// Transpose SQL endpoint
    #[arg(long, env = "TRANSPOSE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub transpose_endpoint: String,

    /// Wallet addresses tracked from start-up, comma separated
    #[arg(long, env = "TRACKED_ADDRESSES", value_delimiter = ',')]
    pub tracked_addresses: Vec<String>,

    /// Scope selected at start-up (1H, 1D, 1W, 1M, 3M, 6M, 1Y, 3Y, 5Y)
    #[arg(long, env = "DEFAULT_SCOPE", default_value = "1Y")]
    pub default_scope: Scope,

    /// Upstream request timeout in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub fetch_timeout_secs: u64,

    /// Keep zero-balance spots in the chart and holdings
    #[arg(long, env = "INCLUDE_ZERO_BALANCES", default_value = "false")]
    pub include_zero_balances: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let cli = FolioCli::try_parse_from([
            "folio",
            "--transpose-api-key",
            "key",
            "--tracked-addresses",
            "0xa,0xb",
            "--default-scope",
            "3m",
        ])
        .unwrap();

        assert_eq!(cli.tracked_addresses, vec!["0xa", "0xb"]);
        assert_eq!(cli.default_scope, Scope::ThreeMonth);
        assert_eq!(cli.transpose_endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cli.fetch_timeout_secs, DEFAULT_TIMEOUT.as_secs());
        assert!(!cli.include_zero_balances);
    }
}
