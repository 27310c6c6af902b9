mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use pragma_common::{
    services::{Service, ServiceGroup},
    telemetry::init_telemetry,
};
use url::Url;

use crate::cli::FolioCli;
use folio_api::{ApiService, AppState};
use folio_chart::DisplayPolicy;
use folio_metrics::MetricsRegistry;
use folio_source::TransposeClient;
use folio_store::{PortfolioConfig, PortfolioStore, PortfolioTask};
use folio_types::Address;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let FolioCli {
        otel_collector_endpoint,
        api_port,
        transpose_api_key,
        transpose_endpoint,
        tracked_addresses,
        default_scope,
        fetch_timeout_secs,
        include_zero_balances,
    } = FolioCli::parse();

    let app_name = "folio";
    if let Err(e) = init_telemetry(app_name, otel_collector_endpoint) {
        panic!("Could not init telemetry: {e}");
    }

    let endpoint = Url::parse(&transpose_endpoint).context("Invalid Transpose endpoint")?;

    let config = PortfolioConfig {
        default_scope,
        tracked_addresses: tracked_addresses.iter().map(Address::new).collect(),
        ..PortfolioConfig::default()
    };

    let source = TransposeClient::new(
        endpoint.as_str(),
        &transpose_api_key,
        Duration::from_secs(fetch_timeout_secs),
    )
    .context("Could not build the Transpose client")?;
    let metrics = MetricsRegistry::new();
    let store = PortfolioStore::new(&config);

    tracing::info!(
        scope = %config.default_scope,
        addresses = config.tracked_addresses.len(),
        endpoint = source.endpoint(),
        "starting folio"
    );

    let display_policy = if include_zero_balances {
        DisplayPolicy::All
    } else {
        DisplayPolicy::SkipZeroBalance
    };
    let app_state = AppState::new(store.clone()).with_display_policy(display_policy);

    let api_service = ApiService::new(app_state, "0.0.0.0", api_port);
    let portfolio_service = PortfolioTask::new(store, Arc::new(source), metrics.fetches.clone());

    ServiceGroup::default()
        .with(api_service)
        .with(portfolio_service)
        .start_and_drive_to_end()
        .await?;

    Ok(())
}
