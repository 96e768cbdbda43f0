use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use tempo_pt::config::TempoConfig;
use tempo_pt::ipma::IpmaClient;
use tempo_pt::service::DashboardService;
use tempo_pt::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = TempoConfig::load().with_context(|| "Failed to load configuration")?;

    init_logging(&config);

    let client = IpmaClient::new(&config.ipma).with_context(|| "Failed to create IPMA client")?;
    let service = Arc::new(DashboardService::new(
        client,
        config.defaults.locale.clone(),
    ));

    // All three reference fetches must succeed before serving; no partial state.
    service
        .reload_reference_data()
        .await
        .with_context(|| "Failed to load IPMA reference data")?;

    web::run(service, &config.server).await
}

fn init_logging(config: &TempoConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
