use anyhow::Result;
use clap::Parser;
use externaldns_usg_webhook::{
    AlwaysHealthy, Config, UsgClient, UsgProvider, Webhook, version_full,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    log::info!("starting externaldns-usg-webhook {}", version_full());

    let config = Config::parse();
    let domain_filter = config.domain_filters();
    log::info!("USG DNS URL: {}", config.url);
    log::info!("domain filter: {domain_filter:?}");
    log::info!("API port: {}", config.port);
    log::info!("health port: {}", config.health_port);
    log::info!("dry run: {}", config.dry_run);

    let client = UsgClient::new(&config.url, &config.token)?;
    let provider = UsgProvider::new(client, domain_filter, config.dry_run);

    Webhook::new(
        Arc::new(provider),
        Arc::new(AlwaysHealthy),
        config.port,
        config.health_port,
    )
    .start()
    .await?;

    Ok(())
}
