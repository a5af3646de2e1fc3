//! Subcommand implementations

use crate::cli::Commands;
use anyhow::Context;
use listkeeper_common::log_with_severity;
use listkeeper_config::figment::providers::Serialized;
use listkeeper_config::{ConfigProvider, ServerConfig};
use std::path::PathBuf;

/// Layer the command line flags over `provider`
pub fn apply_flags(
    mut provider: ConfigProvider,
    config: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> ConfigProvider {
    if let Some(path) = config {
        provider = provider.with_file(path);
    }
    if let Some(host) = host {
        provider = provider.with_overrides(Serialized::default("host", host));
    }
    if let Some(port) = port {
        provider = provider.with_overrides(Serialized::default("port", port));
    }
    provider
}

/// Load the configuration, logging failures at their severity
pub fn load_config(provider: &ConfigProvider) -> anyhow::Result<ServerConfig> {
    provider.load().map_err(|err| {
        log_with_severity("Failed to load configuration", &err);
        anyhow::Error::new(err)
    })
}

/// The resolved configuration as YAML
pub fn render_config(config: &ServerConfig) -> anyhow::Result<String> {
    serde_yaml_ng::to_string(config).context("Failed to serialize configuration")
}

/// Resolves once the process receives Ctrl-C
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, finishing open requests");
}

/// Run one subcommand to completion
pub async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve { host, port, config } => {
            let provider = apply_flags(ConfigProvider::new(), config, host, port);
            let config = load_config(&provider)?;
            listkeeper_web::serve(&config, shutdown_signal())
                .await
                .context("Server failed")
        }
        Commands::Config { config } => {
            let provider = apply_flags(ConfigProvider::new(), config, None, None);
            let config = load_config(&provider)?;
            print!("{}", render_config(&config)?);
            Ok(())
        }
    }
}
