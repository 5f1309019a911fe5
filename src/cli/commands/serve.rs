//! Serve command implementation
//!
//! This module implements the `serve` command, which runs the HTTP
//! detection API until a shutdown signal is received.

use crate::anonymization::ScanEngine;
use crate::config::load_config_or_default;
use crate::log_error_with_context;
use crate::server;
use anyhow::Context;
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on, overriding `server.bind_address`
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ Failed to load configuration");
                eprintln!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Some(ref bind) = self.bind {
            config.server.bind_address = bind.clone();
            if let Err(e) = config.server.socket_addr() {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        }

        let engine = Arc::new(
            ScanEngine::new(&config.detection).context("Failed to initialize PII detection")?,
        );

        server::serve(&config.server, engine, shutdown_signal)
            .await
            .context("HTTP server failed")?;

        tracing::info!("Server stopped");
        Ok(0)
    }
}
