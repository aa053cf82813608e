use clap::Parser;
use eframe::egui;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, DEFAULT_API_URL};
use crate::create_app;

#[derive(Parser, Debug)]
#[command(name = "thought-web", version, about = "Canvas of linked thoughts")]
pub struct Args {
    /// Base URL of the thought service
    #[arg(long, env = "THOUGHT_WEB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Keep thoughts in memory instead of talking to the service
    #[arg(long)]
    pub offline: bool,

    /// Log filter, e.g. `info` or `thought_web=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

pub fn init_tracing(filter: &str) {
    let filter =
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Entry point used by the native executable.
pub fn run() -> eframe::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_filter);

    let config = match Config::new(&args.api_url, args.offline) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => Arc::new(runtime),
        Err(e) => {
            tracing::error!(error = %e, "failed to start async runtime");
            std::process::exit(1);
        }
    };

    tracing::info!(
        api = %config.endpoint.base(),
        backend = ?config.backend,
        "starting"
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Thought Web")
            .with_inner_size([1080.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Thought Web",
        native_options,
        Box::new(move |cc| Ok(Box::new(create_app(cc, &config, runtime)))),
    )
}
