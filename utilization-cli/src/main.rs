mod api;
mod batch;
mod cli;
mod config;
mod error;
mod sheet;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use cli::commands::{apply, preview, template};
use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Apply(args) => {
            let config = Config::load(cli.config.as_deref())?;
            let cancel = CancellationToken::new();
            spawn_interrupt_listener(cancel.clone());
            apply::handle_apply_command(args, config, cancel).await
        }
        Commands::Preview(args) => preview::handle_preview_command(args),
        Commands::Template(args) => template::handle_template_command(args),
    }
}

/// First Ctrl-C stops dispatching new rows; in-flight rows still finish
fn spawn_interrupt_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Interrupt received, finishing in-flight rows");
                cancel.cancel();
            }
            Err(err) => debug!("Could not listen for Ctrl-C: {}", err),
        }
    });
}
