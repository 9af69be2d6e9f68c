use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use client_core::{HttpOrderGateway, OrderController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod dispatch;
mod render;

use commands::parse_command;
use config::{load_settings, normalize_api_url, DEFAULT_CONFIG_PATH};
use dispatch::{dispatch_command, Dispatch};
use render::render_view;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Terminal front-end for the orders REST API.
#[derive(Parser, Debug)]
#[command(name = "orders-console")]
struct Args {
    /// Base URL of the orders API; overrides orders.toml and ORDERS_API_URL.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config);
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let api_url = normalize_api_url(&settings.api_url)?;
    info!(%api_url, "starting orders console");

    let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let gateway = HttpOrderGateway::with_client(http, api_url.clone());
    let controller = OrderController::new(Arc::new(gateway));
    controller.start().await;
    print!("{}", render_view(&api_url, &controller.snapshot().await));
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match dispatch_command(&controller, command).await {
            Dispatch::Quit => break,
            Dispatch::Message(text) => println!("{text}"),
            Dispatch::Render => {}
        }
        print!("{}", render_view(&api_url, &controller.snapshot().await));
    }

    info!("orders console exiting");
    Ok(())
}
