// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! perch server binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use perch_server::{create_app_state, create_router};
use perch_server_invites::{CredentialError, CredentialStore};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// perch server - personal site with a terms gate and Discord invite redirects.
#[derive(Parser, Debug)]
#[command(name = "perch-server", about = "perch personal site server", version)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/perch/server.toml)
	#[arg(long, env = "PERCH_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

fn format_version_info() -> String {
	format!(
		"perch-server version: {}\n\
         Platform:             {}-{}",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH,
	)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => perch_server_config::load_config_with_file(path)?,
		None => perch_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		"starting perch-server"
	);

	let credentials = match CredentialStore::load(&config.invites.credentials_file) {
		Ok(credentials) => credentials,
		Err(e @ CredentialError::Read { .. }) => {
			tracing::warn!(error = %e, "no invite credentials, invite links are disabled");
			CredentialStore::default()
		}
		Err(e) => return Err(e.into()),
	};
	tracing::info!(count = credentials.len(), "invite credentials ready");

	let state = create_app_state(&config, credentials)?;
	let app = create_router(state).layer(TraceLayer::new_for_http());

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	tracing::info!("Server shutdown complete");
	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "failed to listen for shutdown signal");
		std::future::pending::<()>().await;
	}
	tracing::info!("Received shutdown signal");
}
