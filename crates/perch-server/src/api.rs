// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router construction.

use std::sync::Arc;

use axum::{
	middleware::{from_fn, from_fn_with_state},
	routing::{get, post},
	Router,
};
use perch_server_config::{PathsConfig, ServerConfig};
use perch_server_gate::{Gate, GateSettings};
use perch_server_invites::{CredentialStore, DiscordInviteClient, InviteBroker, InviteUpstream};

use crate::client_info::request_log_layer;
use crate::error::ServerError;
use crate::gate_middleware::gate_layer;
use crate::routes;

/// Shared state for all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
	pub gate: Arc<Gate>,
	pub broker: InviteBroker,
	pub paths: PathsConfig,
}

/// Build state backed by the configured Discord upstream.
pub fn create_app_state(
	config: &ServerConfig,
	credentials: CredentialStore,
) -> Result<AppState, ServerError> {
	let client = DiscordInviteClient::new(config.invites.upstream_url.clone())
		.map_err(|e| ServerError::Internal(format!("failed to build invite client: {e}")))?;
	Ok(create_app_state_with_upstream(
		config,
		credentials,
		Arc::new(client),
	))
}

/// Build state with an explicit invite upstream.
pub fn create_app_state_with_upstream(
	config: &ServerConfig,
	credentials: CredentialStore,
	upstream: Arc<dyn InviteUpstream>,
) -> AppState {
	let gate = Gate::new(GateSettings {
		guarded_prefix: config.gate.guarded_prefix.clone(),
		accept_path: config.gate.accept_path.clone(),
		cookie_name: config.gate.cookie_name.clone(),
		cookie_value: config.gate.cookie_value.clone(),
		cookie_max_age_secs: config.gate.cookie_max_age_secs,
		tos_file: config.gate.tos_file.clone(),
	});

	let broker = InviteBroker::new(
		credentials,
		upstream,
		config.invites.invite_base_url.clone(),
		config.invites.default_max_age_secs,
	);

	AppState {
		gate: Arc::new(gate),
		broker,
		paths: config.paths.clone(),
	}
}

/// Build the router. The gate wraps every route, including the fallback, so
/// any path under the guarded prefix is covered.
pub fn create_router(state: AppState) -> Router {
	let settings = state.gate.settings();
	let accept_path = settings.accept_path.clone();
	let guarded_prefix = settings.guarded_prefix.clone();

	Router::new()
		.route("/health", get(routes::health::health_check))
		.route("/api/test", get(routes::health::api_test))
		.route(&accept_path, post(routes::gate::accept_terms))
		.route(&guarded_prefix, get(routes::landing::landing_page))
		.route("/discord/{id}", get(routes::invites::redirect_to_invite))
		.route(
			"/discord/{id}/cache",
			get(routes::invites::inspect_invite_cache),
		)
		.fallback(routes::not_found)
		.layer(from_fn_with_state(state.clone(), gate_layer))
		.layer(from_fn(request_log_layer))
		.with_state(state)
}
