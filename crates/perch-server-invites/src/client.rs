// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Discord channel-invite API client.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument};

use crate::credentials::UpstreamCredential;
use crate::error::UpstreamError;
use crate::upstream::{CreatedInvite, InviteUpstream};

const ID_PLACEHOLDER: &str = "{id}";
const PROJECT_URL: &str = "https://github.com/ghuntley/perch";

/// Creates channel invites through the Discord REST API.
#[derive(Debug, Clone)]
pub struct DiscordInviteClient {
	http_client: Client,
	url_template: String,
}

#[derive(Debug, Deserialize)]
struct DiscordInviteResponse {
	code: Option<String>,
	max_age: Option<u64>,
	max_uses: Option<u32>,
	uses: Option<u32>,
}

impl DiscordInviteClient {
	/// Create a client for the given URL template. Every `{id}` in the template
	/// is replaced with the link id, so against Discord the ids are channel ids.
	/// A template without `{id}` is used unchanged for every id.
	pub fn new(url_template: impl Into<String>) -> Result<Self, reqwest::Error> {
		Ok(Self {
			http_client: perch_common_http::builder_with_user_agent(discord_user_agent()).build()?,
			url_template: url_template.into(),
		})
	}

	fn invite_url(&self, id: &str) -> String {
		self.url_template.replace(ID_PLACEHOLDER, id)
	}
}

/// Discord requires `DiscordBot (url, version)` for bot-authenticated calls.
fn discord_user_agent() -> String {
	format!(
		"DiscordBot ({PROJECT_URL}, {}) {}",
		env!("CARGO_PKG_VERSION"),
		perch_common_http::user_agent()
	)
}

#[async_trait]
impl InviteUpstream for DiscordInviteClient {
	#[instrument(skip(self, credential), fields(id = %id))]
	async fn create_invite(
		&self,
		id: &str,
		credential: &UpstreamCredential,
	) -> Result<CreatedInvite, UpstreamError> {
		let url = self.invite_url(id);
		debug!(url = %url, "requesting new invite");

		let response = self
			.http_client
			.post(&url)
			.header(AUTHORIZATION, credential.expose())
			.json(&serde_json::json!({}))
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, "network error creating invite");
				UpstreamError::Network(e)
			})?;

		let status = response.status();
		let body = response.text().await?;
		debug!(status = %status, "received invite response");

		if !status.is_success() {
			error!(status = %status, body = %body, "upstream rejected invite creation");
			return Err(UpstreamError::Status {
				status: status.as_u16(),
				body,
			});
		}

		let parsed: DiscordInviteResponse = serde_json::from_str(&body).map_err(|e| {
			error!(error = %e, "failed to parse invite response");
			UpstreamError::InvalidResponse(format!("failed to parse invite response: {e}"))
		})?;

		let code = parsed
			.code
			.filter(|code| !code.is_empty())
			.ok_or_else(|| UpstreamError::InvalidResponse("response has no invite code".to_string()))?;

		Ok(CreatedInvite {
			code,
			max_age: parsed.max_age,
			max_uses: parsed.max_uses,
			uses: parsed.uses,
		})
	}
}
