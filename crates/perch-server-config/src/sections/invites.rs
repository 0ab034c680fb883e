// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Invite broker settings.

use std::path::PathBuf;

use serde::Deserialize;

/// Discord's channel-invite endpoint.
///
/// `{id}` is replaced with the public link id, so with this default every
/// key of the credentials file must be the Discord channel id the invite is
/// created for. A template without `{id}` posts to the same URL for every id.
pub const DEFAULT_UPSTREAM_URL: &str = "https://discord.com/api/v10/channels/{id}/invites";
pub const DEFAULT_INVITE_BASE_URL: &str = "https://discord.gg/";
pub const DEFAULT_CREDENTIALS_FILE: &str = "invite-credentials.json";
/// Validity assumed when the upstream does not declare a max age (24 hours).
pub const DEFAULT_MAX_AGE_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct InvitesConfig {
	/// JSON object mapping link id to upstream credential.
	pub credentials_file: PathBuf,
	/// Invite-creation URL template, see [`DEFAULT_UPSTREAM_URL`].
	pub upstream_url: String,
	/// Prefix the invite code is appended to.
	pub invite_base_url: String,
	pub default_max_age_secs: u64,
}

impl Default for InvitesConfig {
	fn default() -> Self {
		InvitesConfigLayer::default().finalize()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvitesConfigLayer {
	pub credentials_file: Option<String>,
	pub upstream_url: Option<String>,
	pub invite_base_url: Option<String>,
	pub default_max_age_secs: Option<u64>,
}

impl InvitesConfigLayer {
	pub fn merge(&mut self, other: InvitesConfigLayer) {
		overlay!(
			self,
			other;
			credentials_file,
			upstream_url,
			invite_base_url,
			default_max_age_secs,
		);
	}

	pub fn finalize(self) -> InvitesConfig {
		InvitesConfig {
			credentials_file: self
				.credentials_file
				.unwrap_or_else(|| DEFAULT_CREDENTIALS_FILE.to_string())
				.into(),
			upstream_url: self
				.upstream_url
				.unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
			invite_base_url: self
				.invite_base_url
				.unwrap_or_else(|| DEFAULT_INVITE_BASE_URL.to_string()),
			default_max_age_secs: self.default_max_age_secs.unwrap_or(DEFAULT_MAX_AGE_SECS),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_upstream_is_keyed_by_channel() {
		let config = InvitesConfig::default();
		assert_eq!(
			config.upstream_url.replace("{id}", "1234"),
			"https://discord.com/api/v10/channels/1234/invites"
		);
		assert_eq!(config.default_max_age_secs, 86_400);
	}

	#[test]
	fn vanity_invite_host_from_file() {
		let layer: InvitesConfigLayer = toml::from_str(
			r#"
invite_base_url = "https://discord.com/invite/"
default_max_age_secs = 600
"#,
		)
		.unwrap();
		let config = layer.finalize();
		assert_eq!(config.invite_base_url, "https://discord.com/invite/");
		assert_eq!(config.default_max_age_secs, 600);
		assert_eq!(config.credentials_file, PathBuf::from(DEFAULT_CREDENTIALS_FILE));
	}
}
