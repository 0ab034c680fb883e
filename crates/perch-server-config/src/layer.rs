// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration as read from one source.

use serde::Deserialize;

use crate::sections::{
	GateConfigLayer, HttpConfigLayer, InvitesConfigLayer, LoggingConfigLayer, PathsConfigLayer,
};

/// One source's view of the config file layout. Every field is optional;
/// unknown sections or keys are rejected so typos do not pass silently.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfigLayer {
	pub http: HttpConfigLayer,
	pub logging: LoggingConfigLayer,
	pub paths: PathsConfigLayer,
	pub gate: GateConfigLayer,
	pub invites: InvitesConfigLayer,
}

impl ServerConfigLayer {
	/// Overlay `other` on top of `self`.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		self.http.merge(other.http);
		self.logging.merge(other.logging);
		self.paths.merge(other.paths);
		self.gate.merge(other.gate);
		self.invites.merge(other.invites);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn later_layer_wins_per_field() {
		let mut layer: ServerConfigLayer = toml::from_str(
			r#"
[gate]
accept_path = "/agree"
cookie_value = "yes"
"#,
		)
		.unwrap();
		layer.merge(
			toml::from_str(
				r#"
[gate]
cookie_value = "v2"
"#,
			)
			.unwrap(),
		);

		assert_eq!(layer.gate.accept_path.as_deref(), Some("/agree"));
		assert_eq!(layer.gate.cookie_value.as_deref(), Some("v2"));
	}

	#[test]
	fn empty_file_is_an_empty_layer() {
		let layer: ServerConfigLayer = toml::from_str("").unwrap();
		assert!(layer.http.port.is_none());
		assert!(layer.invites.credentials_file.is_none());
	}

	#[test]
	fn misspelled_section_is_rejected() {
		let result: Result<ServerConfigLayer, _> = toml::from_str("[invite]\nupstream_url = \"x\"");
		assert!(result.is_err());
	}

	#[test]
	fn misspelled_key_is_rejected() {
		let result: Result<ServerConfigLayer, _> = toml::from_str("[gate]\ncookie = \"x\"");
		assert!(result.is_err());
	}
}
