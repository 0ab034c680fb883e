// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the perch server.
//!
//! A config file (`/etc/perch/server.toml`, or the path given with `--config`)
//! is overlaid by `PERCH_SERVER_*` environment variables; anything still unset
//! takes the built-in default. Gate paths and cookie settings are validated
//! here so a bad value fails at startup rather than inside the router.
//!
//! ```ignore
//! let config = perch_server_config::load_config()?;
//! println!("listening on {}", config.socket_addr());
//! ```

/// Copy every `Some` field of `$other` over the same field of `$target`.
macro_rules! overlay {
	($target:expr, $other:ident; $($field:ident),+ $(,)?) => {
		$(
			if $other.$field.is_some() {
				$target.$field = $other.$field;
			}
		)+
	};
}

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::{ConfigError, GateConfigError};
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{env_layer, file_layer, process_env_layer, SYSTEM_CONFIG_PATH};

use std::path::Path;

use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub logging: LoggingConfig,
	pub paths: PathsConfig,
	pub gate: GateConfig,
	pub invites: InvitesConfig,
}

impl ServerConfig {
	/// Address to bind, with IPv6 hosts bracketed.
	pub fn socket_addr(&self) -> String {
		if self.http.host.contains(':') {
			format!("[{}]:{}", self.http.host, self.http.port)
		} else {
			format!("{}:{}", self.http.host, self.http.port)
		}
	}

	/// Merge layers in order (later wins), fill defaults and validate.
	pub fn from_layers(
		layers: impl IntoIterator<Item = ServerConfigLayer>,
	) -> Result<Self, ConfigError> {
		let mut merged = ServerConfigLayer::default();
		for layer in layers {
			merged.merge(layer);
		}

		let config = Self {
			http: merged.http.finalize(),
			logging: merged.logging.finalize(),
			paths: merged.paths.finalize(),
			gate: merged.gate.finalize(),
			invites: merged.invites.finalize(),
		};
		config.gate.validate()?;

		info!(
			addr = %config.socket_addr(),
			guarded_prefix = %config.gate.guarded_prefix,
			credentials_file = %config.invites.credentials_file.display(),
			"configuration resolved"
		);
		Ok(config)
	}
}

/// Load the system config file (if present) and the environment.
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load(Path::new(SYSTEM_CONFIG_PATH), false)
}

/// Load an explicitly named config file, which must exist, and the environment.
pub fn load_config_with_file(path: impl AsRef<Path>) -> Result<ServerConfig, ConfigError> {
	load(path.as_ref(), true)
}

fn load(path: &Path, required: bool) -> Result<ServerConfig, ConfigError> {
	ServerConfig::from_layers([file_layer(path, required)?, process_env_layer()?])
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn env(vars: &'static [(&'static str, &'static str)]) -> ServerConfigLayer {
		env_layer(|name| {
			vars.iter()
				.find(|(key, _)| *key == name)
				.map(|(_, value)| value.to_string())
		})
		.unwrap()
	}

	#[test]
	fn no_layers_gives_site_defaults() {
		let config = ServerConfig::from_layers([]).unwrap();
		assert_eq!(config.socket_addr(), "0.0.0.0:8080");
		assert_eq!(config.gate.guarded_prefix, "/bot");
		assert_eq!(config.invites.invite_base_url, "https://discord.gg/");
	}

	#[test]
	fn ipv6_host_is_bracketed() {
		let config = ServerConfig::from_layers([env(&[
			("PERCH_SERVER_HOST", "::"),
			("PERCH_SERVER_PORT", "3000"),
		])])
		.unwrap();
		assert_eq!(config.socket_addr(), "[::]:3000");
	}

	#[test]
	fn environment_overrides_file() {
		let file: ServerConfigLayer = toml::from_str(
			r#"
[gate]
guarded_prefix = "/members"
cookie_name = "tos"

[invites]
default_max_age_secs = 600
"#,
		)
		.unwrap();
		let config = ServerConfig::from_layers([
			file,
			env(&[("PERCH_SERVER_GATE_COOKIE_NAME", "tos_v2")]),
		])
		.unwrap();

		assert_eq!(config.gate.guarded_prefix, "/members");
		assert_eq!(config.gate.cookie_name, "tos_v2");
		assert_eq!(config.invites.default_max_age_secs, 600);
	}

	#[test]
	fn invalid_gate_fails_resolution() {
		let err = ServerConfig::from_layers([env(&[(
			"PERCH_SERVER_GATE_GUARDED_PREFIX",
			"/health",
		)])])
		.unwrap_err();
		assert!(matches!(
			err,
			ConfigError::Gate(GateConfigError::ReservedRoute { .. })
		));
	}

	#[test]
	fn explicit_file_must_exist() {
		let err = load_config_with_file("/nonexistent/perch.toml").unwrap_err();
		assert!(matches!(err, ConfigError::MissingFile(_)));
	}

	#[test]
	fn explicit_file_is_loaded() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[paths]\nlanding_page = \"welcome.html\"").unwrap();

		let config = load_config_with_file(file.path()).unwrap();
		assert_eq!(
			config.paths.landing_page,
			std::path::PathBuf::from("welcome.html")
		);
	}
}
