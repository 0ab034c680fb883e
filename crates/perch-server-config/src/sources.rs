// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reading layers from the config file and the environment.

use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	GateConfigLayer, HttpConfigLayer, InvitesConfigLayer, LoggingConfigLayer, PathsConfigLayer,
};

pub const SYSTEM_CONFIG_PATH: &str = "/etc/perch/server.toml";

/// Read a TOML layer from `path`.
///
/// A missing file is an empty layer unless `required` is set.
pub fn file_layer(path: &Path, required: bool) -> Result<ServerConfigLayer, ConfigError> {
	let content = match std::fs::read_to_string(path) {
		Ok(content) => content,
		Err(e) if e.kind() == ErrorKind::NotFound => {
			if required {
				return Err(ConfigError::MissingFile(path.to_path_buf()));
			}
			debug!(path = %path.display(), "no config file");
			return Ok(ServerConfigLayer::default());
		}
		Err(source) => {
			return Err(ConfigError::Unreadable {
				path: path.to_path_buf(),
				source,
			})
		}
	};

	toml::from_str(&content).map_err(|source| ConfigError::Malformed {
		path: path.to_path_buf(),
		source,
	})
}

/// Layer from the process environment.
pub fn process_env_layer() -> Result<ServerConfigLayer, ConfigError> {
	env_layer(|var| std::env::var(var).ok())
}

/// Build a layer from `PERCH_SERVER_*` variables resolved through `lookup`.
///
/// Blank values count as unset. `PORT` is used when `PERCH_SERVER_PORT` is
/// absent, for hosts that inject it.
pub fn env_layer(
	lookup: impl Fn(&str) -> Option<String>,
) -> Result<ServerConfigLayer, ConfigError> {
	let text = |var: &str| {
		lookup(var)
			.map(|value| value.trim().to_string())
			.filter(|value| !value.is_empty())
	};

	let port = match number("PERCH_SERVER_PORT", text("PERCH_SERVER_PORT"))? {
		Some(port) => Some(port),
		None => number("PORT", text("PORT"))?,
	};

	Ok(ServerConfigLayer {
		http: HttpConfigLayer {
			host: text("PERCH_SERVER_HOST"),
			port,
		},
		logging: LoggingConfigLayer {
			level: text("PERCH_SERVER_LOG_LEVEL"),
		},
		paths: PathsConfigLayer {
			public_dir: text("PERCH_SERVER_PUBLIC_DIR"),
			landing_page: text("PERCH_SERVER_LANDING_PAGE"),
		},
		gate: GateConfigLayer {
			guarded_prefix: text("PERCH_SERVER_GATE_GUARDED_PREFIX"),
			accept_path: text("PERCH_SERVER_GATE_ACCEPT_PATH"),
			cookie_name: text("PERCH_SERVER_GATE_COOKIE_NAME"),
			cookie_value: text("PERCH_SERVER_GATE_COOKIE_VALUE"),
			cookie_max_age_secs: number(
				"PERCH_SERVER_GATE_COOKIE_MAX_AGE_SECS",
				text("PERCH_SERVER_GATE_COOKIE_MAX_AGE_SECS"),
			)?,
			tos_file: text("PERCH_SERVER_GATE_TOS_FILE"),
		},
		invites: InvitesConfigLayer {
			credentials_file: text("PERCH_SERVER_INVITES_CREDENTIALS_FILE"),
			upstream_url: text("PERCH_SERVER_INVITES_UPSTREAM_URL"),
			invite_base_url: text("PERCH_SERVER_INVITES_BASE_URL"),
			default_max_age_secs: number(
				"PERCH_SERVER_INVITES_DEFAULT_MAX_AGE_SECS",
				text("PERCH_SERVER_INVITES_DEFAULT_MAX_AGE_SECS"),
			)?,
		},
	})
}

fn number<T: FromStr>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError> {
	value
		.map(|value| {
			value.parse().map_err(|_| ConfigError::NotANumber {
				var,
				expected: std::any::type_name::<T>(),
				value,
			})
		})
		.transpose()
}
