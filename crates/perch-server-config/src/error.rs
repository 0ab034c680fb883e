// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Failures while resolving the server configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
	/// An explicitly requested config file does not exist.
	#[error("config file {0} does not exist")]
	MissingFile(PathBuf),

	#[error("cannot read config file {path}: {source}")]
	Unreadable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("config file {path} is not valid TOML: {source}")]
	Malformed {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// An environment variable that must hold a number does not.
	#[error("{var}={value:?} is not a valid {expected}")]
	NotANumber {
		var: &'static str,
		value: String,
		expected: &'static str,
	},

	#[error("invalid gate settings: {0}")]
	Gate(#[from] GateConfigError),
}

/// Gate settings the router or the `Set-Cookie` header cannot accept.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateConfigError {
	#[error("{field} must be an absolute path, got {value:?}")]
	NotAbsolute { field: &'static str, value: String },

	/// Route syntax characters would turn the path into a capture or wildcard.
	#[error("{field} must be a literal path, got {value:?}")]
	RouteSyntax { field: &'static str, value: String },

	#[error("{field} {value:?} is already served by another route")]
	ReservedRoute { field: &'static str, value: String },

	#[error("accept path and guarded prefix must differ, both are {0:?}")]
	AcceptPathIsGuarded(String),

	#[error("cookie name {0:?} is empty or contains separators")]
	CookieName(String),

	#[error("cookie value {0:?} contains characters not allowed in a cookie")]
	CookieValue(String),
}
