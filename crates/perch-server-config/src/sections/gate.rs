// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Terms-of-service gate settings.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::GateConfigError;

pub const DEFAULT_GUARDED_PREFIX: &str = "/bot";
pub const DEFAULT_ACCEPT_PATH: &str = "/__accept-terms";
pub const DEFAULT_COOKIE_NAME: &str = "t3_terms_accepted";
pub const DEFAULT_COOKIE_VALUE: &str = "true";
/// One year.
pub const DEFAULT_COOKIE_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;
pub const DEFAULT_TOS_FILE: &str = "public/tos.html";

/// Fixed routes the gate paths must not shadow.
pub const RESERVED_ROUTES: &[&str] = &["/health", "/api/test"];

#[derive(Debug, Clone)]
pub struct GateConfig {
	pub guarded_prefix: String,
	pub accept_path: String,
	pub cookie_name: String,
	pub cookie_value: String,
	pub cookie_max_age_secs: u64,
	/// Interstitial document containing the return-to placeholder.
	pub tos_file: PathBuf,
}

impl Default for GateConfig {
	fn default() -> Self {
		GateConfigLayer::default().finalize()
	}
}

impl GateConfig {
	/// Check the paths can be mounted as routes and the cookie can be written
	/// into a `Set-Cookie` header unquoted.
	pub fn validate(&self) -> Result<(), GateConfigError> {
		check_route("guarded_prefix", &self.guarded_prefix)?;
		check_route("accept_path", &self.accept_path)?;

		if self.accept_path == self.guarded_prefix {
			return Err(GateConfigError::AcceptPathIsGuarded(self.accept_path.clone()));
		}
		if self.cookie_name.is_empty() || !self.cookie_name.chars().all(is_token_char) {
			return Err(GateConfigError::CookieName(self.cookie_name.clone()));
		}
		if self.cookie_value.is_empty() || !self.cookie_value.chars().all(is_cookie_octet) {
			return Err(GateConfigError::CookieValue(self.cookie_value.clone()));
		}
		Ok(())
	}
}

fn check_route(field: &'static str, value: &str) -> Result<(), GateConfigError> {
	let err_value = || value.to_string();

	if !value.starts_with('/') {
		return Err(GateConfigError::NotAbsolute {
			field,
			value: err_value(),
		});
	}
	if value
		.chars()
		.any(|c| matches!(c, '{' | '}' | '*') || c.is_whitespace() || c.is_control())
	{
		return Err(GateConfigError::RouteSyntax {
			field,
			value: err_value(),
		});
	}
	if RESERVED_ROUTES.contains(&value) {
		return Err(GateConfigError::ReservedRoute {
			field,
			value: err_value(),
		});
	}
	Ok(())
}

/// RFC 7230 token character, as required for cookie names.
fn is_token_char(c: char) -> bool {
	c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c)
}

/// RFC 6265 `cookie-octet`: printable ASCII except `"` `,` `;` `\`.
fn is_cookie_octet(c: char) -> bool {
	c.is_ascii_graphic() && !matches!(c, '"' | ',' | ';' | '\\')
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfigLayer {
	pub guarded_prefix: Option<String>,
	pub accept_path: Option<String>,
	pub cookie_name: Option<String>,
	pub cookie_value: Option<String>,
	pub cookie_max_age_secs: Option<u64>,
	pub tos_file: Option<String>,
}

impl GateConfigLayer {
	pub fn merge(&mut self, other: GateConfigLayer) {
		overlay!(
			self,
			other;
			guarded_prefix,
			accept_path,
			cookie_name,
			cookie_value,
			cookie_max_age_secs,
			tos_file,
		);
	}

	pub fn finalize(self) -> GateConfig {
		let or_default = |value: Option<String>, default: &str| value.unwrap_or_else(|| default.to_string());

		GateConfig {
			guarded_prefix: or_default(self.guarded_prefix, DEFAULT_GUARDED_PREFIX),
			accept_path: or_default(self.accept_path, DEFAULT_ACCEPT_PATH),
			cookie_name: or_default(self.cookie_name, DEFAULT_COOKIE_NAME),
			cookie_value: or_default(self.cookie_value, DEFAULT_COOKIE_VALUE),
			cookie_max_age_secs: self.cookie_max_age_secs.unwrap_or(DEFAULT_COOKIE_MAX_AGE_SECS),
			tos_file: or_default(self.tos_file, DEFAULT_TOS_FILE).into(),
		}
	}
}
