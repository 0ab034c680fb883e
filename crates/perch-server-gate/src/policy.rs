// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Intercept decisions, return-to sanitation and interstitial rendering.

use std::path::PathBuf;

use http::header::USER_AGENT;
use http::HeaderMap;
use tracing::{instrument, warn};

use crate::bot::is_bot;
use crate::cookie::{acceptance_cookie, extract_cookie};

/// Token in the interstitial document replaced with the encoded original URL.
pub const RETURN_TO_PLACEHOLDER: &str = "%%RETURN_TO%%";

const INTERSTITIAL_MISSING: &str = "ToS page not found. Please add public/tos.html";

/// Static gate configuration.
#[derive(Debug, Clone)]
pub struct GateSettings {
	pub guarded_prefix: String,
	pub accept_path: String,
	pub cookie_name: String,
	pub cookie_value: String,
	pub cookie_max_age_secs: u64,
	/// HTML document served in place of guarded content.
	pub tos_file: PathBuf,
}

/// Why a request was allowed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
	AcceptEndpoint,
	Unguarded,
	Crawler,
	Accepted,
}

impl PassReason {
	pub fn as_str(&self) -> &'static str {
		match self {
			PassReason::AcceptEndpoint => "accept_endpoint",
			PassReason::Unguarded => "unguarded",
			PassReason::Crawler => "crawler",
			PassReason::Accepted => "accepted",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
	Pass(PassReason),
	Intercept,
}

/// Body served instead of guarded content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interstitial {
	Html(String),
	/// The interstitial document could not be read.
	PlainText(&'static str),
}

/// Check if a redirect target is a same-origin relative path.
///
/// Rejects absolute URLs, protocol-relative `//host` and the `/\host` form
/// some browsers normalize to protocol-relative. Control characters are
/// rejected so the value is always a valid `Location` header.
pub fn is_safe_redirect(target: &str) -> bool {
	target.starts_with('/')
		&& !target.starts_with("//")
		&& !target.starts_with("/\\")
		&& !target.chars().any(char::is_control)
}

/// True when a `%` is not followed by two hex digits.
fn has_malformed_escape(encoded: &str) -> bool {
	let bytes = encoded.as_bytes();
	let mut i = 0;
	while i < bytes.len() {
		if bytes[i] == b'%' {
			let valid = bytes
				.get(i + 1..i + 3)
				.is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
			if !valid {
				return true;
			}
			i += 3;
		} else {
			i += 1;
		}
	}
	false
}

/// The gate policy. Holds only static configuration; all per-client state is
/// the acceptance cookie.
#[derive(Debug, Clone)]
pub struct Gate {
	settings: GateSettings,
}

impl Gate {
	pub fn new(settings: GateSettings) -> Self {
		Self { settings }
	}

	pub fn settings(&self) -> &GateSettings {
		&self.settings
	}

	pub fn accept_path(&self) -> &str {
		&self.settings.accept_path
	}

	/// Decide whether a request reaches its route or gets the interstitial.
	pub fn decide(&self, path: &str, headers: &HeaderMap) -> GateDecision {
		if path == self.settings.accept_path {
			return GateDecision::Pass(PassReason::AcceptEndpoint);
		}

		if !path.starts_with(&self.settings.guarded_prefix) {
			return GateDecision::Pass(PassReason::Unguarded);
		}

		let user_agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok());
		if is_bot(user_agent) {
			return GateDecision::Pass(PassReason::Crawler);
		}

		if self.has_accepted(headers) {
			return GateDecision::Pass(PassReason::Accepted);
		}

		GateDecision::Intercept
	}

	/// True when the request carries the acceptance cookie with the exact
	/// configured value.
	pub fn has_accepted(&self, headers: &HeaderMap) -> bool {
		extract_cookie(headers, &self.settings.cookie_name)
			.is_some_and(|value| value == self.settings.cookie_value)
	}

	/// Load the interstitial document and embed the original request URI
	/// (path and query) as the return target.
	///
	/// A missing or unreadable document degrades to a plain-text notice.
	#[instrument(skip(self), fields(tos_file = %self.settings.tos_file.display()))]
	pub async fn render_interstitial(&self, original_uri: &str) -> Interstitial {
		match tokio::fs::read_to_string(&self.settings.tos_file).await {
			Ok(document) => {
				let encoded = urlencoding::encode(original_uri);
				Interstitial::Html(document.replace(RETURN_TO_PLACEHOLDER, &encoded))
			}
			Err(e) => {
				warn!(error = %e, "failed to read interstitial document");
				Interstitial::PlainText(INTERSTITIAL_MISSING)
			}
		}
	}

	/// Resolve the post-acceptance redirect from the submitted `returnTo` field.
	///
	/// The field holds a percent-encoded path. Anything absent, undecodable or
	/// not a same-origin relative path falls back to the guarded prefix.
	pub fn accept_target(&self, return_to: Option<&str>) -> String {
		let fallback = || self.settings.guarded_prefix.clone();

		let Some(encoded) = return_to.filter(|v| !v.is_empty()) else {
			return fallback();
		};

		if has_malformed_escape(encoded) {
			warn!(return_to = %encoded, "malformed percent escape in return target");
			return fallback();
		}

		match urlencoding::decode(encoded) {
			Ok(decoded) if is_safe_redirect(&decoded) => decoded.into_owned(),
			Ok(decoded) => {
				warn!(return_to = %decoded, "rejected unsafe return target");
				fallback()
			}
			Err(_) => fallback(),
		}
	}

	/// The `Set-Cookie` header value recording acceptance.
	pub fn acceptance_cookie(&self) -> String {
		acceptance_cookie(
			&self.settings.cookie_name,
			&self.settings.cookie_value,
			self.settings.cookie_max_age_secs,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use http::header::COOKIE;
	use http::HeaderValue;
	use proptest::prelude::*;
	use std::io::Write;

	const BROWSER_UA: &str =
		"Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/126.0 Safari/537.36";

	fn settings() -> GateSettings {
		GateSettings {
			guarded_prefix: "/bot".to_string(),
			accept_path: "/__accept-terms".to_string(),
			cookie_name: "t3_terms_accepted".to_string(),
			cookie_value: "true".to_string(),
			cookie_max_age_secs: 31_536_000,
			tos_file: PathBuf::from("/nonexistent/tos.html"),
		}
	}

	fn headers(user_agent: &str, cookie: Option<&'static str>) -> HeaderMap {
		let mut headers = HeaderMap::new();
		headers.insert(USER_AGENT, HeaderValue::from_str(user_agent).unwrap());
		if let Some(cookie) = cookie {
			headers.insert(COOKIE, HeaderValue::from_static(cookie));
		}
		headers
	}

	mod decide {
		use super::*;

		#[test]
		fn accept_path_always_passes() {
			let gate = Gate::new(settings());
			assert_eq!(
				gate.decide("/__accept-terms", &headers(BROWSER_UA, None)),
				GateDecision::Pass(PassReason::AcceptEndpoint)
			);
		}

		#[test]
		fn unguarded_path_passes() {
			let gate = Gate::new(settings());
			assert_eq!(
				gate.decide("/discord/abc", &headers(BROWSER_UA, None)),
				GateDecision::Pass(PassReason::Unguarded)
			);
		}

		#[test]
		fn crawler_passes_without_cookie() {
			let gate = Gate::new(settings());
			assert_eq!(
				gate.decide(
					"/bot",
					&headers("Mozilla/5.0 (compatible; Discordbot/2.0;)", None)
				),
				GateDecision::Pass(PassReason::Crawler)
			);
		}

		#[test]
		fn browser_without_cookie_is_intercepted() {
			let gate = Gate::new(settings());
			assert_eq!(
				gate.decide("/bot", &headers(BROWSER_UA, None)),
				GateDecision::Intercept
			);
			assert_eq!(
				gate.decide("/bot/callback", &headers(BROWSER_UA, None)),
				GateDecision::Intercept
			);
		}

		#[test]
		fn browser_with_cookie_passes() {
			let gate = Gate::new(settings());
			assert_eq!(
				gate.decide("/bot", &headers(BROWSER_UA, Some("t3_terms_accepted=true"))),
				GateDecision::Pass(PassReason::Accepted)
			);
		}

		#[test]
		fn wrong_cookie_value_is_intercepted() {
			let gate = Gate::new(settings());
			assert_eq!(
				gate.decide("/bot", &headers(BROWSER_UA, Some("t3_terms_accepted=1"))),
				GateDecision::Intercept
			);
		}

		#[test]
		fn missing_user_agent_is_intercepted() {
			let gate = Gate::new(settings());
			assert_eq!(gate.decide("/bot", &HeaderMap::new()), GateDecision::Intercept);
		}
	}

	mod accept_target {
		use super::*;

		#[test]
		fn decodes_relative_target() {
			let gate = Gate::new(settings());
			assert_eq!(
				gate.accept_target(Some("%2Fbot%3Fcode%3Dabc")),
				"/bot?code=abc"
			);
		}

		#[test]
		fn absent_or_empty_falls_back() {
			let gate = Gate::new(settings());
			assert_eq!(gate.accept_target(None), "/bot");
			assert_eq!(gate.accept_target(Some("")), "/bot");
		}

		#[test]
		fn absolute_url_falls_back() {
			let gate = Gate::new(settings());
			assert_eq!(gate.accept_target(Some("https%3A%2F%2Fevil.example")), "/bot");
		}

		#[test]
		fn protocol_relative_falls_back() {
			let gate = Gate::new(settings());
			assert_eq!(gate.accept_target(Some("%2F%2Fevil.example")), "/bot");
			assert_eq!(gate.accept_target(Some("%2F%5Cevil.example")), "/bot");
		}

		#[test]
		fn invalid_utf8_falls_back() {
			let gate = Gate::new(settings());
			assert_eq!(gate.accept_target(Some("%FF%FE")), "/bot");
		}

		#[test]
		fn malformed_escape_falls_back() {
			let gate = Gate::new(settings());
			assert_eq!(gate.accept_target(Some("%2Fbot%zz%")), "/bot");
			assert_eq!(gate.accept_target(Some("%2Fbot%2")), "/bot");
			assert_eq!(gate.accept_target(Some("%2Fbot%")), "/bot");
		}

		#[test]
		fn unencoded_relative_target_is_kept() {
			let gate = Gate::new(settings());
			assert_eq!(gate.accept_target(Some("/bot/callback")), "/bot/callback");
		}

		#[test]
		fn escape_scanner() {
			assert!(!has_malformed_escape("%2Fbot%3Fa%3db"));
			assert!(!has_malformed_escape("plain"));
			assert!(has_malformed_escape("%g0"));
			assert!(has_malformed_escape("abc%"));
		}

		#[test]
		fn header_injection_falls_back() {
			let gate = Gate::new(settings());
			assert_eq!(
				gate.accept_target(Some("%2Fbot%0D%0ASet-Cookie%3A%20x%3D1")),
				"/bot"
			);
		}

		proptest! {
			#[test]
			fn target_is_always_same_origin(raw in ".{0,64}") {
				let gate = Gate::new(settings());
				let encoded = urlencoding::encode(&raw);
				let target = gate.accept_target(Some(&encoded));
				prop_assert!(is_safe_redirect(&target));
			}
		}
	}

	mod interstitial {
		use super::*;

		#[tokio::test]
		async fn substitutes_every_placeholder() {
			let mut file = tempfile::NamedTempFile::new().unwrap();
			write!(
				file,
				"<form><input name=\"returnTo\" value=\"%%RETURN_TO%%\"></form><a href=\"?r=%%RETURN_TO%%\">"
			)
			.unwrap();

			let gate = Gate::new(GateSettings {
				tos_file: file.path().to_path_buf(),
				..settings()
			});

			let Interstitial::Html(body) = gate.render_interstitial("/bot?code=a b").await else {
				panic!("expected html interstitial");
			};
			assert!(!body.contains(RETURN_TO_PLACEHOLDER));
			assert_eq!(body.matches("%2Fbot%3Fcode%3Da%20b").count(), 2);
		}

		#[tokio::test]
		async fn missing_document_degrades_to_plain_text() {
			let gate = Gate::new(settings());
			assert!(matches!(
				gate.render_interstitial("/bot").await,
				Interstitial::PlainText(_)
			));
		}
	}

	#[test]
	fn acceptance_cookie_uses_settings() {
		let gate = Gate::new(GateSettings {
			cookie_name: "tos".to_string(),
			cookie_value: "ok".to_string(),
			cookie_max_age_secs: 60,
			..settings()
		});
		let cookie = gate.acceptance_cookie();
		assert!(cookie.starts_with("tos=ok;"));
		assert!(cookie.contains("Max-Age=60"));
	}
}
