// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};

/// Creates an HTTP client builder sending `user_agent`.
///
/// Some upstream APIs (Discord among them) reject requests whose agent does
/// not follow their own format; callers usually append [`user_agent`] to it.
///
/// # Example
/// ```ignore
/// let client = perch_common_http::builder_with_user_agent("DiscordBot (https://example.com, 1.0)")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder_with_user_agent(user_agent: impl Into<String>) -> ClientBuilder {
	Client::builder().user_agent(user_agent.into())
}

/// Returns the standard perch User-Agent string.
///
/// Format: `perch/{version} ({os}-{arch})`
pub fn user_agent() -> String {
	format!(
		"perch/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
