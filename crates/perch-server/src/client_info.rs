// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client information extraction and per-request logging.

use axum::{
	body::Body,
	extract::Request,
	http::{header::USER_AGENT, HeaderMap},
	middleware::Next,
	response::Response,
};

/// Client metadata taken from request headers.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
	pub ip_address: Option<String>,
	pub user_agent: Option<String>,
}

impl ClientInfo {
	pub fn from_headers(headers: &HeaderMap) -> Self {
		Self {
			ip_address: extract_client_ip(headers),
			user_agent: headers
				.get(USER_AGENT)
				.and_then(|v| v.to_str().ok())
				.map(|s| s.to_string()),
		}
	}
}

/// Extract client IP from request headers.
///
/// Checks headers in order of preference:
/// 1. `X-Forwarded-For` (first IP in chain, for reverse proxies)
/// 2. `X-Real-IP` (nginx style)
/// 3. `CF-Connecting-IP` (Cloudflare)
pub fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
	let header_str = |name: &str| {
		headers
			.get(name)
			.and_then(|v| v.to_str().ok())
			.map(str::trim)
			.filter(|s| !s.is_empty())
	};

	if let Some(first_ip) = header_str("x-forwarded-for")
		.and_then(|xff| xff.split(',').next())
		.map(str::trim)
		.filter(|ip| !ip.is_empty())
	{
		return Some(first_ip.to_string());
	}

	header_str("x-real-ip")
		.or_else(|| header_str("cf-connecting-ip"))
		.map(|ip| ip.to_string())
}

/// Middleware logging client IP, method, path and user agent for every request.
pub async fn request_log_layer(request: Request<Body>, next: Next) -> Response {
	let info = ClientInfo::from_headers(request.headers());
	tracing::info!(
		ip = info.ip_address.as_deref().unwrap_or("unknown"),
		method = %request.method(),
		path = %request.uri().path(),
		user_agent = info.user_agent.as_deref().unwrap_or("unknown"),
		"request"
	);
	next.run(request).await
}
