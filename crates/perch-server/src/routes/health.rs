// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health and diagnostic HTTP handlers.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
	pub version: &'static str,
	pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ApiTestResponse {
	pub message: &'static str,
	pub timestamp: String,
}

/// GET /health - liveness check.
pub async fn health_check() -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "ok",
		version: env!("CARGO_PKG_VERSION"),
		timestamp: Utc::now().to_rfc3339(),
	})
}

/// GET /api/test
pub async fn api_test() -> Json<ApiTestResponse> {
	Json(ApiTestResponse {
		message: "API working!",
		timestamp: Utc::now().to_rfc3339(),
	})
}
