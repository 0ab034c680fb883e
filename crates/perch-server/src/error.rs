// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use perch_server_invites::{InviteError, UpstreamError};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// No invite configured or cached for the id.
	#[error("Not found: {0}")]
	NotFound(String),

	/// Invite upstream failed and nothing was cached.
	#[error("Upstream error: {0}")]
	Upstream(UpstreamError),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl From<InviteError> for ServerError {
	fn from(err: InviteError) -> Self {
		match err {
			InviteError::NotFound(id) => ServerError::NotFound(id),
			InviteError::Upstream(e) => ServerError::Upstream(e),
		}
	}
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<String>,
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error_response) = match &self {
			ServerError::NotFound(id) => (
				StatusCode::NOT_FOUND,
				ErrorResponse {
					error: "not_found".to_string(),
					message: format!("No invite available for id: {id}"),
					details: None,
				},
			),
			ServerError::Upstream(e) => {
				tracing::error!(error = %e, status = e.status(), "invite upstream error");
				(
					StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
					ErrorResponse {
						error: "upstream_error".to_string(),
						message: "Failed to create invite".to_string(),
						details: Some(e.details()),
					},
				)
			}
			ServerError::Internal(msg) => {
				tracing::error!(error = %msg, "internal error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse {
						error: "internal_error".to_string(),
						message: "An internal error occurred".to_string(),
						details: None,
					},
				)
			}
		};

		(status, Json(error_response)).into_response()
	}
}
