// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the invite broker.

use std::path::PathBuf;

use thiserror::Error;

/// Failures loading the credential table.
#[derive(Debug, Error)]
pub enum CredentialError {
	#[error("failed to read credentials file {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse credentials file {path}: {source}")]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}

/// Errors from the invite-creation upstream.
#[derive(Debug, Error)]
pub enum UpstreamError {
	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// Upstream answered with a non-success status.
	#[error("Upstream API error: {status} - {body}")]
	Status { status: u16, body: String },

	/// Success status but the payload had no usable invite code.
	#[error("Invalid response from upstream: {0}")]
	InvalidResponse(String),
}

impl UpstreamError {
	/// HTTP status to surface to the caller. Transport and payload failures
	/// have no upstream status and map to 500.
	pub fn status(&self) -> u16 {
		match self {
			UpstreamError::Status { status, .. } => *status,
			UpstreamError::Network(_) | UpstreamError::InvalidResponse(_) => 500,
		}
	}

	/// Upstream response body or failure description.
	pub fn details(&self) -> String {
		match self {
			UpstreamError::Status { body, .. } => body.clone(),
			UpstreamError::Network(e) => e.to_string(),
			UpstreamError::InvalidResponse(message) => message.clone(),
		}
	}
}

/// Errors returned by [`crate::InviteBroker`].
#[derive(Debug, Error)]
pub enum InviteError {
	#[error("no invite configured for id {0}")]
	NotFound(String),

	/// Refresh failed and nothing was cached to fall back on.
	#[error("failed to create invite: {0}")]
	Upstream(#[from] UpstreamError),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_error_surfaces_upstream_status() {
		let err = UpstreamError::Status {
			status: 403,
			body: "{\"message\":\"Missing Permissions\"}".to_string(),
		};
		assert_eq!(err.status(), 403);
		assert!(err.details().contains("Missing Permissions"));
	}

	#[test]
	fn invalid_response_maps_to_500() {
		let err = UpstreamError::InvalidResponse("missing code".to_string());
		assert_eq!(err.status(), 500);
		assert_eq!(err.details(), "missing code");
	}

	#[test]
	fn not_found_names_the_id() {
		let err = InviteError::NotFound("general".to_string());
		assert!(err.to_string().contains("general"));
	}
}
