// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::credentials::UpstreamCredential;
use crate::error::UpstreamError;

/// An invite as returned by the upstream. Only `code` is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedInvite {
	pub code: String,
	/// Seconds of validity. `None` or `0` means the broker default applies.
	pub max_age: Option<u64>,
	pub max_uses: Option<u32>,
	pub uses: Option<u32>,
}

/// Service able to mint a new invite for a link id.
#[async_trait]
pub trait InviteUpstream: Send + Sync {
	async fn create_invite(
		&self,
		id: &str,
		credential: &UpstreamCredential,
	) -> Result<CreatedInvite, UpstreamError>;
}
