// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cache-first invite resolution with stale-on-error fallback.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::cache::{CacheSnapshot, InviteCache, InviteCacheEntry};
use crate::credentials::CredentialStore;
use crate::error::InviteError;
use crate::upstream::{CreatedInvite, InviteUpstream};

/// Resolves link ids to invite URLs.
///
/// Cheap to clone; clones share the cache and refresh locks.
#[derive(Clone)]
pub struct InviteBroker {
	credentials: Arc<CredentialStore>,
	upstream: Arc<dyn InviteUpstream>,
	cache: InviteCache,
	refresh_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
	invite_base_url: String,
	default_max_age_secs: u64,
}

impl fmt::Debug for InviteBroker {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("InviteBroker")
			.field("credentials", &self.credentials)
			.field("cache", &self.cache)
			.field("invite_base_url", &self.invite_base_url)
			.field("default_max_age_secs", &self.default_max_age_secs)
			.finish_non_exhaustive()
	}
}

impl InviteBroker {
	pub fn new(
		credentials: CredentialStore,
		upstream: Arc<dyn InviteUpstream>,
		invite_base_url: impl Into<String>,
		default_max_age_secs: u64,
	) -> Self {
		Self {
			credentials: Arc::new(credentials),
			upstream,
			cache: InviteCache::new(),
			refresh_locks: Arc::new(Mutex::new(HashMap::new())),
			invite_base_url: invite_base_url.into(),
			default_max_age_secs,
		}
	}

	pub fn cache(&self) -> &InviteCache {
		&self.cache
	}

	pub fn credentials(&self) -> &CredentialStore {
		&self.credentials
	}

	/// Return an invite URL for `id`.
	///
	/// A fresh cached invite is returned as-is. Otherwise a new one is
	/// requested; if that fails the last cached invite is returned even when
	/// expired. Only an id with no credential, or a failed refresh with nothing
	/// cached, is an error.
	#[instrument(skip(self), fields(id = %id))]
	pub async fn resolve(&self, id: &str) -> Result<String, InviteError> {
		let Some(credential) = self.credentials.get(id) else {
			debug!("no credential for id");
			return Err(InviteError::NotFound(id.to_string()));
		};

		if let Some(url) = self.fresh_url(id).await {
			debug!("serving cached invite");
			return Ok(url);
		}

		let lock = self.refresh_lock(id).await;
		let _guard = lock.lock().await;

		// Another caller may have refreshed while we waited.
		if let Some(url) = self.fresh_url(id).await {
			debug!("serving invite refreshed by concurrent request");
			return Ok(url);
		}

		match self.upstream.create_invite(id, credential).await {
			Ok(invite) => {
				let entry = self.entry_from(invite, Utc::now());
				let url = entry.url.clone();
				info!(code = %entry.code, expires_at = %entry.expires_at, "refreshed invite");
				self.cache.insert(id, entry).await;
				Ok(url)
			}
			Err(e) => match self.cache.get(id).await {
				Some(stale) => {
					warn!(
						error = %e,
						status = e.status(),
						expires_at = %stale.expires_at,
						"invite refresh failed, serving stale invite"
					);
					Ok(stale.url)
				}
				None => {
					warn!(error = %e, status = e.status(), "invite refresh failed with nothing cached");
					Err(InviteError::Upstream(e))
				}
			},
		}
	}

	/// Snapshot of the cached entry for `id`. Never refreshes.
	pub async fn inspect(&self, id: &str) -> Result<CacheSnapshot, InviteError> {
		self.cache
			.get(id)
			.await
			.map(|entry| entry.snapshot(Utc::now()))
			.ok_or_else(|| InviteError::NotFound(id.to_string()))
	}

	async fn fresh_url(&self, id: &str) -> Option<String> {
		self.cache
			.get(id)
			.await
			.filter(|entry| entry.is_fresh(Utc::now()))
			.map(|entry| entry.url)
	}

	async fn refresh_lock(&self, id: &str) -> Arc<Mutex<()>> {
		let mut locks = self.refresh_locks.lock().await;
		locks.entry(id.to_string()).or_default().clone()
	}

	fn entry_from(&self, invite: CreatedInvite, now: DateTime<Utc>) -> InviteCacheEntry {
		let max_age_secs = invite
			.max_age
			.filter(|secs| *secs > 0)
			.unwrap_or(self.default_max_age_secs);

		InviteCacheEntry {
			url: format!("{}{}", self.invite_base_url, invite.code),
			code: invite.code,
			expires_at: expiry(now, max_age_secs),
			max_uses: invite.max_uses,
			uses: invite.uses.unwrap_or(0),
		}
	}
}

fn expiry(now: DateTime<Utc>, max_age_secs: u64) -> DateTime<Utc> {
	i64::try_from(max_age_secs)
		.ok()
		.and_then(Duration::try_seconds)
		.and_then(|ttl| now.checked_add_signed(ttl))
		.unwrap_or(DateTime::<Utc>::MAX_UTC)
}
