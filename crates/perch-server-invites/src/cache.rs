// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory invite cache.
//!
//! Entries are fully replaced on refresh and never removed, so an expired
//! entry is still available for stale fallback.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

/// A cached invite for one link id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteCacheEntry {
	pub url: String,
	pub code: String,
	pub expires_at: DateTime<Utc>,
	pub max_uses: Option<u32>,
	/// Advisory; mirrored from the upstream at creation time.
	pub uses: u32,
}

impl InviteCacheEntry {
	pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
		self.expires_at > now
	}

	pub fn snapshot(&self, now: DateTime<Utc>) -> CacheSnapshot {
		CacheSnapshot {
			url: self.url.clone(),
			expires_at: self.expires_at.to_rfc3339_opts(SecondsFormat::Millis, true),
			expires_in_secs: (self.expires_at - now).num_seconds().max(0),
			code: self.code.clone(),
			max_uses: self.max_uses,
			uses: self.uses,
			is_expired: !self.is_fresh(now),
		}
	}
}

/// Point-in-time view of a cache entry, as served by the inspect endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheSnapshot {
	pub url: String,
	pub expires_at: String,
	pub expires_in_secs: i64,
	pub code: String,
	pub max_uses: Option<u32>,
	pub uses: u32,
	pub is_expired: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InviteCache {
	entries: Arc<RwLock<HashMap<String, InviteCacheEntry>>>,
}

impl InviteCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn get(&self, id: &str) -> Option<InviteCacheEntry> {
		self.entries.read().await.get(id).cloned()
	}

	/// Insert or fully replace the entry for `id`.
	pub async fn insert(&self, id: impl Into<String>, entry: InviteCacheEntry) {
		self.entries.write().await.insert(id.into(), entry);
	}

	pub async fn len(&self) -> usize {
		self.entries.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.entries.read().await.is_empty()
	}
}
