// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolve short link ids to Discord invite URLs.
//!
//! The [`InviteBroker`] prefers a cached, unexpired invite. On a miss it asks
//! the [`InviteUpstream`] for a fresh one using the id's credential, and when
//! that fails it falls back to whatever it cached last, even if expired.
//!
//! # Example
//!
//! ```ignore
//! let credentials = CredentialStore::load("invite-credentials.json")?;
//! let upstream = Arc::new(DiscordInviteClient::new(DEFAULT_UPSTREAM_URL)?);
//! let broker = InviteBroker::new(credentials, upstream, "https://discord.gg/", 86_400);
//!
//! let url = broker.resolve("general").await?;
//! ```

pub mod broker;
pub mod cache;
pub mod client;
pub mod credentials;
pub mod error;
pub mod upstream;

pub use broker::InviteBroker;
pub use cache::{CacheSnapshot, InviteCache, InviteCacheEntry};
pub use client::DiscordInviteClient;
pub use credentials::{CredentialStore, UpstreamCredential};
pub use error::{CredentialError, InviteError, UpstreamError};
pub use upstream::{CreatedInvite, InviteUpstream};
