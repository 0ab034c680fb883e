// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-id upstream credentials, loaded once at startup.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CredentialError;

const REDACTED: &str = "[REDACTED]";

/// An opaque bearer credential for the invite upstream.
///
/// Formats as `[REDACTED]` and is wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct UpstreamCredential(String);

impl UpstreamCredential {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// The raw credential. Only for building the upstream request.
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for UpstreamCredential {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("UpstreamCredential").field(&REDACTED).finish()
	}
}

impl fmt::Display for UpstreamCredential {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

/// Read-only table of link id to credential.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
	credentials: HashMap<String, UpstreamCredential>,
}

impl CredentialStore {
	/// Load a JSON object of `{ "<id>": "<credential>" }`.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, CredentialError> {
		let path = path.as_ref();
		let contents = std::fs::read_to_string(path).map_err(|source| CredentialError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		let store = Self::from_json(&contents).map_err(|source| CredentialError::Parse {
			path: path.to_path_buf(),
			source,
		})?;
		info!(path = %path.display(), count = store.len(), "loaded invite credentials");
		Ok(store)
	}

	pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
		let raw: HashMap<String, String> = serde_json::from_str(contents)?;
		Ok(raw
			.into_iter()
			.map(|(id, secret)| (id, UpstreamCredential::new(secret)))
			.collect())
	}

	pub fn get(&self, id: &str) -> Option<&UpstreamCredential> {
		self.credentials.get(id)
	}

	pub fn len(&self) -> usize {
		self.credentials.len()
	}

	pub fn is_empty(&self) -> bool {
		self.credentials.is_empty()
	}
}

impl FromIterator<(String, UpstreamCredential)> for CredentialStore {
	fn from_iter<I: IntoIterator<Item = (String, UpstreamCredential)>>(iter: I) -> Self {
		Self {
			credentials: iter.into_iter().collect(),
		}
	}
}
