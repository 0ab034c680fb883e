// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Filesystem locations for documents served by the site.

use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_LANDING_PAGE: &str = "thanks.html";

#[derive(Debug, Clone)]
pub struct PathsConfig {
	pub public_dir: PathBuf,
	/// Page served on the guarded route once the gate lets a visitor through,
	/// relative to `public_dir`.
	pub landing_page: PathBuf,
}

impl PathsConfig {
	pub fn landing_page_path(&self) -> PathBuf {
		self.public_dir.join(&self.landing_page)
	}
}

impl Default for PathsConfig {
	fn default() -> Self {
		PathsConfigLayer::default().finalize()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfigLayer {
	pub public_dir: Option<String>,
	pub landing_page: Option<String>,
}

impl PathsConfigLayer {
	pub fn merge(&mut self, other: PathsConfigLayer) {
		overlay!(self, other; public_dir, landing_page);
	}

	pub fn finalize(self) -> PathsConfig {
		PathsConfig {
			public_dir: self.public_dir.unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string()).into(),
			landing_page: self
				.landing_page
				.unwrap_or_else(|| DEFAULT_LANDING_PAGE.to_string())
				.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn landing_page_resolves_under_public_dir() {
		assert_eq!(
			PathsConfig::default().landing_page_path(),
			PathBuf::from("public/thanks.html")
		);
	}

	#[test]
	fn absolute_landing_page_ignores_public_dir() {
		let config = PathsConfigLayer {
			landing_page: Some("/srv/site/thanks.html".to_string()),
			..Default::default()
		}
		.finalize();
		assert_eq!(
			config.landing_page_path(),
			PathBuf::from("/srv/site/thanks.html")
		);
	}
}
