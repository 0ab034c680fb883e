// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cookie header parsing and the acceptance `Set-Cookie` value.

use http::header::COOKIE;
use http::HeaderMap;

/// Extract a cookie value by name from the request's `Cookie` headers.
///
/// Browsers may split cookies over several headers when HTTP/2 is in use,
/// so every `Cookie` header is searched.
pub fn extract_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
	headers
		.get_all(COOKIE)
		.iter()
		.filter_map(|value| value.to_str().ok())
		.flat_map(|value| value.split(';'))
		.find_map(|cookie| {
			let (name, value) = cookie.trim().split_once('=')?;
			if name == cookie_name {
				Some(value.to_string())
			} else {
				None
			}
		})
}

/// Build the `Set-Cookie` value recording terms acceptance.
pub fn acceptance_cookie(name: &str, value: &str, max_age_secs: u64) -> String {
	format!("{name}={value}; Max-Age={max_age_secs}; Path=/; HttpOnly; Secure; SameSite=Lax")
}

#[cfg(test)]
mod tests {
	use super::*;
	use http::HeaderValue;

	#[test]
	fn extracts_from_single_cookie() {
		let mut headers = HeaderMap::new();
		headers.insert(COOKIE, HeaderValue::from_static("t3_terms_accepted=true"));
		assert_eq!(
			extract_cookie(&headers, "t3_terms_accepted"),
			Some("true".to_string())
		);
	}

	#[test]
	fn extracts_from_multiple_cookies_with_whitespace() {
		let mut headers = HeaderMap::new();
		headers.insert(
			COOKIE,
			HeaderValue::from_static("  theme=dark ; t3_terms_accepted=true ;other=1"),
		);
		assert_eq!(
			extract_cookie(&headers, "t3_terms_accepted"),
			Some("true".to_string())
		);
	}

	#[test]
	fn searches_every_cookie_header() {
		let mut headers = HeaderMap::new();
		headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
		headers.append(COOKIE, HeaderValue::from_static("t3_terms_accepted=yes"));
		assert_eq!(
			extract_cookie(&headers, "t3_terms_accepted"),
			Some("yes".to_string())
		);
	}

	#[test]
	fn returns_none_when_missing() {
		let mut headers = HeaderMap::new();
		assert_eq!(extract_cookie(&headers, "t3_terms_accepted"), None);
		headers.insert(COOKIE, HeaderValue::from_static("t3_terms_accepted_old=true"));
		assert_eq!(extract_cookie(&headers, "t3_terms_accepted"), None);
	}

	#[test]
	fn acceptance_cookie_has_security_attributes() {
		let cookie = acceptance_cookie("t3_terms_accepted", "true", 31_536_000);
		assert!(cookie.starts_with("t3_terms_accepted=true;"));
		assert!(cookie.contains("Max-Age=31536000"));
		assert!(cookie.contains("Path=/"));
		assert!(cookie.contains("HttpOnly"));
		assert!(cookie.contains("Secure"));
		assert!(cookie.contains("SameSite=Lax"));
	}
}
