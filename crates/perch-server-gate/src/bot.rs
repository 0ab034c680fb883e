// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User-agent based crawler detection.

/// Lowercase substrings that mark a user agent as automated.
///
/// Covers generic crawler words, the preview fetchers of the major search,
/// social and chat services, and common HTTP client libraries.
pub const BOT_KEYWORDS: &[&str] = &[
	"bot",
	"crawl",
	"spider",
	"slurp",
	"bingpreview",
	"facebookexternalhit",
	"applesearch",
	"google",
	"duckduckbot",
	"baiduspider",
	"yandex",
	"discordbot",
	"twitterbot",
	"whatsapp",
	"embedly",
	"linkedinbot",
	"vkshare",
	"telegrambot",
	"okhttp",
	"curl",
	"wget",
	"python-requests",
	"java/",
	"libwww",
	"go-http-client",
];

/// Returns true if the user agent contains any crawler keyword
/// (case-insensitive). A missing user agent is treated as human.
pub fn is_bot(user_agent: Option<&str>) -> bool {
	let Some(user_agent) = user_agent else {
		return false;
	};
	let ua = user_agent.to_lowercase();
	BOT_KEYWORDS.iter().any(|keyword| ua.contains(keyword))
}
