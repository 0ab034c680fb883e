// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Terms-of-service gate for one guarded path prefix.
//!
//! Human visitors must accept the terms before reaching the guarded prefix;
//! crawlers are let through so link previews keep working. Acceptance lives
//! entirely in a client cookie, so the server keeps no session table.
//!
//! ```text
//! Request → accept path? ─yes→ pass
//!              │no
//!              ▼
//!        guarded prefix? ─no→ pass
//!              │yes
//!              ▼
//!        crawler UA? ─yes→ pass
//!              │no
//!              ▼
//!        acceptance cookie? ─yes→ pass
//!              │no
//!              ▼
//!        serve interstitial (200, URL unchanged)
//! ```
//!
//! The HTTP wiring (middleware and the accept endpoint) lives in `perch-server`;
//! this crate only holds the policy.

pub mod bot;
pub mod cookie;
pub mod policy;

pub use bot::{is_bot, BOT_KEYWORDS};
pub use cookie::extract_cookie;
pub use policy::{
	is_safe_redirect, Gate, GateDecision, GateSettings, Interstitial, PassReason,
	RETURN_TO_PLACEHOLDER,
};
