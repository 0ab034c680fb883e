// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Terms-of-service gate middleware.
//!
//! Intercepted requests get the interstitial with a 200 status and the URL
//! left unchanged, so the visitor lands back on the same path after accepting.
//!
//! # Usage
//!
//! ```ignore
//! use axum::middleware::from_fn_with_state;
//!
//! let app = Router::new()
//!     .route("/bot", get(handler))
//!     .layer(from_fn_with_state(state.clone(), gate_layer));
//! ```

use axum::{
	body::Body,
	extract::{Request, State},
	middleware::Next,
	response::{Html, IntoResponse, Response},
};
use perch_server_gate::{GateDecision, Interstitial};

use crate::api::AppState;

pub async fn gate_layer(
	State(state): State<AppState>,
	request: Request<Body>,
	next: Next,
) -> Response {
	let decision = state.gate.decide(request.uri().path(), request.headers());

	match decision {
		GateDecision::Pass(reason) => {
			tracing::trace!(reason = reason.as_str(), "gate pass");
			next.run(request).await
		}
		GateDecision::Intercept => {
			let original_uri = request
				.uri()
				.path_and_query()
				.map(|pq| pq.as_str())
				.unwrap_or_else(|| request.uri().path());
			tracing::debug!(uri = %original_uri, "serving terms interstitial");

			match state.gate.render_interstitial(original_uri).await {
				Interstitial::Html(body) => Html(body).into_response(),
				Interstitial::PlainText(notice) => notice.into_response(),
			}
		}
	}
}
