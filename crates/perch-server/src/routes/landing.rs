// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	extract::State,
	http::StatusCode,
	response::{Html, IntoResponse, Response},
};

use crate::api::AppState;

/// GET {guarded prefix} - the page behind the gate.
pub async fn landing_page(State(state): State<AppState>) -> Response {
	let path = state.paths.landing_page_path();
	match tokio::fs::read_to_string(&path).await {
		Ok(body) => Html(body).into_response(),
		Err(e) => {
			tracing::warn!(path = %path.display(), error = %e, "landing page unavailable");
			(StatusCode::NOT_FOUND, "Landing page not found").into_response()
		}
	}
}
