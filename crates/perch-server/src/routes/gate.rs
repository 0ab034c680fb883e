// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Terms acceptance endpoint.

use axum::{
	extract::{rejection::FormRejection, State},
	http::{
		header::{LOCATION, SET_COOKIE},
		StatusCode,
	},
	response::{IntoResponse, Response},
	Form,
};
use serde::Deserialize;

use crate::api::AppState;

#[derive(Debug, Deserialize)]
pub struct AcceptForm {
	/// Percent-encoded path the visitor was trying to reach.
	#[serde(rename = "returnTo")]
	pub return_to: Option<String>,
}

/// POST {accept path} - record acceptance and send the visitor back.
///
/// Always answers 302; a missing or unusable form sends the visitor to the
/// guarded prefix.
pub async fn accept_terms(
	State(state): State<AppState>,
	form: Result<Form<AcceptForm>, FormRejection>,
) -> Response {
	let return_to = match form {
		Ok(Form(form)) => form.return_to,
		Err(rejection) => {
			tracing::debug!(error = %rejection, "unreadable accept form");
			None
		}
	};

	let target = state.gate.accept_target(return_to.as_deref());
	tracing::info!(target = %target, "terms accepted");

	(
		StatusCode::FOUND,
		[(SET_COOKIE, state.gate.acceptance_cookie()), (LOCATION, target)],
	)
		.into_response()
}
