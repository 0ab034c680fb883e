// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Discord invite redirect and cache inspection handlers.

use axum::{
	extract::{Path, State},
	http::{header::LOCATION, StatusCode},
	response::{IntoResponse, Response},
	Json,
};
use perch_server_invites::CacheSnapshot;

use crate::{api::AppState, error::ServerError};

/// GET /discord/{id} - redirect to a current invite for the link id.
pub async fn redirect_to_invite(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Response, ServerError> {
	let url = state.broker.resolve(&id).await?;
	Ok((StatusCode::FOUND, [(LOCATION, url)]).into_response())
}

/// GET /discord/{id}/cache - show the cached invite without refreshing it.
pub async fn inspect_invite_cache(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<CacheSnapshot>, ServerError> {
	Ok(Json(state.broker.inspect(&id).await?))
}
