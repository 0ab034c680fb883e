// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP route handlers.

pub mod gate;
pub mod health;
pub mod invites;
pub mod landing;

use axum::{http::StatusCode, response::IntoResponse};

pub async fn not_found() -> impl IntoResponse {
	(StatusCode::NOT_FOUND, "Not Found")
}
