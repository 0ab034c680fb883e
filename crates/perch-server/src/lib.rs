// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! perch personal-site server.
//!
//! Serves the terms-gated landing route and the Discord invite redirects.

pub mod api;
pub mod client_info;
pub mod error;
pub mod gate_middleware;
pub mod routes;

pub use api::{create_app_state, create_app_state_with_upstream, create_router, AppState};
pub use error::ServerError;
pub use perch_server_config::ServerConfig;
