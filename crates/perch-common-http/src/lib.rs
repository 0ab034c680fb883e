// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for perch.
//!
//! Every outbound call (currently only the invite upstream) goes through a
//! client built here so requests carry the same `User-Agent`.

mod client;

pub use client::{builder_with_user_agent, user_agent};
