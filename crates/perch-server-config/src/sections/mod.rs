// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for perch-server.

pub mod gate;
pub mod http;
pub mod invites;
pub mod logging;
pub mod paths;

pub use gate::{GateConfig, GateConfigLayer, RESERVED_ROUTES};
pub use http::{HttpConfig, HttpConfigLayer};
pub use invites::{InvitesConfig, InvitesConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use paths::{PathsConfig, PathsConfigLayer};
