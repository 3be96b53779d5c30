// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod movement;
pub mod user;

pub use movement::{balance_from_payload, MovementType};
pub use user::{DirectoryUser, SessionUser};
