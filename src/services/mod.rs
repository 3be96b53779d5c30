// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - upstream clients.

pub mod coffee;
pub mod users;

pub use coffee::{CoffeeClient, LoginSuccess, RelayBody, Relayed};
pub use users::UserDirectory;
