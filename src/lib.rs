// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Control de Cafés: session and proxy API
//!
//! This crate provides the HTTP layer in front of the coffee backend:
//! login/logout with cookie sessions, balance and movement relays, and the
//! user directory listing used by the betting pages.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;

use config::Config;
use services::{CoffeeClient, UserDirectory};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub coffee: CoffeeClient,
    pub users: UserDirectory,
}

impl AppState {
    /// Build the upstream clients described by `config`.
    pub fn from_config(config: Config) -> Self {
        let coffee = CoffeeClient::new(config.coffee_api_base.clone());
        let users = UserDirectory::new(config.users_backend_url.clone());
        Self {
            config,
            coffee,
            users,
        }
    }
}
