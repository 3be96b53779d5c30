// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cookie-backed session state.
//!
//! A login leaves two cookies behind: `session` holds the bearer token and
//! `coffee_session` a JSON snapshot of the identity (`{"userId", "login"}`)
//! so pages can rehydrate without asking the backend. Neither cookie is
//! signed. Handlers only talk to a [`SessionStore`]; the cookie jar is one
//! implementation of it.

use crate::models::SessionUser;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Bearer token cookie.
pub const SESSION_COOKIE: &str = "session";
/// Identity snapshot cookie.
pub const SNAPSHOT_COOKIE: &str = "coffee_session";
/// Cookie name used by older builds; only ever cleared.
pub const LEGACY_TOKEN_COOKIE: &str = "token";

/// Lifetime of both session cookies (7 days).
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;

/// Storage for named session values.
pub trait SessionStore {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: String);
    fn clear(&mut self, name: &str);
}

/// Identity snapshot stored in [`SNAPSHOT_COOKIE`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
    pub login: Option<String>,
}

impl SessionSnapshot {
    /// Decode a snapshot, returning the user only if `userId` is a non-zero
    /// integer. A non-string `login` reads as empty.
    pub fn decode_user(raw: &str) -> Option<SessionUser> {
        let snapshot: Value = serde_json::from_str(raw).ok()?;
        let id = snapshot.get("userId").and_then(integral_id)?;
        if id == 0 {
            return None;
        }

        let login = snapshot
            .get("login")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Some(SessionUser { id, login })
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Integer value of a JSON number, accepting integral floats like `7.0`.
fn integral_id(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Store the token and identity snapshot after a successful login.
pub fn establish<S: SessionStore>(store: &mut S, token: String, snapshot: &SessionSnapshot) {
    store.set(SESSION_COOKIE, token);
    store.set(SNAPSHOT_COOKIE, snapshot.encode());
}

/// Read the logged-in user from the snapshot, if any.
pub fn current_user<S: SessionStore>(store: &S) -> Option<SessionUser> {
    let raw = store.get(SNAPSHOT_COOKIE)?;
    if raw.is_empty() {
        return None;
    }
    SessionSnapshot::decode_user(&raw)
}

/// Drop every session value, including the legacy token cookie.
pub fn clear_all<S: SessionStore>(store: &mut S) {
    for name in [SESSION_COOKIE, SNAPSHOT_COOKIE, LEGACY_TOKEN_COOKIE] {
        store.clear(name);
    }
}

/// Token used when the backend does not hand one out: `mj-` followed by
/// base64url("{email}:{unix_millis}").
///
/// This token is not signed and proves nothing; it only keeps the
/// `session` cookie populated for the demo pages.
pub fn fallback_token(email: &str, unix_millis: i64) -> String {
    format!(
        "mj-{}",
        URL_SAFE_NO_PAD.encode(format!("{}:{}", email, unix_millis))
    )
}

/// Attributes shared by every session cookie.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookiePolicy {
    pub secure: bool,
}

impl CookiePolicy {
    fn build(&self, name: &str, value: String) -> Cookie<'static> {
        Cookie::build((name.to_string(), value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::seconds(SESSION_MAX_AGE_SECS))
            .build()
    }

    fn build_removal(&self, name: &str) -> Cookie<'static> {
        Cookie::build((name.to_string(), String::new()))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::ZERO)
            .expires(time::OffsetDateTime::UNIX_EPOCH)
            .build()
    }
}

/// [`SessionStore`] over the request's cookie jar.
///
/// Turn it back into a jar with [`CookieSession::into_jar`] and return that
/// from the handler so the `Set-Cookie` headers reach the browser.
pub struct CookieSession {
    jar: CookieJar,
    policy: CookiePolicy,
}

impl CookieSession {
    pub fn new(jar: CookieJar, policy: CookiePolicy) -> Self {
        Self { jar, policy }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl SessionStore for CookieSession {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|c| c.value().to_string())
    }

    fn set(&mut self, name: &str, value: String) {
        let cookie = self.policy.build(name, value);
        self.jar = std::mem::take(&mut self.jar).add(cookie);
    }

    fn clear(&mut self, name: &str) {
        let cookie = self.policy.build_removal(name);
        self.jar = std::mem::take(&mut self.jar).add(cookie);
    }
}

/// In-memory [`SessionStore`].
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: HashMap<String, String>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }

    fn clear(&mut self, name: &str) {
        self.values.remove(name);
    }
}
