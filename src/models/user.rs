//! User models for the session and the user directory.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Identity rehydrated from the session snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionUser {
    pub id: i64,
    pub login: String,
}

/// Code/name pair used by the directory for statuses and roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryTag {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// Entry of the user directory listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DirectoryTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<DirectoryTag>,
}

impl DirectoryUser {
    /// Case-insensitive substring match against name or login.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_name(&self, needle: &str) -> bool {
        [self.name.as_deref(), self.login.as_deref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
