//! Submitter roles as seen by triage

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of the user who submitted a claim
///
/// Triage only asks whether the role carries the admin capability, so other
/// role systems can be mapped in without touching the scoring rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    Customer,
    Provider,
    Admin,
    Other(String),
}

impl UserRole {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "user" | "customer" => UserRole::Customer,
            "provider" => UserRole::Provider,
            "admin" => UserRole::Admin,
            _ => UserRole::Other(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            UserRole::Customer => "user",
            UserRole::Provider => "provider",
            UserRole::Admin => "admin",
            UserRole::Other(raw) => raw,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<String> for UserRole {
    fn from(label: String) -> Self {
        UserRole::from_label(&label)
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> String {
        match role {
            UserRole::Other(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
