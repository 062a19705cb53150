//! Signed-in user context.
//!
//! The session is an ordinary value owned by the front-end and handed to the
//! components that display the user's name or avatar. It is created on login
//! and torn down on logout; there is no process-wide store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Farmer,
    Buyer,
    Supplier,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Farmer => f.write_str("Farmer"),
            Role::Buyer => f.write_str("Buyer"),
            Role::Supplier => f.write_str("Supplier"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "farmer" => Ok(Role::Farmer),
            "buyer" => Ok(Role::Buyer),
            "supplier" => Ok(Role::Supplier),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SignedIn {
    profile: UserProfile,
    since: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current: Option<SignedIn>,
}

impl Session {
    /// Replaces any existing user with `profile`.
    pub fn sign_in(&mut self, profile: UserProfile) {
        self.current = Some(SignedIn {
            profile,
            since: Utc::now(),
        });
    }

    /// Clears the user. Returns the profile that was signed in, if any.
    pub fn sign_out(&mut self) -> Option<UserProfile> {
        self.current.take().map(|s| s.profile)
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        self.current.as_ref().map(|s| &s.profile)
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.current.as_ref().map(|s| s.since)
    }

    /// Name for the header; empty when signed out.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user().map_or("", |u| u.name.as_str())
    }
}
