//! Authorization module - roles, actions and the permission decision engine
//!
//! The engine is a fixed, hand-codified matrix over a closed role set:
//! - `Admin` is unconditionally allowed for every action
//! - `Editor` may read and update anything, but never create or delete
//! - `Viewer` is ownership-scoped: read anything, create/update/delete
//!   only what it owns
//!
//! Evaluation is pure and synchronous; the engine never touches storage.

mod actor;
mod evaluator;

pub use actor::Actor;
pub use evaluator::{evaluate, ResourceOwner};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed role set. Not extensible at runtime; anything outside this
/// enumeration is rejected at the parsing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact-match parsing, mirroring the stored representation.
impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Admin" => Ok(Role::Admin),
            "Editor" => Ok(Role::Editor),
            "Viewer" => Ok(Role::Viewer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// The permission vocabulary the engine evaluates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}
