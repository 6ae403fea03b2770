//! Role Model

use serde::{Deserialize, Serialize};

/// Account role.
///
/// One canonical serialization per role. Historical data used a second
/// spelling ("It_manager") which `from_str` still accepts on the way in,
/// but it is never written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "IT Manager", alias = "It_manager")]
    ItManager,
    #[serde(rename = "Trainer")]
    Trainer,
}

impl Role {
    /// Roles allowed to perform admin-only operations
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::ItManager)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::ItManager => "IT Manager",
            Role::Trainer => "Trainer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IT Manager" | "It_manager" => Ok(Role::ItManager),
            "Trainer" => Ok(Role::Trainer),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}
