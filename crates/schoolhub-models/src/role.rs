//! User roles.
//!
//! The role decides which dashboard, menu entries and screens a user can
//! reach. It is a closed set: adding a variant makes every exhaustive match
//! over roles (menus, route permissions, dashboards) fail to compile until the
//! new role is handled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
    Principal,
    Accountant,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Teacher,
        Role::Student,
        Role::Principal,
        Role::Accountant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Principal => "principal",
            Role::Accountant => "accountant",
        }
    }

    /// Staff members who work with classes and subjects.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Teacher | Role::Principal)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            "principal" => Ok(Role::Principal),
            "accountant" => Ok(Role::Accountant),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}
