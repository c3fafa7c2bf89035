//! Account roles.
//!
//! Stored as lowercase text in `users.role` (see the `chk_users_role`
//! constraint) and carried verbatim in the JWT `role` claim.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_SERVICEMAN: &str = "serviceman";
pub const ROLE_ADMIN: &str = "admin";

/// The closed set of account kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Serviceman,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => ROLE_CUSTOMER,
            Role::Serviceman => ROLE_SERVICEMAN,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_CUSTOMER => Ok(Role::Customer),
            ROLE_SERVICEMAN => Ok(Role::Serviceman),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!("Unknown role: '{other}'"))),
        }
    }
}
