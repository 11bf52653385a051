//! User profile and role model returned by `usuarios/me`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role designation carried by every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Administrador,
    Vendedor,
    Comprador,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Administrador, Role::Vendedor, Role::Comprador];

    /// Backend role id, as sent in `rolId` on registration.
    pub fn id(self) -> u32 {
        match self {
            Role::Administrador => 1,
            Role::Comprador => 2,
            Role::Vendedor => 3,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Role::ALL.into_iter().find(|r| r.id() == id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Administrador => "ADMINISTRADOR",
            Role::Vendedor => "VENDEDOR",
            Role::Comprador => "COMPRADOR",
        }
    }

    /// Dashboard section reserved for this role.
    pub fn dashboard_section(self) -> &'static str {
        match self {
            Role::Administrador => "/dashboard/admin",
            Role::Vendedor => "/dashboard/mis-productos",
            Role::Comprador => "/dashboard/cart",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Role object nested in the profile (`rol: { id, nombre }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleInfo {
    #[serde(default)]
    pub id: Option<u64>,
    pub nombre: Role,
}

/// Profile of the signed-in account. Held in memory only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub rol: RoleInfo,
}

impl UserProfile {
    pub fn role(&self) -> Role {
        self.rol.nombre
    }
}
