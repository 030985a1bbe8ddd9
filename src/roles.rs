//! Closed set of BloomFlow roles and capability checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    /// Florist staff; granted after an admin approves the request.
    Florar,
    Client,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Florar, Role::Client];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Florar => "florar",
            Role::Client => "client",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Florar => "Florist",
            Role::Client => "Customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "florar" => Ok(Role::Florar),
            "client" => Ok(Role::Client),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Capability set held by the current user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleSet {
    bits: u8,
}

impl RoleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    fn bit(role: Role) -> u8 {
        match role {
            Role::Admin => 0b001,
            Role::Florar => 0b010,
            Role::Client => 0b100,
        }
    }

    /// Builds a set from raw role strings; names outside the closed set
    /// (Keycloak's `offline_access`, `uma_authorization`, ...) are dropped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| name.as_ref().parse::<Role>().ok())
            .collect()
    }

    pub fn insert(&mut self, role: Role) {
        self.bits |= Self::bit(role);
    }

    pub fn contains(&self, role: Role) -> bool {
        self.bits & Self::bit(role) != 0
    }

    /// True when at least one of `required` is held. An empty requirement
    /// never matches.
    pub fn contains_any(&self, required: &[Role]) -> bool {
        required.iter().any(|r| self.contains(*r))
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Admins and florists manage flowers, lots and order statuses.
    pub fn can_manage_inventory(&self) -> bool {
        self.contains_any(&[Role::Admin, Role::Florar])
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        let mut set = RoleSet::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

pub fn has_role(user_roles: &[Role], required: Role) -> bool {
    user_roles.contains(&required)
}

pub fn has_any_role(user_roles: &[Role], required: &[Role]) -> bool {
    required.iter().any(|r| user_roles.contains(r))
}
