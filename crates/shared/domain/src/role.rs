//! Role tiers and the access policy built from configuration.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALLOWED_ROLES, DEFAULT_ROLE_NAMES, ROLE_EMPLOYEE, ROLE_MANAGER, ROLE_SUPERUSER,
};
use crate::error::{DomainError, DomainResult};

/// A role tier and its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub tier: i32,
    pub name: String,
}

/// Static role policy, loaded once at startup and never mutated.
///
/// Every authorization decision is a pure function of a caller's tier and
/// this policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePolicy {
    names: BTreeMap<i32, String>,
    allowed: BTreeSet<i32>,
    manager_role: i32,
    superuser_role: i32,
    default_role: i32,
}

impl RolePolicy {
    /// Build a policy, rejecting references to tiers that have no name.
    pub fn new(
        names: impl IntoIterator<Item = (i32, String)>,
        allowed: impl IntoIterator<Item = i32>,
        manager_role: i32,
        superuser_role: i32,
        default_role: i32,
    ) -> DomainResult<Self> {
        let names: BTreeMap<i32, String> = names.into_iter().collect();
        if names.is_empty() {
            return Err(DomainError::validation("At least one role must be configured"));
        }

        let allowed: BTreeSet<i32> = allowed.into_iter().collect();
        let referenced = allowed
            .iter()
            .copied()
            .chain([manager_role, superuser_role, default_role]);
        for tier in referenced {
            if !names.contains_key(&tier) {
                return Err(DomainError::validation(format!(
                    "Role tier {} is referenced but not configured",
                    tier
                )));
            }
        }

        Ok(Self {
            names,
            allowed,
            manager_role,
            superuser_role,
            default_role,
        })
    }

    /// Parse a `"1:Employee,2:Manager"` style list.
    pub fn parse_names(raw: &str) -> DomainResult<Vec<(i32, String)>> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (tier, name) = entry.split_once(':').ok_or_else(|| {
                    DomainError::validation(format!("Invalid role entry '{}'", entry))
                })?;
                let tier = parse_tier(tier)?;
                let name = name.trim();
                if name.is_empty() {
                    return Err(DomainError::validation(format!(
                        "Role tier {} has an empty name",
                        tier
                    )));
                }
                Ok((tier, name.to_string()))
            })
            .collect()
    }

    /// Parse a `"3,4"` style tier list.
    pub fn parse_tiers(raw: &str) -> DomainResult<Vec<i32>> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(parse_tier)
            .collect()
    }

    /// Whether `role` is on the allow-list.
    pub fn is_allowed(&self, role: i32) -> bool {
        self.allowed.contains(&role)
    }

    /// Strict check: only the manager tier itself passes.
    pub fn is_manager(&self, role: i32) -> bool {
        role == self.manager_role
    }

    pub fn is_superuser(&self, role: i32) -> bool {
        role == self.superuser_role
    }

    pub fn is_known(&self, role: i32) -> bool {
        self.names.contains_key(&role)
    }

    pub fn default_role(&self) -> i32 {
        self.default_role
    }

    pub fn superuser_role(&self) -> i32 {
        self.superuser_role
    }

    pub fn allowed_roles(&self) -> impl Iterator<Item = i32> + '_ {
        self.allowed.iter().copied()
    }

    pub fn role_name(&self, role: i32) -> Option<&str> {
        self.names.get(&role).map(String::as_str)
    }

    /// All configured roles ordered by tier.
    pub fn roles(&self) -> Vec<Role> {
        self.names
            .iter()
            .map(|(tier, name)| Role {
                tier: *tier,
                name: name.clone(),
            })
            .collect()
    }

    /// Check that `requester` may assign `target` to an account.
    ///
    /// Unknown tiers are a validation error; the superuser tier can only be
    /// granted by a superuser.
    pub fn can_grant(&self, requester: i32, target: i32) -> DomainResult<()> {
        if !self.is_known(target) {
            return Err(DomainError::validation(format!("Unknown role tier {}", target)));
        }
        if self.is_superuser(target) && !self.is_superuser(requester) {
            return Err(DomainError::Forbidden);
        }
        Ok(())
    }
}

impl Default for RolePolicy {
    fn default() -> Self {
        Self {
            names: DEFAULT_ROLE_NAMES
                .iter()
                .map(|(tier, name)| (*tier, name.to_string()))
                .collect(),
            allowed: DEFAULT_ALLOWED_ROLES.iter().copied().collect(),
            manager_role: ROLE_MANAGER,
            superuser_role: ROLE_SUPERUSER,
            default_role: ROLE_EMPLOYEE,
        }
    }
}

fn parse_tier(raw: &str) -> DomainResult<i32> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::validation(format!("Invalid role tier '{}'", raw.trim())))
}
