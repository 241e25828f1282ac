//! Role definitions document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::journey::Role;

use super::CatalogError;

/// Configuration for a single role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub default_tone: String,
}

/// Role key -> definition, iterated in canonical role order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCatalog(BTreeMap<Role, RoleDefinition>);

impl RoleCatalog {
    pub fn new(roles: BTreeMap<Role, RoleDefinition>) -> Self {
        Self(roles)
    }

    /// Parses and validates a YAML role document.
    pub fn from_yaml(source: &str) -> Result<Self, CatalogError> {
        let catalog: Self =
            serde_yaml::from_str(source).map_err(|e| CatalogError::parse("role", e))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// The fallback role must always be present.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.0.contains_key(&Role::Unknown) {
            return Err(CatalogError::MissingRole(Role::Unknown));
        }
        Ok(())
    }

    pub fn get(&self, role: Role) -> Option<&RoleDefinition> {
        self.0.get(&role)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains_key(&role)
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &RoleDefinition)> {
        self.0.iter().map(|(role, def)| (*role, def))
    }
}
