//! Catalog module - typed configuration documents for the classifiers.
//!
//! Three documents drive detection:
//!
//! - `RoleCatalog` - role key -> aliases, description, default tone
//! - `StageCatalog` - stage key -> keywords, allowed next stages, order
//! - `DetectionDefaults` - default profile values and detection gates
//!
//! Documents are validated at load time so that an invalid catalog is a
//! startup failure rather than a classification-time surprise.

mod defaults;
mod errors;
mod roles;
mod stages;

pub use defaults::{
    DefaultProfile, DetectionDefaults, DetectionSettings, RoleDetectionSettings,
    StageDetectionSettings,
};
pub use errors::CatalogError;
pub use roles::{RoleCatalog, RoleDefinition};
pub use stages::{StageCatalog, StageDefinition};

const BUILTIN_ROLES: &str = include_str!("../../../config/roles.yaml");
const BUILTIN_STAGES: &str = include_str!("../../../config/stages.yaml");
const BUILTIN_DEFAULTS: &str = include_str!("../../../config/defaults.yaml");

/// All three documents, validated together.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub roles: RoleCatalog,
    pub stages: StageCatalog,
    pub defaults: DetectionDefaults,
}

impl Catalog {
    /// Validates each document and the references between them.
    pub fn new(
        roles: RoleCatalog,
        stages: StageCatalog,
        defaults: DetectionDefaults,
    ) -> Result<Self, CatalogError> {
        roles.validate()?;
        stages.validate()?;
        defaults.validate()?;
        if !roles.contains(defaults.default_profile.role) {
            return Err(CatalogError::UndefinedDefaultRole(
                defaults.default_profile.role,
            ));
        }
        Ok(Self {
            roles,
            stages,
            defaults,
        })
    }

    /// Parses the three documents from YAML text.
    pub fn from_yaml(roles: &str, stages: &str, defaults: &str) -> Result<Self, CatalogError> {
        Self::new(
            RoleCatalog::from_yaml(roles)?,
            StageCatalog::from_yaml(stages)?,
            DetectionDefaults::from_yaml(defaults)?,
        )
    }

    /// The catalog shipped with the crate under `config/`.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_ROLES, BUILTIN_STAGES, BUILTIN_DEFAULTS)
    }
}
