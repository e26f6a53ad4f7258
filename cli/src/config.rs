use crate::aws::regions::audited_regions;
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "stackaudit.toml";

/// Audit settings
///
/// ```toml
/// profile = "audit"
/// regions = ["us-east-1", "eu-west-1"]
/// audit_resources = ["arn:aws:cloudformation:us-east-1:123456789012:stack/app/1a2b"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Regions to audit, all default regions when empty
    pub regions: Vec<String>,

    /// Allow-list of resource identifiers, everything is audited when empty
    pub audit_resources: Vec<String>,

    /// Named AWS profile to take credentials from
    pub profile: Option<String>,
}

impl AuditConfig {
    /// Read the config from a TOML file
    ///
    /// A missing file is not an error, the default config is used instead.
    pub fn from_path(path: &Path) -> eyre::Result<Self> {
        if let Ok(toml_string) = std::fs::read_to_string(path) {
            log::info!("Using config from {}", path.display());

            let config = toml::from_str(&toml_string)
                .wrap_err(format!("Failed to parse {}", path.display()))?;

            Ok(config)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(AuditConfig::default())
        }
    }

    /// Override file values with the ones passed on the command line
    pub fn merge(
        mut self,
        regions: Vec<String>,
        audit_resources: Vec<String>,
        profile: Option<String>,
    ) -> Self {
        if !regions.is_empty() {
            self.regions = regions;
        }

        if !audit_resources.is_empty() {
            self.audit_resources = audit_resources;
        }

        if profile.is_some() {
            self.profile = profile;
        }

        self
    }

    pub fn audited_regions(&self) -> Vec<String> {
        audited_regions(&self.regions)
    }
}
