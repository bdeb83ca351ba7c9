//! Credits configuration loaded via OrthoConfig.

use std::ffi::OsString;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ports::{CreditsFeatureFlag, FeatureFlagError};

/// Configuration values controlling credit admission.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CREDITS")]
pub struct CreditsSettings {
    /// Enforce credit checks when validating reservations.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Optional message catalogue overriding the built-in templates.
    pub catalogue_path: Option<PathBuf>,
}

impl CreditsSettings {
    /// Load settings from defaults, configuration files, and environment.
    pub fn load_ambient() -> Result<Self, FeatureFlagError> {
        Self::load_from_iter([OsString::from("reservations")])
            .map_err(|err| FeatureFlagError::unavailable(err.to_string()))
    }
}

/// Feature flag that reloads [`CreditsSettings`] on every query.
///
/// Reloading means an operator can flip `CREDITS_ENABLED` between requests
/// without restarting the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrthoCreditsFeatureFlag;

impl CreditsFeatureFlag for OrthoCreditsFeatureFlag {
    fn credits_enabled(&self) -> Result<bool, FeatureFlagError> {
        let settings = CreditsSettings::load_ambient()?;
        tracing::trace!(enabled = settings.enabled, "loaded credits settings");
        Ok(settings.enabled)
    }
}
