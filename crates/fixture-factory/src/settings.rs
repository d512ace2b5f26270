//! Factory settings loaded via OrthoConfig.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::context::ContextSource;
use crate::error::SettingsError;

/// Program name used when loading settings without command-line arguments.
const PROGRAM_NAME: &str = "fixture-factory";

/// Configuration values controlling how factories seed random contexts.
///
/// Values are layered by OrthoConfig; the environment variable
/// `FIXTURE_FACTORY_SEED` pins every random context to a fixed seed so that
/// a failing test run can be replayed exactly.
///
/// # Example
///
/// ```
/// use fixture_factory::{ContextSource, FactorySettings};
///
/// let settings = FactorySettings { seed: Some(2026) };
/// assert_eq!(settings.context_source(), ContextSource::Seeded(2026));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FIXTURE_FACTORY")]
pub struct FactorySettings {
    /// Seed applied to every random context. Entropy is used when absent.
    pub seed: Option<u64>,
}

impl FactorySettings {
    /// Loads settings from configuration files and the environment.
    ///
    /// Command-line arguments of the host process are ignored, so test
    /// harness flags never leak into the settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a configuration layer cannot be
    /// parsed (for example a non-numeric `FIXTURE_FACTORY_SEED`).
    pub fn load_from_env() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(|e| SettingsError::Load {
            message: e.to_string(),
        })
    }

    /// Returns the context source these settings select.
    #[must_use]
    pub fn context_source(&self) -> ContextSource {
        ContextSource::from(self.seed)
    }
}
