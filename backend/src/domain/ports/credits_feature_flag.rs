//! Port for the credits-enforcement switch.
use super::define_port_error;

define_port_error! {
    /// Errors raised when the flag source cannot answer.
    pub enum FeatureFlagError {
        /// Flag store could not be read.
        Unavailable { message: String } => "credits feature flag unavailable: {message}",
    }
}

/// Source of the credits-enforcement flag.
///
/// Callers ask on every validation so an operator toggling the flag takes
/// effect on the next request. Implementations must not cache across calls.
#[cfg_attr(test, mockall::automock)]
pub trait CreditsFeatureFlag: Send + Sync {
    /// Whether credit admission checks are enforced.
    fn credits_enabled(&self) -> Result<bool, FeatureFlagError>;
}

/// Fixture flag that always returns the value it was built with.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCreditsFeatureFlag {
    enabled: bool,
}

impl FixtureCreditsFeatureFlag {
    /// Flag pinned to `enabled`.
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Flag pinned on.
    pub const fn enabled() -> Self {
        Self::new(true)
    }

    /// Flag pinned off.
    pub const fn disabled() -> Self {
        Self::new(false)
    }
}

impl CreditsFeatureFlag for FixtureCreditsFeatureFlag {
    fn credits_enabled(&self) -> Result<bool, FeatureFlagError> {
        Ok(self.enabled)
    }
}
