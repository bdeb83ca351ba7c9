//! Reservation validation rules.
//!
//! A rule inspects the cost view of a reservation series and returns a
//! [`RuleResult`]. Business rejections are ordinary `Ok` values; only
//! failures to read supporting data surface as [`RuleError`].

use async_trait::async_trait;
use thiserror::Error;

use super::ports::{CreditLedgerError, FeatureFlagError};
use super::{ReservationSeriesCostView, RetryParameters};

mod credits_rule;
mod messages;
mod pipeline;
mod rule_result;

pub use credits_rule::CreditsRule;
pub use messages::{MessageKey, RuleMessage};
pub use pipeline::{ReservationValidationPipeline, ValidationOutcome};
pub use rule_result::RuleResult;

/// Failures that prevent a rule from reaching a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error(transparent)]
    Ledger(#[from] CreditLedgerError),
    #[error(transparent)]
    FeatureFlag(#[from] FeatureFlagError),
}

/// A pluggable admission check run against a reservation series.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationValidationRule: Send + Sync {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;

    /// Decide whether the series may be saved.
    async fn validate(
        &self,
        series: &ReservationSeriesCostView,
        retry: &RetryParameters,
    ) -> Result<RuleResult, RuleError>;
}
