//! Ordered evaluation of reservation validation rules.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{CreditLedgerError, FeatureFlagError, MessageFormatter};
use crate::domain::{Error, ReservationSeriesCostView, RetryParameters};

use super::{ReservationValidationRule, RuleError};

/// Merged verdict of every rule in a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    /// Rendered rejection text, one entry per rejecting rule.
    pub errors: Vec<String>,
}

/// Runs rules in registration order and renders their rejections.
#[derive(Clone)]
pub struct ReservationValidationPipeline {
    rules: Vec<Arc<dyn ReservationValidationRule>>,
    formatter: Arc<dyn MessageFormatter>,
}

impl ReservationValidationPipeline {
    /// Create an empty pipeline rendering with `formatter`.
    pub fn new(formatter: Arc<dyn MessageFormatter>) -> Self {
        Self {
            rules: Vec::new(),
            formatter,
        }
    }

    /// Append a rule; rules run in the order they were added.
    pub fn with_rule(mut self, rule: Arc<dyn ReservationValidationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule against `series`.
    ///
    /// The first rule that cannot reach a verdict stops evaluation.
    pub async fn validate(
        &self,
        series: &ReservationSeriesCostView,
        retry: &RetryParameters,
    ) -> Result<ValidationOutcome, Error> {
        let mut errors = Vec::new();
        for rule in &self.rules {
            let result = rule
                .validate(series, retry)
                .await
                .map_err(|err| Self::map_rule_error(rule.name(), series, err))?;
            debug!(
                rule = rule.name(),
                series_id = %series.series_id(),
                valid = result.is_valid(),
                "rule evaluated"
            );
            if let Some(rendered) = result.render(self.formatter.as_ref()) {
                errors.push(rendered);
            }
        }
        Ok(ValidationOutcome {
            is_valid: errors.is_empty(),
            errors,
        })
    }

    fn map_rule_error(
        rule: &'static str,
        series: &ReservationSeriesCostView,
        error: RuleError,
    ) -> Error {
        warn!(
            rule,
            series_id = %series.series_id(),
            error = %error,
            "validation rule could not reach a verdict"
        );
        let details = json!({ "rule": rule, "seriesId": series.series_id() });
        let mapped = match error {
            RuleError::Ledger(CreditLedgerError::Connection { message }) => {
                Error::service_unavailable(format!("credit ledger unavailable: {message}"))
            }
            RuleError::Ledger(CreditLedgerError::NotFound { user_id }) => {
                Error::internal(format!("no credit ledger entry for user {user_id}"))
            }
            RuleError::Ledger(CreditLedgerError::Query { message }) => {
                Error::internal(format!("credit ledger error: {message}"))
            }
            RuleError::FeatureFlag(FeatureFlagError::Unavailable { message }) => {
                Error::service_unavailable(format!("credits feature flag unavailable: {message}"))
            }
        };
        mapped.with_details(details)
    }
}
