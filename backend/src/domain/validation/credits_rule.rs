//! Credits admission rule.
//!
//! Decides whether a reservation series fits within the credit budget of the
//! people paying for it. A single payer must hold the full cost. When the
//! cost is shared, every payer must cover their own pledge, the pooled
//! balances must cover the cost, and the pledges must cover the cost. Credits
//! the series already locked in an earlier save count toward every total.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use tracing::debug;

use crate::domain::ports::{CreditLedger, CreditsFeatureFlag};
use crate::domain::{Credits, ReservationSeriesCostView, RetryParameters, SharedCredits, UserId};

use super::{ReservationValidationRule, RuleError, RuleMessage, RuleResult};

/// Rule that admits a reservation only when its payers can afford it.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use reservations::domain::ports::FixtureCreditsFeatureFlag;
/// use reservations::domain::validation::{CreditsRule, ReservationValidationRule};
/// use reservations::outbound::ledger::InMemoryCreditLedger;
///
/// let rule = CreditsRule::new(
///     Arc::new(InMemoryCreditLedger::default()),
///     Arc::new(FixtureCreditsFeatureFlag::disabled()),
/// );
/// assert_eq!(rule.name(), "credits");
/// ```
pub struct CreditsRule<L, F> {
    ledger: Arc<L>,
    feature_flag: Arc<F>,
}

impl<L, F> Clone for CreditsRule<L, F> {
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            feature_flag: Arc::clone(&self.feature_flag),
        }
    }
}

impl<L, F> CreditsRule<L, F> {
    /// Create a rule reading balances from `ledger` and enforcement from
    /// `feature_flag`.
    pub fn new(ledger: Arc<L>, feature_flag: Arc<F>) -> Self {
        Self {
            ledger,
            feature_flag,
        }
    }
}

impl<L, F> CreditsRule<L, F>
where
    L: CreditLedger,
    F: CreditsFeatureFlag,
{
    async fn validate_single_payer(
        &self,
        series: &ReservationSeriesCostView,
    ) -> Result<RuleResult, RuleError> {
        let owner = self.ledger.load_credits(series.owner_id()).await?;
        let balance = owner.current_credits();
        let required = series.credits_required();
        let consumed = series.credits_consumed();
        let available = balance + consumed;

        debug!(
            series_id = %series.series_id(),
            user_id = %owner.id(),
            %consumed,
            %required,
            %available,
            "checked single-payer credits"
        );

        if required <= available {
            return Ok(RuleResult::Valid);
        }
        // Users see their ledger balance, not the consumed-adjusted figure.
        Ok(RuleResult::invalid(RuleMessage::InsufficientCredits {
            required,
            available: balance,
        }))
    }

    async fn validate_shared(
        &self,
        series: &ReservationSeriesCostView,
        shared: &SharedCredits,
    ) -> Result<RuleResult, RuleError> {
        let pledges: Vec<(&UserId, Credits)> =
            std::iter::once((series.owner_id(), shared.owner_share()))
                .chain(
                    shared
                        .participants()
                        .iter()
                        .map(|participant| (participant.user_id(), participant.share())),
                )
                .collect();

        let accounts = try_join_all(
            pledges
                .iter()
                .map(|(user_id, _)| self.ledger.load_credits(user_id)),
        )
        .await?;

        let mut underfunded = Vec::new();
        let mut total_available = Credits::ZERO;
        let mut total_burden = Credits::ZERO;
        for ((_, share), account) in pledges.iter().zip(accounts) {
            let balance = account.current_credits();
            if *share > balance {
                debug!(
                    series_id = %series.series_id(),
                    user_id = %account.id(),
                    %share,
                    %balance,
                    "payer cannot cover pledge"
                );
                underfunded.push(RuleMessage::UserUnderfunded {
                    full_name: account.full_name().clone(),
                    available: balance,
                });
            }
            total_available = total_available + balance;
            total_burden = total_burden + *share;
        }

        if !underfunded.is_empty() {
            return Ok(RuleResult::from_messages(underfunded));
        }

        let required = series.credits_required();
        let consumed = series.credits_consumed();

        debug!(
            series_id = %series.series_id(),
            user_id = %series.owner_id(),
            %consumed,
            %required,
            available = %total_available,
            burden = %total_burden,
            "checked shared credits"
        );

        if required > total_available + consumed {
            return Ok(RuleResult::invalid(RuleMessage::InsufficientCredits {
                required,
                available: total_available,
            }));
        }
        if required > total_burden + consumed {
            return Ok(RuleResult::invalid(
                RuleMessage::InsufficientCreditsAssigned {
                    required,
                    assigned: total_burden,
                },
            ));
        }
        Ok(RuleResult::Valid)
    }
}

#[async_trait]
impl<L, F> ReservationValidationRule for CreditsRule<L, F>
where
    L: CreditLedger,
    F: CreditsFeatureFlag,
{
    fn name(&self) -> &'static str {
        "credits"
    }

    async fn validate(
        &self,
        series: &ReservationSeriesCostView,
        _retry: &RetryParameters,
    ) -> Result<RuleResult, RuleError> {
        if !self.feature_flag.credits_enabled()? {
            return Ok(RuleResult::Valid);
        }

        match series.shared_credits() {
            Some(shared) => self.validate_shared(series, shared).await,
            None => self.validate_single_payer(series).await,
        }
    }
}

#[cfg(test)]
#[path = "credits_rule_tests.rs"]
mod tests;
