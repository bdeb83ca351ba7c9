//! Ledger and reservation snapshots evaluated by `check-credits`.
//!
//! A snapshot captures everything the credits rule reads: user balances and
//! the cost view of one reservation series.
//!
//! ```json
//! {
//!   "users": [{ "id": "…", "fullName": "Ada Lovelace", "credits": 5 }],
//!   "reservation": {
//!     "seriesId": "…",
//!     "ownerId": "…",
//!     "creditsRequired": "4.5",
//!     "creditsConsumed": 0,
//!     "sharing": { "ownerShare": 3, "participants": [{ "userId": "…", "share": 2 }] }
//!   },
//!   "retry": [{ "name": "skipconflicts", "value": "true" }]
//! }
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::{CreditsFeatureFlag, MessageFormatter};
use crate::domain::validation::{CreditsRule, ReservationValidationPipeline, ValidationOutcome};
use crate::domain::{
    CreditAllocation, Credits, Error, ParticipantShare, ReservationCostDraft,
    ReservationCostValidationError, ReservationSeriesCostView, ReservationSeriesId,
    RetryParameters, SharedCredits, UserCredits, UserId,
};
use crate::outbound::ledger::InMemoryCreditLedger;
use crate::outbound::read_ambient_file;

/// Errors raised while reading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("read snapshot '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("snapshot reservation is invalid: {0}")]
    Invalid(#[from] ReservationCostValidationError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SharingSnapshot {
    owner_share: Credits,
    #[serde(default)]
    participants: Vec<ParticipantShare>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ReservationSnapshot {
    series_id: ReservationSeriesId,
    owner_id: UserId,
    credits_required: Credits,
    #[serde(default)]
    credits_consumed: Credits,
    sharing: Option<SharingSnapshot>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotDto {
    users: Vec<UserCredits>,
    reservation: ReservationSnapshot,
    #[serde(default)]
    retry: RetryParameters,
}

/// Parsed and validated snapshot.
#[derive(Debug, Clone)]
pub struct CreditsSnapshot {
    users: Vec<UserCredits>,
    series: ReservationSeriesCostView,
    retry: RetryParameters,
}

impl CreditsSnapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let dto: SnapshotDto = serde_json::from_str(json)?;
        let reservation = dto.reservation;
        let allocation = match reservation.sharing {
            Some(sharing) => CreditAllocation::Shared(SharedCredits::new(
                sharing.owner_share,
                sharing.participants,
            )),
            None => CreditAllocation::SinglePayer,
        };
        let series = ReservationSeriesCostView::new(ReservationCostDraft {
            series_id: reservation.series_id,
            owner_id: reservation.owner_id,
            credits_required: reservation.credits_required,
            credits_consumed: reservation.credits_consumed,
            allocation,
        })?;
        Ok(Self {
            users: dto.users,
            series,
            retry: dto.retry,
        })
    }

    /// Read and parse a snapshot file.
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let json = read_ambient_file(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Ledger holding every user in the snapshot.
    pub fn ledger(&self) -> InMemoryCreditLedger {
        self.users.iter().cloned().collect()
    }

    /// Cost view of the reservation under validation.
    pub fn series(&self) -> &ReservationSeriesCostView {
        &self.series
    }

    /// Retry hints supplied alongside the reservation.
    pub fn retry(&self) -> &RetryParameters {
        &self.retry
    }

    /// Run the credits rule against this snapshot.
    pub async fn evaluate<F>(
        &self,
        feature_flag: Arc<F>,
        formatter: Arc<dyn MessageFormatter>,
    ) -> Result<ValidationOutcome, Error>
    where
        F: CreditsFeatureFlag + 'static,
    {
        let rule = CreditsRule::new(Arc::new(self.ledger()), feature_flag);
        ReservationValidationPipeline::new(formatter)
            .with_rule(Arc::new(rule))
            .validate(&self.series, &self.retry)
            .await
    }
}
