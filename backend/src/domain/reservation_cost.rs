//! Read-only cost projection of a reservation series.
//!
//! Validation rules never see the full reservation aggregate. They receive a
//! [`ReservationSeriesCostView`] describing what the series costs, what it has
//! already locked in a previous save, and how the cost is split when
//! participants share it.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Credits, UserId};

/// Identifier of a reservation series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationSeriesId(Uuid);

impl ReservationSeriesId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ReservationSeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors raised by [`ReservationSeriesCostView::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationCostValidationError {
    DuplicateParticipant { user_id: UserId },
    OwnerListedAsParticipant { user_id: UserId },
}

impl fmt::Display for ReservationCostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateParticipant { user_id } => {
                write!(f, "participant {user_id} appears more than once")
            }
            Self::OwnerListedAsParticipant { user_id } => write!(
                f,
                "owner {user_id} must not also be listed as a paying participant"
            ),
        }
    }
}

impl std::error::Error for ReservationCostValidationError {}

/// Credits one participant pledges toward a shared reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantShare {
    user_id: UserId,
    share: Credits,
}

impl ParticipantShare {
    /// Pair a participant with their pledge.
    pub fn new(user_id: UserId, share: Credits) -> Self {
        Self { user_id, share }
    }

    /// The pledging participant.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Credits pledged by the participant.
    pub fn share(&self) -> Credits {
        self.share
    }
}

/// How the pledged burden is split when cost sharing is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedCredits {
    owner_share: Credits,
    participants: Vec<ParticipantShare>,
}

impl SharedCredits {
    /// Describe an owner pledge plus participant pledges in display order.
    pub fn new(owner_share: Credits, participants: Vec<ParticipantShare>) -> Self {
        Self {
            owner_share,
            participants,
        }
    }

    /// Credits the owner personally pledges.
    pub fn owner_share(&self) -> Credits {
        self.owner_share
    }

    /// Participant pledges in insertion order.
    pub fn participants(&self) -> &[ParticipantShare] {
        &self.participants
    }
}

/// Who pays for a reservation series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditAllocation {
    /// The owner pays the whole cost.
    SinglePayer,
    /// The owner and participants each pledge a share.
    Shared(SharedCredits),
}

/// Input payload for [`ReservationSeriesCostView::new`].
#[derive(Debug, Clone)]
pub struct ReservationCostDraft {
    pub series_id: ReservationSeriesId,
    pub owner_id: UserId,
    pub credits_required: Credits,
    pub credits_consumed: Credits,
    pub allocation: CreditAllocation,
}

/// Cost projection of a reservation series.
///
/// ## Invariants
/// - Participant identifiers are distinct.
/// - The owner never appears among the participants.
///
/// # Examples
/// ```
/// use reservations::domain::{
///     CreditAllocation, Credits, ReservationCostDraft, ReservationSeriesCostView,
///     ReservationSeriesId, UserId,
/// };
///
/// let view = ReservationSeriesCostView::new(ReservationCostDraft {
///     series_id: ReservationSeriesId::random(),
///     owner_id: UserId::random(),
///     credits_required: Credits::whole(5),
///     credits_consumed: Credits::ZERO,
///     allocation: CreditAllocation::SinglePayer,
/// })
/// .expect("valid cost view");
/// assert!(!view.sharing_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationSeriesCostView {
    series_id: ReservationSeriesId,
    owner_id: UserId,
    credits_required: Credits,
    credits_consumed: Credits,
    allocation: CreditAllocation,
}

impl ReservationSeriesCostView {
    /// Creates a validated cost view.
    pub fn new(draft: ReservationCostDraft) -> Result<Self, ReservationCostValidationError> {
        if let CreditAllocation::Shared(shared) = &draft.allocation {
            let mut seen = HashSet::with_capacity(shared.participants.len());
            for participant in &shared.participants {
                if participant.user_id == draft.owner_id {
                    return Err(ReservationCostValidationError::OwnerListedAsParticipant {
                        user_id: participant.user_id.clone(),
                    });
                }
                if !seen.insert(&participant.user_id) {
                    return Err(ReservationCostValidationError::DuplicateParticipant {
                        user_id: participant.user_id.clone(),
                    });
                }
            }
        }

        let ReservationCostDraft {
            series_id,
            owner_id,
            credits_required,
            credits_consumed,
            allocation,
        } = draft;
        Ok(Self {
            series_id,
            owner_id,
            credits_required,
            credits_consumed,
            allocation,
        })
    }

    /// Series the projection was taken from.
    pub fn series_id(&self) -> ReservationSeriesId {
        self.series_id
    }

    /// User who owns the reservation series.
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Total credit cost of the series.
    pub fn credits_required(&self) -> Credits {
        self.credits_required
    }

    /// Credits this series already locked in an earlier save.
    pub fn credits_consumed(&self) -> Credits {
        self.credits_consumed
    }

    /// Whether participants share the cost.
    pub fn sharing_enabled(&self) -> bool {
        matches!(self.allocation, CreditAllocation::Shared(_))
    }

    /// Cost split, when sharing is on.
    pub fn shared_credits(&self) -> Option<&SharedCredits> {
        match &self.allocation {
            CreditAllocation::Shared(shared) => Some(shared),
            CreditAllocation::SinglePayer => None,
        }
    }
}

/// One caller-supplied retry hint, such as `skipconflicts=true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryParameter {
    name: String,
    value: String,
}

impl RetryParameter {
    /// Build a retry hint.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Hint name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Hint value.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

/// Opaque retry context passed through the validation pipeline.
///
/// Rules that do not care about retries simply ignore it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetryParameters(Vec<RetryParameter>);

impl RetryParameters {
    /// No retry hints, as on a first attempt.
    pub fn none() -> Self {
        Self::default()
    }

    /// Value of the first hint with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|param| param.name == name)
            .map(RetryParameter::value)
    }

    /// Whether no hints were supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<RetryParameter> for RetryParameters {
    fn from_iter<I: IntoIterator<Item = RetryParameter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
