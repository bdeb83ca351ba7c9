//! Typed messages emitted by validation rules.
//!
//! Rules never build user-facing text. They emit a [`RuleMessage`] whose
//! [`MessageKey`] selects a template and whose parameters fill it, leaving
//! wording and localisation to a [`MessageFormatter`](crate::domain::ports::MessageFormatter).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Credits, FullName};

/// Template key understood by message formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageKey {
    /// Not enough credits available. Parameters: required, available.
    CreditsRule,
    /// One user cannot cover their own pledge. Parameters: full name, current credits.
    UserDoesNotHaveEnoughCredits,
    /// Pledges do not cover the cost. Parameters: required, total pledged.
    CreditsAssignedRule,
}

impl MessageKey {
    /// Every key, in catalogue order.
    pub const ALL: [Self; 3] = [
        Self::CreditsRule,
        Self::UserDoesNotHaveEnoughCredits,
        Self::CreditsAssignedRule,
    ];

    /// Catalogue identifier for the key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditsRule => "CreditsRule",
            Self::UserDoesNotHaveEnoughCredits => "UserDoesNotHaveEnoughCredits",
            Self::CreditsAssignedRule => "CreditsAssignedRule",
        }
    }

    /// Number of positional parameters the template consumes.
    pub const fn arity(self) -> usize {
        match self {
            Self::CreditsRule | Self::UserDoesNotHaveEnoughCredits | Self::CreditsAssignedRule => 2,
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reason a rule rejected a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleMessage {
    /// Available credits fall short of the cost.
    InsufficientCredits { required: Credits, available: Credits },
    /// A user pledged more than they hold.
    UserUnderfunded { full_name: FullName, available: Credits },
    /// The pledges together fall short of the cost.
    InsufficientCreditsAssigned { required: Credits, assigned: Credits },
}

impl RuleMessage {
    /// Template selected by this message.
    pub fn key(&self) -> MessageKey {
        match self {
            Self::InsufficientCredits { .. } => MessageKey::CreditsRule,
            Self::UserUnderfunded { .. } => MessageKey::UserDoesNotHaveEnoughCredits,
            Self::InsufficientCreditsAssigned { .. } => MessageKey::CreditsAssignedRule,
        }
    }

    /// Positional template parameters as display strings.
    pub fn params(&self) -> Vec<String> {
        match self {
            Self::InsufficientCredits {
                required,
                available,
            } => vec![required.to_string(), available.to_string()],
            Self::UserUnderfunded {
                full_name,
                available,
            } => vec![full_name.to_string(), available.to_string()],
            Self::InsufficientCreditsAssigned { required, assigned } => {
                vec![required.to_string(), assigned.to_string()]
            }
        }
    }
}
