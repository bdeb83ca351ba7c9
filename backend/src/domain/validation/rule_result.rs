//! Verdict produced by one rule for one validation call.

use crate::domain::ports::MessageFormatter;

use super::RuleMessage;

/// Outcome of a single rule evaluation.
///
/// ## Invariants
/// - `Valid` carries no messages.
/// - `Invalid` carries at least one message, in the order it was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleResult {
    Valid,
    Invalid { messages: Vec<RuleMessage> },
}

impl RuleResult {
    /// Build a verdict from collected messages; none means valid.
    pub fn from_messages(messages: Vec<RuleMessage>) -> Self {
        if messages.is_empty() {
            Self::Valid
        } else {
            Self::Invalid { messages }
        }
    }

    /// Invalid verdict with a single message.
    pub fn invalid(message: RuleMessage) -> Self {
        Self::Invalid {
            messages: vec![message],
        }
    }

    /// Whether the rule admitted the reservation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Messages explaining a rejection; empty when valid.
    pub fn messages(&self) -> &[RuleMessage] {
        match self {
            Self::Valid => &[],
            Self::Invalid { messages } => messages,
        }
    }

    /// Render messages one per line.
    ///
    /// Returns `None` for a valid verdict.
    pub fn render(&self, formatter: &dyn MessageFormatter) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Invalid { messages } => Some(
                messages
                    .iter()
                    .map(|message| formatter.format(message.key(), &message.params()))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        }
    }
}
