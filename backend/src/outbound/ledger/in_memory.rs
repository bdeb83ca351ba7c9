//! Credit ledger held in process memory.
//!
//! Backs the snapshot CLI and integration tests. Balances are fixed at
//! construction; the ledger is read-only afterwards.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{CreditLedger, CreditLedgerError};
use crate::domain::{UserCredits, UserId};

/// Read-only ledger keyed by user identifier.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCreditLedger {
    accounts: HashMap<UserId, UserCredits>,
}

impl InMemoryCreditLedger {
    /// Number of users with a ledger entry.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the ledger holds no entries.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl FromIterator<UserCredits> for InMemoryCreditLedger {
    /// Later entries replace earlier ones with the same id.
    fn from_iter<I: IntoIterator<Item = UserCredits>>(iter: I) -> Self {
        let accounts = iter
            .into_iter()
            .map(|account| (account.id().clone(), account))
            .collect();
        Self { accounts }
    }
}

#[async_trait]
impl CreditLedger for InMemoryCreditLedger {
    async fn load_credits(&self, user_id: &UserId) -> Result<UserCredits, CreditLedgerError> {
        let account = self
            .accounts
            .get(user_id)
            .cloned()
            .ok_or_else(|| CreditLedgerError::not_found(user_id.as_str()))?;
        debug!(%user_id, credits = %account.current_credits(), "loaded credits");
        Ok(account)
    }
}
