//! Port for reading user credit balances.
use async_trait::async_trait;

use crate::domain::{UserCredits, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credit ledger adapters.
    pub enum CreditLedgerError {
        /// No ledger entry exists for the requested user.
        NotFound { user_id: String } => "no credit ledger entry for user {user_id}",
        /// Ledger store could not be reached.
        Connection { message: String } => "credit ledger connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } => "credit ledger query failed: {message}",
    }
}

/// Read access to the store that owns user credit balances.
///
/// Validation rules only read through this port; balances are mutated
/// elsewhere.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// Load a user's identity and current balance.
    ///
    /// Unknown users yield [`CreditLedgerError::NotFound`].
    async fn load_credits(&self, user_id: &UserId) -> Result<UserCredits, CreditLedgerError>;
}

/// Fixture ledger for tests that never expect a lookup to succeed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCreditLedger;

#[async_trait]
impl CreditLedger for FixtureCreditLedger {
    async fn load_credits(&self, user_id: &UserId) -> Result<UserCredits, CreditLedgerError> {
        Err(CreditLedgerError::not_found(user_id.as_str()))
    }
}
