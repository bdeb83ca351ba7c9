//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Validation rules reach balances, configuration, and message templates
//! only through these traits. Each port declares a typed error so adapters
//! map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod credit_ledger;
mod credits_feature_flag;
mod message_formatter;

#[cfg(test)]
pub use credit_ledger::MockCreditLedger;
pub use credit_ledger::{CreditLedger, CreditLedgerError, FixtureCreditLedger};
#[cfg(test)]
pub use credits_feature_flag::MockCreditsFeatureFlag;
pub use credits_feature_flag::{CreditsFeatureFlag, FeatureFlagError, FixtureCreditsFeatureFlag};
#[cfg(test)]
pub use message_formatter::MockMessageFormatter;
pub use message_formatter::MessageFormatter;
