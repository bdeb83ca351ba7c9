//! Domain primitives, ports, and validation rules.
//!
//! Purpose: define the strongly typed values the reservation validation
//! rules reason about and the ports they read through. Types are immutable
//! once constructed; invariants and serde contracts are documented on each
//! type.
//!
//! Public surface:
//! - Credits (alias to `credits::Credits`) - fixed-point credit quantity.
//! - UserId, FullName, UserCredits - ledger view of a user.
//! - ReservationSeriesCostView - read-only cost projection of a series.
//! - Error / ErrorCode - transport-agnostic failure payload.

pub mod credits;
pub mod error;
pub mod ports;
pub mod reservation_cost;
pub mod user;
pub mod validation;

pub use self::credits::{Credits, CreditsParseError};
pub use self::error::{Error, ErrorCode};
pub use self::reservation_cost::{
    CreditAllocation, ParticipantShare, ReservationCostDraft, ReservationCostValidationError,
    ReservationSeriesCostView, ReservationSeriesId, RetryParameter, RetryParameters,
    SharedCredits,
};
pub use self::user::{FULL_NAME_MAX, FullName, UserCredits, UserId, UserValidationError};
