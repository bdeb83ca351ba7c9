//! Reservation validation library.
//!
//! - `domain`: credit values, ports, and validation rules
//! - `outbound`: adapters implementing the domain ports
//! - `snapshot`: JSON snapshots evaluated by the `check-credits` binary

pub mod domain;
pub mod outbound;
pub mod snapshot;
