//! # Storage Module
//!
//! Persistence for common areas, reservation periods, fee history and
//! reservations. The domain layer depends on the traits in [`traits`]; the
//! [`csv`] module provides the file-backed implementation used by the
//! binary and the tests.

pub mod csv;
pub mod traits;

pub use self::csv::{
    CommonAreaRepository, CsvConnection, ReservationPeriodRepository, ReservationRepository,
    UtilizationFeeRepository,
};
pub use traits::*;
