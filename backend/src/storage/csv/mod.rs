//! # CSV Storage
//!
//! File-based storage under a single data directory:
//!
//! ```text
//! data/
//! ├── common_areas.yaml
//! ├── reservation_periods.csv
//! ├── reservations.csv
//! └── utilization_fees.csv
//! ```

pub mod common_area_repository;
pub mod connection;
pub mod reservation_period_repository;
pub mod reservation_repository;
pub mod utilization_fee_repository;

#[cfg(test)]
pub mod test_utils;

pub use common_area_repository::CommonAreaRepository;
pub use connection::CsvConnection;
pub use reservation_period_repository::ReservationPeriodRepository;
pub use reservation_repository::ReservationRepository;
pub use utilization_fee_repository::UtilizationFeeRepository;
