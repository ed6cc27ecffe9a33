//! # Domain Module
//!
//! Business rules for common-area reservation periods and utilization fees.
//!
//! The rules modules are pure functions over snapshots; the services around
//! them load the snapshot from storage, apply the rules, and persist the
//! accepted change. Nothing here knows about HTTP.
//!
//! ## Module Organization
//!
//! - **reservation_period_rules**: add/deactivate decisions, labels, display order
//! - **utilization_fee_rules**: fee entry validation and effective-fee resolution
//! - **common_area_service**: common area registry and configuration flags
//! - **reservation_period_service**: period CRUD and reservations on top of the rules
//! - **utilization_fee_service**: append-only fee history
//! - **command_dispatcher**: routes `ReservationCommand` variants to services
//!
//! ## Business Rules
//!
//! - Full-day and timed periods never coexist as active periods
//! - At most one active full-day period per common area
//! - Periods with reservations today or later cannot be deactivated
//! - Fee values must be positive and carry a valid start date
//! - Periods apply only to areas that require reservation; fees only to areas with a usage fee

pub mod command_dispatcher;
pub mod commands;
pub mod common_area_service;
pub mod errors;
pub mod models;
pub mod permissions;
pub mod reservation_period_rules;
pub mod reservation_period_service;
pub mod utilization_fee_rules;
pub mod utilization_fee_service;
pub mod violations;

pub use command_dispatcher::CommandDispatcher;
pub use common_area_service::CommonAreaService;
pub use errors::{ServiceError, ServiceResult};
pub use permissions::{Action, PermissionChecker, StaticPermissions};
pub use reservation_period_rules::ReservationPeriodRules;
pub use reservation_period_service::ReservationPeriodService;
pub use utilization_fee_rules::UtilizationFeeRules;
pub use utilization_fee_service::UtilizationFeeService;
pub use violations::{Advisory, RuleViolation};
