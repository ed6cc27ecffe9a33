//! Conversions between `shared` DTOs and domain types.

pub mod common_area_mapper;
pub mod fee_mapper;
pub mod period_mapper;
