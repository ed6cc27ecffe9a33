pub mod common_area;
pub mod reservation;
pub mod reservation_period;
pub mod utilization_fee;
