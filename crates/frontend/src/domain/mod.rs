pub mod a001_authority;
pub mod a002_booking_material;
pub mod a003_route;
pub mod a004_booking;
