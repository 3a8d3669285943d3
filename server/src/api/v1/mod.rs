pub mod station_traffic;
pub mod status;
