pub mod dms;
pub mod grid;
pub mod latlon;
