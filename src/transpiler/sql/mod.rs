pub mod dps;
pub mod hsdes;
