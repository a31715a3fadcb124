//! Renderer tests, split by dialect.

mod dps;
mod hsdes;
