//! # Materials
//!
//! Tabulated material properties. Currently the copper wire gauge table used
//! by the voltage drop calculation.

pub mod wire_gauge;

pub use wire_gauge::{WireGauge, WireTable};
