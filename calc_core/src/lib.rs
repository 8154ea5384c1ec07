//! # calc_core - Cantilever and Wire Calculation Engine
//!
//! `calc_core` evaluates cantilever beam responses and DC wire voltage drop
//! from dimension-checked physical quantities. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Dimension-checked**: Quantities carry their dimension; mixing them is an error
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::cantilever::{BeamParameters, CantileverBeam};
//! use calc_core::units::{unit_display, Quantity};
//!
//! let ei = BeamParameters::from_modulus(
//!     Quantity::parse("27_500_000 lbf/in**2").unwrap(),
//!     Quantity::parse("209 in**4").unwrap(),
//! ).unwrap();
//! let params = BeamParameters::intermediate_load(
//!     Quantity::parse("1200 lbf").unwrap(),
//!     Quantity::parse("25 ft").unwrap(),
//!     ei,
//!     Quantity::parse("15 ft").unwrap(),
//! ).unwrap();
//! let beam = CantileverBeam::new(params).unwrap();
//!
//! println!("δ_max = {}", unit_display(beam.max_deflection(), true));
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Dimensioned quantities, unit parsing and display
//! - [`sampling`] - Sampling grids and sampled extrema
//! - [`equations`] - Closed-form formulas and the equation registry
//! - [`calculations`] - Cantilever and voltage drop calculations
//! - [`materials`] - Wire gauge resistance tables
//! - [`project`] - Calculation sets, settings and the expiration gate
//! - [`file_io`] - Atomic saves and CSV curve export
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod project;
pub mod sampling;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_calculation_set, save_calculation_set};
pub use project::{CalculationSet, SetMetadata, Settings};
pub use units::{unit_display, Dimension, Quantity};
