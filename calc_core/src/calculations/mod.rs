//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters with quantities written as text (JSON-serializable)
//! - `*Result` - Calculation results in SI base units (JSON-serializable)
//! - `calculate(input, ..) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`cantilever`] - Cantilever deflection, slope, shear and moment
//! - [`voltage_drop`] - DC voltage at a load fed through a wire run

pub mod cantilever;
pub mod voltage_drop;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::materials::wire_gauge::WireTable;

pub use cantilever::{BeamParameters, CantileverBeam, CantileverInput, CantileverResult, LoadCase};
pub use voltage_drop::{VoltageDropInput, VoltageDropResult, WireResistance};

/// Enum wrapper for all calculation types.
///
/// This allows storing heterogeneous calculations in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    Cantilever(CantileverInput),
    VoltageDrop(VoltageDropInput),
}

/// Result of evaluating a [`CalculationItem`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Cantilever(CantileverResult),
    VoltageDrop(VoltageDropResult),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Cantilever(c) => &c.label,
            CalculationItem::VoltageDrop(v) => &v.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Cantilever(_) => "Cantilever",
            CalculationItem::VoltageDrop(_) => "VoltageDrop",
        }
    }

    /// Evaluate with the given grid resolution and wire table
    pub fn evaluate(&self, sample_points: usize, wires: &WireTable) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::Cantilever(input) => {
                cantilever::calculate(input, sample_points).map(CalculationOutput::Cantilever)
            }
            CalculationItem::VoltageDrop(input) => {
                voltage_drop::calculate(input, wires).map(CalculationOutput::VoltageDrop)
            }
        }
    }
}

impl CalculationOutput {
    pub fn label(&self) -> &str {
        match self {
            CalculationOutput::Cantilever(r) => &r.label,
            CalculationOutput::VoltageDrop(r) => &r.label,
        }
    }
}
