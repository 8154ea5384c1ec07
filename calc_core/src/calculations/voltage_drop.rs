//! # DC Voltage Drop
//!
//! Voltage available at a load fed through a wire run:
//!
//! ```text
//! V_load = V_source - I·R
//! ```
//!
//! The wire resistance `R` is either given directly or looked up from a wire
//! gauge table: `R = n·ℓ·r / 1000 ft`, with `n` conductors (2 for supply and
//! return), one-way length `ℓ` and tabulated resistance `r` per 1000 ft.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::voltage_drop::voltage_at_load;
//! use calc_core::units::Quantity;
//!
//! let v = voltage_at_load(
//!     Quantity::parse("24 V").unwrap(),
//!     Quantity::parse("2 A").unwrap(),
//!     Quantity::parse("2 ohm").unwrap(),
//! ).unwrap();
//! assert!((v.value() - 20.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::registry::{equations_markdown, Equation};
use crate::errors::{CalcError, CalcResult};
use crate::materials::wire_gauge::WireTable;
use crate::units::{Dimension, Quantity};

/// Conductors in a simple two-wire DC run
pub const DEFAULT_CONDUCTORS: u32 = 2;

fn default_conductors() -> u32 {
    DEFAULT_CONDUCTORS
}

/// How the wire resistance is specified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum WireResistance {
    /// Total loop resistance, e.g. "2 ohm"
    Fixed { total: String },
    /// Gauge lookup with one-way run length
    Tabulated {
        gauge: String,
        length: String,
        #[serde(default = "default_conductors")]
        conductors: u32,
    },
}

impl WireResistance {
    /// Total resistance of the run
    pub fn total(&self, table: &WireTable) -> CalcResult<Quantity> {
        match self {
            WireResistance::Fixed { total } => {
                let r = Quantity::parse(total)?;
                let ohms = r.expect_dimension(Dimension::RESISTANCE, "resistance")?;
                if !(ohms >= 0.0 && ohms.is_finite()) {
                    return Err(CalcError::invalid_input(
                        "resistance",
                        total.clone(),
                        "Resistance must be non-negative",
                    ));
                }
                Ok(r)
            }
            WireResistance::Tabulated {
                gauge,
                length,
                conductors,
            } => {
                if *conductors == 0 {
                    return Err(CalcError::invalid_input(
                        "conductors",
                        "0",
                        "At least one conductor is required",
                    ));
                }
                let length_q = Quantity::parse(length)?;
                let meters = length_q.expect_dimension(Dimension::LENGTH, "length")?;
                if !(meters >= 0.0 && meters.is_finite()) {
                    return Err(CalcError::invalid_input(
                        "length",
                        length.clone(),
                        "Wire length must be non-negative",
                    ));
                }
                let per_length = table.lookup(gauge)?.resistance_per_length();
                Ok(per_length * length_q * f64::from(*conductors))
            }
        }
    }
}

/// V_load = V_source - I·R, with dimension checks on all three inputs.
pub fn voltage_at_load(source: Quantity, current: Quantity, resistance: Quantity) -> CalcResult<Quantity> {
    source.expect_dimension(Dimension::VOLTAGE, "source")?;
    current.expect_dimension(Dimension::CURRENT, "current")?;
    resistance.expect_dimension(Dimension::RESISTANCE, "resistance")?;
    source.try_sub(current * resistance)
}

/// Input parameters for a voltage drop calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Sensor feed",
///   "source": "24 V",
///   "current": "2 A",
///   "resistance": { "kind": "Tabulated", "gauge": "12", "length": "100 ft" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropInput {
    pub label: String,
    /// Source voltage
    pub source: String,
    /// Load current
    pub current: String,
    pub resistance: WireResistance,
}

impl Default for VoltageDropInput {
    fn default() -> Self {
        VoltageDropInput {
            label: "Voltage Drop".to_string(),
            source: "24 V".to_string(),
            current: "2 A".to_string(),
            resistance: WireResistance::Fixed {
                total: "2 ohm".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoltageDropResult {
    pub label: String,
    pub source: Quantity,
    pub current: Quantity,
    pub total_resistance: Quantity,
    pub voltage_drop: Quantity,
    pub load_voltage: Quantity,
    /// Drop as a percentage of the source voltage
    pub percent_drop: f64,
}

/// Run a voltage drop calculation against a wire table.
pub fn calculate(input: &VoltageDropInput, table: &WireTable) -> CalcResult<VoltageDropResult> {
    let source = Quantity::parse(&input.source)?;
    let current = Quantity::parse(&input.current)?;
    let total_resistance = input.resistance.total(table)?;

    let load_voltage = voltage_at_load(source, current, total_resistance)?;
    let voltage_drop = source.try_sub(load_voltage)?;
    let percent_drop = if source.value() != 0.0 {
        voltage_drop.value() / source.value() * 100.0
    } else {
        0.0
    };

    debug!(
        label = %input.label,
        resistance_ohm = total_resistance.value(),
        load_voltage_v = load_voltage.value(),
        "voltage drop calculation complete"
    );

    Ok(VoltageDropResult {
        label: input.label.clone(),
        source,
        current,
        total_resistance,
        voltage_drop,
        load_voltage,
        percent_drop,
    })
}

/// Formula description shown alongside the result
pub fn markdown() -> String {
    equations_markdown(
        "The voltage at the load is:",
        &[Equation::LoadVoltage, Equation::WireResistance],
    )
}
