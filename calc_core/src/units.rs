//! # Physical Quantities
//!
//! A dimension-tagged quantity type for the calculators. Every [`Quantity`]
//! stores its magnitude in SI base units (m, kg, s, A, K) next to a
//! [`Dimension`] made of integer exponents, so arithmetic composes dimensions and
//! adding a force to a length is caught at runtime.
//!
//! ## Design Philosophy
//!
//! This is deliberately a small, closed unit table rather than a full units
//! library:
//! - The calculators only need structural and DC-electrical units
//! - Inputs arrive as text ("1200 lbf", "27_500_000 lbf/in**2") from the CLI or files
//! - JSON serialization stays clean (value + exponents)
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Dimension, Quantity};
//!
//! let load = Quantity::parse("1200 lbf").unwrap();
//! let arm = Quantity::parse("15 ft").unwrap();
//! let moment = load * arm;
//!
//! assert_eq!(moment.dimension(), Dimension::MOMENT);
//! assert!((moment.to("lbf*ft").unwrap() - 18_000.0).abs() < 1e-6);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::ops::{Div, Mul, Neg};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Dimensions
// ============================================================================

/// Integer exponents of the SI base dimensions used by the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub length: i8,
    pub mass: i8,
    pub time: i8,
    pub current: i8,
    pub temperature: i8,
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension::new(0, 0, 0, 0, 0);
    pub const LENGTH: Dimension = Dimension::new(1, 0, 0, 0, 0);
    pub const MASS: Dimension = Dimension::new(0, 1, 0, 0, 0);
    pub const TIME: Dimension = Dimension::new(0, 0, 1, 0, 0);
    pub const CURRENT: Dimension = Dimension::new(0, 0, 0, 1, 0);
    pub const TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 0, 1);
    pub const INVERSE_TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 0, -1);
    pub const AREA: Dimension = Dimension::new(2, 0, 0, 0, 0);
    pub const SECOND_MOMENT_OF_AREA: Dimension = Dimension::new(4, 0, 0, 0, 0);
    pub const VELOCITY: Dimension = Dimension::new(1, 0, -1, 0, 0);
    pub const MASS_PER_LENGTH: Dimension = Dimension::new(-1, 1, 0, 0, 0);
    pub const DENSITY: Dimension = Dimension::new(-3, 1, 0, 0, 0);
    /// M·L·T⁻²
    pub const FORCE: Dimension = Dimension::new(1, 1, -2, 0, 0);
    /// Force·length (bending moment, torque)
    pub const MOMENT: Dimension = Dimension::new(2, 1, -2, 0, 0);
    /// Force/length (distributed load, spring rate)
    pub const FORCE_PER_LENGTH: Dimension = Dimension::new(0, 1, -2, 0, 0);
    /// Force/area (stress, modulus)
    pub const PRESSURE: Dimension = Dimension::new(-1, 1, -2, 0, 0);
    /// Force·length², the dimension of EI
    pub const FLEXURAL_RIGIDITY: Dimension = Dimension::new(3, 1, -2, 0, 0);
    pub const VOLTAGE: Dimension = Dimension::new(2, 1, -3, -1, 0);
    pub const RESISTANCE: Dimension = Dimension::new(2, 1, -3, -2, 0);
    pub const RESISTANCE_PER_LENGTH: Dimension = Dimension::new(1, 1, -3, -2, 0);

    /// Dimension names accepted by [`Dimension::named`]
    pub const NAMED: [(&'static str, Dimension); 20] = [
        ("dimensionless", Dimension::DIMENSIONLESS),
        ("length", Dimension::LENGTH),
        ("mass", Dimension::MASS),
        ("time", Dimension::TIME),
        ("current", Dimension::CURRENT),
        ("temperature", Dimension::TEMPERATURE),
        ("temperature_coefficient", Dimension::INVERSE_TEMPERATURE),
        ("area", Dimension::AREA),
        ("second_moment_of_area", Dimension::SECOND_MOMENT_OF_AREA),
        ("velocity", Dimension::VELOCITY),
        ("mass_per_length", Dimension::MASS_PER_LENGTH),
        ("density", Dimension::DENSITY),
        ("force", Dimension::FORCE),
        ("moment", Dimension::MOMENT),
        ("force_per_length", Dimension::FORCE_PER_LENGTH),
        ("pressure", Dimension::PRESSURE),
        ("flexural_rigidity", Dimension::FLEXURAL_RIGIDITY),
        ("voltage", Dimension::VOLTAGE),
        ("resistance", Dimension::RESISTANCE),
        ("resistance_per_length", Dimension::RESISTANCE_PER_LENGTH),
    ];

    pub const fn new(length: i8, mass: i8, time: i8, current: i8, temperature: i8) -> Self {
        Dimension {
            length,
            mass,
            time,
            current,
            temperature,
        }
    }

    /// Look up a dimension by its descriptive name (e.g. "force_per_length")
    pub fn named(name: &str) -> Option<Dimension> {
        let wanted = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Dimension::NAMED
            .iter()
            .find(|(n, _)| *n == wanted)
            .map(|(_, d)| *d)
    }

    pub const fn mul(self, rhs: Dimension) -> Dimension {
        Dimension::new(
            self.length + rhs.length,
            self.mass + rhs.mass,
            self.time + rhs.time,
            self.current + rhs.current,
            self.temperature + rhs.temperature,
        )
    }

    pub const fn div(self, rhs: Dimension) -> Dimension {
        Dimension::new(
            self.length - rhs.length,
            self.mass - rhs.mass,
            self.time - rhs.time,
            self.current - rhs.current,
            self.temperature - rhs.temperature,
        )
    }

    pub const fn powi(self, n: i8) -> Dimension {
        Dimension::new(
            self.length * n,
            self.mass * n,
            self.time * n,
            self.current * n,
            self.temperature * n,
        )
    }

    /// Product, or `None` if an exponent leaves the i8 range
    pub fn checked_mul(self, rhs: Dimension) -> Option<Dimension> {
        Some(Dimension::new(
            self.length.checked_add(rhs.length)?,
            self.mass.checked_add(rhs.mass)?,
            self.time.checked_add(rhs.time)?,
            self.current.checked_add(rhs.current)?,
            self.temperature.checked_add(rhs.temperature)?,
        ))
    }

    pub fn checked_powi(self, n: i8) -> Option<Dimension> {
        Some(Dimension::new(
            self.length.checked_mul(n)?,
            self.mass.checked_mul(n)?,
            self.time.checked_mul(n)?,
            self.current.checked_mul(n)?,
            self.temperature.checked_mul(n)?,
        ))
    }

    pub fn is_dimensionless(self) -> bool {
        self == Dimension::DIMENSIONLESS
    }
}

impl fmt::Display for Dimension {
    /// Bracketed form, e.g. `[length]*[mass]/[time]**2`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Alphabetical, like the usual units-library rendering
        let terms = [
            ("[current]", self.current),
            ("[length]", self.length),
            ("[mass]", self.mass),
            ("[temperature]", self.temperature),
            ("[time]", self.time),
        ];

        let render = |name: &str, exp: i8| {
            if exp == 1 {
                name.to_string()
            } else {
                format!("{}**{}", name, exp)
            }
        };

        let numerator: Vec<String> = terms
            .iter()
            .filter(|(_, e)| *e > 0)
            .map(|(n, e)| render(n, *e))
            .collect();
        let denominator: Vec<String> = terms
            .iter()
            .filter(|(_, e)| *e < 0)
            .map(|(n, e)| render(n, -*e))
            .collect();

        if numerator.is_empty() && denominator.is_empty() {
            return write!(f, "dimensionless");
        }
        if numerator.is_empty() {
            write!(f, "1")?;
        } else {
            write!(f, "{}", numerator.join("*"))?;
        }
        for term in denominator {
            write!(f, "/{}", term)?;
        }
        Ok(())
    }
}

// ============================================================================
// Unit Table
// ============================================================================

/// A named unit: `si = magnitude * factor + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct UnitDef {
    factor: f64,
    offset: f64,
    dim: Dimension,
}

impl UnitDef {
    const fn scale(factor: f64, dim: Dimension) -> Self {
        UnitDef {
            factor,
            offset: 0.0,
            dim,
        }
    }
}

const FOOT_M: f64 = 0.3048;
const INCH_M: f64 = 0.0254;
const POUND_KG: f64 = 0.453_592_37;
const POUND_FORCE_N: f64 = 4.448_221_615_260_5;
const PSI_PA: f64 = POUND_FORCE_N / (INCH_M * INCH_M);
const RANKINE_K: f64 = 5.0 / 9.0;

static UNITS: Lazy<HashMap<&'static str, UnitDef>> = Lazy::new(|| {
    use Dimension as D;

    let entries: &[(&[&'static str], UnitDef)] = &[
        // Length
        (&["m", "meter", "meters", "metre"], UnitDef::scale(1.0, D::LENGTH)),
        (&["mm", "millimeter", "millimeters"], UnitDef::scale(1e-3, D::LENGTH)),
        (&["cm", "centimeter"], UnitDef::scale(1e-2, D::LENGTH)),
        (&["km", "kilometer"], UnitDef::scale(1e3, D::LENGTH)),
        (&["in", "inch", "inches"], UnitDef::scale(INCH_M, D::LENGTH)),
        (&["ft", "foot", "feet"], UnitDef::scale(FOOT_M, D::LENGTH)),
        (&["kft"], UnitDef::scale(1000.0 * FOOT_M, D::LENGTH)),
        (&["yd", "yard"], UnitDef::scale(3.0 * FOOT_M, D::LENGTH)),
        (&["mi", "mile"], UnitDef::scale(1609.344, D::LENGTH)),
        // Mass
        (&["kg", "kilogram"], UnitDef::scale(1.0, D::MASS)),
        (&["g", "gram"], UnitDef::scale(1e-3, D::MASS)),
        (&["lb", "pound"], UnitDef::scale(POUND_KG, D::MASS)),
        // Time
        (&["s", "sec", "second"], UnitDef::scale(1.0, D::TIME)),
        (&["min", "minute"], UnitDef::scale(60.0, D::TIME)),
        (&["h", "hr", "hour"], UnitDef::scale(3600.0, D::TIME)),
        // Current
        (&["A", "amp", "amps", "ampere"], UnitDef::scale(1.0, D::CURRENT)),
        (&["mA", "milliamp"], UnitDef::scale(1e-3, D::CURRENT)),
        // Temperature
        (&["K", "kelvin"], UnitDef::scale(1.0, D::TEMPERATURE)),
        (
            &["degC", "celsius", "degree_Celsius"],
            UnitDef {
                factor: 1.0,
                offset: 273.15,
                dim: D::TEMPERATURE,
            },
        ),
        (
            &["degF", "fahrenheit", "degree_Fahrenheit"],
            UnitDef {
                factor: RANKINE_K,
                offset: 459.67 * RANKINE_K,
                dim: D::TEMPERATURE,
            },
        ),
        (&["delta_degC", "delta_degree_Celsius"], UnitDef::scale(1.0, D::TEMPERATURE)),
        (&["delta_degF", "delta_degree_Fahrenheit"], UnitDef::scale(RANKINE_K, D::TEMPERATURE)),
        // Velocity
        (&["mph", "mile_per_hour"], UnitDef::scale(0.447_04, D::VELOCITY)),
        (&["kph", "kilometer_per_hour"], UnitDef::scale(1.0 / 3.6, D::VELOCITY)),
        (&["fts"], UnitDef::scale(FOOT_M, D::VELOCITY)),
        (&["mps"], UnitDef::scale(1.0, D::VELOCITY)),
        // Force
        (&["N", "newton", "newtons"], UnitDef::scale(1.0, D::FORCE)),
        (&["kN", "kilonewton"], UnitDef::scale(1e3, D::FORCE)),
        (&["lbf", "force_pound"], UnitDef::scale(POUND_FORCE_N, D::FORCE)),
        (&["kip", "kips"], UnitDef::scale(1000.0 * POUND_FORCE_N, D::FORCE)),
        // Distributed load
        (&["plf"], UnitDef::scale(POUND_FORCE_N / FOOT_M, D::FORCE_PER_LENGTH)),
        (&["klf"], UnitDef::scale(1000.0 * POUND_FORCE_N / FOOT_M, D::FORCE_PER_LENGTH)),
        (&["pli"], UnitDef::scale(POUND_FORCE_N / INCH_M, D::FORCE_PER_LENGTH)),
        // Pressure
        (&["Pa", "pascal"], UnitDef::scale(1.0, D::PRESSURE)),
        (&["kPa"], UnitDef::scale(1e3, D::PRESSURE)),
        (&["MPa"], UnitDef::scale(1e6, D::PRESSURE)),
        (&["GPa"], UnitDef::scale(1e9, D::PRESSURE)),
        (&["psi"], UnitDef::scale(PSI_PA, D::PRESSURE)),
        (&["ksi"], UnitDef::scale(1000.0 * PSI_PA, D::PRESSURE)),
        (&["psf"], UnitDef::scale(POUND_FORCE_N / (FOOT_M * FOOT_M), D::PRESSURE)),
        // Electrical
        (&["V", "volt", "volts"], UnitDef::scale(1.0, D::VOLTAGE)),
        (&["mV", "millivolt"], UnitDef::scale(1e-3, D::VOLTAGE)),
        (&["kV", "kilovolt"], UnitDef::scale(1e3, D::VOLTAGE)),
        (&["ohm", "ohms", "Ω"], UnitDef::scale(1.0, D::RESISTANCE)),
        (&["mohm", "milliohm"], UnitDef::scale(1e-3, D::RESISTANCE)),
        (&["kohm", "kiloohm"], UnitDef::scale(1e3, D::RESISTANCE)),
        (
            &["ohms_per_1000ft", "ohm_per_kft"],
            UnitDef::scale(1.0 / (1000.0 * FOOT_M), D::RESISTANCE_PER_LENGTH),
        ),
        // Angle (radians are dimensionless)
        (&["rad", "radian", "radians"], UnitDef::scale(1.0, D::DIMENSIONLESS)),
        (&["deg", "degree", "degrees"], UnitDef::scale(std::f64::consts::PI / 180.0, D::DIMENSIONLESS)),
    ];

    let mut table = HashMap::new();
    for (names, def) in entries {
        for name in names.iter() {
            table.insert(*name, *def);
        }
    }
    table
});

fn lookup_unit(name: &str) -> CalcResult<UnitDef> {
    UNITS
        .get(name)
        .copied()
        .ok_or_else(|| CalcError::unknown_unit(name))
}

/// Parse a unit expression such as `lbf/in**2`, `kip*ft`, `1/delta_degF`.
///
/// Terms are joined by `*` or `/` and may carry an integer exponent written
/// `**n` or `^n`. An offset unit (degC, degF) keeps its offset only when it
/// is the whole expression; inside a compound it acts as a temperature
/// difference.
fn parse_unit_expr(expr: &str) -> CalcResult<UnitDef> {
    let normalized = expr.trim().replace("**", "^").replace('·', "*");
    if normalized.is_empty() {
        return Ok(UnitDef::scale(1.0, Dimension::DIMENSIONLESS));
    }

    let mut factor = 1.0;
    let mut dim = Dimension::DIMENSIONLESS;
    let mut single: Option<UnitDef> = None;
    let mut term_count = 0;

    let mut dividing = false;
    let mut term = String::new();
    let mut terms: Vec<(bool, String)> = Vec::new();
    for c in normalized.chars() {
        match c {
            '*' | '/' => {
                terms.push((dividing, std::mem::take(&mut term)));
                dividing = c == '/';
            }
            c if c.is_whitespace() => {}
            c => term.push(c),
        }
    }
    terms.push((dividing, term));

    for (divide, raw) in terms {
        if raw.is_empty() {
            return Err(CalcError::unknown_unit(expr));
        }
        let (name, exp) = match raw.split_once('^') {
            Some((name, exp)) => {
                let exp: i8 = exp
                    .parse()
                    .map_err(|_| CalcError::unknown_unit(expr))?;
                (name, exp)
            }
            None => (raw.as_str(), 1),
        };
        if name == "1" {
            continue;
        }

        let def = lookup_unit(name)?;
        let exp = if divide { exp.checked_neg() } else { Some(exp) }
            .ok_or_else(|| CalcError::unknown_unit(expr))?;
        factor *= def.factor.powi(exp as i32);
        dim = def
            .dim
            .checked_powi(exp)
            .and_then(|d| dim.checked_mul(d))
            .ok_or_else(|| CalcError::unknown_unit(expr))?;
        term_count += 1;
        single = if exp == 1 { Some(def) } else { None };
    }

    match single {
        Some(def) if term_count == 1 => Ok(def),
        _ => Ok(UnitDef {
            factor,
            offset: 0.0,
            dim,
        }),
    }
}

/// Dimension of a unit expression, e.g. `dimension_of("lbf/ft")`.
pub fn dimension_of(unit: &str) -> CalcResult<Dimension> {
    parse_unit_expr(unit).map(|def| def.dim)
}

// ============================================================================
// Quantity
// ============================================================================

/// A magnitude in SI base units tagged with its dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Magnitude in SI base units
    pub value: f64,
    /// Physical dimension
    pub dimension: Dimension,
}

impl Quantity {
    /// Create from a magnitude already in SI base units
    pub const fn new(value: f64, dimension: Dimension) -> Self {
        Quantity { value, dimension }
    }

    pub const fn dimensionless(value: f64) -> Self {
        Quantity::new(value, Dimension::DIMENSIONLESS)
    }

    /// Create from a magnitude expressed in `unit`.
    ///
    /// ```rust
    /// use calc_core::units::Quantity;
    ///
    /// let span = Quantity::from_unit(25.0, "ft").unwrap();
    /// assert!((span.value() - 7.62).abs() < 1e-9);
    /// ```
    pub fn from_unit(magnitude: f64, unit: &str) -> CalcResult<Self> {
        let def = parse_unit_expr(unit)?;
        Ok(Quantity::new(magnitude * def.factor + def.offset, def.dim))
    }

    /// Parse text such as `"1200 lbf"`, `"27_500_000 lbf/in**2"`, `"2A"` or `"0.5"`.
    pub fn parse(text: &str) -> CalcResult<Self> {
        let text = text.trim();
        let bytes: Vec<char> = text.chars().collect();

        // Split where the unit begins: first letter that is not an exponent marker
        let split = bytes.iter().enumerate().position(|(i, c)| {
            if !(c.is_alphabetic() || *c == 'Ω') {
                return false;
            }
            let exponent_marker = (*c == 'e' || *c == 'E')
                && i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes
                    .get(i + 1)
                    .map(|n| n.is_ascii_digit() || *n == '-' || *n == '+')
                    .unwrap_or(false);
            !exponent_marker
        });

        let (number, unit) = match split {
            Some(idx) => {
                let byte_idx = text
                    .char_indices()
                    .nth(idx)
                    .map(|(b, _)| b)
                    .unwrap_or(text.len());
                text.split_at(byte_idx)
            }
            None => (text, ""),
        };

        let cleaned = number.trim().replace('_', "");
        let magnitude: f64 = cleaned
            .parse()
            .map_err(|_| CalcError::invalid_input("quantity", text, "Expected '<number> <unit>'"))?;

        Quantity::from_unit(magnitude, unit.trim())
    }

    /// Magnitude in SI base units
    pub fn value(self) -> f64 {
        self.value
    }

    pub fn dimension(self) -> Dimension {
        self.dimension
    }

    /// Magnitude expressed in `unit`; fails when the dimensions differ.
    pub fn to(self, unit: &str) -> CalcResult<f64> {
        let def = parse_unit_expr(unit)?;
        if def.dim != self.dimension {
            return Err(CalcError::dimension_mismatch(
                format!("conversion to {}", unit),
                def.dim.to_string(),
                self.dimension.to_string(),
            ));
        }
        Ok((self.value - def.offset) / def.factor)
    }

    /// Require a given dimension, returning the SI magnitude.
    pub fn expect_dimension(self, expected: Dimension, field: &str) -> CalcResult<f64> {
        if self.dimension != expected {
            return Err(CalcError::dimension_mismatch(
                field,
                expected.to_string(),
                self.dimension.to_string(),
            ));
        }
        Ok(self.value)
    }

    pub fn try_add(self, rhs: Quantity) -> CalcResult<Quantity> {
        self.same_dimension(rhs, "add")?;
        Ok(Quantity::new(self.value + rhs.value, self.dimension))
    }

    pub fn try_sub(self, rhs: Quantity) -> CalcResult<Quantity> {
        self.same_dimension(rhs, "subtract")?;
        Ok(Quantity::new(self.value - rhs.value, self.dimension))
    }

    pub fn powi(self, n: i8) -> Quantity {
        Quantity::new(self.value.powi(n as i32), self.dimension.powi(n))
    }

    pub fn abs(self) -> Quantity {
        Quantity::new(self.value.abs(), self.dimension)
    }

    pub fn is_finite(self) -> bool {
        self.value.is_finite()
    }

    fn same_dimension(self, rhs: Quantity, operation: &str) -> CalcResult<()> {
        if self.dimension != rhs.dimension {
            return Err(CalcError::dimension_mismatch(
                operation,
                self.dimension.to_string(),
                rhs.dimension.to_string(),
            ));
        }
        Ok(())
    }
}

impl Mul for Quantity {
    type Output = Quantity;
    fn mul(self, rhs: Quantity) -> Quantity {
        Quantity::new(self.value * rhs.value, self.dimension.mul(rhs.dimension))
    }
}

impl Div for Quantity {
    type Output = Quantity;
    fn div(self, rhs: Quantity) -> Quantity {
        Quantity::new(self.value / rhs.value, self.dimension.div(rhs.dimension))
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;
    fn mul(self, rhs: f64) -> Quantity {
        Quantity::new(self.value * rhs, self.dimension)
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;
    fn div(self, rhs: f64) -> Quantity {
        Quantity::new(self.value / rhs, self.dimension)
    }
}

impl Neg for Quantity {
    type Output = Quantity;
    fn neg(self) -> Quantity {
        Quantity::new(-self.value, self.dimension)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&unit_display(*self, false))
    }
}

// ============================================================================
// Display Units
// ============================================================================

/// A preferred display unit: expression for conversion, label, decimals.
#[derive(Debug, Clone, Copy)]
struct DisplayUnit {
    expr: &'static str,
    label: &'static str,
    precision: usize,
}

const fn du(expr: &'static str, label: &'static str, precision: usize) -> DisplayUnit {
    DisplayUnit {
        expr,
        label,
        precision,
    }
}

/// US customary / SI pair, or a single unit shared by both systems.
#[derive(Debug, Clone, Copy)]
enum DisplayRule {
    Dual(DisplayUnit, DisplayUnit),
    Single(DisplayUnit),
}

/// Preferred display units per dimension. `minor` selects the small units
/// (in/mm, lbf/N) instead of the large ones (ft/m, kip/kN).
fn display_rule(dim: Dimension, minor: bool) -> Option<DisplayRule> {
    use DisplayRule::{Dual, Single};
    use Dimension as D;

    let rule = match (dim, minor) {
        (D::LENGTH, true) => Dual(du("in", "in", 3), du("mm", "mm", 3)),
        (D::LENGTH, false) => Dual(du("ft", "ft", 2), du("m", "m", 3)),
        (D::TEMPERATURE, _) => Dual(du("degF", "°F", 3), du("degC", "°C", 3)),
        (D::INVERSE_TEMPERATURE, _) => Dual(du("1/delta_degF", "1/Δ°F", 3), du("1/delta_degC", "1/Δ°C", 3)),
        (D::AREA, true) => Dual(du("in**2", "in²", 3), du("mm**2", "mm²", 4)),
        (D::AREA, false) => Dual(du("ft**2", "ft²", 4), du("m**2", "m²", 4)),
        (D::SECOND_MOMENT_OF_AREA, true) => Dual(du("in**4", "in⁴", 0), du("mm**4", "mm⁴", 0)),
        (D::SECOND_MOMENT_OF_AREA, false) => Dual(du("ft**4", "ft⁴", 2), du("m**4", "m⁴", 1)),
        (D::VELOCITY, true) => Dual(du("ft/s", "ft/s", 2), du("m/s", "m/s", 2)),
        (D::VELOCITY, false) => Dual(du("mph", "mph", 3), du("kph", "km/h", 3)),
        (D::MASS_PER_LENGTH, true) => Dual(du("lb/in", "lb/in", 2), du("kg/mm", "kg/mm", 2)),
        (D::MASS_PER_LENGTH, false) => Dual(du("lb/ft", "lb/ft", 4), du("kg/m", "kg/m", 4)),
        (D::FORCE, true) => Dual(du("lbf", "lbf", 2), du("N", "N", 2)),
        (D::FORCE, false) => Dual(du("kip", "kip", 3), du("kN", "kN", 3)),
        (D::MOMENT, true) => Dual(du("lbf*in", "lbf·in", 2), du("N*mm", "N·mm", 2)),
        (D::MOMENT, false) => Dual(du("kip*ft", "kip·ft", 3), du("kN*m", "kN·m", 3)),
        (D::FORCE_PER_LENGTH, true) => Dual(du("lbf/in", "lbf/in", 2), du("N/mm", "N/mm", 2)),
        (D::FORCE_PER_LENGTH, false) => Dual(du("lbf/ft", "lbf/ft", 4), du("N/m", "N/m", 4)),
        (D::PRESSURE, true) => Dual(du("psi", "psi", 2), du("N/mm**2", "N/mm²", 2)),
        (D::PRESSURE, false) => Dual(du("psf", "lbf/ft²", 4), du("Pa", "N/m²", 4)),
        (D::DENSITY, true) => Dual(du("lb/in**3", "lb/in³", 2), du("kg/mm**3", "kg/mm³", 2)),
        (D::DENSITY, false) => Dual(du("lb/ft**3", "lb/ft³", 4), du("kg/m**3", "kg/m³", 4)),
        (D::FLEXURAL_RIGIDITY, true) => Dual(du("lbf*in**2", "lbf·in²", 0), du("N*mm**2", "N·mm²", 0)),
        (D::FLEXURAL_RIGIDITY, false) => Dual(du("kip*ft**2", "kip·ft²", 3), du("kN*m**2", "kN·m²", 3)),
        (D::RESISTANCE_PER_LENGTH, _) => Dual(du("ohm/kft", "Ω/kft", 4), du("ohm/km", "Ω/km", 4)),
        (D::VOLTAGE, _) => Single(du("V", "V", 3)),
        (D::CURRENT, _) => Single(du("A", "A", 3)),
        (D::RESISTANCE, _) => Single(du("ohm", "Ω", 4)),
        (D::DIMENSIONLESS, _) => Single(du("", "", 6)),
        _ => return None,
    };
    Some(rule)
}

fn format_in(q: Quantity, unit: DisplayUnit) -> String {
    // Display units come from the same table as the dimension, so this can't mismatch
    let magnitude = q.to(unit.expr).unwrap_or(q.value);
    if unit.label.is_empty() {
        format!("{:.*}", unit.precision, magnitude)
    } else {
        format!("{:.*} {}", unit.precision, magnitude, unit.label)
    }
}

/// Format a quantity in its preferred US customary and SI display units.
///
/// ```rust
/// use calc_core::units::{unit_display, Quantity};
///
/// let span = Quantity::parse("25 ft").unwrap();
/// assert_eq!(unit_display(span, false), "25.00 ft | 7.620 m");
/// ```
pub fn unit_display(q: Quantity, minor: bool) -> String {
    match display_rule(q.dimension, minor) {
        Some(DisplayRule::Dual(us, si)) => format!("{} | {}", format_in(q, us), format_in(q, si)),
        Some(DisplayRule::Single(unit)) => format_in(q, unit),
        None => format!("{} {}", q.value, q.dimension),
    }
}

/// Selectable unit expressions for a dimension, preferred unit first.
pub fn available_units(dim: Dimension) -> &'static [&'static str] {
    use Dimension as D;

    match dim {
        D::LENGTH => &["ft", "in", "m", "mm"],
        D::TEMPERATURE => &["degF", "degC", "delta_degF", "delta_degC"],
        D::INVERSE_TEMPERATURE => &["1/delta_degF", "1/delta_degC"],
        D::AREA => &["ft**2", "in**2", "m**2", "mm**2"],
        D::SECOND_MOMENT_OF_AREA => &["ft**4", "in**4", "m**4", "mm**4"],
        D::VELOCITY => &["mph", "fts", "kph", "mps"],
        D::MASS_PER_LENGTH => &["lb/ft", "lb/in", "kg/m", "kg/mm"],
        D::DENSITY => &["lb/ft**3", "lb/in**3", "kg/m**3", "kg/mm**3"],
        D::FORCE => &["lbf", "kip", "N", "kN"],
        D::MOMENT => &["lbf*ft", "lbf*in", "kip*ft", "N*m", "kN*m", "N*mm"],
        D::FORCE_PER_LENGTH => &["lbf/ft", "lbf/in", "N/m", "N/mm"],
        D::PRESSURE => &["lbf/ft**2", "psi", "ksi", "N/m**2", "N/mm**2", "MPa", "GPa"],
        D::FLEXURAL_RIGIDITY => &["lbf*in**2", "kip*ft**2", "N*m**2", "kN*m**2"],
        D::VOLTAGE => &["V", "mV", "kV"],
        D::CURRENT => &["A", "mA"],
        D::RESISTANCE => &["ohm", "mohm", "kohm"],
        D::RESISTANCE_PER_LENGTH => &["ohms_per_1000ft", "ohm/km", "ohm/m"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 || (a - b).abs() / b.abs().max(1.0) < 1e-9
    }

    #[test]
    fn test_parse_simple_quantities() {
        let load = Quantity::parse("1200 lbf").unwrap();
        assert_eq!(load.dimension(), Dimension::FORCE);
        assert!(approx_eq(load.to("lbf").unwrap(), 1200.0));

        let current = Quantity::parse("2A").unwrap();
        assert_eq!(current.dimension(), Dimension::CURRENT);
        assert!(approx_eq(current.value(), 2.0));

        let ratio = Quantity::parse("0.5").unwrap();
        assert!(ratio.dimension().is_dimensionless());
    }

    #[test]
    fn test_parse_compound_and_underscores() {
        let modulus = Quantity::parse("27_500_000 lbf/in**2").unwrap();
        assert_eq!(modulus.dimension(), Dimension::PRESSURE);
        assert!(approx_eq(modulus.to("psi").unwrap(), 27_500_000.0));

        let inertia = Quantity::parse("209 in^4").unwrap();
        assert_eq!(inertia.dimension(), Dimension::SECOND_MOMENT_OF_AREA);

        let sci = Quantity::parse("2.5e3 N").unwrap();
        assert!(approx_eq(sci.value(), 2500.0));
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let err = Quantity::parse("3 furlong").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_UNIT");
        assert!(Quantity::parse("abc").is_err());
    }

    #[test]
    fn test_exponent_overflow_rejected() {
        for text in ["1 m^100*m^100", "1 N^100", "1 m**127/m**-1"] {
            let err = Quantity::parse(text).unwrap_err();
            assert_eq!(err.error_code(), "UNKNOWN_UNIT", "{}", text);
        }
        assert_eq!(dimension_of("1/m^-128").unwrap_err().error_code(), "UNKNOWN_UNIT");
        assert_eq!(Quantity::from_unit(1.0, "m^-128*m^-1").unwrap_err().error_code(), "UNKNOWN_UNIT");
        assert_eq!(Quantity::parse("1 m^60*m^60").unwrap().dimension(), Dimension::new(120, 0, 0, 0, 0));
    }

    #[test]
    fn test_checked_dimension_arithmetic() {
        let big = Dimension::new(100, 0, 0, 0, 0);
        assert_eq!(big.checked_mul(big), None);
        assert_eq!(Dimension::FORCE.checked_powi(65), None);
        assert_eq!(Dimension::LENGTH.checked_powi(2), Some(Dimension::AREA));
        assert_eq!(Dimension::FORCE.checked_mul(Dimension::LENGTH), Some(Dimension::MOMENT));
    }

    #[test]
    fn test_conversion_factors() {
        let span = Quantity::from_unit(1.0, "ft").unwrap();
        assert!(approx_eq(span.to("in").unwrap(), 12.0));

        let kip = Quantity::from_unit(1.0, "kip").unwrap();
        assert!(approx_eq(kip.to("lbf").unwrap(), 1000.0));

        let plf = Quantity::from_unit(12.0, "plf").unwrap();
        assert!(approx_eq(plf.to("lbf/in").unwrap(), 1.0));

        let resistivity = Quantity::parse("1.62 ohms_per_1000ft").unwrap();
        assert!(approx_eq(resistivity.to("ohm/kft").unwrap(), 1.62));
    }

    #[test]
    fn test_temperature_offsets() {
        let boiling = Quantity::from_unit(212.0, "degF").unwrap();
        assert!(approx_eq(boiling.to("degC").unwrap(), 100.0));
        assert!(approx_eq(boiling.value(), 373.15));

        // Inside a compound expression the offset is dropped
        let coeff = Quantity::from_unit(1.0, "1/delta_degC").unwrap();
        assert_eq!(coeff.dimension(), Dimension::INVERSE_TEMPERATURE);
        assert!(approx_eq(coeff.to("1/delta_degF").unwrap(), 5.0 / 9.0));
    }

    #[test]
    fn test_arithmetic_composes_dimensions() {
        let e = Quantity::parse("200 GPa").unwrap();
        let i = Quantity::parse("1e-6 m**4").unwrap();
        let ei = e * i;
        assert_eq!(ei.dimension(), Dimension::FLEXURAL_RIGIDITY);
        assert!(approx_eq(ei.value(), 200_000.0));

        let w = Quantity::parse("10 kN").unwrap() / Quantity::parse("2 m").unwrap();
        assert_eq!(w.dimension(), Dimension::FORCE_PER_LENGTH);
        assert_eq!(Quantity::parse("3 m").unwrap().powi(2).dimension(), Dimension::AREA);
    }

    #[test]
    fn test_add_requires_matching_dimension() {
        let a = Quantity::parse("2 ft").unwrap();
        let b = Quantity::parse("6 in").unwrap();
        let sum = a.try_add(b).unwrap();
        assert!(approx_eq(sum.to("in").unwrap(), 30.0));

        let force = Quantity::parse("5 lbf").unwrap();
        let err = a.try_add(force).unwrap_err();
        assert_eq!(err.error_code(), "DIMENSION_MISMATCH");
        assert!(a.try_sub(force).is_err());
        assert!(a.to("lbf").is_err());
    }

    #[test]
    fn test_dimension_display() {
        assert_eq!(Dimension::FORCE.to_string(), "[length]*[mass]/[time]**2");
        assert_eq!(Dimension::INVERSE_TEMPERATURE.to_string(), "1/[temperature]");
        assert_eq!(Dimension::AREA.to_string(), "[length]**2");
        assert_eq!(Dimension::DIMENSIONLESS.to_string(), "dimensionless");
    }

    #[test]
    fn test_named_dimensions() {
        assert_eq!(Dimension::named("force"), Some(Dimension::FORCE));
        assert_eq!(Dimension::named("Force-Per-Length"), Some(Dimension::FORCE_PER_LENGTH));
        assert_eq!(Dimension::named("luminosity"), None);
    }

    #[test]
    fn test_unit_display_dispatch() {
        let span = Quantity::parse("25 ft").unwrap();
        assert_eq!(unit_display(span, false), "25.00 ft | 7.620 m");
        assert_eq!(unit_display(span, true), "300.000 in | 7620.000 mm");

        let load = Quantity::parse("1200 lbf").unwrap();
        assert_eq!(unit_display(load, false), "1.200 kip | 5.338 kN");

        let volts = Quantity::parse("24 V").unwrap();
        assert_eq!(unit_display(volts, false), "24.000 V");
    }

    #[test]
    fn test_available_units_convert() {
        for (_, dim) in Dimension::NAMED.iter() {
            for unit in available_units(*dim) {
                assert_eq!(dimension_of(unit).unwrap(), *dim, "unit {}", unit);
            }
        }
    }

    #[test]
    fn test_serialization() {
        let q = Quantity::parse("3 m").unwrap();
        let json = serde_json::to_string(&q).unwrap();
        let roundtrip: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(q, roundtrip);
    }
}
