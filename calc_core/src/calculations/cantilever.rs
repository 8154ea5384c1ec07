//! # Cantilever Beam Calculation
//!
//! Deflection, slope, shear and moment of a cantilever fixed at x=0 and free at
//! x=L under one of three load cases.
//!
//! ## Assumptions
//!
//! - Prismatic, linear-elastic beam with small deflections
//! - Fixed support at x=0, free end at x=L
//! - End load: point load F at x=L
//! - Intermediate load: point load F at x=a, 0 ≤ a ≤ L
//! - Uniform distributed load: intensity w over the full span
//!
//! Closed-form maxima (end-load deflection and slope, intermediate-load
//! deflection) are the textbook magnitudes, so a downward load gives a positive
//! maximum while the curve itself is negative. The end-load moment maximum is
//! the signed support moment -F·L. All other maxima are sampled on a uniform
//! grid and keep the sign of the dominant extreme (see [`crate::sampling`]).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::cantilever::{BeamParameters, CantileverBeam};
//! use calc_core::units::Quantity;
//!
//! let params = BeamParameters::end_load(
//!     Quantity::parse("1000 N").unwrap(),
//!     Quantity::parse("2 m").unwrap(),
//!     Quantity::parse("5000 N*m**2").unwrap(),
//! ).unwrap();
//! let beam = CantileverBeam::new(params).unwrap();
//!
//! assert!((beam.max_deflection().value() - 0.5333).abs() < 1e-4);
//! assert!((beam.max_moment().value() + 2000.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::cantilever as eq;
use crate::equations::registry::{equations_markdown, Equation};
use crate::errors::{CalcError, CalcResult};
use crate::sampling::{linspace, Response, ResultCurve, DEFAULT_SAMPLE_POINTS, MIN_SAMPLE_POINTS};
use crate::units::{Dimension, Quantity};

// ============================================================================
// Load Cases
// ============================================================================

/// The three supported loading scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadCase {
    EndLoad,
    IntermediateLoad,
    UniformDistributedLoad,
}

impl LoadCase {
    /// All load cases for selection menus
    pub const ALL: [LoadCase; 3] = [
        LoadCase::EndLoad,
        LoadCase::IntermediateLoad,
        LoadCase::UniformDistributedLoad,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            LoadCase::EndLoad => "Cantilever, End Loaded",
            LoadCase::IntermediateLoad => "Cantilever, Intermediate Loaded",
            LoadCase::UniformDistributedLoad => "Cantilever, Uniform Distributed Load",
        }
    }

    /// Formulas evaluated for this load case
    pub fn equations(&self) -> Vec<Equation> {
        match self {
            LoadCase::EndLoad => vec![
                Equation::EndLoadDeflection,
                Equation::EndLoadMaxDeflection,
                Equation::EndLoadSlope,
                Equation::EndLoadMaxSlope,
                Equation::EndLoadShear,
                Equation::EndLoadMoment,
                Equation::EndLoadMaxMoment,
            ],
            LoadCase::IntermediateLoad => vec![
                Equation::IntermediateLoadDeflection,
                Equation::IntermediateLoadMaxDeflection,
                Equation::IntermediateLoadSlope,
                Equation::IntermediateLoadShear,
                Equation::IntermediateLoadMoment,
                Equation::SampledExtremum,
            ],
            LoadCase::UniformDistributedLoad => vec![
                Equation::UniformLoadDeflection,
                Equation::UniformLoadSlope,
                Equation::UniformLoadShear,
                Equation::UniformLoadMoment,
                Equation::SampledExtremum,
            ],
        }
    }

    /// Typeset formula description shown alongside the results
    pub fn markdown(&self) -> String {
        let title = format!(
            "The formulas for a {} beam (fixed at x = 0, free at x = L) are:",
            self.display_name().to_lowercase()
        );
        equations_markdown(&title, &self.equations())
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// Physical inputs for one load case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "case")]
pub enum BeamParameters {
    EndLoad {
        force: Quantity,
        length: Quantity,
        ei: Quantity,
    },
    IntermediateLoad {
        force: Quantity,
        length: Quantity,
        ei: Quantity,
        distance: Quantity,
    },
    UniformDistributedLoad {
        intensity: Quantity,
        length: Quantity,
        ei: Quantity,
    },
}

impl BeamParameters {
    /// Point load at the free end
    pub fn end_load(force: Quantity, length: Quantity, ei: Quantity) -> CalcResult<Self> {
        let params = BeamParameters::EndLoad { force, length, ei };
        params.validate()?;
        Ok(params)
    }

    /// Point load at `distance` from the fixed end
    pub fn intermediate_load(
        force: Quantity,
        length: Quantity,
        ei: Quantity,
        distance: Quantity,
    ) -> CalcResult<Self> {
        let params = BeamParameters::IntermediateLoad {
            force,
            length,
            ei,
            distance,
        };
        params.validate()?;
        Ok(params)
    }

    /// Uniform load of `intensity` (force per length) over the full span
    pub fn uniform_distributed_load(intensity: Quantity, length: Quantity, ei: Quantity) -> CalcResult<Self> {
        let params = BeamParameters::UniformDistributedLoad {
            intensity,
            length,
            ei,
        };
        params.validate()?;
        Ok(params)
    }

    /// EI = E·I, checking that E is a modulus and I a second moment of area
    pub fn from_modulus(modulus: Quantity, inertia: Quantity) -> CalcResult<Quantity> {
        modulus.expect_dimension(Dimension::PRESSURE, "modulus")?;
        inertia.expect_dimension(Dimension::SECOND_MOMENT_OF_AREA, "inertia")?;
        Ok(modulus * inertia)
    }

    pub fn load_case(&self) -> LoadCase {
        match self {
            BeamParameters::EndLoad { .. } => LoadCase::EndLoad,
            BeamParameters::IntermediateLoad { .. } => LoadCase::IntermediateLoad,
            BeamParameters::UniformDistributedLoad { .. } => LoadCase::UniformDistributedLoad,
        }
    }

    pub fn length(&self) -> Quantity {
        match self {
            BeamParameters::EndLoad { length, .. }
            | BeamParameters::IntermediateLoad { length, .. }
            | BeamParameters::UniformDistributedLoad { length, .. } => *length,
        }
    }

    pub fn ei(&self) -> Quantity {
        match self {
            BeamParameters::EndLoad { ei, .. }
            | BeamParameters::IntermediateLoad { ei, .. }
            | BeamParameters::UniformDistributedLoad { ei, .. } => *ei,
        }
    }

    /// Check dimensions and ranges: L > 0, EI > 0, 0 ≤ a ≤ L.
    pub fn validate(&self) -> CalcResult<()> {
        let l = self.length().expect_dimension(Dimension::LENGTH, "length")?;
        let ei = self.ei().expect_dimension(Dimension::FLEXURAL_RIGIDITY, "ei")?;

        if !(l > 0.0 && l.is_finite()) {
            return Err(CalcError::invalid_input(
                "length",
                l.to_string(),
                "Beam length must be positive",
            ));
        }
        if !(ei > 0.0 && ei.is_finite()) {
            return Err(CalcError::invalid_input(
                "ei",
                ei.to_string(),
                "Flexural rigidity must be positive",
            ));
        }

        match self {
            BeamParameters::EndLoad { force, .. } => {
                finite(force.expect_dimension(Dimension::FORCE, "force")?, "force")?;
            }
            BeamParameters::IntermediateLoad { force, distance, .. } => {
                finite(force.expect_dimension(Dimension::FORCE, "force")?, "force")?;
                let a = distance.expect_dimension(Dimension::LENGTH, "distance")?;
                if !(0.0..=l).contains(&a) {
                    return Err(CalcError::invalid_input(
                        "distance",
                        a.to_string(),
                        format!("Load position must lie within the span (0 to {} m)", l),
                    ));
                }
            }
            BeamParameters::UniformDistributedLoad { intensity, .. } => {
                finite(
                    intensity.expect_dimension(Dimension::FORCE_PER_LENGTH, "intensity")?,
                    "intensity",
                )?;
            }
        }
        Ok(())
    }
}

fn finite(value: f64, field: &str) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be finite"))
    }
}

// ============================================================================
// Beam Model
// ============================================================================

/// A validated cantilever with its sampling grid.
#[derive(Debug, Clone)]
pub struct CantileverBeam {
    params: BeamParameters,
    grid: Vec<f64>,
}

impl CantileverBeam {
    /// Build with the default 100-point grid
    pub fn new(params: BeamParameters) -> CalcResult<Self> {
        Self::with_sample_points(params, DEFAULT_SAMPLE_POINTS)
    }

    /// Build with a custom grid resolution (at least two points)
    pub fn with_sample_points(params: BeamParameters, sample_points: usize) -> CalcResult<Self> {
        params.validate()?;
        if sample_points < MIN_SAMPLE_POINTS {
            return Err(CalcError::invalid_input(
                "sample_points",
                sample_points.to_string(),
                format!("At least {} sample points are required", MIN_SAMPLE_POINTS),
            ));
        }

        let grid = linspace(0.0, params.length().value(), sample_points);
        debug!(
            load_case = ?params.load_case(),
            length_m = params.length().value(),
            sample_points,
            "built cantilever model"
        );
        Ok(CantileverBeam { params, grid })
    }

    pub fn parameters(&self) -> &BeamParameters {
        &self.params
    }

    pub fn load_case(&self) -> LoadCase {
        self.params.load_case()
    }

    /// Sample positions in metres, 0 and L included
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    pub fn markdown(&self) -> String {
        self.load_case().markdown()
    }

    // ------------------------------------------------------------------------
    // Point responses in SI base units
    // ------------------------------------------------------------------------

    /// Deflection (m) at `x` metres from the support
    pub fn deflection_at(&self, x: f64) -> f64 {
        match self.params {
            BeamParameters::EndLoad { force, length, ei } => {
                eq::end_load_deflection(force.value, length.value, ei.value, x)
            }
            BeamParameters::IntermediateLoad { force, ei, distance, .. } => {
                eq::intermediate_load_deflection(force.value, distance.value, ei.value, x)
            }
            BeamParameters::UniformDistributedLoad { intensity, length, ei } => {
                eq::uniform_load_deflection(intensity.value, length.value, ei.value, x)
            }
        }
    }

    /// Slope (rad) at `x` metres from the support
    pub fn slope_at(&self, x: f64) -> f64 {
        match self.params {
            BeamParameters::EndLoad { force, length, ei } => {
                eq::end_load_slope(force.value, length.value, ei.value, x)
            }
            BeamParameters::IntermediateLoad { force, ei, distance, .. } => {
                eq::intermediate_load_slope(force.value, distance.value, ei.value, x)
            }
            BeamParameters::UniformDistributedLoad { intensity, length, ei } => {
                eq::uniform_load_slope(intensity.value, length.value, ei.value, x)
            }
        }
    }

    /// Shear (N) at `x` metres from the support
    pub fn shear_at(&self, x: f64) -> f64 {
        match self.params {
            BeamParameters::EndLoad { force, .. } => eq::end_load_shear(force.value),
            BeamParameters::IntermediateLoad { force, distance, .. } => {
                eq::intermediate_load_shear(force.value, distance.value, x)
            }
            BeamParameters::UniformDistributedLoad { intensity, length, .. } => {
                eq::uniform_load_shear(intensity.value, length.value, x)
            }
        }
    }

    /// Moment (N·m) at `x` metres from the support
    pub fn moment_at(&self, x: f64) -> f64 {
        match self.params {
            BeamParameters::EndLoad { force, length, .. } => {
                eq::end_load_moment(force.value, length.value, x)
            }
            BeamParameters::IntermediateLoad { force, distance, .. } => {
                eq::intermediate_load_moment(force.value, distance.value, x)
            }
            BeamParameters::UniformDistributedLoad { intensity, length, .. } => {
                eq::uniform_load_moment(intensity.value, length.value, x)
            }
        }
    }

    pub fn response_at(&self, response: Response, x: f64) -> f64 {
        match response {
            Response::Deflection => self.deflection_at(x),
            Response::Slope => self.slope_at(x),
            Response::Shear => self.shear_at(x),
            Response::Moment => self.moment_at(x),
        }
    }

    // ------------------------------------------------------------------------
    // Quantity-typed responses
    // ------------------------------------------------------------------------

    fn evaluate(&self, response: Response, x: Quantity) -> CalcResult<Quantity> {
        let x = x.expect_dimension(Dimension::LENGTH, "position")?;
        Ok(Quantity::new(self.response_at(response, x), response.dimension()))
    }

    pub fn deflection(&self, x: Quantity) -> CalcResult<Quantity> {
        self.evaluate(Response::Deflection, x)
    }

    pub fn slope(&self, x: Quantity) -> CalcResult<Quantity> {
        self.evaluate(Response::Slope, x)
    }

    pub fn shear(&self, x: Quantity) -> CalcResult<Quantity> {
        self.evaluate(Response::Shear, x)
    }

    pub fn moment(&self, x: Quantity) -> CalcResult<Quantity> {
        self.evaluate(Response::Moment, x)
    }

    // ------------------------------------------------------------------------
    // Curves and maxima
    // ------------------------------------------------------------------------

    /// Response sampled over the grid
    pub fn curve(&self, response: Response) -> ResultCurve {
        ResultCurve::sample(response, &self.grid, |x| self.response_at(response, x))
    }

    /// All four response curves
    pub fn curves(&self) -> Vec<ResultCurve> {
        Response::ALL.iter().map(|r| self.curve(*r)).collect()
    }

    fn sampled_max(&self, response: Response) -> Quantity {
        // The grid always holds at least MIN_SAMPLE_POINTS values
        self.curve(response)
            .extreme()
            .unwrap_or(Quantity::new(0.0, response.dimension()))
    }

    pub fn max_deflection(&self) -> Quantity {
        match self.params {
            BeamParameters::EndLoad { force, length, ei } => Quantity::new(
                eq::end_load_max_deflection(force.value, length.value, ei.value),
                Dimension::LENGTH,
            ),
            BeamParameters::IntermediateLoad { force, length, ei, distance } => Quantity::new(
                eq::intermediate_load_max_deflection(force.value, distance.value, length.value, ei.value),
                Dimension::LENGTH,
            ),
            BeamParameters::UniformDistributedLoad { .. } => self.sampled_max(Response::Deflection),
        }
    }

    pub fn max_slope(&self) -> Quantity {
        match self.params {
            BeamParameters::EndLoad { force, length, ei } => Quantity::dimensionless(
                eq::end_load_max_slope(force.value, length.value, ei.value),
            ),
            _ => self.sampled_max(Response::Slope),
        }
    }

    pub fn max_shear(&self) -> Quantity {
        match self.params {
            BeamParameters::EndLoad { force, .. } => {
                Quantity::new(eq::end_load_shear(force.value), Dimension::FORCE)
            }
            _ => self.sampled_max(Response::Shear),
        }
    }

    pub fn max_moment(&self) -> Quantity {
        match self.params {
            BeamParameters::EndLoad { force, length, .. } => Quantity::new(
                eq::end_load_max_moment(force.value, length.value),
                Dimension::MOMENT,
            ),
            _ => self.sampled_max(Response::Moment),
        }
    }

    pub fn max_of(&self, response: Response) -> Quantity {
        match response {
            Response::Deflection => self.max_deflection(),
            Response::Slope => self.max_slope(),
            Response::Shear => self.max_shear(),
            Response::Moment => self.max_moment(),
        }
    }
}

// ============================================================================
// Input / Result (serializable)
// ============================================================================

/// Load definition as entered, with quantities written as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "case")]
pub enum CantileverLoad {
    EndLoad { force: String },
    IntermediateLoad { force: String, distance: String },
    UniformDistributedLoad { intensity: String },
}

/// Beam stiffness, either as E and I or directly as EI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stiffness {
    Section { modulus: String, inertia: String },
    Rigidity { ei: String },
}

impl Stiffness {
    pub fn ei(&self) -> CalcResult<Quantity> {
        match self {
            Stiffness::Section { modulus, inertia } => {
                BeamParameters::from_modulus(Quantity::parse(modulus)?, Quantity::parse(inertia)?)
            }
            Stiffness::Rigidity { ei } => Quantity::parse(ei),
        }
    }
}

/// Input parameters for a cantilever calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Sign arm",
///   "load": { "case": "IntermediateLoad", "force": "1200 lbf", "distance": "15 ft" },
///   "length": "25 ft",
///   "stiffness": { "modulus": "27_500_000 lbf/in**2", "inertia": "209 in**4" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CantileverInput {
    /// User label (e.g., "C-1")
    pub label: String,
    pub load: CantileverLoad,
    /// Span length
    pub length: String,
    pub stiffness: Stiffness,
}

impl CantileverInput {
    /// Default inputs for a load case
    pub fn example(case: LoadCase) -> Self {
        let load = match case {
            LoadCase::EndLoad => CantileverLoad::EndLoad {
                force: "1200 lbf".to_string(),
            },
            LoadCase::IntermediateLoad => CantileverLoad::IntermediateLoad {
                force: "1200 lbf".to_string(),
                distance: "15 ft".to_string(),
            },
            LoadCase::UniformDistributedLoad => CantileverLoad::UniformDistributedLoad {
                intensity: "50 lbf/ft".to_string(),
            },
        };
        CantileverInput {
            label: case.display_name().to_string(),
            load,
            length: "25 ft".to_string(),
            stiffness: Stiffness::Section {
                modulus: "27_500_000 lbf/in**2".to_string(),
                inertia: "209 in**4".to_string(),
            },
        }
    }

    pub fn load_case(&self) -> LoadCase {
        match self.load {
            CantileverLoad::EndLoad { .. } => LoadCase::EndLoad,
            CantileverLoad::IntermediateLoad { .. } => LoadCase::IntermediateLoad,
            CantileverLoad::UniformDistributedLoad { .. } => LoadCase::UniformDistributedLoad,
        }
    }

    /// Parse the text quantities into validated parameters
    pub fn to_parameters(&self) -> CalcResult<BeamParameters> {
        let length = Quantity::parse(&self.length)?;
        let ei = self.stiffness.ei()?;
        match &self.load {
            CantileverLoad::EndLoad { force } => {
                BeamParameters::end_load(Quantity::parse(force)?, length, ei)
            }
            CantileverLoad::IntermediateLoad { force, distance } => BeamParameters::intermediate_load(
                Quantity::parse(force)?,
                length,
                ei,
                Quantity::parse(distance)?,
            ),
            CantileverLoad::UniformDistributedLoad { intensity } => {
                BeamParameters::uniform_distributed_load(Quantity::parse(intensity)?, length, ei)
            }
        }
    }
}

/// Calculation results, all values in SI base units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CantileverResult {
    pub label: String,
    pub load_case: LoadCase,
    pub parameters: BeamParameters,
    pub max_deflection: Quantity,
    pub max_slope: Quantity,
    pub max_shear: Quantity,
    pub max_moment: Quantity,
    /// Deflection, slope, shear and moment curves
    pub curves: Vec<ResultCurve>,
}

impl CantileverResult {
    pub fn curve(&self, response: Response) -> Option<&ResultCurve> {
        self.curves.iter().find(|c| c.response == response)
    }

    pub fn max_of(&self, response: Response) -> Quantity {
        match response {
            Response::Deflection => self.max_deflection,
            Response::Slope => self.max_slope,
            Response::Shear => self.max_shear,
            Response::Moment => self.max_moment,
        }
    }
}

/// Run a cantilever calculation.
pub fn calculate(input: &CantileverInput, sample_points: usize) -> CalcResult<CantileverResult> {
    let params = input.to_parameters()?;
    let beam = CantileverBeam::with_sample_points(params, sample_points)?;

    let result = CantileverResult {
        label: input.label.clone(),
        load_case: beam.load_case(),
        parameters: params,
        max_deflection: beam.max_deflection(),
        max_slope: beam.max_slope(),
        max_shear: beam.max_shear(),
        max_moment: beam.max_moment(),
        curves: beam.curves(),
    };

    debug!(
        label = %result.label,
        max_deflection_m = result.max_deflection.value(),
        max_moment_nm = result.max_moment.value(),
        "cantilever calculation complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON || (a - b).abs() / b.abs().max(1.0) < 1e-9
    }

    fn q(text: &str) -> Quantity {
        Quantity::parse(text).unwrap()
    }

    fn end_load_beam() -> CantileverBeam {
        let params = BeamParameters::end_load(q("1000 N"), q("2 m"), q("5000 N*m**2")).unwrap();
        CantileverBeam::new(params).unwrap()
    }

    #[test]
    fn test_end_load_properties() {
        let beam = end_load_beam();
        assert_eq!(beam.deflection(q("0 m")).unwrap().value(), 0.0);
        assert!(approx_eq(
            beam.deflection(q("2 m")).unwrap().value(),
            -beam.max_deflection().value()
        ));
        for x in beam.grid() {
            assert_eq!(beam.shear_at(*x), 1000.0);
        }
        assert_eq!(beam.moment(q("2 m")).unwrap().value(), 0.0);
        assert!(approx_eq(beam.moment(q("0 m")).unwrap().value(), -2000.0));
        assert!(approx_eq(beam.max_moment().value(), -2000.0));
    }

    #[test]
    fn test_end_load_concrete_values() {
        let beam = end_load_beam();
        assert!((beam.max_deflection().value() - 0.533_333).abs() < 1e-6);
        assert_eq!(beam.max_deflection().dimension(), Dimension::LENGTH);
        // F·L²/(2EI) = 1000·4/(2·5000)
        assert!(approx_eq(beam.max_slope().value(), 0.4));
        assert_eq!(beam.max_slope().dimension(), Dimension::DIMENSIONLESS);
        assert!(approx_eq(beam.slope_at(2.0), -0.4));
        assert_eq!(beam.max_shear().value(), 1000.0);
    }

    #[test]
    fn test_closed_form_matches_sampled_for_end_load() {
        let beam = end_load_beam();
        for response in Response::ALL {
            let sampled = beam.curve(response).extreme().unwrap();
            // Deflection and slope maxima are magnitudes of a negative curve
            let expected = match response {
                Response::Deflection | Response::Slope => -beam.max_of(response).value(),
                Response::Shear | Response::Moment => beam.max_of(response).value(),
            };
            assert!(
                approx_eq(sampled.value(), expected),
                "{:?}: sampled {} vs closed form {}",
                response,
                sampled.value(),
                beam.max_of(response).value()
            );
        }
    }

    #[test]
    fn test_intermediate_at_tip_matches_end_load() {
        let (f, l, ei) = (q("1200 lbf"), q("25 ft"), q("5.7475e9 lbf*in**2"));
        let tip = CantileverBeam::new(BeamParameters::intermediate_load(f, l, ei, l).unwrap()).unwrap();
        let end = CantileverBeam::new(BeamParameters::end_load(f, l, ei).unwrap()).unwrap();

        for &x in end.grid() {
            for response in Response::ALL {
                assert!(approx_eq(tip.response_at(response, x), end.response_at(response, x)));
            }
        }
        // Intermediate slope maximum is sampled and signed, the end-load one is a magnitude
        for response in [Response::Deflection, Response::Shear, Response::Moment] {
            assert!(approx_eq(tip.max_of(response).value(), end.max_of(response).value()));
        }
        assert!(approx_eq(tip.max_slope().value(), -end.max_slope().value()));
    }

    #[test]
    fn test_intermediate_shear_steps_at_load() {
        let params = BeamParameters::intermediate_load(q("500 N"), q("4 m"), q("1e6 N*m**2"), q("1.5 m")).unwrap();
        let beam = CantileverBeam::new(params).unwrap();
        assert_eq!(beam.shear(q("1.0 m")).unwrap().value(), 500.0);
        assert_eq!(beam.shear(q("1.5 m")).unwrap().value(), 500.0);
        assert_eq!(beam.shear(q("2.0 m")).unwrap().value(), 0.0);
        assert_eq!(beam.max_shear().value(), 500.0);
        assert!(approx_eq(beam.max_moment().value(), -750.0));
    }

    #[test]
    fn test_intermediate_max_deflection_is_free_end() {
        let params = BeamParameters::intermediate_load(q("500 N"), q("4 m"), q("1e6 N*m**2"), q("1.5 m")).unwrap();
        let beam = CantileverBeam::new(params).unwrap();
        assert!(approx_eq(beam.max_deflection().value(), -beam.deflection_at(4.0)));
    }

    #[test]
    fn test_intermediate_max_deflection_value() {
        let params = BeamParameters::intermediate_load(q("500 N"), q("4 m"), q("1e6 N*m**2"), q("1.5 m")).unwrap();
        let beam = CantileverBeam::new(params).unwrap();
        // F·a²·(3L - a)/(6EI) = 500·2.25·10.5/6e6
        assert!(approx_eq(beam.max_deflection().value(), 0.001_968_75));
        assert!(beam.max_deflection().value() > 0.0);
        assert!(beam.deflection_at(4.0) < 0.0);
    }

    #[test]
    fn test_uniform_load_properties() {
        let params = BeamParameters::uniform_distributed_load(q("100 N/m"), q("4 m"), q("1e5 N*m**2")).unwrap();
        let beam = CantileverBeam::new(params).unwrap();
        assert_eq!(beam.shear(q("4 m")).unwrap().value(), 0.0);
        assert_eq!(beam.moment(q("4 m")).unwrap().value(), 0.0);
        assert!(approx_eq(beam.shear(q("0 m")).unwrap().value(), 400.0));
        assert!(approx_eq(beam.moment(q("0 m")).unwrap().value(), -800.0));

        // Sampled maxima land on the grid ends for this monotonic case
        assert!(approx_eq(beam.max_shear().value(), 400.0));
        assert!(approx_eq(beam.max_moment().value(), -800.0));
        assert!(approx_eq(beam.max_deflection().value(), -100.0 * 256.0 / (8.0 * 1e5)));
    }

    #[test]
    fn test_distance_outside_span_rejected() {
        let err = BeamParameters::intermediate_load(q("1 kN"), q("3 m"), q("1e6 N*m**2"), q("3.5 m")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(BeamParameters::intermediate_load(q("1 kN"), q("3 m"), q("1e6 N*m**2"), q("-1 m")).is_err());
    }

    #[test]
    fn test_non_positive_length_and_ei_rejected() {
        assert!(BeamParameters::end_load(q("1 kN"), q("0 m"), q("1e6 N*m**2")).is_err());
        assert!(BeamParameters::end_load(q("1 kN"), q("2 m"), q("0 N*m**2")).is_err());
    }

    #[test]
    fn test_dimension_mismatch_surfaces() {
        let err = BeamParameters::end_load(q("2 m"), q("2 m"), q("1e6 N*m**2")).unwrap_err();
        assert_eq!(err.error_code(), "DIMENSION_MISMATCH");

        let beam = end_load_beam();
        assert!(beam.deflection(q("5 lbf")).is_err());
    }

    #[test]
    fn test_sample_points_configurable() {
        let params = BeamParameters::end_load(q("1 kN"), q("2 m"), q("1e6 N*m**2")).unwrap();
        let beam = CantileverBeam::with_sample_points(params, 11).unwrap();
        assert_eq!(beam.grid().len(), 11);
        assert!(CantileverBeam::with_sample_points(params, 1).is_err());
    }

    #[test]
    fn test_input_roundtrip_and_calculate() {
        let input = CantileverInput::example(LoadCase::IntermediateLoad);
        let json = serde_json::to_string(&input).unwrap();
        let parsed: CantileverInput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, input);

        let result = calculate(&parsed, DEFAULT_SAMPLE_POINTS).unwrap();
        assert_eq!(result.load_case, LoadCase::IntermediateLoad);
        assert_eq!(result.curves.len(), 4);
        let deflection = result.curve(Response::Deflection).unwrap();
        assert_eq!(deflection.len(), 100);
        assert_eq!(deflection.points[0].1, 0.0);
    }

    #[test]
    fn test_rigidity_stiffness_json() {
        let json = r#"{
            "label": "C-2",
            "load": { "case": "EndLoad", "force": "1000 N" },
            "length": "2 m",
            "stiffness": { "ei": "5000 N*m**2" }
        }"#;
        let input: CantileverInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.stiffness, Stiffness::Rigidity { ei: "5000 N*m**2".to_string() });
        let result = calculate(&input, 100).unwrap();
        assert!(approx_eq(result.max_moment.value(), -2000.0));
    }

    #[test]
    fn test_markdown_mentions_formulas() {
        let md = LoadCase::UniformDistributedLoad.markdown();
        assert!(md.contains("uniform distributed load"));
        assert!(md.contains("$$"));
        assert!(LoadCase::EndLoad.markdown().contains(r"\frac{F L^3}{3EI}"));
    }
}
