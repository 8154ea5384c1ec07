//! # Equation Registry
//!
//! Central registry of every formula the calculators evaluate. Each equation has
//! metadata (formula text, variables, reference) used to render the markdown
//! shown next to a calculation and the generated `EQUATIONS.md`.
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::equations::registry::Equation;
//!
//! let meta = Equation::EndLoadDeflection.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Textbook or reference a formula is taken from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// Gere, Mechanics of Materials
    Gere { appendix: &'static str, case: &'static str },
    /// Lindeburg, Civil Engineering Reference Manual
    Lindeburg { chapter: u8 },
    /// Shigley, Mechanical Engineering Design
    Shigley { table: &'static str },
    /// Ohm's law and other fundamentals
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Gere { appendix, case } => {
                format!("Gere, Mechanics of Materials, App. {} Case {}", appendix, case)
            }
            CodeReference::Lindeburg { chapter } => {
                format!("Lindeburg, CERM Ch. {}", chapter)
            }
            CodeReference::Shigley { table } => {
                format!("Shigley, Mechanical Engineering Design, Table {}", table)
            }
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Gere { .. } => "Gere",
            CodeReference::Lindeburg { .. } => "Lindeburg",
            CodeReference::Shigley { .. } => "Shigley",
            CodeReference::Mechanics => "Mechanics",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in the generated reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Stiffness inputs (EI)
    SectionProperties,
    /// Internal forces (shear, moment)
    InternalForces,
    /// Slopes
    Slopes,
    /// Deflections
    Deflections,
    /// Sampled maxima
    Extrema,
    /// DC circuit formulas
    Electrical,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::SectionProperties => "Section Properties",
            EquationCategory::InternalForces => "Internal Forces",
            EquationCategory::Slopes => "Slopes",
            EquationCategory::Deflections => "Deflections",
            EquationCategory::Extrema => "Extrema",
            EquationCategory::Electrical => "Electrical",
        }
    }

    /// Sort order in the generated reference (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::SectionProperties => 1,
            EquationCategory::InternalForces => 2,
            EquationCategory::Slopes => 3,
            EquationCategory::Deflections => 4,
            EquationCategory::Extrema => 5,
            EquationCategory::Electrical => 6,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "F", "L", "w")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Dimension name (e.g., "force", "length")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

const VAR_F: Variable = Variable::new("F", "Point load", "force");
const VAR_W: Variable = Variable::new("w", "Uniform load intensity", "force/length");
const VAR_L: Variable = Variable::new("L", "Span length", "length");
const VAR_A: Variable = Variable::new("a", "Distance from support to load", "length");
const VAR_X: Variable = Variable::new("x", "Position from the fixed end", "length");
const VAR_EI: Variable = Variable::new("EI", "Flexural rigidity", "force·length²");

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one formula.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// LaTeX for `$$ ... $$` markdown blocks
    pub formula_latex: &'static str,
    /// Plain-text formula
    pub formula_plain: &'static str,
    /// Reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All formulas used by the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// EI = E·I
    FlexuralRigidity,

    // -------------------------------------------------------------------------
    // Cantilever: End Load
    // -------------------------------------------------------------------------
    EndLoadDeflection,
    EndLoadSlope,
    EndLoadShear,
    EndLoadMoment,
    /// δ_max = FL³/(3EI)
    EndLoadMaxDeflection,
    /// θ_max = FL²/(2EI)
    EndLoadMaxSlope,
    /// M_max = -FL
    EndLoadMaxMoment,

    // -------------------------------------------------------------------------
    // Cantilever: Intermediate Load
    // -------------------------------------------------------------------------
    IntermediateLoadDeflection,
    IntermediateLoadSlope,
    IntermediateLoadShear,
    IntermediateLoadMoment,
    /// δ_max = Fa²(3L - a)/(6EI)
    IntermediateLoadMaxDeflection,

    // -------------------------------------------------------------------------
    // Cantilever: Uniform Distributed Load
    // -------------------------------------------------------------------------
    UniformLoadDeflection,
    UniformLoadSlope,
    UniformLoadShear,
    UniformLoadMoment,

    /// Dominant signed extreme over the sample grid
    SampledExtremum,

    // -------------------------------------------------------------------------
    // Wire Voltage Drop
    // -------------------------------------------------------------------------
    /// R = n·ℓ·r/1000 ft
    WireResistance,
    /// V_drop = I·R
    VoltageDrop,
    /// V_load = V_input - I·R
    LoadVoltage,
}

/// Every registered equation, in registry order.
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::FlexuralRigidity,
    Equation::EndLoadDeflection,
    Equation::EndLoadSlope,
    Equation::EndLoadShear,
    Equation::EndLoadMoment,
    Equation::EndLoadMaxDeflection,
    Equation::EndLoadMaxSlope,
    Equation::EndLoadMaxMoment,
    Equation::IntermediateLoadDeflection,
    Equation::IntermediateLoadSlope,
    Equation::IntermediateLoadShear,
    Equation::IntermediateLoadMoment,
    Equation::IntermediateLoadMaxDeflection,
    Equation::UniformLoadDeflection,
    Equation::UniformLoadSlope,
    Equation::UniformLoadShear,
    Equation::UniformLoadMoment,
    Equation::SampledExtremum,
    Equation::WireResistance,
    Equation::VoltageDrop,
    Equation::LoadVoltage,
];

const GERE_G1_END: CodeReference = CodeReference::Gere { appendix: "G", case: "4" };
const GERE_G1_POINT: CodeReference = CodeReference::Gere { appendix: "G", case: "5" };
const GERE_G1_UNIFORM: CodeReference = CodeReference::Gere { appendix: "G", case: "1" };

impl Equation {
    /// Full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        use EquationCategory::*;

        let cantilever = vec!["Prismatic, linear-elastic beam", "Small deflections"];

        match self {
            Equation::FlexuralRigidity => EquationMetadata {
                name: "Flexural Rigidity",
                description: "Bending stiffness of the cross-section.",
                formula_latex: r"EI = E \cdot I",
                formula_plain: "EI = E·I",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("E", "Modulus of elasticity", "force/length²"),
                    Variable::new("I", "Second moment of area", "length⁴"),
                ],
                assumptions: vec![],
                category: SectionProperties,
                source_function: "calculations::cantilever::BeamParameters::from_modulus",
            },
            Equation::EndLoadDeflection => EquationMetadata {
                name: "End Load Deflection",
                description: "Deflection along a cantilever with a point load at the free end.",
                formula_latex: r"\delta(x) = -\frac{F x^2}{6EI}\left(3L - x\right)",
                formula_plain: "δ(x) = -(F·x²/(6EI))·(3L - x)",
                reference: GERE_G1_END,
                variables: vec![VAR_F, VAR_L, VAR_X, VAR_EI],
                assumptions: cantilever,
                category: Deflections,
                source_function: "equations::cantilever::end_load_deflection",
            },
            Equation::EndLoadSlope => EquationMetadata {
                name: "End Load Slope",
                description: "Rotation along a cantilever with a point load at the free end.",
                formula_latex: r"\theta(x) = -\frac{F x}{2EI}\left(2L - x\right)",
                formula_plain: "θ(x) = -(F·x/(2EI))·(2L - x)",
                reference: GERE_G1_END,
                variables: vec![VAR_F, VAR_L, VAR_X, VAR_EI],
                assumptions: cantilever,
                category: Slopes,
                source_function: "equations::cantilever::end_load_slope",
            },
            Equation::EndLoadShear => EquationMetadata {
                name: "End Load Shear",
                description: "Shear is constant along the span.",
                formula_latex: r"V = F",
                formula_plain: "V = F",
                reference: GERE_G1_END,
                variables: vec![VAR_F],
                assumptions: vec![],
                category: InternalForces,
                source_function: "equations::cantilever::end_load_shear",
            },
            Equation::EndLoadMoment => EquationMetadata {
                name: "End Load Moment",
                description: "Moment along a cantilever with a point load at the free end.",
                formula_latex: r"M(x) = -F\left(L - x\right)",
                formula_plain: "M(x) = -F·(L - x)",
                reference: GERE_G1_END,
                variables: vec![VAR_F, VAR_L, VAR_X],
                assumptions: vec![],
                category: InternalForces,
                source_function: "equations::cantilever::end_load_moment",
            },
            Equation::EndLoadMaxDeflection => EquationMetadata {
                name: "End Load Maximum Deflection",
                description: "Magnitude of the free-end deflection.",
                formula_latex: r"\delta_{max} = \frac{F L^3}{3EI}",
                formula_plain: "δ_max = F·L³/(3EI)",
                reference: CodeReference::Shigley { table: "A-9-1" },
                variables: vec![VAR_F, VAR_L, VAR_EI],
                assumptions: cantilever,
                category: Deflections,
                source_function: "equations::cantilever::end_load_max_deflection",
            },
            Equation::EndLoadMaxSlope => EquationMetadata {
                name: "End Load Maximum Slope",
                description: "Magnitude of the free-end rotation.",
                formula_latex: r"\theta_{max} = \frac{F L^2}{2EI}",
                formula_plain: "θ_max = F·L²/(2EI)",
                reference: CodeReference::Shigley { table: "A-9-1" },
                variables: vec![VAR_F, VAR_L, VAR_EI],
                assumptions: cantilever,
                category: Slopes,
                source_function: "equations::cantilever::end_load_max_slope",
            },
            Equation::EndLoadMaxMoment => EquationMetadata {
                name: "End Load Maximum Moment",
                description: "Moment at the fixed support.",
                formula_latex: r"M_{max} = -F L",
                formula_plain: "M_max = -F·L",
                reference: CodeReference::Lindeburg { chapter: 44 },
                variables: vec![VAR_F, VAR_L],
                assumptions: vec![],
                category: InternalForces,
                source_function: "equations::cantilever::end_load_max_moment",
            },
            Equation::IntermediateLoadDeflection => EquationMetadata {
                name: "Intermediate Load Deflection",
                description: "Deflection along a cantilever with a point load at distance a.",
                formula_latex: r"\delta(x) = \begin{cases} -\frac{F x^2}{6EI}\left(3a - x\right) & x \le a \\ -\frac{F a^2}{6EI}\left(3x - a\right) & x > a \end{cases}",
                formula_plain: "δ(x) = -(F·x²/(6EI))·(3a - x) for x ≤ a; -(F·a²/(6EI))·(3x - a) for x > a",
                reference: GERE_G1_POINT,
                variables: vec![VAR_F, VAR_A, VAR_X, VAR_EI],
                assumptions: vec!["Prismatic, linear-elastic beam", "Small deflections", "0 ≤ a ≤ L"],
                category: Deflections,
                source_function: "equations::cantilever::intermediate_load_deflection",
            },
            Equation::IntermediateLoadSlope => EquationMetadata {
                name: "Intermediate Load Slope",
                description: "Rotation along a cantilever with a point load at distance a.",
                formula_latex: r"\theta(x) = \begin{cases} -\frac{F x}{2EI}\left(2a - x\right) & x \le a \\ -\frac{F a^2}{2EI} & x > a \end{cases}",
                formula_plain: "θ(x) = -(F·x/(2EI))·(2a - x) for x ≤ a; -F·a²/(2EI) for x > a",
                reference: GERE_G1_POINT,
                variables: vec![VAR_F, VAR_A, VAR_X, VAR_EI],
                assumptions: cantilever,
                category: Slopes,
                source_function: "equations::cantilever::intermediate_load_slope",
            },
            Equation::IntermediateLoadShear => EquationMetadata {
                name: "Intermediate Load Shear",
                description: "Shear between the support and the load; zero beyond it.",
                formula_latex: r"V(x) = \begin{cases} F & x \le a \\ 0 & x > a \end{cases}",
                formula_plain: "V(x) = F for x ≤ a; 0 for x > a",
                reference: GERE_G1_POINT,
                variables: vec![VAR_F, VAR_A, VAR_X],
                assumptions: vec![],
                category: InternalForces,
                source_function: "equations::cantilever::intermediate_load_shear",
            },
            Equation::IntermediateLoadMoment => EquationMetadata {
                name: "Intermediate Load Moment",
                description: "Moment between the support and the load; zero beyond it.",
                formula_latex: r"M(x) = \begin{cases} -F\left(a - x\right) & x \le a \\ 0 & x > a \end{cases}",
                formula_plain: "M(x) = -F·(a - x) for x ≤ a; 0 for x > a",
                reference: GERE_G1_POINT,
                variables: vec![VAR_F, VAR_A, VAR_X],
                assumptions: vec![],
                category: InternalForces,
                source_function: "equations::cantilever::intermediate_load_moment",
            },
            Equation::IntermediateLoadMaxDeflection => EquationMetadata {
                name: "Intermediate Load Maximum Deflection",
                description: "Magnitude of the free-end deflection.",
                formula_latex: r"\delta_{max} = \frac{F a^2}{6EI}\left(3L - a\right)",
                formula_plain: "δ_max = F·a²·(3L - a)/(6EI)",
                reference: CodeReference::Shigley { table: "A-9-2" },
                variables: vec![VAR_F, VAR_A, VAR_L, VAR_EI],
                assumptions: cantilever,
                category: Deflections,
                source_function: "equations::cantilever::intermediate_load_max_deflection",
            },
            Equation::UniformLoadDeflection => EquationMetadata {
                name: "Uniform Load Deflection",
                description: "Deflection along a cantilever under a full-span uniform load.",
                formula_latex: r"\delta(x) = -\frac{w x^2}{24EI}\left(6L^2 - 4Lx + x^2\right)",
                formula_plain: "δ(x) = -(w·x²/(24EI))·(6L² - 4Lx + x²)",
                reference: GERE_G1_UNIFORM,
                variables: vec![VAR_W, VAR_L, VAR_X, VAR_EI],
                assumptions: cantilever,
                category: Deflections,
                source_function: "equations::cantilever::uniform_load_deflection",
            },
            Equation::UniformLoadSlope => EquationMetadata {
                name: "Uniform Load Slope",
                description: "Rotation along a cantilever under a full-span uniform load.",
                formula_latex: r"\theta(x) = -\frac{w x}{6EI}\left(3L^2 - 3Lx + x^2\right)",
                formula_plain: "θ(x) = -(w·x/(6EI))·(3L² - 3Lx + x²)",
                reference: GERE_G1_UNIFORM,
                variables: vec![VAR_W, VAR_L, VAR_X, VAR_EI],
                assumptions: cantilever,
                category: Slopes,
                source_function: "equations::cantilever::uniform_load_slope",
            },
            Equation::UniformLoadShear => EquationMetadata {
                name: "Uniform Load Shear",
                description: "Shear carried by the load between x and the free end.",
                formula_latex: r"V(x) = w\left(L - x\right)",
                formula_plain: "V(x) = w·(L - x)",
                reference: GERE_G1_UNIFORM,
                variables: vec![VAR_W, VAR_L, VAR_X],
                assumptions: vec![],
                category: InternalForces,
                source_function: "equations::cantilever::uniform_load_shear",
            },
            Equation::UniformLoadMoment => EquationMetadata {
                name: "Uniform Load Moment",
                description: "Moment along a cantilever under a full-span uniform load.",
                formula_latex: r"M(x) = -\frac{w\left(L - x\right)^2}{2}",
                formula_plain: "M(x) = -w·(L - x)²/2",
                reference: GERE_G1_UNIFORM,
                variables: vec![VAR_W, VAR_L, VAR_X],
                assumptions: vec![],
                category: InternalForces,
                source_function: "equations::cantilever::uniform_load_moment",
            },
            Equation::SampledExtremum => EquationMetadata {
                name: "Sampled Extremum",
                description: "Dominant signed extreme of a response sampled on a uniform grid over [0, L].",
                formula_latex: r"y_{max} = \begin{cases} \max y_i & |\max y_i| \ge |\min y_i| \\ \min y_i & \text{otherwise} \end{cases}",
                formula_plain: "y_max = max(y) if |max(y)| ≥ |min(y)| else min(y)",
                reference: CodeReference::Mechanics,
                variables: vec![Variable::new("y_i", "Response sampled at grid point i", "any")],
                assumptions: vec!["Extremes between grid points are approximated by the nearest sample"],
                category: Extrema,
                source_function: "sampling::return_max",
            },
            Equation::WireResistance => EquationMetadata {
                name: "Wire Resistance",
                description: "Total loop resistance from a tabulated resistance per 1000 ft.",
                formula_latex: r"R = \frac{n \cdot \ell \cdot r}{1000\,\text{ft}}",
                formula_plain: "R = n·ℓ·r/1000 ft",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("n", "Number of conductors in the loop", "count"),
                    Variable::new("ℓ", "One-way wire length", "length"),
                    Variable::new("r", "Resistance per 1000 ft", "resistance/length"),
                ],
                assumptions: vec!["Conductor at 20 °C"],
                category: Electrical,
                source_function: "calculations::voltage_drop::WireResistance::total",
            },
            Equation::VoltageDrop => EquationMetadata {
                name: "Voltage Drop",
                description: "Ohm's law across the wire.",
                formula_latex: r"V_{\text{drop}} = I \cdot R",
                formula_plain: "V_drop = I·R",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("I", "Load current", "current"),
                    Variable::new("R", "Total wire resistance", "resistance"),
                ],
                assumptions: vec!["DC, steady state"],
                category: Electrical,
                source_function: "calculations::voltage_drop::voltage_at_load",
            },
            Equation::LoadVoltage => EquationMetadata {
                name: "Voltage at Load",
                description: "Source voltage less the drop across the wire.",
                formula_latex: r"V_{\text{load}} = V_{\text{input}} - I \cdot R",
                formula_plain: "V_load = V_input - I·R",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("V_input", "Source voltage", "voltage"),
                    Variable::new("I", "Load current", "current"),
                    Variable::new("R", "Total wire resistance", "resistance"),
                ],
                assumptions: vec!["DC, steady state"],
                category: Electrical,
                source_function: "calculations::voltage_drop::voltage_at_load",
            },
        }
    }

    /// Categories that contain at least one equation, in display order
    pub fn all_categories() -> Vec<EquationCategory> {
        let mut categories: Vec<EquationCategory> =
            ALL_EQUATIONS.iter().map(|e| e.metadata().category).collect();
        categories.sort_by_key(|c| c.sort_order());
        categories.dedup();
        categories
    }

    /// Equations in a category, in registry order
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .copied()
            .filter(|e| e.metadata().category == category)
            .collect()
    }
}

// ============================================================================
// Markdown Generation
// ============================================================================

/// Typeset markdown for a set of equations, one `$$` block each.
///
/// This is the text shown next to a calculation's results.
pub fn equations_markdown(title: &str, equations: &[Equation]) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n\n", title));
    for equation in equations {
        let meta = equation.metadata();
        output.push_str(&format!("**{}**\n\n", meta.name));
        output.push_str(&format!("$${}$$\n\n", meta.formula_latex));
    }
    output
}

/// Generate a complete EQUATIONS.md file for documentation.
///
/// ```rust
/// use calc_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Equations Reference"));
/// assert!(markdown.contains("Deflections"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(r#"# Beamcalc Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

All cantilevers are fixed at x = 0 and free at x = L.

## Sign Conventions

| Quantity | Positive Direction |
|----------|-------------------|
| Loads | Downward (gravity direction) |
| Deflection, slope | Upward (downward loads give negative values) |
| Moment | Sagging (support moment is negative) |
| Shear | Load between section and free end acting downward |

---

"#);

    for category in Equation::all_categories() {
        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in Equation::in_category(category) {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Source:** `{}`\n\n", meta.source_function));
        }

        output.push_str("---\n\n");
    }

    output
}
