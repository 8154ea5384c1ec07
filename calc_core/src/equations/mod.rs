//! # Beam and Circuit Equations
//!
//! This module contains the closed-form formulas evaluated by the calculators.
//! Keeping the formulas in one place enables:
//! - Easy verification against the textbook references
//! - Documentation of assumptions and sign conventions
//! - Consistent implementation between the beam models and the formula display
//!
//! ## Modules
//!
//! - [`cantilever`] - Cantilever formulas (deflection, slope, shear, moment)
//! - [`registry`] - Equation metadata and markdown rendering
//!
//! ## Sign Conventions
//!
//! - **Loads**: Positive downward (gravity direction)
//! - **Deflection / slope**: Positive upward, so a downward load gives negative values
//! - **Moment**: Positive sagging; the support moment of a cantilever is negative
//! - **Shear**: Positive when the load beyond the section acts downward
//!
//! ## References
//!
//! - Gere, Mechanics of Materials, Appendix G
//! - Lindeburg, Civil Engineering Reference Manual
//! - Shigley, Mechanical Engineering Design, Table A-9

pub mod cantilever;
pub mod registry;

// Re-export commonly used items
pub use cantilever::{
    // End load
    end_load_deflection,
    end_load_slope,
    end_load_shear,
    end_load_moment,
    end_load_max_deflection,
    end_load_max_slope,
    end_load_max_moment,
    // Intermediate load
    intermediate_load_deflection,
    intermediate_load_slope,
    intermediate_load_shear,
    intermediate_load_moment,
    intermediate_load_max_deflection,
    // Uniform distributed load
    uniform_load_deflection,
    uniform_load_slope,
    uniform_load_shear,
    uniform_load_moment,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
    equations_markdown,
    generate_equations_markdown,
};
