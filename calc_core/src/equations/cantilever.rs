//! # Cantilever Beam Formulas
//!
//! Closed-form responses of a prismatic cantilever fixed at x=0 and free at x=L.
//! Inputs may be in any consistent unit set; the calculation layer passes SI
//! base units.
//!
//! ## Notation
//!
//! - `L` = Span length
//! - `x` = Position from the fixed end
//! - `a` = Load position from the fixed end
//! - `F` = Point load magnitude
//! - `w` = Uniform load intensity (force per unit length)
//! - `EI` = Flexural rigidity
//!
//! ## Sign Conventions
//!
//! - Loads: Positive downward
//! - Deflection and slope: Negative downward (a downward load gives negative values)
//! - Moment: Negative hogging at the support
//! - Shear: Positive for a downward load between x and the free end
//!
//! ## References
//!
//! - Gere, Mechanics of Materials, Appendix G (cantilever beams)
//! - Lindeburg, Civil Engineering Reference Manual, beam formulas
//! - Shigley, Mechanical Engineering Design, Table A-9

// =============================================================================
// END LOAD
// Cantilever with concentrated load F at the free end
// =============================================================================

/// Deflection at x for an end load
///
/// ```text
///    ┃                     F
///    ┃                     ↓
///    ┃━━━━━━━━━━━━━━━━━━━━━┥
///    ┃ ←──────── L ───────→
/// ```
///
/// # Formula (Gere G-1, case 4)
/// δ(x) = -(F·x²/(6EI))·(3L - x)
#[inline]
pub fn end_load_deflection(f: f64, l: f64, ei: f64, x: f64) -> f64 {
    -((f * x * x) / (6.0 * ei)) * (3.0 * l - x)
}

/// Slope at x for an end load
///
/// θ(x) = -(F·x/(2EI))·(2L - x)
#[inline]
pub fn end_load_slope(f: f64, l: f64, ei: f64, x: f64) -> f64 {
    -((f * x) / (2.0 * ei)) * (2.0 * l - x)
}

/// Shear for an end load, constant along the span
///
/// V = F
#[inline]
pub fn end_load_shear(f: f64) -> f64 {
    f
}

/// Moment at x for an end load
///
/// M(x) = -F·(L - x)
#[inline]
pub fn end_load_moment(f: f64, l: f64, x: f64) -> f64 {
    -(f * (l - x))
}

/// Deflection magnitude at the free end
///
/// δ_max = F·L³/(3EI)
#[inline]
pub fn end_load_max_deflection(f: f64, l: f64, ei: f64) -> f64 {
    f * l.powi(3) / (3.0 * ei)
}

/// Slope magnitude at the free end
///
/// θ_max = F·L²/(2EI)
#[inline]
pub fn end_load_max_slope(f: f64, l: f64, ei: f64) -> f64 {
    f * l * l / (2.0 * ei)
}

/// Moment at the support
///
/// M_max = -F·L
#[inline]
pub fn end_load_max_moment(f: f64, l: f64) -> f64 {
    -(f * l)
}

// =============================================================================
// INTERMEDIATE LOAD
// Cantilever with concentrated load F at distance a from the support
// =============================================================================

/// Deflection at x for a load at a
///
/// ```text
///    ┃            F
///    ┃            ↓
///    ┃━━━━━━━━━━━━┿━━━━━━━━
///    ┃ ←── a ───→
///    ┃ ←──────── L ───────→
/// ```
///
/// # Formulas (Gere G-1, case 5)
/// - δ(x) = -(F·x²/(6EI))·(3a - x)      for x ≤ a
/// - δ(x) = -(F·a²/(6EI))·(3x - a)      for x > a
#[inline]
pub fn intermediate_load_deflection(f: f64, a: f64, ei: f64, x: f64) -> f64 {
    if x <= a {
        -((f * x * x) / (6.0 * ei)) * (3.0 * a - x)
    } else {
        -((f * a * a) / (6.0 * ei)) * (3.0 * x - a)
    }
}

/// Slope at x for a load at a
///
/// - θ(x) = -(F·x/(2EI))·(2a - x)      for x ≤ a
/// - θ(x) = -F·a²/(2EI)                for x > a (rigid rotation beyond the load)
#[inline]
pub fn intermediate_load_slope(f: f64, a: f64, ei: f64, x: f64) -> f64 {
    if x <= a {
        -((f * x) / (2.0 * ei)) * (2.0 * a - x)
    } else {
        -((f * a * a) / (2.0 * ei))
    }
}

/// Shear at x for a load at a
///
/// - V(x) = F      for x ≤ a
/// - V(x) = 0      for x > a
#[inline]
pub fn intermediate_load_shear(f: f64, a: f64, x: f64) -> f64 {
    if x <= a {
        f
    } else {
        0.0
    }
}

/// Moment at x for a load at a
///
/// - M(x) = -F·(a - x)     for x ≤ a
/// - M(x) = 0              for x > a
#[inline]
pub fn intermediate_load_moment(f: f64, a: f64, x: f64) -> f64 {
    if x <= a {
        -(f * (a - x))
    } else {
        0.0
    }
}

/// Deflection magnitude at the free end
///
/// δ_max = F·a²·(3L - a)/(6EI)
#[inline]
pub fn intermediate_load_max_deflection(f: f64, a: f64, l: f64, ei: f64) -> f64 {
    (f * a * a / (6.0 * ei)) * (3.0 * l - a)
}

// =============================================================================
// UNIFORM DISTRIBUTED LOAD
// Cantilever with intensity w over the full span
// =============================================================================

/// Deflection at x for a full-span uniform load
///
/// ```text
///    ┃↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓ w
///    ┃━━━━━━━━━━━━━━━━━━━━━
///    ┃ ←──────── L ───────→
/// ```
///
/// # Formula (Gere G-1, case 1)
/// δ(x) = -(w·x²/(24EI))·(6L² - 4Lx + x²)
#[inline]
pub fn uniform_load_deflection(w: f64, l: f64, ei: f64, x: f64) -> f64 {
    -((w * x * x) / (24.0 * ei)) * (6.0 * l * l - 4.0 * l * x + x * x)
}

/// Slope at x for a full-span uniform load
///
/// θ(x) = -(w·x/(6EI))·(3L² - 3Lx + x²)
#[inline]
pub fn uniform_load_slope(w: f64, l: f64, ei: f64, x: f64) -> f64 {
    -((w * x) / (6.0 * ei)) * (3.0 * l * l - 3.0 * l * x + x * x)
}

/// Shear at x for a full-span uniform load
///
/// V(x) = w·(L - x)
#[inline]
pub fn uniform_load_shear(w: f64, l: f64, x: f64) -> f64 {
    w * (l - x)
}

/// Moment at x for a full-span uniform load
///
/// M(x) = -w·(L - x)²/2
#[inline]
pub fn uniform_load_moment(w: f64, l: f64, x: f64) -> f64 {
    -(w * (l - x).powi(2)) / 2.0
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON || (a - b).abs() / b.abs().max(1.0) < 1e-9
    }

    // End load tests
    #[test]
    fn test_end_load_free_end() {
        // 1000 N, 2 m, EI = 5000 N·m²
        let d = end_load_deflection(1000.0, 2.0, 5000.0, 2.0);
        assert!(approx_eq(d, -0.533_333_333_333), "δ(L) = {}", d);
        assert!(approx_eq(end_load_max_deflection(1000.0, 2.0, 5000.0), 0.533_333_333_333));
        assert!(approx_eq(end_load_slope(1000.0, 2.0, 5000.0, 2.0), -0.4));
        assert!(approx_eq(end_load_max_slope(1000.0, 2.0, 5000.0), 0.4));
    }

    #[test]
    fn test_end_load_support() {
        assert_eq!(end_load_deflection(1000.0, 2.0, 5000.0, 0.0), 0.0);
        assert_eq!(end_load_slope(1000.0, 2.0, 5000.0, 0.0), 0.0);
        assert!(approx_eq(end_load_moment(1000.0, 2.0, 0.0), -2000.0));
        assert!(approx_eq(end_load_max_moment(1000.0, 2.0), -2000.0));
        assert_eq!(end_load_moment(1000.0, 2.0, 2.0), 0.0);
        assert_eq!(end_load_shear(1000.0), 1000.0);
    }

    // Intermediate load tests
    #[test]
    fn test_intermediate_load_branches() {
        let (f, a, ei) = (500.0, 3.0, 1.0e6);
        assert_eq!(intermediate_load_shear(f, a, 2.9), f);
        assert_eq!(intermediate_load_shear(f, a, 3.0), f);
        assert_eq!(intermediate_load_shear(f, a, 3.1), 0.0);
        assert_eq!(intermediate_load_moment(f, a, 4.0), 0.0);
        assert!(approx_eq(intermediate_load_moment(f, a, 1.0), -1000.0));

        // Slope is constant beyond the load
        let s1 = intermediate_load_slope(f, a, ei, 4.0);
        let s2 = intermediate_load_slope(f, a, ei, 5.0);
        assert_eq!(s1, s2);
        assert!(approx_eq(s1, intermediate_load_slope(f, a, ei, a)));
    }

    #[test]
    fn test_intermediate_load_continuity_at_load() {
        let (f, a, ei) = (500.0, 3.0, 1.0e6);
        let left = intermediate_load_deflection(f, a, ei, a);
        let right = -((f * a * a) / (6.0 * ei)) * (3.0 * a - a);
        assert!(approx_eq(left, right));
    }

    #[test]
    fn test_intermediate_load_matches_end_load_at_tip() {
        let (f, l, ei) = (1200.0, 7.0, 2.0e6);
        for i in 0..=10 {
            let x = l * i as f64 / 10.0;
            assert!(approx_eq(
                intermediate_load_deflection(f, l, ei, x),
                end_load_deflection(f, l, ei, x)
            ));
            assert!(approx_eq(
                intermediate_load_slope(f, l, ei, x),
                end_load_slope(f, l, ei, x)
            ));
            assert!(approx_eq(
                intermediate_load_moment(f, l, x),
                end_load_moment(f, l, x)
            ));
        }
        assert!(approx_eq(
            intermediate_load_max_deflection(f, l, l, ei),
            end_load_max_deflection(f, l, ei)
        ));
    }

    // Uniform load tests
    #[test]
    fn test_uniform_load_ends() {
        let (w, l, ei) = (100.0, 4.0, 1.0e5);
        assert_eq!(uniform_load_shear(w, l, l), 0.0);
        assert_eq!(uniform_load_moment(w, l, l), 0.0);
        assert!(approx_eq(uniform_load_shear(w, l, 0.0), 400.0));
        assert!(approx_eq(uniform_load_moment(w, l, 0.0), -800.0));

        // δ(L) = -wL⁴/(8EI), θ(L) = -wL³/(6EI)
        assert!(approx_eq(uniform_load_deflection(w, l, ei, l), -w * l.powi(4) / (8.0 * ei)));
        assert!(approx_eq(uniform_load_slope(w, l, ei, l), -w * l.powi(3) / (6.0 * ei)));
    }

    #[test]
    fn test_uniform_load_slope_is_derivative_of_deflection() {
        let (w, l, ei) = (250.0, 3.0, 4.0e4);
        let h = 1e-6;
        for &x in &[0.5, 1.5, 2.5] {
            let numeric = (uniform_load_deflection(w, l, ei, x + h)
                - uniform_load_deflection(w, l, ei, x - h))
                / (2.0 * h);
            let exact = uniform_load_slope(w, l, ei, x);
            assert!((numeric - exact).abs() < 1e-6, "x = {}: {} vs {}", x, numeric, exact);
        }
    }
}
