//! # File I/O Module
//!
//! Handles calculation set files and curve exports:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//! - **Curve export**: Sampled responses as CSV, one row per grid position
//!
//! ## File Format
//!
//! Calculation sets are saved as `.bcalc` files containing JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::{load_calculation_set, save_calculation_set};
//! use calc_core::project::CalculationSet;
//! use std::path::Path;
//!
//! let set = CalculationSet::new("Canopy", "Engineer");
//! let path = Path::new("canopy.bcalc");
//!
//! save_calculation_set(&set, path)?;
//! let loaded = load_calculation_set(path)?;
//! assert_eq!(loaded.meta.title, "Canopy");
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::project::{CalculationSet, SCHEMA_VERSION};
use crate::sampling::{Response, ResultCurve};

/// Save a calculation set with an atomic write.
///
/// The JSON is written to `<path>.tmp`, synced, then renamed over `path`, so
/// an interrupted save never leaves a truncated file behind.
pub fn save_calculation_set(set: &CalculationSet, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(set).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = path.with_extension("bcalc.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), items = set.item_count(), "saved calculation set");
    Ok(())
}

/// Load a calculation set from a file.
///
/// Relative paths in the set's settings resolve against the file's directory.
///
/// # Returns
///
/// * `Ok(CalculationSet)` - Successfully loaded
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_calculation_set(path: &Path) -> CalcResult<CalculationSet> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let mut set: CalculationSet = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&set.meta.version)?;
    set.set_base_dir(path.parent().map(Path::to_path_buf));

    debug!(path = %path.display(), items = set.item_count(), "loaded calculation set");
    Ok(set)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor version may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

/// Write sampled curves as CSV: `x_m` followed by one column per response.
///
/// All curves must share the same grid.
pub fn write_curves_csv<W: Write>(curves: &[ResultCurve], writer: W) -> CalcResult<()> {
    let rows = curves.first().map(ResultCurve::len).unwrap_or(0);
    if let Some(curve) = curves.iter().find(|c| c.len() != rows) {
        return Err(CalcError::invalid_input(
            "curves",
            curve.response.display_name(),
            "All curves must be sampled on the same grid",
        ));
    }

    let mut wtr = csv::Writer::from_writer(writer);
    let csv_err = |e: csv::Error| CalcError::serialization(format!("CSV export failed: {}", e));

    let mut header = vec!["x_m".to_string()];
    header.extend(curves.iter().map(|c| column_name(c.response).to_string()));
    wtr.write_record(&header).map_err(csv_err)?;

    for i in 0..rows {
        let x = curves[0].points[i].0;
        let mut record = vec![x.to_string()];
        record.extend(curves.iter().map(|c| c.points[i].1.to_string()));
        wtr.write_record(&record).map_err(csv_err)?;
    }

    wtr.flush()
        .map_err(|e| CalcError::serialization(format!("CSV export failed: {}", e)))?;
    Ok(())
}

/// Write sampled curves to a CSV file.
pub fn export_curves_csv(curves: &[ResultCurve], path: &Path) -> CalcResult<()> {
    let file = File::create(path).map_err(|e| {
        CalcError::file_error("create", path.display().to_string(), e.to_string())
    })?;
    write_curves_csv(curves, file)?;
    debug!(path = %path.display(), curves = curves.len(), "exported curves");
    Ok(())
}

fn column_name(response: Response) -> &'static str {
    match response {
        Response::Deflection => "deflection_m",
        Response::Slope => "slope_rad",
        Response::Shear => "shear_n",
        Response::Moment => "moment_n_m",
    }
}
