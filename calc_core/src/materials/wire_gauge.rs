//! Wire Gauge Resistance Table
//!
//! DC resistance of copper conductors by AWG size, used by the voltage drop
//! calculation. Values are ohms per 1000 ft of solid, uncoated copper at 20 °C.
//!
//! A custom table can be read from CSV with a `gauge,ohms_per_1000ft` header:
//!
//! ```text
//! gauge,ohms_per_1000ft
//! 12,1.62
//! 14,2.58
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::materials::wire_gauge::WireTable;
//!
//! let table = WireTable::awg_copper();
//! let awg12 = table.lookup("12").unwrap();
//! assert!((awg12.ohms_per_1000ft - 1.588).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::errors::{CalcError, CalcResult};
use crate::units::{Dimension, Quantity};

/// Built-in AWG copper table: (gauge, Ω per 1000 ft at 20 °C)
const AWG_COPPER: [(&str, f64); 29] = [
    ("4/0", 0.04901),
    ("3/0", 0.06180),
    ("2/0", 0.07793),
    ("1/0", 0.09827),
    ("1", 0.1239),
    ("2", 0.1563),
    ("3", 0.1970),
    ("4", 0.2485),
    ("5", 0.3133),
    ("6", 0.3951),
    ("7", 0.4982),
    ("8", 0.6282),
    ("9", 0.7921),
    ("10", 0.9989),
    ("11", 1.260),
    ("12", 1.588),
    ("13", 2.003),
    ("14", 2.525),
    ("15", 3.184),
    ("16", 4.016),
    ("17", 5.064),
    ("18", 6.385),
    ("19", 8.051),
    ("20", 10.15),
    ("22", 16.14),
    ("24", 25.67),
    ("26", 40.81),
    ("28", 64.90),
    ("30", 103.2),
];

/// One row of a wire table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireGauge {
    /// Gauge label as listed (e.g., "12", "4/0")
    pub gauge: String,
    /// Resistance per 1000 ft of conductor
    pub ohms_per_1000ft: f64,
}

impl WireGauge {
    /// Resistance per length as a quantity (Ω/m in SI)
    pub fn resistance_per_length(&self) -> Quantity {
        Quantity::from_unit(self.ohms_per_1000ft, "ohm/kft")
            .unwrap_or(Quantity::new(self.ohms_per_1000ft / 304.8, Dimension::RESISTANCE_PER_LENGTH))
    }
}

/// Normalize a gauge label: "AWG 12", "#12", "12 awg" → "12"; "0000" → "4/0".
pub fn normalize_gauge(label: &str) -> String {
    let lower = label.trim().to_ascii_lowercase();
    let stripped = lower
        .trim_start_matches("awg")
        .trim_end_matches("awg")
        .trim()
        .trim_start_matches('#')
        .trim();

    match stripped {
        "0000" => "4/0".to_string(),
        "000" => "3/0".to_string(),
        "00" => "2/0".to_string(),
        "0" => "1/0".to_string(),
        other => other.to_string(),
    }
}

/// Wire resistance table indexed by normalized gauge.
#[derive(Debug, Clone, Default)]
pub struct WireTable {
    gauges: HashMap<String, WireGauge>,
    /// Labels in source order
    order: Vec<String>,
}

impl WireTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in AWG copper table
    pub fn awg_copper() -> Self {
        let mut table = WireTable::new();
        for (gauge, ohms) in AWG_COPPER {
            table.insert(WireGauge {
                gauge: gauge.to_string(),
                ohms_per_1000ft: ohms,
            });
        }
        table
    }

    /// Add or replace a row
    pub fn insert(&mut self, row: WireGauge) {
        let key = normalize_gauge(&row.gauge);
        if !self.gauges.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.gauges.insert(key, row);
    }

    /// Read a table from CSV text with a `gauge,ohms_per_1000ft` header.
    pub fn from_reader<R: Read>(reader: R) -> CalcResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = WireTable::new();
        for (i, result) in rdr.deserialize::<WireGauge>().enumerate() {
            let row = result.map_err(|e| {
                CalcError::serialization(format!("Wire table row {}: {}", i + 1, e))
            })?;
            if !(row.ohms_per_1000ft.is_finite() && row.ohms_per_1000ft >= 0.0) {
                return Err(CalcError::invalid_input(
                    "ohms_per_1000ft",
                    row.ohms_per_1000ft.to_string(),
                    format!("Resistance for gauge '{}' must be non-negative", row.gauge),
                ));
            }
            table.insert(row);
        }
        Ok(table)
    }

    /// Read a table from a CSV file
    pub fn load_from_csv(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            CalcError::file_error("open", path.display().to_string(), format!("Failed to open CSV: {}", e))
        })?;
        let table = Self::from_reader(file)?;
        tracing::debug!(path = %path.display(), rows = table.len(), "loaded wire table");
        Ok(table)
    }

    /// Look up a gauge by label
    pub fn lookup(&self, gauge: &str) -> CalcResult<&WireGauge> {
        self.gauges
            .get(&normalize_gauge(gauge))
            .ok_or_else(|| CalcError::wire_gauge_not_found(gauge))
    }

    /// Rows in source order
    pub fn iter(&self) -> impl Iterator<Item = &WireGauge> {
        self.order.iter().filter_map(|key| self.gauges.get(key))
    }

    pub fn len(&self) -> usize {
        self.gauges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let table = WireTable::awg_copper();
        assert_eq!(table.len(), 29);
        assert_eq!(table.lookup("14").unwrap().ohms_per_1000ft, 2.525);
        assert_eq!(table.lookup("AWG 10").unwrap().ohms_per_1000ft, 0.9989);
        assert_eq!(table.lookup("#12").unwrap().gauge, "12");
        assert_eq!(table.lookup("0000").unwrap().gauge, "4/0");
    }

    #[test]
    fn test_unknown_gauge() {
        let err = WireTable::awg_copper().lookup("21").unwrap_err();
        assert_eq!(err.error_code(), "WIRE_GAUGE_NOT_FOUND");
    }

    #[test]
    fn test_resistance_per_length_in_si() {
        let table = WireTable::awg_copper();
        let r = table.lookup("12").unwrap().resistance_per_length();
        assert_eq!(r.dimension(), Dimension::RESISTANCE_PER_LENGTH);
        assert!((r.value() - 1.588 / 304.8).abs() < 1e-12);
    }

    #[test]
    fn test_csv_table() {
        let csv = "gauge, ohms_per_1000ft\n12, 1.62\n14,2.58\n";
        let table = WireTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("12").unwrap().ohms_per_1000ft, 1.62);
        let order: Vec<&str> = table.iter().map(|g| g.gauge.as_str()).collect();
        assert_eq!(order, vec!["12", "14"]);
    }

    #[test]
    fn test_csv_bad_rows() {
        assert!(WireTable::from_reader("gauge,ohms_per_1000ft\n12,abc\n".as_bytes()).is_err());
        let err = WireTable::from_reader("gauge,ohms_per_1000ft\n12,-1\n".as_bytes()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_missing_file() {
        let err = WireTable::load_from_csv("/nonexistent/wire_table.csv").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
