//! # Calculation Set
//!
//! `CalculationSet` is the root container for saved calculations. Sets
//! serialize to `.bcalc` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! CalculationSet
//! ├── meta: SetMetadata (version, title, engineer, timestamps, expiration)
//! ├── settings: Settings (grid resolution, display units, wire table)
//! └── items: HashMap<Uuid, CalculationItem> (all calculations)
//! ```
//!
//! A set may carry an expiration date. Once it has passed, every evaluation
//! through [`CalculationSet::run_all`] is refused with [`CalcError::Expired`].
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{CalculationItem, CantileverInput, LoadCase};
//! use calc_core::project::CalculationSet;
//! use chrono::NaiveDate;
//!
//! let mut set = CalculationSet::new("Sign Structure", "Jane Engineer");
//! set.add_item(CalculationItem::Cantilever(CantileverInput::example(LoadCase::EndLoad)));
//!
//! let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
//! let runs = set.run_all(today).unwrap();
//! assert_eq!(runs.len(), 1);
//! assert!(runs[0].outcome.is_ok());
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculations::{CalculationItem, CalculationOutput};
use crate::errors::{CalcError, CalcResult};
use crate::materials::wire_gauge::WireTable;
use crate::sampling::DEFAULT_SAMPLE_POINTS;

/// Current schema version for .bcalc files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root calculation container.
///
/// Items are stored in a flat UUID-keyed map for O(1) lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationSet {
    pub meta: SetMetadata,

    #[serde(default)]
    pub settings: Settings,

    /// All calculation items, keyed by UUID
    #[serde(default)]
    pub items: HashMap<Uuid, CalculationItem>,

    /// Directory of the file the set was loaded from; relative paths in the
    /// settings resolve against it
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl CalculationSet {
    /// Create a new empty set.
    ///
    /// ```rust
    /// use calc_core::project::CalculationSet;
    ///
    /// let set = CalculationSet::new("Canopy", "John Doe");
    /// assert_eq!(set.meta.engineer, "John Doe");
    /// assert!(set.meta.expires_on.is_none());
    /// ```
    pub fn new(title: impl Into<String>, engineer: impl Into<String>) -> Self {
        let now = Utc::now();
        CalculationSet {
            meta: SetMetadata {
                version: SCHEMA_VERSION.to_string(),
                title: title.into(),
                engineer: engineer.into(),
                created: now,
                modified: now,
                expires_on: None,
            },
            settings: Settings::default(),
            items: HashMap::new(),
            base_dir: None,
        }
    }

    /// Add a calculation item, returning its UUID.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Set or clear the expiration date.
    pub fn set_expiration(&mut self, expires_on: Option<NaiveDate>) {
        self.meta.expires_on = expires_on;
        self.touch();
    }

    /// Fail with [`CalcError::Expired`] once `today` is past the expiration date.
    ///
    /// The expiration day itself is still valid.
    pub fn check_expiration(&self, today: NaiveDate) -> CalcResult<()> {
        match self.meta.expires_on {
            Some(expires_on) if today > expires_on => {
                warn!(%expires_on, %today, title = %self.meta.title, "calculation set has expired");
                Err(CalcError::Expired {
                    expired_on: expires_on.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Set the directory that relative settings paths resolve against.
    pub fn set_base_dir(&mut self, dir: Option<PathBuf>) {
        self.base_dir = dir;
    }

    /// Wire table path from the settings, joined onto the base directory when relative.
    pub fn wire_table_path(&self) -> Option<PathBuf> {
        let path = Path::new(self.settings.wire_table.as_deref()?);
        match &self.base_dir {
            Some(dir) if path.is_relative() => Some(dir.join(path)),
            _ => Some(path.to_path_buf()),
        }
    }

    /// Wire table named in the settings, or the built-in AWG copper table.
    pub fn wire_table(&self) -> CalcResult<WireTable> {
        match self.wire_table_path() {
            Some(path) => WireTable::load_from_csv(path),
            None => Ok(WireTable::awg_copper()),
        }
    }

    /// Evaluate every item after the expiration check.
    pub fn run_all(&self, today: NaiveDate) -> CalcResult<Vec<ItemRun>> {
        self.check_expiration(today)?;
        let wires = self.wire_table()?;
        Ok(self.evaluate_items(&wires))
    }

    /// Evaluate every item against an explicit wire table.
    pub fn run_all_with(&self, today: NaiveDate, wires: &WireTable) -> CalcResult<Vec<ItemRun>> {
        self.check_expiration(today)?;
        Ok(self.evaluate_items(wires))
    }

    /// Results are ordered by label. A failing item does not stop the others.
    fn evaluate_items(&self, wires: &WireTable) -> Vec<ItemRun> {
        let mut runs: Vec<ItemRun> = self
            .items
            .iter()
            .map(|(id, item)| ItemRun {
                id: *id,
                label: item.label().to_string(),
                calc_type: item.calc_type(),
                outcome: item.evaluate(self.settings.sample_points, wires),
            })
            .collect();
        runs.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));

        let failed = runs.iter().filter(|r| r.outcome.is_err()).count();
        info!(items = runs.len(), failed, "evaluated calculation set");
        runs
    }
}

impl Default for CalculationSet {
    fn default() -> Self {
        CalculationSet::new("", "")
    }
}

/// Outcome of evaluating one item
#[derive(Debug, Clone, Serialize)]
pub struct ItemRun {
    pub id: Uuid,
    pub label: String,
    pub calc_type: &'static str,
    pub outcome: Result<CalculationOutput, CalcError>,
}

/// Metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub title: String,

    /// Name of the responsible engineer
    pub engineer: String,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,

    /// Last day on which the set may be evaluated
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
}

/// Settings shared by every item in the set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid points used for sampled maxima and curves
    pub sample_points: usize,

    /// Display small units (in/mm, lbf/N) instead of large ones (ft/m, kip/kN)
    pub minor_units: bool,

    /// CSV wire table; the built-in AWG copper table when absent
    pub wire_table: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sample_points: DEFAULT_SAMPLE_POINTS,
            minor_units: false,
            wire_table: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{CantileverInput, LoadCase, VoltageDropInput};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_set_creation() {
        let set = CalculationSet::new("Canopy", "John Doe");
        assert_eq!(set.meta.title, "Canopy");
        assert_eq!(set.meta.version, SCHEMA_VERSION);
        assert_eq!(set.settings.sample_points, 100);
        assert!(!set.settings.minor_units);
    }

    #[test]
    fn test_set_serialization() {
        let mut set = CalculationSet::new("Canopy", "Jane Engineer");
        set.set_expiration(Some(date(2027, 6, 30)));
        let json = serde_json::to_string_pretty(&set).unwrap();
        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("2027-06-30"));

        let roundtrip: CalculationSet = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.expires_on, Some(date(2027, 6, 30)));
    }

    #[test]
    fn test_settings_defaults_when_missing() {
        let json = r#"{
            "meta": {
                "version": "0.1.0",
                "title": "Old",
                "engineer": "E",
                "created": "2025-01-01T00:00:00Z",
                "modified": "2025-01-01T00:00:00Z"
            }
        }"#;
        let set: CalculationSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.settings, Settings::default());
        assert!(set.items.is_empty());
        assert!(set.meta.expires_on.is_none());
    }

    #[test]
    fn test_add_remove_item() {
        let mut set = CalculationSet::new("Canopy", "Engineer");
        let id = set.add_item(CalculationItem::VoltageDrop(VoltageDropInput::default()));
        assert_eq!(set.item_count(), 1);
        assert_eq!(set.get_item(&id).map(|i| i.calc_type()), Some("VoltageDrop"));

        assert!(set.remove_item(&id).is_some());
        assert_eq!(set.item_count(), 0);
    }

    #[test]
    fn test_expiration_gate() {
        let mut set = CalculationSet::new("Canopy", "Engineer");
        assert!(set.check_expiration(date(2099, 1, 1)).is_ok());

        set.set_expiration(Some(date(2026, 3, 1)));
        assert!(set.check_expiration(date(2026, 3, 1)).is_ok());

        let err = set.run_all(date(2026, 3, 2)).unwrap_err();
        assert_eq!(err.error_code(), "EXPIRED");
        let err = set.run_all_with(date(2026, 3, 2), &WireTable::awg_copper()).unwrap_err();
        assert_eq!(err.error_code(), "EXPIRED");
    }

    #[test]
    fn test_expired_before_wire_table_load() {
        let mut set = CalculationSet::new("Canopy", "Engineer");
        set.settings.wire_table = Some("/nonexistent/wires.csv".to_string());
        set.set_expiration(Some(date(2026, 3, 1)));

        let err = set.run_all(date(2026, 3, 2)).unwrap_err();
        assert_eq!(err.error_code(), "EXPIRED");
        let err = set.run_all(date(2026, 3, 1)).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_wire_table_path_resolution() {
        let mut set = CalculationSet::new("Canopy", "Engineer");
        assert_eq!(set.wire_table_path(), None);

        set.settings.wire_table = Some("wires.csv".to_string());
        assert_eq!(set.wire_table_path(), Some(PathBuf::from("wires.csv")));

        set.set_base_dir(Some(PathBuf::from("/projects/canopy")));
        assert_eq!(set.wire_table_path(), Some(PathBuf::from("/projects/canopy/wires.csv")));

        set.settings.wire_table = Some("/shared/wires.csv".to_string());
        assert_eq!(set.wire_table_path(), Some(PathBuf::from("/shared/wires.csv")));
    }

    #[test]
    fn test_run_all_keeps_going_after_failure() {
        let mut set = CalculationSet::new("Canopy", "Engineer");
        let mut bad = CantileverInput::example(LoadCase::IntermediateLoad);
        bad.label = "A-bad".to_string();
        bad.length = "10 ft".to_string();
        set.add_item(CalculationItem::Cantilever(bad));
        set.add_item(CalculationItem::Cantilever(CantileverInput::example(LoadCase::EndLoad)));
        set.add_item(CalculationItem::VoltageDrop(VoltageDropInput::default()));

        let runs = set.run_all(date(2026, 1, 1)).unwrap();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].label, "A-bad");
        assert!(runs[0].outcome.is_err());
        assert!(runs[1..].iter().all(|r| r.outcome.is_ok()));
    }
}
