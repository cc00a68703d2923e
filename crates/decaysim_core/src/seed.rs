//! Element reference data and the units reference table.
//!
//! # Responsibility
//! - Provide the default element catalogue with half-lives.
//! - Apply `element name -> (time unit, quantity unit)` assignments.
//!
//! # Invariants
//! - Half-lives are expressed in the element's time unit.
//! - Seeding is idempotent: existing elements are left untouched.

use crate::model::element::NewElement;
use crate::repo::element_repo::{ElementRepository, SqliteElementRepository};
use crate::repo::RepoResult;
use log::info;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `(name, half-life, time unit)` of the default elements.
pub const DEFAULT_ELEMENTS: &[(&str, f64, &str)] = &[
    ("Carbon-14", 5730.0, "years"),
    ("Uranium-238", 4.468e9, "years"),
    ("Uranium-235", 7.04e8, "years"),
    ("Thorium-232", 1.405e10, "years"),
    ("Radium-226", 1600.0, "years"),
    ("Polonium-210", 138.376, "days"),
    ("Iodine-131", 8.02, "days"),
    ("Cesium-137", 30.17, "years"),
    ("Strontium-90", 28.8, "years"),
    ("Tritium", 12.32, "years"),
    ("Radon-222", 3.8235, "days"),
];

/// Units reference table: `(element name, time unit, quantity unit)`.
pub const DEFAULT_UNITS: &[(&str, &str, &str)] = &[
    ("Carbon-14", "years", "grams"),
    ("Uranium-238", "years", "grams"),
    ("Uranium-235", "years", "grams"),
    ("Thorium-232", "years", "grams"),
    ("Radium-226", "years", "grams"),
    ("Polonium-210", "days", "grams"),
    ("Iodine-131", "days", "grams"),
    ("Cesium-137", "years", "grams"),
    ("Strontium-90", "years", "grams"),
    ("Tritium", "years", "grams"),
    ("Radon-222", "days", "grams"),
];

const DEFAULT_QUANTITY_UNIT: &str = "grams";

/// One row of the units reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitAssignment {
    pub element: String,
    pub unit: String,
    pub quantity_unit: String,
}

/// Default units reference table.
pub fn default_units() -> Vec<UnitAssignment> {
    DEFAULT_UNITS
        .iter()
        .map(|(element, unit, quantity_unit)| UnitAssignment {
            element: (*element).to_string(),
            unit: (*unit).to_string(),
            quantity_unit: (*quantity_unit).to_string(),
        })
        .collect()
}

/// Parses a units table of the form `{"Carbon-14": ["years", "grams"]}`.
pub fn units_from_json(json: &str) -> Result<Vec<UnitAssignment>, serde_json::Error> {
    let table: BTreeMap<String, (String, String)> = serde_json::from_str(json)?;
    Ok(table
        .into_iter()
        .map(|(element, (unit, quantity_unit))| UnitAssignment {
            element,
            unit,
            quantity_unit,
        })
        .collect())
}

/// Inserts every default element that is not present yet.
///
/// Returns the number of inserted elements.
pub fn seed_elements(conn: &Connection) -> RepoResult<usize> {
    let repo = SqliteElementRepository::new(conn);
    let mut inserted = 0;

    for (name, half_life, unit) in DEFAULT_ELEMENTS {
        if repo.find_element_by_name(name)?.is_some() {
            continue;
        }
        repo.insert_element(&NewElement::new(
            *name,
            *half_life,
            *unit,
            DEFAULT_QUANTITY_UNIT,
        ))?;
        inserted += 1;
    }

    info!(
        "event=seed_elements module=seed status=ok inserted={}",
        inserted
    );
    Ok(inserted)
}

/// Applies unit assignments by element name; unknown names are skipped.
///
/// Returns the number of element rows updated.
pub fn apply_units(conn: &Connection, units: &[UnitAssignment]) -> RepoResult<usize> {
    let repo = SqliteElementRepository::new(conn);
    let mut updated = 0;

    for assignment in units {
        updated += repo.apply_units(
            &assignment.element,
            &assignment.unit,
            &assignment.quantity_unit,
        )?;
    }

    info!(
        "event=apply_units module=seed status=ok assignments={} updated={}",
        units.len(),
        updated
    );
    Ok(updated)
}
