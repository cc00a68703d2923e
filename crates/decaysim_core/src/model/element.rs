//! Element reference model.
//!
//! # Invariants
//! - `half_life > 0` and finite.
//! - `half_life` is expressed in `time_unit`, the same unit as a simulation's `t`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Row id of an element reference record.
pub type ElementId = i64;

/// Read-only element metadata consumed by simulations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementReference {
    pub id: ElementId,
    pub name: String,
    pub half_life: f64,
    pub time_unit: String,
    pub quantity_unit: String,
}

/// Element data prior to insertion (no id yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewElement {
    pub name: String,
    pub half_life: f64,
    pub time_unit: String,
    pub quantity_unit: String,
}

/// Time and quantity units of one element, as shown next to input fields.
///
/// Both strings are empty when the element is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementUnits {
    pub unit: String,
    pub quantity_unit: String,
}

/// Domain validation errors for element data.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValidationError {
    EmptyName,
    NonPositiveHalfLife(f64),
}

impl Display for ElementValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "element name cannot be empty"),
            Self::NonPositiveHalfLife(value) => {
                write!(f, "element half-life must be finite and > 0, got {value}")
            }
        }
    }
}

impl Error for ElementValidationError {}

impl ElementReference {
    pub fn validate(&self) -> Result<(), ElementValidationError> {
        validate_fields(&self.name, self.half_life)
    }

    pub fn units(&self) -> ElementUnits {
        ElementUnits {
            unit: self.time_unit.clone(),
            quantity_unit: self.quantity_unit.clone(),
        }
    }
}

impl NewElement {
    pub fn new(
        name: impl Into<String>,
        half_life: f64,
        time_unit: impl Into<String>,
        quantity_unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            half_life,
            time_unit: time_unit.into(),
            quantity_unit: quantity_unit.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ElementValidationError> {
        validate_fields(&self.name, self.half_life)
    }
}

fn validate_fields(name: &str, half_life: f64) -> Result<(), ElementValidationError> {
    if name.trim().is_empty() {
        return Err(ElementValidationError::EmptyName);
    }
    if !half_life.is_finite() || half_life <= 0.0 {
        return Err(ElementValidationError::NonPositiveHalfLife(half_life));
    }
    Ok(())
}
