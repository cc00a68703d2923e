//! Simulation record model.
//!
//! # Responsibility
//! - Define the persisted shape of one decay simulation.
//! - Derive `nt` and element snapshot fields in one place.
//!
//! # Invariants
//! - `nt` always equals `decay::compute(n0, t, half_life_snapshot).nt`.
//! - Snapshot fields are copied from the element at computation time and
//!   are only refreshed by an explicit edit.
//! - `owner_id` never changes after creation.

use crate::decay::{self, DecayError};
use crate::model::element::{ElementId, ElementReference};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Row id of a simulation record.
pub type SimulationId = i64;

/// Resolved identity of the requesting user.
pub type OwnerId = i64;

const NT_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Typed simulation input as submitted by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub element_id: ElementId,
    pub n0: f64,
    pub t: f64,
}

/// Persisted simulation with derived and snapshot fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub id: SimulationId,
    pub owner_id: OwnerId,
    pub element_id: ElementId,
    pub element_name_snapshot: String,
    pub n0: f64,
    pub t: f64,
    /// Remaining quantity; derived, never set independently.
    pub nt: f64,
    pub half_life_snapshot: f64,
    pub unit_snapshot: String,
    pub quantity_unit_snapshot: String,
    /// Unix epoch milliseconds of creation or last edit.
    pub timestamp: i64,
}

/// A fully derived simulation that has not been assigned an id yet.
///
/// Built by [`SimulationDraft::compute`] for both inserts and edits, so the
/// derivation rules exist exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationDraft {
    pub owner_id: OwnerId,
    pub element_id: ElementId,
    pub element_name: String,
    pub n0: f64,
    pub t: f64,
    pub nt: f64,
    pub half_life: f64,
    pub unit: String,
    pub quantity_unit: String,
    pub timestamp: i64,
}

impl SimulationDraft {
    /// Runs the decay model and snapshots the element.
    ///
    /// # Errors
    /// - Propagates `DecayError` for invalid `n0`, `t` or element half-life.
    pub fn compute(
        owner_id: OwnerId,
        element: &ElementReference,
        n0: f64,
        t: f64,
        timestamp: i64,
    ) -> Result<Self, DecayError> {
        let decay = decay::compute(n0, t, element.half_life)?;
        Ok(Self {
            owner_id,
            element_id: element.id,
            element_name: element.name.clone(),
            n0,
            t,
            nt: decay.nt,
            half_life: element.half_life,
            unit: element.time_unit.clone(),
            quantity_unit: element.quantity_unit.clone(),
            timestamp,
        })
    }

    pub fn into_record(self, id: SimulationId) -> SimulationRecord {
        SimulationRecord {
            id,
            owner_id: self.owner_id,
            element_id: self.element_id,
            element_name_snapshot: self.element_name,
            n0: self.n0,
            t: self.t,
            nt: self.nt,
            half_life_snapshot: self.half_life,
            unit_snapshot: self.unit,
            quantity_unit_snapshot: self.quantity_unit,
            timestamp: self.timestamp,
        }
    }
}

/// Invariant violations detected on a persisted record.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationValidationError {
    Decay(DecayError),
    InconsistentRemaining { stored: f64, expected: f64 },
}

impl Display for SimulationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decay(err) => write!(f, "{err}"),
            Self::InconsistentRemaining { stored, expected } => write!(
                f,
                "stored nt {stored} does not match recomputed value {expected}"
            ),
        }
    }
}

impl Error for SimulationValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decay(err) => Some(err),
            Self::InconsistentRemaining { .. } => None,
        }
    }
}

impl SimulationRecord {
    /// Decay constant for the snapshotted half-life.
    pub fn lambda(&self) -> Result<f64, DecayError> {
        decay::decay_constant(self.half_life_snapshot)
    }

    /// Checks that inputs are valid and `nt` matches its derivation.
    pub fn validate(&self) -> Result<(), SimulationValidationError> {
        let decay = decay::compute(self.n0, self.t, self.half_life_snapshot)
            .map_err(SimulationValidationError::Decay)?;
        let tolerance = NT_RELATIVE_TOLERANCE * self.n0.max(1.0);
        if (decay.nt - self.nt).abs() > tolerance {
            return Err(SimulationValidationError::InconsistentRemaining {
                stored: self.nt,
                expected: decay.nt,
            });
        }
        Ok(())
    }

    /// Input that reproduces this record when submitted again.
    pub fn input(&self) -> SimulationInput {
        SimulationInput {
            element_id: self.element_id,
            n0: self.n0,
            t: self.t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SimulationDraft, SimulationValidationError};
    use crate::model::element::ElementReference;

    fn iodine() -> ElementReference {
        ElementReference {
            id: 7,
            name: "Iodine-131".to_string(),
            half_life: 8.02,
            time_unit: "days".to_string(),
            quantity_unit: "grams".to_string(),
        }
    }

    #[test]
    fn draft_snapshots_element_fields() {
        let draft = SimulationDraft::compute(3, &iodine(), 10.0, 8.02, 1_000).unwrap();
        assert_eq!(draft.element_id, 7);
        assert_eq!(draft.element_name, "Iodine-131");
        assert_eq!(draft.unit, "days");
        assert!((draft.nt - 5.0).abs() < 1e-9);

        let record = draft.into_record(11);
        assert_eq!(record.id, 11);
        assert_eq!(record.owner_id, 3);
        assert_eq!(record.half_life_snapshot, 8.02);
        record.validate().unwrap();
    }

    #[test]
    fn validate_rejects_tampered_remaining_quantity() {
        let mut record = SimulationDraft::compute(3, &iodine(), 10.0, 8.02, 1_000)
            .unwrap()
            .into_record(1);
        record.nt = 9.0;
        assert!(matches!(
            record.validate(),
            Err(SimulationValidationError::InconsistentRemaining { .. })
        ));
    }
}
