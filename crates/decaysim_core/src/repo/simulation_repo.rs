//! Simulation repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist derived simulation drafts and read them back as records.
//! - Scope every lookup and mutation by owner.
//!
//! # Invariants
//! - `get`/`update` filter by `(id, user_id)`; a foreign record is
//!   indistinguishable from a missing one.
//! - `user_id` is written on insert only.
//! - Lists are sorted by `timestamp DESC, id ASC`.

use crate::model::simulation::{OwnerId, SimulationDraft, SimulationId, SimulationRecord};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const SIMULATION_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    element_id,
    name,
    n0,
    t,
    nt,
    half_life,
    unit,
    quantity_unit,
    timestamp
FROM simulations";

/// Repository interface for owner-scoped simulation persistence.
pub trait SimulationRepository {
    fn insert_simulation(&self, draft: &SimulationDraft) -> RepoResult<SimulationId>;
    fn get_simulation(
        &self,
        id: SimulationId,
        owner_id: OwnerId,
    ) -> RepoResult<Option<SimulationRecord>>;
    /// Overwrites every mutable column of `(id, draft.owner_id)`.
    fn update_simulation(&self, id: SimulationId, draft: &SimulationDraft) -> RepoResult<()>;
    fn list_simulations(&self, owner_id: OwnerId) -> RepoResult<Vec<SimulationRecord>>;
}

/// SQLite-backed simulation repository.
pub struct SqliteSimulationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSimulationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SimulationRepository for SqliteSimulationRepository<'_> {
    fn insert_simulation(&self, draft: &SimulationDraft) -> RepoResult<SimulationId> {
        self.conn.execute(
            "INSERT INTO simulations (
                user_id,
                element_id,
                name,
                n0,
                t,
                nt,
                half_life,
                unit,
                quantity_unit,
                timestamp
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                draft.owner_id,
                draft.element_id,
                draft.element_name.as_str(),
                draft.n0,
                draft.t,
                draft.nt,
                draft.half_life,
                draft.unit.as_str(),
                draft.quantity_unit.as_str(),
                draft.timestamp,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_simulation(
        &self,
        id: SimulationId,
        owner_id: OwnerId,
    ) -> RepoResult<Option<SimulationRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SIMULATION_SELECT_SQL}
             WHERE id = ?1
               AND user_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![id, owner_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_simulation_row(row)?));
        }

        Ok(None)
    }

    fn update_simulation(&self, id: SimulationId, draft: &SimulationDraft) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE simulations
             SET
                element_id = ?1,
                name = ?2,
                n0 = ?3,
                t = ?4,
                nt = ?5,
                half_life = ?6,
                unit = ?7,
                quantity_unit = ?8,
                timestamp = ?9
             WHERE id = ?10
               AND user_id = ?11;",
            params![
                draft.element_id,
                draft.element_name.as_str(),
                draft.n0,
                draft.t,
                draft.nt,
                draft.half_life,
                draft.unit.as_str(),
                draft.quantity_unit.as_str(),
                draft.timestamp,
                id,
                draft.owner_id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "simulation",
                id,
            });
        }

        Ok(())
    }

    fn list_simulations(&self, owner_id: OwnerId) -> RepoResult<Vec<SimulationRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SIMULATION_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY timestamp DESC, id ASC;"
        ))?;

        let mut rows = stmt.query([owner_id])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_simulation_row(row)?);
        }

        Ok(records)
    }
}

fn parse_simulation_row(row: &Row<'_>) -> RepoResult<SimulationRecord> {
    let record = SimulationRecord {
        id: row.get("id")?,
        owner_id: row.get("user_id")?,
        element_id: row.get("element_id")?,
        element_name_snapshot: row.get("name")?,
        n0: row.get("n0")?,
        t: row.get("t")?,
        nt: row.get("nt")?,
        half_life_snapshot: row.get("half_life")?,
        unit_snapshot: row.get("unit")?,
        quantity_unit_snapshot: row.get("quantity_unit")?,
        timestamp: row.get("timestamp")?,
    };

    record.validate().map_err(|err| {
        RepoError::InvalidData(format!("simulation {} in simulations: {err}", record.id))
    })?;
    Ok(record)
}
