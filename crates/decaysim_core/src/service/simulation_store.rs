//! Simulation record lifecycle.
//!
//! # Responsibility
//! - Create, read, edit and list simulation records for one owner.
//! - Run the decay model and snapshot element metadata on every write.
//! - Acquire one connection per call and release it on every exit path.
//!
//! # Invariants
//! - A record owned by someone else is reported as `NotFound`, exactly like
//!   a nonexistent id.
//! - Edits run in one transaction: all derived fields change together or
//!   nothing changes.
//! - Timestamps never move backwards.

use crate::db::{Database, DbError};
use crate::decay::DecayError;
use crate::model::element::{ElementId, ElementReference, ElementUnits};
use crate::model::simulation::{
    OwnerId, SimulationDraft, SimulationId, SimulationInput, SimulationRecord,
};
use crate::repo::element_repo::{element_units, ElementRepository, SqliteElementRepository};
use crate::repo::simulation_repo::{SimulationRepository, SqliteSimulationRepository};
use crate::repo::RepoError;
use crate::service::clock::{Clock, SystemClock};
use log::{info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome taxonomy of store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Inputs rejected by the decay model.
    Decay(DecayError),
    /// Referenced element id does not exist.
    ElementNotFound(ElementId),
    /// Simulation id does not exist or belongs to another owner.
    NotFound(SimulationId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decay(err) => write!(f, "{err}"),
            Self::ElementNotFound(id) => write!(f, "element not found: {id}"),
            Self::NotFound(id) => write!(f, "simulation not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decay(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::ElementNotFound(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<DecayError> for StoreError {
    fn from(value: DecayError) -> Self {
        Self::Decay(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: "simulation",
                id,
            } => Self::NotFound(id),
            RepoError::NotFound {
                entity: "element",
                id,
            } => Self::ElementNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::from(value))
    }
}

/// Owner-scoped store over simulation records.
pub struct SimulationStore<C: Clock = SystemClock> {
    db: Database,
    clock: C,
}

impl SimulationStore<SystemClock> {
    pub fn new(db: Database) -> Self {
        Self::with_clock(db, SystemClock)
    }
}

impl<C: Clock> SimulationStore<C> {
    /// Creates a store that reads "now" from `clock`.
    pub fn with_clock(db: Database, clock: C) -> Self {
        Self { db, clock }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Computes and persists a new simulation for `owner_id`.
    ///
    /// # Errors
    /// - `ElementNotFound` when `element.id` is not in the catalogue.
    /// - `Decay` when inputs are invalid; nothing is written.
    pub fn create(
        &self,
        owner_id: OwnerId,
        element: &ElementReference,
        n0: f64,
        t: f64,
    ) -> StoreResult<SimulationRecord> {
        let conn = self.db.connect()?;
        ensure_element(&conn, element.id)?;
        let draft = self.draft(owner_id, element, n0, t, None)?;
        insert(&conn, draft)
    }

    /// Resolves `input.element_id` and creates a simulation from it.
    ///
    /// # Errors
    /// - `ElementNotFound` when the element does not exist.
    /// - `Decay` when inputs are invalid.
    pub fn submit(
        &self,
        owner_id: OwnerId,
        input: &SimulationInput,
    ) -> StoreResult<SimulationRecord> {
        let conn = self.db.connect()?;
        let element = resolve_element(&conn, input.element_id)?;
        let draft = self.draft(owner_id, &element, input.n0, input.t, None)?;
        insert(&conn, draft)
    }

    /// Returns the record when it exists and belongs to `owner_id`.
    pub fn get(&self, id: SimulationId, owner_id: OwnerId) -> StoreResult<SimulationRecord> {
        let conn = self.db.connect()?;
        find_owned(&conn, id, owner_id)
    }

    /// Re-derives a record from new inputs and a freshly read element.
    ///
    /// # Errors
    /// - `NotFound` for a missing or foreign record.
    /// - `ElementNotFound` when `element.id` is not in the catalogue.
    /// - `Decay` when inputs are invalid; the record stays unchanged.
    pub fn update(
        &self,
        id: SimulationId,
        owner_id: OwnerId,
        element: &ElementReference,
        n0: f64,
        t: f64,
    ) -> StoreResult<SimulationRecord> {
        let mut conn = self.db.connect()?;
        self.update_in(
            &mut conn,
            id,
            owner_id,
            |conn| {
                ensure_element(conn, element.id)?;
                Ok(element.clone())
            },
            n0,
            t,
        )
    }

    /// Edits a record from typed input, re-reading the referenced element.
    pub fn edit(
        &self,
        id: SimulationId,
        owner_id: OwnerId,
        input: &SimulationInput,
    ) -> StoreResult<SimulationRecord> {
        let mut conn = self.db.connect()?;
        self.update_in(
            &mut conn,
            id,
            owner_id,
            |conn| resolve_element(conn, input.element_id),
            input.n0,
            input.t,
        )
    }

    /// Lists the owner's simulations, most recent first.
    pub fn list(&self, owner_id: OwnerId) -> StoreResult<Vec<SimulationRecord>> {
        let conn = self.db.connect()?;
        let records = SqliteSimulationRepository::new(&conn).list_simulations(owner_id)?;
        info!(
            "event=simulation_list module=store status=ok owner_id={} count={}",
            owner_id,
            records.len()
        );
        Ok(records)
    }

    /// Element choices ordered by name.
    pub fn elements(&self) -> StoreResult<Vec<ElementReference>> {
        let conn = self.db.connect()?;
        Ok(SqliteElementRepository::new(&conn).list_elements()?)
    }

    /// Looks up one element reference.
    pub fn element(&self, id: ElementId) -> StoreResult<ElementReference> {
        let conn = self.db.connect()?;
        resolve_element(&conn, id)
    }

    /// Units of one element; empty strings when the element is unknown.
    pub fn element_units(&self, id: ElementId) -> StoreResult<ElementUnits> {
        let conn = self.db.connect()?;
        Ok(element_units(&SqliteElementRepository::new(&conn), id)?)
    }

    fn update_in(
        &self,
        conn: &mut Connection,
        id: SimulationId,
        owner_id: OwnerId,
        load_element: impl FnOnce(&Connection) -> StoreResult<ElementReference>,
        n0: f64,
        t: f64,
    ) -> StoreResult<SimulationRecord> {
        let tx = conn.transaction()?;
        let current = find_owned(&tx, id, owner_id)?;
        let element = load_element(&*tx)?;
        let draft = self.draft(owner_id, &element, n0, t, Some(current.timestamp))?;

        SqliteSimulationRepository::new(&tx).update_simulation(id, &draft)?;
        tx.commit()?;

        info!(
            "event=simulation_update module=store status=ok owner_id={} simulation_id={} element_id={}",
            owner_id, id, draft.element_id
        );
        Ok(draft.into_record(id))
    }

    fn draft(
        &self,
        owner_id: OwnerId,
        element: &ElementReference,
        n0: f64,
        t: f64,
        previous_timestamp: Option<i64>,
    ) -> StoreResult<SimulationDraft> {
        let now = self.clock.now_ms();
        let timestamp = previous_timestamp.map_or(now, |previous| now.max(previous));
        SimulationDraft::compute(owner_id, element, n0, t, timestamp).map_err(|err| {
            warn!(
                "event=simulation_validate module=store status=rejected owner_id={} element_id={} error={}",
                owner_id, element.id, err
            );
            StoreError::from(err)
        })
    }
}

fn insert(conn: &Connection, draft: SimulationDraft) -> StoreResult<SimulationRecord> {
    let id = SqliteSimulationRepository::new(conn).insert_simulation(&draft)?;
    info!(
        "event=simulation_create module=store status=ok owner_id={} simulation_id={} element_id={}",
        draft.owner_id, id, draft.element_id
    );
    Ok(draft.into_record(id))
}

fn find_owned(
    conn: &Connection,
    id: SimulationId,
    owner_id: OwnerId,
) -> StoreResult<SimulationRecord> {
    SqliteSimulationRepository::new(conn)
        .get_simulation(id, owner_id)?
        .ok_or(StoreError::NotFound(id))
}

fn ensure_element(conn: &Connection, id: ElementId) -> StoreResult<()> {
    resolve_element(conn, id).map(|_| ())
}

fn resolve_element(conn: &Connection, id: ElementId) -> StoreResult<ElementReference> {
    SqliteElementRepository::new(conn)
        .get_element(id)?
        .ok_or(StoreError::ElementNotFound(id))
}
