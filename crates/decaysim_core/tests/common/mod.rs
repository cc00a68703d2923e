//! Shared fixtures for store, plot and report integration tests.
#![allow(dead_code)]

use decaysim_core::db::Database;
use decaysim_core::repo::element_repo::{ElementRepository, SqliteElementRepository};
use decaysim_core::seed::{apply_units, default_units, seed_elements};
use decaysim_core::{Clock, ElementReference, SimulationStore};
use std::cell::Cell;
use tempfile::TempDir;

pub const OWNER: i64 = 1;
pub const OTHER_OWNER: i64 = 2;

/// Deterministic clock: every reading advances by `step` milliseconds.
pub struct StepClock {
    next: Cell<i64>,
    step: i64,
}

impl StepClock {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }

    pub fn set(&self, value: i64) {
        self.next.set(value);
    }
}

impl Clock for StepClock {
    fn now_ms(&self) -> i64 {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

/// File database with the default elements seeded, in a private temp dir.
pub struct Fixture {
    pub dir: TempDir,
    pub store: SimulationStore<StepClock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_clock(StepClock::new(1_700_000_000_000, 1_000))
    }

    pub fn with_clock(clock: StepClock) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("decaysim.sqlite3"));
        let conn = db.connect().unwrap();
        seed_elements(&conn).unwrap();
        apply_units(&conn, &default_units()).unwrap();
        drop(conn);

        Self {
            dir,
            store: SimulationStore::with_clock(db, clock),
        }
    }

    pub fn clock(&self) -> &StepClock {
        self.store.clock()
    }

    pub fn element(&self, name: &str) -> ElementReference {
        let conn = self.store.database().connect().unwrap();
        SqliteElementRepository::new(&conn)
            .find_element_by_name(name)
            .unwrap()
            .unwrap_or_else(|| panic!("element {name} should be seeded"))
    }

    pub fn simulation_count(&self) -> i64 {
        let conn = self.store.database().connect().unwrap();
        conn.query_row("SELECT COUNT(*) FROM simulations;", [], |row| row.get(0))
            .unwrap()
    }
}
