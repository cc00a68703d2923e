//! Element reference repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Look up element references by id or name.
//! - List element choices ordered by name.
//! - Insert elements and apply unit reference data.

use crate::model::element::{ElementId, ElementReference, ElementUnits, NewElement};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ELEMENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    half_life,
    unit,
    quantity_unit
FROM elements";

/// Repository interface for element reference data.
pub trait ElementRepository {
    fn get_element(&self, id: ElementId) -> RepoResult<Option<ElementReference>>;
    fn find_element_by_name(&self, name: &str) -> RepoResult<Option<ElementReference>>;
    fn list_elements(&self) -> RepoResult<Vec<ElementReference>>;
    fn insert_element(&self, element: &NewElement) -> RepoResult<ElementId>;
    fn update_element(&self, element: &ElementReference) -> RepoResult<()>;
    /// Sets units for the element named `name`; returns changed row count.
    fn apply_units(&self, name: &str, unit: &str, quantity_unit: &str) -> RepoResult<usize>;
}

/// SQLite-backed element repository.
pub struct SqliteElementRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteElementRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ElementRepository for SqliteElementRepository<'_> {
    fn get_element(&self, id: ElementId) -> RepoResult<Option<ElementReference>> {
        self.conn
            .query_row(
                &format!("{ELEMENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                read_element_row,
            )
            .optional()?
            .map(checked)
            .transpose()
    }

    fn find_element_by_name(&self, name: &str) -> RepoResult<Option<ElementReference>> {
        self.conn
            .query_row(
                &format!("{ELEMENT_SELECT_SQL} WHERE name = ?1;"),
                [name],
                read_element_row,
            )
            .optional()?
            .map(checked)
            .transpose()
    }

    fn list_elements(&self) -> RepoResult<Vec<ElementReference>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ELEMENT_SELECT_SQL} ORDER BY name ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut elements = Vec::new();

        while let Some(row) = rows.next()? {
            elements.push(checked(read_element_row(row)?)?);
        }

        Ok(elements)
    }

    fn insert_element(&self, element: &NewElement) -> RepoResult<ElementId> {
        element.validate()?;

        self.conn.execute(
            "INSERT INTO elements (name, half_life, unit, quantity_unit)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                element.name.as_str(),
                element.half_life,
                element.time_unit.as_str(),
                element.quantity_unit.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_element(&self, element: &ElementReference) -> RepoResult<()> {
        element.validate()?;

        let changed = self.conn.execute(
            "UPDATE elements
             SET name = ?1, half_life = ?2, unit = ?3, quantity_unit = ?4
             WHERE id = ?5;",
            params![
                element.name.as_str(),
                element.half_life,
                element.time_unit.as_str(),
                element.quantity_unit.as_str(),
                element.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "element",
                id: element.id,
            });
        }

        Ok(())
    }

    fn apply_units(&self, name: &str, unit: &str, quantity_unit: &str) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE elements SET unit = ?1, quantity_unit = ?2 WHERE name = ?3;",
            params![unit, quantity_unit, name],
        )?;
        Ok(changed)
    }
}

/// Returns the units of `id`, or empty strings when the element is unknown.
pub fn element_units<R: ElementRepository>(repo: &R, id: ElementId) -> RepoResult<ElementUnits> {
    Ok(repo
        .get_element(id)?
        .map(|element| element.units())
        .unwrap_or_default())
}

fn read_element_row(row: &Row<'_>) -> rusqlite::Result<ElementReference> {
    Ok(ElementReference {
        id: row.get("id")?,
        name: row.get("name")?,
        half_life: row.get("half_life")?,
        time_unit: row.get("unit")?,
        quantity_unit: row.get("quantity_unit")?,
    })
}

fn checked(element: ElementReference) -> RepoResult<ElementReference> {
    element.validate().map_err(|err| {
        RepoError::InvalidData(format!("element {} in elements: {err}", element.id))
    })?;
    Ok(element)
}
