//! Read/write access to the `workflow_entity` table of an n8n store.

use crate::error::{FlowfixError, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// One row of `workflow_entity`, as this tool sees it.
#[derive(Debug, Clone)]
pub struct WorkflowRow {
    pub id: i64,
    pub name: String,
    pub nodes: String,
    pub active: bool,
}

/// Connection to the n8n SQLite store.
///
/// Opens in autocommit mode; each update commits on its own. Only the
/// `workflow_entity` table is touched, and only its `nodes` column is ever
/// written.
#[derive(Debug)]
pub struct WorkflowStore {
    conn: Connection,
}

impl WorkflowStore {
    /// Open the store at `path`.
    ///
    /// Refuses to open a path that does not exist: `Connection::open` would
    /// silently create an empty database where the operator expected n8n's.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(FlowfixError::StoreMissing(path.to_path_buf()));
        }
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Look up a workflow by exact name. First match wins if the store holds
    /// duplicate names.
    pub fn workflow_by_name(&self, name: &str) -> Result<Option<WorkflowRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, nodes, active FROM workflow_entity WHERE name = ?1 LIMIT 1",
                params![name],
                row_to_workflow,
            )
            .optional()?;
        Ok(row)
    }

    /// Replace the serialized node document of the row identified by `id`.
    pub fn update_nodes(&self, id: i64, nodes: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE workflow_entity SET nodes = ?1 WHERE id = ?2",
            params![nodes, id],
        )?;
        Ok(())
    }

    /// All workflow rows, ordered by id.
    pub fn list_workflows(&self) -> Result<Vec<WorkflowRow>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, nodes, active FROM workflow_entity ORDER BY id")?;
        let rows = stmt.query_map([], row_to_workflow)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }
}

fn row_to_workflow(row: &rusqlite::Row<'_>) -> rusqlite::Result<WorkflowRow> {
    Ok(WorkflowRow {
        id: row.get(0)?,
        name: row.get(1)?,
        nodes: row.get(2)?,
        active: row.get(3)?,
    })
}
