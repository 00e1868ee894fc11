use crate::error::{Result, StoreError};
use matchday_core::domain::{ImportId, ImportRun};
use rusqlite::{params, Connection};
use std::str::FromStr;

pub struct ImportsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ImportsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Newest first.
    pub fn list(&self) -> Result<Vec<ImportRun>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, source, label, row_count, record_count, created_at
             FROM imports
             ORDER BY created_at DESC, rowid DESC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut imports = Vec::new();
        while let Some(row) = rows.next()? {
            imports.push(import_from_row(row)?);
        }
        Ok(imports)
    }

    pub fn get(&self, id: ImportId) -> Result<Option<ImportRun>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, source, label, row_count, record_count, created_at
             FROM imports WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(import_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// The pass whose records are currently stored.
    pub fn current(&self) -> Result<Option<ImportRun>> {
        let id: Option<String> = {
            let mut stmt = self
                .conn
                .prepare("SELECT import_id FROM match_records LIMIT 1;")?;
            let mut rows = stmt.query([])?;
            match rows.next()? {
                Some(row) => Some(row.get(0)?),
                None => None,
            }
        };
        match id {
            Some(id) => {
                let id = ImportId::from_str(&id).map_err(|_| StoreError::InvalidId(id.clone()))?;
                self.get(id)
            }
            None => Ok(None),
        }
    }
}

pub(crate) fn insert_import(conn: &Connection, import: &ImportRun) -> Result<()> {
    conn.execute(
        "INSERT INTO imports (id, source, label, row_count, record_count, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            import.id.to_string(),
            import.source,
            import.label,
            import.row_count as i64,
            import.record_count as i64,
            import.created_at,
        ],
    )?;
    Ok(())
}

fn import_from_row(row: &rusqlite::Row<'_>) -> Result<ImportRun> {
    let id_str: String = row.get(0)?;
    let id = ImportId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    Ok(ImportRun {
        id,
        source: row.get(1)?,
        label: row.get(2)?,
        row_count: count_from(row.get(3)?)?,
        record_count: count_from(row.get(4)?)?,
        created_at: row.get(5)?,
    })
}

fn count_from(value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| StoreError::InvalidCount(value))
}
