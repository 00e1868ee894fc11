use crate::error::{Result, StoreError};
use crate::repo::imports::insert_import;
use matchday_core::domain::{ImportRun, MatchRecord, MessageFlags, MessageKind, RecordId};
use rusqlite::{params, Connection};
use std::str::FromStr;

const RECORD_COLUMNS: &str = "id, team_name, phone, match_day, match_time, field_name, confirmed, confirmation_sent, reminder_sent";

/// Records of the most recent ingestion pass, kept in pipeline order.
pub struct RecordsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> RecordsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Records `import` in the history and swaps the current records for
    /// `records` in one transaction.
    pub fn replace_all(&self, import: &ImportRun, records: &[MatchRecord]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        insert_import(&tx, import)?;
        tx.execute("DELETE FROM match_records;", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO match_records (id, import_id, position, team_name, phone, match_day, match_time, field_name, confirmed, confirmation_sent, reminder_sent)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            )?;
            for (position, record) in records.iter().enumerate() {
                stmt.execute(params![
                    record.id.as_str(),
                    import.id.to_string(),
                    position as i64,
                    record.team_name,
                    record.phone,
                    record.match_day,
                    record.match_time,
                    record.field_name,
                    record.confirmed,
                    record.messages.confirmation_sent,
                    record.messages.reminder_sent,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<MatchRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM match_records ORDER BY position ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(record_from_row(row)?);
        }
        Ok(records)
    }

    pub fn get(&self, id: &RecordId) -> Result<Option<MatchRecord>> {
        get_inner(self.conn, id)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM match_records;", [], |row| row.get(0))?;
        usize::try_from(count).map_err(|_| StoreError::InvalidCount(count))
    }

    pub fn set_confirmed(&self, id: &RecordId, confirmed: bool) -> Result<MatchRecord> {
        let updated = self.conn.execute(
            "UPDATE match_records SET confirmed = ?2 WHERE id = ?1;",
            params![id.as_str(), confirmed],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        require(self.conn, id)
    }

    pub fn toggle_confirmed(&self, id: &RecordId) -> Result<MatchRecord> {
        let tx = self.conn.unchecked_transaction()?;
        let mut record = require(&tx, id)?;
        record.toggle_confirmed();
        tx.execute(
            "UPDATE match_records SET confirmed = ?2 WHERE id = ?1;",
            params![id.as_str(), record.confirmed],
        )?;
        tx.commit()?;
        Ok(record)
    }

    pub fn mark_message_sent(&self, id: &RecordId, kind: MessageKind) -> Result<MatchRecord> {
        let column = match kind {
            MessageKind::Confirmation => "confirmation_sent",
            MessageKind::Reminder => "reminder_sent",
        };
        let updated = self.conn.execute(
            &format!("UPDATE match_records SET {column} = 1 WHERE id = ?1;"),
            [id.as_str()],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        require(self.conn, id)
    }
}

fn get_inner(conn: &Connection, id: &RecordId) -> Result<Option<MatchRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM match_records WHERE id = ?1;"
    ))?;
    let mut rows = stmt.query([id.as_str()])?;
    if let Some(row) = rows.next()? {
        Ok(Some(record_from_row(row)?))
    } else {
        Ok(None)
    }
}

fn require(conn: &Connection, id: &RecordId) -> Result<MatchRecord> {
    get_inner(conn, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))
}

fn record_from_row(row: &rusqlite::Row<'_>) -> Result<MatchRecord> {
    let id_str: String = row.get(0)?;
    let id = RecordId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    Ok(MatchRecord {
        id,
        team_name: row.get(1)?,
        phone: row.get(2)?,
        match_day: row.get(3)?,
        match_time: row.get(4)?,
        field_name: row.get(5)?,
        confirmed: row.get(6)?,
        messages: MessageFlags {
            confirmation_sent: row.get(7)?,
            reminder_sent: row.get(8)?,
        },
    })
}
