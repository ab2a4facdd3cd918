//! Ledger table operations.
//!
//! The ledger is only ever written as a full-window replacement: delete all
//! rows whose day falls in the window, then bulk-insert the freshly computed
//! set, inside one transaction. Dropping the transaction without committing
//! rolls everything back, so a failed rebuild leaves no partial state.

use chrono::NaiveDate;
use rusqlite::{Row, params};

use crate::error::EngineResult;
use crate::models::LaborDailyRow;

use super::database::Database;
use super::queries::{day_from_db, day_to_db, decimal_from_db};

fn map_ledger_row(row: &Row) -> rusqlite::Result<LaborDailyRow> {
    let day: String = row.get("day")?;
    let hours: String = row.get("hours")?;
    let regular_hours: String = row.get("regular_hours")?;
    let overtime_hours: String = row.get("overtime_hours")?;
    let rate_usd: String = row.get("rate_usd")?;
    let regular_cost_usd: String = row.get("regular_cost_usd")?;
    let overtime_cost_usd: String = row.get("overtime_cost_usd")?;
    let total_cost_usd: String = row.get("total_cost_usd")?;

    Ok(LaborDailyRow {
        id: row.get("id")?,
        job_id: row.get("job_id")?,
        job_name: row.get("job_name")?,
        day: day_from_db(3, &day)?,
        event_id: row.get("event_id")?,
        event_title: row.get("event_title")?,
        employee_id: row.get("employee_id")?,
        employee_name: row.get("employee_name")?,
        source_assignment_id: row.get("source_assignment_id")?,
        hours: decimal_from_db(9, &hours)?,
        regular_hours: decimal_from_db(10, &regular_hours)?,
        overtime_hours: decimal_from_db(11, &overtime_hours)?,
        rate_usd: decimal_from_db(12, &rate_usd)?,
        regular_cost_usd: decimal_from_db(13, &regular_cost_usd)?,
        overtime_cost_usd: decimal_from_db(14, &overtime_cost_usd)?,
        total_cost_usd: decimal_from_db(15, &total_cost_usd)?,
        note: row.get("note")?,
    })
}

impl Database {
    /// Atomically replaces the ledger rows for an inclusive day window.
    ///
    /// Deletes every row with `day` in `[start_day, end_day]` and inserts
    /// the given replacement set in the same transaction. An empty set
    /// legitimately empties the window. Returns the number of rows inserted.
    pub fn replace_ledger_window(
        &mut self,
        start_day: NaiveDate,
        end_day: NaiveDate,
        rows: &[LaborDailyRow],
    ) -> EngineResult<u64> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "DELETE FROM labor_daily WHERE day >= ?1 AND day <= ?2",
            params![day_to_db(start_day), day_to_db(end_day)],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO labor_daily (
                    id, job_id, job_name, day, event_id, event_title,
                    employee_id, employee_name, source_assignment_id,
                    hours, regular_hours, overtime_hours, rate_usd,
                    regular_cost_usd, overtime_cost_usd, total_cost_usd, note
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            )?;

            for row in rows {
                stmt.execute(params![
                    row.id,
                    row.job_id,
                    row.job_name,
                    day_to_db(row.day),
                    row.event_id,
                    row.event_title,
                    row.employee_id,
                    row.employee_name,
                    row.source_assignment_id,
                    row.hours.to_string(),
                    row.regular_hours.to_string(),
                    row.overtime_hours.to_string(),
                    row.rate_usd.to_string(),
                    row.regular_cost_usd.to_string(),
                    row.overtime_cost_usd.to_string(),
                    row.total_cost_usd.to_string(),
                    row.note,
                ])?;
            }
        }

        tx.commit()?;
        Ok(rows.len() as u64)
    }

    /// Reads the ledger rows for an inclusive day window, ordered by id.
    ///
    /// Downstream reporting collaborators (CSV export, dashboards) read the
    /// same shape; tests use it to verify byte-identical rebuilds.
    pub fn ledger_rows(
        &self,
        start_day: NaiveDate,
        end_day: NaiveDate,
    ) -> EngineResult<Vec<LaborDailyRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, job_id, job_name, day, event_id, event_title,
                    employee_id, employee_name, source_assignment_id,
                    hours, regular_hours, overtime_hours, rate_usd,
                    regular_cost_usd, overtime_cost_usd, total_cost_usd, note
             FROM labor_daily
             WHERE day >= ?1 AND day <= ?2
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map(params![day_to_db(start_day), day_to_db(end_day)], map_ledger_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}
