use rusqlite::{params, Connection};

use crate::db::{format_timestamp, parse_timestamp};
use crate::error::{SantaError, SantaResult};
use crate::model::{Family, FamilyCode};

pub fn insert(conn: &Connection, family: &Family) -> SantaResult<()> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO families (code, name, event_date, max_budget, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            family.code.as_str(),
            family.name,
            family.event_date.map(|d| d.to_string()),
            family.max_budget,
            format_timestamp(&family.created_at),
            family.updated_at.as_ref().map(format_timestamp),
        ],
    )?;
    if inserted == 0 {
        return Err(SantaError::AlreadyExists {
            entity_type: "Family".into(),
            identifier: family.code.to_string(),
        });
    }
    Ok(())
}

pub fn update(conn: &Connection, family: &Family) -> SantaResult<()> {
    let updated = conn.execute(
        "UPDATE families SET name = ?1, event_date = ?2, max_budget = ?3, updated_at = ?4
         WHERE code = ?5",
        params![
            family.name,
            family.event_date.map(|d| d.to_string()),
            family.max_budget,
            family.updated_at.as_ref().map(format_timestamp),
            family.code.as_str(),
        ],
    )?;
    if updated == 0 {
        return Err(SantaError::not_found("Family", &family.code));
    }
    Ok(())
}

pub fn delete(conn: &Connection, code: &FamilyCode) -> SantaResult<bool> {
    let deleted = conn.execute("DELETE FROM families WHERE code = ?1", params![code.as_str()])?;
    Ok(deleted > 0)
}

pub fn find_by_code(conn: &Connection, code: &FamilyCode) -> SantaResult<Option<Family>> {
    let mut stmt = conn.prepare(
        "SELECT code, name, event_date, max_budget, created_at, updated_at
         FROM families WHERE code = ?1",
    )?;

    let result = stmt.query_row(params![code.as_str()], |row| Ok(row_to_family(row)));

    match result {
        Ok(family) => Ok(Some(family?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_all(conn: &Connection) -> SantaResult<Vec<Family>> {
    let mut stmt = conn.prepare(
        "SELECT code, name, event_date, max_budget, created_at, updated_at
         FROM families ORDER BY name, code",
    )?;

    let families = stmt
        .query_map([], |row| Ok(row_to_family(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(families)
}

fn row_to_family(row: &rusqlite::Row) -> SantaResult<Family> {
    let code: String = row.get(0)?;
    let event_date: Option<String> = row.get(2)?;
    let created_at: String = row.get(4)?;
    let updated_at: Option<String> = row.get(5)?;

    Ok(Family {
        code: FamilyCode::parse(&code)?,
        name: row.get(1)?,
        event_date: event_date
            .and_then(|s| chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        max_budget: row.get(3)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: updated_at.as_deref().map(parse_timestamp).transpose()?,
    })
}
