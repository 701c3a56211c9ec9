use rusqlite::{params, Connection};

use crate::db::{format_timestamp, parse_timestamp};
use crate::error::SantaResult;
use crate::model::{Assignment, AssignmentSet, FamilyCode, Id};

/// Replace the family's assignment set. Readers never see a mix of the old
/// and new sets: everything happens in one transaction.
pub fn replace(conn: &Connection, code: &FamilyCode, set: &AssignmentSet) -> SantaResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "DELETE FROM assignment_sets WHERE family_code = ?1",
        params![code.as_str()],
    )?;
    tx.execute(
        "INSERT INTO assignment_sets (family_code, generated_at) VALUES (?1, ?2)",
        params![code.as_str(), format_timestamp(&set.generated_at)],
    )?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO assignments (family_code, position, giver_id, receiver_id)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (position, a) in set.assignments.iter().enumerate() {
            stmt.execute(params![
                code.as_str(),
                position as i64,
                a.giver_id.as_str(),
                a.receiver_id.as_str(),
            ])?;
        }
    }

    tx.commit()?;
    Ok(())
}

pub fn clear(conn: &Connection, code: &FamilyCode) -> SantaResult<()> {
    conn.execute(
        "DELETE FROM assignment_sets WHERE family_code = ?1",
        params![code.as_str()],
    )?;
    Ok(())
}

pub fn find_by_family(conn: &Connection, code: &FamilyCode) -> SantaResult<Option<AssignmentSet>> {
    let mut stmt = conn.prepare("SELECT generated_at FROM assignment_sets WHERE family_code = ?1")?;

    let generated_at = match stmt.query_row(params![code.as_str()], |row| row.get::<_, String>(0)) {
        Ok(s) => parse_timestamp(&s)?,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut stmt = conn.prepare(
        "SELECT giver_id, receiver_id FROM assignments WHERE family_code = ?1 ORDER BY position",
    )?;
    let assignments = stmt
        .query_map(params![code.as_str()], |row| {
            let giver: String = row.get(0)?;
            let receiver: String = row.get(1)?;
            Ok(Assignment::new(Id::new(giver), Id::new(receiver)))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(AssignmentSet {
        assignments,
        generated_at,
    }))
}
