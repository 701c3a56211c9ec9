use rusqlite::{params, Connection};

use crate::db::{format_timestamp, parse_timestamp};
use crate::error::{SantaError, SantaResult};
use crate::model::{FamilyCode, Id, Participant};

pub fn insert(conn: &Connection, code: &FamilyCode, participant: &Participant) -> SantaResult<()> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO participants (family_code, id, name, added_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            code.as_str(),
            participant.id.as_str(),
            participant.name,
            format_timestamp(&participant.added_at),
        ],
    )?;
    if inserted == 0 {
        return Err(SantaError::AlreadyExists {
            entity_type: "Participant".into(),
            identifier: participant.id.to_string(),
        });
    }
    Ok(())
}

pub fn update(conn: &Connection, code: &FamilyCode, participant: &Participant) -> SantaResult<()> {
    let updated = conn.execute(
        "UPDATE participants SET name = ?1 WHERE family_code = ?2 AND id = ?3",
        params![participant.name, code.as_str(), participant.id.as_str()],
    )?;
    if updated == 0 {
        return Err(SantaError::not_found("Participant", &participant.id));
    }
    Ok(())
}

pub fn delete(conn: &Connection, code: &FamilyCode, id: &Id<Participant>) -> SantaResult<bool> {
    let deleted = conn.execute(
        "DELETE FROM participants WHERE family_code = ?1 AND id = ?2",
        params![code.as_str(), id.as_str()],
    )?;
    Ok(deleted > 0)
}

pub fn find_by_id(
    conn: &Connection,
    code: &FamilyCode,
    id: &Id<Participant>,
) -> SantaResult<Option<Participant>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, added_at FROM participants WHERE family_code = ?1 AND id = ?2",
    )?;

    let result = stmt.query_row(params![code.as_str(), id.as_str()], |row| {
        Ok(row_to_participant(row))
    });

    match result {
        Ok(participant) => Ok(Some(participant?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_family(conn: &Connection, code: &FamilyCode) -> SantaResult<Vec<Participant>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, added_at FROM participants WHERE family_code = ?1 ORDER BY name, id",
    )?;

    let participants = stmt
        .query_map(params![code.as_str()], |row| Ok(row_to_participant(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(participants)
}

fn row_to_participant(row: &rusqlite::Row) -> SantaResult<Participant> {
    let id: String = row.get(0)?;
    let added_at: String = row.get(2)?;

    Ok(Participant {
        id: Id::new(id),
        name: row.get(1)?,
        added_at: parse_timestamp(&added_at)?,
    })
}
