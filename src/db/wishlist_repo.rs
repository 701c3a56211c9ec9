use rusqlite::{params, Connection};

use crate::db::{format_timestamp, parse_timestamp};
use crate::error::SantaResult;
use crate::model::{FamilyCode, Gift, Id, Participant, WishList};

/// Overwrite a participant's wish list with `wishlist`.
pub fn replace(conn: &Connection, code: &FamilyCode, wishlist: &WishList) -> SantaResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "DELETE FROM wishlists WHERE family_code = ?1 AND owner_id = ?2",
        params![code.as_str(), wishlist.owner_id.as_str()],
    )?;
    tx.execute(
        "INSERT INTO wishlists (family_code, owner_id, updated_at) VALUES (?1, ?2, ?3)",
        params![
            code.as_str(),
            wishlist.owner_id.as_str(),
            format_timestamp(&wishlist.updated_at),
        ],
    )?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO gifts (family_code, owner_id, position, id, name, link, image)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for (position, gift) in wishlist.gifts.iter().enumerate() {
            stmt.execute(params![
                code.as_str(),
                wishlist.owner_id.as_str(),
                position as i64,
                gift.id.as_str(),
                gift.name,
                gift.link,
                gift.image,
            ])?;
        }
    }

    tx.commit()?;
    Ok(())
}

pub fn delete(conn: &Connection, code: &FamilyCode, owner_id: &Id<Participant>) -> SantaResult<bool> {
    let deleted = conn.execute(
        "DELETE FROM wishlists WHERE family_code = ?1 AND owner_id = ?2",
        params![code.as_str(), owner_id.as_str()],
    )?;
    Ok(deleted > 0)
}

pub fn find_by_owner(
    conn: &Connection,
    code: &FamilyCode,
    owner_id: &Id<Participant>,
) -> SantaResult<Option<WishList>> {
    let mut stmt = conn.prepare(
        "SELECT updated_at FROM wishlists WHERE family_code = ?1 AND owner_id = ?2",
    )?;

    let updated_at = match stmt.query_row(params![code.as_str(), owner_id.as_str()], |row| {
        row.get::<_, String>(0)
    }) {
        Ok(s) => parse_timestamp(&s)?,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    Ok(Some(WishList {
        owner_id: owner_id.clone(),
        gifts: find_gifts(conn, code, owner_id)?,
        updated_at,
    }))
}

pub fn find_by_family(conn: &Connection, code: &FamilyCode) -> SantaResult<Vec<WishList>> {
    let mut stmt = conn.prepare(
        "SELECT owner_id, updated_at FROM wishlists WHERE family_code = ?1 ORDER BY owner_id",
    )?;

    let rows: Vec<(String, String)> = stmt
        .query_map(params![code.as_str()], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut wishlists = Vec::new();
    for (owner, updated_at) in rows {
        let owner_id = Id::new(owner);
        wishlists.push(WishList {
            gifts: find_gifts(conn, code, &owner_id)?,
            owner_id,
            updated_at: parse_timestamp(&updated_at)?,
        });
    }

    Ok(wishlists)
}

fn find_gifts(
    conn: &Connection,
    code: &FamilyCode,
    owner_id: &Id<Participant>,
) -> SantaResult<Vec<Gift>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, link, image FROM gifts
         WHERE family_code = ?1 AND owner_id = ?2 ORDER BY position",
    )?;

    let gifts = stmt
        .query_map(params![code.as_str(), owner_id.as_str()], |row| {
            let id: String = row.get(0)?;
            Ok(Gift {
                id: Id::new(id),
                name: row.get(1)?,
                link: row.get(2)?,
                image: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(gifts)
}
