use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::db::{assignment_repo, family_repo, participant_repo, schema, wishlist_repo, Store};
use crate::error::{SantaError, SantaResult};
use crate::model::{AssignmentSet, Family, FamilyCode, Id, Participant, WishList};

/// SQLite-backed store. Each family's rows cascade from the `families` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> SantaResult<Self> {
        debug!(path = %path.display(), "opening sqlite store");
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> SantaResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> SantaResult<Self> {
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn require_family(&self, code: &FamilyCode) -> SantaResult<()> {
        match family_repo::find_by_code(&self.conn, code)? {
            Some(_) => Ok(()),
            None => Err(SantaError::not_found("Family", code)),
        }
    }
}

impl Store for SqliteStore {
    fn insert_family(&self, family: &Family) -> SantaResult<()> {
        family_repo::insert(&self.conn, family)
    }

    fn update_family(&self, family: &Family) -> SantaResult<()> {
        family_repo::update(&self.conn, family)
    }

    fn find_family(&self, code: &FamilyCode) -> SantaResult<Option<Family>> {
        family_repo::find_by_code(&self.conn, code)
    }

    fn list_families(&self) -> SantaResult<Vec<Family>> {
        family_repo::find_all(&self.conn)
    }

    fn delete_family(&self, code: &FamilyCode) -> SantaResult<bool> {
        family_repo::delete(&self.conn, code)
    }

    fn insert_participant(&self, code: &FamilyCode, participant: &Participant) -> SantaResult<()> {
        self.require_family(code)?;
        participant_repo::insert(&self.conn, code, participant)
    }

    fn update_participant(&self, code: &FamilyCode, participant: &Participant) -> SantaResult<()> {
        participant_repo::update(&self.conn, code, participant)
    }

    fn delete_participant(&self, code: &FamilyCode, id: &Id<Participant>) -> SantaResult<bool> {
        participant_repo::delete(&self.conn, code, id)
    }

    fn find_participants(&self, code: &FamilyCode) -> SantaResult<Vec<Participant>> {
        participant_repo::find_by_family(&self.conn, code)
    }

    fn find_participant(
        &self,
        code: &FamilyCode,
        id: &Id<Participant>,
    ) -> SantaResult<Option<Participant>> {
        participant_repo::find_by_id(&self.conn, code, id)
    }

    fn put_assignments(&self, code: &FamilyCode, set: &AssignmentSet) -> SantaResult<()> {
        self.require_family(code)?;
        assignment_repo::replace(&self.conn, code, set)
    }

    fn get_assignments(&self, code: &FamilyCode) -> SantaResult<Option<AssignmentSet>> {
        assignment_repo::find_by_family(&self.conn, code)
    }

    fn clear_assignments(&self, code: &FamilyCode) -> SantaResult<()> {
        assignment_repo::clear(&self.conn, code)
    }

    fn put_wishlist(&self, code: &FamilyCode, wishlist: &WishList) -> SantaResult<()> {
        self.require_family(code)?;
        if participant_repo::find_by_id(&self.conn, code, &wishlist.owner_id)?.is_none() {
            return Err(SantaError::not_found("Participant", &wishlist.owner_id));
        }
        wishlist_repo::replace(&self.conn, code, wishlist)
    }

    fn find_wishlist(
        &self,
        code: &FamilyCode,
        owner_id: &Id<Participant>,
    ) -> SantaResult<Option<WishList>> {
        wishlist_repo::find_by_owner(&self.conn, code, owner_id)
    }

    fn find_wishlists(&self, code: &FamilyCode) -> SantaResult<Vec<WishList>> {
        wishlist_repo::find_by_family(&self.conn, code)
    }

    fn delete_wishlist(&self, code: &FamilyCode, owner_id: &Id<Participant>) -> SantaResult<bool> {
        wishlist_repo::delete(&self.conn, code, owner_id)
    }
}
