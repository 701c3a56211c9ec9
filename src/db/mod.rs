pub mod schema;
pub mod family_repo;
pub mod participant_repo;
pub mod assignment_repo;
pub mod wishlist_repo;
pub mod document;
pub mod sqlite_store;
pub mod json_store;
pub mod memory_store;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{SantaError, SantaResult};
use crate::model::{AssignmentSet, Family, FamilyCode, Id, Participant, WishList};

pub use json_store::JsonStore;
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;

/// Persistence for everything scoped by a family code.
///
/// Every backend must replace assignment sets and wish lists as a whole:
/// a reader sees either the previous value or the new one, never a mix.
/// Concurrent writers race and the last one wins.
pub trait Store {
    /// Fails with `AlreadyExists` if the code is taken.
    fn insert_family(&self, family: &Family) -> SantaResult<()>;
    fn update_family(&self, family: &Family) -> SantaResult<()>;
    fn find_family(&self, code: &FamilyCode) -> SantaResult<Option<Family>>;
    fn list_families(&self) -> SantaResult<Vec<Family>>;
    /// Removes the family with its participants, assignments and wish lists.
    fn delete_family(&self, code: &FamilyCode) -> SantaResult<bool>;

    fn family_exists(&self, code: &FamilyCode) -> SantaResult<bool> {
        Ok(self.find_family(code)?.is_some())
    }

    fn insert_participant(&self, code: &FamilyCode, participant: &Participant) -> SantaResult<()>;
    fn update_participant(&self, code: &FamilyCode, participant: &Participant) -> SantaResult<()>;
    /// Also drops the participant's wish list.
    fn delete_participant(&self, code: &FamilyCode, id: &Id<Participant>) -> SantaResult<bool>;
    /// Ordered by name.
    fn find_participants(&self, code: &FamilyCode) -> SantaResult<Vec<Participant>>;

    fn find_participant(
        &self,
        code: &FamilyCode,
        id: &Id<Participant>,
    ) -> SantaResult<Option<Participant>> {
        Ok(self
            .find_participants(code)?
            .into_iter()
            .find(|p| &p.id == id))
    }

    fn put_assignments(&self, code: &FamilyCode, set: &AssignmentSet) -> SantaResult<()>;
    fn get_assignments(&self, code: &FamilyCode) -> SantaResult<Option<AssignmentSet>>;
    fn clear_assignments(&self, code: &FamilyCode) -> SantaResult<()>;

    fn put_wishlist(&self, code: &FamilyCode, wishlist: &WishList) -> SantaResult<()>;
    fn find_wishlist(
        &self,
        code: &FamilyCode,
        owner_id: &Id<Participant>,
    ) -> SantaResult<Option<WishList>>;
    fn find_wishlists(&self, code: &FamilyCode) -> SantaResult<Vec<WishList>>;
    fn delete_wishlist(&self, code: &FamilyCode, owner_id: &Id<Participant>) -> SantaResult<bool>;
}

pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(s: &str) -> SantaResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SantaError::Other(format!("Invalid timestamp '{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_roundtrip_at_microsecond_precision() {
        let now = Utc::now();
        let parsed = parse_timestamp(&format_timestamp(&now)).unwrap();
        assert_eq!(parsed.timestamp_micros(), now.timestamp_micros());
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
