use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::db::document::FamilyDocument;
use crate::db::Store;
use crate::error::{SantaError, SantaResult};
use crate::model::{AssignmentSet, Family, FamilyCode, Id, Participant, WishList};

/// Process-local store. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    families: Mutex<BTreeMap<FamilyCode, FamilyDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> SantaResult<MutexGuard<'_, BTreeMap<FamilyCode, FamilyDocument>>> {
        self.families
            .lock()
            .map_err(|_| SantaError::Other("memory store lock poisoned".into()))
    }

    fn with_document<T>(
        &self,
        code: &FamilyCode,
        f: impl FnOnce(&mut FamilyDocument) -> SantaResult<T>,
    ) -> SantaResult<T> {
        let mut families = self.lock()?;
        let doc = families
            .get_mut(code)
            .ok_or_else(|| SantaError::not_found("Family", code))?;
        f(doc)
    }

    fn read_document<T>(
        &self,
        code: &FamilyCode,
        f: impl FnOnce(&FamilyDocument) -> T,
    ) -> SantaResult<Option<T>> {
        Ok(self.lock()?.get(code).map(f))
    }
}

impl Store for MemoryStore {
    fn insert_family(&self, family: &Family) -> SantaResult<()> {
        let mut families = self.lock()?;
        if families.contains_key(&family.code) {
            return Err(SantaError::AlreadyExists {
                entity_type: "Family".into(),
                identifier: family.code.to_string(),
            });
        }
        families.insert(family.code.clone(), FamilyDocument::new(family.clone()));
        debug!(family = %family.code, "family created in memory");
        Ok(())
    }

    fn update_family(&self, family: &Family) -> SantaResult<()> {
        self.with_document(&family.code, |doc| {
            doc.family = family.clone();
            Ok(())
        })
    }

    fn find_family(&self, code: &FamilyCode) -> SantaResult<Option<Family>> {
        self.read_document(code, |doc| doc.family.clone())
    }

    fn list_families(&self) -> SantaResult<Vec<Family>> {
        let mut families: Vec<Family> = self.lock()?.values().map(|d| d.family.clone()).collect();
        families.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
        Ok(families)
    }

    fn delete_family(&self, code: &FamilyCode) -> SantaResult<bool> {
        Ok(self.lock()?.remove(code).is_some())
    }

    fn insert_participant(&self, code: &FamilyCode, participant: &Participant) -> SantaResult<()> {
        self.with_document(code, |doc| doc.insert_participant(participant))
    }

    fn update_participant(&self, code: &FamilyCode, participant: &Participant) -> SantaResult<()> {
        self.with_document(code, |doc| doc.update_participant(participant))
    }

    fn delete_participant(&self, code: &FamilyCode, id: &Id<Participant>) -> SantaResult<bool> {
        let mut families = self.lock()?;
        Ok(families
            .get_mut(code)
            .map(|doc| doc.delete_participant(id))
            .unwrap_or(false))
    }

    fn find_participants(&self, code: &FamilyCode) -> SantaResult<Vec<Participant>> {
        Ok(self
            .read_document(code, FamilyDocument::sorted_participants)?
            .unwrap_or_default())
    }

    fn put_assignments(&self, code: &FamilyCode, set: &AssignmentSet) -> SantaResult<()> {
        self.with_document(code, |doc| {
            doc.assignments = Some(set.clone());
            Ok(())
        })
    }

    fn get_assignments(&self, code: &FamilyCode) -> SantaResult<Option<AssignmentSet>> {
        Ok(self
            .read_document(code, |doc| doc.assignments.clone())?
            .flatten())
    }

    fn clear_assignments(&self, code: &FamilyCode) -> SantaResult<()> {
        let mut families = self.lock()?;
        if let Some(doc) = families.get_mut(code) {
            doc.assignments = None;
        }
        Ok(())
    }

    fn put_wishlist(&self, code: &FamilyCode, wishlist: &WishList) -> SantaResult<()> {
        self.with_document(code, |doc| doc.put_wishlist(wishlist))
    }

    fn find_wishlist(
        &self,
        code: &FamilyCode,
        owner_id: &Id<Participant>,
    ) -> SantaResult<Option<WishList>> {
        Ok(self.read_document(code, |doc| doc.wishlist(owner_id))?.flatten())
    }

    fn find_wishlists(&self, code: &FamilyCode) -> SantaResult<Vec<WishList>> {
        Ok(self
            .read_document(code, |doc| doc.wishlists.clone())?
            .unwrap_or_default())
    }

    fn delete_wishlist(&self, code: &FamilyCode, owner_id: &Id<Participant>) -> SantaResult<bool> {
        let mut families = self.lock()?;
        Ok(families
            .get_mut(code)
            .map(|doc| doc.delete_wishlist(owner_id))
            .unwrap_or(false))
    }
}
