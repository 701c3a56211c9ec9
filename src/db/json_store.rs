use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::db::document::FamilyDocument;
use crate::db::Store;
use crate::error::{SantaError, SantaResult};
use crate::model::{AssignmentSet, Family, FamilyCode, Id, Participant, WishList};

/// One pretty-printed JSON document per family (`<CODE>.json`) in a directory.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the document, so readers never see a half-written file.
pub struct JsonStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn open(dir: &Path) -> SantaResult<Self> {
        fs::create_dir_all(dir)?;
        debug!(dir = %dir.display(), "opening json store");
        Ok(Self {
            dir: dir.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, code: &FamilyCode) -> PathBuf {
        self.dir.join(format!("{}.json", code))
    }

    fn guard(&self) -> SantaResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| SantaError::Other("json store lock poisoned".into()))
    }

    fn load(&self, code: &FamilyCode) -> SantaResult<Option<FamilyDocument>> {
        let path = self.path_for(code);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&self, doc: &FamilyDocument) -> SantaResult<()> {
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, doc)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(&doc.family.code))
            .map_err(|e| SantaError::Io(e.error))?;
        Ok(())
    }

    /// Load, modify and save one document while holding the write lock.
    fn modify<T>(
        &self,
        code: &FamilyCode,
        f: impl FnOnce(&mut FamilyDocument) -> SantaResult<T>,
    ) -> SantaResult<T> {
        let _guard = self.guard()?;
        let mut doc = self
            .load(code)?
            .ok_or_else(|| SantaError::not_found("Family", code))?;
        let out = f(&mut doc)?;
        self.save(&doc)?;
        Ok(out)
    }

    /// Like `modify`, but a missing family yields `None` instead of `NotFound`.
    /// The existence check happens under the same lock as the write.
    fn modify_if_present<T>(
        &self,
        code: &FamilyCode,
        f: impl FnOnce(&mut FamilyDocument) -> T,
    ) -> SantaResult<Option<T>> {
        let _guard = self.guard()?;
        let Some(mut doc) = self.load(code)? else {
            return Ok(None);
        };
        let out = f(&mut doc);
        self.save(&doc)?;
        Ok(Some(out))
    }
}

impl Store for JsonStore {
    fn insert_family(&self, family: &Family) -> SantaResult<()> {
        let _guard = self.guard()?;
        if self.path_for(&family.code).exists() {
            return Err(SantaError::AlreadyExists {
                entity_type: "Family".into(),
                identifier: family.code.to_string(),
            });
        }
        self.save(&FamilyDocument::new(family.clone()))
    }

    fn update_family(&self, family: &Family) -> SantaResult<()> {
        self.modify(&family.code, |doc| {
            doc.family = family.clone();
            Ok(())
        })
    }

    fn find_family(&self, code: &FamilyCode) -> SantaResult<Option<Family>> {
        Ok(self.load(code)?.map(|doc| doc.family))
    }

    fn family_exists(&self, code: &FamilyCode) -> SantaResult<bool> {
        Ok(self.path_for(code).exists())
    }

    fn list_families(&self) -> SantaResult<Vec<Family>> {
        let mut families = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let parsed = fs::read_to_string(&path)
                .map_err(SantaError::from)
                .and_then(|text| Ok(serde_json::from_str::<FamilyDocument>(&text)?));
            match parsed {
                Ok(doc) => families.push(doc.family),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable family file"),
            }
        }
        families.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
        Ok(families)
    }

    fn delete_family(&self, code: &FamilyCode) -> SantaResult<bool> {
        let _guard = self.guard()?;
        let path = self.path_for(code);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    fn insert_participant(&self, code: &FamilyCode, participant: &Participant) -> SantaResult<()> {
        self.modify(code, |doc| doc.insert_participant(participant))
    }

    fn update_participant(&self, code: &FamilyCode, participant: &Participant) -> SantaResult<()> {
        self.modify(code, |doc| doc.update_participant(participant))
    }

    fn delete_participant(&self, code: &FamilyCode, id: &Id<Participant>) -> SantaResult<bool> {
        Ok(self
            .modify_if_present(code, |doc| doc.delete_participant(id))?
            .unwrap_or(false))
    }

    fn find_participants(&self, code: &FamilyCode) -> SantaResult<Vec<Participant>> {
        Ok(self
            .load(code)?
            .map(|doc| doc.sorted_participants())
            .unwrap_or_default())
    }

    fn put_assignments(&self, code: &FamilyCode, set: &AssignmentSet) -> SantaResult<()> {
        self.modify(code, |doc| {
            doc.assignments = Some(set.clone());
            Ok(())
        })
    }

    fn get_assignments(&self, code: &FamilyCode) -> SantaResult<Option<AssignmentSet>> {
        Ok(self.load(code)?.and_then(|doc| doc.assignments))
    }

    fn clear_assignments(&self, code: &FamilyCode) -> SantaResult<()> {
        self.modify_if_present(code, |doc| doc.assignments = None)?;
        Ok(())
    }

    fn put_wishlist(&self, code: &FamilyCode, wishlist: &WishList) -> SantaResult<()> {
        self.modify(code, |doc| doc.put_wishlist(wishlist))
    }

    fn find_wishlist(
        &self,
        code: &FamilyCode,
        owner_id: &Id<Participant>,
    ) -> SantaResult<Option<WishList>> {
        Ok(self.load(code)?.and_then(|doc| doc.wishlist(owner_id)))
    }

    fn find_wishlists(&self, code: &FamilyCode) -> SantaResult<Vec<WishList>> {
        Ok(self.load(code)?.map(|doc| doc.wishlists).unwrap_or_default())
    }

    fn delete_wishlist(&self, code: &FamilyCode, owner_id: &Id<Participant>) -> SantaResult<bool> {
        Ok(self
            .modify_if_present(code, |doc| doc.delete_wishlist(owner_id))?
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn removals_on_missing_family_are_no_ops() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let code = FamilyCode::parse("GONE12").unwrap();
        let id = Id::new("1");

        assert!(!store.delete_participant(&code, &id).unwrap());
        assert!(!store.delete_wishlist(&code, &id).unwrap());
        store.clear_assignments(&code).unwrap();
        assert!(!store.path_for(&code).exists());
    }

    #[test]
    fn removals_after_family_deleted_are_no_ops() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let family = Family::create(FamilyCode::parse("PER482").unwrap(), "Perez".into());
        let ana = Participant::create("Ana".into());
        store.insert_family(&family).unwrap();
        store.insert_participant(&family.code, &ana).unwrap();
        store.delete_family(&family.code).unwrap();

        assert!(!store.delete_participant(&family.code, &ana.id).unwrap());
        store.clear_assignments(&family.code).unwrap();
        assert!(!store.path_for(&family.code).exists());
    }
}
