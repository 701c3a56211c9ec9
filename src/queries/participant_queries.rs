use crate::db::Store;
use crate::error::SantaResult;
use crate::model::{FamilyCode, Participant};

/// Participants whose name contains `query`, ignoring case.
pub fn find_by_name(store: &dyn Store, code: &FamilyCode, query: &str) -> SantaResult<Vec<Participant>> {
    let lower = query.trim().to_lowercase();
    Ok(store
        .find_participants(code)?
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&lower))
        .collect())
}

/// Participants who have not saved any gifts yet.
pub fn without_wishes(store: &dyn Store, code: &FamilyCode) -> SantaResult<Vec<Participant>> {
    let wishlists = store.find_wishlists(code)?;
    Ok(store
        .find_participants(code)?
        .into_iter()
        .filter(|p| {
            !wishlists
                .iter()
                .any(|w| w.owner_id == p.id && !w.gifts.is_empty())
        })
        .collect())
}
