pub mod family_ops;
pub mod participant_ops;
pub mod draw_ops;
pub mod wishlist_ops;

use crate::db::Store;
use crate::error::{SantaError, SantaResult};
use crate::model::{Family, FamilyCode, Id, Participant};

pub(crate) fn require_family(store: &dyn Store, code: &FamilyCode) -> SantaResult<Family> {
    store
        .find_family(code)?
        .ok_or_else(|| SantaError::not_found("Family", code))
}

pub(crate) fn require_participant(
    store: &dyn Store,
    code: &FamilyCode,
    id: &Id<Participant>,
) -> SantaResult<Participant> {
    store
        .find_participant(code, id)?
        .ok_or_else(|| SantaError::not_found("Participant", id))
}
