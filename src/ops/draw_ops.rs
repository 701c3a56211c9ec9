use rand::Rng;
use tracing::{info, warn};

use crate::db::Store;
use crate::draw;
use crate::error::{SantaError, SantaResult};
use crate::model::{Assignment, AssignmentSet, FamilyCode, Id, Participant};
use crate::ops::{require_family, require_participant};

/// How the stored draw relates to the current roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStatus {
    /// Nothing drawn yet.
    Missing,
    /// Stored draw covers exactly the current participants.
    Valid,
    /// Participants were added or removed since the draw.
    Stale,
}

/// Draw again from the current roster, replacing any stored assignments.
pub fn draw<R: Rng + ?Sized>(
    store: &dyn Store,
    code: &FamilyCode,
    rng: &mut R,
) -> SantaResult<AssignmentSet> {
    require_family(store, code)?;
    let participants = store.find_participants(code)?;

    let set = AssignmentSet::new(draw::generate_assignments(&participants, rng)?);
    store.put_assignments(code, &set)?;

    info!(family = %code, pairs = set.len(), "assignments drawn");
    Ok(set)
}

/// Return the stored draw, drawing first if there is none or `regenerate` is set.
pub fn ensure_assignments<R: Rng + ?Sized>(
    store: &dyn Store,
    code: &FamilyCode,
    regenerate: bool,
    rng: &mut R,
) -> SantaResult<AssignmentSet> {
    require_family(store, code)?;
    if !regenerate {
        if let Some(existing) = store.get_assignments(code)? {
            return Ok(existing);
        }
    }
    draw(store, code, rng)
}

pub fn get_assignments(store: &dyn Store, code: &FamilyCode) -> SantaResult<AssignmentSet> {
    require_family(store, code)?;
    store
        .get_assignments(code)?
        .ok_or_else(|| SantaError::AssignmentSetMissing {
            family: code.to_string(),
        })
}

/// Who `giver_id` gives to, as stored.
pub fn assignment_for(
    store: &dyn Store,
    code: &FamilyCode,
    giver_id: &Id<Participant>,
) -> SantaResult<Assignment> {
    require_family(store, code)?;
    require_participant(store, code, giver_id)?;
    let set = get_assignments(store, code)?;

    set.find_by_giver(giver_id)
        .cloned()
        .ok_or_else(|| {
            warn!(family = %code, participant = %giver_id, "participant missing from stored draw");
            SantaError::ParticipantNotInSet {
                participant: giver_id.to_string(),
            }
        })
}

/// The participant `giver_id` drew.
pub fn secret_friend(
    store: &dyn Store,
    code: &FamilyCode,
    giver_id: &Id<Participant>,
) -> SantaResult<Participant> {
    let assignment = assignment_for(store, code, giver_id)?;
    store
        .find_participant(code, &assignment.receiver_id)?
        .ok_or_else(|| SantaError::ReceiverRemoved {
            receiver: assignment.receiver_id.to_string(),
        })
}

pub fn assignment_status(store: &dyn Store, code: &FamilyCode) -> SantaResult<AssignmentStatus> {
    require_family(store, code)?;
    let Some(set) = store.get_assignments(code)? else {
        return Ok(AssignmentStatus::Missing);
    };
    let participants = store.find_participants(code)?;
    if set.covers_exactly(&participants) {
        Ok(AssignmentStatus::Valid)
    } else {
        Ok(AssignmentStatus::Stale)
    }
}

pub fn clear_assignments(store: &dyn Store, code: &FamilyCode) -> SantaResult<()> {
    require_family(store, code)?;
    store.clear_assignments(code)?;
    info!(family = %code, "assignments cleared");
    Ok(())
}
