use tracing::{info, warn};

use crate::db::Store;
use crate::error::{SantaError, SantaResult};
use crate::model::{FamilyCode, Id, Participant};
use crate::ops::{require_family, require_participant};
use crate::validation::{self, same_name};

/// Add someone to the family. Names are matched case-insensitively so the
/// same person isn't added twice from the UI; ids stay the real key.
pub fn add_participant(store: &dyn Store, code: &FamilyCode, name: &str) -> SantaResult<Participant> {
    let valid_name = validation::non_blank(name, "name")?;
    require_family(store, code)?;
    reject_taken_name(store, code, &valid_name, None)?;

    let participant = Participant::create(valid_name);
    store.insert_participant(code, &participant)?;
    warn_if_draw_exists(store, code, "participant added")?;

    info!(family = %code, participant = %participant.id, "participant added");
    Ok(participant)
}

pub fn rename_participant(
    store: &dyn Store,
    code: &FamilyCode,
    id: &Id<Participant>,
    new_name: &str,
) -> SantaResult<Participant> {
    let valid_name = validation::non_blank(new_name, "name")?;
    let mut participant = require_participant(store, code, id)?;
    reject_taken_name(store, code, &valid_name, Some(id))?;

    participant.name = valid_name;
    store.update_participant(code, &participant)?;
    Ok(participant)
}

/// Remove a participant and their wish list. An existing draw is left alone
/// and becomes stale.
pub fn remove_participant(
    store: &dyn Store,
    code: &FamilyCode,
    id: &Id<Participant>,
) -> SantaResult<Participant> {
    let participant = require_participant(store, code, id)?;
    store.delete_participant(code, id)?;
    warn_if_draw_exists(store, code, "participant removed")?;

    info!(family = %code, participant = %id, "participant removed");
    Ok(participant)
}

pub fn list_participants(store: &dyn Store, code: &FamilyCode) -> SantaResult<Vec<Participant>> {
    require_family(store, code)?;
    store.find_participants(code)
}

fn reject_taken_name(
    store: &dyn Store,
    code: &FamilyCode,
    name: &str,
    except: Option<&Id<Participant>>,
) -> SantaResult<()> {
    let taken = store
        .find_participants(code)?
        .into_iter()
        .any(|p| Some(&p.id) != except && same_name(&p.name, name));
    if taken {
        return Err(SantaError::AlreadyExists {
            entity_type: "Participant".into(),
            identifier: name.to_string(),
        });
    }
    Ok(())
}

fn warn_if_draw_exists(store: &dyn Store, code: &FamilyCode, change: &str) -> SantaResult<()> {
    if store.get_assignments(code)?.is_some() {
        warn!(family = %code, change, "roster changed after the draw; assignments are now stale");
    }
    Ok(())
}
