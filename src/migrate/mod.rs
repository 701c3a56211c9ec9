use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::db::Store;
use crate::error::SantaResult;
use crate::model::*;
use crate::validation::trim_optional;

/// Imports a family document written by the old web app (one JSON file
/// per family, camelCase keys) into `store`.
pub fn import_family_json(json_path: &Path, store: &dyn Store) -> SantaResult<ImportStats> {
    let json_str = std::fs::read_to_string(json_path)?;
    import_family_str(&json_str, store)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub family: FamilyCode,
    pub participants: usize,
    pub assignments: usize,
    pub wishlists: usize,
    pub gifts: usize,
    /// Entries that referenced unknown participants and were left out.
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyFamily {
    code: String,
    name: String,
    event_date: Option<String>,
    max_budget: Option<f64>,
    #[serde(default)]
    participants: Vec<LegacyParticipant>,
    #[serde(default)]
    assignments: Vec<LegacyAssignment>,
    #[serde(default)]
    wishlist: Vec<LegacyWish>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyParticipant {
    id: Value,
    name: String,
    added_at: Option<String>,
}

/// Legacy draws point at participants by name.
#[derive(Debug, Deserialize)]
struct LegacyAssignment {
    giver: String,
    receiver: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyWish {
    participant_id: Value,
    item: Value,
}

#[derive(Debug, Deserialize)]
struct LegacyGift {
    name: Option<String>,
    link: Option<String>,
    image: Option<String>,
}

pub fn import_family_str(json_str: &str, store: &dyn Store) -> SantaResult<ImportStats> {
    let legacy: LegacyFamily = serde_json::from_str(json_str)?;
    let plan = plan_import(&legacy)?;

    store.insert_family(&plan.family)?;
    if let Err(e) = write_plan(&plan, store) {
        warn!(family = %plan.family.code, error = %e, "import failed; removing partial family");
        if let Err(cleanup) = store.delete_family(&plan.family.code) {
            warn!(family = %plan.family.code, error = %cleanup, "could not remove partial family");
        }
        return Err(e);
    }

    let stats = ImportStats {
        family: plan.family.code.clone(),
        participants: plan.participants.len(),
        assignments: plan.assignments.as_ref().map_or(0, AssignmentSet::len),
        wishlists: plan.wishlists.len(),
        gifts: plan.wishlists.iter().map(|w| w.gifts.len()).sum(),
        skipped: plan.skipped,
    };
    info!(family = %stats.family, participants = stats.participants, skipped = stats.skipped, "legacy family imported");
    Ok(stats)
}

/// Everything an import will write, built and checked before the first write.
struct ImportPlan {
    family: Family,
    participants: Vec<Participant>,
    assignments: Option<AssignmentSet>,
    wishlists: Vec<WishList>,
    skipped: usize,
}

fn plan_import(legacy: &LegacyFamily) -> SantaResult<ImportPlan> {
    let mut family = Family::create(FamilyCode::parse(&legacy.code)?, legacy.name.trim().to_string());
    family.event_date = legacy.event_date.as_deref().and_then(parse_date);
    family.max_budget = legacy
        .max_budget
        .filter(|b| *b >= 1.0 && *b <= f64::from(u32::MAX))
        .map(|b| b.round() as u32);
    if let Some(created) = legacy.created_at.as_deref().and_then(parse_instant) {
        family.created_at = created;
    }
    family.updated_at = legacy.updated_at.as_deref().and_then(parse_instant);

    let mut skipped = 0;

    // Participant ids are kept as-is (stringified) so legacy references still resolve.
    let mut participants: Vec<Participant> = Vec::new();
    for lp in &legacy.participants {
        let Some(id) = legacy_id(&lp.id) else {
            skipped += 1;
            continue;
        };
        if lp.name.trim().is_empty() || participants.iter().any(|p| p.id.as_str() == id) {
            skipped += 1;
            continue;
        }
        let mut participant = Participant::with_id(Id::new(id), lp.name.trim().to_string());
        if let Some(added) = lp.added_at.as_deref().and_then(parse_instant) {
            participant.added_at = added;
        }
        participants.push(participant);
    }

    let mapped = if legacy.assignments.is_empty() {
        Some(Vec::new())
    } else {
        map_assignments(&legacy.assignments, &participants)
    };
    let assignments = match mapped {
        Some(list) if list.is_empty() => None,
        Some(list) => {
            let set = AssignmentSet::new(list);
            if set.covers_exactly(&participants) {
                Some(set)
            } else {
                warn!(family = %family.code, "legacy draw is not a valid pairing of the roster; not imported");
                skipped += legacy.assignments.len();
                None
            }
        }
        None => {
            warn!(family = %family.code, "legacy draw references unknown participants; not imported");
            skipped += legacy.assignments.len();
            None
        }
    };

    let mut gifts_by_owner: BTreeMap<String, Vec<Gift>> = BTreeMap::new();
    for wish in &legacy.wishlist {
        let owner = legacy_id(&wish.participant_id)
            .filter(|id| participants.iter().any(|p| p.id.as_str() == id));
        match (owner, legacy_gift(&wish.item)) {
            (Some(owner), Some(gift)) => gifts_by_owner.entry(owner).or_default().push(gift),
            _ => skipped += 1,
        }
    }
    let wishlists = gifts_by_owner
        .into_iter()
        .map(|(owner, gifts)| WishList::new(Id::new(owner), gifts))
        .collect();

    Ok(ImportPlan {
        family,
        participants,
        assignments,
        wishlists,
        skipped,
    })
}

fn write_plan(plan: &ImportPlan, store: &dyn Store) -> SantaResult<()> {
    let code = &plan.family.code;
    for participant in &plan.participants {
        store.insert_participant(code, participant)?;
    }
    if let Some(set) = &plan.assignments {
        store.put_assignments(code, set)?;
    }
    for wishlist in &plan.wishlists {
        store.put_wishlist(code, wishlist)?;
    }
    Ok(())
}

/// `None` if any name is unknown: a draw is kept whole or not at all.
fn map_assignments(
    legacy: &[LegacyAssignment],
    participants: &[Participant],
) -> Option<Vec<Assignment>> {
    let by_name = |name: &str| -> Option<Id<Participant>> {
        participants
            .iter()
            .find(|p| p.name == name.trim())
            .or_else(|| participants.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim())))
            .map(|p| p.id.clone())
    };

    legacy
        .iter()
        .map(|a| Some(Assignment::new(by_name(&a.giver)?, by_name(&a.receiver)?)))
        .collect()
}

fn legacy_id(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Items were stored either as plain text or as a JSON-encoded `{name, link, image}`.
fn legacy_gift(item: &Value) -> Option<Gift> {
    let parsed: LegacyGift = match item {
        Value::String(text) => match serde_json::from_str::<LegacyGift>(text) {
            Ok(g) if g.name.is_some() => g,
            _ => LegacyGift {
                name: Some(text.clone()),
                link: None,
                image: None,
            },
        },
        Value::Object(_) => serde_json::from_value(item.clone()).ok()?,
        _ => return None,
    };

    let name = trim_optional(parsed.name.as_deref())?;
    Some(Gift::create(
        name,
        trim_optional(parsed.link.as_deref()),
        trim_optional(parsed.image.as_deref()),
    ))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

impl fmt::Display for ImportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} participants, {} assignments, {} wish lists ({} gifts), {} skipped",
            self.family, self.participants, self.assignments, self.wishlists, self.gifts, self.skipped
        )
    }
}
