use chrono::NaiveDate;

use crate::db::Store;
use crate::error::SantaResult;
use crate::model::{Family, FamilyCode};
use crate::ops::draw_ops::{self, AssignmentStatus};
use crate::ops::require_family;

#[derive(Debug, Clone)]
pub struct FamilySummary {
    pub family: Family,
    pub participants: usize,
    pub status: AssignmentStatus,
    /// Participants with at least one gift on their list.
    pub wishlists_filled: usize,
    pub total_gifts: usize,
    /// Negative once the event has passed.
    pub days_until_event: Option<i64>,
}

pub fn family_summary(
    store: &dyn Store,
    code: &FamilyCode,
    today: NaiveDate,
) -> SantaResult<FamilySummary> {
    let family = require_family(store, code)?;
    let participants = store.find_participants(code)?;
    let wishlists = store.find_wishlists(code)?;
    let status = draw_ops::assignment_status(store, code)?;

    let filled: Vec<_> = wishlists.iter().filter(|w| !w.gifts.is_empty()).collect();
    let total_gifts = filled.iter().map(|w| w.gifts.len()).sum();
    let days_until_event = family.event_date.map(|d| (d - today).num_days());

    Ok(FamilySummary {
        participants: participants.len(),
        status,
        wishlists_filled: filled.len(),
        total_gifts,
        days_until_event,
        family,
    })
}
