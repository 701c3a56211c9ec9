use chrono::NaiveDate;
use rand::Rng;
use tracing::info;

use crate::db::Store;
use crate::draw;
use crate::error::{SantaError, SantaResult};
use crate::model::{Family, FamilyCode};
use crate::ops::require_family;
use crate::validation::{self, optional_positive};

pub const MAX_CODE_ATTEMPTS: usize = 10;

pub fn create_family<R: Rng + ?Sized>(
    store: &dyn Store,
    rng: &mut R,
    name: &str,
    event_date: Option<NaiveDate>,
    max_budget: Option<i64>,
) -> SantaResult<Family> {
    let valid_name = validation::non_blank(name, "name")?;
    let budget = optional_positive(max_budget, "max budget")?;

    let mut code = None;
    for _ in 0..MAX_CODE_ATTEMPTS {
        let candidate = draw::generate_family_code(&valid_name, rng);
        let candidate = FamilyCode::parse(&candidate)?;
        if !store.family_exists(&candidate)? {
            code = Some(candidate);
            break;
        }
    }
    let code = code.ok_or(SantaError::CodeSpaceExhausted {
        attempts: MAX_CODE_ATTEMPTS,
    })?;

    let mut family = Family::create(code, valid_name);
    family.event_date = event_date;
    family.max_budget = budget;

    store.insert_family(&family)?;
    info!(family = %family.code, name = %family.name, "family created");
    Ok(family)
}

pub fn get_family(store: &dyn Store, code: &FamilyCode) -> SantaResult<Family> {
    require_family(store, code)
}

pub fn list_families(store: &dyn Store) -> SantaResult<Vec<Family>> {
    store.list_families()
}

pub fn update_family(
    store: &dyn Store,
    code: &FamilyCode,
    name: Option<&str>,
    event_date: Option<Option<NaiveDate>>,
    max_budget: Option<Option<i64>>,
) -> SantaResult<Family> {
    let mut family = require_family(store, code)?;

    if let Some(n) = name {
        family.name = validation::non_blank(n, "name")?;
    }
    if let Some(date) = event_date {
        family.event_date = date;
    }
    if let Some(budget) = max_budget {
        family.max_budget = optional_positive(budget, "max budget")?;
    }
    family.touch();

    store.update_family(&family)?;
    Ok(family)
}

pub fn delete_family(store: &dyn Store, code: &FamilyCode) -> SantaResult<()> {
    if !store.delete_family(code)? {
        return Err(SantaError::not_found("Family", code));
    }
    info!(family = %code, "family deleted");
    Ok(())
}
