use tracing::debug;

use crate::db::Store;
use crate::error::{SantaError, SantaResult};
use crate::model::{FamilyCode, Gift, Id, Participant, WishList};
use crate::ops::{draw_ops, require_participant};
use crate::validation::{self, trim_optional};

/// A gift as entered by the user, before validation.
#[derive(Debug, Clone, Default)]
pub struct GiftDraft {
    pub name: String,
    pub link: Option<String>,
    pub image: Option<String>,
}

impl GiftDraft {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn validate(&self) -> SantaResult<Gift> {
        Ok(Gift::create(
            validation::non_blank(&self.name, "gift name")?,
            trim_optional(self.link.as_deref()),
            trim_optional(self.image.as_deref()),
        ))
    }
}

/// Replace the owner's whole list.
pub fn save_wishlist(
    store: &dyn Store,
    code: &FamilyCode,
    owner_id: &Id<Participant>,
    gifts: &[GiftDraft],
) -> SantaResult<WishList> {
    require_participant(store, code, owner_id)?;
    let gifts = gifts
        .iter()
        .map(GiftDraft::validate)
        .collect::<SantaResult<Vec<_>>>()?;

    let wishlist = WishList::new(owner_id.clone(), gifts);
    store.put_wishlist(code, &wishlist)?;
    debug!(family = %code, owner = %owner_id, gifts = wishlist.gifts.len(), "wish list saved");
    Ok(wishlist)
}

/// The owner's list, empty if they haven't saved one.
pub fn get_wishlist(
    store: &dyn Store,
    code: &FamilyCode,
    owner_id: &Id<Participant>,
) -> SantaResult<WishList> {
    require_participant(store, code, owner_id)?;
    Ok(store
        .find_wishlist(code, owner_id)?
        .unwrap_or_else(|| WishList::empty(owner_id.clone())))
}

pub fn add_gift(
    store: &dyn Store,
    code: &FamilyCode,
    owner_id: &Id<Participant>,
    draft: &GiftDraft,
) -> SantaResult<WishList> {
    let gift = draft.validate()?;
    let current = get_wishlist(store, code, owner_id)?;

    let mut gifts = current.gifts;
    gifts.push(gift);
    let wishlist = WishList::new(owner_id.clone(), gifts);
    store.put_wishlist(code, &wishlist)?;
    Ok(wishlist)
}

pub fn remove_gift(
    store: &dyn Store,
    code: &FamilyCode,
    owner_id: &Id<Participant>,
    gift_id: &Id<Gift>,
) -> SantaResult<WishList> {
    let current = get_wishlist(store, code, owner_id)?;
    if !current.gifts.iter().any(|g| &g.id == gift_id) {
        return Err(SantaError::not_found("Gift", gift_id));
    }

    let gifts = current
        .gifts
        .into_iter()
        .filter(|g| &g.id != gift_id)
        .collect();
    let wishlist = WishList::new(owner_id.clone(), gifts);
    store.put_wishlist(code, &wishlist)?;
    Ok(wishlist)
}

/// The secret friend of `giver_id` together with their wish list.
pub fn recipient_wishlist(
    store: &dyn Store,
    code: &FamilyCode,
    giver_id: &Id<Participant>,
) -> SantaResult<(Participant, WishList)> {
    let friend = draw_ops::secret_friend(store, code, giver_id)?;
    let wishlist = get_wishlist(store, code, &friend.id)?;
    Ok((friend, wishlist))
}
