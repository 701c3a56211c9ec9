use serde::{Deserialize, Serialize};

use crate::error::{SantaError, SantaResult};
use crate::model::{AssignmentSet, Family, Id, Participant, WishList};

/// Everything stored for one family, kept together as a single value.
/// The memory and JSON backends read and write whole documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyDocument {
    pub family: Family,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub assignments: Option<AssignmentSet>,
    #[serde(default)]
    pub wishlists: Vec<WishList>,
}

impl FamilyDocument {
    pub fn new(family: Family) -> Self {
        Self {
            family,
            participants: Vec::new(),
            assignments: None,
            wishlists: Vec::new(),
        }
    }

    pub fn insert_participant(&mut self, participant: &Participant) -> SantaResult<()> {
        if self.participants.iter().any(|p| p.id == participant.id) {
            return Err(SantaError::AlreadyExists {
                entity_type: "Participant".into(),
                identifier: participant.id.to_string(),
            });
        }
        self.participants.push(participant.clone());
        Ok(())
    }

    pub fn update_participant(&mut self, participant: &Participant) -> SantaResult<()> {
        let existing = self
            .participants
            .iter_mut()
            .find(|p| p.id == participant.id)
            .ok_or_else(|| SantaError::not_found("Participant", &participant.id))?;
        existing.name = participant.name.clone();
        Ok(())
    }

    pub fn delete_participant(&mut self, id: &Id<Participant>) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| &p.id != id);
        self.wishlists.retain(|w| &w.owner_id != id);
        self.participants.len() != before
    }

    pub fn sorted_participants(&self) -> Vec<Participant> {
        let mut participants = self.participants.clone();
        participants.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        participants
    }

    pub fn put_wishlist(&mut self, wishlist: &WishList) -> SantaResult<()> {
        if !self.participants.iter().any(|p| p.id == wishlist.owner_id) {
            return Err(SantaError::not_found("Participant", &wishlist.owner_id));
        }
        match self.wishlists.iter_mut().find(|w| w.owner_id == wishlist.owner_id) {
            Some(existing) => *existing = wishlist.clone(),
            None => self.wishlists.push(wishlist.clone()),
        }
        Ok(())
    }

    pub fn wishlist(&self, owner_id: &Id<Participant>) -> Option<WishList> {
        self.wishlists.iter().find(|w| &w.owner_id == owner_id).cloned()
    }

    pub fn delete_wishlist(&mut self, owner_id: &Id<Participant>) -> bool {
        let before = self.wishlists.len();
        self.wishlists.retain(|w| &w.owner_id != owner_id);
        self.wishlists.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FamilyCode;

    fn doc() -> FamilyDocument {
        FamilyDocument::new(Family::create(
            FamilyCode::parse("PER123").unwrap(),
            "Perez".into(),
        ))
    }

    #[test]
    fn deleting_participant_drops_their_wishlist() {
        let mut d = doc();
        let ana = Participant::create("Ana".into());
        d.insert_participant(&ana).unwrap();
        d.put_wishlist(&WishList::empty(ana.id.clone())).unwrap();

        assert!(d.delete_participant(&ana.id));
        assert!(d.wishlist(&ana.id).is_none());
        assert!(!d.delete_participant(&ana.id));
    }

    #[test]
    fn wishlist_for_stranger_is_rejected() {
        let mut d = doc();
        let result = d.put_wishlist(&WishList::empty(Id::new("ghost")));
        assert!(matches!(result, Err(SantaError::NotFound { .. })));
    }

    #[test]
    fn duplicate_participant_id_is_rejected() {
        let mut d = doc();
        let ana = Participant::create("Ana".into());
        d.insert_participant(&ana).unwrap();
        assert!(d.insert_participant(&ana).is_err());
    }

    #[test]
    fn older_documents_without_collections_still_load() {
        let json = r#"{"family":{"code":"ABC123","name":"X","event_date":null,
            "max_budget":null,"created_at":"2024-12-01T00:00:00Z","updated_at":null}}"#;
        let d: FamilyDocument = serde_json::from_str(json).unwrap();
        assert!(d.participants.is_empty());
        assert!(d.assignments.is_none());
    }
}
