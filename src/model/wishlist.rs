use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::participant::Participant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gift {
    pub id: Id<Gift>,
    pub name: String,
    pub link: Option<String>,
    pub image: Option<String>,
}

impl Gift {
    pub fn create(name: String, link: Option<String>, image: Option<String>) -> Self {
        Self {
            id: Id::generate(),
            name,
            link,
            image,
        }
    }
}

/// A participant's gift wishes. Overwritten wholesale on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishList {
    pub owner_id: Id<Participant>,
    pub gifts: Vec<Gift>,
    pub updated_at: DateTime<Utc>,
}

impl WishList {
    pub fn new(owner_id: Id<Participant>, gifts: Vec<Gift>) -> Self {
        Self {
            owner_id,
            gifts,
            updated_at: Utc::now(),
        }
    }

    pub fn empty(owner_id: Id<Participant>) -> Self {
        Self::new(owner_id, Vec::new())
    }
}
