use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;

/// Someone taking part in a family's exchange. The name is a display label
/// and may repeat; the id is what assignments and wish lists point at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Id<Participant>,
    pub name: String,
    pub added_at: DateTime<Utc>,
}

impl Participant {
    pub fn create(name: String) -> Self {
        Self::with_id(Id::generate(), name)
    }

    pub fn with_id(id: Id<Participant>, name: String) -> Self {
        Self {
            id,
            name,
            added_at: Utc::now(),
        }
    }
}
