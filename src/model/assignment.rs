use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::ids::Id;
use super::participant::Participant;

/// One giver → receiver pairing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub giver_id: Id<Participant>,
    pub receiver_id: Id<Participant>,
}

impl Assignment {
    pub fn new(giver_id: Id<Participant>, receiver_id: Id<Participant>) -> Self {
        Self {
            giver_id,
            receiver_id,
        }
    }
}

/// The full draw for a family. Stored and replaced as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentSet {
    pub assignments: Vec<Assignment>,
    pub generated_at: DateTime<Utc>,
}

impl AssignmentSet {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self {
            assignments,
            generated_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn find_by_giver(&self, giver_id: &Id<Participant>) -> Option<&Assignment> {
        self.assignments.iter().find(|a| &a.giver_id == giver_id)
    }

    /// True when the set is a derangement of exactly these participants:
    /// everyone gives once, everyone receives once, nobody draws themselves.
    pub fn covers_exactly(&self, participants: &[Participant]) -> bool {
        if participants.len() < 2 || self.assignments.len() != participants.len() {
            return false;
        }
        let roster: HashSet<&Id<Participant>> = participants.iter().map(|p| &p.id).collect();
        if roster.len() != participants.len() {
            return false;
        }

        let mut givers = HashSet::new();
        let mut receivers = HashSet::new();
        for a in &self.assignments {
            if a.giver_id == a.receiver_id
                || !roster.contains(&a.giver_id)
                || !roster.contains(&a.receiver_id)
                || !givers.insert(&a.giver_id)
                || !receivers.insert(&a.receiver_id)
            {
                return false;
            }
        }
        true
    }
}
