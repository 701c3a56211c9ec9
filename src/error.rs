use thiserror::Error;

#[derive(Debug, Error)]
pub enum SantaError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} must be positive")]
    NonPositive { field: String },

    #[error("Invalid family code: {code}")]
    InvalidFamilyCode { code: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("At least 2 participants are needed to draw, found {count}")]
    InsufficientParticipants { count: usize },

    #[error("Participant {id} appears more than once")]
    DuplicateParticipant { id: String },

    #[error("No assignments have been drawn for family {family} yet")]
    AssignmentSetMissing { family: String },

    #[error("{participant} is not part of the current draw; regenerate assignments")]
    ParticipantNotInSet { participant: String },

    #[error("Assigned receiver {receiver} is no longer a participant; regenerate assignments")]
    ReceiverRemoved { receiver: String },

    #[error("Could not generate a unique family code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SantaError {
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// True for errors that go away once assignments are drawn again.
    pub fn needs_redraw(&self) -> bool {
        matches!(
            self,
            Self::AssignmentSetMissing { .. }
                | Self::ParticipantNotInSet { .. }
                | Self::ReceiverRemoved { .. }
        )
    }
}

pub type SantaResult<T> = Result<T, SantaError>;
