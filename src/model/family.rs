use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SantaError, SantaResult};

pub const MAX_CODE_LEN: usize = 12;

/// The key every participant, assignment and wish list is scoped by.
/// Always upper-case ASCII alphanumerics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FamilyCode(String);

impl FamilyCode {
    pub fn parse(raw: &str) -> SantaResult<Self> {
        let code = raw.trim().to_ascii_uppercase();
        let valid = !code.is_empty()
            && code.len() <= MAX_CODE_LEN
            && code.chars().all(|c| c.is_ascii_alphanumeric());
        if valid {
            Ok(Self(code))
        } else {
            Err(SantaError::InvalidFamilyCode {
                code: raw.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FamilyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FamilyCode {
    type Error = SantaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FamilyCode> for String {
    fn from(code: FamilyCode) -> Self {
        code.0
    }
}

/// A gift-exchange group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub code: FamilyCode,
    pub name: String,
    pub event_date: Option<NaiveDate>,
    pub max_budget: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Family {
    pub fn create(code: FamilyCode, name: String) -> Self {
        Self {
            code,
            name,
            event_date: None,
            max_budget: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
