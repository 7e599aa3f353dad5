use serde::{Deserialize, Serialize};

use super::enums::Relationship;

/// One relative and the conditions recorded for them (free text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub relationship: Relationship,
    pub conditions: Vec<String>,
}
