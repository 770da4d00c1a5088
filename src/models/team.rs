//! Registered participants.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a team. Opaque to the bracket engine.
pub type TeamId = String;

/// A team registered in a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    /// Create a team with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}
