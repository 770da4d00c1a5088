//! Explicit caller context passed into every mutating operation.

use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// What the caller is allowed to do.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Registers teams, generates stages, controls matches.
    Organizer,
    /// Read-only access to scoreboards and standings.
    #[default]
    Spectator,
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "organizer" => Ok(Role::Organizer),
            "spectator" => Ok(Role::Spectator),
            _ => Err(()),
        }
    }
}

/// Tournament being acted on plus the caller's role.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RequestContext {
    pub tournament_id: TournamentId,
    pub role: Role,
}

impl RequestContext {
    pub fn new(tournament_id: TournamentId, role: Role) -> Self {
        Self {
            tournament_id,
            role,
        }
    }

    pub fn organizer(tournament_id: TournamentId) -> Self {
        Self::new(tournament_id, Role::Organizer)
    }

    pub fn spectator(tournament_id: TournamentId) -> Self {
        Self::new(tournament_id, Role::Spectator)
    }
}
