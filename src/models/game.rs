//! Match, MatchStatus and MatchDraft (a match that has not been persisted yet).

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Lifecycle of a match. Unknown values are rejected when deserializing.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Started,
    Paused,
    Finished,
}

impl MatchStatus {
    /// Started or paused: play has begun but no result yet.
    pub fn is_live(self) -> bool {
        matches!(self, MatchStatus::Started | MatchStatus::Paused)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Started => write!(f, "started"),
            MatchStatus::Paused => write!(f, "paused"),
            MatchStatus::Finished => write!(f, "finished"),
        }
    }
}

/// One fixture between two teams within one stage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// Key of the stage this match belongs to. Matches with a key outside the stage
    /// table are kept but never show up in a stage view.
    pub stage_key: String,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    #[serde(default)]
    pub status: MatchStatus,
    /// None when the score was never recorded; read as 0.
    #[serde(default)]
    pub score1: Option<u32>,
    #[serde(default)]
    pub score2: Option<u32>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Seconds between start and finish.
    #[serde(default)]
    pub duration: u64,
}

impl Match {
    /// Persist a draft under a fresh id.
    pub fn from_draft(draft: MatchDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            stage_key: draft.stage_key,
            team1_id: draft.team1_id,
            team2_id: draft.team2_id,
            status: draft.status,
            score1: Some(draft.score1),
            score2: Some(draft.score2),
            start_time: draft.start_time,
            end_time: draft.end_time,
            duration: draft.duration,
        }
    }

    /// Scores with missing values read as 0.
    pub fn scores(&self) -> (u32, u32) {
        (self.score1.unwrap_or(0), self.score2.unwrap_or(0))
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.team1_id == team_id || self.team2_id == team_id
    }
}

/// A proposed match awaiting creation by the storage layer.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchDraft {
    pub stage_key: String,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub status: MatchStatus,
    pub score1: u32,
    pub score2: u32,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: u64,
}

impl MatchDraft {
    /// A pending, unscored pairing for `stage_key`.
    pub fn new(stage_key: impl Into<String>, team1_id: TeamId, team2_id: TeamId) -> Self {
        Self {
            stage_key: stage_key.into(),
            team1_id,
            team2_id,
            status: MatchStatus::Pending,
            score1: 0,
            score2: 0,
            start_time: None,
            end_time: None,
            duration: 0,
        }
    }
}
