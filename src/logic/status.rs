//! Stage status, current-stage detection, advancement gating and tournament status.

use crate::logic::qualification::qualified_team_ids;
use crate::logic::stages::StageView;
use crate::models::{Match, MatchStatus, Team, TeamId};
use serde::Serialize;

/// Progress of a single stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// No matches generated.
    NotStarted,
    /// Every match finished.
    Complete,
    /// Some match started or paused.
    InProgress,
    /// Matches exist, none started.
    Pending,
}

pub fn stage_status(matches: &[Match]) -> StageStatus {
    if matches.is_empty() {
        StageStatus::NotStarted
    } else if all_finished(matches) {
        StageStatus::Complete
    } else if matches.iter().any(|m| m.status.is_live()) {
        StageStatus::InProgress
    } else {
        StageStatus::Pending
    }
}

fn all_finished(matches: &[Match]) -> bool {
    matches.iter().all(|m| m.status == MatchStatus::Finished)
}

/// Index of the stage that is ready to advance: the first stage (excluding the last)
/// that has matches, all finished, while the next stage has none. 0 when no stage
/// qualifies.
pub fn current_stage_index(stages: &[StageView]) -> usize {
    stages
        .windows(2)
        .position(|w| {
            !w[0].matches.is_empty() && w[1].matches.is_empty() && all_finished(&w[0].matches)
        })
        .unwrap_or(0)
}

/// Whether the "advance" action is allowed: the current stage has matches, all
/// finished, the next stage is empty, and at least two teams qualify.
pub fn can_advance(stages: &[StageView]) -> bool {
    let current = current_stage_index(stages);
    let (Some(stage), Some(next)) = (stages.get(current), stages.get(current + 1)) else {
        return false;
    };
    !stage.matches.is_empty()
        && all_finished(&stage.matches)
        && next.matches.is_empty()
        && qualified_team_ids(stage.stage.index, &stage.matches).len() >= 2
}

/// Overall tournament progress.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum TournamentStatus {
    /// No stage has any match.
    NotStarted,
    /// The most advanced stage with matches.
    InStage {
        stage: &'static str,
        complete: bool,
    },
    /// Final stage finished.
    Completed { winner: Option<TeamId> },
}

impl TournamentStatus {
    /// Human-facing label with the winner's id resolved to a team name.
    pub fn describe(&self, teams: &[Team]) -> String {
        match self {
            TournamentStatus::Completed { winner: Some(id) } => {
                let name = teams
                    .iter()
                    .find(|t| t.id == *id)
                    .map(|t| t.name.as_str())
                    .unwrap_or(id.as_str());
                format!("Tournament Complete - Winner: {}", name)
            }
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentStatus::NotStarted => write!(f, "Not Started"),
            TournamentStatus::InStage { stage, complete: true } => write!(f, "{} - Complete", stage),
            TournamentStatus::InStage { stage, complete: false } => write!(f, "{} - In Progress", stage),
            TournamentStatus::Completed { winner: Some(id) } => {
                write!(f, "Tournament Complete - Winner: {}", id)
            }
            TournamentStatus::Completed { winner: None } => write!(f, "Tournament Complete"),
        }
    }
}

pub fn tournament_status(stages: &[StageView]) -> TournamentStatus {
    if let Some(last) = stages.last() {
        if !last.matches.is_empty() && all_finished(&last.matches) {
            let winner = qualified_team_ids(last.stage.index, &last.matches)
                .into_iter()
                .next();
            return TournamentStatus::Completed { winner };
        }
    }
    stages
        .iter()
        .rev()
        .find(|s| !s.matches.is_empty())
        .map(|s| TournamentStatus::InStage {
            stage: s.stage.display_name,
            complete: all_finished(&s.matches),
        })
        .unwrap_or(TournamentStatus::NotStarted)
}
