//! Tournament: registered teams and the match collection, plus match control.
//!
//! This is the in-memory data-access side. The bracket engine in `logic` only reads
//! snapshots of `matches`; everything that writes goes through here.

use crate::models::context::{RequestContext, Role};
use crate::models::game::{Match, MatchDraft, MatchId, MatchStatus};
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Not enough registered teams to generate the group stage.
    #[error("Need at least {required} teams to generate matches (have {available})")]
    NotEnoughTeams { required: usize, available: usize },
    /// A finished stage produced fewer than two qualifiers.
    #[error("Not enough qualified teams to advance from {stage} (have {qualified})")]
    NotEnoughQualified { stage: &'static str, qualified: usize },
    /// Current stage has unfinished matches, or no matches at all.
    #[error("Current stage is not ready to advance")]
    StageNotReady,
    /// The target stage already has matches.
    #[error("Matches for stage '{0}' already exist")]
    StageAlreadyGenerated(String),
    /// There is no stage after the final.
    #[error("Tournament is already complete")]
    TournamentComplete,
    #[error("Team not found")]
    TeamNotFound(TeamId),
    #[error("Match not found")]
    MatchNotFound(MatchId),
    /// Team names are unique, case-insensitive.
    #[error("A team with this name already exists")]
    DuplicateTeamName(String),
    #[error("Team name must not be empty")]
    EmptyTeamName,
    /// Teams cannot be removed once matches reference the roster.
    #[error("Teams cannot be removed after matches have been generated")]
    RosterLocked,
    #[error("Cannot move match from {from} to {to}")]
    InvalidTransition { from: MatchStatus, to: MatchStatus },
    /// Finished matches have immutable scores.
    #[error("Scores can only be set on a started or paused match")]
    ScoresLocked,
    /// Caller role does not allow this action, or context names another tournament.
    #[error("Not allowed")]
    Forbidden,
    #[error("Team import failed: {0}")]
    Import(String),
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Full tournament state: teams and every match of every stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub teams: Vec<Team>,
    /// Authoritative match collection, all stages.
    pub matches: Vec<Match>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TeamRow {
    name: String,
}

impl Tournament {
    /// Create a tournament with no teams.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            teams: Vec::new(),
            matches: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a tournament with initial teams.
    pub fn with_teams(name: impl Into<String>, teams: Vec<Team>) -> Self {
        Self {
            teams,
            ..Self::new(name)
        }
    }

    /// Fail unless the caller is an organizer acting on this tournament.
    pub fn authorize(&self, ctx: &RequestContext) -> Result<(), TournamentError> {
        if ctx.tournament_id != self.id || ctx.role != Role::Organizer {
            return Err(TournamentError::Forbidden);
        }
        Ok(())
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_ids(&self) -> Vec<TeamId> {
        self.teams.iter().map(|t| t.id.clone()).collect()
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Matches persisted under `stage_key`, in insertion order.
    pub fn matches_for_stage<'a>(&'a self, stage_key: &'a str) -> impl Iterator<Item = &'a Match> + 'a {
        self.matches.iter().filter(move |m| m.stage_key == stage_key)
    }

    fn validate_team_name(&self, name: &str) -> Result<(), TournamentError> {
        if name.is_empty() {
            return Err(TournamentError::EmptyTeamName);
        }
        if self.teams.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicateTeamName(name.to_string()));
        }
        Ok(())
    }

    /// Register a team. Names are trimmed and must be unique (case-insensitive).
    pub fn add_team(&mut self, ctx: &RequestContext, name: &str) -> Result<&Team, TournamentError> {
        self.authorize(ctx)?;
        let name = name.trim();
        self.validate_team_name(name)?;
        self.teams.push(Team::new(name));
        Ok(&self.teams[self.teams.len() - 1])
    }

    /// Remove a team by id. Only while no matches exist.
    pub fn remove_team(&mut self, ctx: &RequestContext, team_id: &str) -> Result<(), TournamentError> {
        self.authorize(ctx)?;
        if !self.matches.is_empty() {
            return Err(TournamentError::RosterLocked);
        }
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or_else(|| TournamentError::TeamNotFound(team_id.to_string()))?;
        self.teams.remove(idx);
        Ok(())
    }

    /// Register teams from CSV with a `name` header column. Either every row is added
    /// or none is. Returns the number of teams added.
    pub fn import_teams_csv<R: std::io::Read>(
        &mut self,
        ctx: &RequestContext,
        reader: R,
    ) -> Result<usize, TournamentError> {
        self.authorize(ctx)?;
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut names = Vec::new();
        let mut seen = HashSet::new();
        for row in rdr.deserialize::<TeamRow>() {
            let row = row.map_err(|e| TournamentError::Import(e.to_string()))?;
            let name = row.name.trim().to_string();
            self.validate_team_name(&name)?;
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(TournamentError::DuplicateTeamName(name));
            }
            names.push(name);
        }
        let added = names.len();
        self.teams.extend(names.into_iter().map(Team::new));
        Ok(added)
    }

    /// Persist drafts as new matches. Refuses if any target stage already has matches,
    /// so repeating the same request never doubles a stage.
    pub fn insert_drafts(
        &mut self,
        ctx: &RequestContext,
        drafts: Vec<MatchDraft>,
    ) -> Result<Vec<Match>, TournamentError> {
        self.authorize(ctx)?;
        let keys: HashSet<&str> = drafts.iter().map(|d| d.stage_key.as_str()).collect();
        if let Some(key) = keys
            .into_iter()
            .find(|k| self.matches.iter().any(|m| m.stage_key == *k))
        {
            return Err(TournamentError::StageAlreadyGenerated(key.to_string()));
        }
        let created: Vec<Match> = drafts.into_iter().map(Match::from_draft).collect();
        self.matches.extend(created.iter().cloned());
        Ok(created)
    }

    fn match_mut(&mut self, match_id: MatchId) -> Result<&mut Match, TournamentError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))
    }

    /// Move a match to `to`, checking the transition is allowed.
    fn transition(
        &mut self,
        ctx: &RequestContext,
        match_id: MatchId,
        to: MatchStatus,
    ) -> Result<&Match, TournamentError> {
        use MatchStatus::*;
        self.authorize(ctx)?;
        let m = self.match_mut(match_id)?;
        let from = m.status;
        let allowed = matches!(
            (from, to),
            (Pending, Started) | (Started, Paused) | (Paused, Started) | (Started, Finished) | (Paused, Finished)
        );
        if !allowed {
            return Err(TournamentError::InvalidTransition { from, to });
        }
        let now = Utc::now();
        match to {
            Started if from == Pending => m.start_time = Some(now),
            Finished => {
                m.end_time = Some(now);
                m.duration = m
                    .start_time
                    .map(|s| (now - s).num_seconds().max(0) as u64)
                    .unwrap_or(0);
            }
            _ => {}
        }
        m.status = to;
        log::debug!("match {} {} -> {}", match_id, from, to);
        Ok(m)
    }

    pub fn start_match(&mut self, ctx: &RequestContext, match_id: MatchId) -> Result<&Match, TournamentError> {
        self.transition(ctx, match_id, MatchStatus::Started)
    }

    pub fn pause_match(&mut self, ctx: &RequestContext, match_id: MatchId) -> Result<&Match, TournamentError> {
        self.transition(ctx, match_id, MatchStatus::Paused)
    }

    pub fn resume_match(&mut self, ctx: &RequestContext, match_id: MatchId) -> Result<&Match, TournamentError> {
        self.transition(ctx, match_id, MatchStatus::Started)
    }

    /// Finish a started or paused match; its scores are frozen from here on.
    pub fn finish_match(&mut self, ctx: &RequestContext, match_id: MatchId) -> Result<&Match, TournamentError> {
        self.transition(ctx, match_id, MatchStatus::Finished)
    }

    /// Record the running score of a live match.
    pub fn set_score(
        &mut self,
        ctx: &RequestContext,
        match_id: MatchId,
        score1: u32,
        score2: u32,
    ) -> Result<&Match, TournamentError> {
        self.authorize(ctx)?;
        let m = self.match_mut(match_id)?;
        if !m.status.is_live() {
            return Err(TournamentError::ScoresLocked);
        }
        m.score1 = Some(score1);
        m.score2 = Some(score2);
        Ok(m)
    }
}
