//! Writing side of the bracket: generate the group stage, advance to the next stage,
//! and the read-only overview handed to the UI.

use crate::logic::pairing::{build_next_stage_matches, round_robin_matches};
use crate::logic::qualification::qualified_team_ids;
use crate::logic::stages::{stage_views, teams_for_stage, unknown_stage_match_count, StageView};
use crate::logic::status::{
    can_advance, current_stage_index, stage_status, tournament_status, StageStatus, TournamentStatus,
};
use crate::models::{
    Match, RequestContext, Stage, Team, Tournament, TournamentError, TournamentId, STAGE_COUNT,
};
use serde::Serialize;

/// Minimum number of registered teams for a group stage.
pub const MIN_TEAMS: usize = 2;

/// Create the round-robin group stage from the registered teams.
pub fn generate_group_stage(
    tournament: &mut Tournament,
    ctx: &RequestContext,
) -> Result<Vec<Match>, TournamentError> {
    tournament.authorize(ctx)?;
    let available = tournament.teams.len();
    if available < MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams {
            required: MIN_TEAMS,
            available,
        });
    }
    let drafts = round_robin_matches(&tournament.team_ids());
    let created = tournament.insert_drafts(ctx, drafts)?;
    log::info!(
        "Tournament {}: generated group stage ({} teams, {} matches)",
        tournament.id,
        available,
        created.len()
    );
    Ok(created)
}

/// Create the next stage's matches from the current stage's qualifiers.
///
/// Fails when the final is already decided, when the current stage still has unfinished
/// matches, when the next stage already has matches, or when fewer than two teams
/// qualify.
pub fn advance_to_next_stage(
    tournament: &mut Tournament,
    ctx: &RequestContext,
) -> Result<Vec<Match>, TournamentError> {
    tournament.authorize(ctx)?;
    let views = stage_views(&tournament.matches);
    if matches!(tournament_status(&views), TournamentStatus::Completed { .. }) {
        return Err(TournamentError::TournamentComplete);
    }

    let current = current_stage_index(&views);
    let next = current + 1;
    if next >= STAGE_COUNT {
        return Err(TournamentError::TournamentComplete);
    }
    let view = &views[current];
    if stage_status(&view.matches) != StageStatus::Complete {
        return Err(TournamentError::StageNotReady);
    }
    if !views[next].matches.is_empty() {
        // Matches of the next stage are being played; they must finish first.
        if stage_status(&views[next].matches) == StageStatus::InProgress {
            return Err(TournamentError::StageNotReady);
        }
        return Err(TournamentError::StageAlreadyGenerated(views[next].stage.key.to_string()));
    }

    let qualified = qualified_team_ids(current, &view.matches);
    if qualified.len() < 2 {
        return Err(TournamentError::NotEnoughQualified {
            stage: view.stage.display_name,
            qualified: qualified.len(),
        });
    }

    let entering = teams_for_stage(next, qualified.len());
    if entering % 2 == 1 {
        log::warn!(
            "Tournament {}: odd number of teams ({}) entering {}, last team {} gets no match",
            tournament.id,
            entering,
            views[next].stage.display_name,
            qualified[entering - 1]
        );
    }

    let drafts = build_next_stage_matches(&qualified, next);
    let created = tournament.insert_drafts(ctx, drafts)?;
    log::info!(
        "Tournament {}: advanced {} -> {} ({} matches)",
        tournament.id,
        view.stage.display_name,
        views[next].stage.display_name,
        created.len()
    );
    Ok(created)
}

/// One stage in the overview.
#[derive(Clone, Debug, Serialize)]
pub struct StageSummary {
    pub stage: Stage,
    pub status: StageStatus,
    pub matches: Vec<Match>,
}

/// Everything the scoreboard needs, derived from one snapshot.
#[derive(Clone, Debug, Serialize)]
pub struct BracketOverview {
    pub tournament_id: TournamentId,
    pub name: String,
    pub stages: Vec<StageSummary>,
    pub current_stage: usize,
    pub can_advance: bool,
    pub status: TournamentStatus,
    /// `status` as display text.
    pub status_label: String,
    pub champion: Option<Team>,
}

pub fn bracket_overview(tournament: &Tournament) -> BracketOverview {
    let unknown = unknown_stage_match_count(&tournament.matches);
    if unknown > 0 {
        log::warn!(
            "Tournament {}: {} match(es) with unknown stage key left out of the bracket",
            tournament.id,
            unknown
        );
    }
    let views = stage_views(&tournament.matches);
    let status = tournament_status(&views);
    let champion = match &status {
        TournamentStatus::Completed { winner: Some(id) } => tournament.team(id).cloned(),
        _ => None,
    };
    BracketOverview {
        tournament_id: tournament.id,
        name: tournament.name.clone(),
        current_stage: current_stage_index(&views),
        can_advance: can_advance(&views),
        status_label: status.describe(&tournament.teams),
        status,
        champion,
        stages: views.into_iter().map(summarize).collect(),
    }
}

fn summarize(view: StageView) -> StageSummary {
    StageSummary {
        stage: view.stage,
        status: stage_status(&view.matches),
        matches: view.matches,
    }
}
