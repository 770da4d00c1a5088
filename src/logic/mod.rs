//! Bracket progression: stage capacity, qualification, pairing, status, advancement.
//!
//! Everything except `advance` is a pure function over a match snapshot.

mod advance;
mod pairing;
mod qualification;
mod stages;
mod status;

pub use advance::{
    advance_to_next_stage, bracket_overview, generate_group_stage, BracketOverview, StageSummary,
    MIN_TEAMS,
};
pub use pairing::{build_next_stage_matches, round_robin_matches};
pub use qualification::{qualified_team_ids, winner_of};
pub use stages::{capacity_for, stage_views, teams_for_stage, unknown_stage_match_count, StageView};
pub use status::{
    can_advance, current_stage_index, stage_status, tournament_status, StageStatus, TournamentStatus,
};
