//! Tournament web app: library with models, bracket logic, config and HTTP handlers.

pub mod config;
pub mod http;
pub mod logic;
pub mod models;

pub use logic::{
    advance_to_next_stage, bracket_overview, build_next_stage_matches, can_advance, capacity_for,
    current_stage_index, generate_group_stage, qualified_team_ids, round_robin_matches,
    stage_status, stage_views, teams_for_stage, tournament_status, winner_of, BracketOverview,
    StageStatus, StageSummary, StageView, TournamentStatus,
};
pub use models::{
    Capacity, Match, MatchDraft, MatchId, MatchStatus, RequestContext, Role, Stage, Team, TeamId,
    Tournament, TournamentError, TournamentId, STAGES,
};
