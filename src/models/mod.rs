//! Data structures for the tournament: stages, teams, matches, tournament state.

mod context;
mod game;
mod stage;
mod team;
mod tournament;

pub use context::{RequestContext, Role};
pub use game::{Match, MatchDraft, MatchId, MatchStatus};
pub use stage::{
    stage_at, stage_by_key, stage_key_for, Capacity, Stage, GROUP_STAGE, STAGES, STAGE_COUNT,
};
pub use team::{Team, TeamId};
pub use tournament::{Tournament, TournamentError, TournamentId};
