//! Match generation: round-robin for the group stage, positional pairs for knockouts.

use crate::logic::stages::teams_for_stage;
use crate::models::{stage_key_for, MatchDraft, TeamId, GROUP_STAGE, STAGES};

/// Drafts for the knockout stage at `next_stage_index`.
///
/// 1. Cap the qualifier list at the stage's capacity, keeping input order.
/// 2. Pair positions 0-1, 2-3, ...
/// 3. A trailing odd team gets no match.
///
/// Returns nothing for an index past the stage table.
pub fn build_next_stage_matches(qualified_team_ids: &[TeamId], next_stage_index: usize) -> Vec<MatchDraft> {
    let Some(stage_key) = stage_key_for(next_stage_index) else {
        return Vec::new();
    };
    let n = teams_for_stage(next_stage_index, qualified_team_ids.len());
    qualified_team_ids[..n]
        .chunks_exact(2)
        .map(|pair| MatchDraft::new(stage_key, pair[0].clone(), pair[1].clone()))
        .collect()
}

/// Every unordered pair of distinct teams plays once: C(n, 2) group-stage drafts.
pub fn round_robin_matches(team_ids: &[TeamId]) -> Vec<MatchDraft> {
    let stage_key = STAGES[GROUP_STAGE].key;
    let mut drafts = Vec::with_capacity(team_ids.len() * team_ids.len().saturating_sub(1) / 2);
    for (i, team1) in team_ids.iter().enumerate() {
        for team2 in &team_ids[i + 1..] {
            drafts.push(MatchDraft::new(stage_key, team1.clone(), team2.clone()));
        }
    }
    drafts
}
