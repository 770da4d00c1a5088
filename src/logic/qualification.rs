//! Which teams qualify to leave a stage.

use crate::models::{Match, MatchStatus, TeamId, GROUP_STAGE};

/// Winner of a finished match: the strictly higher score, team 1 on a tie.
/// Missing scores count as 0. Unfinished matches have no winner.
pub fn winner_of(m: &Match) -> Option<&TeamId> {
    if m.status != MatchStatus::Finished {
        return None;
    }
    let (score1, score2) = m.scores();
    if score2 > score1 {
        Some(&m.team2_id)
    } else {
        Some(&m.team1_id)
    }
}

/// Teams qualifying from the stage at `stage_index`.
///
/// The group stage qualifies by participation: every distinct team that appears in any
/// match, first-seen order, whatever the match status. Knockout stages qualify by
/// winning: one winner per finished match, in match order.
pub fn qualified_team_ids(stage_index: usize, matches: &[Match]) -> Vec<TeamId> {
    if stage_index == GROUP_STAGE {
        let mut ids: Vec<TeamId> = Vec::new();
        for m in matches {
            for id in [&m.team1_id, &m.team2_id] {
                if !ids.contains(id) {
                    ids.push(id.clone());
                }
            }
        }
        return ids;
    }
    matches.iter().filter_map(winner_of).cloned().collect()
}
