//! Stage capacity and stage views (matches bucketed by stage).

use crate::models::{stage_at, stage_by_key, Capacity, Match, Stage, STAGES};
use serde::Serialize;

/// Maximum number of teams the stage at `stage_index` can host.
/// Unknown indices are unbounded.
pub fn capacity_for(stage_index: usize) -> Capacity {
    stage_at(stage_index)
        .map(|s| s.capacity)
        .unwrap_or(Capacity::Unbounded)
}

/// How many of `available_team_count` teams actually enter the stage.
pub fn teams_for_stage(stage_index: usize, available_team_count: usize) -> usize {
    match capacity_for(stage_index) {
        Capacity::Fixed(cap) => cap.min(available_team_count),
        Capacity::Unbounded => available_team_count,
    }
}

/// A stage with the matches currently persisted under its key. Recomputed from each
/// snapshot, never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StageView {
    pub stage: Stage,
    pub matches: Vec<Match>,
}

/// Bucket `matches` into the static stages, in stage order and keeping insertion order
/// inside each stage. Matches with an unknown stage key land in no bucket.
pub fn stage_views(matches: &[Match]) -> Vec<StageView> {
    STAGES
        .iter()
        .map(|stage| StageView {
            stage: *stage,
            matches: matches
                .iter()
                .filter(|m| m.stage_key == stage.key)
                .cloned()
                .collect(),
        })
        .collect()
}

/// Number of matches whose stage key is not in the stage table.
pub fn unknown_stage_match_count(matches: &[Match]) -> usize {
    matches
        .iter()
        .filter(|m| stage_by_key(&m.stage_key).is_none())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_halves_each_knockout_stage() {
        assert_eq!(capacity_for(0), Capacity::Unbounded);
        assert_eq!(capacity_for(1), Capacity::Fixed(16));
        assert_eq!(capacity_for(2), Capacity::Fixed(8));
        assert_eq!(capacity_for(3), Capacity::Fixed(4));
        assert_eq!(capacity_for(4), Capacity::Fixed(2));
        assert_eq!(capacity_for(9), Capacity::Unbounded);
    }
}
