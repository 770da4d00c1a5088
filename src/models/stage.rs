//! Static bracket stages: group, round of 16, quarterfinal, semifinal, final.

use serde::Serialize;

/// How many teams a stage can host.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "teams")]
pub enum Capacity {
    /// Bounded only by the number of registered teams (group stage).
    Unbounded,
    Fixed(usize),
}

/// One ordered position in the bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Stage {
    pub index: usize,
    /// Persisted on every match; the only durable contract with storage.
    pub key: &'static str,
    pub display_name: &'static str,
    pub capacity: Capacity,
}

pub const STAGE_COUNT: usize = 5;

/// The bracket, in progression order. Knockout capacity is 2^(STAGE_COUNT - index).
pub const STAGES: [Stage; STAGE_COUNT] = [
    Stage {
        index: 0,
        key: "group",
        display_name: "Group Stage",
        capacity: Capacity::Unbounded,
    },
    Stage {
        index: 1,
        key: "round16",
        display_name: "Round of 16",
        capacity: Capacity::Fixed(1 << (STAGE_COUNT - 1)),
    },
    Stage {
        index: 2,
        key: "quarter",
        display_name: "Quarterfinal",
        capacity: Capacity::Fixed(1 << (STAGE_COUNT - 2)),
    },
    Stage {
        index: 3,
        key: "semi",
        display_name: "Semifinal",
        capacity: Capacity::Fixed(1 << (STAGE_COUNT - 3)),
    },
    Stage {
        index: 4,
        key: "final",
        display_name: "Final",
        capacity: Capacity::Fixed(1 << (STAGE_COUNT - 4)),
    },
];

pub const GROUP_STAGE: usize = 0;

/// Stage at `index`, if it exists.
pub fn stage_at(index: usize) -> Option<&'static Stage> {
    STAGES.get(index)
}

/// Stage whose persisted key is `key`.
pub fn stage_by_key(key: &str) -> Option<&'static Stage> {
    STAGES.iter().find(|s| s.key == key)
}

pub fn stage_key_for(index: usize) -> Option<&'static str> {
    stage_at(index).map(|s| s.key)
}
