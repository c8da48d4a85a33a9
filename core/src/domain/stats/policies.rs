use serde::{Deserialize, Serialize};

/// Which closed sessions feed the user rollups.
///
/// Completed sessions always count. Abandoned sessions contribute their
/// elapsed time only when `count_abandoned_time` is set, and never move
/// `last_trained_dish`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationPolicy {
    pub count_abandoned_time: bool,
}
