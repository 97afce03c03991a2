use std::sync::Arc;

use crate::Team;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalScoreEvent {
    pub tick_count: u64,
    pub scoring_team: Team,
}

/// A car ran into another car with its front bumper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarBumpEvent {
    pub tick_count: u64,
    pub bumper_id: u64,
    pub victim_id: u64,
    /// The victim was demolished instead of bumped
    pub is_demo: bool,
}

pub type GoalScoreCallback = Arc<dyn Fn(&GoalScoreEvent) + Send + Sync>;
pub type CarBumpCallback = Arc<dyn Fn(&CarBumpEvent) + Send + Sync>;
