//! Read-only views over a snapshot of games: ordering, filters, grouping and staffing.

mod filter;
mod grouping;
mod occupancy;
mod sort;

pub use filter::{
    filter_by_team, filter_by_teams, filter_to_mine, filter_upcoming, preferred_teams,
    registration_is_upcoming, team_choices, Viewer, GAME_GRACE,
};
pub use grouping::{
    group_by_month, group_by_week, planning_week, week_label, week_start, GameGroup, PlanningDay,
    UNKNOWN_DATE_LABEL,
};
pub use occupancy::{
    carpool_summary, compute_occupancy, is_urgent, missing_roles, roster_stats, CarpoolSummary,
    GameStats, Occupancy, RosterStats, URGENCY_WINDOW,
};
pub use sort::{known_date, sort_chronological, sort_date};
