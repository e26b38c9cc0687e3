//! Settles wagers against a replayed game log.

pub mod error;
pub mod grade;
pub mod progress;
pub mod scoreboard;
pub mod season_stats;
pub mod settlement;
pub mod wager;

pub use error::WagerError;
pub use grade::{Actual, Grade, GradeReason, GradeResult, GradedWager};
pub use progress::{assess_log_impacts, assess_play_impact, wager_progress, PlayImpact, WagerProgress};
pub use scoreboard::{FinalScore, ScoreDelta, Scoreboard};
pub use season_stats::{stat_rows, SeasonStatTables, StatRow};
pub use settlement::{grade_bets, grade_moneyline, grade_player_yards, grade_spread, grade_td_bet_from_pbp, grade_total, grade_wager, GradingContext};
pub use wager::{OverUnder, RawWager, TouchdownTarget, Wager, YardStat};
