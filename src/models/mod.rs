//! Domain entities.
//!
//! Values here are produced by the DTO layer (or test builders) and are never
//! mutated after construction by the data layer.

pub mod box_score;
pub mod game;
pub mod player;
pub mod statistic;
pub mod team;

pub use box_score::{BoxScore, QuarterScore, TeamStats};
pub use game::{Game, GameStatus};
pub use player::Player;
pub use statistic::{StatCategory, StatUnit, Statistic};
pub use team::{Conference, Team};
