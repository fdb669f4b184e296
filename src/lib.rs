//! Basketball statistics data layer.
//!
//! Games, players, teams and league leaders are read through repositories
//! that consult a shared in-memory cache, then a local snapshot store, then
//! a remote source (the stats REST API or a directory of JSON fixtures).
//!
//! # Examples
//!
//! ```rust,no_run
//! use courtside::config::Config;
//! use courtside::context::AppContext;
//! use courtside::error::AppError;
//! use courtside::models::StatCategory;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let context = AppContext::from_config(&config)?;
//!
//!     let leaders = context.leaders.execute(StatCategory::Scoring, Some(5)).await?;
//!     for player in &leaders {
//!         println!("{} {:.1}", player.name, player.points_per_game());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod context;
pub mod data_fetcher;
pub mod error;
pub mod logging;
pub mod models;
pub mod repositories;
pub mod testing_utils;
pub mod use_cases;

// Re-export commonly used types for convenience
pub use config::Config;
pub use context::AppContext;
pub use data_fetcher::cache::{CacheInfo, CacheService, MemoryCache};
pub use error::AppError;
pub use models::{BoxScore, Game, GameStatus, Player, StatCategory, Statistic, Team};
pub use repositories::{
    FavoriteRepository, GameRepository, LeagueLeadersRepository, PlayerRepository, TeamRepository,
};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
