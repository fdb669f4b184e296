//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and configuration constants
//! to improve maintainability and make the codebase more configurable.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Number of leaders returned when the caller does not ask for a specific count
pub const DEFAULT_LEADERS_LIMIT: i32 = 10;

/// Season type requested from league data sources (regular season)
pub const DEFAULT_SEASON_TYPE: &str = "REG";

/// Storage key holding the ordered list of favorite player ids
pub const FAVORITES_STORAGE_KEY: &str = "favorite_player_ids";

/// In-memory cache sizing
pub mod cache {
    /// Default number of entries the shared memory cache holds before LRU eviction
    pub const DEFAULT_CAPACITY: usize = 256;
}

/// Cache TTL (Time To Live) values in seconds.
///
/// `*_MAX_AGE_SECONDS` is the staleness threshold a repository applies on read;
/// `*_EXPIRATION_SECONDS` is the lifetime stored with the entry itself.
pub mod cache_ttl {
    /// Games change while they are live, so they go stale after a minute
    pub const GAMES_MAX_AGE_SECONDS: u64 = 60;

    /// Lifetime of a cached games entry (5 minutes)
    pub const GAMES_EXPIRATION_SECONDS: u64 = 300;

    /// Player data staleness threshold (10 minutes)
    pub const PLAYERS_MAX_AGE_SECONDS: u64 = 600;

    /// Lifetime of a cached players entry (30 minutes)
    pub const PLAYERS_EXPIRATION_SECONDS: u64 = 1800;

    /// Teams change rarely (1 hour)
    pub const TEAMS_MAX_AGE_SECONDS: u64 = 3600;

    /// Lifetime of a cached teams entry (2 hours)
    pub const TEAMS_EXPIRATION_SECONDS: u64 = 7200;

    /// League leader ranking staleness threshold (10 minutes)
    pub const LEADERS_MAX_AGE_SECONDS: u64 = 600;

    /// Lifetime of a cached leader ranking (30 minutes)
    pub const LEADERS_EXPIRATION_SECONDS: u64 = 1800;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API domain override
    pub const API_DOMAIN: &str = "COURTSIDE_API_DOMAIN";

    /// Environment variable for the JSON fixture directory used by the file-backed remote source
    pub const DATA_DIR: &str = "COURTSIDE_DATA_DIR";

    /// Environment variable for the local snapshot directory
    pub const SNAPSHOT_DIR: &str = "COURTSIDE_SNAPSHOT_DIR";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "COURTSIDE_LOG_FILE";

    /// Environment variable for HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "COURTSIDE_HTTP_TIMEOUT";
}

/// Retry configuration for the HTTP transport
pub mod retry {
    /// Maximum number of retry attempts for API calls
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 250;

    /// Retry delay for rate limit errors (seconds)
    pub const RATE_LIMIT_DELAY_SECONDS: u64 = 60;

    /// Retry delay for server errors (seconds)
    pub const SERVER_ERROR_DELAY_SECONDS: u64 = 5;

    /// Retry delay for service unavailable errors (seconds)
    pub const SERVICE_UNAVAILABLE_DELAY_SECONDS: u64 = 30;

    /// Retry delay for network timeout errors (seconds)
    pub const NETWORK_TIMEOUT_DELAY_SECONDS: u64 = 2;

    /// Retry delay for network connection errors (seconds)
    pub const NETWORK_CONNECTION_DELAY_SECONDS: u64 = 10;
}

/// File names used by the file-backed remote source and the snapshot store
pub mod files {
    pub const GAMES: &str = "games.json";
    pub const PLAYERS: &str = "players.json";
    pub const TEAMS: &str = "teams.json";
    pub const BOX_SCORES: &str = "boxscores.json";
    pub const LEADERS: &str = "leaders.json";
    pub const STANDINGS: &str = "standings.json";
    pub const BOX_SCORE_DIR: &str = "boxscores";
    pub const FAVORITES: &str = "storage.json";
}
