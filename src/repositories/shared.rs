//! Pieces every caching repository uses: cache policy, key builders and the
//! fresh-read / local-decode / store steps of the lookup chain.

use bytes::Bytes;
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::cache_ttl;
use crate::data_fetcher::cache::{CacheService, CacheServiceExt, Cacheable};
use crate::error::AppError;

/// How long a repository trusts what it cached, and how long the cache keeps it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Entries older than this are refetched even if still stored
    pub max_age: Duration,
    /// Lifetime stored with the entry itself
    pub expiration: Option<Duration>,
}

impl CachePolicy {
    pub fn new(max_age: Duration, expiration: Option<Duration>) -> Self {
        Self {
            max_age,
            expiration,
        }
    }

    pub fn games() -> Self {
        Self::from_secs(
            cache_ttl::GAMES_MAX_AGE_SECONDS,
            cache_ttl::GAMES_EXPIRATION_SECONDS,
        )
    }

    pub fn players() -> Self {
        Self::from_secs(
            cache_ttl::PLAYERS_MAX_AGE_SECONDS,
            cache_ttl::PLAYERS_EXPIRATION_SECONDS,
        )
    }

    pub fn teams() -> Self {
        Self::from_secs(
            cache_ttl::TEAMS_MAX_AGE_SECONDS,
            cache_ttl::TEAMS_EXPIRATION_SECONDS,
        )
    }

    pub fn leaders() -> Self {
        Self::from_secs(
            cache_ttl::LEADERS_MAX_AGE_SECONDS,
            cache_ttl::LEADERS_EXPIRATION_SECONDS,
        )
    }

    /// Overrides the max age, stretching the expiration when it would be shorter
    pub fn with_max_age(self, max_age: Duration) -> Self {
        let expiration = self.expiration.map(|expiration| expiration.max(max_age));
        Self {
            max_age,
            expiration,
        }
    }

    fn from_secs(max_age: u64, expiration: u64) -> Self {
        Self::new(
            Duration::from_secs(max_age),
            Some(Duration::from_secs(expiration)),
        )
    }
}

/// Cache keys. Every key starts with its entity family so families sharing
/// one cache never collide.
pub mod keys {
    use crate::models::StatCategory;

    pub const GAMES: &str = "games";
    pub const PLAYERS: &str = "players";
    pub const TEAMS: &str = "teams";
    pub const STANDINGS: &str = "standings";

    pub fn game(id: &str) -> String {
        format!("game_{id}")
    }

    pub fn player(id: &str) -> String {
        format!("player_{id}")
    }

    pub fn team(id: &str) -> String {
        format!("team_{id}")
    }

    pub fn roster(team_id: &str) -> String {
        format!("roster_{team_id}")
    }

    pub fn leaders(category: StatCategory) -> String {
        format!("leaders_{}", category.as_str())
    }
}

/// Returns the cached value only when it is present and younger than `max_age`
pub(crate) async fn fresh_from_cache<T: Cacheable>(
    cache: &dyn CacheService,
    key: &str,
    policy: &CachePolicy,
) -> Option<T> {
    if cache.is_stale(key, policy.max_age).await {
        debug!("Cache stale or missing: key={}", key);
        return None;
    }
    cache.get::<T>(key).await
}

pub(crate) async fn store<T: Cacheable>(
    cache: &dyn CacheService,
    key: &str,
    value: T,
    policy: &CachePolicy,
) {
    cache.set(key, value, policy.expiration).await;
}

/// Stores a collection unless it is empty; an empty payload is never worth
/// serving from cache over asking again.
pub(crate) async fn store_collection<T>(
    cache: &dyn CacheService,
    key: &str,
    values: &[T],
    policy: &CachePolicy,
) where
    T: Clone,
    Vec<T>: Cacheable,
{
    if values.is_empty() {
        debug!("Not caching empty collection: key={}", key);
        return;
    }
    store(cache, key, values.to_vec(), policy).await;
}

/// Decodes a local snapshot. A snapshot that no longer decodes is logged
/// and skipped so the caller can fall through to the remote source.
pub(crate) fn decode_snapshot<T>(
    what: &str,
    bytes: Option<Bytes>,
    decode: impl FnOnce(&[u8]) -> Result<T, AppError>,
) -> Option<T> {
    let bytes = bytes?;
    match decode(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring undecodable local {} snapshot: {}", what, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::cache::MemoryCache;
    use crate::models::{StatCategory, Team};
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_keys_are_namespaced() {
        assert_eq!(keys::game("42"), "game_42");
        assert_eq!(keys::player("42"), "player_42");
        assert_eq!(keys::team("42"), "team_42");
        assert_eq!(keys::roster("42"), "roster_42");
        assert_eq!(keys::leaders(StatCategory::Scoring), "leaders_scoring");
    }

    #[test]
    fn test_with_max_age_keeps_expiration_at_least_as_long() {
        let policy = CachePolicy::games().with_max_age(Duration::from_secs(600));
        assert_eq!(policy.max_age, Duration::from_secs(600));
        assert_eq!(policy.expiration, Some(Duration::from_secs(600)));

        let policy = CachePolicy::teams().with_max_age(Duration::from_secs(10));
        assert_eq!(policy.expiration, Some(Duration::from_secs(7200)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_from_cache_respects_max_age() {
        let cache = MemoryCache::new();
        let policy = CachePolicy::new(Duration::from_secs(60), Some(Duration::from_secs(300)));
        let teams = vec![TestDataBuilder::team("t1", "Aces")];
        store_collection(&cache, keys::TEAMS, &teams, &policy).await;

        let hit: Option<Vec<Team>> = fresh_from_cache(&cache, keys::TEAMS, &policy).await;
        assert_eq!(hit, Some(teams));

        tokio::time::advance(Duration::from_secs(61)).await;
        let hit: Option<Vec<Team>> = fresh_from_cache(&cache, keys::TEAMS, &policy).await;
        assert_eq!(hit, None);
    }

    #[tokio::test]
    async fn test_empty_collections_are_not_stored() {
        let cache = MemoryCache::new();
        let empty: Vec<Team> = Vec::new();
        store_collection(&cache, keys::TEAMS, &empty, &CachePolicy::teams()).await;
        assert!(cache.is_stale(keys::TEAMS, Duration::from_secs(60)).await);
    }

    #[test]
    fn test_decode_snapshot_skips_bad_bytes() {
        let decoded = decode_snapshot("teams", Some(Bytes::from_static(b"oops")), |bytes| {
            Ok(serde_json::from_slice::<Vec<String>>(bytes)?)
        });
        assert_eq!(decoded, None);

        let decoded = decode_snapshot("teams", None, |_| Ok(1));
        assert_eq!(decoded, None);

        let decoded = decode_snapshot("teams", Some(Bytes::from_static(b"[\"a\"]")), |bytes| {
            Ok(serde_json::from_slice::<Vec<String>>(bytes)?)
        });
        assert_eq!(decoded, Some(vec!["a".to_string()]));
    }
}
