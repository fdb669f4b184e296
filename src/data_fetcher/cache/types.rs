//! Cache data structures with TTL support

use std::time::Duration;
use tokio::time::Instant;

use crate::models::{Game, Player, Team};

/// Closed set of values the shared cache can hold.
///
/// A typed read names the variant it expects and misses on any other, which
/// keeps "exact type or nothing" without boxing values as `Any`.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Games(Vec<Game>),
    Game(Game),
    Players(Vec<Player>),
    Player(Player),
    Teams(Vec<Team>),
    Team(Team),
}

impl CachedValue {
    /// Variant name, for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            CachedValue::Games(_) => "games",
            CachedValue::Game(_) => "game",
            CachedValue::Players(_) => "players",
            CachedValue::Player(_) => "player",
            CachedValue::Teams(_) => "teams",
            CachedValue::Team(_) => "team",
        }
    }
}

/// Conversion between a domain value and its `CachedValue` variant
pub trait Cacheable: Sized + Send + 'static {
    fn into_cached(self) -> CachedValue;

    /// Returns `None` when the stored variant is not this type
    fn from_cached(value: CachedValue) -> Option<Self>;
}

macro_rules! impl_cacheable {
    ($ty:ty, $variant:ident) => {
        impl Cacheable for $ty {
            fn into_cached(self) -> CachedValue {
                CachedValue::$variant(self)
            }

            fn from_cached(value: CachedValue) -> Option<Self> {
                match value {
                    CachedValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_cacheable!(Vec<Game>, Games);
impl_cacheable!(Game, Game);
impl_cacheable!(Vec<Player>, Players);
impl_cacheable!(Player, Player);
impl_cacheable!(Vec<Team>, Teams);
impl_cacheable!(Team, Team);

/// A stored value with its creation time and optional lifetime
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: CachedValue,
    pub cached_at: Instant,
    pub expiration: Option<Duration>,
}

impl CacheEntry {
    pub fn new(value: CachedValue, expiration: Option<Duration>) -> Self {
        Self {
            value,
            cached_at: Instant::now(),
            expiration,
        }
    }

    pub fn age(&self) -> Duration {
        self.cached_at.elapsed()
    }

    /// Checks if the entry outlived its own expiration. Entries without one never expire.
    pub fn is_expired(&self) -> bool {
        self.expiration
            .is_some_and(|expiration| self.age() > expiration)
    }

    /// Stale means expired, or older than the caller's max age
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.is_expired() || self.age() > max_age
    }

    /// Gets the remaining time until expiration
    pub fn time_until_expiry(&self) -> Option<Duration> {
        self.expiration
            .map(|expiration| expiration.saturating_sub(self.age()))
    }
}

/// Cache information structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheInfo {
    pub size: usize,
    pub capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_cacheable_matches_exact_variant() {
        let teams = vec![TestDataBuilder::team("t1", "Aces")];
        let cached = teams.clone().into_cached();
        assert_eq!(cached.kind(), "teams");

        assert_eq!(Vec::<Team>::from_cached(cached.clone()), Some(teams));
        assert_eq!(Team::from_cached(cached.clone()), None);
        assert_eq!(Vec::<Player>::from_cached(cached), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expiration() {
        let entry = CacheEntry::new(
            TestDataBuilder::team("t1", "Aces").into_cached(),
            Some(Duration::from_secs(10)),
        );
        assert!(!entry.is_expired());
        assert_eq!(entry.time_until_expiry(), Some(Duration::from_secs(10)));

        tokio::time::advance(Duration::from_secs(11)).await;
        assert!(entry.is_expired());
        assert_eq!(entry.time_until_expiry(), Some(Duration::ZERO));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_without_expiration_only_goes_stale() {
        let entry = CacheEntry::new(TestDataBuilder::team("t1", "Aces").into_cached(), None);

        tokio::time::advance(Duration::from_secs(3600)).await;
        assert!(!entry.is_expired());
        assert!(entry.is_stale(Duration::from_secs(60)));
        assert!(!entry.is_stale(Duration::from_secs(7200)));
    }
}
