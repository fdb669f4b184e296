use async_trait::async_trait;
use chrono::Datelike;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::shared::{CachePolicy, decode_snapshot, fresh_from_cache, keys, store_collection};
use super::{LeagueLeadersRepository, TeamRepository};
use crate::constants::DEFAULT_SEASON_TYPE;
use crate::data_fetcher::cache::CacheService;
use crate::data_fetcher::dto::{LeaderEntryDto, PlayerDto, decode_collection};
use crate::data_fetcher::sources::{EntityKind, LocalStore, RemoteSources};
use crate::error::AppError;
use crate::models::{Player, StatCategory};

/// Ranks players per statistic category. The complete ranking is cached per
/// category and each call takes its own prefix of it.
pub struct CachingLeadersRepository {
    remote: RemoteSources,
    local: LocalStore,
    cache: Arc<dyn CacheService>,
    teams: Arc<dyn TeamRepository>,
    policy: CachePolicy,
}

impl CachingLeadersRepository {
    pub fn new(
        remote: RemoteSources,
        local: LocalStore,
        cache: Arc<dyn CacheService>,
        teams: Arc<dyn TeamRepository>,
    ) -> Self {
        Self {
            remote,
            local,
            cache,
            teams,
            policy: CachePolicy::leaders(),
        }
    }

    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn local_players(&self) -> Option<Vec<Player>> {
        let local = self.local.load(EntityKind::Players);
        decode_snapshot("players", local, decode_collection::<PlayerDto>)
    }

    async fn fetch_remote_candidates(
        &self,
        category: StatCategory,
    ) -> Result<Vec<Candidate>, AppError> {
        if let Some(league) = &self.remote.league {
            let season = chrono::Local::now().year();
            info!(
                "Fetching {} leaders for season {} from remote source",
                category, season
            );
            let bytes = league
                .fetch_league_leaders(Some(season), DEFAULT_SEASON_TYPE)
                .await
                .inspect_err(|e| error!("Failed to fetch league leaders: {}", e))?;
            let entries = decode_collection::<LeaderEntryDto>(&bytes)?;

            let mut seen = HashSet::new();
            let candidates: Vec<Candidate> = entries
                .into_iter()
                .filter(|entry| category.matches_api_category(&entry.category))
                .filter(|entry| seen.insert(entry.player.id.clone()))
                .map(|entry| Candidate::listed(entry.player, entry.category))
                .collect();
            debug!("{} leader entries matched {}", candidates.len(), category);
            return Ok(candidates);
        }

        debug!("No league capability, ranking the full player collection");
        let bytes = self
            .remote
            .core
            .fetch_players()
            .await
            .inspect_err(|e| error!("Failed to fetch players: {}", e))?;
        let players = decode_collection::<PlayerDto>(&bytes)?;
        self.local.persist(EntityKind::Players, &bytes);
        Ok(players.into_iter().map(Candidate::unlisted).collect())
    }

    /// Swaps each embedded team for the full team record when one is known.
    /// A failed team lookup leaves the embedded teams as they are.
    async fn resolve_teams(&self, players: Vec<Player>) -> Vec<Player> {
        let teams = match self.teams.get_teams().await {
            Ok(teams) => teams,
            Err(e) => {
                warn!("Could not resolve leader teams: {}", e);
                return players;
            }
        };
        let by_id: HashMap<&str, _> = teams.iter().map(|team| (team.id.as_str(), team)).collect();

        players
            .into_iter()
            .map(|mut player| {
                if let Some(team) = by_id.get(player.team.id.as_str()) {
                    player.team = (*team).clone();
                }
                player
            })
            .collect()
    }
}

/// A player up for ranking, with the provider category its leader entry was
/// listed under when it came from the league feed.
pub(crate) struct Candidate {
    player: Player,
    listed_as: Option<String>,
}

impl Candidate {
    fn listed(player: Player, api_category: String) -> Self {
        Self {
            player,
            listed_as: Some(api_category),
        }
    }

    fn unlisted(player: Player) -> Self {
        Self {
            player,
            listed_as: None,
        }
    }

    fn value(&self, category: StatCategory) -> Option<f64> {
        let statistic = match &self.listed_as {
            Some(api_category) => self
                .player
                .statistic_for_api_category(category, api_category),
            None => self.player.statistic(category),
        };
        statistic.map(|stat| stat.value)
    }
}

/// Orders candidates by their value in `category`, highest first. Players
/// without a statistic in that category are left out and equal values keep
/// their input order.
pub(crate) fn rank_players(candidates: Vec<Candidate>, category: StatCategory) -> Vec<Player> {
    let mut ranked: Vec<(f64, Player)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let value = candidate.value(category)?;
            Some((value, candidate.player))
        })
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked.into_iter().map(|(_, player)| player).collect()
}

fn take_limit(mut ranking: Vec<Player>, limit: i32) -> Vec<Player> {
    ranking.truncate(usize::try_from(limit).unwrap_or(0));
    ranking
}

#[async_trait]
impl LeagueLeadersRepository for CachingLeadersRepository {
    #[instrument(skip(self))]
    async fn get_league_leaders(
        &self,
        category: StatCategory,
        limit: i32,
    ) -> Result<Vec<Player>, AppError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let key = keys::leaders(category);
        let cache = self.cache.as_ref();

        if let Some(ranking) = fresh_from_cache::<Vec<Player>>(cache, &key, &self.policy).await {
            return Ok(take_limit(ranking, limit));
        }

        let candidates = match self.local_players() {
            Some(players) => {
                info!("Ranking {} leaders from local snapshot", category);
                players.into_iter().map(Candidate::unlisted).collect()
            }
            None => self.fetch_remote_candidates(category).await?,
        };

        let ranking = rank_players(candidates, category);
        let ranking = self.resolve_teams(ranking).await;
        store_collection(cache, &key, &ranking, &self.policy).await;
        Ok(take_limit(ranking, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Statistic;
    use crate::testing_utils::TestDataBuilder;

    fn unlisted(players: Vec<Player>) -> Vec<Candidate> {
        players.into_iter().map(Candidate::unlisted).collect()
    }

    fn defender(id: &str, steals: f64, blocks: f64) -> Player {
        let mut player = TestDataBuilder::player(id, "Defender", "t1", 8.0);
        for (name, value) in [("Steals Per Game", steals), ("Blocks Per Game", blocks)] {
            player.statistics.push(Statistic {
                id: format!("{id}-{}", name.to_lowercase().replace(' ', "-")),
                name: name.to_string(),
                value,
                category: StatCategory::Defense,
                unit: None,
                season: None,
                games_played: None,
            });
        }
        player
    }

    #[test]
    fn test_rank_players_is_stable_on_ties() {
        let players: Vec<Player> = [10.0, 30.0, 20.0, 30.0, 5.0]
            .iter()
            .enumerate()
            .map(|(i, ppg)| {
                TestDataBuilder::player(&format!("p{}", i + 1), "Player", "t1", *ppg)
            })
            .collect();

        let ranked = rank_players(unlisted(players), StatCategory::Scoring);
        let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p4", "p3", "p1", "p5"]);
    }

    #[test]
    fn test_rank_players_skips_players_without_the_stat() {
        let players = vec![TestDataBuilder::player("p1", "Scorer", "t1", 12.0)];
        assert!(rank_players(unlisted(players), StatCategory::Defense).is_empty());
    }

    #[test]
    fn test_listed_entries_rank_by_their_own_statistic() {
        // p1 leads steals, p2 leads blocks; both list steals first
        let candidates = vec![
            Candidate::listed(defender("p1", 2.5, 0.4), "blocks".to_string()),
            Candidate::listed(defender("p2", 1.1, 2.8), "blocks".to_string()),
        ];

        let ranked = rank_players(candidates, StatCategory::Defense);
        let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
    }

    #[test]
    fn test_unlisted_candidates_rank_by_first_statistic_in_category() {
        let candidates = unlisted(vec![defender("p1", 2.5, 0.4), defender("p2", 1.1, 2.8)]);

        let ranked = rank_players(candidates, StatCategory::Defense);
        let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_take_limit() {
        let ranking = vec![
            TestDataBuilder::player("p1", "One", "t1", 3.0),
            TestDataBuilder::player("p2", "Two", "t1", 2.0),
        ];
        assert_eq!(take_limit(ranking.clone(), 1).len(), 1);
        assert_eq!(take_limit(ranking.clone(), 5).len(), 2);
        assert!(take_limit(ranking, -1).is_empty());
    }
}
