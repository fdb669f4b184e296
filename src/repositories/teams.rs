use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::TeamRepository;
use super::shared::{CachePolicy, decode_snapshot, fresh_from_cache, keys, store, store_collection};
use crate::data_fetcher::cache::CacheService;
use crate::data_fetcher::dto::{PlayerDto, TeamDto, decode_collection, decode_one};
use crate::data_fetcher::sources::{EntityKind, LocalStore, RemoteSources};
use crate::error::AppError;
use crate::models::{Player, Team};

pub struct CachingTeamRepository {
    remote: RemoteSources,
    local: LocalStore,
    cache: Arc<dyn CacheService>,
    policy: CachePolicy,
}

impl CachingTeamRepository {
    pub fn new(remote: RemoteSources, local: LocalStore, cache: Arc<dyn CacheService>) -> Self {
        Self {
            remote,
            local,
            cache,
            policy: CachePolicy::teams(),
        }
    }

    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn local_teams(&self) -> Option<Vec<Team>> {
        let local = self.local.load(EntityKind::Teams);
        decode_snapshot("teams", local, decode_collection::<TeamDto>)
    }

    fn local_roster(&self, team_id: &str) -> Option<Vec<Player>> {
        let local = self.local.load(EntityKind::Players);
        let players = decode_snapshot("players", local, decode_collection::<PlayerDto>)?;
        let roster = players_on_team(players, team_id);
        (!roster.is_empty()).then_some(roster)
    }

    /// Downloads, persists and caches the full team collection
    async fn fetch_remote_teams(&self) -> Result<Vec<Team>, AppError> {
        info!("Fetching teams from remote source");
        let bytes = self
            .remote
            .core
            .fetch_teams()
            .await
            .inspect_err(|e| error!("Failed to fetch teams: {}", e))?;
        let teams = decode_collection::<TeamDto>(&bytes)?;

        self.local.persist(EntityKind::Teams, &bytes);
        store_collection(self.cache.as_ref(), keys::TEAMS, &teams, &self.policy).await;
        Ok(teams)
    }

    async fn fetch_remote_team(&self, id: &str) -> Result<Team, AppError> {
        if let Some(profiles) = &self.remote.team_profiles {
            info!("Fetching team profile {} from remote source", id);
            let bytes = profiles
                .fetch_team_profile(id)
                .await
                .inspect_err(|e| error!("Failed to fetch team {}: {}", id, e))?;
            return decode_one::<TeamDto>(&bytes);
        }

        debug!("No team profile capability, filtering the full collection");
        self.fetch_remote_teams()
            .await?
            .into_iter()
            .find(|team| team.id == id)
            .ok_or_else(|| AppError::entity_not_found("team", id))
    }

    async fn fetch_remote_roster(&self, team_id: &str) -> Result<Vec<Player>, AppError> {
        if let Some(profiles) = &self.remote.team_profiles {
            info!("Fetching roster for team {} from remote source", team_id);
            let bytes = profiles
                .fetch_team_roster(team_id)
                .await
                .inspect_err(|e| error!("Failed to fetch roster for {}: {}", team_id, e))?;
            return decode_collection::<PlayerDto>(&bytes);
        }

        debug!("No roster capability, filtering the player collection");
        let bytes = self
            .remote
            .core
            .fetch_players()
            .await
            .inspect_err(|e| error!("Failed to fetch players: {}", e))?;
        let players = decode_collection::<PlayerDto>(&bytes)?;
        self.local.persist(EntityKind::Players, &bytes);
        Ok(players_on_team(players, team_id))
    }

    /// Standings payloads are a subset of the team records, so they are never
    /// written to the teams snapshot.
    async fn fetch_remote_standings(&self) -> Result<Vec<Team>, AppError> {
        let Some(league) = &self.remote.league else {
            debug!("No standings capability, using the team collection");
            return self.fetch_remote_teams().await;
        };

        info!("Fetching standings from remote source");
        let bytes = league
            .fetch_standings()
            .await
            .inspect_err(|e| error!("Failed to fetch standings: {}", e))?;
        decode_collection::<TeamDto>(&bytes)
    }
}

fn players_on_team(players: Vec<Player>, team_id: &str) -> Vec<Player> {
    players
        .into_iter()
        .filter(|player| player.team.id == team_id)
        .collect()
}

/// Orders teams by win percentage (unknown last), then wins. Equal teams
/// keep their input order.
pub(crate) fn sort_standings(mut teams: Vec<Team>) -> Vec<Team> {
    teams.sort_by(|a, b| {
        let by_percentage = match (a.win_percentage, b.win_percentage) {
            (Some(a_pct), Some(b_pct)) => b_pct.total_cmp(&a_pct),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_percentage.then_with(|| b.wins.unwrap_or(0).cmp(&a.wins.unwrap_or(0)))
    });
    teams
}

#[async_trait]
impl TeamRepository for CachingTeamRepository {
    #[instrument(skip(self))]
    async fn get_teams(&self) -> Result<Vec<Team>, AppError> {
        let cache = self.cache.as_ref();

        if let Some(teams) = fresh_from_cache::<Vec<Team>>(cache, keys::TEAMS, &self.policy).await {
            return Ok(teams);
        }

        if let Some(teams) = self.local_teams() {
            info!("Serving {} teams from local snapshot", teams.len());
            store_collection(cache, keys::TEAMS, &teams, &self.policy).await;
            return Ok(teams);
        }

        self.fetch_remote_teams().await
    }

    #[instrument(skip(self))]
    async fn get_team(&self, id: &str) -> Result<Team, AppError> {
        let key = keys::team(id);
        let cache = self.cache.as_ref();

        if let Some(team) = fresh_from_cache::<Team>(cache, &key, &self.policy).await {
            return Ok(team);
        }

        let local = self
            .local_teams()
            .and_then(|teams| teams.into_iter().find(|team| team.id == id));
        if let Some(team) = local {
            info!("Serving team {} from local snapshot", id);
            store(cache, &key, team.clone(), &self.policy).await;
            return Ok(team);
        }

        let team = self.fetch_remote_team(id).await?;
        store(cache, &key, team.clone(), &self.policy).await;
        Ok(team)
    }

    #[instrument(skip(self))]
    async fn get_team_roster(&self, team_id: &str) -> Result<Vec<Player>, AppError> {
        let key = keys::roster(team_id);
        let cache = self.cache.as_ref();

        if let Some(roster) = fresh_from_cache::<Vec<Player>>(cache, &key, &self.policy).await {
            return Ok(roster);
        }

        if let Some(roster) = self.local_roster(team_id) {
            info!("Serving roster for team {} from local snapshot", team_id);
            store_collection(cache, &key, &roster, &self.policy).await;
            return Ok(roster);
        }

        let roster = self.fetch_remote_roster(team_id).await?;
        store_collection(cache, &key, &roster, &self.policy).await;
        Ok(roster)
    }

    #[instrument(skip(self))]
    async fn get_standings(&self) -> Result<Vec<Team>, AppError> {
        let cache = self.cache.as_ref();

        if let Some(standings) =
            fresh_from_cache::<Vec<Team>>(cache, keys::STANDINGS, &self.policy).await
        {
            return Ok(standings);
        }

        // The teams snapshot only stands in for standings when the remote
        // side would answer with the team collection too
        let local = match self.remote.league {
            Some(_) => None,
            None => self.local_teams(),
        };
        let standings = match local {
            Some(teams) => {
                info!("Computing standings from local snapshot");
                teams
            }
            None => self.fetch_remote_standings().await?,
        };

        let standings = sort_standings(standings);
        store_collection(cache, keys::STANDINGS, &standings, &self.policy).await;
        Ok(standings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    fn team(id: &str, pct: Option<f64>, wins: Option<u32>) -> Team {
        Team {
            win_percentage: pct,
            wins,
            ..TestDataBuilder::team(id, id)
        }
    }

    #[test]
    fn test_sort_standings() {
        let sorted = sort_standings(vec![
            team("unknown", None, Some(30)),
            team("mid", Some(0.5), Some(20)),
            team("top", Some(0.75), Some(30)),
            team("mid-more-wins", Some(0.5), Some(22)),
            team("mid-tie", Some(0.5), Some(20)),
        ]);

        let ids: Vec<&str> = sorted.iter().map(|team| team.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "mid-more-wins", "mid", "mid-tie", "unknown"]);
    }

    #[test]
    fn test_players_on_team() {
        let players = vec![
            TestDataBuilder::player("p1", "One", "t1", 10.0),
            TestDataBuilder::player("p2", "Two", "t2", 10.0),
            TestDataBuilder::player("p3", "Three", "t1", 10.0),
        ];
        let roster = players_on_team(players, "t1");
        let ids: Vec<&str> = roster.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }
}
