//! URL building utilities for API endpoints

use chrono::NaiveDate;

/// Builds the games URL, optionally narrowed to one day.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use courtside::data_fetcher::api::build_games_url;
///
/// let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
/// assert_eq!(
///     build_games_url("https://api.example.com", Some(date)),
///     "https://api.example.com/games?date=2026-06-01"
/// );
/// assert_eq!(build_games_url("https://api.example.com", None), "https://api.example.com/games");
/// ```
pub fn build_games_url(api_domain: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!("{api_domain}/games?date={}", date.format("%Y-%m-%d")),
        None => format!("{api_domain}/games"),
    }
}

pub fn build_game_url(api_domain: &str, game_id: &str) -> String {
    format!("{api_domain}/games/{game_id}")
}

pub fn build_box_score_url(api_domain: &str, game_id: &str) -> String {
    format!("{api_domain}/games/{game_id}/boxscore")
}

pub fn build_players_url(api_domain: &str) -> String {
    format!("{api_domain}/players")
}

pub fn build_player_url(api_domain: &str, player_id: &str) -> String {
    format!("{api_domain}/players/{player_id}")
}

pub fn build_teams_url(api_domain: &str) -> String {
    format!("{api_domain}/teams")
}

pub fn build_team_url(api_domain: &str, team_id: &str) -> String {
    format!("{api_domain}/teams/{team_id}")
}

pub fn build_team_roster_url(api_domain: &str, team_id: &str) -> String {
    format!("{api_domain}/teams/{team_id}/roster")
}

/// Builds the league leaders URL. The season is left out when unknown so the
/// API picks its current season.
///
/// # Example
/// ```
/// use courtside::data_fetcher::api::build_leaders_url;
///
/// assert_eq!(
///     build_leaders_url("https://api.example.com", Some(2026), "REG"),
///     "https://api.example.com/leaders?season=2026&type=REG"
/// );
/// assert_eq!(
///     build_leaders_url("https://api.example.com", None, "PST"),
///     "https://api.example.com/leaders?type=PST"
/// );
/// ```
pub fn build_leaders_url(api_domain: &str, season_year: Option<i32>, season_type: &str) -> String {
    match season_year {
        Some(year) => format!("{api_domain}/leaders?season={year}&type={season_type}"),
        None => format!("{api_domain}/leaders?type={season_type}"),
    }
}

pub fn build_standings_url(api_domain: &str) -> String {
    format!("{api_domain}/standings")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "https://api.example.com";

    #[test]
    fn test_entity_urls() {
        assert_eq!(build_game_url(DOMAIN, "g1"), "https://api.example.com/games/g1");
        assert_eq!(
            build_box_score_url(DOMAIN, "g1"),
            "https://api.example.com/games/g1/boxscore"
        );
        assert_eq!(build_players_url(DOMAIN), "https://api.example.com/players");
        assert_eq!(build_player_url(DOMAIN, "p1"), "https://api.example.com/players/p1");
        assert_eq!(build_teams_url(DOMAIN), "https://api.example.com/teams");
        assert_eq!(build_team_url(DOMAIN, "t1"), "https://api.example.com/teams/t1");
        assert_eq!(
            build_team_roster_url(DOMAIN, "t1"),
            "https://api.example.com/teams/t1/roster"
        );
        assert_eq!(build_standings_url(DOMAIN), "https://api.example.com/standings");
    }

    #[test]
    fn test_games_url_date_format() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(
            build_games_url(DOMAIN, Some(date)),
            "https://api.example.com/games?date=2026-01-05"
        );
    }
}
