use crate::cli::Command;
use crate::config::Config;
use crate::context::AppContext;
use crate::error::AppError;
use crate::models::{Game, Player, StatCategory, Team};
use chrono::{Local, NaiveDate};
use tracing::debug;

/// Parses a `--date` argument in YYYY-MM-DD format.
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        AppError::datetime_parse_error(format!("Invalid date '{value}', expected YYYY-MM-DD: {e}"))
    })
}

pub fn parse_category_arg(value: &str) -> Result<StatCategory, AppError> {
    StatCategory::parse(value).ok_or_else(|| {
        let known: Vec<&str> = StatCategory::ALL.iter().map(|c| c.as_str()).collect();
        AppError::config_error(format!(
            "Unknown statistic category '{value}'. Expected one of: {}",
            known.join(", ")
        ))
    })
}

/// Handles the `config` subcommand.
///
/// Updates are written to the config file first; `--list` then shows the
/// effective configuration.
pub async fn handle_config_command(
    list: bool,
    api_domain: Option<String>,
    data_dir: Option<String>,
) -> Result<(), AppError> {
    if api_domain.is_some() || data_dir.is_some() {
        let config_path = Config::get_config_path();
        let mut config = Config::load_from_path(&config_path)
            .await
            .unwrap_or_default();

        if let Some(api_domain) = api_domain {
            config.api_domain = api_domain;
        }
        if let Some(data_dir) = data_dir {
            config.data_dir = Some(data_dir);
        }

        config.validate()?;
        config.save().await?;
        println!("Config updated successfully!");
    }

    if list {
        Config::display().await?;
    }
    Ok(())
}

/// Runs a data command against the context and prints the result.
pub async fn handle_data_command(context: &AppContext, command: Command) -> Result<(), AppError> {
    debug!("Running {:?}", command);
    match command {
        Command::Games { date } => {
            let date = date.as_deref().map(parse_date_arg).transpose()?;
            let games = context.games.execute(date).await?;
            print!("{}", format_games(&games, date));
        }
        Command::Game { id } => {
            let game = context.games.execute_game(&id).await?;
            print!("{}", format_game_details(&game));
        }
        Command::Players => {
            let players = context.players.execute_all().await?;
            print!("{}", format_players(&players));
        }
        Command::Player { id } => {
            let player = context.players.execute(&id).await?;
            let favorite = context.favorites.contains(&id).await?;
            print!("{}", format_player_details(&player, favorite));
        }
        Command::Teams => {
            let teams = context.teams.execute_all().await?;
            print!("{}", format_teams(&teams));
        }
        Command::Team { id } => {
            let team = context.teams.execute(&id).await?;
            print!("{}", format_teams(std::slice::from_ref(&team)));
        }
        Command::Roster { team_id } => {
            let roster = context.teams.roster(&team_id).await?;
            print!("{}", format_players(&roster));
        }
        Command::Standings => {
            let standings = context.teams.standings().await?;
            print!("{}", format_standings(&standings));
        }
        Command::Leaders { category, limit } => {
            let category = parse_category_arg(&category)?;
            let leaders = context.leaders.execute(category, limit).await?;
            print!("{}", format_leaders(&leaders, category));
        }
        Command::Favorites => {
            let favorites = context.favorites.list().await?;
            if favorites.is_empty() {
                println!("No favorite players yet");
            }
            for id in favorites {
                println!("{id}");
            }
        }
        Command::FavoriteAdd { id } => {
            context.favorites.add(&id).await?;
            println!("Added {id} to favorites");
        }
        Command::FavoriteRemove { id } => {
            context.favorites.remove(&id).await?;
            println!("Removed {id} from favorites");
        }
        Command::Config { .. } => {
            return Err(AppError::config_error(
                "config is handled before the data sources are built",
            ));
        }
    }
    Ok(())
}

pub fn format_games(games: &[Game], date: Option<NaiveDate>) -> String {
    if games.is_empty() {
        return match date {
            Some(date) => format!("No games on {date}\n"),
            None => "No games\n".to_string(),
        };
    }

    games
        .iter()
        .map(|game| {
            format!(
                "{:<10} {} {:>5} vs {:<5} {:>9}  {}\n",
                game.id,
                game.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                game.home_team.abbreviation,
                game.away_team.abbreviation,
                game.score_display(),
                game.status
            )
        })
        .collect()
}

pub fn format_game_details(game: &Game) -> String {
    let mut out = format!(
        "{} vs {} ({})\n{}\n",
        game.home_team.full_name(),
        game.away_team.full_name(),
        game.status,
        game.date.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    if let Some(venue) = &game.venue {
        out.push_str(&format!("Venue: {venue}\n"));
    }
    if let Some(network) = &game.broadcast_network {
        out.push_str(&format!("Broadcast: {network}\n"));
    }

    let Some(box_score) = &game.box_score else {
        out.push_str("Score: TBD\n");
        return out;
    };
    out.push_str(&format!("Score: {}\n", game.score_display()));
    if let Some(winner) = game.winning_team() {
        out.push_str(&format!("Winner: {}\n", winner.name));
    }
    if let Some(quarters) = &box_score.quarters {
        let line: Vec<String> = quarters
            .iter()
            .map(|q| format!("{} {}-{}", q.display_name(), q.home_score, q.away_score))
            .collect();
        out.push_str(&format!("{}\n", line.join("  ")));
    }
    out.push_str(&format!(
        "Rebounds {}-{}  Assists {}-{}  FG% {} / {}\n",
        box_score.home_stats.rebounds,
        box_score.away_stats.rebounds,
        box_score.home_stats.assists,
        box_score.away_stats.assists,
        box_score.home_stats.formatted_field_goal_percentage(),
        box_score.away_stats.formatted_field_goal_percentage()
    ));
    out
}

pub fn format_players(players: &[Player]) -> String {
    if players.is_empty() {
        return "No players\n".to_string();
    }
    players
        .iter()
        .map(|player| {
            format!(
                "{:<10} {:<28} {:<4} {:<5} {:>5.1} PPG\n",
                player.id,
                player.display_name(),
                player.position_abbreviation(),
                player.team.abbreviation,
                player.points_per_game()
            )
        })
        .collect()
}

pub fn format_player_details(player: &Player, favorite: bool) -> String {
    let star = if favorite { " *" } else { "" };
    let mut out = format!(
        "{}{}\n{} - {}\n",
        player.display_name(),
        star,
        player.position,
        player.team.full_name()
    );
    for stat in &player.statistics {
        out.push_str(&format!(
            "  {:<24} {:>10}  ({})\n",
            stat.name,
            stat.formatted_value(),
            stat.category.display_name()
        ));
    }
    out
}

pub fn format_teams(teams: &[Team]) -> String {
    if teams.is_empty() {
        return "No teams\n".to_string();
    }
    teams
        .iter()
        .map(|team| {
            let conference = team
                .conference
                .map_or("", |conference| conference.abbreviation());
            format!(
                "{:<10} {:<5} {:<28} {}\n",
                team.id,
                team.abbreviation,
                team.full_name(),
                conference
            )
        })
        .collect()
}

pub fn format_standings(teams: &[Team]) -> String {
    teams
        .iter()
        .enumerate()
        .map(|(index, team)| {
            format!(
                "{:>2}. {:<28} {:>7} {:>6}\n",
                index + 1,
                team.full_name(),
                team.record().unwrap_or_else(|| "-".to_string()),
                team.formatted_win_percentage()
                    .unwrap_or_else(|| "-".to_string())
            )
        })
        .collect()
}

pub fn format_leaders(players: &[Player], category: StatCategory) -> String {
    let mut out = format!("{} leaders\n", category.display_name());
    for (index, player) in players.iter().enumerate() {
        let value = player
            .statistic(category)
            .map_or_else(|| "-".to_string(), |stat| stat.formatted_value());
        out.push_str(&format!(
            "{:>2}. {:<28} {:<5} {:>10}\n",
            index + 1,
            player.name,
            player.team.abbreviation,
            value
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameStatus;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date_arg("2026-06-01").unwrap(),
            TestDataBuilder::date(2026, 6, 1)
        );
        assert!(matches!(
            parse_date_arg("06/01/2026"),
            Err(AppError::DateTimeParse(_))
        ));
    }

    #[test]
    fn test_parse_category_arg() {
        assert_eq!(parse_category_arg("Scoring").unwrap(), StatCategory::Scoring);
        let error = parse_category_arg("dunks").unwrap_err();
        assert!(error.to_string().contains("scoring"));
    }

    #[test]
    fn test_format_games_empty() {
        let date = TestDataBuilder::date(2026, 6, 1);
        assert_eq!(format_games(&[], Some(date)), "No games on 2026-06-01\n");
        assert_eq!(format_games(&[], None), "No games\n");
    }

    #[test]
    fn test_format_game_details_with_box_score() {
        let mut game = TestDataBuilder::game("g1", GameStatus::Finished, "2026-06-01T19:00:00Z");
        game.box_score = Some(TestDataBuilder::box_score(90, 85));

        let text = format_game_details(&game);
        assert!(text.contains("Score: 90 - 85"));
        assert!(text.contains("Winner: Home"));
        assert!(text.contains("Final"));
    }

    #[test]
    fn test_format_leaders_ranks_from_one() {
        let players = vec![
            TestDataBuilder::player("p1", "First", "t1", 30.0),
            TestDataBuilder::player("p2", "Second", "t1", 25.5),
        ];
        let text = format_leaders(&players, StatCategory::Scoring);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with(" 1. First"));
        assert!(lines[2].contains("25.5 PTS"));
    }

    #[test]
    fn test_format_player_details_marks_favorites() {
        let player = TestDataBuilder::player("p1", "Star", "t1", 20.0);
        assert!(format_player_details(&player, true).starts_with("Star *"));
        assert!(format_player_details(&player, false).starts_with("Star\n"));
    }
}
