use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Basketball stats from the command line
///
/// Reads games, players, teams and league leaders through an in-memory cache,
/// a local snapshot store and either the stats REST API or a directory of
/// JSON fixtures.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Also print logs to stdout
    #[arg(long = "debug", global = true, help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List games, optionally only those on one day (YYYY-MM-DD, local time)
    Games {
        #[arg(long, short = 'd')]
        date: Option<String>,
    },
    /// Show one game with its box score
    Game { id: String },
    /// List all players
    Players,
    /// Show one player's profile and statistics
    Player { id: String },
    /// List all teams
    Teams,
    /// Show one team
    Team { id: String },
    /// List a team's players
    Roster { team_id: String },
    /// Teams ordered by win percentage
    Standings,
    /// Top players in a statistic category (scoring, rebounding, assists, defense,
    /// efficiency, shooting, turnovers)
    Leaders {
        category: String,
        #[arg(long, short = 'n')]
        limit: Option<i32>,
    },
    /// List favorite player ids
    Favorites,
    /// Mark a player as favorite
    FavoriteAdd { id: String },
    /// Remove a player from favorites
    FavoriteRemove { id: String },
    /// Show or update the configuration
    Config {
        /// List current configuration settings
        #[arg(long = "list", short = 'l')]
        list: bool,
        /// Set the REST API domain. An empty value switches to the fixture directory.
        #[arg(long = "api-domain", value_name = "API_DOMAIN")]
        api_domain: Option<String>,
        /// Set the JSON fixture directory
        #[arg(long = "data-dir", value_name = "PATH")]
        data_dir: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_games_with_date() {
        let args = Args::try_parse_from(["courtside", "games", "--date", "2026-06-01"]).unwrap();
        assert_eq!(
            args.command,
            Command::Games {
                date: Some("2026-06-01".to_string())
            }
        );
        assert!(!args.debug);
    }

    #[test]
    fn test_parse_leaders_with_limit_and_global_flags() {
        let args = Args::try_parse_from([
            "courtside",
            "leaders",
            "scoring",
            "-n",
            "5",
            "--debug",
            "--log-file",
            "/tmp/c.log",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            Command::Leaders {
                category: "scoring".to_string(),
                limit: Some(5)
            }
        );
        assert!(args.debug);
        assert_eq!(args.log_file.as_deref(), Some("/tmp/c.log"));
    }

    #[test]
    fn test_parse_kebab_case_subcommands() {
        let args = Args::try_parse_from(["courtside", "favorite-add", "p1"]).unwrap();
        assert_eq!(args.command, Command::FavoriteAdd { id: "p1".to_string() });

        let args = Args::try_parse_from(["courtside", "config", "--list"]).unwrap();
        assert!(matches!(args.command, Command::Config { list: true, .. }));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Args::try_parse_from(["courtside"]).is_err());
    }
}
