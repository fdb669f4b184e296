use std::fmt;

use chrono::{DateTime, Local, NaiveDate, Utc};

use super::box_score::BoxScore;
use super::team::Team;

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: String,
    pub home_team: Team,
    pub away_team: Team,
    pub date: DateTime<Utc>,
    pub status: GameStatus,
    pub box_score: Option<BoxScore>,
    pub venue: Option<String>,
    pub league: Option<String>,
    pub broadcast_network: Option<String>,
    pub time_zone: Option<String>,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status == GameStatus::Live
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Live and finished games are expected to carry a box score
    pub fn needs_box_score(&self) -> bool {
        self.box_score.is_none() && (self.is_live() || self.is_finished())
    }

    /// Winner of a finished game. A tie resolves to the away team.
    pub fn winning_team(&self) -> Option<&Team> {
        let box_score = self.finished_box_score()?;
        if box_score.home_score > box_score.away_score {
            Some(&self.home_team)
        } else {
            Some(&self.away_team)
        }
    }

    pub fn losing_team(&self) -> Option<&Team> {
        let box_score = self.finished_box_score()?;
        if box_score.home_score < box_score.away_score {
            Some(&self.home_team)
        } else {
            Some(&self.away_team)
        }
    }

    /// "home - away", or "TBD" before a box score exists
    pub fn score_display(&self) -> String {
        match &self.box_score {
            Some(box_score) => format!("{} - {}", box_score.home_score, box_score.away_score),
            None => "TBD".to_string(),
        }
    }

    /// Calendar day of the tip-off in the local time zone
    pub fn local_date(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }

    fn finished_box_score(&self) -> Option<&BoxScore> {
        if self.is_finished() {
            self.box_score.as_ref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Scheduled,
    Live,
    Finished,
    Postponed,
    Cancelled,
}

impl GameStatus {
    /// Parses a wire status, ignoring case
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "scheduled" => Some(GameStatus::Scheduled),
            "live" => Some(GameStatus::Live),
            "finished" => Some(GameStatus::Finished),
            "postponed" => Some(GameStatus::Postponed),
            "cancelled" => Some(GameStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Scheduled => "scheduled",
            GameStatus::Live => "live",
            GameStatus::Finished => "finished",
            GameStatus::Postponed => "postponed",
            GameStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GameStatus::Scheduled => "Scheduled",
            GameStatus::Live => "Live",
            GameStatus::Finished => "Final",
            GameStatus::Postponed => "Postponed",
            GameStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_status_flags() {
        let live = TestDataBuilder::game("g1", GameStatus::Live, "2026-06-01T19:00:00Z");
        assert!(live.is_live());
        assert!(!live.is_finished());
        assert!(live.needs_box_score());

        let scheduled = TestDataBuilder::game("g2", GameStatus::Scheduled, "2026-06-01T19:00:00Z");
        assert!(!scheduled.needs_box_score());
    }

    #[test]
    fn test_winner_and_loser_only_for_finished_games() {
        let mut game = TestDataBuilder::game("g1", GameStatus::Finished, "2026-06-01T19:00:00Z");
        game.box_score = Some(TestDataBuilder::box_score(88, 80));

        assert_eq!(game.winning_team().map(|t| t.id.as_str()), Some("home"));
        assert_eq!(game.losing_team().map(|t| t.id.as_str()), Some("away"));
        assert_eq!(game.score_display(), "88 - 80");

        game.status = GameStatus::Live;
        assert!(game.winning_team().is_none());
        assert!(game.losing_team().is_none());
    }

    #[test]
    fn test_score_display_without_box_score() {
        let game = TestDataBuilder::game("g1", GameStatus::Scheduled, "2026-06-01T19:00:00Z");
        assert_eq!(game.score_display(), "TBD");
    }

    #[test]
    fn test_status_parse_ignores_case() {
        assert_eq!(GameStatus::parse("LIVE"), Some(GameStatus::Live));
        assert_eq!(GameStatus::parse("Finished"), Some(GameStatus::Finished));
        assert_eq!(GameStatus::parse("halftime"), None);
        assert_eq!(GameStatus::Finished.to_string(), "Final");
    }
}
