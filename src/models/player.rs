use super::statistic::{StatCategory, Statistic};
use super::team::Team;

/// A player with the team embedded by value and the season statistics
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub team: Team,
    pub position: String,
    pub statistics: Vec<Statistic>,
    pub jersey_number: Option<u32>,
    pub height: Option<String>,
    pub weight: Option<u32>,
    pub age: Option<u32>,
    pub college: Option<String>,
    pub photo_url: Option<String>,
}

impl Player {
    /// Name prefixed with the jersey number when known, e.g. "#22 A'ja Wilson"
    pub fn display_name(&self) -> String {
        match self.jersey_number {
            Some(number) => format!("#{number} {}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn position_abbreviation(&self) -> String {
        match self.position.to_ascii_lowercase().as_str() {
            "point guard" | "pg" => "PG".to_string(),
            "shooting guard" | "sg" => "SG".to_string(),
            "small forward" | "sf" => "SF".to_string(),
            "power forward" | "pf" => "PF".to_string(),
            "center" | "c" => "C".to_string(),
            _ => self.position.to_uppercase(),
        }
    }

    /// First statistic in the given category, in the order the source listed them
    pub fn statistic(&self, category: StatCategory) -> Option<&Statistic> {
        self.statistics
            .iter()
            .find(|stat| stat.category == category)
    }

    /// The statistic a league data provider means by `api_category` (such as
    /// `"blocks"` within defense). Falls back to the first statistic in
    /// `category` when no id or name matches.
    pub fn statistic_for_api_category(
        &self,
        category: StatCategory,
        api_category: &str,
    ) -> Option<&Statistic> {
        let wanted = api_category.to_ascii_lowercase();
        let stem = wanted.strip_suffix('s').unwrap_or(&wanted);
        self.statistics
            .iter()
            .filter(|stat| stat.category == category)
            .find(|stat| {
                let name = stat.name.to_ascii_lowercase().replace(' ', "_");
                name.contains(stem) || stat.id.to_ascii_lowercase().contains(stem)
            })
            .or_else(|| self.statistic(category))
    }

    pub fn statistic_named(&self, name: &str) -> Option<&Statistic> {
        self.statistics
            .iter()
            .find(|stat| stat.name.eq_ignore_ascii_case(name))
    }

    pub fn points_per_game(&self) -> f64 {
        self.statistic(StatCategory::Scoring)
            .map_or(0.0, |stat| stat.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_display_name_with_and_without_jersey() {
        let mut player = TestDataBuilder::player("p1", "A'ja Wilson", "t1", 22.5);
        player.jersey_number = Some(22);
        assert_eq!(player.display_name(), "#22 A'ja Wilson");

        player.jersey_number = None;
        assert_eq!(player.display_name(), "A'ja Wilson");
    }

    #[test]
    fn test_position_abbreviation() {
        let mut player = TestDataBuilder::player("p1", "Test", "t1", 1.0);
        player.position = "Point Guard".to_string();
        assert_eq!(player.position_abbreviation(), "PG");
        player.position = "wing".to_string();
        assert_eq!(player.position_abbreviation(), "WING");
    }

    #[test]
    fn test_statistic_lookup() {
        let player = TestDataBuilder::player("p1", "Test", "t1", 19.5);
        assert_eq!(player.points_per_game(), 19.5);
        assert!(player.statistic(StatCategory::Scoring).is_some());
        assert!(player.statistic(StatCategory::Turnovers).is_none());
        assert!(player.statistic_named("points per game").is_some());
    }

    #[test]
    fn test_statistic_for_api_category_prefers_matching_name() {
        let mut player = TestDataBuilder::player("p1", "Test", "t1", 10.0);
        for (name, value) in [("Steals Per Game", 1.5), ("Blocks Per Game", 2.25)] {
            player.statistics.push(Statistic {
                id: format!("p1-{}", name.len()),
                name: name.to_string(),
                value,
                category: StatCategory::Defense,
                unit: None,
                season: None,
                games_played: None,
            });
        }

        let blocks = player.statistic_for_api_category(StatCategory::Defense, "blocks");
        assert_eq!(blocks.map(|stat| stat.value), Some(2.25));
        let unknown = player.statistic_for_api_category(StatCategory::Defense, "deflections");
        assert_eq!(unknown.map(|stat| stat.value), Some(1.5));
        assert!(
            player
                .statistic_for_api_category(StatCategory::Rebounding, "rebounds")
                .is_none()
        );
    }
}
