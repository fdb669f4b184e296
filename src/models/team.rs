#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub logo_url: Option<String>,
    pub city: Option<String>,
    pub conference: Option<Conference>,
    pub division: Option<String>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub win_percentage: Option<f64>,
}

impl Team {
    /// City and name, e.g. "Las Vegas Aces"
    pub fn full_name(&self) -> String {
        match &self.city {
            Some(city) => format!("{city} {}", self.name),
            None => self.name.clone(),
        }
    }

    /// Win-loss record such as "24-16", only when both counts are known
    pub fn record(&self) -> Option<String> {
        match (self.wins, self.losses) {
            (Some(wins), Some(losses)) => Some(format!("{wins}-{losses}")),
            _ => None,
        }
    }

    pub fn formatted_win_percentage(&self) -> Option<String> {
        self.win_percentage.map(|pct| format!("{pct:.3}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conference {
    Eastern,
    Western,
}

impl Conference {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Eastern" => Some(Conference::Eastern),
            "Western" => Some(Conference::Western),
            _ => None,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Conference::Eastern => "EAST",
            Conference::Western => "WEST",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Team {
        Team {
            id: "t1".to_string(),
            name: "Aces".to_string(),
            abbreviation: "LVA".to_string(),
            logo_url: None,
            city: Some("Las Vegas".to_string()),
            conference: Some(Conference::Western),
            division: None,
            wins: Some(24),
            losses: Some(16),
            win_percentage: Some(0.6),
        }
    }

    #[test]
    fn test_full_name_and_record() {
        let team = team();
        assert_eq!(team.full_name(), "Las Vegas Aces");
        assert_eq!(team.record().as_deref(), Some("24-16"));
        assert_eq!(team.formatted_win_percentage().as_deref(), Some("0.600"));
    }

    #[test]
    fn test_record_requires_both_counts() {
        let team = Team {
            city: None,
            losses: None,
            ..team()
        };
        assert_eq!(team.full_name(), "Aces");
        assert_eq!(team.record(), None);
    }

    #[test]
    fn test_conference_parse_is_exact() {
        assert_eq!(Conference::parse("Eastern"), Some(Conference::Eastern));
        assert_eq!(Conference::parse("eastern"), None);
        assert_eq!(Conference::Western.abbreviation(), "WEST");
    }
}
