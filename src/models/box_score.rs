use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct BoxScore {
    pub home_score: i32,
    pub away_score: i32,
    pub home_stats: TeamStats,
    pub away_stats: TeamStats,
    pub quarters: Option<Vec<QuarterScore>>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl BoxScore {
    pub fn point_difference(&self) -> i32 {
        (self.home_score - self.away_score).abs()
    }

    /// A game decided by five points or fewer
    pub fn was_close_game(&self) -> bool {
        self.point_difference() <= 5
    }

    pub fn leading_score(&self) -> i32 {
        self.home_score.max(self.away_score)
    }

    pub fn trailing_score(&self) -> i32 {
        self.home_score.min(self.away_score)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamStats {
    pub points: i32,
    pub rebounds: i32,
    pub assists: i32,
    pub steals: Option<i32>,
    pub blocks: Option<i32>,
    pub turnovers: Option<i32>,
    pub field_goal_percentage: Option<f64>,
    pub three_point_percentage: Option<f64>,
    pub free_throw_percentage: Option<f64>,
    pub fouls: Option<i32>,
}

impl TeamStats {
    pub fn formatted_field_goal_percentage(&self) -> String {
        format_percentage(self.field_goal_percentage)
    }

    pub fn formatted_three_point_percentage(&self) -> String {
        format_percentage(self.three_point_percentage)
    }
}

fn format_percentage(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |pct| format!("{pct:.1}%"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuarterScore {
    /// Period identifier such as "Q1" or "OT1"
    pub id: String,
    pub home_score: i32,
    pub away_score: i32,
    pub quarter_number: u32,
}

impl QuarterScore {
    /// "Q1".."Q4", then "OT1", "OT2"...
    pub fn display_name(&self) -> String {
        if self.quarter_number <= 4 {
            format!("Q{}", self.quarter_number)
        } else {
            format!("OT{}", self.quarter_number - 4)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_point_difference_and_close_game() {
        let close = TestDataBuilder::box_score(78, 75);
        assert_eq!(close.point_difference(), 3);
        assert!(close.was_close_game());
        assert_eq!(close.leading_score(), 78);
        assert_eq!(close.trailing_score(), 75);

        let blowout = TestDataBuilder::box_score(60, 92);
        assert_eq!(blowout.point_difference(), 32);
        assert!(!blowout.was_close_game());
    }

    #[test]
    fn test_quarter_display_name() {
        let quarter = |number| QuarterScore {
            id: String::new(),
            home_score: 0,
            away_score: 0,
            quarter_number: number,
        };
        assert_eq!(quarter(1).display_name(), "Q1");
        assert_eq!(quarter(4).display_name(), "Q4");
        assert_eq!(quarter(5).display_name(), "OT1");
        assert_eq!(quarter(6).display_name(), "OT2");
    }

    #[test]
    fn test_formatted_percentages() {
        let mut stats = TestDataBuilder::box_score(80, 70).home_stats;
        stats.field_goal_percentage = Some(45.25);
        stats.three_point_percentage = None;
        assert_eq!(stats.formatted_field_goal_percentage(), "45.2%");
        assert_eq!(stats.formatted_three_point_percentage(), "N/A");
    }
}
