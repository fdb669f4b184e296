use std::fmt;

/// A single statistic line for a player, e.g. points per game for a season
#[derive(Debug, Clone, PartialEq)]
pub struct Statistic {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub category: StatCategory,
    pub unit: Option<StatUnit>,
    pub season: Option<String>,
    pub games_played: Option<u32>,
}

impl Statistic {
    /// Value rendered with one decimal unless it is whole, followed by the unit symbol
    pub fn formatted_value(&self) -> String {
        let number = if self.value.fract() == 0.0 {
            format!("{:.0}", self.value)
        } else {
            format!("{:.1}", self.value)
        };

        match self.unit {
            Some(unit) => format!("{number} {}", unit.symbol()),
            None => number,
        }
    }

    /// Per-game average when the games-played count is known and nonzero
    pub fn per_game_average(&self) -> Option<f64> {
        match self.games_played {
            Some(games) if games > 0 => Some(self.value / f64::from(games)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    Scoring,
    Rebounding,
    Assists,
    Defense,
    Efficiency,
    Shooting,
    Turnovers,
}

impl StatCategory {
    pub const ALL: [StatCategory; 7] = [
        StatCategory::Scoring,
        StatCategory::Rebounding,
        StatCategory::Assists,
        StatCategory::Defense,
        StatCategory::Efficiency,
        StatCategory::Shooting,
        StatCategory::Turnovers,
    ];

    /// Wire name, also used to build cache keys
    pub fn as_str(&self) -> &'static str {
        match self {
            StatCategory::Scoring => "scoring",
            StatCategory::Rebounding => "rebounding",
            StatCategory::Assists => "assists",
            StatCategory::Defense => "defense",
            StatCategory::Efficiency => "efficiency",
            StatCategory::Shooting => "shooting",
            StatCategory::Turnovers => "turnovers",
        }
    }

    /// Parses the wire name case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StatCategory::Scoring => "Scoring",
            StatCategory::Rebounding => "Rebounding",
            StatCategory::Assists => "Assists",
            StatCategory::Defense => "Defense",
            StatCategory::Efficiency => "Efficiency",
            StatCategory::Shooting => "Shooting",
            StatCategory::Turnovers => "Turnovers",
        }
    }

    /// Category name used by league data providers
    pub fn api_category(&self) -> &'static str {
        match self {
            StatCategory::Scoring => "points",
            StatCategory::Rebounding => "rebounds",
            StatCategory::Assists => "assists",
            StatCategory::Defense => "steals",
            StatCategory::Efficiency => "efficiency",
            StatCategory::Shooting => "field_goal_percentage",
            StatCategory::Turnovers => "turnovers",
        }
    }

    /// Maps an exact provider category name back to a domain category
    pub fn from_api_category(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "points" | "point" => Some(StatCategory::Scoring),
            "rebounds" | "rebound" => Some(StatCategory::Rebounding),
            "assists" | "assist" => Some(StatCategory::Assists),
            "steals" | "steal" => Some(StatCategory::Defense),
            "efficiency" => Some(StatCategory::Efficiency),
            "field_goal_percentage" | "field_goal_pct" | "fg_percentage" | "fg_pct" => {
                Some(StatCategory::Shooting)
            }
            "turnovers" | "turnover" => Some(StatCategory::Turnovers),
            _ => None,
        }
    }

    /// Loose match used when filtering league leader entries.
    ///
    /// Providers report many sub-categories (`offensive_rebounds`, `blocks`,
    /// `three_points_pct`...), so each domain category accepts a family of names.
    pub fn matches_api_category(&self, value: &str) -> bool {
        let entry = value.to_ascii_lowercase();
        if entry == self.api_category() {
            return true;
        }

        match self {
            StatCategory::Scoring => entry == "points" || entry == "point",
            StatCategory::Rebounding => entry.contains("rebound"),
            StatCategory::Assists => entry.contains("assist"),
            StatCategory::Defense => {
                entry.contains("steal") || (entry.contains("block") && !entry.contains("blocked_att"))
            }
            StatCategory::Shooting => entry.contains("pct") || entry.contains("percentage"),
            StatCategory::Efficiency => entry.contains("efficiency"),
            StatCategory::Turnovers => entry.contains("turnover"),
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatUnit {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    Percentage,
    Minutes,
    Games,
}

impl StatUnit {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "points" => Some(StatUnit::Points),
            "rebounds" => Some(StatUnit::Rebounds),
            "assists" => Some(StatUnit::Assists),
            "steals" => Some(StatUnit::Steals),
            "blocks" => Some(StatUnit::Blocks),
            "percentage" => Some(StatUnit::Percentage),
            "minutes" => Some(StatUnit::Minutes),
            "games" => Some(StatUnit::Games),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            StatUnit::Points => "PTS",
            StatUnit::Rebounds => "REB",
            StatUnit::Assists => "AST",
            StatUnit::Steals => "STL",
            StatUnit::Blocks => "BLK",
            StatUnit::Percentage => "%",
            StatUnit::Minutes => "MIN",
            StatUnit::Games => "GP",
        }
    }
}
