//! NBA game outcome prediction from shot-chart data
//!
//! Scrapes shot locations from the NBA stats API, bins them into
//! court-grid occupancy features, and trains an SVM to predict wins.

pub mod data;
pub mod features;
pub mod training;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// Unique identifier for a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub i64);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team({})", self.0)
    }
}

/// Unique identifier for a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId(pub i64);

impl GameId {
    /// The zero-padded 10-character form the stats API expects
    pub fn padded(&self) -> String {
        format!("{:010}", self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game({})", self.0)
    }
}

/// An NBA season, identified by the year it begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season(pub u16);

impl fmt::Display for Season {
    /// Renders as the API's `AABB-CC` form, e.g. 2018 -> "2018-19"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.0, (self.0 + 1) % 100)
    }
}

/// Stage of an NBA season, with the exact strings the stats API uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonType {
    PreSeason,
    RegularSeason,
    Playoffs,
    AllStar,
}

impl SeasonType {
    pub fn as_param(&self) -> &'static str {
        match self {
            SeasonType::PreSeason => "Pre Season",
            SeasonType::RegularSeason => "Regular Season",
            SeasonType::Playoffs => "Playoffs",
            SeasonType::AllStar => "All Star",
        }
    }
}

impl FromStr for SeasonType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-', '_'], "").as_str() {
            "preseason" => Ok(SeasonType::PreSeason),
            "regularseason" | "regular" => Ok(SeasonType::RegularSeason),
            "playoffs" => Ok(SeasonType::Playoffs),
            "allstar" => Ok(SeasonType::AllStar),
            _ => Err(format!(
                "Unknown season type: {}. Use preseason, regular, playoffs, or allstar.",
                s
            )),
        }
    }
}

/// Category the league-leader board can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortCategory {
    MinutesPlayed,
    OffensiveRebounds,
    DefensiveRebounds,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
    Efficiency,
    Points,
}

impl SortCategory {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortCategory::MinutesPlayed => "MIN",
            SortCategory::OffensiveRebounds => "OREB",
            SortCategory::DefensiveRebounds => "DREB",
            SortCategory::Rebounds => "REB",
            SortCategory::Assists => "AST",
            SortCategory::Steals => "STL",
            SortCategory::Blocks => "BLK",
            SortCategory::Turnovers => "TOV",
            SortCategory::Efficiency => "EFF",
            SortCategory::Points => "PTS",
        }
    }
}

impl FromStr for SortCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MIN" => Ok(SortCategory::MinutesPlayed),
            "OREB" => Ok(SortCategory::OffensiveRebounds),
            "DREB" => Ok(SortCategory::DefensiveRebounds),
            "REB" => Ok(SortCategory::Rebounds),
            "AST" => Ok(SortCategory::Assists),
            "STL" => Ok(SortCategory::Steals),
            "BLK" => Ok(SortCategory::Blocks),
            "TOV" => Ok(SortCategory::Turnovers),
            "EFF" => Ok(SortCategory::Efficiency),
            "PTS" => Ok(SortCategory::Points),
            _ => Err(format!("Unknown sort category: {}", s)),
        }
    }
}

/// A single shot attempt from the shot-chart endpoint
///
/// Field names mirror the API's column headers so the CSV written by
/// `data fetch-shots` keeps the upstream schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotRecord {
    #[serde(rename = "GRID_TYPE")]
    pub grid_type: String,
    #[serde(rename = "GAME_ID")]
    pub game_id: GameId,
    #[serde(rename = "GAME_EVENT_ID")]
    pub game_event_id: i64,
    #[serde(rename = "PLAYER_ID")]
    pub player_id: PlayerId,
    #[serde(rename = "PLAYER_NAME")]
    pub player_name: String,
    #[serde(rename = "TEAM_ID")]
    pub team_id: TeamId,
    #[serde(rename = "TEAM_NAME")]
    pub team_name: String,
    #[serde(rename = "PERIOD")]
    pub period: u8,
    #[serde(rename = "MINUTES_REMAINING")]
    pub minutes_remaining: u8,
    #[serde(rename = "SECONDS_REMAINING")]
    pub seconds_remaining: u8,
    #[serde(rename = "EVENT_TYPE")]
    pub event_type: String,
    #[serde(rename = "ACTION_TYPE")]
    pub action_type: String,
    #[serde(rename = "SHOT_TYPE")]
    pub shot_type: String,
    #[serde(rename = "SHOT_ZONE_BASIC")]
    pub shot_zone_basic: String,
    #[serde(rename = "SHOT_ZONE_AREA")]
    pub shot_zone_area: String,
    #[serde(rename = "SHOT_ZONE_RANGE")]
    pub shot_zone_range: String,
    #[serde(rename = "SHOT_DISTANCE")]
    pub shot_distance: u32,
    #[serde(rename = "LOC_X")]
    pub loc_x: i32,
    #[serde(rename = "LOC_Y")]
    pub loc_y: i32,
    #[serde(rename = "SHOT_ATTEMPTED_FLAG")]
    pub shot_attempted: u8,
    #[serde(rename = "SHOT_MADE_FLAG")]
    pub shot_made: u8,
    #[serde(rename = "GAME_DATE")]
    pub game_date: String,
    #[serde(rename = "HTM")]
    pub htm: String,
    #[serde(rename = "VTM")]
    pub vtm: String,
}

impl ShotRecord {
    pub const TWO_POINT: &'static str = "2PT Field Goal";
    pub const THREE_POINT: &'static str = "3PT Field Goal";

    /// Court location as an (x, y) pair in tenths of feet
    pub fn location(&self) -> (i32, i32) {
        (self.loc_x, self.loc_y)
    }

    /// Parse the raw `GAME_DATE` column (`YYYYMMDD`)
    pub fn date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(&self.game_date, "%Y%m%d").ok()
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum HoopsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Stats API error: {0}")]
    Api(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No cached outcome for {0} - run `hoops data fetch-outcomes` first")]
    MissingOutcome(GameId),

    #[error("No games found for {0}")]
    NoGames(TeamId),

    #[error("Invalid partition: {0}")]
    InvalidSplit(String),

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HoopsError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub court: CourtConfig,
    pub training: TrainingConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Delay between consecutive requests during bulk fetches
    pub throttle_ms: u64,
}

/// Court geometry for the shot-to-feature transform
///
/// Coordinates are in tenths of feet. The shifts map the API's
/// basket-centered coordinates into matrix indices; `cell_*` is the
/// pooling block size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourtConfig {
    pub width: usize,
    pub length: usize,
    pub width_shift: i32,
    pub length_shift: i32,
    pub cell_width: usize,
    pub cell_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub test_size: f64,
    pub folds: usize,
    pub seed: Option<u64>,
    pub rbf_eps: f64,
    pub poly_degree: u32,
    pub poly_constant: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub shots_path: String,
    pub outcomes_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig {
                user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) \
                             AppleWebKit/537.36 (KHTML, like Gecko) \
                             Chrome/76.0.3809.132 Safari/537.36"
                    .to_string(),
                timeout_secs: 30,
                throttle_ms: 600,
            },
            court: CourtConfig {
                width: 500,
                length: 470,
                width_shift: 250,
                length_shift: 52,
                cell_width: 50,
                cell_length: 47,
            },
            training: TrainingConfig {
                test_size: 0.25,
                folds: 5,
                seed: None,
                rbf_eps: 80.0,
                poly_degree: 3,
                poly_constant: 1.0,
            },
            data: DataConfig {
                shots_path: "data/shots.csv".to_string(),
                outcomes_path: "data/outcomes.json".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HoopsError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| HoopsError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HoopsError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
