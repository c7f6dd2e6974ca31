//! Shot-chart endpoint (`shotchartdetail`)
//!
//! Returns every field-goal attempt matching the filters, one row per shot
//! with court coordinates in tenths of feet.

use super::{Row, StatsClient};
use crate::{GameId, PlayerId, Result, Season, SeasonType, ShotRecord, TeamId};

/// Query parameters for a shot-chart request
///
/// The endpoint requires the full parameter dictionary even when most
/// filters are inactive; `query` emits every key with its default.
#[derive(Debug, Clone)]
pub struct ShotChartRequest {
    pub player_id: PlayerId,
    pub season: Season,
    pub season_type: SeasonType,
    pub context_measure: String,
    pub game_id: Option<GameId>,
    pub team_id: TeamId,
    pub opponent_team_id: TeamId,
    pub period: u32,
    pub month: u32,
    pub last_n_games: u32,
    pub location: String,
    pub outcome: String,
    pub season_segment: String,
    pub game_segment: String,
    pub date_from: String,
    pub date_to: String,
    pub vs_conference: String,
    pub vs_division: String,
    pub player_position: String,
    pub position: String,
    pub rookie_year: String,
}

impl ShotChartRequest {
    pub fn new(player_id: PlayerId, season: Season, season_type: SeasonType) -> Self {
        ShotChartRequest {
            player_id,
            season,
            season_type,
            context_measure: "FGA".to_string(),
            game_id: None,
            team_id: TeamId(0),
            opponent_team_id: TeamId(0),
            period: 0,
            month: 0,
            last_n_games: 0,
            location: String::new(),
            outcome: String::new(),
            season_segment: String::new(),
            game_segment: String::new(),
            date_from: String::new(),
            date_to: String::new(),
            vs_conference: String::new(),
            vs_division: String::new(),
            player_position: String::new(),
            position: String::new(),
            rookie_year: String::new(),
        }
    }

    /// Restrict to a single game
    pub fn with_game(mut self, game_id: GameId) -> Self {
        self.game_id = Some(game_id);
        self
    }

    /// Restrict to shots taken for a specific team
    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = team_id;
        self
    }

    /// Restrict to shots against a specific opponent
    pub fn with_opponent(mut self, team_id: TeamId) -> Self {
        self.opponent_team_id = team_id;
        self
    }

    /// Restrict to a period (quarter), 0 for all
    pub fn with_period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }

    /// Restrict to the most recent N games, 0 for all
    pub fn with_last_n_games(mut self, n: u32) -> Self {
        self.last_n_games = n;
        self
    }

    /// The full query-parameter dictionary the endpoint expects
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("PlayerID", self.player_id.0.to_string()),
            ("Season", self.season.to_string()),
            ("SeasonType", self.season_type.as_param().to_string()),
            ("PlayerPosition", self.player_position.clone()),
            ("ContextMeasure", self.context_measure.clone()),
            ("DateFrom", self.date_from.clone()),
            ("DateTo", self.date_to.clone()),
            (
                "GameID",
                self.game_id.map(|g| g.padded()).unwrap_or_default(),
            ),
            ("GameSegment", self.game_segment.clone()),
            ("LastNGames", self.last_n_games.to_string()),
            ("LeagueID", "00".to_string()),
            ("Location", self.location.clone()),
            ("Month", self.month.to_string()),
            ("OpponentTeamID", self.opponent_team_id.0.to_string()),
            ("Outcome", self.outcome.clone()),
            ("Period", self.period.to_string()),
            ("Position", self.position.clone()),
            ("RookieYear", self.rookie_year.clone()),
            ("SeasonSegment", self.season_segment.clone()),
            ("TeamID", self.team_id.0.to_string()),
            ("VsConference", self.vs_conference.clone()),
            ("VsDivision", self.vs_division.clone()),
        ]
    }
}

impl StatsClient {
    /// Fetch the shot log for a player
    ///
    /// Only the `Shot_Chart_Detail` result set is decoded; the
    /// `LeagueAverages` set carries different columns and no shots.
    pub fn shot_chart(&self, request: &ShotChartRequest) -> Result<Vec<ShotRecord>> {
        log::info!(
            "Fetching shot chart for {} ({} {})",
            request.player_id,
            request.season,
            request.season_type.as_param()
        );

        let response = self.get("shotchartdetail", &request.query())?;
        let set = response.find_set("Shot_Chart_Detail")?;

        let shots = set
            .rows()
            .map(|row| shot_from_row(&row))
            .collect::<Result<Vec<_>>>()?;

        log::info!("Fetched {} shots for {}", shots.len(), request.player_id);
        Ok(shots)
    }
}

fn shot_from_row(row: &Row<'_>) -> Result<ShotRecord> {
    Ok(ShotRecord {
        grid_type: row.str_or_empty("GRID_TYPE"),
        game_id: GameId(row.require_i64("GAME_ID")?),
        game_event_id: row.require_i64("GAME_EVENT_ID")?,
        player_id: PlayerId(row.require_i64("PLAYER_ID")?),
        player_name: row.str_or_empty("PLAYER_NAME"),
        team_id: TeamId(row.require_i64("TEAM_ID")?),
        team_name: row.str_or_empty("TEAM_NAME"),
        period: row.require_i64("PERIOD")? as u8,
        minutes_remaining: row.require_i64("MINUTES_REMAINING")? as u8,
        seconds_remaining: row.require_i64("SECONDS_REMAINING")? as u8,
        event_type: row.str_or_empty("EVENT_TYPE"),
        action_type: row.str_or_empty("ACTION_TYPE"),
        shot_type: row.str_or_empty("SHOT_TYPE"),
        shot_zone_basic: row.str_or_empty("SHOT_ZONE_BASIC"),
        shot_zone_area: row.str_or_empty("SHOT_ZONE_AREA"),
        shot_zone_range: row.str_or_empty("SHOT_ZONE_RANGE"),
        shot_distance: row.require_i64("SHOT_DISTANCE")? as u32,
        loc_x: row.require_i64("LOC_X")? as i32,
        loc_y: row.require_i64("LOC_Y")? as i32,
        shot_attempted: row.require_i64("SHOT_ATTEMPTED_FLAG")? as u8,
        shot_made: row.require_i64("SHOT_MADE_FLAG")? as u8,
        game_date: row.str_or_empty("GAME_DATE"),
        htm: row.str_or_empty("HTM"),
        vtm: row.str_or_empty("VTM"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_carries_full_dictionary() {
        let request = ShotChartRequest::new(PlayerId(201939), Season(2018), SeasonType::RegularSeason);
        let query = request.query();

        assert_eq!(query.len(), 22);
        let lookup = |key: &str| {
            query
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };
        assert_eq!(lookup("PlayerID"), "201939");
        assert_eq!(lookup("Season"), "2018-19");
        assert_eq!(lookup("SeasonType"), "Regular Season");
        assert_eq!(lookup("ContextMeasure"), "FGA");
        assert_eq!(lookup("LeagueID"), "00");
        assert_eq!(lookup("GameID"), "");
        assert_eq!(lookup("OpponentTeamID"), "0");
    }

    #[test]
    fn test_game_filter_is_padded() {
        let request = ShotChartRequest::new(PlayerId(1), Season(2018), SeasonType::Playoffs)
            .with_game(GameId(41800405));
        let query = request.query();
        let game = query.iter().find(|(k, _)| *k == "GameID").unwrap();
        assert_eq!(game.1, "0041800405");
    }

    #[test]
    fn test_shot_from_row() {
        let set: super::super::ResultSet = serde_json::from_value(json!({
            "name": "Shot_Chart_Detail",
            "headers": [
                "GRID_TYPE", "GAME_ID", "GAME_EVENT_ID", "PLAYER_ID", "PLAYER_NAME",
                "TEAM_ID", "TEAM_NAME", "PERIOD", "MINUTES_REMAINING", "SECONDS_REMAINING",
                "EVENT_TYPE", "ACTION_TYPE", "SHOT_TYPE", "SHOT_ZONE_BASIC",
                "SHOT_ZONE_AREA", "SHOT_ZONE_RANGE", "SHOT_DISTANCE", "LOC_X", "LOC_Y",
                "SHOT_ATTEMPTED_FLAG", "SHOT_MADE_FLAG", "GAME_DATE", "HTM", "VTM"
            ],
            "rowSet": [[
                "Shot Chart Detail", "0021800014", 7, 201939, "Stephen Curry",
                1610612744, "Golden State Warriors", 1, 10, 45,
                "Made Shot", "Jump Shot", "3PT Field Goal", "Above the Break 3",
                "Center(C)", "24+ ft.", 26, -15, 259,
                1, 1, "20181016", "GSW", "OKC"
            ]]
        }))
        .unwrap();

        let shot = shot_from_row(&set.rows().next().unwrap()).unwrap();
        assert_eq!(shot.game_id, GameId(21800014));
        assert_eq!(shot.player_id, PlayerId(201939));
        assert_eq!(shot.team_id, TeamId(1610612744));
        assert_eq!(shot.shot_type, ShotRecord::THREE_POINT);
        assert_eq!(shot.location(), (-15, 259));
        assert_eq!(shot.shot_made, 1);
        assert_eq!(
            shot.date(),
            Some(chrono::NaiveDate::from_ymd_opt(2018, 10, 16).unwrap())
        );
    }
}
