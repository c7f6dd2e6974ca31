//! Box-score summary endpoint (`boxscoresummaryv2`)
//!
//! Decodes the endpoint's fixed result-set layout and derives the winner
//! from the line scores.

use super::{Row, StatsClient, StatsResponse};
use crate::{GameId, Result, TeamId};

/// Decoded box-score summary for one game
#[derive(Debug, Clone)]
pub struct BoxScore {
    pub summary: GameSummary,
    pub home_stats: Option<OtherStats>,
    pub visiting_stats: Option<OtherStats>,
    pub officials: Vec<Official>,
    pub inactive: Vec<InactivePlayer>,
    pub info: GameMeta,
    pub home_line: TeamLine,
    pub visiting_line: TeamLine,
    pub last_meeting: Option<LastMeeting>,
    pub season_series: Option<SeasonSeries>,
}

impl BoxScore {
    /// The line-score row with more points
    pub fn winner(&self) -> &TeamLine {
        if self.home_line.pts > self.visiting_line.pts {
            &self.home_line
        } else {
            &self.visiting_line
        }
    }

    /// Whether the given team won this game
    pub fn is_winner(&self, team_id: TeamId) -> bool {
        self.winner().team_id == team_id
    }
}

#[derive(Debug, Clone)]
pub struct GameSummary {
    pub game_date_est: String,
    pub game_status_text: String,
    pub home_team_id: TeamId,
    pub visitor_team_id: TeamId,
    pub season: String,
}

/// One side of the line score, plus the identity fields the winner carries
#[derive(Debug, Clone)]
pub struct TeamLine {
    pub team_id: TeamId,
    pub abbreviation: String,
    pub city_name: String,
    pub nickname: String,
    pub pts: i64,
}

#[derive(Debug, Clone)]
pub struct OtherStats {
    pub team_id: TeamId,
    pub pts_paint: i64,
    pub pts_second_chance: i64,
    pub pts_fast_break: i64,
    pub largest_lead: i64,
}

#[derive(Debug, Clone)]
pub struct Official {
    pub first_name: String,
    pub last_name: String,
    pub jersey_num: String,
}

#[derive(Debug, Clone)]
pub struct InactivePlayer {
    pub first_name: String,
    pub last_name: String,
    pub team_abbreviation: String,
}

#[derive(Debug, Clone)]
pub struct GameMeta {
    pub game_date: String,
    pub attendance: Option<i64>,
    pub game_time: String,
}

#[derive(Debug, Clone)]
pub struct LastMeeting {
    pub last_game_id: GameId,
    pub home_points: i64,
    pub visitor_points: i64,
}

#[derive(Debug, Clone)]
pub struct SeasonSeries {
    pub home_wins: i64,
    pub home_losses: i64,
    pub leader: String,
}

impl StatsClient {
    /// Fetch the box-score summary for a game
    pub fn box_score(&self, game_id: GameId) -> Result<BoxScore> {
        log::info!("Fetching box score for {}", game_id);

        let params = vec![("GameID", game_id.padded())];
        let response = self.get("boxscoresummaryv2", &params)?;
        decode_box_score(&response)
    }
}

fn decode_box_score(response: &StatsResponse) -> Result<BoxScore> {
    let summary_row = response.find_set("GameSummary")?.first_row()?;
    let summary = GameSummary {
        game_date_est: summary_row.str_or_empty("GAME_DATE_EST"),
        game_status_text: summary_row.str_or_empty("GAME_STATUS_TEXT"),
        home_team_id: TeamId(summary_row.require_i64("HOME_TEAM_ID")?),
        visitor_team_id: TeamId(summary_row.require_i64("VISITOR_TEAM_ID")?),
        season: summary_row.str_or_empty("SEASON"),
    };

    // Two-row sets are ordered home first, visiting second
    let other = response.find_set("OtherStats")?;
    let mut other_rows = other.rows();
    let home_stats = other_rows.next().map(|r| other_stats_from_row(&r)).transpose()?;
    let visiting_stats = other_rows.next().map(|r| other_stats_from_row(&r)).transpose()?;

    let officials = response
        .find_set("Officials")?
        .rows()
        .map(|row| Official {
            first_name: row.str_or_empty("FIRST_NAME"),
            last_name: row.str_or_empty("LAST_NAME"),
            jersey_num: row.str_or_empty("JERSEY_NUM").trim().to_string(),
        })
        .collect();

    let inactive = response
        .find_set("InactivePlayers")?
        .rows()
        .map(|row| InactivePlayer {
            first_name: row.str_or_empty("FIRST_NAME"),
            last_name: row.str_or_empty("LAST_NAME"),
            team_abbreviation: row.str_or_empty("TEAM_ABBREVIATION"),
        })
        .collect();

    let info_row = response.find_set("GameInfo")?.first_row()?;
    let info = GameMeta {
        game_date: info_row.str_or_empty("GAME_DATE"),
        attendance: info_row.get_i64("ATTENDANCE"),
        game_time: info_row.str_or_empty("GAME_TIME"),
    };

    let line = response.find_set("LineScore")?;
    let mut line_rows = line.rows();
    let home_line = line_rows
        .next()
        .map(|r| team_line_from_row(&r))
        .transpose()?
        .ok_or_else(|| crate::HoopsError::Decode("line score has no home row".to_string()))?;
    let visiting_line = line_rows
        .next()
        .map(|r| team_line_from_row(&r))
        .transpose()?
        .ok_or_else(|| crate::HoopsError::Decode("line score has no visiting row".to_string()))?;

    let last_meeting = response
        .find_set("LastMeeting")?
        .rows()
        .next()
        .and_then(|row| {
            Some(LastMeeting {
                last_game_id: GameId(row.get_i64("LAST_GAME_ID")?),
                home_points: row.get_i64("LAST_GAME_HOME_TEAM_POINTS").unwrap_or(0),
                visitor_points: row.get_i64("LAST_GAME_VISITOR_TEAM_POINTS").unwrap_or(0),
            })
        });

    let season_series = response
        .find_set("SeasonSeries")?
        .rows()
        .next()
        .map(|row| SeasonSeries {
            home_wins: row.get_i64("HOME_TEAM_WINS").unwrap_or(0),
            home_losses: row.get_i64("HOME_TEAM_LOSSES").unwrap_or(0),
            leader: row.str_or_empty("SERIES_LEADER"),
        });

    Ok(BoxScore {
        summary,
        home_stats,
        visiting_stats,
        officials,
        inactive,
        info,
        home_line,
        visiting_line,
        last_meeting,
        season_series,
    })
}

fn team_line_from_row(row: &Row<'_>) -> Result<TeamLine> {
    Ok(TeamLine {
        team_id: TeamId(row.require_i64("TEAM_ID")?),
        abbreviation: row.str_or_empty("TEAM_ABBREVIATION"),
        city_name: row.str_or_empty("TEAM_CITY_NAME"),
        nickname: row.str_or_empty("TEAM_NICKNAME"),
        pts: row.require_i64("PTS")?,
    })
}

fn other_stats_from_row(row: &Row<'_>) -> Result<OtherStats> {
    Ok(OtherStats {
        team_id: TeamId(row.require_i64("TEAM_ID")?),
        pts_paint: row.get_i64("PTS_PAINT").unwrap_or(0),
        pts_second_chance: row.get_i64("PTS_2ND_CHANCE").unwrap_or(0),
        pts_fast_break: row.get_i64("PTS_FB").unwrap_or(0),
        largest_lead: row.get_i64("LARGEST_LEAD").unwrap_or(0),
    })
}
