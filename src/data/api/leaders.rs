//! League-leaders endpoint (`leagueleaders`)

use super::StatsClient;
use crate::{PlayerId, Result, Season, SeasonType, SortCategory, TeamId};

/// One row of the leaderboard
#[derive(Debug, Clone)]
pub struct Leader {
    pub rank: u32,
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_id: TeamId,
    pub team_abbreviation: String,
    /// Season total for the category the board is sorted by
    pub value: f64,
}

impl StatsClient {
    /// Fetch the league leaderboard for a season, sorted by `category`
    pub fn league_leaders(
        &self,
        season: Season,
        season_type: SeasonType,
        category: SortCategory,
    ) -> Result<Vec<Leader>> {
        log::info!(
            "Fetching {} league leaders by {}",
            season,
            category.as_param()
        );

        let params = vec![
            ("LeagueID", "00".to_string()),
            ("PerMode", "Totals".to_string()),
            ("Scope", "S".to_string()),
            ("Season", season.to_string()),
            ("SeasonType", season_type.as_param().to_string()),
            ("StatCategory", category.as_param().to_string()),
        ];

        let response = self.get("leagueleaders", &params)?;
        let set = response.find_set("LeagueLeaders")?;

        let leaders = set
            .rows()
            .map(|row| {
                Ok(Leader {
                    rank: row.require_i64("RANK")? as u32,
                    player_id: PlayerId(row.require_i64("PLAYER_ID")?),
                    player_name: row.str_or_empty("PLAYER"),
                    team_id: TeamId(row.require_i64("TEAM_ID")?),
                    team_abbreviation: row.str_or_empty("TEAM"),
                    value: row.get_f64(category.as_param()).unwrap_or(0.0),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::info!("Fetched {} leaders", leaders.len());
        Ok(leaders)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{RawResponse, StatsResponse};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leader_rows_decode() {
        let raw: RawResponse = serde_json::from_value(json!({
            "resultSet": {
                "name": "LeagueLeaders",
                "headers": ["PLAYER_ID", "RANK", "PLAYER", "TEAM_ID", "TEAM", "GP", "PTS"],
                "rowSet": [
                    [201935, 1, "James Harden", 1610612745, "HOU", 78, 2818],
                    [202331, 2, "Paul George", 1610612760, "OKC", 77, 2159]
                ]
            }
        }))
        .unwrap();
        let response = StatsResponse::from(raw);
        let set = response.find_set("LeagueLeaders").unwrap();

        let leaders: Vec<Leader> = set
            .rows()
            .map(|row| Leader {
                rank: row.require_i64("RANK").unwrap() as u32,
                player_id: PlayerId(row.require_i64("PLAYER_ID").unwrap()),
                player_name: row.str_or_empty("PLAYER"),
                team_id: TeamId(row.require_i64("TEAM_ID").unwrap()),
                team_abbreviation: row.str_or_empty("TEAM"),
                value: row.get_f64("PTS").unwrap(),
            })
            .collect();

        assert_eq!(leaders.len(), 2);
        assert_eq!(leaders[0].player_name, "James Harden");
        assert_eq!(leaders[0].value, 2818.0);
        assert_eq!(leaders[1].rank, 2);
    }
}
