//! In-memory table of shot records backed by a CSV file

use crate::{GameId, Result, ShotRecord, TeamId};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// A season's worth of shots, indexed by game
pub struct ShotTable {
    shots: Vec<ShotRecord>,
    by_game: HashMap<GameId, Vec<usize>>,
}

impl ShotTable {
    pub fn new(shots: Vec<ShotRecord>) -> Self {
        let mut by_game: HashMap<GameId, Vec<usize>> = HashMap::new();
        for (idx, shot) in shots.iter().enumerate() {
            by_game.entry(shot.game_id).or_default().push(idx);
        }
        ShotTable { shots, by_game }
    }

    /// Load a shot CSV written by `data fetch-shots`
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading shots from {}", path.display());
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(io::BufReader::new(file))?;
        log::info!("Loaded {} shots across {} games", table.len(), table.by_game.len());
        Ok(table)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let shots = csv_reader
            .deserialize()
            .collect::<std::result::Result<Vec<ShotRecord>, _>>()?;
        Ok(Self::new(shots))
    }

    /// Write the table out as CSV, creating parent directories as needed
    pub fn write_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))?;
        log::info!("Wrote {} shots to {}", self.len(), path.display());
        Ok(())
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for shot in &self.shots {
            csv_writer.serialize(shot)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn shots(&self) -> &[ShotRecord] {
        &self.shots
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Every game id in the table, sorted
    pub fn game_ids(&self) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self.by_game.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Game ids in which the given team attempted at least one shot, sorted
    pub fn team_game_ids(&self, team_id: TeamId) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self
            .by_game
            .iter()
            .filter(|(_, idxs)| idxs.iter().any(|&i| self.shots[i].team_id == team_id))
            .map(|(game_id, _)| *game_id)
            .collect();
        ids.sort();
        ids
    }

    /// All shots attempted in a game
    pub fn game_shots(&self, game_id: GameId) -> Vec<&ShotRecord> {
        self.by_game
            .get(&game_id)
            .map(|idxs| idxs.iter().map(|&i| &self.shots[i]).collect())
            .unwrap_or_default()
    }

    /// Partition a game's shots into (team's shots, opposing shots)
    pub fn split_team_shots(
        &self,
        game_id: GameId,
        team_id: TeamId,
    ) -> (Vec<&ShotRecord>, Vec<&ShotRecord>) {
        self.game_shots(game_id)
            .into_iter()
            .partition(|shot| shot.team_id == team_id)
    }

    pub fn stats(&self) -> TableStats {
        let mut teams: Vec<TeamId> = self.shots.iter().map(|s| s.team_id).collect();
        teams.sort();
        teams.dedup();

        let dates: Vec<NaiveDate> = self.shots.iter().filter_map(|s| s.date()).collect();

        TableStats {
            shot_count: self.shots.len(),
            game_count: self.by_game.len(),
            team_count: teams.len(),
            earliest_game: dates.iter().min().copied(),
            latest_game: dates.iter().max().copied(),
        }
    }
}

/// Shot table statistics
#[derive(Debug, Clone)]
pub struct TableStats {
    pub shot_count: usize,
    pub game_count: usize,
    pub team_count: usize,
    pub earliest_game: Option<NaiveDate>,
    pub latest_game: Option<NaiveDate>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::PlayerId;

    /// Minimal record for table and feature tests
    pub(crate) fn shot(game: i64, team: i64, x: i32, y: i32, shot_type: &str) -> ShotRecord {
        ShotRecord {
            grid_type: "Shot Chart Detail".to_string(),
            game_id: GameId(game),
            game_event_id: 0,
            player_id: PlayerId(1),
            player_name: "Test Player".to_string(),
            team_id: TeamId(team),
            team_name: "Test Team".to_string(),
            period: 1,
            minutes_remaining: 10,
            seconds_remaining: 30,
            event_type: "Made Shot".to_string(),
            action_type: "Jump Shot".to_string(),
            shot_type: shot_type.to_string(),
            shot_zone_basic: String::new(),
            shot_zone_area: String::new(),
            shot_zone_range: String::new(),
            shot_distance: 10,
            loc_x: x,
            loc_y: y,
            shot_attempted: 1,
            shot_made: 1,
            game_date: "20181016".to_string(),
            htm: "AAA".to_string(),
            vtm: "BBB".to_string(),
        }
    }

    fn sample_table() -> ShotTable {
        ShotTable::new(vec![
            shot(2, 100, 0, 0, ShotRecord::TWO_POINT),
            shot(1, 100, 10, 20, ShotRecord::TWO_POINT),
            shot(1, 200, -30, 40, ShotRecord::THREE_POINT),
            shot(1, 100, 5, 5, ShotRecord::THREE_POINT),
            shot(3, 200, 0, 0, ShotRecord::TWO_POINT),
        ])
    }

    #[test]
    fn test_team_game_ids_sorted_unique() {
        let table = sample_table();
        assert_eq!(table.team_game_ids(TeamId(100)), vec![GameId(1), GameId(2)]);
        assert_eq!(table.team_game_ids(TeamId(200)), vec![GameId(1), GameId(3)]);
        assert!(table.team_game_ids(TeamId(999)).is_empty());
    }

    #[test]
    fn test_split_team_shots() {
        let table = sample_table();
        let (ours, theirs) = table.split_team_shots(GameId(1), TeamId(100));
        assert_eq!(ours.len(), 2);
        assert_eq!(theirs.len(), 1);
        assert!(ours.iter().all(|s| s.team_id == TeamId(100)));
        assert!(theirs.iter().all(|s| s.team_id != TeamId(100)));

        let (none, all) = table.split_team_shots(GameId(3), TeamId(100));
        assert!(none.is_empty());
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_csv_roundtrip() {
        let table = sample_table();
        let mut buffer = Vec::new();
        table.write_csv(&mut buffer).unwrap();

        let header = String::from_utf8_lossy(&buffer);
        assert!(header.starts_with("GRID_TYPE,GAME_ID,GAME_EVENT_ID"));

        let reloaded = ShotTable::from_reader(buffer.as_slice()).unwrap();
        assert_eq!(reloaded.len(), table.len());
        assert_eq!(reloaded.shots()[1].loc_x, 10);
        assert_eq!(reloaded.shots()[2].shot_type, ShotRecord::THREE_POINT);
        assert_eq!(reloaded.team_game_ids(TeamId(100)), table.team_game_ids(TeamId(100)));
    }

    #[test]
    fn test_stats() {
        let table = sample_table();
        let stats = table.stats();
        assert_eq!(stats.shot_count, 5);
        assert_eq!(stats.game_count, 3);
        assert_eq!(stats.team_count, 2);
        assert_eq!(
            stats.earliest_game,
            Some(NaiveDate::from_ymd_opt(2018, 10, 16).unwrap())
        );
    }
}
