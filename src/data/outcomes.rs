//! Win/loss outcome cache
//!
//! A flat JSON file mapping game id to a boolean win flag for one team,
//! kept on disk so game results are only fetched once. JSON objects
//! cannot key on integers, so ids are strings on disk and integers here.

use crate::data::api::StatsClient;
use crate::{GameId, HoopsError, Result, TeamId};
use std::collections::HashMap;
use std::path::Path;

/// Cached game outcomes for a single team
#[derive(Debug, Clone, Default)]
pub struct OutcomeCache {
    outcomes: HashMap<GameId, bool>,
}

impl OutcomeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cache file, failing on a missing or malformed file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load a cache file, starting empty when it does not exist yet
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => match Self::from_json_str(&content) {
                Ok(cache) => cache,
                Err(e) => {
                    log::warn!("Ignoring unreadable outcome cache: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!(
                    "No outcome cache at {}, starting empty",
                    path.as_ref().display()
                );
                Self::default()
            }
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: HashMap<String, bool> = serde_json::from_str(content)?;
        let mut outcomes = HashMap::with_capacity(raw.len());
        for (key, won) in raw {
            let id: i64 = key
                .parse()
                .map_err(|_| HoopsError::Decode(format!("non-numeric game id key: {}", key)))?;
            outcomes.insert(GameId(id), won);
        }
        Ok(OutcomeCache { outcomes })
    }

    pub fn to_json_string(&self) -> Result<String> {
        let raw: HashMap<String, bool> = self
            .outcomes
            .iter()
            .map(|(game_id, won)| (game_id.0.to_string(), *won))
            .collect();
        Ok(serde_json::to_string_pretty(&raw)?)
    }

    /// Write the cache out, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_string()?)?;
        log::info!("Cached {} outcomes to {}", self.outcomes.len(), path.display());
        Ok(())
    }

    pub fn get(&self, game_id: GameId) -> Option<bool> {
        self.outcomes.get(&game_id).copied()
    }

    pub fn contains(&self, game_id: GameId) -> bool {
        self.outcomes.contains_key(&game_id)
    }

    pub fn insert(&mut self, game_id: GameId, won: bool) {
        self.outcomes.insert(game_id, won);
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Resolve uncached games through the box-score endpoint
    ///
    /// Returns how many outcomes were fetched.
    pub fn fetch_missing(
        &mut self,
        client: &StatsClient,
        game_ids: &[GameId],
        team_id: TeamId,
    ) -> Result<usize> {
        let missing: Vec<GameId> = game_ids
            .iter()
            .copied()
            .filter(|id| !self.contains(*id))
            .collect();

        for (i, game_id) in missing.iter().enumerate() {
            let box_score = client.box_score(*game_id)?;
            let won = box_score.is_winner(team_id);
            log::info!(
                "[{}/{}] {} -> {}",
                i + 1,
                missing.len(),
                game_id,
                if won { "win" } else { "loss" }
            );
            self.insert(*game_id, won);
            if i + 1 < missing.len() {
                client.throttle();
            }
        }

        Ok(missing.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip_keeps_every_entry() {
        let mut cache = OutcomeCache::new();
        cache.insert(GameId(21800014), true);
        cache.insert(GameId(21800022), false);
        cache.insert(GameId(21801230), true);

        let text = cache.to_json_string().unwrap();
        let reloaded = OutcomeCache::from_json_str(&text).unwrap();

        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.get(GameId(21800014)), Some(true));
        assert_eq!(reloaded.get(GameId(21800022)), Some(false));
        assert_eq!(reloaded.get(GameId(21801230)), Some(true));
        assert_eq!(reloaded.get(GameId(999)), None);
    }

    #[test]
    fn test_keys_are_strings_on_disk() {
        let mut cache = OutcomeCache::new();
        cache.insert(GameId(21800014), true);
        let text = cache.to_json_string().unwrap();
        assert!(text.contains("\"21800014\": true"));
    }

    #[test]
    fn test_non_numeric_key_is_an_error() {
        let result = OutcomeCache::from_json_str(r#"{"not-a-game": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_insert_overwrites() {
        let mut cache = OutcomeCache::new();
        cache.insert(GameId(1), false);
        cache.insert(GameId(1), true);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(GameId(1)), Some(true));
    }
}
