//! Data ingestion and storage
//!
//! Stats API client, the shot CSV table, the game outcome cache, and
//! dataset assembly for training.

pub mod api;
pub mod dataset;
pub mod outcomes;
pub mod shot_table;

pub use api::StatsClient;
pub use dataset::TeamDataset;
pub use outcomes::OutcomeCache;
pub use shot_table::ShotTable;
