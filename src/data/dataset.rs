//! Per-game training samples for one team
//!
//! Joins the shot table with the outcome cache, runs the feature
//! transform on both sides of every game, and hands out train/test or
//! k-fold partitions of the resulting design matrix.

use crate::data::{OutcomeCache, ShotTable};
use crate::features::ShotFeaturizer;
use crate::{GameId, HoopsError, Result, TeamId};
use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// One game: concatenated (team ++ opponent) features and the outcome
#[derive(Debug, Clone)]
pub struct GameSample {
    pub game_id: GameId,
    pub features: Vec<f64>,
    pub won: bool,
}

/// A train/test partition of the design matrix
#[derive(Debug, Clone)]
pub struct Split {
    pub x_train: Array2<f64>,
    pub y_train: Array1<bool>,
    pub x_test: Array2<f64>,
    pub y_test: Array1<bool>,
}

/// All of a team's games as model-ready samples
pub struct TeamDataset {
    team_id: TeamId,
    side_dim: usize,
    samples: Vec<GameSample>,
}

impl TeamDataset {
    /// Build one sample per game the team appears in
    ///
    /// Every game must already have a cached outcome; fetch first.
    pub fn build(
        table: &ShotTable,
        team_id: TeamId,
        outcomes: &OutcomeCache,
        featurizer: &ShotFeaturizer,
    ) -> Result<Self> {
        let game_ids = table.team_game_ids(team_id);
        if game_ids.is_empty() {
            return Err(HoopsError::NoGames(team_id));
        }

        let mut samples = Vec::with_capacity(game_ids.len());
        for game_id in game_ids {
            let won = outcomes
                .get(game_id)
                .ok_or(HoopsError::MissingOutcome(game_id))?;

            let (team_shots, opponent_shots) = table.split_team_shots(game_id, team_id);
            let mut features = featurizer.features(&team_shots);
            features.extend(featurizer.features(&opponent_shots));

            samples.push(GameSample {
                game_id,
                features,
                won,
            });
        }

        log::info!(
            "Built {} samples for {} ({} features each)",
            samples.len(),
            team_id,
            featurizer.dim() * 2
        );

        Ok(TeamDataset {
            team_id,
            side_dim: featurizer.dim(),
            samples,
        })
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[GameSample] {
        &self.samples
    }

    /// Length of each sample's feature vector (both sides)
    pub fn dim(&self) -> usize {
        self.side_dim * 2
    }

    /// The full design matrix and target vector
    pub fn design_matrix(&self) -> (Array2<f64>, Array1<bool>) {
        let indices: Vec<usize> = (0..self.samples.len()).collect();
        self.matrix_for(&indices)
    }

    fn matrix_for(&self, indices: &[usize]) -> (Array2<f64>, Array1<bool>) {
        let mut x = Array2::zeros((indices.len(), self.dim()));
        let mut y = Vec::with_capacity(indices.len());
        for (row, &i) in indices.iter().enumerate() {
            let sample = &self.samples[i];
            x.row_mut(row)
                .assign(&ArrayView1::from(sample.features.as_slice()));
            y.push(sample.won);
        }
        (x, Array1::from_vec(y))
    }

    fn shuffled_indices(&self, seed: Option<u64>) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.samples.len()).collect();
        match seed {
            Some(seed) => indices.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => indices.shuffle(&mut rand::thread_rng()),
        }
        indices
    }

    /// Random train/test split
    ///
    /// The test partition takes `ceil(n * test_size)` samples. A seed
    /// makes the split reproducible.
    pub fn train_test_split(&self, test_size: f64, seed: Option<u64>) -> Result<Split> {
        if !(0.0..1.0).contains(&test_size) || test_size == 0.0 {
            return Err(HoopsError::InvalidSplit(format!(
                "test_size must be in (0, 1), got {}",
                test_size
            )));
        }

        let n = self.samples.len();
        let n_test = (n as f64 * test_size).ceil() as usize;
        if n_test == 0 || n_test >= n {
            return Err(HoopsError::InvalidSplit(format!(
                "test_size {} leaves no data to train on ({} samples)",
                test_size, n
            )));
        }

        let indices = self.shuffled_indices(seed);
        let (test_idx, train_idx) = indices.split_at(n_test);

        let (x_train, y_train) = self.matrix_for(train_idx);
        let (x_test, y_test) = self.matrix_for(test_idx);
        Ok(Split {
            x_train,
            y_train,
            x_test,
            y_test,
        })
    }

    /// K folds of near-equal size; each fold is the test set exactly once
    pub fn kfold(&self, k: usize, shuffle: bool, seed: Option<u64>) -> Result<Vec<Split>> {
        let n = self.samples.len();
        if k < 2 || k > n {
            return Err(HoopsError::InvalidSplit(format!(
                "fold count must be in [2, {}], got {}",
                n, k
            )));
        }

        let indices = if shuffle {
            self.shuffled_indices(seed)
        } else {
            (0..n).collect()
        };

        // The first n % k folds carry one extra sample
        let base = n / k;
        let extra = n % k;
        let mut splits = Vec::with_capacity(k);
        let mut start = 0;
        for fold in 0..k {
            let size = if fold < extra { base + 1 } else { base };
            let test_idx = &indices[start..start + size];
            let train_idx: Vec<usize> = indices[..start]
                .iter()
                .chain(indices[start + size..].iter())
                .copied()
                .collect();

            let (x_train, y_train) = self.matrix_for(&train_idx);
            let (x_test, y_test) = self.matrix_for(test_idx);
            splits.push(Split {
                x_train,
                y_train,
                x_test,
                y_test,
            });
            start += size;
        }

        Ok(splits)
    }
}
