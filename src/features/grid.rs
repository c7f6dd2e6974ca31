//! Court-grid occupancy features
//!
//! The shot-to-feature transform runs in three stages: bin shot
//! coordinates into a court-sized count matrix, sum the matrix over
//! non-overlapping blocks, and flatten the result row-major. Output
//! dimension depends only on the configuration, never on the shots.

use crate::{CourtConfig, ShotRecord};
use ndarray::{s, Array2};

/// Bins (x, y) shot coordinates into a `length x width` count matrix
///
/// The matrix is indexed `[y, x]`. Coordinates are shifted into index
/// space first; a shot whose shifted coordinate falls outside the matrix
/// is discarded, not clamped.
#[derive(Debug, Clone, Copy)]
pub struct CourtGrid {
    width: usize,
    length: usize,
    width_shift: i32,
    length_shift: i32,
}

impl CourtGrid {
    pub fn new(width: usize, length: usize) -> Self {
        CourtGrid {
            width,
            length,
            width_shift: 0,
            length_shift: 0,
        }
    }

    pub fn with_shifts(mut self, width_shift: i32, length_shift: i32) -> Self {
        self.width_shift = width_shift;
        self.length_shift = length_shift;
        self
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.length, self.width)
    }

    pub fn bin<I>(&self, locations: I) -> Array2<u32>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut matrix = Array2::<u32>::zeros((self.length, self.width));
        for (x, y) in locations {
            let shifted_x = x + self.width_shift;
            let shifted_y = y + self.length_shift;
            if shifted_x < 0 || shifted_y < 0 {
                continue;
            }
            let (col, row) = (shifted_x as usize, shifted_y as usize);
            if col >= self.width || row >= self.length {
                continue;
            }
            matrix[[row, col]] += 1;
        }
        matrix
    }
}

/// Sums a count matrix over non-overlapping `length x width` blocks
///
/// A matrix that does not divide evenly is zero-padded up to the next
/// multiple with the original centered (floor-half before, remainder
/// after). A 1x1 pool is the identity.
#[derive(Debug, Clone, Copy)]
pub struct GridPool {
    width: usize,
    length: usize,
}

impl GridPool {
    pub fn new(width: usize, length: usize) -> Self {
        GridPool { width, length }
    }

    /// Square blocks
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Output shape for an input of the given `(length, width)`
    pub fn pooled_shape(&self, shape: (usize, usize)) -> (usize, usize) {
        (
            ceil_div(shape.0, self.length),
            ceil_div(shape.1, self.width),
        )
    }

    pub fn pool(&self, matrix: &Array2<u32>) -> Array2<u32> {
        if self.width == 1 && self.length == 1 {
            return matrix.clone();
        }

        let (length, width) = matrix.dim();
        let (length_chunks, width_chunks) = self.pooled_shape((length, width));
        let padded_length = length_chunks * self.length;
        let padded_width = width_chunks * self.width;
        let pad_top = (padded_length - length) / 2;
        let pad_left = (padded_width - width) / 2;

        let mut padded = Array2::<u32>::zeros((padded_length, padded_width));
        padded
            .slice_mut(s![pad_top..pad_top + length, pad_left..pad_left + width])
            .assign(matrix);

        let sums: Vec<u32> = padded
            .exact_chunks((self.length, self.width))
            .into_iter()
            .map(|block| block.sum())
            .collect();

        Array2::from_shape_vec((length_chunks, width_chunks), sums)
            .expect("block count matches pooled shape")
    }
}

fn ceil_div(value: usize, divisor: usize) -> usize {
    (value + divisor - 1) / divisor
}

/// The composed shot-to-feature transform: bin, pool, flatten
#[derive(Debug, Clone, Copy)]
pub struct ShotFeaturizer {
    grid: CourtGrid,
    pool: GridPool,
}

impl ShotFeaturizer {
    pub fn new(grid: CourtGrid, pool: GridPool) -> Self {
        ShotFeaturizer { grid, pool }
    }

    pub fn from_config(court: &CourtConfig) -> Self {
        ShotFeaturizer {
            grid: CourtGrid::new(court.width, court.length)
                .with_shifts(court.width_shift, court.length_shift),
            pool: GridPool::new(court.cell_width, court.cell_length),
        }
    }

    /// Length of every feature vector this featurizer produces
    pub fn dim(&self) -> usize {
        let (rows, cols) = self.pool.pooled_shape(self.grid.shape());
        rows * cols
    }

    pub fn features_from_locations<I>(&self, locations: I) -> Vec<f64>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let binned = self.grid.bin(locations);
        let pooled = self.pool.pool(&binned);
        pooled.iter().map(|&count| count as f64).collect()
    }

    pub fn features(&self, shots: &[&ShotRecord]) -> Vec<f64> {
        self.features_from_locations(shots.iter().map(|shot| shot.location()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_bin_counts_and_indexing() {
        let grid = CourtGrid::new(4, 3);
        let matrix = grid.bin(vec![(0, 0), (3, 2), (3, 2), (1, 2)]);

        assert_eq!(matrix.dim(), (3, 4));
        assert_eq!(matrix[[0, 0]], 1);
        assert_eq!(matrix[[2, 3]], 2);
        assert_eq!(matrix[[2, 1]], 1);
        assert_eq!(matrix.sum(), 4);
    }

    #[test]
    fn test_bin_applies_shifts() {
        let grid = CourtGrid::new(4, 4).with_shifts(2, 1);
        let matrix = grid.bin(vec![(-2, -1), (1, 2)]);

        assert_eq!(matrix[[0, 0]], 1);
        assert_eq!(matrix[[3, 3]], 1);
        assert_eq!(matrix.sum(), 2);
    }

    #[test]
    fn test_bin_discards_out_of_range() {
        let grid = CourtGrid::new(4, 4).with_shifts(2, 1);
        // Shifted: (-1, 0), (4, 0), (0, 4), (0, -2)
        let matrix = grid.bin(vec![(-3, -1), (2, -1), (-2, 3), (-2, -3)]);
        assert_eq!(matrix.sum(), 0);
    }

    #[test]
    fn test_bin_keeps_boundary_cells() {
        let grid = CourtGrid::new(4, 4);
        let matrix = grid.bin(vec![(0, 0), (3, 3), (4, 0), (0, 4)]);
        assert_eq!(matrix[[0, 0]], 1);
        assert_eq!(matrix[[3, 3]], 1);
        assert_eq!(matrix.sum(), 2);
    }

    #[test]
    fn test_pool_identity() {
        let matrix = array![[1u32, 2], [3, 4]];
        let pooled = GridPool::square(1).pool(&matrix);
        assert_eq!(pooled, matrix);
    }

    #[test]
    fn test_pool_even_division() {
        let matrix = array![
            [1u32, 1, 2, 2],
            [1, 1, 2, 2],
            [3, 3, 4, 4],
            [3, 3, 4, 4]
        ];
        let pooled = GridPool::square(2).pool(&matrix);
        assert_eq!(pooled, array![[4u32, 8], [12, 16]]);
    }

    #[test]
    fn test_pool_rectangular_blocks() {
        let matrix = array![
            [1u32, 0, 0, 1],
            [0, 1, 1, 0],
        ];
        // Blocks of width 2, length 1
        let pooled = GridPool::new(2, 1).pool(&matrix);
        assert_eq!(pooled, array![[1u32, 1], [1, 1]]);
    }

    #[test]
    fn test_pool_pads_centered() {
        // 4 rows pooled by 3: padded to 6 with one zero row above and one below
        let matrix = Array2::<u32>::ones((4, 3));
        let pooled = GridPool::new(3, 3).pool(&matrix);

        // Padded layout is 6x3: zero row, four one-rows, zero row. Top block
        // sums two one-rows, bottom block the other two.
        assert_eq!(pooled.dim(), (2, 1));
        assert_eq!(pooled, array![[6u32], [6]]);
    }

    #[test]
    fn test_pool_pads_odd_remainder_after() {
        // 5 rows pooled by 2: padded to 6 with pad_top = 0, zero row at bottom
        let mut matrix = Array2::<u32>::zeros((5, 2));
        matrix[[0, 0]] = 7;
        matrix[[4, 1]] = 5;
        let pooled = GridPool::new(2, 2).pool(&matrix);

        assert_eq!(pooled.dim(), (3, 1));
        assert_eq!(pooled, array![[7u32], [0], [5]]);
    }

    #[test]
    fn test_flatten_is_row_major() {
        let featurizer = ShotFeaturizer::new(CourtGrid::new(4, 4), GridPool::square(2));
        // One shot per quadrant with distinct counts
        let features = featurizer.features_from_locations(vec![
            (0, 0), // top-left block
            (2, 0),
            (2, 0), // top-right block x2
            (0, 2),
            (0, 2),
            (0, 2), // bottom-left block x3
        ]);
        assert_eq!(features, vec![1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_dim_is_config_only() {
        let featurizer = ShotFeaturizer::new(
            CourtGrid::new(500, 470).with_shifts(250, 52),
            GridPool::new(50, 47),
        );
        assert_eq!(featurizer.dim(), 100);

        let empty = featurizer.features_from_locations(vec![]);
        assert_eq!(empty.len(), 100);
        assert!(empty.iter().all(|&v| v == 0.0));

        let some = featurizer.features_from_locations(vec![(0, 0), (-250, -52), (999, 999)]);
        assert_eq!(some.len(), 100);
    }

    #[test]
    fn test_default_court_keeps_baseline_shots() {
        let featurizer = ShotFeaturizer::new(
            CourtGrid::new(500, 470).with_shifts(250, 52),
            GridPool::new(50, 47),
        );
        // Corner three and a shot from behind the basket both land in range
        let features = featurizer.features_from_locations(vec![(-220, 0), (0, -40)]);
        assert_eq!(features.iter().sum::<f64>(), 2.0);
    }
}
