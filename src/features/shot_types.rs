//! Shot-type count features

use crate::ShotRecord;

/// The alternative two-element feature: (2-point attempts, 3-point attempts)
///
/// Attempts with any other `SHOT_TYPE` value count toward neither.
pub fn shot_type_counts(shots: &[&ShotRecord]) -> [usize; 2] {
    let two_point = shots
        .iter()
        .filter(|shot| shot.shot_type == ShotRecord::TWO_POINT)
        .count();
    let three_point = shots
        .iter()
        .filter(|shot| shot.shot_type == ShotRecord::THREE_POINT)
        .count();
    [two_point, three_point]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::shot_table::tests::shot;

    #[test]
    fn test_counts_by_type() {
        let records = vec![
            shot(1, 100, 0, 0, ShotRecord::TWO_POINT),
            shot(1, 100, 10, 10, ShotRecord::TWO_POINT),
            shot(1, 100, -220, 30, ShotRecord::THREE_POINT),
        ];
        let refs: Vec<&ShotRecord> = records.iter().collect();
        assert_eq!(shot_type_counts(&refs), [2, 1]);
    }

    #[test]
    fn test_empty_and_unknown_types() {
        assert_eq!(shot_type_counts(&[]), [0, 0]);

        let records = vec![shot(1, 100, 0, 0, "Free Throw")];
        let refs: Vec<&ShotRecord> = records.iter().collect();
        assert_eq!(shot_type_counts(&refs), [0, 0]);
    }
}
