use banditree_core::*;
use serde::Serialize;

/// An owned `(M, K)` matrix of integer counters, indexed by (player, arm).
///
/// Statistics only ever grow by increments of 0 or 1 per step, so counts
/// are plain integers regardless of which [`Scalar`](crate::Scalar) the
/// surrounding exploration uses for probabilities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Counts {
    rows: usize,
    cols: usize,
    data: Vec<u32>,
}

impl Counts {
    /// An all-zero `(players, arms)` matrix.
    pub fn zeros(players: usize, arms: usize) -> Self {
        assert!(players > 0 && arms > 0, "counts matrix must be non-empty");
        Self {
            rows: players,
            cols: arms,
            data: vec![0; players * arms],
        }
    }
    /// Build from explicit rows. Panics on ragged or empty input.
    pub fn from_rows(rows: &[Vec<u32>]) -> Self {
        assert!(!rows.is_empty(), "counts matrix must be non-empty");
        let cols = rows[0].len();
        assert!(cols > 0, "counts matrix must be non-empty");
        assert!(
            rows.iter().all(|r| r.len() == cols),
            "counts matrix rows must share one width"
        );
        Self {
            rows: rows.len(),
            cols,
            data: rows.iter().flatten().copied().collect(),
        }
    }
    /// Number of players (rows).
    pub fn players(&self) -> usize {
        self.rows
    }
    /// Number of arms (columns).
    pub fn arms(&self) -> usize {
        self.cols
    }
    /// `(players, arms)` shape.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    pub fn at(&self, player: Player, arm: Arm) -> u32 {
        self.data[player * self.cols + arm]
    }
    pub fn add(&mut self, player: Player, arm: Arm, delta: u32) {
        self.data[player * self.cols + arm] += delta;
    }
    /// One player's counter row.
    pub fn row(&self, player: Player) -> &[u32] {
        &self.data[player * self.cols..(player + 1) * self.cols]
    }
    /// Smallest counter in the matrix.
    pub fn min(&self) -> u32 {
        self.data.iter().copied().min().expect("non-empty matrix")
    }
    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.data.iter().map(|&x| x as u64).sum()
    }
    /// Row-major view of the raw counters.
    pub fn entries(&self) -> &[u32] {
        &self.data
    }
}

impl std::fmt::Display for Counts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for player in 0..self.rows {
            if player > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:?}", self.row(player))?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexing_is_row_major() {
        let m = Counts::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.at(0, 2), 3);
        assert_eq!(m.at(1, 0), 4);
        assert_eq!(m.row(1), &[4, 5, 6]);
    }

    #[test]
    fn aggregates() {
        let mut m = Counts::zeros(2, 2);
        m.add(0, 1, 1);
        m.add(1, 0, 3);
        assert_eq!(m.min(), 0);
        assert_eq!(m.total(), 4);
    }

    #[test]
    #[should_panic(expected = "share one width")]
    fn ragged_rows_rejected() {
        Counts::from_rows(&[vec![1, 2], vec![3]]);
    }
}
