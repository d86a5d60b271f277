//! Simulation configuration.
//!
//! The lift world is configured by exactly two domain inputs: the cabin
//! capacity and the per-step arrival-probability matrix.  The floor count is
//! not configured separately; it is the matrix dimension.
//!
//! Both are validated once, before any session exists.  An `ArrivalMatrix`
//! can only be obtained through [`ArrivalMatrix::new`], so every matrix held
//! by a `LiftConfig` is square, entrywise in `[0, 1]`, and zero on the
//! diagonal.

use crate::{Floor, LiftError, LiftResult};

/// Largest supported shaft.  Button panels are stored as a `u32` bitset.
pub const MAX_FLOORS: usize = 32;

/// Per-step probability of a passenger appearing for each (start, destination)
/// floor pair.  Rows are start floors, columns destinations.
const BUILDING_ARRIVALS: [[f64; 7]; 7] = [
    [0.0000, 0.0016, 0.0008, 0.0034, 0.0082, 0.0089, 0.0056],
    [0.0012, 0.0000, 0.0005, 0.0028, 0.0070, 0.0100, 0.0067],
    [0.0006, 0.0004, 0.0000, 0.0001, 0.0001, 0.0003, 0.0001],
    [0.0022, 0.0015, 0.0001, 0.0000, 0.0001, 0.0006, 0.0009],
    [0.0056, 0.0036, 0.0001, 0.0002, 0.0000, 0.0011, 0.0012],
    [0.0058, 0.0061, 0.0002, 0.0003, 0.0005, 0.0000, 0.0004],
    [0.0048, 0.0049, 0.0001, 0.0007, 0.0009, 0.0010, 0.0000],
];

// ── ArrivalMatrix ─────────────────────────────────────────────────────────────

/// Square `floors × floors` matrix of Bernoulli success probabilities.
///
/// `probability(i, j)` is the chance that, in one step, a new passenger
/// starting at floor `i` with destination `j` appears.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")
)]
pub struct ArrivalMatrix {
    floors: usize,
    /// Row-major, length `floors * floors`.
    probs:  Vec<f64>,
}

impl ArrivalMatrix {
    /// Validate and build a matrix from its rows.
    ///
    /// # Errors
    ///
    /// [`LiftError::Config`] if the matrix is not square, has fewer than 2 or
    /// more than [`MAX_FLOORS`] rows, holds a value that is not a probability,
    /// or has a non-zero diagonal entry.
    pub fn new(rows: Vec<Vec<f64>>) -> LiftResult<Self> {
        let floors = rows.len();
        if !(2..=MAX_FLOORS).contains(&floors) {
            return Err(LiftError::Config(format!(
                "arrival matrix must have between 2 and {MAX_FLOORS} floors, got {floors}"
            )));
        }

        let mut probs = Vec::with_capacity(floors * floors);
        for (start, row) in rows.into_iter().enumerate() {
            if row.len() != floors {
                return Err(LiftError::Config(format!(
                    "arrival matrix is not square: row {start} has {} entries, expected {floors}",
                    row.len()
                )));
            }
            for (dest, p) in row.into_iter().enumerate() {
                if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                    return Err(LiftError::Config(format!(
                        "arrival probability [{start}][{dest}] = {p} is outside [0, 1]"
                    )));
                }
                if start == dest && p != 0.0 {
                    return Err(LiftError::Config(format!(
                        "arrival probability [{start}][{start}] must be zero, got {p}"
                    )));
                }
                probs.push(p);
            }
        }

        Ok(Self { floors, probs })
    }

    /// The seven-floor office building the simulator ships with.
    pub fn building() -> Self {
        Self {
            floors: BUILDING_ARRIVALS.len(),
            probs:  BUILDING_ARRIVALS.iter().flatten().copied().collect(),
        }
    }

    /// A matrix where every off-diagonal pair has the same probability `p`.
    pub fn uniform(floors: usize, p: f64) -> LiftResult<Self> {
        let rows = (0..floors)
            .map(|i| (0..floors).map(|j| if i == j { 0.0 } else { p }).collect())
            .collect();
        Self::new(rows)
    }

    /// Number of floors in the shaft (matrix dimension).
    #[inline]
    pub fn floors(&self) -> usize {
        self.floors
    }

    #[inline]
    pub fn probability(&self, start: Floor, destination: Floor) -> f64 {
        self.probs[start.index() * self.floors + destination.index()]
    }

    /// Iterate `(start, destination, p)` in row-major order.
    pub fn pairs(&self) -> impl Iterator<Item = (Floor, Floor, f64)> + '_ {
        let n = self.floors;
        self.probs
            .iter()
            .enumerate()
            .map(move |(k, &p)| (Floor((k / n) as u8), Floor((k % n) as u8), p))
    }

    /// Expected number of new passengers per step.
    pub fn expected_arrivals(&self) -> f64 {
        self.probs.iter().sum()
    }

    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.probs.chunks(self.floors).map(<[f64]>::to_vec).collect()
    }
}

impl Default for ArrivalMatrix {
    fn default() -> Self {
        Self::building()
    }
}

impl TryFrom<Vec<Vec<f64>>> for ArrivalMatrix {
    type Error = LiftError;
    fn try_from(rows: Vec<Vec<f64>>) -> LiftResult<Self> {
        Self::new(rows)
    }
}

impl From<ArrivalMatrix> for Vec<Vec<f64>> {
    fn from(m: ArrivalMatrix) -> Self {
        m.rows()
    }
}

// ── BacklogConfig ─────────────────────────────────────────────────────────────

/// How `reset` seeds an episode with waiting passengers.
///
/// The target is drawn uniformly from `0..max_target`; the arrival model is
/// then called until the target is reached or `max_attempts` calls were made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacklogConfig {
    pub max_target:   usize,
    pub max_attempts: usize,
}

impl Default for BacklogConfig {
    fn default() -> Self {
        Self { max_target: 10, max_attempts: 15 }
    }
}

// ── LiftConfig ────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built in code or loaded from a TOML file by the application
/// crate (with the `serde` feature) and handed to the session builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LiftConfig {
    /// Cabin capacity enforced when admitting passengers.  Must be positive.
    pub max_capacity: usize,

    /// Per-step arrival probabilities; its dimension fixes the floor count.
    pub arrivals: ArrivalMatrix,

    /// Master RNG seed.  The same seed always produces identical episodes.
    pub seed: u64,

    /// Initial passenger backlog drawn by `reset`.
    pub backlog: BacklogConfig,
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            max_capacity: 4,
            arrivals:     ArrivalMatrix::building(),
            seed:         42,
            backlog:      BacklogConfig::default(),
        }
    }
}

impl LiftConfig {
    #[inline]
    pub fn floors(&self) -> usize {
        self.arrivals.floors()
    }

    /// Check the invariants the matrix type cannot carry on its own.
    pub fn validate(&self) -> LiftResult<()> {
        if self.max_capacity == 0 {
            return Err(LiftError::Config("max_capacity must be positive".into()));
        }
        Ok(())
    }
}
