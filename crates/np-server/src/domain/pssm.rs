//! Position-specific scoring matrices of motifs

use serde::{Deserialize, Serialize};

/// Letter order used by the sequence logo viewer
pub const LOGO_ALPHABET: [char; 4] = ['A', 'C', 'T', 'G'];

const UPPER_CASE_THRESHOLD: f64 = 0.8;
const LOWER_CASE_THRESHOLD: f64 = 0.5;

/// Nucleotide weights at one motif position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PssmPosition {
    pub a: f64,
    pub c: f64,
    pub g: f64,
    pub t: f64,
}

impl PssmPosition {
    pub fn new(a: f64, c: f64, g: f64, t: f64) -> Self {
        Self { a, c, g, t }
    }

    /// Heaviest letter; on ties the earlier of `a, c, g, t` wins
    fn max_letter(&self) -> (char, f64) {
        let mut best = ('a', self.a);
        for (letter, weight) in [('c', self.c), ('g', self.g), ('t', self.t)] {
            if weight > best.1 {
                best = (letter, weight);
            }
        }
        best
    }

    fn consensus_letter(&self) -> char {
        let (letter, weight) = self.max_letter();
        if weight > UPPER_CASE_THRESHOLD {
            letter.to_ascii_uppercase()
        } else if weight > LOWER_CASE_THRESHOLD {
            letter
        } else {
            '.'
        }
    }

    fn logo_row(&self) -> [f64; 4] {
        [self.a, self.c, self.t, self.g]
    }
}

/// Ordered positions of a motif matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pssm {
    positions: Vec<PssmPosition>,
}

impl Pssm {
    pub fn new(positions: Vec<PssmPosition>) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &[PssmPosition] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// One letter per position: upper case above 0.8, lower case above 0.5, `.` otherwise.
    pub fn consensus(&self) -> String {
        self.positions.iter().map(PssmPosition::consensus_letter).collect()
    }

    /// Matrix rows in [`LOGO_ALPHABET`] order
    pub fn logo_values(&self) -> Vec<[f64; 4]> {
        self.positions.iter().map(PssmPosition::logo_row).collect()
    }
}
