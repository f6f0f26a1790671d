//! High score leaderboard
//!
//! In-memory for the lifetime of the page; tracks the top 10 scores.

use serde::{Deserialize, Serialize};

use crate::sim::Outcome;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// How the run ended
    pub outcome: Outcome,
    /// Seconds of play
    pub elapsed: f32,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a score if it qualifies. Returns the rank achieved (1-indexed).
    pub fn add_score(&mut self, score: u64, outcome: Outcome, elapsed: f32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, outcome, elapsed };

        // Ties keep the earlier entry ahead
        let rank = match self.entries.iter().position(|e| score > e.score) {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score so far (0 when empty)
    pub fn top_score(&self) -> u64 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_and_capped() {
        let mut scores = HighScores::new();
        for s in 1..=15u64 {
            scores.add_score(s * 100, Outcome::GameOver, 10.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), 1500);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(600));
        assert!(scores.entries.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, Outcome::GameOver, 1.0), None);
        assert!(scores.is_empty());
        assert_eq!(scores.top_score(), 0);
    }

    #[test]
    fn test_rank() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(500, Outcome::GameOver, 1.0), Some(1));
        assert_eq!(scores.add_score(900, Outcome::LevelComplete, 1.0), Some(1));
        assert_eq!(scores.add_score(700, Outcome::GameOver, 1.0), Some(2));
        assert_eq!(scores.add_score(500, Outcome::GameOver, 1.0), Some(4));
    }
}
