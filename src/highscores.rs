//! Best runs on this browser
//!
//! A run is ranked by enemies destroyed, and runs with the same score are
//! ordered by how long the player survived. The board is shown on the
//! game-over overlay and kept in LocalStorage.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_MS;

/// Runs kept on the board
pub const MAX_HIGH_SCORES: usize = 10;

/// A finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Enemies destroyed
    pub score: u64,
    /// Ticks survived
    pub ticks: u64,
    /// Unix timestamp (ms) when the run ended
    pub timestamp: f64,
}

impl HighScoreEntry {
    /// Board order: higher score first, then longer survival.
    /// Equal runs keep their insertion order.
    fn board_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.ticks.cmp(&self.ticks))
    }

    /// Seconds survived at the nominal 60 Hz frame rate
    pub fn seconds_survived(&self) -> f64 {
        self.ticks as f64 * FRAME_MS / 1000.0
    }

    /// One line of the game-over board
    pub fn describe(&self) -> String {
        let noun = if self.score == 1 { "kill" } else { "kills" };
        format!("{} {} in {:.1}s", self.score, noun, self.seconds_survived())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "circle_chase_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Would a run with this score and survival time make the board?
    pub fn qualifies(&self, score: u64, ticks: u64) -> bool {
        if score == 0 {
            return false;
        }
        let candidate = HighScoreEntry {
            score,
            ticks,
            timestamp: 0.0,
        };
        self.entries.len() < MAX_HIGH_SCORES
            || self
                .entries
                .last()
                .is_none_or(|last| candidate.board_cmp(last) == Ordering::Less)
    }

    /// Record a finished run; returns its 1-based rank if it made the board
    pub fn add_score(&mut self, score: u64, ticks: u64, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score, ticks) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            ticks,
            timestamp,
        };
        let index = self
            .entries
            .partition_point(|e| e.board_cmp(&entry) != Ordering::Greater);
        self.entries.insert(index, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(index + 1)
    }

    /// Best run so far
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Sort and cap entries that came from storage
    fn normalize(&mut self) {
        self.entries.retain(|e| e.score > 0);
        self.entries.sort_by(HighScoreEntry::board_cmp);
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Load the board from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return Self::from_json(&json);
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save the board to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match serde_json::to_string(self) {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("High scores saved ({} entries)", self.entries.len());
                }
                Err(e) => log::warn!("Could not serialize high scores: {}", e),
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}

    /// Parse a stored board; anything unreadable starts an empty one
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    fn from_json(json: &str) -> Self {
        match serde_json::from_str::<HighScores>(json) {
            Ok(mut scores) => {
                scores.normalize();
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Ignoring corrupt high scores: {}", e);
                Self::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0, 10_000));
        assert!(scores.best().is_none());
    }

    #[test]
    fn test_longer_survival_breaks_score_ties() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5, 600, 0.0), Some(1));
        assert_eq!(scores.add_score(5, 1200, 1.0), Some(1));
        assert_eq!(scores.add_score(5, 300, 2.0), Some(3));
        assert_eq!(scores.add_score(9, 60, 3.0), Some(1));

        let ticks: Vec<u64> = scores.entries.iter().map(|e| e.ticks).collect();
        assert_eq!(ticks, vec![60, 1200, 600, 300]);
        assert_eq!(scores.best().map(|e| e.score), Some(9));
    }

    #[test]
    fn test_identical_run_ranks_below_earlier_one() {
        let mut scores = HighScores::new();
        scores.add_score(4, 500, 0.0);
        assert_eq!(scores.add_score(4, 500, 1.0), Some(2));
        assert_eq!(scores.entries[0].timestamp, 0.0);
    }

    #[test]
    fn test_full_board_needs_to_beat_last_entry() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(s * 10, 100, 0.0);
        }
        // Ties with the last entry on both keys don't get in
        assert!(!scores.qualifies(10, 100));
        assert!(scores.qualifies(10, 101));
        assert_eq!(scores.add_score(5, 9999, 0.0), None);
        assert_eq!(scores.add_score(15, 0, 0.0), Some(MAX_HIGH_SCORES));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(15));
    }

    #[test]
    fn test_describe() {
        let entry = HighScoreEntry {
            score: 1,
            ticks: 90,
            timestamp: 0.0,
        };
        assert_eq!(entry.describe(), "1 kill in 1.5s");
    }

    #[test]
    fn test_stored_board_is_resorted() {
        let json = r#"{"entries":[
            {"score":2,"ticks":10,"timestamp":0.0},
            {"score":0,"ticks":99,"timestamp":0.0},
            {"score":7,"ticks":10,"timestamp":0.0}
        ]}"#;
        let scores = HighScores::from_json(json);
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![7, 2]);
    }

    #[test]
    fn test_corrupt_board_starts_fresh() {
        assert!(HighScores::from_json("not json").entries.is_empty());
    }
}
