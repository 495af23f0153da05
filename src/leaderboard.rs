//! High score leaderboard
//!
//! Persisted as plain text, one `name: score` line per entry, best first.
//! Only the top five scores are kept.

use std::fs;
use std::io;
use std::path::Path;

use crate::persistence::{PersistError, write_atomic};

/// Maximum number of high scores to keep
pub const MAX_ENTRIES: usize = 5;

/// Longest name stored on the board
pub const MAX_NAME_LEN: usize = 12;

/// Name used when the player never entered one
pub const DEFAULT_NAME: &str = "Player";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

/// Make a name safe for the `name: score` line format
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_control() && *c != ':')
        .take(MAX_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse the text format, skipping lines that don't fit it
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parsed = line.rsplit_once(':').and_then(|(name, score)| {
                let score = score.trim().parse::<f64>().ok()?;
                (score.is_finite() && score >= 0.0).then(|| LeaderboardEntry {
                    name: sanitize_name(name),
                    score: score as u64,
                })
            });
            match parsed {
                Some(entry) => entries.push(entry),
                None => log::warn!("Skipping malformed leaderboard line {}: {:?}", line_no + 1, line),
            }
        }

        // Stable sort keeps file order among equal scores
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    /// Render the text format
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {}\n", e.name, e.score))
            .collect()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = LeaderboardEntry {
            name: sanitize_name(name),
            score,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_ENTRIES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from disk; a missing file is an empty board
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let board = Self::parse(&text);
                log::info!("Loaded {} high scores", board.entries.len());
                Ok(board)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        write_atomic(path, &self.to_text())?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_sorts_and_truncates() {
        let text = "a: 10\nb: 300\nc: 20.7\nd: 5\ne: 40\nf: 1\n";
        let board = Leaderboard::parse(text);
        let scores: Vec<u64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 40, 20, 10, 5]);
        assert_eq!(board.entries[0].name, "b");
    }

    #[test]
    fn test_parse_skips_malformed() {
        let board = Leaderboard::parse("good: 5\n\nno score here\nbad: x\nneg: -3\n");
        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].name, "good");
    }

    #[test]
    fn test_text_roundtrip() {
        let mut board = Leaderboard::new();
        board.add_score("Ann", 50);
        board.add_score("Bo", 70);
        let text = board.to_text();
        assert_eq!(text, "Bo: 70\nAnn: 50\n");
        assert_eq!(Leaderboard::parse(&text).entries, board.entries);
    }

    #[test]
    fn test_add_score_ranks() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add_score("a", 100), Some(1));
        assert_eq!(board.add_score("b", 200), Some(1));
        assert_eq!(board.add_score("c", 150), Some(2));
        // Ties go below the existing entry
        assert_eq!(board.add_score("d", 150), Some(3));
        assert_eq!(board.top_score(), Some(200));
    }

    #[test]
    fn test_full_board_rejects_low_scores() {
        let mut board = Leaderboard::new();
        for (i, s) in [50, 40, 30, 20, 10].iter().enumerate() {
            board.add_score(&format!("p{i}"), *s);
        }
        assert!(!board.qualifies(10));
        assert_eq!(board.add_score("late", 5), None);
        assert_eq!(board.potential_rank(35), Some(3));
        assert_eq!(board.add_score("mid", 35), Some(3));
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert_eq!(board.entries.last().unwrap().score, 20);
    }

    #[test]
    fn test_zero_score_on_empty_board() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add_score("zero", 0), Some(1));
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("  Bob  "), "Bob");
        assert_eq!(sanitize_name("a:b\nc"), "abc");
        assert_eq!(sanitize_name(""), DEFAULT_NAME);
        assert_eq!(sanitize_name("abcdefghijklmnop"), "abcdefghijkl");
    }

    #[test]
    fn test_load_missing_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.txt");

        let mut board = Leaderboard::load(&path).unwrap();
        assert!(board.is_empty());

        board.add_score("Zed", 321);
        board.save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Zed: 321\n");

        let reloaded = Leaderboard::load(&path).unwrap();
        assert_eq!(reloaded.top_score(), Some(321));
    }

    proptest! {
        #[test]
        fn entries_stay_sorted_and_bounded(scores in proptest::collection::vec(0u64..10_000, 0..30)) {
            let mut board = Leaderboard::new();
            for (i, s) in scores.iter().enumerate() {
                board.add_score(&format!("p{i}"), *s);
            }
            prop_assert!(board.entries.len() <= MAX_ENTRIES);
            prop_assert!(board.entries.windows(2).all(|w| w[0].score >= w[1].score));
            if let Some(max) = scores.iter().max() {
                prop_assert_eq!(board.top_score(), Some(*max));
            }
        }
    }
}
