//! Player progress: stars per boat, stickers, memory and drawing records.
//!
//! [`GameProgress`] is plain data plus the reward rules. It implements
//! [`ProgressStore`] so the mini-games can report into it directly; the
//! engine crate wraps it with persistence.

use serde::{Deserialize, Serialize};

use crate::levels::{self, BoatType, LEVEL_COUNT};

/// Highest star rating a boat level can earn.
pub const MAX_STARS: u8 = 3;

/// Memory high score that awards the `memory_master` sticker.
pub const MEMORY_MASTER_SCORE: u32 = 10;

/// Drawing counts that award artist stickers.
pub const ARTIST_MILESTONES: [(u32, &str); 2] = [(5, "artist_5"), (20, "artist_20")];

/// Where the mini-games report results. Calls are fire-and-forget.
pub trait ProgressStore {
    /// Record a finished boat. Keeps the best star count per level.
    fn record_level_completion(&mut self, level_id: u32, stars: u8);
    /// Record a finished memory game score.
    fn record_memory_score(&mut self, score: u32);
    /// Record one saved drawing.
    fn record_drawing(&mut self);
}

/// Saved state for one boat level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoatLevelRecord {
    pub id: u32,
    pub name: String,
    pub boat_type: BoatType,
    /// 0–3.
    pub stars: u8,
    pub completed: bool,
    pub unlocked: bool,
}

/// Everything persisted between play sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameProgress {
    pub boat_levels: Vec<BoatLevelRecord>,
    pub memory_high_score: u32,
    pub drawing_count: u32,
    pub total_stars: u32,
    pub stickers_unlocked: Vec<String>,
    /// Unix seconds of the last save; stamped by the engine.
    pub last_played: u64,
}

impl Default for GameProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl GameProgress {
    /// Fresh progress: every boat listed, only the first unlocked.
    pub fn new() -> Self {
        let boat_levels = levels::all_levels()
            .map(|(id, t)| BoatLevelRecord {
                id,
                name: t.name.to_string(),
                boat_type: t.boat_type,
                stars: 0,
                completed: false,
                unlocked: id == 1,
            })
            .collect();
        Self {
            boat_levels,
            memory_high_score: 0,
            drawing_count: 0,
            total_stars: 0,
            stickers_unlocked: Vec::new(),
            last_played: 0,
        }
    }

    pub fn boat_level(&self, id: u32) -> Option<&BoatLevelRecord> {
        self.boat_levels.iter().find(|l| l.id == id)
    }

    pub fn has_sticker(&self, sticker: &str) -> bool {
        self.stickers_unlocked.iter().any(|s| s == sticker)
    }

    fn award_sticker(&mut self, sticker: &str) {
        if !self.has_sticker(sticker) {
            log::info!("Sticker unlocked: {}", sticker);
            self.stickers_unlocked.push(sticker.to_string());
        }
    }

    /// Mark a boat level complete. Unknown ids are ignored.
    pub fn complete_boat_level(&mut self, level_id: u32, stars: u8) {
        let stars = stars.min(MAX_STARS);
        let Some(level) = self.boat_levels.iter_mut().find(|l| l.id == level_id) else {
            log::debug!("Ignoring completion for unknown level {}", level_id);
            return;
        };

        let old_stars = level.stars;
        level.completed = true;
        level.stars = level.stars.max(stars);
        self.total_stars += u32::from(level.stars - old_stars);

        if let Some(next) = self.boat_levels.iter_mut().find(|l| l.id == level_id + 1) {
            next.unlocked = true;
        }

        if stars == MAX_STARS {
            self.award_sticker(&format!("boat_{}", level_id));
        }
    }

    /// Raise the memory high score if `score` beats it.
    pub fn update_memory_score(&mut self, score: u32) {
        if score > self.memory_high_score {
            self.memory_high_score = score;
            if score >= MEMORY_MASTER_SCORE {
                self.award_sticker("memory_master");
            }
        }
    }

    pub fn increment_drawing_count(&mut self) {
        self.drawing_count += 1;
        for (milestone, sticker) in ARTIST_MILESTONES {
            if self.drawing_count == milestone {
                self.award_sticker(sticker);
            }
        }
    }

    /// Number of boat levels completed at least once.
    pub fn completed_levels(&self) -> usize {
        self.boat_levels.iter().filter(|l| l.completed).count()
    }

    /// Whether every boat in the table has been built.
    pub fn all_boats_built(&self) -> bool {
        self.completed_levels() == LEVEL_COUNT as usize
    }

    /// Start over from scratch.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl ProgressStore for GameProgress {
    fn record_level_completion(&mut self, level_id: u32, stars: u8) {
        self.complete_boat_level(level_id, stars);
    }

    fn record_memory_score(&mut self, score: u32) {
        self.update_memory_score(score);
    }

    fn record_drawing(&mut self) {
        self.increment_drawing_count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_progress_unlocks_only_first_boat() {
        let p = GameProgress::new();
        assert_eq!(p.boat_levels.len(), LEVEL_COUNT as usize);
        assert!(p.boat_level(1).unwrap().unlocked);
        assert!(p.boat_levels[1..].iter().all(|l| !l.unlocked));
        assert_eq!(p.total_stars, 0);
    }

    #[test]
    fn test_completion_keeps_best_stars() {
        let mut p = GameProgress::new();
        p.complete_boat_level(2, 3);
        p.complete_boat_level(2, 1);
        let l = p.boat_level(2).unwrap();
        assert_eq!(l.stars, 3);
        assert!(l.completed);
        assert_eq!(p.total_stars, 3);
    }

    #[test]
    fn test_total_stars_tracks_improvements() {
        let mut p = GameProgress::new();
        p.complete_boat_level(1, 1);
        p.complete_boat_level(1, 2);
        p.complete_boat_level(3, 3);
        assert_eq!(p.total_stars, 5);
    }

    #[test]
    fn test_stars_are_clamped() {
        let mut p = GameProgress::new();
        p.complete_boat_level(1, 9);
        assert_eq!(p.boat_level(1).unwrap().stars, MAX_STARS);
        assert_eq!(p.total_stars, 3);
    }

    #[test]
    fn test_completion_unlocks_next_level() {
        let mut p = GameProgress::new();
        p.complete_boat_level(1, 3);
        assert!(p.boat_level(2).unwrap().unlocked);
        assert!(!p.boat_level(3).unwrap().unlocked);
        // Last level has nothing to unlock.
        p.complete_boat_level(LEVEL_COUNT, 3);
    }

    #[test]
    fn test_unknown_level_is_ignored() {
        let mut p = GameProgress::new();
        let before = p.clone();
        p.complete_boat_level(11, 3);
        p.complete_boat_level(0, 3);
        assert_eq!(p, before);
    }

    #[test]
    fn test_boat_sticker_awarded_once_for_full_stars() {
        let mut p = GameProgress::new();
        p.complete_boat_level(1, 2);
        assert!(!p.has_sticker("boat_1"));
        p.complete_boat_level(1, 3);
        p.complete_boat_level(1, 3);
        assert_eq!(
            p.stickers_unlocked.iter().filter(|s| *s == "boat_1").count(),
            1
        );
    }

    #[test]
    fn test_memory_high_score_and_sticker() {
        let mut p = GameProgress::new();
        p.update_memory_score(7);
        p.update_memory_score(4);
        assert_eq!(p.memory_high_score, 7);
        assert!(!p.has_sticker("memory_master"));
        p.update_memory_score(10);
        assert!(p.has_sticker("memory_master"));
    }

    #[test]
    fn test_drawing_milestones() {
        let mut p = GameProgress::new();
        for _ in 0..4 {
            p.record_drawing();
        }
        assert!(!p.has_sticker("artist_5"));
        p.record_drawing();
        assert!(p.has_sticker("artist_5"));
        for _ in 0..15 {
            p.record_drawing();
        }
        assert_eq!(p.drawing_count, 20);
        assert!(p.has_sticker("artist_20"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut p = GameProgress::new();
        p.complete_boat_level(1, 3);
        p.update_memory_score(12);
        p.reset();
        assert_eq!(p, GameProgress::new());
    }
}
