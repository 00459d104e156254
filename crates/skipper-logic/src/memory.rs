//! Undersea memory match.
//!
//! Board size follows the player's best score so far: easy 3×4 (6 pairs),
//! medium 4×4 (8 pairs), hard 4×6 (12 pairs). The deck is shuffled with a
//! seedable RNG so a given seed always deals the same board.
//!
//! Flow: Preview (everything face up) → Picking → two cards up → either a
//! match (cards stay up) or Mismatch (flips refused until `hide_mismatch`)
//! → … → Complete. Every second flip costs one move.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::feedback::{FeedbackSink, SoundEffect};
use crate::geometry::{Vec2, Viewport};
use crate::progress::ProgressStore;

/// Sea friends printed on the card faces.
pub const ICONS: [&str; 12] = [
    "⛵", "🚤", "🛥️", "⚓", "🐟", "🐠", "🦈", "🐙", "🦀", "🐚", "⭐", "🌊",
];

pub const CARD_WIDTH: f32 = 120.0;
pub const CARD_HEIGHT: f32 = 140.0;
pub const CARD_PADDING: f32 = 20.0;
/// Space reserved above the grid for the title and counters.
pub const UI_TOP_SPACE: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Harder boards unlock as the high score climbs.
    pub fn from_high_score(high_score: u32) -> Self {
        if high_score > 10 {
            Difficulty::Hard
        } else if high_score > 5 {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }

    pub fn pairs(self) -> usize {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Medium => 8,
            Difficulty::Hard => 12,
        }
    }

    /// (columns, rows)
    pub fn grid(self) -> (u32, u32) {
        match self {
            Difficulty::Easy => (3, 4),
            Difficulty::Medium => (4, 4),
            Difficulty::Hard => (4, 6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Index into [`ICONS`].
    pub icon: usize,
    pub face_up: bool,
    pub matched: bool,
    pub grid_x: u32,
    pub grid_y: u32,
}

impl Card {
    pub fn icon_str(&self) -> &'static str {
        ICONS[self.icon]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryPhase {
    Preview,
    Picking,
    /// Two unmatched cards are showing; waiting for `hide_mismatch`.
    Mismatch,
    Complete,
}

/// Result of tapping a card.
#[derive(Debug, Clone, PartialEq)]
pub enum FlipOutcome {
    /// Tap ignored (wrong phase, already up, or out of range).
    Refused,
    /// First card of a pair is showing.
    FirstCard { card: usize },
    Matched { a: usize, b: usize },
    Mismatch { a: usize, b: usize },
    /// The final pair matched.
    Complete { score: u32, moves: u32 },
}

/// One round of memory match.
#[derive(Debug, Clone)]
pub struct MemoryGame {
    difficulty: Difficulty,
    cards: Vec<Card>,
    flipped: Vec<usize>,
    matches: usize,
    moves: u32,
    phase: MemoryPhase,
}

impl MemoryGame {
    /// Deal a fresh board, face up for the preview.
    pub fn new<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        let pairs = difficulty.pairs();
        let mut icons: Vec<usize> = (0..pairs).flat_map(|i| [i, i]).collect();
        icons.shuffle(rng);

        let (cols, _) = difficulty.grid();
        let cards = icons
            .into_iter()
            .enumerate()
            .map(|(i, icon)| Card {
                icon,
                face_up: true,
                matched: false,
                grid_x: i as u32 % cols,
                grid_y: i as u32 / cols,
            })
            .collect();

        Self {
            difficulty,
            cards,
            flipped: Vec::with_capacity(2),
            matches: 0,
            moves: 0,
            phase: MemoryPhase::Preview,
        }
    }

    /// Deal with a fixed seed, or fresh entropy when `seed` is `None`.
    pub fn with_seed(difficulty: Difficulty, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::new(difficulty, &mut rng)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn phase(&self) -> MemoryPhase {
        self.phase
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn total_pairs(&self) -> usize {
        self.difficulty.pairs()
    }

    /// Fewer moves score higher; never negative.
    pub fn score(&self) -> u32 {
        (self.total_pairs() as u32 * 3).saturating_sub(self.moves)
    }

    /// Turn the preview cards face down and let the player start.
    pub fn end_preview(&mut self) -> bool {
        if self.phase != MemoryPhase::Preview {
            return false;
        }
        for c in &mut self.cards {
            c.face_up = false;
        }
        self.phase = MemoryPhase::Picking;
        true
    }

    /// Tap a card.
    pub fn flip(
        &mut self,
        index: usize,
        feedback: &mut dyn FeedbackSink,
        progress: &mut dyn ProgressStore,
    ) -> FlipOutcome {
        if self.phase != MemoryPhase::Picking {
            return FlipOutcome::Refused;
        }
        match self.cards.get(index) {
            Some(c) if !c.face_up && !c.matched => {}
            _ => return FlipOutcome::Refused,
        }

        feedback.play_effect(SoundEffect::Tap);
        feedback.play_effect(SoundEffect::Whoosh);
        self.cards[index].face_up = true;
        self.flipped.push(index);

        if self.flipped.len() < 2 {
            return FlipOutcome::FirstCard { card: index };
        }

        self.moves += 1;
        let (a, b) = (self.flipped[0], self.flipped[1]);
        if self.cards[a].icon != self.cards[b].icon {
            feedback.play_effect(SoundEffect::Tap);
            self.phase = MemoryPhase::Mismatch;
            return FlipOutcome::Mismatch { a, b };
        }

        feedback.play_effect(SoundEffect::Success);
        feedback.play_effect(SoundEffect::Ding);
        self.cards[a].matched = true;
        self.cards[b].matched = true;
        self.flipped.clear();
        self.matches += 1;

        if self.matches < self.total_pairs() {
            return FlipOutcome::Matched { a, b };
        }

        self.phase = MemoryPhase::Complete;
        feedback.play_effect(SoundEffect::Cheer);
        let score = self.score();
        progress.record_memory_score(score);
        log::info!("Memory game complete: score {} in {} moves", score, self.moves);
        FlipOutcome::Complete {
            score,
            moves: self.moves,
        }
    }

    /// Turn a mismatched pair back over.
    pub fn hide_mismatch(&mut self, feedback: &mut dyn FeedbackSink) -> bool {
        if self.phase != MemoryPhase::Mismatch {
            return false;
        }
        for i in self.flipped.drain(..) {
            self.cards[i].face_up = false;
            feedback.play_effect(SoundEffect::Whoosh);
        }
        self.phase = MemoryPhase::Picking;
        true
    }

    /// Centre of a card on screen, with the grid centred below the header.
    pub fn card_position(&self, index: usize, viewport: &Viewport) -> Option<Vec2> {
        let card = self.cards.get(index)?;
        let (cols, rows) = self.difficulty.grid();
        let grid_w = cols as f32 * CARD_WIDTH + (cols as f32 - 1.0) * CARD_PADDING;
        let grid_h = rows as f32 * CARD_HEIGHT + (rows as f32 - 1.0) * CARD_PADDING;
        let available_h = viewport.height - UI_TOP_SPACE;

        let start_x = (viewport.width - grid_w) / 2.0 + CARD_WIDTH / 2.0;
        let start_y = UI_TOP_SPACE + (available_h - grid_h) / 2.0 + CARD_HEIGHT / 2.0;
        Some(Vec2::new(
            start_x + card.grid_x as f32 * (CARD_WIDTH + CARD_PADDING),
            start_y + card.grid_y as f32 * (CARD_HEIGHT + CARD_PADDING),
        ))
    }

    /// Line for the turtle guide.
    pub fn helper_text(&self) -> String {
        match self.phase {
            MemoryPhase::Preview => "Peek time! Remember the sea friends.".to_string(),
            MemoryPhase::Mismatch => "Not a match yet. Try another pair!".to_string(),
            MemoryPhase::Complete => "Amazing memory! Tap play again to swim more.".to_string(),
            MemoryPhase::Picking => match self.flipped.first() {
                Some(&i) => format!("Can you find another {}?", self.cards[i].icon_str()),
                None => "Tap a card to find a matching friend.".to_string(),
            },
        }
    }
}
