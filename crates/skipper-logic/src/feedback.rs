//! Audio/haptic cues the mini-games ask for.
//!
//! Game logic only names the cue. Whatever sits behind [`FeedbackSink`]
//! decides whether anything is actually played; it must never fail or block.

use serde::{Deserialize, Serialize};

/// Every cue the games can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    Tap,
    Success,
    Wave,
    Horn,
    Ding,
    Whoosh,
    Cheer,
    Snap,
    Splash,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 9] = [
        SoundEffect::Tap,
        SoundEffect::Success,
        SoundEffect::Wave,
        SoundEffect::Horn,
        SoundEffect::Ding,
        SoundEffect::Whoosh,
        SoundEffect::Cheer,
        SoundEffect::Snap,
        SoundEffect::Splash,
    ];

    /// Stable name, also the asset file stem.
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Tap => "tap",
            SoundEffect::Success => "success",
            SoundEffect::Wave => "wave",
            SoundEffect::Horn => "horn",
            SoundEffect::Ding => "ding",
            SoundEffect::Whoosh => "whoosh",
            SoundEffect::Cheer => "cheer",
            SoundEffect::Snap => "snap",
            SoundEffect::Splash => "splash",
        }
    }

    pub fn from_name(name: &str) -> Option<SoundEffect> {
        SoundEffect::ALL.iter().copied().find(|e| e.name() == name)
    }
}

/// Fire-and-forget output for cues.
pub trait FeedbackSink {
    fn play_effect(&mut self, effect: SoundEffect);
}

/// Drops every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FeedbackSink for NullSink {
    fn play_effect(&mut self, _effect: SoundEffect) {}
}

/// Records cues in order. Handy for renderers that batch audio per frame.
impl FeedbackSink for Vec<SoundEffect> {
    fn play_effect(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

/// Player-facing audio toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSettings {
    pub music_enabled: bool,
    pub sfx_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sfx_enabled: true,
        }
    }
}

impl AudioSettings {
    /// Flip the music toggle, returning the new state.
    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.music_enabled
    }

    /// Flip the effects toggle, returning the new state.
    pub fn toggle_sfx(&mut self) -> bool {
        self.sfx_enabled = !self.sfx_enabled;
        self.sfx_enabled
    }
}
