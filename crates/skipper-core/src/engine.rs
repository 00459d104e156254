//! Game engine - main entry point for hosting the mini-games
//!
//! The engine owns the progress store, the audio toggles and whichever
//! mini-game is on screen. Input from the renderer is routed to the active
//! game; cues pass through [`SfxGate`] so muting effects silences every game.

use std::path::PathBuf;

use skipper_logic::assembly::{AssemblyEvent, BoatAssembly, PartId};
use skipper_logic::config::{validate_config, ConfigError, GameConfig};
use skipper_logic::drawing::{DrawingSession, Template, Tool};
use skipper_logic::feedback::{AudioSettings, FeedbackSink, SoundEffect};
use skipper_logic::geometry::Vec2;
use skipper_logic::memory::{Difficulty, FlipOutcome, MemoryGame};
use skipper_logic::progress::GameProgress;

use crate::persistence::{FileProgressStore, StoreError};

/// Forwards cues to `inner` only while effects are enabled.
pub struct SfxGate<'a> {
    inner: &'a mut dyn FeedbackSink,
    enabled: bool,
}

impl<'a> SfxGate<'a> {
    pub fn new(inner: &'a mut dyn FeedbackSink, settings: AudioSettings) -> Self {
        Self {
            inner,
            enabled: settings.sfx_enabled,
        }
    }
}

impl FeedbackSink for SfxGate<'_> {
    fn play_effect(&mut self, effect: SoundEffect) {
        if self.enabled {
            self.inner.play_effect(effect);
        }
    }
}

/// Which screen is showing
#[derive(Debug, Clone)]
pub enum ActiveGame {
    Menu,
    Assembly(BoatAssembly),
    Memory(MemoryGame),
    Drawing(DrawingSession),
}

/// Error building an engine
#[derive(Debug)]
pub enum EngineError {
    Config(Vec<ConfigError>),
    Store(StoreError),
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        EngineError::Store(e)
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Config(errors) => {
                write!(f, "invalid config:")?;
                for e in errors {
                    write!(f, " {};", e)?;
                }
                Ok(())
            }
            EngineError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EngineError {}

/// Main game engine
pub struct GameEngine<S: FeedbackSink> {
    /// Shared tuning for every mini-game
    pub config: GameConfig,
    store: FileProgressStore,
    sink: S,
    active: ActiveGame,
}

impl<S: FeedbackSink> GameEngine<S> {
    /// An engine with in-memory progress
    pub fn new(config: GameConfig, sink: S) -> Result<Self, EngineError> {
        Self::with_store(config, sink, FileProgressStore::in_memory())
    }

    /// An engine whose progress lives in `path` (created on first save)
    pub fn open(config: GameConfig, sink: S, path: impl Into<PathBuf>) -> Result<Self, EngineError> {
        let store = FileProgressStore::open(path)?;
        Self::with_store(config, sink, store)
    }

    fn with_store(config: GameConfig, sink: S, store: FileProgressStore) -> Result<Self, EngineError> {
        let errors = validate_config(&config);
        if !errors.is_empty() {
            return Err(EngineError::Config(errors));
        }
        Ok(Self {
            config,
            store,
            sink,
            active: ActiveGame::Menu,
        })
    }

    pub fn progress(&self) -> &GameProgress {
        self.store.progress()
    }

    pub fn audio(&self) -> AudioSettings {
        self.store.audio()
    }

    pub fn store(&self) -> &FileProgressStore {
        &self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn active(&self) -> &ActiveGame {
        &self.active
    }

    /// Menu button press; plays `tap` like every other button
    pub fn tap(&mut self) {
        let audio = self.store.audio();
        SfxGate::new(&mut self.sink, audio).play_effect(SoundEffect::Tap);
    }

    pub fn toggle_music(&mut self) -> bool {
        let mut enabled = false;
        self.store.update(|d| enabled = d.audio.toggle_music());
        log::debug!("Music {}", if enabled { "on" } else { "off" });
        enabled
    }

    pub fn toggle_sfx(&mut self) -> bool {
        let mut enabled = false;
        self.store.update(|d| enabled = d.audio.toggle_sfx());
        log::debug!("Sound effects {}", if enabled { "on" } else { "off" });
        enabled
    }

    /// Wipe all progress (audio settings are kept)
    pub fn reset_progress(&mut self) {
        log::info!("Resetting progress");
        self.store.update(|d| d.progress.reset());
    }

    /// Back to the menu, dropping whatever game was running
    pub fn go_home(&mut self) {
        self.active = ActiveGame::Menu;
    }

    // ── Boat assembly ───────────────────────────────────────────────────

    pub fn start_assembly(&mut self, level_id: u32) -> Vec<AssemblyEvent> {
        let mut flow = BoatAssembly::new(&self.config);
        let events = flow.begin(level_id);
        self.active = ActiveGame::Assembly(flow);
        events
    }

    pub fn assembly(&self) -> Option<&BoatAssembly> {
        match &self.active {
            ActiveGame::Assembly(flow) => Some(flow),
            _ => None,
        }
    }

    pub fn drag_start(&mut self, part: PartId) -> bool {
        let audio = self.store.audio();
        match &mut self.active {
            ActiveGame::Assembly(flow) => {
                flow.on_drag_start(part, &mut SfxGate::new(&mut self.sink, audio))
            }
            _ => false,
        }
    }

    pub fn drag_move(&mut self, part: PartId, position: Vec2) -> bool {
        match &mut self.active {
            ActiveGame::Assembly(flow) => flow.on_drag_move(part, position),
            _ => false,
        }
    }

    pub fn drag_release(&mut self, part: PartId, position: Vec2) -> Vec<AssemblyEvent> {
        let audio = self.store.audio();
        match &mut self.active {
            ActiveGame::Assembly(flow) => flow.on_drag_release(
                part,
                position,
                &mut SfxGate::new(&mut self.sink, audio),
                &mut self.store,
            ),
            _ => Vec::new(),
        }
    }

    pub fn replay_level(&mut self) -> Option<Vec<AssemblyEvent>> {
        let audio = self.store.audio();
        match &mut self.active {
            ActiveGame::Assembly(flow) => flow.replay(&mut SfxGate::new(&mut self.sink, audio)),
            _ => None,
        }
    }

    pub fn next_level(&mut self) -> Option<Vec<AssemblyEvent>> {
        let audio = self.store.audio();
        match &mut self.active {
            ActiveGame::Assembly(flow) => flow.advance(&mut SfxGate::new(&mut self.sink, audio)),
            _ => None,
        }
    }

    // ── Memory match ────────────────────────────────────────────────────

    /// Deal a board sized for the current high score
    pub fn start_memory(&mut self) -> Difficulty {
        let difficulty = Difficulty::from_high_score(self.progress().memory_high_score);
        log::debug!("Starting memory game on {:?}", difficulty);
        let game = MemoryGame::with_seed(difficulty, self.config.memory_seed);
        self.active = ActiveGame::Memory(game);
        difficulty
    }

    pub fn memory(&self) -> Option<&MemoryGame> {
        match &self.active {
            ActiveGame::Memory(game) => Some(game),
            _ => None,
        }
    }

    pub fn end_preview(&mut self) -> bool {
        match &mut self.active {
            ActiveGame::Memory(game) => game.end_preview(),
            _ => false,
        }
    }

    pub fn flip_card(&mut self, index: usize) -> FlipOutcome {
        let audio = self.store.audio();
        match &mut self.active {
            ActiveGame::Memory(game) => game.flip(
                index,
                &mut SfxGate::new(&mut self.sink, audio),
                &mut self.store,
            ),
            _ => FlipOutcome::Refused,
        }
    }

    pub fn hide_mismatch(&mut self) -> bool {
        let audio = self.store.audio();
        match &mut self.active {
            ActiveGame::Memory(game) => game.hide_mismatch(&mut SfxGate::new(&mut self.sink, audio)),
            _ => false,
        }
    }

    // ── Drawing ─────────────────────────────────────────────────────────

    pub fn start_drawing(&mut self) {
        self.active = ActiveGame::Drawing(DrawingSession::new(&self.config.viewport));
    }

    pub fn drawing(&self) -> Option<&DrawingSession> {
        match &self.active {
            ActiveGame::Drawing(session) => Some(session),
            _ => None,
        }
    }

    pub fn select_tool(&mut self, tool: Tool) {
        let audio = self.store.audio();
        if let ActiveGame::Drawing(session) = &mut self.active {
            session.select_tool(tool, &mut SfxGate::new(&mut self.sink, audio));
        }
    }

    pub fn pointer_down(&mut self, at: Vec2) -> bool {
        let audio = self.store.audio();
        match &mut self.active {
            ActiveGame::Drawing(session) => {
                session.pointer_down(at, &mut SfxGate::new(&mut self.sink, audio))
            }
            _ => false,
        }
    }

    pub fn pointer_move(&mut self, at: Vec2) -> bool {
        match &mut self.active {
            ActiveGame::Drawing(session) => session.pointer_move(at),
            _ => false,
        }
    }

    pub fn pointer_up(&mut self) {
        let audio = self.store.audio();
        if let ActiveGame::Drawing(session) = &mut self.active {
            session.pointer_up(&mut SfxGate::new(&mut self.sink, audio));
        }
    }

    pub fn cycle_template(&mut self) -> Option<Template> {
        let audio = self.store.audio();
        match &mut self.active {
            ActiveGame::Drawing(session) => {
                Some(session.cycle_template(&mut SfxGate::new(&mut self.sink, audio)))
            }
            _ => None,
        }
    }

    pub fn clear_drawing(&mut self) {
        let audio = self.store.audio();
        if let ActiveGame::Drawing(session) = &mut self.active {
            session.clear(&mut SfxGate::new(&mut self.sink, audio));
        }
    }

    pub fn finish_drawing(&mut self) {
        let audio = self.store.audio();
        if let ActiveGame::Drawing(session) = &mut self.active {
            session.finish(&mut SfxGate::new(&mut self.sink, audio), &mut self.store);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skipper_logic::assembly::Phase;
    use skipper_logic::feedback::NullSink;
    use skipper_logic::memory::MemoryPhase;

    fn engine() -> GameEngine<Vec<SoundEffect>> {
        let config = GameConfig {
            memory_seed: Some(5),
            ..GameConfig::default()
        };
        GameEngine::new(config, Vec::new()).unwrap()
    }

    fn build_boat(engine: &mut GameEngine<Vec<SoundEffect>>) -> Vec<AssemblyEvent> {
        let mut events = Vec::new();
        let count = engine.assembly().unwrap().part_count();
        for id in 0..count {
            let target = engine.assembly().unwrap().part(id).unwrap().target.unwrap();
            engine.drag_start(id);
            events.extend(engine.drag_release(id, target));
        }
        events
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GameConfig {
            snap_threshold: -1.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            GameEngine::new(config, NullSink),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_assembly_reports_into_progress() {
        let mut engine = engine();
        engine.start_assembly(1);
        build_boat(&mut engine);
        assert_eq!(engine.assembly().unwrap().phase(), Phase::Complete);
        assert_eq!(engine.progress().total_stars, 3);
        assert!(engine.progress().boat_level(2).unwrap().unlocked);

        let events = engine.next_level().unwrap();
        assert!(matches!(
            events[0],
            AssemblyEvent::LevelStarted { level_id: 2, .. }
        ));
    }

    #[test]
    fn test_input_for_other_games_is_ignored() {
        let mut engine = engine();
        assert!(!engine.drag_start(0));
        assert!(engine.drag_release(0, Vec2::new(0.0, 0.0)).is_empty());
        assert_eq!(engine.flip_card(0), FlipOutcome::Refused);
        assert!(!engine.pointer_down(Vec2::new(200.0, 200.0)));
        assert!(engine.cycle_template().is_none());
        assert!(engine.sink().is_empty());
    }

    #[test]
    fn test_muted_effects_are_dropped() {
        let mut engine = engine();
        assert!(!engine.toggle_sfx());
        engine.start_assembly(1);
        build_boat(&mut engine);
        engine.tap();
        assert!(engine.sink().is_empty());
        // Progress is still recorded while muted.
        assert_eq!(engine.progress().completed_levels(), 1);

        assert!(engine.toggle_sfx());
        engine.tap();
        assert_eq!(engine.sink(), &vec![SoundEffect::Tap]);
    }

    #[test]
    fn test_memory_difficulty_follows_high_score() {
        let mut engine = engine();
        assert_eq!(engine.start_memory(), Difficulty::Easy);
        assert!(engine.end_preview());
        assert_eq!(engine.memory().unwrap().phase(), MemoryPhase::Picking);

        let cards: Vec<usize> = engine.memory().unwrap().cards().iter().map(|c| c.icon).collect();
        for i in 0..cards.len() {
            if engine.memory().unwrap().cards()[i].matched {
                continue;
            }
            let j = (i + 1..cards.len()).find(|&j| cards[j] == cards[i]).unwrap();
            engine.flip_card(i);
            engine.flip_card(j);
        }
        assert_eq!(engine.progress().memory_high_score, 12);
        assert_eq!(engine.start_memory(), Difficulty::Hard);
    }

    #[test]
    fn test_drawing_counts_toward_progress() {
        let mut engine = engine();
        engine.start_drawing();
        engine.select_tool(Tool::Red);
        assert!(engine.pointer_down(Vec2::new(200.0, 300.0)));
        assert!(engine.pointer_move(Vec2::new(240.0, 320.0)));
        engine.pointer_up();
        assert_eq!(engine.drawing().unwrap().strokes()[0].tool, Tool::Red);
        engine.finish_drawing();
        assert_eq!(engine.progress().drawing_count, 1);
        assert!(engine.drawing().unwrap().strokes().is_empty());
    }

    #[test]
    fn test_progress_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skipper.json");
        {
            let mut engine = GameEngine::open(GameConfig::default(), NullSink, &path).unwrap();
            engine.toggle_music();
            engine.start_assembly(1);
            let count = engine.assembly().unwrap().part_count();
            for id in 0..count {
                let target = engine.assembly().unwrap().part(id).unwrap().target.unwrap();
                engine.drag_release(id, target);
            }
        }
        let engine = GameEngine::open(GameConfig::default(), NullSink, &path).unwrap();
        assert_eq!(engine.progress().completed_levels(), 1);
        assert!(!engine.audio().music_enabled);
    }

    #[test]
    fn test_reset_keeps_audio() {
        let mut engine = engine();
        engine.toggle_music();
        engine.start_assembly(1);
        build_boat(&mut engine);
        engine.reset_progress();
        assert_eq!(engine.progress().total_stars, 0);
        assert!(!engine.audio().music_enabled);
    }
}
