//! Little Skipper Core - game host and progress persistence
//!
//! Wraps the pure mini-games from `skipper-logic` with the state a running
//! app needs: saved progress, audio toggles, and which game is on screen.
//!
//! # Example
//!
//! ```rust,no_run
//! use skipper_core::prelude::*;
//!
//! let mut engine = GameEngine::open(GameConfig::default(), NullSink, "progress.json")
//!     .expect("progress file unreadable");
//!
//! engine.start_assembly(1);
//! engine.drag_start(0);
//! engine.drag_release(0, Vec2::new(512.0, 499.2));
//! println!("{}", engine.assembly().map(|a| a.progress_text()).unwrap_or_default());
//! ```

pub mod engine;
pub mod persistence;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::{ActiveGame, EngineError, GameEngine, SfxGate};
    pub use crate::persistence::{FileProgressStore, SaveData, StoreError};
    pub use skipper_logic::assembly::{AssemblyEvent, Phase};
    pub use skipper_logic::config::GameConfig;
    pub use skipper_logic::feedback::{FeedbackSink, NullSink, SoundEffect};
    pub use skipper_logic::geometry::{Vec2, Viewport};
    pub use skipper_logic::progress::{GameProgress, ProgressStore};
}
