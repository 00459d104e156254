//! Pure game logic for Little Skipper.
//!
//! Everything here is independent of any renderer, audio backend, or storage.
//! Mini-games take input events plus two collaborators (a
//! [`feedback::FeedbackSink`] for cues and a [`progress::ProgressStore`] for
//! results) and return plain events for the renderer to animate.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`assembly`] | Drag-and-snap boat building, level progression |
//! | [`config`] | Tunable game parameters and validation |
//! | [`drawing`] | Free drawing canvas, palette, trace templates |
//! | [`feedback`] | Sound cues, feedback sink trait, audio toggles |
//! | [`geometry`] | Points, viewport, anchors relative to edges and water line |
//! | [`levels`] | Static table of the ten boat layouts |
//! | [`memory`] | Memory match card game |
//! | [`parts`] | Boat part kinds, names, draw layers |
//! | [`progress`] | Stars, unlocks, stickers, high scores |

pub mod assembly;
pub mod config;
pub mod drawing;
pub mod feedback;
pub mod geometry;
pub mod levels;
pub mod memory;
pub mod parts;
pub mod progress;
