//! Boat assembly flow: drag, snap, complete, advance.
//!
//! State machine:
//! 1. `begin(id)` loads a level template, scatters the parts at their start
//!    positions and moves Loading → InProgress
//! 2. Each release within the snap threshold of a part's target locks the part
//!    in place; anything else leaves the part where it was dropped
//! 3. The snap that places the last part moves InProgress → Complete, reports
//!    the stars and fires the celebration cues, exactly once
//! 4. From Complete the player can replay the same boat or advance to the next
//!
//! All transitions happen synchronously inside the call. The returned
//! [`AssemblyEvent`]s tell a renderer what to animate; it never has to own
//! game state.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::feedback::{FeedbackSink, SoundEffect};
use crate::geometry::{Vec2, Viewport};
use crate::levels::{self, BoatType};
use crate::parts::PartKind;
use crate::progress::ProgressStore;

/// Index of a part within its level, in authored order.
pub type PartId = usize;

/// A draggable piece, owned by the active [`Level`].
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub id: PartId,
    pub kind: PartKind,
    pub label: &'static str,
    pub start: Vec2,
    pub position: Vec2,
    /// Parts without a target never snap.
    pub target: Option<Vec2>,
    pub snapped: bool,
}

impl Part {
    pub fn layer(&self) -> u8 {
        self.kind.layer()
    }

    /// Distance from `position` to this part's target, if it has one.
    pub fn distance_to_target(&self, position: Vec2) -> Option<f32> {
        self.target.map(|t| position.distance(t))
    }
}

/// A level instance: template data resolved against a viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub id: u32,
    pub name: &'static str,
    pub boat_type: BoatType,
    pub parts: Vec<Part>,
}

impl Level {
    /// Instantiate the level for `id` (or the fallback) with fresh parts.
    pub fn load(id: u32, viewport: &Viewport) -> Self {
        let (resolved, template) = levels::level_template(id);
        let parts = template
            .parts
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let start = p.start.resolve(viewport);
                Part {
                    id: i,
                    kind: p.kind,
                    label: p.label(),
                    start,
                    position: start,
                    target: p.target.map(|t| t.resolve(viewport)),
                    snapped: false,
                }
            })
            .collect();
        Self {
            id: resolved,
            name: template.name,
            boat_type: template.boat_type,
            parts,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.parts.iter().all(|p| p.snapped)
    }

    /// First unsnapped part in authored order.
    pub fn next_unsnapped(&self) -> Option<&Part> {
        self.parts.iter().find(|p| !p.snapped)
    }
}

/// Where the flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Loading,
    InProgress,
    Complete,
}

/// What happened during a call, for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum AssemblyEvent {
    LevelStarted {
        level_id: u32,
        name: &'static str,
        part_count: usize,
    },
    /// The part the player should look for next.
    NextHint { part: PartId, label: &'static str },
    /// A part locked into place at its target.
    PartSnapped {
        part: PartId,
        position: Vec2,
        layer: u8,
    },
    /// A part was released short of its target and stays where it fell.
    PartDropped { part: PartId, position: Vec2 },
    LevelComplete {
        level_id: u32,
        stars: u8,
        can_advance: bool,
    },
}

/// Owns the active level and the session counters.
#[derive(Debug, Clone)]
pub struct BoatAssembly {
    snap_threshold: f32,
    stars_per_level: u8,
    viewport: Viewport,
    current_level: u32,
    level: Option<Level>,
    snapped_count: usize,
    phase: Phase,
    dragging: Option<PartId>,
}

impl BoatAssembly {
    /// A flow that has not loaded anything yet. Call [`begin`](Self::begin).
    pub fn new(config: &GameConfig) -> Self {
        Self {
            snap_threshold: config.snap_threshold,
            stars_per_level: config.stars_per_level,
            viewport: config.viewport,
            current_level: levels::FALLBACK_LEVEL_ID,
            level: None,
            snapped_count: 0,
            phase: Phase::Loading,
            dragging: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn snapped_count(&self) -> usize {
        self.snapped_count
    }

    pub fn part_count(&self) -> usize {
        self.level.as_ref().map_or(0, |l| l.parts.len())
    }

    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.level.as_ref().and_then(|l| l.parts.get(id))
    }

    pub fn dragging(&self) -> Option<PartId> {
        self.dragging
    }

    pub fn snap_threshold(&self) -> f32 {
        self.snap_threshold
    }

    /// Change the screen size. Takes effect on the next `begin`.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Load `level_id` (unknown ids degrade to level 1) and start play.
    pub fn begin(&mut self, level_id: u32) -> Vec<AssemblyEvent> {
        self.phase = Phase::Loading;
        self.dragging = None;
        self.snapped_count = 0;

        let level = Level::load(level_id, &self.viewport);
        self.current_level = level.id;
        log::debug!(
            "Loaded level {} ({}) with {} parts",
            level.id,
            level.name,
            level.parts.len()
        );

        let mut events = vec![AssemblyEvent::LevelStarted {
            level_id: level.id,
            name: level.name,
            part_count: level.parts.len(),
        }];
        self.level = Some(level);
        self.phase = Phase::InProgress;
        events.extend(self.next_hint());
        events
    }

    /// Hint for the first unsnapped part, if any remain.
    pub fn next_hint(&self) -> Option<AssemblyEvent> {
        self.level
            .as_ref()
            .and_then(Level::next_unsnapped)
            .map(|p| AssemblyEvent::NextHint {
                part: p.id,
                label: p.label,
            })
    }

    /// Pick up a part. Returns false if it can't be dragged.
    pub fn on_drag_start(&mut self, part: PartId, feedback: &mut dyn FeedbackSink) -> bool {
        if !self.is_draggable(part) {
            return false;
        }
        self.dragging = Some(part);
        feedback.play_effect(SoundEffect::Whoosh);
        true
    }

    /// Follow the pointer. Returns false if the part can't be dragged.
    pub fn on_drag_move(&mut self, part: PartId, position: Vec2) -> bool {
        if !self.is_draggable(part) {
            return false;
        }
        if let Some(p) = self.part_mut(part) {
            p.position = position;
        }
        true
    }

    /// Drop a part and decide whether it snapped.
    pub fn on_drag_release(
        &mut self,
        part: PartId,
        position: Vec2,
        feedback: &mut dyn FeedbackSink,
        progress: &mut dyn ProgressStore,
    ) -> Vec<AssemblyEvent> {
        // A pointer release ends whatever drag was in flight.
        self.dragging = None;
        if !self.is_draggable(part) {
            return Vec::new();
        }

        let threshold = self.snap_threshold;
        let Some(p) = self.part_mut(part) else {
            return Vec::new();
        };

        let within = p
            .distance_to_target(position)
            .is_some_and(|d| d < threshold);
        let target = match (within, p.target) {
            (true, Some(target)) => target,
            _ => {
                p.position = position;
                return vec![AssemblyEvent::PartDropped { part, position }];
            }
        };

        p.position = target;
        p.snapped = true;
        let layer = p.layer();
        self.snapped_count += 1;
        feedback.play_effect(SoundEffect::Snap);
        feedback.play_effect(SoundEffect::Ding);

        let mut events = vec![AssemblyEvent::PartSnapped {
            part,
            position: target,
            layer,
        }];
        if self.snapped_count == self.part_count() {
            events.extend(self.on_level_complete(feedback, progress));
        } else {
            events.extend(self.next_hint());
        }
        events
    }

    /// Celebrate and report. Runs once per level: a second call is a no-op.
    fn on_level_complete(
        &mut self,
        feedback: &mut dyn FeedbackSink,
        progress: &mut dyn ProgressStore,
    ) -> Option<AssemblyEvent> {
        if self.phase != Phase::InProgress {
            return None;
        }
        self.phase = Phase::Complete;
        self.dragging = None;

        feedback.play_effect(SoundEffect::Cheer);
        feedback.play_effect(SoundEffect::Horn);

        let stars = self.stars_per_level;
        progress.record_level_completion(self.current_level, stars);
        log::info!(
            "Level {} complete, awarded {} stars",
            self.current_level,
            stars
        );

        Some(AssemblyEvent::LevelComplete {
            level_id: self.current_level,
            stars,
            can_advance: levels::has_next(self.current_level),
        })
    }

    /// Whether "advance" is on offer right now.
    pub fn can_advance(&self) -> bool {
        self.phase == Phase::Complete && levels::has_next(self.current_level)
    }

    /// Build the same boat again. Only offered once the level is complete.
    pub fn replay(&mut self, feedback: &mut dyn FeedbackSink) -> Option<Vec<AssemblyEvent>> {
        if self.phase != Phase::Complete {
            return None;
        }
        feedback.play_effect(SoundEffect::Tap);
        Some(self.begin(self.current_level))
    }

    /// Move on to the next boat. Only offered while more levels remain.
    pub fn advance(&mut self, feedback: &mut dyn FeedbackSink) -> Option<Vec<AssemblyEvent>> {
        if !self.can_advance() {
            return None;
        }
        feedback.play_effect(SoundEffect::Tap);
        Some(self.begin(self.current_level + 1))
    }

    /// "3 / 5 parts"
    pub fn progress_text(&self) -> String {
        format!("{} / {} parts", self.snapped_count, self.part_count())
    }

    /// Instruction line for the helper character.
    pub fn hint_text(&self) -> String {
        match self.level.as_ref().and_then(Level::next_unsnapped) {
            Some(p) => format!("Can you place the {}?", p.label),
            None => "All aboard! Your boat is ready.".to_string(),
        }
    }

    fn is_draggable(&self, part: PartId) -> bool {
        self.phase == Phase::InProgress && self.part(part).is_some_and(|p| !p.snapped)
    }

    fn part_mut(&mut self, id: PartId) -> Option<&mut Part> {
        self.level.as_mut().and_then(|l| l.parts.get_mut(id))
    }
}
