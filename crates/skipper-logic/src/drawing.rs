//! Free drawing with optional trace-over templates.
//!
//! The session only records strokes as point lists; the renderer turns them
//! into lines using each stroke's tool colour and brush size.

use serde::{Deserialize, Serialize};

use crate::feedback::{FeedbackSink, SoundEffect};
use crate::geometry::{Rect, Vec2, Viewport};
use crate::progress::ProgressStore;

pub const CANVAS_SIDE_MARGIN: f32 = 20.0;
pub const CANVAS_TOP_MARGIN: f32 = 120.0;
pub const CANVAS_BOTTOM_MARGIN: f32 = 180.0;

/// A palette entry: a crayon colour or the eraser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    Red,
    #[default]
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
    Brown,
    Black,
    Eraser,
}

impl Tool {
    /// Palette order.
    pub const ALL: [Tool; 9] = [
        Tool::Red,
        Tool::Blue,
        Tool::Green,
        Tool::Yellow,
        Tool::Orange,
        Tool::Purple,
        Tool::Brown,
        Tool::Black,
        Tool::Eraser,
    ];

    /// 0xRRGGBB. The eraser paints canvas white.
    pub fn color(self) -> u32 {
        match self {
            Tool::Red => 0xFF5252,
            Tool::Blue => 0x4A90E2,
            Tool::Green => 0x4CAF50,
            Tool::Yellow => 0xFFEB3B,
            Tool::Orange => 0xFF9800,
            Tool::Purple => 0x9C27B0,
            Tool::Brown => 0x795548,
            Tool::Black => 0x000000,
            Tool::Eraser => 0xFFFFFF,
        }
    }

    /// Brush width in screen units.
    pub fn size(self) -> f32 {
        match self {
            Tool::Black => 12.0,
            Tool::Eraser => 24.0,
            _ => 10.0,
        }
    }
}

/// Faint outline shown under the strokes for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Template {
    #[default]
    None,
    Sailboat,
    Fish,
    Anchor,
    Waves,
}

impl Template {
    pub const ALL: [Template; 5] = [
        Template::None,
        Template::Sailboat,
        Template::Fish,
        Template::Anchor,
        Template::Waves,
    ];

    /// The template after this one, wrapping back to `None`.
    pub fn next(self) -> Template {
        let i = Template::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Template::ALL[(i + 1) % Template::ALL.len()]
    }
}

/// One continuous pointer drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub tool: Tool,
    pub points: Vec<Vec2>,
}

#[derive(Debug, Clone)]
pub struct DrawingSession {
    canvas: Rect,
    tool: Tool,
    template: Template,
    strokes: Vec<Stroke>,
    drawing: bool,
}

impl DrawingSession {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            canvas: canvas_rect(viewport),
            tool: Tool::default(),
            template: Template::None,
            strokes: Vec::new(),
            drawing: false,
        }
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn template(&self) -> Template {
        self.template
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn select_tool(&mut self, tool: Tool, feedback: &mut dyn FeedbackSink) {
        self.tool = tool;
        feedback.play_effect(SoundEffect::Tap);
    }

    /// Start a stroke. Ignored outside the canvas.
    pub fn pointer_down(&mut self, at: Vec2, feedback: &mut dyn FeedbackSink) -> bool {
        if !self.canvas.contains(at) {
            return false;
        }
        self.drawing = true;
        self.strokes.push(Stroke {
            tool: self.tool,
            points: vec![at],
        });
        feedback.play_effect(SoundEffect::Tap);
        true
    }

    /// Extend the current stroke. Points off the canvas are skipped but the
    /// stroke stays open.
    pub fn pointer_move(&mut self, at: Vec2) -> bool {
        if !self.drawing || !self.canvas.contains(at) {
            return false;
        }
        match self.strokes.last_mut() {
            Some(stroke) => {
                stroke.points.push(at);
                true
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self, feedback: &mut dyn FeedbackSink) {
        if self.drawing {
            feedback.play_effect(SoundEffect::Whoosh);
        }
        self.drawing = false;
    }

    /// Show the next trace template.
    pub fn cycle_template(&mut self, feedback: &mut dyn FeedbackSink) -> Template {
        self.template = self.template.next();
        feedback.play_effect(SoundEffect::Tap);
        self.template
    }

    pub fn clear(&mut self, feedback: &mut dyn FeedbackSink) {
        self.strokes.clear();
        self.drawing = false;
        feedback.play_effect(SoundEffect::Whoosh);
    }

    /// Hand the picture in and start a fresh canvas.
    pub fn finish(&mut self, feedback: &mut dyn FeedbackSink, progress: &mut dyn ProgressStore) {
        progress.record_drawing();
        feedback.play_effect(SoundEffect::Success);
        log::debug!("Drawing finished with {} strokes", self.strokes.len());
        self.strokes.clear();
        self.drawing = false;
    }

    pub fn helper_text(&self) -> &'static str {
        if self.drawing {
            "Great strokes! Keep your finger moving."
        } else if self.template != Template::None {
            "Trace the dotted lines to make a boat!"
        } else if self.strokes.is_empty() {
            "Fresh canvas! Try tracing a boat or draw your own."
        } else {
            "Nice lines! Add more colors or shapes."
        }
    }
}

/// Drawable area inside the header and palette.
pub fn canvas_rect(viewport: &Viewport) -> Rect {
    Rect::new(
        CANVAS_SIDE_MARGIN,
        CANVAS_TOP_MARGIN,
        viewport.width - CANVAS_SIDE_MARGIN * 2.0,
        viewport.height - CANVAS_TOP_MARGIN - CANVAS_BOTTOM_MARGIN,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::NullSink;
    use crate::progress::GameProgress;

    fn session() -> DrawingSession {
        DrawingSession::new(&Viewport::new(1024.0, 768.0))
    }

    #[test]
    fn test_canvas_respects_margins() {
        let c = session().canvas();
        assert_eq!(c, Rect::new(20.0, 120.0, 984.0, 468.0));
    }

    #[test]
    fn test_palette_defaults() {
        assert_eq!(Tool::default(), Tool::Blue);
        assert_eq!(Tool::Eraser.size(), 24.0);
        assert_eq!(Tool::Black.size(), 12.0);
        assert_eq!(Tool::Red.color(), 0xFF5252);
    }

    #[test]
    fn test_stroke_lifecycle_and_cues() {
        let mut s = session();
        let mut sink: Vec<SoundEffect> = Vec::new();
        assert!(s.pointer_down(Vec2::new(100.0, 200.0), &mut sink));
        assert!(s.pointer_move(Vec2::new(110.0, 210.0)));
        assert!(!s.pointer_move(Vec2::new(5.0, 5.0)));
        assert!(s.pointer_move(Vec2::new(120.0, 220.0)));
        s.pointer_up(&mut sink);

        assert_eq!(sink, vec![SoundEffect::Tap, SoundEffect::Whoosh]);
        assert_eq!(s.strokes().len(), 1);
        assert_eq!(s.strokes()[0].points.len(), 3);
        assert_eq!(s.strokes()[0].tool, Tool::Blue);
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let mut s = session();
        let mut sink: Vec<SoundEffect> = Vec::new();
        assert!(!s.pointer_down(Vec2::new(500.0, 50.0), &mut sink));
        assert!(!s.pointer_move(Vec2::new(500.0, 300.0)));
        s.pointer_up(&mut sink);
        assert!(sink.is_empty());
        assert!(s.strokes().is_empty());
    }

    #[test]
    fn test_strokes_keep_their_tool() {
        let mut s = session();
        s.select_tool(Tool::Eraser, &mut NullSink);
        s.pointer_down(Vec2::new(300.0, 300.0), &mut NullSink);
        s.pointer_up(&mut NullSink);
        s.select_tool(Tool::Red, &mut NullSink);
        s.pointer_down(Vec2::new(310.0, 300.0), &mut NullSink);
        s.pointer_up(&mut NullSink);
        let tools: Vec<Tool> = s.strokes().iter().map(|st| st.tool).collect();
        assert_eq!(tools, vec![Tool::Eraser, Tool::Red]);
    }

    #[test]
    fn test_templates_wrap_around() {
        let mut s = session();
        let seen: Vec<Template> = (0..5).map(|_| s.cycle_template(&mut NullSink)).collect();
        assert_eq!(
            seen,
            vec![
                Template::Sailboat,
                Template::Fish,
                Template::Anchor,
                Template::Waves,
                Template::None
            ]
        );
    }

    #[test]
    fn test_finish_records_and_clears() {
        let mut s = session();
        let mut store = GameProgress::new();
        let mut sink: Vec<SoundEffect> = Vec::new();
        s.pointer_down(Vec2::new(200.0, 200.0), &mut NullSink);
        s.pointer_up(&mut NullSink);
        s.finish(&mut sink, &mut store);
        assert_eq!(store.drawing_count, 1);
        assert!(s.strokes().is_empty());
        assert_eq!(sink, vec![SoundEffect::Success]);
    }

    #[test]
    fn test_clear_drops_strokes() {
        let mut s = session();
        let mut sink: Vec<SoundEffect> = Vec::new();
        s.pointer_down(Vec2::new(200.0, 200.0), &mut NullSink);
        s.clear(&mut sink);
        assert!(s.strokes().is_empty());
        assert!(!s.is_drawing());
        assert_eq!(sink, vec![SoundEffect::Whoosh]);
    }
}
