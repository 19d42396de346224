//! Pointer gestures.
//!
//! A gesture lives from pointer-down to pointer-up/leave and owns everything
//! that is only meaningful while the pointer is held, including the drag-fill
//! deadlines. Dropping the gesture is the cancellation: once it is gone no
//! deadline can fire.
//!
//! Time is passed in by the host rather than read from a clock, so a gesture
//! behaves the same under a real event loop and in a scripted replay.

use std::time::{Duration, Instant};

use log::debug;

use crate::canvas::{BrushStroke, Canvas, Point};
use crate::types::Colour;

/// How long the fill tool must be held before drag-fill starts.
pub const HOLD_DELAY: Duration = Duration::from_millis(150);

/// Minimum spacing between drag-fill samples taken on pointer moves.
pub const DRAG_SAMPLE_INTERVAL: Duration = Duration::from_millis(16);

/// Period of the repeating drag-fill at the last pointer position.
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(50);

/// A press of the fill tool.
///
/// The press flood-fills immediately. If the pointer stays down past
/// [`HOLD_DELAY`] the gesture switches to drag-fill, sampling on pointer
/// moves and on a repeating deadline, and commits once on release.
#[derive(Debug, Clone)]
pub struct FillGesture {
    colour: Colour,
    position: Point,
    hold_deadline: Instant,
    dragging: bool,
    next_repeat: Option<Instant>,
    last_sample: Option<Instant>,
    painted: bool,
}

impl FillGesture {
    pub fn begin(canvas: &mut Canvas, at: Point, colour: Colour, now: Instant) -> Self {
        canvas.fill(at, colour);
        Self {
            colour,
            position: at,
            hold_deadline: now + HOLD_DELAY,
            dragging: false,
            next_repeat: None,
            last_sample: None,
            painted: false,
        }
    }

    pub fn moved(&mut self, canvas: &mut Canvas, at: Point, now: Instant) {
        self.position = at;
        self.tick(canvas, now);

        if !self.dragging {
            return;
        }
        let due = self
            .last_sample
            .map_or(true, |last| now.duration_since(last) > DRAG_SAMPLE_INTERVAL);
        if due {
            self.sample(canvas);
            self.last_sample = Some(now);
        }
    }

    /// Fire whichever deadline has passed.
    pub fn tick(&mut self, canvas: &mut Canvas, now: Instant) {
        if !self.dragging {
            if now < self.hold_deadline {
                return;
            }
            self.dragging = true;
            self.sample(canvas);
            self.next_repeat = Some(now + REPEAT_INTERVAL);
            return;
        }

        if let Some(due) = self.next_repeat {
            if now >= due {
                self.sample(canvas);
                self.next_repeat = Some(now + REPEAT_INTERVAL);
            }
        }
    }

    /// End the gesture, committing drag-fill work if there was any.
    ///
    /// Returns whether a history entry was added.
    pub fn finish(self, canvas: &mut Canvas) -> bool {
        if self.painted {
            canvas.commit();
        }
        self.painted
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// When the host should next call [`FillGesture::tick`].
    pub fn next_deadline(&self) -> Instant {
        if self.dragging {
            self.next_repeat.unwrap_or(self.hold_deadline)
        } else {
            self.hold_deadline
        }
    }

    fn sample(&mut self, canvas: &mut Canvas) {
        if canvas.drag_fill(self.position, self.colour) > 0 {
            self.painted = true;
        }
    }
}

/// The gesture currently held, if any.
#[derive(Debug, Clone)]
pub enum Gesture {
    Fill(FillGesture),
    Brush(BrushStroke),
}

impl Gesture {
    pub fn moved(&mut self, canvas: &mut Canvas, at: Point, now: Instant) {
        match self {
            Gesture::Fill(fill) => fill.moved(canvas, at, now),
            Gesture::Brush(stroke) => canvas.extend_stroke(stroke, at),
        }
    }

    pub fn tick(&mut self, canvas: &mut Canvas, now: Instant) {
        if let Gesture::Fill(fill) = self {
            fill.tick(canvas, now);
        }
    }

    /// Commit the gesture's work. Returns whether history grew.
    pub fn finish(self, canvas: &mut Canvas) -> bool {
        match self {
            Gesture::Fill(fill) => fill.finish(canvas),
            Gesture::Brush(stroke) => {
                debug!(
                    "brush stroke: {} segments at {}px in {}",
                    stroke.segments(),
                    stroke.size().get(),
                    stroke.colour()
                );
                canvas.commit();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::test_support::art;

    const RED: Colour = Colour::rgb(255, 0, 0);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn open_canvas() -> Canvas {
        Canvas::new(art(&[
            "########################################", //
            "#......................................#",
            "#......................................#",
            "#......................................#",
            "########################################",
        ]))
    }

    #[test]
    fn test_press_fills_immediately() {
        let mut canvas = open_canvas();
        let t0 = Instant::now();
        let gesture = FillGesture::begin(&mut canvas, Point::new(5.0, 2.0), RED, t0);

        assert_eq!(canvas.history().len(), 2);
        assert!(!gesture.is_dragging());
        assert!(!gesture.finish(&mut canvas));
        assert_eq!(canvas.history().len(), 2);
    }

    #[test]
    fn test_hold_starts_drag_after_delay() {
        let mut canvas = open_canvas();
        let t0 = Instant::now();
        // pre-paint so the press itself is a no-op and drag work is visible
        let blue = Colour::rgb(0, 0, 255);
        canvas.fill(Point::new(5.0, 2.0), blue);
        let mut gesture = FillGesture::begin(&mut canvas, Point::new(5.0, 2.0), blue, t0);
        assert_eq!(canvas.history().len(), 2);
        gesture.colour = RED;

        gesture.tick(&mut canvas, t0 + ms(100));
        assert!(!gesture.is_dragging());

        gesture.tick(&mut canvas, t0 + ms(150));
        assert!(gesture.is_dragging());
        assert_eq!(canvas.layer().get_pixel(5, 2).0, RED.to_rgba());
        assert_eq!(gesture.next_deadline(), t0 + ms(200));
    }

    #[test]
    fn test_moves_are_rate_limited() {
        let mut canvas = open_canvas();
        let t0 = Instant::now();
        let mut gesture = FillGesture {
            colour: RED,
            position: Point::new(2.0, 2.0),
            hold_deadline: t0,
            dragging: true,
            next_repeat: Some(t0 + ms(1000)),
            last_sample: Some(t0),
            painted: false,
        };

        // 10ms after the last sample: position updates, no paint
        gesture.moved(&mut canvas, Point::new(30.0, 2.0), t0 + ms(10));
        assert_eq!(canvas.layer().get_pixel(30, 2).0, [0, 0, 0, 0]);

        gesture.moved(&mut canvas, Point::new(30.0, 2.0), t0 + ms(17));
        assert_eq!(canvas.layer().get_pixel(30, 2).0, RED.to_rgba());
        assert!(gesture.finish(&mut canvas));
        assert_eq!(canvas.history().len(), 2);
    }

    #[test]
    fn test_repeat_fills_at_last_position() {
        let mut canvas = open_canvas();
        let t0 = Instant::now();
        let mut gesture = FillGesture {
            colour: RED,
            position: Point::new(30.0, 2.0),
            hold_deadline: t0,
            dragging: true,
            next_repeat: Some(t0 + ms(50)),
            last_sample: None,
            painted: false,
        };

        gesture.tick(&mut canvas, t0 + ms(49));
        assert_eq!(canvas.layer().get_pixel(30, 2).0, [0, 0, 0, 0]);

        gesture.tick(&mut canvas, t0 + ms(50));
        assert_eq!(canvas.layer().get_pixel(30, 2).0, RED.to_rgba());
        assert_eq!(gesture.next_deadline(), t0 + ms(100));
    }

    #[test]
    fn test_brush_gesture_commits_on_finish() {
        let mut canvas = open_canvas();
        let stroke = canvas.begin_stroke(
            Point::new(3.0, 2.0),
            RED,
            crate::types::BrushSize::clamped(2),
        );
        let mut gesture = Gesture::Brush(stroke);
        gesture.moved(&mut canvas, Point::new(10.0, 2.0), Instant::now());

        assert!(gesture.finish(&mut canvas));
        assert_eq!(canvas.history().len(), 2);
        assert_eq!(canvas.layer().get_pixel(8, 2).0, RED.to_rgba());
    }
}
