//! Tap recognition

use crate::event::{Event, MouseButton};
use crate::geometry::{Point, Rect};

/// How far a pointer may travel between press and release and still count
/// as a tap, in points
pub const TAP_SLOP: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pointer {
    Mouse,
    Touch(u64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Tracking { pointer: Pointer, start: Point, last: Point },
}

/// What an event did to the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapPhase {
    /// Not for us
    Ignored,
    /// A press inside the frame is being tracked
    Tracking,
    Recognized,
    /// The pointer moved too far or was released outside the frame
    Failed,
}

impl TapPhase {
    pub fn is_handled(self) -> bool {
        self != TapPhase::Ignored
    }
}

/// Recognizes a single tap by touch or primary mouse button.
#[derive(Debug, Clone)]
pub struct TapRecognizer {
    state: State,
}

impl TapRecognizer {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, State::Tracking { .. })
    }

    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Feeds an event; `frame` is where the flash currently is on screen.
    pub fn handle(&mut self, event: &Event, frame: Rect) -> TapPhase {
        match *event {
            Event::MouseDown { x, y, button: MouseButton::Left } => self.press(Pointer::Mouse, Point::new(x, y), frame),
            Event::MouseMove { x, y } => self.motion(Pointer::Mouse, Point::new(x, y)),
            Event::MouseUp { x, y, button: MouseButton::Left } => match self.motion(Pointer::Mouse, Point::new(x, y)) {
                TapPhase::Tracking => self.release(Pointer::Mouse, frame),
                phase => phase,
            },
            Event::TouchStart { id, x, y } => self.press(Pointer::Touch(id), Point::new(x, y), frame),
            Event::TouchMove { id, x, y } => self.motion(Pointer::Touch(id), Point::new(x, y)),
            Event::TouchEnd { id } => self.release(Pointer::Touch(id), frame),
            Event::TouchCancel { id } => match self.state {
                State::Tracking { pointer, .. } if pointer == Pointer::Touch(id) => {
                    self.reset();
                    TapPhase::Failed
                }
                _ => TapPhase::Ignored,
            },
            _ => TapPhase::Ignored,
        }
    }

    fn press(&mut self, pointer: Pointer, at: Point, frame: Rect) -> TapPhase {
        if self.is_tracking() || !frame.contains(at) {
            return TapPhase::Ignored;
        }
        self.state = State::Tracking { pointer, start: at, last: at };
        TapPhase::Tracking
    }

    fn motion(&mut self, moved: Pointer, to: Point) -> TapPhase {
        let State::Tracking { pointer, start, .. } = self.state else {
            return TapPhase::Ignored;
        };
        if pointer != moved {
            return TapPhase::Ignored;
        }
        if distance(start, to) > TAP_SLOP {
            self.reset();
            return TapPhase::Failed;
        }
        self.state = State::Tracking { pointer, start, last: to };
        TapPhase::Tracking
    }

    fn release(&mut self, released: Pointer, frame: Rect) -> TapPhase {
        let State::Tracking { pointer, last, .. } = self.state else {
            return TapPhase::Ignored;
        };
        if pointer != released {
            return TapPhase::Ignored;
        }
        self.reset();
        if frame.contains(last) {
            TapPhase::Recognized
        } else {
            TapPhase::Failed
        }
    }
}

impl Default for TapRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

fn distance(a: Point, b: Point) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Rect {
        Rect::new(10.0, 10.0, 100.0, 40.0)
    }

    #[test]
    fn test_mouse_tap() {
        let mut tap = TapRecognizer::new();
        let down = Event::MouseDown { x: 20.0, y: 20.0, button: MouseButton::Left };
        let up = Event::MouseUp { x: 22.0, y: 21.0, button: MouseButton::Left };
        assert_eq!(tap.handle(&down, frame()), TapPhase::Tracking);
        assert_eq!(tap.handle(&up, frame()), TapPhase::Recognized);
        assert!(!tap.is_tracking());
    }

    #[test]
    fn test_mouse_release_far_away_fails() {
        let mut tap = TapRecognizer::new();
        tap.handle(&Event::MouseDown { x: 20.0, y: 20.0, button: MouseButton::Left }, frame());
        let up = Event::MouseUp { x: 90.0, y: 20.0, button: MouseButton::Left };
        assert_eq!(tap.handle(&up, frame()), TapPhase::Failed);
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut tap = TapRecognizer::new();
        let down = Event::MouseDown { x: 200.0, y: 20.0, button: MouseButton::Left };
        assert_eq!(tap.handle(&down, frame()), TapPhase::Ignored);
        let up = Event::MouseUp { x: 200.0, y: 20.0, button: MouseButton::Left };
        assert_eq!(tap.handle(&up, frame()), TapPhase::Ignored);
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let mut tap = TapRecognizer::new();
        let down = Event::MouseDown { x: 20.0, y: 20.0, button: MouseButton::Right };
        assert_eq!(tap.handle(&down, frame()), TapPhase::Ignored);
    }

    #[test]
    fn test_drag_fails() {
        let mut tap = TapRecognizer::new();
        tap.handle(&Event::TouchStart { id: 1, x: 20.0, y: 20.0 }, frame());
        assert_eq!(tap.handle(&Event::TouchMove { id: 1, x: 60.0, y: 20.0 }, frame()), TapPhase::Failed);
        assert_eq!(tap.handle(&Event::TouchEnd { id: 1 }, frame()), TapPhase::Ignored);
    }

    #[test]
    fn test_touch_tap_tracks_its_own_id() {
        let mut tap = TapRecognizer::new();
        tap.handle(&Event::TouchStart { id: 1, x: 20.0, y: 20.0 }, frame());
        assert_eq!(tap.handle(&Event::TouchEnd { id: 2 }, frame()), TapPhase::Ignored);
        assert_eq!(tap.handle(&Event::TouchMove { id: 1, x: 24.0, y: 22.0 }, frame()), TapPhase::Tracking);
        assert_eq!(tap.handle(&Event::TouchEnd { id: 1 }, frame()), TapPhase::Recognized);
    }

    #[test]
    fn test_touch_cancel() {
        let mut tap = TapRecognizer::new();
        tap.handle(&Event::TouchStart { id: 7, x: 20.0, y: 20.0 }, frame());
        assert_eq!(tap.handle(&Event::TouchCancel { id: 7 }, frame()), TapPhase::Failed);
        assert!(!tap.is_tracking());
    }
}
