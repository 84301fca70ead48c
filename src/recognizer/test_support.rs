use super::{Action, GestureRecognizer, RecognizerInput};
use crate::{
    config::GestureSettings,
    gesture::Gesture,
    touch::{TouchEvent, TouchPoint, TouchPointState},
};

pub(crate) fn press(t_ms: u64, x: i32, y: i32) -> TouchEvent {
    TouchEvent::new(t_ms, &[TouchPoint::new(0, x, y, TouchPointState::Pressed)])
}

pub(crate) fn moved(t_ms: u64, x: i32, y: i32) -> TouchEvent {
    TouchEvent::new(t_ms, &[TouchPoint::new(0, x, y, TouchPointState::Moved)])
}

pub(crate) fn release(t_ms: u64, x: i32, y: i32) -> TouchEvent {
    TouchEvent::new(t_ms, &[TouchPoint::new(0, x, y, TouchPointState::Released)])
}

pub(crate) fn cancel(t_ms: u64, x: i32, y: i32) -> TouchEvent {
    TouchEvent::new(t_ms, &[TouchPoint::new(0, x, y, TouchPointState::Cancelled)])
}

/// Event built from `(x, y, state)` triples, ids assigned by index.
pub(crate) fn fingers(t_ms: u64, points: &[(i32, i32, TouchPointState)]) -> TouchEvent {
    let mut built = std::vec::Vec::new();
    for (id, (x, y, state)) in points.iter().enumerate() {
        built.push(TouchPoint::new(id as i32, *x, *y, *state));
    }
    TouchEvent::new(t_ms, &built)
}

/// Drives one recognizer the way the manager does, without arbitration.
pub(crate) struct Harness<R> {
    pub(crate) recognizer: R,
    pub(crate) gesture: Gesture,
    pub(crate) settings: GestureSettings,
}

impl<R: GestureRecognizer> Harness<R> {
    pub(crate) fn new(recognizer: R) -> Self {
        let gesture = recognizer.create();
        Self {
            recognizer,
            gesture,
            settings: GestureSettings::default(),
        }
    }

    pub(crate) fn touch(&mut self, event: &TouchEvent) -> Action {
        self.recognizer.recognize(
            &mut self.gesture,
            &RecognizerInput::Touch(event),
            &self.settings,
        )
    }

    pub(crate) fn tick(&mut self, now_ms: u64) -> Action {
        self.recognizer.recognize(
            &mut self.gesture,
            &RecognizerInput::Tick { now_ms },
            &self.settings,
        )
    }
}
