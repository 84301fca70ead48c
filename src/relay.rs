//! Forwarding of dispatch results to a host UI.
//!
//! [`GestureRelay`] sits between [`GestureManager`] and a [`GestureSink`]. It
//! keeps the last reported gesture type so the sink only hears about type
//! changes, and flattens each gesture kind into the sink's plain callbacks.

use crate::{
    gesture::{Gesture, GesturePayload, GestureState, GestureType},
    manager::GestureManager,
    touch::TouchEvent,
};

/// Receiver of recognized gestures. Every callback defaults to a no-op.
pub trait GestureSink {
    fn gesture_type_changed(&mut self, gesture_type: GestureType) {
        let _ = gesture_type;
    }

    /// Reported once per tap, when it starts.
    fn tap(&mut self, x: i32, y: i32, vertical_radius: i32, horizontal_radius: i32) {
        let _ = (x, y, vertical_radius, horizontal_radius);
    }

    /// Axis-locked pan, see [`crate::gesture::PanGesture::projected`].
    fn pan(&mut self, x: i32, y: i32, delta_x: i32, delta_y: i32) {
        let _ = (x, y, delta_x, delta_y);
    }

    fn pinch_started(&mut self) {}

    fn pinch_updated(&mut self, scale: f64, center_x: i32, center_y: i32) {
        let _ = (scale, center_x, center_y);
    }

    /// Pinch ended, whether finished or canceled.
    fn pinch_finished(&mut self) {}

    fn double_tap(&mut self, x: i32, y: i32) {
        let _ = (x, y);
    }

    fn long_press(&mut self, state: GestureState, x: i32, y: i32) {
        let _ = (state, x, y);
    }
}

pub struct GestureRelay<S> {
    sink: S,
    current: GestureType,
}

impl<S: GestureSink> GestureRelay<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            current: GestureType::NoGesture,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Last gesture type reported to the sink.
    pub fn current_type(&self) -> GestureType {
        self.current
    }

    /// Dispatch a touch event and forward the result. A touch that produces
    /// nothing resets the reported type to `NoGesture`.
    pub fn touch(&mut self, manager: &mut GestureManager, event: &TouchEvent) {
        match manager.send_event(Some(event), event.timestamp_ms()) {
            Some(gesture) => self.forward(gesture),
            None => self.set_type(GestureType::NoGesture),
        }
    }

    /// Dispatch a timer tick and forward the result, if any.
    pub fn tick(&mut self, manager: &mut GestureManager, now_ms: u64) {
        if let Some(gesture) = manager.send_event(None, now_ms) {
            self.forward(gesture);
        }
    }

    pub fn forward(&mut self, gesture: &Gesture) {
        self.set_type(gesture.gesture_type());

        let state = gesture.state();
        match *gesture.payload() {
            GesturePayload::None => {}
            GesturePayload::Tap(tap) => {
                if state == GestureState::Started {
                    self.sink
                        .tap(tap.x, tap.y, tap.vertical_radius, tap.horizontal_radius);
                }
            }
            GesturePayload::Pan(pan) => {
                let (x, y, delta_x, delta_y) = pan.projected();
                if !pan.side.is_none() {
                    log::debug!("edge swipe from {:?}", pan.side);
                }
                self.sink.pan(x, y, delta_x, delta_y);
            }
            GesturePayload::Pinch(pinch) | GesturePayload::Pinch3f(pinch) => match state {
                GestureState::Started => self.sink.pinch_started(),
                GestureState::Updated => {
                    self.sink
                        .pinch_updated(pinch.scale, pinch.center_x, pinch.center_y)
                }
                GestureState::Finished | GestureState::Canceled => self.sink.pinch_finished(),
            },
            GesturePayload::DoubleTap(double_tap) => {
                if state == GestureState::Started {
                    self.sink.double_tap(double_tap.x, double_tap.y);
                }
            }
            GesturePayload::LongPress(long_press) => {
                self.sink.long_press(state, long_press.x, long_press.y)
            }
        }
    }

    fn set_type(&mut self, gesture_type: GestureType) {
        if gesture_type == self.current {
            return;
        }
        self.current = gesture_type;
        self.sink.gesture_type_changed(gesture_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::EdgeBounds,
        recognizer::{
            test_support::{fingers, moved, press, release},
            PanRecognizer, PinchRecognizer, TapRecognizer,
        },
        touch::TouchPointState,
    };

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl GestureSink for Recorder {
        fn gesture_type_changed(&mut self, gesture_type: GestureType) {
            self.calls.push(format!("type {}", gesture_type.label()));
        }

        fn tap(&mut self, x: i32, y: i32, vertical_radius: i32, horizontal_radius: i32) {
            self.calls
                .push(format!("tap {x} {y} {vertical_radius} {horizontal_radius}"));
        }

        fn pan(&mut self, x: i32, y: i32, delta_x: i32, delta_y: i32) {
            self.calls.push(format!("pan {x} {y} {delta_x} {delta_y}"));
        }

        fn pinch_started(&mut self) {
            self.calls.push("pinch started".into());
        }

        fn pinch_updated(&mut self, scale: f64, _center_x: i32, _center_y: i32) {
            self.calls.push(format!("pinch {scale:.2}"));
        }

        fn pinch_finished(&mut self) {
            self.calls.push("pinch finished".into());
        }
    }

    #[test]
    fn type_changes_are_deduplicated() {
        let mut manager = GestureManager::new();
        manager.register_recognizer(Box::new(PanRecognizer::new()));
        let mut relay = GestureRelay::new(Recorder::default());

        relay.touch(&mut manager, &press(0, 500, 500));
        relay.touch(&mut manager, &moved(10, 600, 500));
        relay.touch(&mut manager, &moved(20, 650, 500));
        relay.tick(&mut manager, 30);
        relay.touch(&mut manager, &release(40, 650, 500));
        relay.touch(&mut manager, &press(100, 10, 10));

        assert_eq!(
            relay.into_sink().calls,
            [
                "type pan",
                "pan 600 500 100 0",
                "pan 650 500 50 0",
                "pan 650 500 0 0",
                "type none",
            ]
        );
    }

    #[test]
    fn edge_pans_are_axis_locked() {
        let mut manager = GestureManager::new();
        manager.register_recognizer(Box::new(PanRecognizer::new()));
        manager.set_edge_bounds(EdgeBounds::new(0, 0, 1000, 1000));
        let mut relay = GestureRelay::new(Recorder::default());

        relay.touch(&mut manager, &press(0, 990, 500));
        relay.touch(&mut manager, &moved(10, 900, 520));
        relay.touch(&mut manager, &release(20, 900, 520));
        relay.touch(&mut manager, &press(100, 500, 5));
        relay.touch(&mut manager, &moved(110, 520, 80));

        assert_eq!(
            relay.sink().calls,
            [
                "type pan",
                "pan 900 0 -90 0",
                "pan 900 0 0 0",
                "type none",
                "type pan",
                "pan 0 80 0 75",
            ]
        );
    }

    #[test]
    fn pinch_lifecycle_maps_to_pinch_callbacks() {
        let mut manager = GestureManager::new();
        manager.register_recognizer(Box::new(PinchRecognizer::two_finger()));
        let mut relay = GestureRelay::new(Recorder::default());

        let pair = |t_ms, half_gap, state| {
            fingers(
                t_ms,
                &[(500 - half_gap, 500, state), (500 + half_gap, 500, state)],
            )
        };
        relay.touch(&mut manager, &pair(0, 100, TouchPointState::Pressed));
        relay.touch(&mut manager, &pair(10, 150, TouchPointState::Moved));
        relay.touch(&mut manager, &pair(20, 200, TouchPointState::Moved));
        relay.touch(&mut manager, &pair(30, 200, TouchPointState::Released));

        assert_eq!(
            relay.sink().calls,
            [
                "type pinch",
                "pinch started",
                "pinch 2.00",
                "pinch finished",
            ]
        );
        assert_eq!(relay.current_type(), GestureType::Pinch);
    }

    #[test]
    fn tap_is_reported_once() {
        let mut manager = GestureManager::new();
        manager.register_recognizer(Box::new(TapRecognizer::default()));
        let mut relay = GestureRelay::new(Recorder::default());

        relay.touch(&mut manager, &press(0, 40, 50));
        relay.touch(&mut manager, &release(60, 40, 50));
        relay.tick(&mut manager, 200);
        relay.tick(&mut manager, 400);
        relay.tick(&mut manager, 416);

        assert_eq!(relay.sink().calls, ["type tap", "tap 40 50 0 0"]);
    }
}
