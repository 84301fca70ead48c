use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{Action, DispatchContext, GestureRecognizer, PointerInput, RecognizerInput};
use crate::{
    config::{DoubleTapConfig, GestureSettings, TapConfig},
    gesture::{Gesture, GesturePayload, GestureType, TapGesture},
    touch::geometry::exceeds_threshold,
};

/// Single tap.
///
/// By default a finished tap is held back until the double-tap window has
/// closed, so a pair of quick taps is reported only by the double-tap
/// recognizer. Holding back relies on timer ticks.
pub struct TapRecognizer {
    machine: statig::blocking::StateMachine<TapHsm>,
    defer: bool,
}

impl Default for TapRecognizer {
    fn default() -> Self {
        Self::new(TapConfig::default(), DoubleTapConfig::default())
    }
}

impl TapRecognizer {
    pub fn new(tap: TapConfig, double_tap: DoubleTapConfig) -> Self {
        Self {
            machine: TapHsm::new(tap, double_tap).state_machine(),
            defer: tap.defer_for_double_tap,
        }
    }

    /// Reports each tap as soon as the finger lifts.
    pub fn immediate(tap: TapConfig) -> Self {
        Self::new(
            TapConfig {
                defer_for_double_tap: false,
                ..tap
            },
            DoubleTapConfig::default(),
        )
    }
}

impl GestureRecognizer for TapRecognizer {
    fn use_timer(&self) -> bool {
        self.defer
    }

    fn recognize(
        &mut self,
        gesture: &mut Gesture,
        input: &RecognizerInput<'_>,
        settings: &GestureSettings,
    ) -> Action {
        let mut context = DispatchContext::new(*settings, *gesture);
        self.machine
            .handle_with_context(&PointerInput::from_input(input), &mut context);
        context.finish(gesture)
    }

    fn create(&self) -> Gesture {
        Gesture::idle(GestureType::Tap)
    }
}

struct TapHsm {
    tap: TapConfig,
    double_tap: DoubleTapConfig,
    down_ms: u64,
    origin: (i32, i32),
    max_dx: i32,
    max_dy: i32,
    second_of_pair: bool,
    pending: TapGesture,
    pending_release_ms: u64,
    queued_press: Option<(u64, i32, i32)>,
}

#[state_machine(initial = "State::idle()")]
impl TapHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        let _ = context;
        match *event {
            PointerInput::Press { now_ms, x, y } => {
                self.begin_press(now_ms, x, y, false);
                Transition(State::pressed())
            }
            _ => Handled,
        }
    }

    #[state]
    fn pressed(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        let threshold = context.settings.move_threshold_px;
        match *event {
            PointerInput::Press { now_ms, x, y } => {
                if self.second_of_pair {
                    self.queued_press = Some((now_ms, x, y));
                    return self.flush_pending(context);
                }
                // Release never arrived; start over from the new contact.
                self.begin_press(now_ms, x, y, false);
                Handled
            }
            PointerInput::Move { x, y, .. } => {
                if self.observe(x, y, threshold) {
                    Handled
                } else {
                    self.drop_press(context)
                }
            }
            PointerInput::Release { now_ms, x, y } => {
                let Some(tap) = self.accept_release(now_ms, x, y, threshold) else {
                    return self.drop_press(context);
                };
                if self.second_of_pair {
                    // The double-tap recognizer reports this press.
                    context.abandon();
                    return Transition(State::idle());
                }
                if self.tap.defer_for_double_tap {
                    self.pending = tap;
                    self.pending_release_ms = now_ms;
                    return Transition(State::pending());
                }
                context.emit(Action::Started, GesturePayload::Tap(tap));
                Transition(State::reporting())
            }
            PointerInput::Tick { now_ms } => {
                if self.press_expired(now_ms) {
                    self.drop_press(context)
                } else {
                    Handled
                }
            }
            PointerInput::Lost { .. } | PointerInput::MultiTouch { .. } => self.drop_press(context),
        }
    }

    #[state]
    fn pending(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        match *event {
            PointerInput::Tick { now_ms } => {
                if now_ms.saturating_sub(self.pending_release_ms) > self.double_tap.interval_ms {
                    self.flush_pending(context)
                } else {
                    Handled
                }
            }
            PointerInput::Press { now_ms, x, y } => {
                if self.continues_pair(now_ms, x, y) {
                    self.begin_press(now_ms, x, y, true);
                    return Transition(State::pressed());
                }
                self.queued_press = Some((now_ms, x, y));
                self.flush_pending(context)
            }
            PointerInput::Move { .. }
            | PointerInput::Release { .. }
            | PointerInput::Lost { .. }
            | PointerInput::MultiTouch { .. } => self.flush_pending(context),
        }
    }

    #[state]
    fn reporting(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        context.emit_state(Action::Finished);
        let threshold = context.settings.move_threshold_px;
        let queued = self.queued_press.take();
        match (*event, queued) {
            (PointerInput::Press { now_ms, x, y }, _) => {
                self.begin_press(now_ms, x, y, false);
                Transition(State::pressed())
            }
            (PointerInput::Move { x, y, .. }, Some((down_ms, qx, qy))) => {
                self.begin_press(down_ms, qx, qy, false);
                if self.observe(x, y, threshold) {
                    Transition(State::pressed())
                } else {
                    Transition(State::idle())
                }
            }
            (PointerInput::Release { now_ms, x, y }, Some((down_ms, qx, qy))) => {
                // The queued press already ended; only the deferred path can keep it.
                self.begin_press(down_ms, qx, qy, false);
                match self.accept_release(now_ms, x, y, threshold) {
                    Some(tap) if self.tap.defer_for_double_tap => {
                        self.pending = tap;
                        self.pending_release_ms = now_ms;
                        Transition(State::pending())
                    }
                    _ => Transition(State::idle()),
                }
            }
            (PointerInput::Tick { now_ms }, Some((down_ms, qx, qy))) => {
                self.begin_press(down_ms, qx, qy, false);
                if self.press_expired(now_ms) {
                    Transition(State::idle())
                } else {
                    Transition(State::pressed())
                }
            }
            _ => Transition(State::idle()),
        }
    }
}

impl TapHsm {
    fn new(tap: TapConfig, double_tap: DoubleTapConfig) -> Self {
        Self {
            tap,
            double_tap,
            down_ms: 0,
            origin: (0, 0),
            max_dx: 0,
            max_dy: 0,
            second_of_pair: false,
            pending: TapGesture::default(),
            pending_release_ms: 0,
            queued_press: None,
        }
    }

    fn begin_press(&mut self, now_ms: u64, x: i32, y: i32, second_of_pair: bool) {
        self.down_ms = now_ms;
        self.origin = (x, y);
        self.max_dx = 0;
        self.max_dy = 0;
        self.second_of_pair = second_of_pair;
    }

    /// Track the deviation box; false once the pointer left the threshold.
    fn observe(&mut self, x: i32, y: i32, threshold: i32) -> bool {
        self.max_dx = self
            .max_dx
            .max(x.saturating_sub(self.origin.0).saturating_abs());
        self.max_dy = self
            .max_dy
            .max(y.saturating_sub(self.origin.1).saturating_abs());
        !exceeds_threshold(self.origin, x, y, threshold)
    }

    fn accept_release(&mut self, now_ms: u64, x: i32, y: i32, threshold: i32) -> Option<TapGesture> {
        let within = self.observe(x, y, threshold);
        let duration_ms = now_ms.saturating_sub(self.down_ms);
        if !within || !self.tap.accepts_duration(duration_ms) {
            return None;
        }
        Some(TapGesture {
            x,
            y,
            vertical_radius: self.max_dy,
            horizontal_radius: self.max_dx,
        })
    }

    fn press_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.down_ms) > self.tap.max_duration_ms
    }

    /// The current press can no longer be a tap. A failed second press still
    /// owes the caller the first tap of the would-be pair.
    fn drop_press(&mut self, context: &mut DispatchContext) -> Outcome<State> {
        if self.second_of_pair {
            return self.flush_pending(context);
        }
        context.abandon();
        Transition(State::idle())
    }

    fn flush_pending(&mut self, context: &mut DispatchContext) -> Outcome<State> {
        self.second_of_pair = false;
        context.emit(Action::Started, GesturePayload::Tap(self.pending));
        Transition(State::reporting())
    }

    fn continues_pair(&self, now_ms: u64, x: i32, y: i32) -> bool {
        now_ms.saturating_sub(self.pending_release_ms) <= self.double_tap.interval_ms
            && !exceeds_threshold(
                (self.pending.x, self.pending.y),
                x,
                y,
                self.double_tap.max_distance_px,
            )
    }
}

#[cfg(test)]
mod tests;
