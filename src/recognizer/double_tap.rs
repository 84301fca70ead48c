use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{Action, DispatchContext, GestureRecognizer, PointerInput, RecognizerInput};
use crate::{
    config::{DoubleTapConfig, GestureSettings, TapConfig},
    gesture::{DoubleTapGesture, Gesture, GesturePayload, GestureType},
    touch::geometry::exceeds_threshold,
};

/// Two valid taps whose second press lands close to the first release in
/// space and time.
pub struct DoubleTapRecognizer {
    machine: statig::blocking::StateMachine<DoubleTapHsm>,
}

impl Default for DoubleTapRecognizer {
    fn default() -> Self {
        Self::new(TapConfig::default(), DoubleTapConfig::default())
    }
}

impl DoubleTapRecognizer {
    pub fn new(tap: TapConfig, double_tap: DoubleTapConfig) -> Self {
        Self {
            machine: DoubleTapHsm::new(tap, double_tap).state_machine(),
        }
    }
}

impl GestureRecognizer for DoubleTapRecognizer {
    fn use_timer(&self) -> bool {
        true
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
        Gesture::idle(GestureType::DoubleTap)
    }
}

struct DoubleTapHsm {
    tap: TapConfig,
    double_tap: DoubleTapConfig,
    down_ms: u64,
    origin: (i32, i32),
    first_release_ms: u64,
    first_point: (i32, i32),
}

#[state_machine(initial = "State::idle()")]
impl DoubleTapHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        let _ = context;
        match *event {
            PointerInput::Press { now_ms, x, y } => {
                self.begin_press(now_ms, x, y);
                Transition(State::first_press())
            }
            _ => Handled,
        }
    }

    #[state(superstate = "pressing")]
    fn first_press(
        &mut self,
        context: &mut DispatchContext,
        event: &PointerInput,
    ) -> Outcome<State> {
        match *event {
            PointerInput::Release { now_ms, x, y } => {
                if self.accepts_release(now_ms, x, y, context.settings.move_threshold_px) {
                    self.first_release_ms = now_ms;
                    self.first_point = (x, y);
                    Transition(State::first_tap())
                } else {
                    context.abandon();
                    Transition(State::idle())
                }
            }
            _ => Super,
        }
    }

    #[state]
    fn first_tap(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        match *event {
            PointerInput::Press { now_ms, x, y } => {
                self.begin_press(now_ms, x, y);
                if self.continues_pair(now_ms, x, y) {
                    Transition(State::second_press())
                } else {
                    // Too late or too far: this press may open a new pair.
                    Transition(State::first_press())
                }
            }
            PointerInput::Tick { now_ms } => {
                if now_ms.saturating_sub(self.first_release_ms) > self.double_tap.interval_ms {
                    context.abandon();
                    Transition(State::idle())
                } else {
                    Handled
                }
            }
            PointerInput::Move { .. } | PointerInput::Release { .. } => Handled,
            PointerInput::Lost { .. } | PointerInput::MultiTouch { .. } => {
                context.abandon();
                Transition(State::idle())
            }
        }
    }

    #[state(superstate = "pressing")]
    fn second_press(
        &mut self,
        context: &mut DispatchContext,
        event: &PointerInput,
    ) -> Outcome<State> {
        match *event {
            PointerInput::Release { now_ms, x, y } => {
                if self.accepts_release(now_ms, x, y, context.settings.move_threshold_px) {
                    context.emit(
                        Action::Started,
                        GesturePayload::DoubleTap(DoubleTapGesture { x, y }),
                    );
                    Transition(State::reporting())
                } else {
                    context.abandon();
                    Transition(State::idle())
                }
            }
            _ => Super,
        }
    }

    #[state]
    fn reporting(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        context.emit_state(Action::Finished);
        match *event {
            PointerInput::Press { now_ms, x, y } => {
                self.begin_press(now_ms, x, y);
                Transition(State::first_press())
            }
            _ => Transition(State::idle()),
        }
    }

    /// Shared handling while a finger is down on either tap of the pair.
    #[superstate]
    fn pressing(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        match *event {
            PointerInput::Press { now_ms, x, y } => {
                self.begin_press(now_ms, x, y);
                Transition(State::first_press())
            }
            PointerInput::Move { x, y, .. } => {
                if exceeds_threshold(self.origin, x, y, context.settings.move_threshold_px) {
                    context.abandon();
                    Transition(State::idle())
                } else {
                    Handled
                }
            }
            PointerInput::Tick { now_ms } => {
                if now_ms.saturating_sub(self.down_ms) > self.tap.max_duration_ms {
                    context.abandon();
                    Transition(State::idle())
                } else {
                    Handled
                }
            }
            PointerInput::Release { .. }
            | PointerInput::Lost { .. }
            | PointerInput::MultiTouch { .. } => {
                context.abandon();
                Transition(State::idle())
            }
        }
    }
}

impl DoubleTapHsm {
    fn new(tap: TapConfig, double_tap: DoubleTapConfig) -> Self {
        Self {
            tap,
            double_tap,
            down_ms: 0,
            origin: (0, 0),
            first_release_ms: 0,
            first_point: (0, 0),
        }
    }

    fn begin_press(&mut self, now_ms: u64, x: i32, y: i32) {
        self.down_ms = now_ms;
        self.origin = (x, y);
    }

    fn accepts_release(&self, now_ms: u64, x: i32, y: i32, threshold: i32) -> bool {
        !exceeds_threshold(self.origin, x, y, threshold)
            && self.tap.accepts_duration(now_ms.saturating_sub(self.down_ms))
    }

    fn continues_pair(&self, now_ms: u64, x: i32, y: i32) -> bool {
        now_ms.saturating_sub(self.first_release_ms) <= self.double_tap.interval_ms
            && !exceeds_threshold(self.first_point, x, y, self.double_tap.max_distance_px)
    }
}
