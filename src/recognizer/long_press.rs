use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{Action, DispatchContext, GestureRecognizer, PointerInput, RecognizerInput};
use crate::{
    config::{GestureSettings, LongPressConfig},
    gesture::{Gesture, GesturePayload, GestureType, LongPressGesture},
    touch::geometry::exceeds_threshold,
};

/// A single pointer held within the move threshold for the configured dwell.
pub struct LongPressRecognizer {
    machine: statig::blocking::StateMachine<LongPressHsm>,
}

impl Default for LongPressRecognizer {
    fn default() -> Self {
        Self::new(LongPressConfig::default())
    }
}

impl LongPressRecognizer {
    pub fn new(config: LongPressConfig) -> Self {
        Self {
            machine: LongPressHsm::new(config).state_machine(),
        }
    }
}

impl GestureRecognizer for LongPressRecognizer {
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
        Gesture::idle(GestureType::LongPress)
    }
}

struct LongPressHsm {
    config: LongPressConfig,
    down_ms: u64,
    origin: (i32, i32),
    position: (i32, i32),
    started: bool,
}

#[state_machine(initial = "State::idle()")]
impl LongPressHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        let _ = context;
        match *event {
            PointerInput::Press { now_ms, x, y } => {
                self.begin_press(now_ms, x, y);
                Transition(State::pressed())
            }
            _ => Handled,
        }
    }

    #[state(superstate = "tracking")]
    fn pressed(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        match *event {
            PointerInput::Move { now_ms, x, y } => {
                if exceeds_threshold(self.origin, x, y, context.settings.move_threshold_px) {
                    context.abandon();
                    return Transition(State::idle());
                }
                self.position = (x, y);
                self.start_if_dwelled(context, now_ms)
            }
            PointerInput::Tick { now_ms } => self.start_if_dwelled(context, now_ms),
            PointerInput::Release { .. } => {
                context.abandon();
                Transition(State::idle())
            }
            _ => Super,
        }
    }

    #[state(superstate = "tracking")]
    fn active(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        match *event {
            PointerInput::Move { x, y, .. } => {
                if exceeds_threshold(self.origin, x, y, context.settings.move_threshold_px) {
                    self.started = false;
                    context.emit_state(Action::Canceled);
                    Transition(State::idle())
                } else {
                    Handled
                }
            }
            PointerInput::Release { .. } => {
                self.started = false;
                context.emit_state(Action::Finished);
                Transition(State::idle())
            }
            PointerInput::Tick { .. } => Handled,
            _ => Super,
        }
    }

    /// Pointer changes that end the press whether or not the dwell elapsed.
    #[superstate]
    fn tracking(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        match *event {
            PointerInput::Press { now_ms, x, y } => {
                // Release never arrived; the old press is over.
                if self.started {
                    context.emit_state(Action::Canceled);
                }
                self.begin_press(now_ms, x, y);
                Transition(State::pressed())
            }
            PointerInput::Lost { .. } | PointerInput::MultiTouch { .. } => {
                if self.started {
                    self.started = false;
                    context.emit_state(Action::Canceled);
                } else {
                    context.abandon();
                }
                Transition(State::idle())
            }
            _ => Handled,
        }
    }
}

impl LongPressHsm {
    fn new(config: LongPressConfig) -> Self {
        Self {
            config,
            down_ms: 0,
            origin: (0, 0),
            position: (0, 0),
            started: false,
        }
    }

    fn begin_press(&mut self, now_ms: u64, x: i32, y: i32) {
        self.down_ms = now_ms;
        self.origin = (x, y);
        self.position = (x, y);
        self.started = false;
    }

    fn start_if_dwelled(&mut self, context: &mut DispatchContext, now_ms: u64) -> Outcome<State> {
        if now_ms.saturating_sub(self.down_ms) < self.config.duration_ms {
            return Handled;
        }
        let (x, y) = self.position;
        self.started = true;
        context.emit(
            Action::Started,
            GesturePayload::LongPress(LongPressGesture { x, y }),
        );
        Transition(State::active())
    }
}
