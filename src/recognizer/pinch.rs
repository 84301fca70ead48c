use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{Action, DispatchContext, GestureRecognizer, MultiInput, RecognizerInput};
use crate::{
    config::GestureSettings,
    gesture::{Gesture, GesturePayload, GestureType, PinchGesture},
};

/// Spread below which a finger set cannot serve as a scale baseline.
const MIN_BASELINE_SPREAD: f64 = 1.0;

/// Pinch over a fixed number of fingers, reported as `Pinch` for two
/// fingers and `Pinch3f` for three.
pub struct PinchRecognizer {
    machine: statig::blocking::StateMachine<PinchHsm>,
    kind: GestureType,
}

impl PinchRecognizer {
    pub fn two_finger() -> Self {
        Self::with_fingers(2, GestureType::Pinch)
    }

    pub fn three_finger() -> Self {
        Self::with_fingers(3, GestureType::Pinch3f)
    }

    fn with_fingers(fingers: usize, kind: GestureType) -> Self {
        Self {
            machine: PinchHsm::new(fingers, kind).state_machine(),
            kind,
        }
    }
}

impl GestureRecognizer for PinchRecognizer {
    fn use_timer(&self) -> bool {
        false
    }

    fn recognize(
        &mut self,
        gesture: &mut Gesture,
        input: &RecognizerInput<'_>,
        settings: &GestureSettings,
    ) -> Action {
        let Some(frame) = MultiInput::from_input(input) else {
            return Action::Ignore;
        };
        let mut context = DispatchContext::new(*settings, *gesture);
        self.machine.handle_with_context(&frame, &mut context);
        context.finish(gesture)
    }

    fn create(&self) -> Gesture {
        Gesture::idle(self.kind)
    }
}

struct PinchHsm {
    fingers: usize,
    kind: GestureType,
    baseline: f64,
}

#[state_machine(initial = "State::idle()")]
impl PinchHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &MultiInput) -> Outcome<State> {
        let _ = context;
        if self.try_arm(event) {
            Transition(State::armed())
        } else {
            Handled
        }
    }

    #[state]
    fn armed(&mut self, context: &mut DispatchContext, event: &MultiInput) -> Outcome<State> {
        if event.cancelled || event.active != self.fingers {
            context.abandon();
            return Transition(State::idle());
        }
        let threshold = f64::from(context.settings.move_threshold_px);
        if (event.spread - self.baseline).abs() <= threshold {
            return Handled;
        }
        context.emit(Action::Started, self.payload(event));
        Transition(State::active())
    }

    #[state]
    fn active(&mut self, context: &mut DispatchContext, event: &MultiInput) -> Outcome<State> {
        if event.cancelled || event.active > self.fingers {
            context.emit_state(Action::Canceled);
            return Transition(State::idle());
        }
        if event.active < self.fingers {
            context.emit_state(Action::Finished);
            return Transition(State::idle());
        }
        context.emit(Action::Updated, self.payload(event));
        Handled
    }
}

impl PinchHsm {
    fn new(fingers: usize, kind: GestureType) -> Self {
        Self {
            fingers,
            kind,
            baseline: 0.0,
        }
    }

    fn try_arm(&mut self, event: &MultiInput) -> bool {
        if event.cancelled || event.active != self.fingers || event.spread < MIN_BASELINE_SPREAD {
            return false;
        }
        self.baseline = event.spread;
        log::trace!(
            "{:?} armed with baseline {:.1} at {:?}",
            self.kind,
            self.baseline,
            event.center
        );
        true
    }

    fn payload(&self, event: &MultiInput) -> GesturePayload {
        let pinch = PinchGesture {
            scale: event.spread / self.baseline,
            center_x: event.center.0,
            center_y: event.center.1,
        };
        match self.kind {
            GestureType::Pinch3f => GesturePayload::Pinch3f(pinch),
            _ => GesturePayload::Pinch(pinch),
        }
    }
}
