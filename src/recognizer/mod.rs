mod double_tap;
mod frames;
mod long_press;
mod pan;
mod pinch;
mod tap;

pub use double_tap::DoubleTapRecognizer;
pub use long_press::LongPressRecognizer;
pub use pan::PanRecognizer;
pub use pinch::PinchRecognizer;
pub use tap::TapRecognizer;

pub(crate) use frames::{MultiInput, PointerInput};

use crate::{
    config::GestureSettings,
    gesture::{Gesture, GesturePayload, GestureState},
    touch::TouchEvent,
};

/// Verdict of one `recognize` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Action {
    /// No opinion about this input.
    #[default]
    Ignore,
    /// A candidate was being tracked and has been dropped.
    NoGesture,
    Started,
    Updated,
    Finished,
    Canceled,
}

impl Action {
    pub const fn gesture_state(self) -> Option<GestureState> {
        match self {
            Self::Ignore | Self::NoGesture => None,
            Self::Started => Some(GestureState::Started),
            Self::Updated => Some(GestureState::Updated),
            Self::Finished => Some(GestureState::Finished),
            Self::Canceled => Some(GestureState::Canceled),
        }
    }

    /// Whether this action reports a gesture transition to the caller.
    pub const fn is_transition(self) -> bool {
        self.gesture_state().is_some()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::NoGesture => "no_gesture",
            Self::Started => "started",
            Self::Updated => "updated",
            Self::Finished => "finished",
            Self::Canceled => "canceled",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum RecognizerInput<'a> {
    Touch(&'a TouchEvent),
    Tick { now_ms: u64 },
}

impl RecognizerInput<'_> {
    pub fn now_ms(&self) -> u64 {
        match self {
            Self::Touch(event) => event.timestamp_ms(),
            Self::Tick { now_ms } => *now_ms,
        }
    }
}

/// One gesture kind's state machine.
pub trait GestureRecognizer {
    /// Whether timer ticks must be delivered in addition to touch events.
    fn use_timer(&self) -> bool;

    /// Advance on one input. Lifecycle actions rewrite `gesture`.
    fn recognize(
        &mut self,
        gesture: &mut Gesture,
        input: &RecognizerInput<'_>,
        settings: &GestureSettings,
    ) -> Action;

    /// Idle gesture of the kind this recognizer reports.
    fn create(&self) -> Gesture;
}

/// Per-dispatch scratch state handed to the recognizer state machines.
#[derive(Debug)]
pub(crate) struct DispatchContext {
    pub(crate) settings: GestureSettings,
    gesture: Gesture,
    action: Action,
}

impl DispatchContext {
    pub(crate) fn new(settings: GestureSettings, gesture: Gesture) -> Self {
        Self {
            settings,
            gesture,
            action: Action::Ignore,
        }
    }

    pub(crate) fn emit(&mut self, action: Action, payload: GesturePayload) {
        self.gesture.set_payload(payload);
        if let Some(state) = action.gesture_state() {
            self.gesture.set_state(state);
        }
        log::trace!("{:?} -> {:?}", self.gesture.gesture_type(), action);
        self.action = action;
    }

    /// Report the transition without changing the payload.
    pub(crate) fn emit_state(&mut self, action: Action) {
        let payload = *self.gesture.payload();
        self.emit(action, payload);
    }

    /// Drop the tracked candidate and clear the payload.
    pub(crate) fn abandon(&mut self) {
        self.gesture.reset();
        self.action = Action::NoGesture;
    }

    pub(crate) fn finish(self, gesture: &mut Gesture) -> Action {
        *gesture = self.gesture;
        self.action
    }
}

#[cfg(test)]
pub(crate) mod test_support;
