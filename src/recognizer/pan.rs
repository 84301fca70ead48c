use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{Action, DispatchContext, GestureRecognizer, PointerInput, RecognizerInput};
use crate::{
    config::{EdgeBounds, GestureSettings},
    gesture::{Gesture, GesturePayload, GestureType, PanGesture, PanSide},
    touch::geometry::exceeds_threshold,
};

/// Single-pointer drag. Presses inside the edge margin bands are tagged
/// with the sides they started on.
pub struct PanRecognizer {
    machine: statig::blocking::StateMachine<PanHsm>,
}

impl Default for PanRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PanRecognizer {
    pub fn new() -> Self {
        Self {
            machine: PanHsm::default().state_machine(),
        }
    }
}

impl GestureRecognizer for PanRecognizer {
    fn use_timer(&self) -> bool {
        false
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
        Gesture::idle(GestureType::Pan)
    }
}

/// Edges of `bounds` whose margin band contains `(x, y)`.
pub(crate) fn edge_side(bounds: Option<EdgeBounds>, margin: i32, x: i32, y: i32) -> PanSide {
    let Some(bounds) = bounds else {
        return PanSide::NONE;
    };
    let mut side = PanSide::NONE;
    if x <= bounds.left.saturating_add(margin) {
        side |= PanSide::LEFT;
    }
    if x >= bounds.right.saturating_sub(margin) {
        side |= PanSide::RIGHT;
    }
    if y <= bounds.top.saturating_add(margin) {
        side |= PanSide::TOP;
    }
    if y >= bounds.bottom.saturating_sub(margin) {
        side |= PanSide::BOTTOM;
    }
    side
}

#[derive(Default)]
struct PanHsm {
    origin: (i32, i32),
    last: (i32, i32),
    side: PanSide,
}

#[state_machine(initial = "State::idle()")]
impl PanHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        match *event {
            PointerInput::Press { x, y, .. } => {
                self.begin_press(context, x, y);
                Transition(State::pressed())
            }
            _ => Handled,
        }
    }

    #[state]
    fn pressed(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        match *event {
            PointerInput::Press { x, y, .. } => {
                self.begin_press(context, x, y);
                Handled
            }
            PointerInput::Move { x, y, .. } => {
                if !exceeds_threshold(self.origin, x, y, context.settings.move_threshold_px) {
                    return Handled;
                }
                let payload = self.step(x, y, self.origin);
                context.emit(Action::Started, payload);
                Transition(State::panning())
            }
            PointerInput::Tick { .. } => Handled,
            PointerInput::Release { .. }
            | PointerInput::Lost { .. }
            | PointerInput::MultiTouch { .. } => {
                context.abandon();
                Transition(State::idle())
            }
        }
    }

    #[state]
    fn panning(&mut self, context: &mut DispatchContext, event: &PointerInput) -> Outcome<State> {
        match *event {
            PointerInput::Move { x, y, .. } => {
                if (x, y) == self.last {
                    return Handled;
                }
                let payload = self.step(x, y, self.last);
                context.emit(Action::Updated, payload);
                Handled
            }
            PointerInput::Release { x, y, .. } => {
                let payload = self.step(x, y, self.last);
                context.emit(Action::Finished, payload);
                Transition(State::idle())
            }
            PointerInput::Press { x, y, .. } => {
                context.emit_state(Action::Canceled);
                self.begin_press(context, x, y);
                Transition(State::pressed())
            }
            // A second pointer hands the surface over to the pinch recognizers.
            PointerInput::Lost { .. } | PointerInput::MultiTouch { .. } => {
                context.emit_state(Action::Canceled);
                Transition(State::idle())
            }
            PointerInput::Tick { .. } => Handled,
        }
    }
}

impl PanHsm {
    fn begin_press(&mut self, context: &DispatchContext, x: i32, y: i32) {
        let settings = &context.settings;
        self.origin = (x, y);
        self.last = (x, y);
        self.side = edge_side(settings.edge_bounds, settings.edge_margin_px, x, y);
    }

    /// Payload for a move to `(x, y)` measured from `from`.
    fn step(&mut self, x: i32, y: i32, from: (i32, i32)) -> GesturePayload {
        self.last = (x, y);
        GesturePayload::Pan(PanGesture {
            x,
            y,
            delta_x: x.saturating_sub(from.0),
            delta_y: y.saturating_sub(from.1),
            side: self.side,
        })
    }
}
