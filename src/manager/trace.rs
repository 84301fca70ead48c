use crate::{gesture::GestureType, recognizer::Action};

/// Upper bound on claims kept per dispatch; one per registered recognizer.
pub const MAX_TRACE_CLAIMS: usize = 16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatchInput {
    #[default]
    Touch,
    Tick,
}

/// A recognizer that returned something other than `Ignore`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Claim {
    pub gesture_type: GestureType,
    pub action: Action,
}

/// What one `send_event` call did, for diagnostics and replay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchTrace {
    pub now_ms: u64,
    pub input: DispatchInput,
    pub claims: heapless::Vec<Claim, MAX_TRACE_CLAIMS>,
    pub winner: Option<GestureType>,
}

impl DispatchTrace {
    pub(crate) fn begin(&mut self, now_ms: u64, input: DispatchInput) {
        self.now_ms = now_ms;
        self.input = input;
        self.claims.clear();
        self.winner = None;
    }

    pub(crate) fn record(&mut self, gesture_type: GestureType, action: Action) {
        if action == Action::Ignore {
            return;
        }
        if self
            .claims
            .push(Claim {
                gesture_type,
                action,
            })
            .is_err()
        {
            log::warn!("dispatch trace full, dropping {gesture_type:?} {action:?}");
        }
    }

    /// Claims that lost arbitration while reporting a transition.
    pub fn suppressed(&self) -> impl Iterator<Item = &Claim> + '_ {
        let winner = self.winner;
        self.claims
            .iter()
            .filter(move |claim| claim.action.is_transition() && Some(claim.gesture_type) != winner)
    }
}
