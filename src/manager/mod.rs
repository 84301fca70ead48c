pub mod registry;
pub mod trace;

pub use registry::{build_recognizer, gesture_registry, GestureRegistration};
pub use trace::{Claim, DispatchInput, DispatchTrace};

use crate::{
    config::{EdgeBounds, GestureConfig, GestureSettings},
    gesture::{Gesture, GestureType},
    recognizer::{GestureRecognizer, RecognizerInput},
    touch::TouchEvent,
};

struct RecognizerSlot {
    kind: GestureType,
    recognizer: Box<dyn GestureRecognizer>,
    gesture: Gesture,
}

/// Fans touch events and timer ticks out to the registered recognizers and
/// returns the one gesture that won arbitration.
///
/// Arbitration is by registration order: the first recognizer reporting a
/// lifecycle transition wins, though every recognizer still sees the input.
pub struct GestureManager {
    slots: Vec<RecognizerSlot>,
    settings: GestureSettings,
    last_timestamp_ms: Option<u64>,
    trace: DispatchTrace,
}

impl Default for GestureManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureManager {
    /// Empty manager with default settings.
    pub fn new() -> Self {
        Self::with_settings(GestureSettings::default())
    }

    pub fn with_settings(settings: GestureSettings) -> Self {
        Self {
            slots: Vec::new(),
            settings,
            last_timestamp_ms: None,
            trace: DispatchTrace::default(),
        }
    }

    /// Manager with the enabled standard recognizers registered.
    pub fn from_config(config: &GestureConfig) -> Self {
        let mut manager = Self::with_settings(config.settings());
        for entry in gesture_registry(config) {
            if !entry.enabled {
                log::debug!("{} recognizer disabled", entry.kind.label());
                continue;
            }
            if let Some(recognizer) = build_recognizer(entry.kind, config) {
                manager.register_recognizer(recognizer);
            }
        }
        manager
    }

    pub fn register_recognizer(&mut self, recognizer: Box<dyn GestureRecognizer>) {
        let gesture = recognizer.create();
        let kind = gesture.gesture_type();
        debug_assert!(
            self.slots.iter().all(|slot| slot.kind != kind),
            "{kind:?} recognizer registered twice"
        );
        log::debug!(
            "registered {} recognizer at position {} (timer: {})",
            kind.label(),
            self.slots.len(),
            recognizer.use_timer()
        );
        self.slots.push(RecognizerSlot {
            kind,
            recognizer,
            gesture,
        });
    }

    pub fn set_move_threshold(&mut self, px: i32) {
        self.settings.move_threshold_px = px;
    }

    pub fn move_threshold(&self) -> i32 {
        self.settings.move_threshold_px
    }

    pub fn set_edge_bounds(&mut self, bounds: EdgeBounds) {
        self.settings.edge_bounds = Some(bounds);
    }

    pub fn clear_edge_bounds(&mut self) {
        self.settings.edge_bounds = None;
    }

    pub fn set_edge_margin(&mut self, px: i32) {
        self.settings.edge_margin_px = px;
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    /// Dispatch a touch event, or a timer tick at `timestamp_ms` when `event`
    /// is `None`. Touch events carry their own timestamp.
    pub fn send_event(&mut self, event: Option<&TouchEvent>, timestamp_ms: u64) -> Option<&Gesture> {
        let (input, kind) = match event {
            Some(event) => (RecognizerInput::Touch(event), DispatchInput::Touch),
            None => (
                RecognizerInput::Tick {
                    now_ms: timestamp_ms,
                },
                DispatchInput::Tick,
            ),
        };
        let now_ms = input.now_ms();
        if let Some(last_ms) = self.last_timestamp_ms {
            if now_ms < last_ms {
                log::warn!("timestamp went backwards: {now_ms} ms after {last_ms} ms");
            }
        }
        self.last_timestamp_ms = Some(now_ms);
        self.trace.begin(now_ms, kind);

        let mut winner = None;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if kind == DispatchInput::Tick && !slot.recognizer.use_timer() {
                continue;
            }
            let action = slot
                .recognizer
                .recognize(&mut slot.gesture, &input, &self.settings);
            self.trace.record(slot.kind, action);
            if winner.is_none() && action.is_transition() {
                winner = Some(index);
            }
        }

        let slot = &self.slots[winner?];
        self.trace.winner = Some(slot.kind);
        log::debug!(
            "{} {} at {now_ms} ms",
            slot.kind.label(),
            slot.gesture.state().label()
        );
        for claim in self.trace.suppressed() {
            log::trace!(
                "{} {} suppressed by {}",
                claim.gesture_type.label(),
                claim.action.label(),
                slot.kind.label()
            );
        }
        Some(&slot.gesture)
    }

    /// Record of the most recent `send_event` call.
    pub fn last_trace(&self) -> &DispatchTrace {
        &self.trace
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered gesture types in arbitration order.
    pub fn recognizer_types(&self) -> impl Iterator<Item = GestureType> + '_ {
        self.slots.iter().map(|slot| slot.kind)
    }
}
