use super::RecognizerInput;
use crate::touch::{geometry, TouchPoint, TouchPointState, MAX_TOUCH_POINTS};

/// Input as seen by the single-pointer recognizers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointerInput {
    Press { now_ms: u64, x: i32, y: i32 },
    Move { now_ms: u64, x: i32, y: i32 },
    Release { now_ms: u64, x: i32, y: i32 },
    /// The pointer was cancelled by the input source.
    Lost { now_ms: u64 },
    /// More than one pointer is on the surface.
    MultiTouch { now_ms: u64, count: usize },
    Tick { now_ms: u64 },
}

impl PointerInput {
    pub(crate) fn from_input(input: &RecognizerInput<'_>) -> Self {
        let event = match input {
            RecognizerInput::Tick { now_ms } => return Self::Tick { now_ms: *now_ms },
            RecognizerInput::Touch(event) => event,
        };

        let now_ms = event.timestamp_ms();
        match event.points() {
            // A sample without pointers carries only time.
            [] => Self::Tick { now_ms },
            [point] => {
                let (x, y) = (point.x, point.y);
                match point.state {
                    TouchPointState::Pressed => Self::Press { now_ms, x, y },
                    TouchPointState::Moved | TouchPointState::Stationary => {
                        Self::Move { now_ms, x, y }
                    }
                    TouchPointState::Released => Self::Release { now_ms, x, y },
                    TouchPointState::Cancelled => Self::Lost { now_ms },
                }
            }
            points => {
                if event.has_cancelled() {
                    Self::Lost { now_ms }
                } else {
                    Self::MultiTouch {
                        now_ms,
                        count: points.len(),
                    }
                }
            }
        }
    }

    pub(crate) fn now_ms(&self) -> u64 {
        match *self {
            Self::Press { now_ms, .. }
            | Self::Move { now_ms, .. }
            | Self::Release { now_ms, .. }
            | Self::Lost { now_ms }
            | Self::MultiTouch { now_ms, .. }
            | Self::Tick { now_ms } => now_ms,
        }
    }
}

/// Input as seen by the pinch recognizers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct MultiInput {
    pub(crate) now_ms: u64,
    pub(crate) active: usize,
    pub(crate) cancelled: bool,
    pub(crate) center: (i32, i32),
    /// Mean pairwise distance between the active pointers.
    pub(crate) spread: f64,
}

impl MultiInput {
    pub(crate) fn from_input(input: &RecognizerInput<'_>) -> Option<Self> {
        let RecognizerInput::Touch(event) = input else {
            return None;
        };

        let mut active = heapless::Vec::<TouchPoint, MAX_TOUCH_POINTS>::new();
        for point in event.active_points() {
            let _ = active.push(*point);
        }

        Some(Self {
            now_ms: event.timestamp_ms(),
            active: active.len(),
            cancelled: event.has_cancelled(),
            center: geometry::centroid(&active).unwrap_or_default(),
            spread: geometry::mean_spread(&active),
        })
    }
}
