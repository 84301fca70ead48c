//! Conversion from pointer-indexed motion samples, as delivered by Android-style
//! input queues, to [`TouchEvent`].
//!
//! Only the primary pointer is reported as pressed or released for plain
//! DOWN/UP actions. Every other action encodes the pointer index it refers to;
//! that pointer takes the action's state and all others are stationary.

use super::{TouchEvent, TouchPoint, TouchPointState};

pub const ACTION_DOWN: i32 = 0;
pub const ACTION_UP: i32 = 1;
pub const ACTION_MOVE: i32 = 2;
pub const ACTION_CANCEL: i32 = 3;
pub const ACTION_POINTER_DOWN: i32 = 5;
pub const ACTION_POINTER_UP: i32 = 6;
pub const ACTION_MASK: i32 = 0xff;
pub const ACTION_POINTER_INDEX_MASK: i32 = 0xff00;
pub const ACTION_POINTER_INDEX_SHIFT: i32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionAction {
    Down,
    Up,
    Move { index: usize },
    Cancel { index: usize },
    PointerDown { index: usize },
    PointerUp { index: usize },
    Other { code: i32, index: usize },
}

impl MotionAction {
    pub fn decode(action: i32) -> Self {
        match action {
            ACTION_DOWN => return Self::Down,
            ACTION_UP => return Self::Up,
            _ => {}
        }

        let index = ((action & ACTION_POINTER_INDEX_MASK) >> ACTION_POINTER_INDEX_SHIFT) as usize;
        match action & ACTION_MASK {
            ACTION_MOVE => Self::Move { index },
            ACTION_CANCEL => Self::Cancel { index },
            ACTION_POINTER_DOWN => Self::PointerDown { index },
            ACTION_POINTER_UP => Self::PointerUp { index },
            code => Self::Other { code, index },
        }
    }

    pub fn encode(self) -> i32 {
        let with_index =
            |code: i32, index: usize| code | ((index as i32) << ACTION_POINTER_INDEX_SHIFT);
        match self {
            Self::Down => ACTION_DOWN,
            Self::Up => ACTION_UP,
            Self::Move { index } => with_index(ACTION_MOVE, index),
            Self::Cancel { index } => with_index(ACTION_CANCEL, index),
            Self::PointerDown { index } => with_index(ACTION_POINTER_DOWN, index),
            Self::PointerUp { index } => with_index(ACTION_POINTER_UP, index),
            Self::Other { code, index } => with_index(code & ACTION_MASK, index),
        }
    }

    /// State of the pointer at `pointer_index` under this action.
    pub fn point_state(self, pointer_index: usize) -> TouchPointState {
        let (index, state) = match self {
            Self::Down => return TouchPointState::Pressed,
            Self::Up => return TouchPointState::Released,
            Self::Move { index } => (index, TouchPointState::Moved),
            Self::Cancel { index } => (index, TouchPointState::Cancelled),
            Self::PointerDown { index } => (index, TouchPointState::Pressed),
            Self::PointerUp { index } => (index, TouchPointState::Released),
            Self::Other { .. } => return TouchPointState::Stationary,
        };
        if pointer_index == index {
            state
        } else {
            TouchPointState::Stationary
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionPointer {
    pub id: i32,
    pub x: f32,
    pub y: f32,
}

/// Host-side motion sample, borrowed for the duration of one conversion.
#[derive(Clone, Copy, Debug)]
pub struct MotionSample<'a> {
    pub action: i32,
    pub time_ms: u64,
    pub pointers: &'a [MotionPointer],
}

impl MotionSample<'_> {
    pub fn motion_action(&self) -> MotionAction {
        MotionAction::decode(self.action)
    }

    pub fn to_touch_event(&self) -> TouchEvent {
        let action = self.motion_action();
        let mut points = heapless::Vec::<TouchPoint, { super::MAX_TOUCH_POINTS }>::new();
        for (index, pointer) in self.pointers.iter().enumerate() {
            let point = TouchPoint {
                id: pointer.id,
                x: pointer.x.round() as i32,
                y: pointer.y.round() as i32,
                state: action.point_state(index),
            };
            if points.push(point).is_err() {
                log::warn!(
                    "motion sample with {} pointers truncated to {}",
                    self.pointers.len(),
                    super::MAX_TOUCH_POINTS
                );
                break;
            }
        }
        TouchEvent::new(self.time_ms, &points)
    }
}
