//! Multi-touch gesture recognition.
//!
//! Touch events and timer ticks go into a [`GestureManager`], which runs them
//! through a set of per-gesture state machines and hands back at most one
//! winning [`Gesture`] per call. [`relay::GestureRelay`] turns those results
//! into host UI callbacks.

pub mod config;
pub mod gesture;
pub mod manager;
pub mod recognizer;
pub mod relay;
pub mod touch;

pub use config::{ConfigError, EdgeBounds, GestureConfig, GestureSettings};
pub use gesture::{
    DoubleTapGesture, Gesture, GesturePayload, GestureState, GestureType, LongPressGesture,
    PanGesture, PanSide, PinchGesture, TapGesture,
};
pub use manager::{DispatchTrace, GestureManager};
pub use recognizer::{Action, GestureRecognizer, RecognizerInput};
pub use touch::{TouchEvent, TouchPoint, TouchPointState, MAX_TOUCH_POINTS};
