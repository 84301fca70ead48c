use crate::{
    config::GestureConfig,
    gesture::GestureType,
    recognizer::{
        DoubleTapRecognizer, GestureRecognizer, LongPressRecognizer, PanRecognizer,
        PinchRecognizer, TapRecognizer,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureRegistration {
    pub kind: GestureType,
    pub enabled: bool,
}

/// Standard recognizers in arbitration order.
pub fn gesture_registry(config: &GestureConfig) -> [GestureRegistration; 6] {
    let selection = &config.recognizers;
    [
        GestureRegistration {
            kind: GestureType::Tap,
            enabled: selection.tap,
        },
        GestureRegistration {
            kind: GestureType::Pan,
            enabled: selection.pan,
        },
        GestureRegistration {
            kind: GestureType::Pinch,
            enabled: selection.pinch,
        },
        GestureRegistration {
            kind: GestureType::Pinch3f,
            enabled: selection.pinch3f,
        },
        GestureRegistration {
            kind: GestureType::DoubleTap,
            enabled: selection.double_tap,
        },
        GestureRegistration {
            kind: GestureType::LongPress,
            enabled: selection.long_press,
        },
    ]
}

/// Recognizer for `kind` configured from `config`; `None` for `NoGesture`.
pub fn build_recognizer(
    kind: GestureType,
    config: &GestureConfig,
) -> Option<Box<dyn GestureRecognizer>> {
    let recognizer: Box<dyn GestureRecognizer> = match kind {
        GestureType::NoGesture => return None,
        GestureType::Tap => Box::new(TapRecognizer::new(config.tap, config.double_tap)),
        GestureType::DoubleTap => {
            Box::new(DoubleTapRecognizer::new(config.tap, config.double_tap))
        }
        GestureType::LongPress => Box::new(LongPressRecognizer::new(config.long_press)),
        GestureType::Pan => Box::new(PanRecognizer::new()),
        GestureType::Pinch => Box::new(PinchRecognizer::two_finger()),
        GestureType::Pinch3f => Box::new(PinchRecognizer::three_finger()),
    };
    Some(recognizer)
}
