use core::ops::{BitOr, BitOrAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureType {
    #[default]
    NoGesture,
    Tap,
    DoubleTap,
    LongPress,
    Pan,
    Pinch,
    Pinch3f,
}

impl GestureType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoGesture => "none",
            Self::Tap => "tap",
            Self::DoubleTap => "double_tap",
            Self::LongPress => "long_press",
            Self::Pan => "pan",
            Self::Pinch => "pinch",
            Self::Pinch3f => "pinch3f",
        }
    }
}

/// Lifecycle position of a gesture. Idle gestures report `Finished`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    Started,
    Updated,
    #[default]
    Finished,
    Canceled,
}

impl GestureState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Updated => "updated",
            Self::Finished => "finished",
            Self::Canceled => "canceled",
        }
    }
}

/// Edges of the configured bounds a pan started from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PanSide(u8);

impl PanSide {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const TOP: Self = Self(1 << 2);
    pub const BOTTOM: Self = Self(1 << 3);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// True when any edge in `other` is also set here.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_horizontal(self) -> bool {
        self.intersects(Self(Self::LEFT.0 | Self::RIGHT.0))
    }

    pub const fn is_vertical(self) -> bool {
        self.intersects(Self(Self::TOP.0 | Self::BOTTOM.0))
    }
}

impl BitOr for PanSide {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PanSide {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TapGesture {
    pub x: i32,
    pub y: i32,
    pub vertical_radius: i32,
    pub horizontal_radius: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DoubleTapGesture {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LongPressGesture {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanGesture {
    pub x: i32,
    pub y: i32,
    pub delta_x: i32,
    pub delta_y: i32,
    pub side: PanSide,
}

impl PanGesture {
    /// `(x, y, delta_x, delta_y)` locked to the swipe axis for edge swipes.
    pub fn projected(&self) -> (i32, i32, i32, i32) {
        if self.side.is_horizontal() {
            (self.x, 0, self.delta_x, 0)
        } else if self.side.is_vertical() {
            (0, self.y, 0, self.delta_y)
        } else {
            (self.x, self.y, self.delta_x, self.delta_y)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchGesture {
    /// Current spread relative to the spread when the fingers settled.
    pub scale: f64,
    pub center_x: i32,
    pub center_y: i32,
}

impl Default for PinchGesture {
    fn default() -> Self {
        Self {
            scale: 1.0,
            center_x: 0,
            center_y: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GesturePayload {
    #[default]
    None,
    Tap(TapGesture),
    DoubleTap(DoubleTapGesture),
    LongPress(LongPressGesture),
    Pan(PanGesture),
    Pinch(PinchGesture),
    Pinch3f(PinchGesture),
}

impl GesturePayload {
    pub const fn gesture_type(&self) -> GestureType {
        match self {
            Self::None => GestureType::NoGesture,
            Self::Tap(_) => GestureType::Tap,
            Self::DoubleTap(_) => GestureType::DoubleTap,
            Self::LongPress(_) => GestureType::LongPress,
            Self::Pan(_) => GestureType::Pan,
            Self::Pinch(_) => GestureType::Pinch,
            Self::Pinch3f(_) => GestureType::Pinch3f,
        }
    }

    /// Idle payload of the given type.
    pub fn idle(gesture_type: GestureType) -> Self {
        match gesture_type {
            GestureType::NoGesture => Self::None,
            GestureType::Tap => Self::Tap(TapGesture::default()),
            GestureType::DoubleTap => Self::DoubleTap(DoubleTapGesture::default()),
            GestureType::LongPress => Self::LongPress(LongPressGesture::default()),
            GestureType::Pan => Self::Pan(PanGesture::default()),
            GestureType::Pinch => Self::Pinch(PinchGesture::default()),
            GestureType::Pinch3f => Self::Pinch3f(PinchGesture::default()),
        }
    }
}

/// A recognized gesture: lifecycle state plus the kind-specific payload.
///
/// Each recognizer is paired with one long-lived `Gesture` that is rewritten
/// in place while a gesture runs and reset when the next one begins.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Gesture {
    state: GestureState,
    payload: GesturePayload,
}

impl Gesture {
    pub fn idle(gesture_type: GestureType) -> Self {
        Self {
            state: GestureState::default(),
            payload: GesturePayload::idle(gesture_type),
        }
    }

    pub fn gesture_type(&self) -> GestureType {
        self.payload.gesture_type()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn payload(&self) -> &GesturePayload {
        &self.payload
    }

    pub fn as_tap(&self) -> Option<&TapGesture> {
        match &self.payload {
            GesturePayload::Tap(tap) => Some(tap),
            _ => None,
        }
    }

    pub fn as_double_tap(&self) -> Option<&DoubleTapGesture> {
        match &self.payload {
            GesturePayload::DoubleTap(double_tap) => Some(double_tap),
            _ => None,
        }
    }

    pub fn as_long_press(&self) -> Option<&LongPressGesture> {
        match &self.payload {
            GesturePayload::LongPress(long_press) => Some(long_press),
            _ => None,
        }
    }

    pub fn as_pan(&self) -> Option<&PanGesture> {
        match &self.payload {
            GesturePayload::Pan(pan) => Some(pan),
            _ => None,
        }
    }

    /// Pinch payload for both the two- and three-finger variants.
    pub fn as_pinch(&self) -> Option<&PinchGesture> {
        match &self.payload {
            GesturePayload::Pinch(pinch) | GesturePayload::Pinch3f(pinch) => Some(pinch),
            _ => None,
        }
    }

    pub(crate) fn set_state(&mut self, state: GestureState) {
        self.state = state;
    }

    pub(crate) fn set_payload(&mut self, payload: GesturePayload) {
        debug_assert_eq!(
            payload.gesture_type(),
            self.gesture_type(),
            "recognizer wrote a payload of another gesture type"
        );
        self.payload = payload;
    }

    /// Zero the payload fields, keeping the gesture type.
    pub fn reset(&mut self) {
        *self = Self::idle(self.gesture_type());
    }
}
