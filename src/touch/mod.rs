pub mod geometry;
pub mod input;


/// Upper bound on simultaneously tracked pointers in one event.
pub const MAX_TOUCH_POINTS: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TouchPointState {
    Pressed,
    Moved,
    Released,
    #[default]
    Stationary,
    Cancelled,
}

impl TouchPointState {
    /// Whether a point in this state still has a finger on the surface.
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Released | Self::Cancelled)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchPoint {
    pub id: i32,
    pub x: i32,
    pub y: i32,
    pub state: TouchPointState,
}

impl TouchPoint {
    pub const fn new(id: i32, x: i32, y: i32, state: TouchPointState) -> Self {
        Self { id, x, y, state }
    }
}

/// One input sample: a timestamp and the pointers known at that instant,
/// ordered by physical pointer index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TouchEvent {
    timestamp_ms: u64,
    points: heapless::Vec<TouchPoint, MAX_TOUCH_POINTS>,
}

impl TouchEvent {
    pub fn new(timestamp_ms: u64, points: &[TouchPoint]) -> Self {
        debug_assert!(
            points.len() <= MAX_TOUCH_POINTS,
            "touch event carries {} points, capacity is {MAX_TOUCH_POINTS}",
            points.len()
        );
        debug_assert!(
            points
                .iter()
                .enumerate()
                .all(|(i, p)| points[..i].iter().all(|q| q.id != p.id)),
            "pointer ids must be unique within one touch event"
        );

        let mut stored = heapless::Vec::new();
        for point in points.iter().take(MAX_TOUCH_POINTS) {
            let _ = stored.push(*point);
        }
        Self {
            timestamp_ms,
            points: stored,
        }
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    pub fn points(&self) -> &[TouchPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at pointer index 0.
    pub fn primary(&self) -> Option<&TouchPoint> {
        self.points.first()
    }

    pub fn point_by_id(&self, id: i32) -> Option<&TouchPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Points whose finger is still down after this sample.
    pub fn active_points(&self) -> impl Iterator<Item = &TouchPoint> {
        self.points.iter().filter(|p| p.state.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active_points().count()
    }

    pub fn has_cancelled(&self) -> bool {
        self.points
            .iter()
            .any(|p| p.state == TouchPointState::Cancelled)
    }
}
