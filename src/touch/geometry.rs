use super::TouchPoint;

pub fn squared_distance(ax: i32, ay: i32, bx: i32, by: i32) -> i64 {
    let dx = i64::from(ax) - i64::from(bx);
    let dy = i64::from(ay) - i64::from(by);
    dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
}

pub fn squared_i64(value: i32) -> i64 {
    let value = i64::from(value);
    value.saturating_mul(value)
}

/// True when `(x, y)` lies strictly farther than `threshold` from the origin point.
pub fn exceeds_threshold(origin: (i32, i32), x: i32, y: i32, threshold: i32) -> bool {
    squared_distance(origin.0, origin.1, x, y) > squared_i64(threshold.max(0))
}

pub fn distance(a: &TouchPoint, b: &TouchPoint) -> f64 {
    (squared_distance(a.x, a.y, b.x, b.y) as f64).sqrt()
}

/// Integer mean position of the given points, `None` when empty.
pub fn centroid<'a>(points: impl IntoIterator<Item = &'a TouchPoint>) -> Option<(i32, i32)> {
    let mut count = 0i64;
    let mut sum_x = 0i64;
    let mut sum_y = 0i64;
    for point in points {
        count += 1;
        sum_x += i64::from(point.x);
        sum_y += i64::from(point.y);
    }
    if count == 0 {
        return None;
    }
    Some(((sum_x / count) as i32, (sum_y / count) as i32))
}

/// Mean pairwise distance between points; zero for fewer than two points.
pub fn mean_spread(points: &[TouchPoint]) -> f64 {
    let mut pairs = 0u32;
    let mut total = 0.0f64;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            total += distance(a, b);
            pairs += 1;
        }
    }
    if pairs == 0 {
        0.0
    } else {
        total / f64::from(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touch::TouchPointState;

    fn point(id: i32, x: i32, y: i32) -> TouchPoint {
        TouchPoint::new(id, x, y, TouchPointState::Stationary)
    }

    #[test]
    fn threshold_is_exclusive() {
        assert!(!exceeds_threshold((0, 0), 40, 0, 40));
        assert!(exceeds_threshold((0, 0), 41, 0, 40));
        assert!(exceeds_threshold((0, 0), 30, 30, 40));
    }

    #[test]
    fn centroid_averages_points() {
        let points = [point(0, 0, 0), point(1, 100, 50), point(2, 50, 100)];
        assert_eq!(centroid(&points), Some((50, 50)));
        let empty: [TouchPoint; 0] = [];
        assert_eq!(centroid(&empty), None);
    }

    #[test]
    fn spread_of_three_points_is_mean_of_pairs() {
        let points = [point(0, 0, 0), point(1, 30, 0), point(2, 0, 40)];
        let spread = mean_spread(&points);
        assert!((spread - 40.0).abs() < 1e-9);
    }

    #[test]
    fn spread_of_single_point_is_zero() {
        assert_eq!(mean_spread(&[point(0, 5, 5)]), 0.0);
    }
}
