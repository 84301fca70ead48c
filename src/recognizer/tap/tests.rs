use super::super::test_support::{cancel, fingers, moved, press, release, Harness};
use super::*;
use crate::{gesture::GestureState, touch::TouchPointState};

#[test]
fn deferred_tap_reports_after_double_tap_window() {
    let mut tap = Harness::new(TapRecognizer::default());

    assert_eq!(tap.touch(&press(0, 100, 100)), Action::Ignore);
    assert_eq!(tap.touch(&moved(40, 103, 98)), Action::Ignore);
    assert_eq!(tap.touch(&release(90, 102, 101)), Action::Ignore);
    assert_eq!(tap.tick(200), Action::Ignore);

    assert_eq!(tap.tick(391), Action::Started);
    assert_eq!(tap.gesture.state(), GestureState::Started);
    assert_eq!(
        tap.gesture.as_tap(),
        Some(&TapGesture {
            x: 102,
            y: 101,
            vertical_radius: 2,
            horizontal_radius: 3,
        })
    );

    assert_eq!(tap.tick(400), Action::Finished);
    assert_eq!(tap.gesture.state(), GestureState::Finished);
    assert_eq!(tap.gesture.as_tap().map(|t| (t.x, t.y)), Some((102, 101)));
    assert_eq!(tap.tick(500), Action::Ignore);
}

#[test]
fn immediate_tap_reports_on_release() {
    let mut tap = Harness::new(TapRecognizer::immediate(TapConfig::default()));
    assert!(!tap.recognizer.use_timer());

    assert_eq!(tap.touch(&press(0, 10, 10)), Action::Ignore);
    assert_eq!(tap.touch(&release(50, 10, 12)), Action::Started);
    assert_eq!(tap.touch(&press(400, 60, 60)), Action::Finished);
    assert_eq!(tap.touch(&release(450, 60, 60)), Action::Started);
}

#[test]
fn second_press_inside_window_suppresses_both_taps() {
    let mut tap = Harness::new(TapRecognizer::default());

    tap.touch(&press(0, 100, 100));
    tap.touch(&release(80, 100, 100));
    assert_eq!(tap.touch(&press(200, 110, 104)), Action::Ignore);
    assert_eq!(tap.touch(&release(260, 110, 104)), Action::NoGesture);
    assert_eq!(tap.tick(700), Action::Ignore);
    assert_eq!(tap.tick(900), Action::Ignore);
}

#[test]
fn distant_second_press_flushes_pending_tap() {
    let mut tap = Harness::new(TapRecognizer::default());

    tap.touch(&press(0, 100, 100));
    tap.touch(&release(80, 100, 100));
    assert_eq!(tap.touch(&press(150, 400, 400)), Action::Started);
    assert_eq!(tap.gesture.as_tap().map(|t| (t.x, t.y)), Some((100, 100)));

    assert_eq!(tap.touch(&release(210, 401, 400)), Action::Finished);
    // The queued press became a tap of its own and waits for its window.
    assert_eq!(tap.tick(600), Action::Started);
    assert_eq!(tap.gesture.as_tap().map(|t| (t.x, t.y)), Some((401, 400)));
}

#[test]
fn movement_beyond_threshold_drops_tap() {
    let mut tap = Harness::new(TapRecognizer::default());

    tap.touch(&press(0, 100, 100));
    assert_eq!(tap.touch(&moved(30, 150, 100)), Action::NoGesture);
    assert_eq!(tap.touch(&release(60, 100, 100)), Action::Ignore);
    assert_eq!(tap.tick(1_000), Action::Ignore);
}

#[test]
fn held_press_expires_on_tick() {
    let mut tap = Harness::new(TapRecognizer::default());

    tap.touch(&press(0, 100, 100));
    assert_eq!(tap.tick(250), Action::Ignore);
    assert_eq!(tap.tick(301), Action::NoGesture);
    assert_eq!(tap.touch(&release(900, 100, 100)), Action::Ignore);
}

#[test]
fn too_short_press_is_rejected() {
    let config = TapConfig {
        min_duration_ms: 40,
        ..TapConfig::default()
    };
    let mut tap = Harness::new(TapRecognizer::immediate(config));

    tap.touch(&press(0, 5, 5));
    assert_eq!(tap.touch(&release(20, 5, 5)), Action::NoGesture);
}

#[test]
fn second_pointer_and_cancel_abort_the_press() {
    let mut tap = Harness::new(TapRecognizer::default());

    tap.touch(&press(0, 100, 100));
    let two = fingers(
        20,
        &[
            (100, 100, TouchPointState::Stationary),
            (200, 200, TouchPointState::Pressed),
        ],
    );
    assert_eq!(tap.touch(&two), Action::NoGesture);

    tap.touch(&press(500, 100, 100));
    assert_eq!(tap.touch(&cancel(520, 100, 100)), Action::NoGesture);
}

#[test]
fn consecutive_taps_do_not_leak_radii() {
    let mut tap = Harness::new(TapRecognizer::immediate(TapConfig::default()));

    tap.touch(&press(0, 100, 100));
    tap.touch(&moved(20, 120, 90));
    assert_eq!(tap.touch(&release(60, 100, 100)), Action::Started);
    assert_eq!(
        tap.gesture.as_tap().map(|t| (t.horizontal_radius, t.vertical_radius)),
        Some((20, 10))
    );

    tap.touch(&press(1_000, 300, 300));
    assert_eq!(tap.touch(&release(1_050, 300, 300)), Action::Started);
    assert_eq!(
        tap.gesture.as_tap().map(|t| (t.horizontal_radius, t.vertical_radius)),
        Some((0, 0))
    );
}

#[test]
fn dragged_second_press_still_reports_first_tap() {
    let mut tap = Harness::new(TapRecognizer::default());

    tap.touch(&press(0, 100, 100));
    tap.touch(&release(80, 100, 100));
    assert_eq!(tap.touch(&press(150, 105, 100)), Action::Ignore);
    assert_eq!(tap.touch(&moved(170, 200, 100)), Action::Started);
    assert_eq!(tap.gesture.as_tap().map(|t| (t.x, t.y)), Some((100, 100)));

    assert_eq!(tap.tick(186), Action::Finished);
    assert_eq!(tap.touch(&release(210, 300, 100)), Action::Ignore);
    assert_eq!(tap.tick(900), Action::Ignore);
}

#[test]
fn held_second_press_reports_first_tap_on_expiry() {
    let mut tap = Harness::new(TapRecognizer::default());

    tap.touch(&press(0, 100, 100));
    tap.touch(&release(80, 100, 100));
    tap.touch(&press(150, 105, 100));
    assert_eq!(tap.tick(400), Action::Ignore);
    assert_eq!(tap.tick(451), Action::Started);
    assert_eq!(tap.gesture.as_tap().map(|t| (t.x, t.y)), Some((100, 100)));
    assert_eq!(tap.tick(467), Action::Finished);
    assert_eq!(tap.touch(&release(1_200, 105, 100)), Action::Ignore);
}

#[test]
fn second_finger_during_pair_reports_first_tap() {
    let mut tap = Harness::new(TapRecognizer::default());

    tap.touch(&press(0, 100, 100));
    tap.touch(&release(80, 100, 100));
    tap.touch(&press(150, 105, 100));
    let two = fingers(
        170,
        &[
            (105, 100, TouchPointState::Stationary),
            (300, 100, TouchPointState::Pressed),
        ],
    );
    assert_eq!(tap.touch(&two), Action::Started);
    assert_eq!(tap.gesture.as_tap().map(|t| (t.x, t.y)), Some((100, 100)));
}

#[test]
fn queued_press_survives_the_finishing_tick() {
    let mut tap = Harness::new(TapRecognizer::default());

    tap.touch(&press(0, 100, 100));
    tap.touch(&release(80, 100, 100));
    assert_eq!(tap.touch(&press(150, 400, 400)), Action::Started);
    assert_eq!(tap.tick(166), Action::Finished);

    assert_eq!(tap.touch(&release(210, 400, 400)), Action::Ignore);
    assert_eq!(tap.tick(500), Action::Ignore);
    assert_eq!(tap.tick(511), Action::Started);
    assert_eq!(tap.gesture.as_tap().map(|t| (t.x, t.y)), Some((400, 400)));
}

#[test]
fn queued_press_still_expires() {
    let mut tap = Harness::new(TapRecognizer::default());

    tap.touch(&press(0, 100, 100));
    tap.touch(&release(80, 100, 100));
    tap.touch(&press(150, 400, 400));
    assert_eq!(tap.tick(166), Action::Finished);
    assert_eq!(tap.tick(451), Action::NoGesture);
    assert_eq!(tap.touch(&release(500, 400, 400)), Action::Ignore);
}

#[test]
fn extreme_coordinates_saturate_radii() {
    let mut tap = Harness::new(TapRecognizer::immediate(TapConfig::default()));

    tap.touch(&press(0, i32::MIN, i32::MAX));
    assert_eq!(tap.touch(&moved(20, i32::MAX, i32::MIN)), Action::NoGesture);
    assert_eq!(tap.touch(&release(40, i32::MAX, i32::MIN)), Action::Ignore);
}
