// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end transition behavior of a `FloatingSheet` driven through a
//! recording applier and the frame driver.

mod common;

use common::{Call, current, moving, run_to_rest, sheet, still, three_states};
use kurbo::{Insets, Point, Size};
use understory_sheet::{
    Appearance, BeginOutcome, GesturePhase, GestureTracker, PhaseKind, PositionRule, SheetState,
    StateCatalog, StateId, TransitionKind,
};

#[test]
fn installing_states_applies_the_first_one() {
    let s = sheet(three_states());
    assert_eq!(current(&s), Some("minimal"));
    assert_eq!(
        s.applier().calls,
        vec![Call::Apply {
            state: StateId::new("minimal"),
            animated: false,
            animation: None,
            frame_y: 500.0,
        }]
    );
}

#[test]
fn fling_forward_lands_on_target() {
    let mut s = sheet(three_states());
    assert_eq!(s.began(&moving(510.0, -300.0)), BeginOutcome::Tracking);
    s.changed(&moving(450.0, -300.0));
    s.ended(&moving(440.0, -900.0));

    assert_eq!(run_to_rest(&mut s).as_ref().map(StateId::as_str), Some("medium"));
    assert_eq!(current(&s), Some("medium"));
    assert_eq!(
        s.applier().calls.last(),
        Some(&Call::Apply {
            state: StateId::new("medium"),
            animated: false,
            animation: None,
            frame_y: 300.0,
        })
    );
}

#[test]
fn canceled_drag_returns_to_initial() {
    let mut s = sheet(three_states());
    s.began(&moving(500.0, -300.0));
    // Dragged almost all the way.
    s.changed(&moving(310.0, -300.0));
    s.canceled(&moving(310.0, -300.0));
    assert_eq!(run_to_rest(&mut s).as_ref().map(StateId::as_str), Some("minimal"));
    assert_eq!(current(&s), Some("minimal"));
}

#[test]
fn progress_starts_at_zero() {
    let mut s = sheet(three_states());
    s.began(&moving(530.0, -100.0));
    assert_eq!(s.machine().progress(), Some(0.0));
    let (progress, layout) = s.applier().last_progress().unwrap();
    assert_eq!(progress, 0.0);
    assert_eq!(layout.frame.y0, 500.0);
}

#[test]
fn target_is_registered_with_the_animation() {
    let mut s = sheet(three_states());
    s.began(&moving(500.0, -100.0));
    match s.applier().last_apply() {
        Some(Call::Apply {
            state,
            animated,
            animation,
            ..
        }) => {
            assert_eq!(state.as_str(), "medium");
            assert!(*animated);
            assert!(animation.is_some());
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[test]
fn idle_always_follows_a_terminal_apply() {
    let mut s = sheet(three_states());
    for (release_y, vy) in [(450.0, -900.0), (320.0, 600.0), (410.0, 0.0)] {
        s.began(&moving(500.0, -100.0));
        s.changed(&moving(release_y, vy));
        s.ended(&moving(release_y, vy));
        run_to_rest(&mut s).unwrap();
        assert_eq!(s.machine().phase(), PhaseKind::Idle);
        match s.applier().calls.last() {
            Some(Call::Apply {
                state,
                animated: false,
                animation: None,
                ..
            }) => assert_eq!(Some(state), s.current_state()),
            other => panic!("unexpected last call {other:?}"),
        }
        // Reset for the next round.
        s.set_state(&"minimal".into(), false).unwrap();
    }
}

#[test]
fn direction_picks_neighbors_of_medium() {
    let mut s = sheet(three_states());
    s.set_state(&"medium".into(), false).unwrap();

    s.began(&moving(320.0, 250.0));
    assert_eq!(
        s.machine().target_state().map(StateId::as_str),
        Some("minimal")
    );
    s.canceled(&moving(320.0, 250.0));
    run_to_rest(&mut s);

    s.began(&moving(320.0, -250.0));
    assert_eq!(s.machine().target_state().map(StateId::as_str), Some("full"));
}

#[test]
fn zero_velocity_halfway_release_prefers_heavier_endpoint() {
    for (gravity, expected) in [(2.0, "medium"), (0.5, "minimal")] {
        let mut s = sheet(
            StateCatalog::new([
                SheetState::new("minimal", PositionRule::bottom_band(300.0)),
                SheetState::new("medium", PositionRule::bottom_band(500.0)).with_gravity(gravity),
            ])
            .unwrap(),
        );
        s.began(&moving(500.0, -50.0));
        s.changed(&still(400.0));
        s.ended(&still(400.0));
        assert_eq!(
            run_to_rest(&mut s).as_ref().map(StateId::as_str),
            Some(expected)
        );
    }
}

#[test]
fn interrupting_a_settle_is_continuous() {
    let mut s = sheet(three_states());
    s.began(&moving(500.0, -300.0));
    s.changed(&moving(420.0, -300.0));
    s.ended(&moving(420.0, -1500.0));
    assert_eq!(s.machine().phase(), PhaseKind::Settling);

    // A few frames into the settle.
    for _ in 0..3 {
        assert_eq!(s.advance(1.0 / 120.0), None);
    }
    let (fraction, layout) = s.applier().last_progress().unwrap();
    assert!(fraction > 0.4 && fraction < 1.0);

    // Catch the sheet with a finger somewhere else on it.
    assert_eq!(s.began(&still(650.0)), BeginOutcome::Interrupted);
    assert_eq!(current(&s), Some("minimal"));
    assert_eq!(s.machine().target_state().map(StateId::as_str), Some("medium"));

    s.changed(&still(650.0));
    let (resumed, resumed_layout) = s.applier().last_progress().unwrap();
    assert!((resumed - fraction).abs() < 1e-9);
    assert!((resumed_layout.frame.y0 - layout.frame.y0).abs() < 1e-9);

    // Still nothing committed until the next release resolves.
    s.changed(&still(600.0));
    assert_eq!(current(&s), Some("minimal"));
    s.ended(&still(600.0));
    let landed = run_to_rest(&mut s);
    assert_eq!(landed.as_ref().map(StateId::as_str), current(&s));
}

#[test]
fn over_drag_is_forwarded_unclamped() {
    let mut s = sheet(three_states());
    s.began(&moving(500.0, -300.0));
    s.changed(&still(700.0));
    let (progress, layout) = s.applier().last_progress().unwrap();
    assert_eq!(progress, -1.0);
    assert_eq!(layout.frame.y0, 700.0);
    s.ended(&still(700.0));
    assert_eq!(run_to_rest(&mut s).as_ref().map(StateId::as_str), Some("minimal"));
}

#[test]
fn anchors_stay_fixed_while_surface_resizes() {
    let mut s = sheet(three_states());
    s.began(&moving(500.0, -300.0));
    s.applier_mut().ctx.available_size = Size::new(800.0, 400.0);
    s.layout_changed();
    s.changed(&still(400.0));
    assert_eq!(s.machine().progress(), Some(0.5));

    s.ended(&moving(400.0, -900.0));
    run_to_rest(&mut s);
    // The terminal apply resolves against the new surface.
    match s.applier().calls.last() {
        Some(Call::Apply { state, frame_y, .. }) => {
            assert_eq!(state.as_str(), "medium");
            assert_eq!(*frame_y, -100.0);
        }
        other => panic!("unexpected last call {other:?}"),
    }
}

#[test]
fn layout_change_while_idle_reapplies() {
    let mut s = sheet(three_states());
    let notched = s
        .applier()
        .ctx
        .clone()
        .with_safe_area(Insets::new(0.0, 0.0, 0.0, 34.0));
    s.applier_mut().ctx = notched;
    s.layout_changed();
    assert_eq!(
        s.applier().calls.last(),
        Some(&Call::Apply {
            state: StateId::new("minimal"),
            animated: false,
            animation: None,
            frame_y: 466.0,
        })
    );
}

#[test]
fn programmatic_change_animates_and_can_be_grabbed() {
    let mut s = sheet(three_states());
    s.set_state(&"full".into(), true).unwrap();
    assert_eq!(s.machine().transition_kind(), Some(TransitionKind::Direct));
    assert!(s.set_state(&"medium".into(), false).is_err());

    s.advance(0.05);
    assert_eq!(s.began(&still(200.0)), BeginOutcome::Interrupted);
    assert_eq!(
        s.machine().transition_kind(),
        Some(TransitionKind::Interactive)
    );
    s.canceled(&still(200.0));
    assert_eq!(run_to_rest(&mut s).as_ref().map(StateId::as_str), Some("minimal"));
}

#[test]
fn appearance_interpolates_with_progress() {
    let mut s = sheet(
        StateCatalog::new([
            SheetState::new("card", PositionRule::bottom_band(400.0))
                .with_appearance(Appearance::default().with_corner_radius(16.0)),
            SheetState::new("full", PositionRule::Full),
        ])
        .unwrap(),
    );
    s.began(&moving(400.0, -10.0));
    s.changed(&still(200.0));
    let (progress, layout) = s.applier().last_progress().unwrap();
    assert_eq!(progress, 0.5);
    assert_eq!(layout.appearance.corner_radius, 8.0);
    assert_eq!(layout.frame.y0, 200.0);
}

#[test]
fn tracker_samples_drive_the_sheet() {
    let mut s = sheet(three_states());
    let mut tracker = GestureTracker::default();

    let g = tracker.start(Point::new(200.0, 520.0), 0.0);
    // A stationary touch heads towards lesser coordinates.
    s.handle_gesture(GesturePhase::Began, &g);
    assert_eq!(s.machine().phase(), PhaseKind::Dragging);

    let mut t = 0.0;
    let mut y = 520.0;
    for _ in 0..8 {
        t += 0.015625;
        y -= 20.0;
        let g = tracker.update(Point::new(200.0, y), t).unwrap();
        s.handle_gesture(GesturePhase::Changed, &g);
    }
    let g = tracker.end(Point::new(200.0, y - 20.0), t + 0.015625).unwrap();
    assert!(g.velocity.y < -1000.0);
    s.handle_gesture(GesturePhase::Ended, &g);
    assert_eq!(run_to_rest(&mut s).as_ref().map(StateId::as_str), Some("medium"));
}

#[test]
fn begin_outcomes_when_nothing_to_do() {
    let mut s = sheet(three_states());
    // Already at the bottom-most state.
    assert_eq!(s.began(&moving(520.0, 400.0)), BeginOutcome::Ignored);
    s.changed(&still(600.0));
    s.ended(&still(600.0));
    assert_eq!(s.machine().phase(), PhaseKind::Idle);
    assert_eq!(s.applier().calls.len(), 1);
}
