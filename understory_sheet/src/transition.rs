// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single in-flight transition between two states.

use kurbo::{Point, Vec2};

use crate::driver::AnimationId;
use crate::gesture::{Axis, Gesture};
use crate::state::{SheetLayout, StateId};

/// How a transition is driven.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Progress follows a drag until release.
    Interactive,
    /// Started by a programmatic state change; progress follows the driver's
    /// own timing and always completes forward unless a drag takes over.
    Direct,
}

/// Anchors and layouts are captured once when the transition starts and stay
/// fixed for its lifetime, even if the available size changes meanwhile.
#[derive(Clone, Debug)]
pub(crate) struct Transition {
    pub(crate) kind: TransitionKind,
    pub(crate) initial: StateId,
    pub(crate) target: StateId,
    /// Gesture position minus panel anchor at the moment tracking started.
    pub(crate) offset: Vec2,
    pub(crate) initial_layout: SheetLayout,
    pub(crate) final_layout: SheetLayout,
    pub(crate) animation: AnimationId,
    pub(crate) reversed: bool,
}

impl Transition {
    pub(crate) fn initial_anchor(&self) -> Point {
        self.initial_layout.anchor()
    }

    pub(crate) fn final_anchor(&self) -> Point {
        self.final_layout.anchor()
    }

    /// Signed distance between the anchors along `axis`.
    pub(crate) fn span(&self, axis: Axis) -> f64 {
        axis.of_point(self.final_anchor()) - axis.of_point(self.initial_anchor())
    }

    /// Both anchors coincide on the drag axis, so progress is undefined.
    pub(crate) fn is_degenerate(&self, axis: Axis) -> bool {
        self.span(axis).abs() < f64::EPSILON
    }

    /// Anchor of the panel at `fraction` along the forward path.
    pub(crate) fn anchor_at(&self, fraction: f64) -> Point {
        self.initial_anchor().lerp(self.final_anchor(), fraction)
    }

    pub(crate) fn layout_at(&self, fraction: f64) -> SheetLayout {
        self.initial_layout.lerp(&self.final_layout, fraction)
    }

    /// Re-captures the offset so the de-drifted `gesture` sits exactly on the
    /// panel's anchor at `fraction`.
    pub(crate) fn track_from(&mut self, gesture: &Gesture, fraction: f64) {
        self.offset = gesture.position - self.anchor_at(fraction);
    }

    /// Unclamped progress of the de-drifted `gesture`, or `None` for a
    /// degenerate transition.
    pub(crate) fn progress_for(&self, gesture: &Gesture, axis: Axis) -> Option<f64> {
        if self.is_degenerate(axis) {
            return None;
        }
        let position = gesture.de_drifted(self.offset).position;
        Some((axis.of_point(position) - axis.of_point(self.initial_anchor())) / self.span(axis))
    }

    /// Where the de-drifted `gesture` would come to rest.
    pub(crate) fn projected_point(&self, gesture: &Gesture, deceleration: f64) -> Point {
        gesture
            .de_drifted(self.offset)
            .projected_stop_point_with(deceleration)
    }
}
