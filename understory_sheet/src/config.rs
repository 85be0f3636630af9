// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::gesture::{Axis, DEFAULT_DECELERATION};

/// Tuning knobs of a sheet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SheetConfig {
    /// Axis along which drags move the sheet.
    pub axis: Axis,
    /// Deceleration used to project flings at release, in units/s².
    pub deceleration: f64,
    /// Duration of a full transition, in seconds.
    pub animation_duration: f64,
    /// Duration factor passed to the driver when a released drag resumes.
    pub continue_duration_factor: f64,
    /// How far a scrollable region's offset may sit from rest and still count
    /// as "at rest" for scroll arbitration.
    pub rest_tolerance: f64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            deceleration: DEFAULT_DECELERATION,
            animation_duration: 0.25,
            continue_duration_factor: 1.0,
            rest_tolerance: 0.5,
        }
    }
}

impl SheetConfig {
    /// Sets the drag axis.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Sets the fling deceleration.
    #[must_use]
    pub fn with_deceleration(mut self, deceleration: f64) -> Self {
        self.deceleration = deceleration;
        self
    }

    /// Sets the duration of a full transition.
    #[must_use]
    pub fn with_animation_duration(mut self, seconds: f64) -> Self {
        self.animation_duration = seconds;
        self
    }

    /// Sets the duration factor used when a released drag resumes.
    #[must_use]
    pub fn with_continue_duration_factor(mut self, factor: f64) -> Self {
        self.continue_duration_factor = factor;
        self
    }

    /// Sets the scroll rest tolerance.
    #[must_use]
    pub fn with_rest_tolerance(mut self, tolerance: f64) -> Self {
        self.rest_tolerance = tolerance;
        self
    }
}
