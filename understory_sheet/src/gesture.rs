// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture samples: position, velocity, and where a fling would come to rest.
//!
//! ## Usage
//!
//! Hosts whose input system reports velocity build [`Gesture`] values
//! directly. Hosts that only see positions feed timestamped samples into a
//! [`GestureTracker`], which estimates velocity over a short sliding window.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_sheet::{Gesture, GestureTracker};
//!
//! // A flick downward at 600 units/s comes to rest 200 units further down.
//! let fling = Gesture::new(Point::new(0.0, 100.0), Vec2::new(0.0, 600.0));
//! assert_eq!(fling.projected_stop_point(), Point::new(0.0, 300.0));
//!
//! let mut tracker = GestureTracker::default();
//! tracker.start(Point::new(10.0, 10.0), 0.0);
//! let g = tracker.update(Point::new(10.0, 30.0), 0.125).unwrap();
//! assert_eq!(g.velocity, Vec2::new(0.0, 160.0));
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Deceleration used to project flings, in units per second squared.
pub const DEFAULT_DECELERATION: f64 = 900.0;

/// The drag axis along which progress is measured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Progress follows the X coordinate.
    Horizontal,
    /// Progress follows the Y coordinate.
    #[default]
    Vertical,
}

impl Axis {
    /// The coordinate of `p` along this axis.
    #[must_use]
    pub fn of_point(self, p: Point) -> f64 {
        match self {
            Self::Horizontal => p.x,
            Self::Vertical => p.y,
        }
    }

    /// The component of `v` along this axis.
    #[must_use]
    pub fn of_vec(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }
}

/// Phase of a gesture stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// The pointer went down and the stream started.
    Began,
    /// The pointer moved.
    Changed,
    /// The pointer was lifted.
    Ended,
    /// The host aborted the stream.
    Canceled,
}

/// A single pointer sample in the hosting surface's coordinate space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Gesture {
    /// Pointer position.
    pub position: Point,
    /// Pointer velocity in units per second.
    pub velocity: Vec2,
}

impl Gesture {
    /// Creates a sample.
    #[must_use]
    pub const fn new(position: Point, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    /// Creates a stationary sample.
    #[must_use]
    pub const fn at(position: Point) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Where the pointer would settle under [`DEFAULT_DECELERATION`].
    #[must_use]
    pub fn projected_stop_point(&self) -> Point {
        self.projected_stop_point_with(DEFAULT_DECELERATION)
    }

    /// Where the pointer would settle if released now and slowed down by a
    /// constant `deceleration` opposing its motion, per axis.
    #[must_use]
    pub fn projected_stop_point_with(&self, deceleration: f64) -> Point {
        Point::new(
            project_axis(self.position.x, self.velocity.x, deceleration),
            project_axis(self.position.y, self.velocity.y, deceleration),
        )
    }

    /// This sample shifted by `-offset`.
    #[must_use]
    pub fn de_drifted(&self, offset: Vec2) -> Self {
        Self {
            position: self.position - offset,
            velocity: self.velocity,
        }
    }
}

fn project_axis(position: f64, velocity: f64, deceleration: f64) -> f64 {
    if velocity == 0.0 || deceleration == 0.0 {
        return position;
    }
    // Deceleration always opposes the motion.
    let a = if velocity > 0.0 {
        -deceleration.abs()
    } else {
        deceleration.abs()
    };
    position - 0.5 * velocity * velocity / a
}

/// Default velocity window of a [`GestureTracker`], in seconds.
pub const DEFAULT_VELOCITY_WINDOW: f64 = 0.1;

const MAX_SAMPLES: usize = 8;

/// Turns raw timestamped pointer positions into [`Gesture`] samples.
///
/// Velocity is the displacement between the oldest and newest samples within
/// the window, divided by their time difference. Times are in seconds on any
/// monotonic clock.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    samples: SmallVec<[(Point, f64); MAX_SAMPLES]>,
    window: f64,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::with_window(DEFAULT_VELOCITY_WINDOW)
    }
}

impl GestureTracker {
    /// Creates a tracker averaging velocity over `window` seconds.
    #[must_use]
    pub fn with_window(window: f64) -> Self {
        Self {
            samples: SmallVec::new(),
            window,
        }
    }

    /// Starts tracking a new stream, discarding any previous one.
    pub fn start(&mut self, pos: Point, time: f64) -> Gesture {
        self.samples.clear();
        self.samples.push((pos, time));
        Gesture::at(pos)
    }

    /// Records a move, returning the normalized sample.
    ///
    /// Returns `None` when no stream is being tracked.
    pub fn update(&mut self, pos: Point, time: f64) -> Option<Gesture> {
        if self.samples.is_empty() {
            return None;
        }
        if self.samples.len() == MAX_SAMPLES {
            self.samples.remove(0);
        }
        self.samples.push((pos, time));
        let window = self.window;
        while self.samples.len() > 2 && time - self.samples[0].1 > window {
            self.samples.remove(0);
        }
        self.gesture()
    }

    /// The latest normalized sample, if tracking.
    #[must_use]
    pub fn gesture(&self) -> Option<Gesture> {
        let &(last, last_time) = self.samples.last()?;
        let &(first, first_time) = self.samples.first()?;
        let dt = last_time - first_time;
        let velocity = if dt > 0.0 {
            (last - first) / dt
        } else {
            Vec2::ZERO
        };
        Some(Gesture::new(last, velocity))
    }

    /// Records the final sample and stops tracking.
    pub fn end(&mut self, pos: Point, time: f64) -> Option<Gesture> {
        let g = self.update(pos, time);
        self.samples.clear();
        g
    }

    /// Returns `true` while a stream is being tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        !self.samples.is_empty()
    }
}
