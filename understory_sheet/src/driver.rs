// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation driver boundary and a headless reference driver.
//!
//! The engine never interpolates on its own clock. It asks an
//! [`AnimationDriver`] to start, pause, scrub and resume one animation per
//! transition, and polls it once per frame through
//! [`AnimationDriver::advance`]. Hosts with a native animator implement the
//! trait over it; [`FrameDriver`] covers everything else.
//!
//! Fractions follow the forward path: `0.0` is the initial state, `1.0` the
//! final state, whatever direction the animation currently runs in.
//!
//! ```
//! use understory_sheet::{AnimationDriver, AnimationStatus, FrameDriver, TimingCurve};
//!
//! let mut driver = FrameDriver::new(TimingCurve::Linear);
//! let id = driver.start(1.0);
//! driver.pause(id);
//! driver.set_fraction_complete(id, 0.5);
//!
//! // Resume backwards: half of the full duration remains.
//! driver.continue_animation(id, true, 1.0);
//! assert_eq!(driver.advance(id, 0.25), AnimationStatus::Running);
//! assert_eq!(driver.fraction_complete(id), 0.25);
//! assert_eq!(driver.advance(id, 1.0), AnimationStatus::CompletedReverse);
//! assert_eq!(driver.fraction_complete(id), 0.0);
//! ```

use hashbrown::HashMap;

/// Handle to an animation owned by an [`AnimationDriver`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimationId(pub u64);

/// What an animation reported on a frame tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnimationStatus {
    /// Still running, or paused.
    Running,
    /// Reached fraction `1.0` running forward.
    CompletedForward,
    /// Reached fraction `0.0` running in reverse.
    CompletedReverse,
}

/// The host's animation primitive, as seen by the transition engine.
pub trait AnimationDriver {
    /// Starts a new animation of `duration` seconds, running forward from `0.0`.
    fn start(&mut self, duration: f64) -> AnimationId;

    /// Freezes the animation at its current fraction.
    fn pause(&mut self, id: AnimationId);

    /// Moves a paused animation to `fraction`.
    ///
    /// The value is not clamped; fractions outside `0.0..=1.0` represent
    /// over-drag.
    fn set_fraction_complete(&mut self, id: AnimationId, fraction: f64);

    /// Current fraction along the forward path. Unknown ids report `0.0`.
    fn fraction_complete(&self, id: AnimationId) -> f64;

    /// Resumes from the current fraction towards `1.0`, or towards `0.0` when
    /// `reversed`.
    ///
    /// The run takes `duration * duration_factor` scaled by the distance left
    /// to cover; a `duration_factor <= 0.0` means `1.0`.
    fn continue_animation(&mut self, id: AnimationId, reversed: bool, duration_factor: f64);

    /// Frame tick: advances the animation by `dt` seconds and reports where it
    /// stands. Paused and unknown animations report
    /// [`AnimationStatus::Running`].
    fn advance(&mut self, id: AnimationId, dt: f64) -> AnimationStatus;

    /// Releases the animation. The id is invalid afterwards.
    fn stop(&mut self, id: AnimationId);
}

/// Easing applied to each run of a [`FrameDriver`] animation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TimingCurve {
    /// Constant speed.
    Linear,
    /// Cubic ease-out: fast start, gentle landing.
    #[default]
    EaseOut,
}

impl TimingCurve {
    /// Maps linear time `t` in `0.0..=1.0` to eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Track {
    duration: f64,
    fraction: f64,
    from: f64,
    to: f64,
    run_duration: f64,
    elapsed: f64,
    paused: bool,
}

impl Track {
    fn status(&self) -> AnimationStatus {
        if self.paused || self.fraction != self.to {
            AnimationStatus::Running
        } else if self.to >= 1.0 {
            AnimationStatus::CompletedForward
        } else {
            AnimationStatus::CompletedReverse
        }
    }

    fn restart_run(&mut self) {
        self.from = self.fraction;
        self.elapsed = 0.0;
    }
}

/// Headless [`AnimationDriver`] advanced by explicit frame ticks.
///
/// Each run eases from the fraction it resumed at to its target, so
/// continuing after a scrub never jumps.
#[derive(Clone, Debug, Default)]
pub struct FrameDriver {
    curve: TimingCurve,
    tracks: HashMap<AnimationId, Track>,
    next_id: u64,
}

impl FrameDriver {
    /// Creates a driver easing every run with `curve`.
    #[must_use]
    pub fn new(curve: TimingCurve) -> Self {
        Self {
            curve,
            tracks: HashMap::new(),
            next_id: 0,
        }
    }

    /// The easing applied to runs.
    #[must_use]
    pub fn curve(&self) -> TimingCurve {
        self.curve
    }

    /// Number of live animations.
    #[must_use]
    pub fn live(&self) -> usize {
        self.tracks.len()
    }

    /// Returns `true` if `id` is live and paused.
    #[must_use]
    pub fn is_paused(&self, id: AnimationId) -> bool {
        self.tracks.get(&id).is_some_and(|t| t.paused)
    }
}

impl AnimationDriver for FrameDriver {
    fn start(&mut self, duration: f64) -> AnimationId {
        self.next_id += 1;
        let id = AnimationId(self.next_id);
        self.tracks.insert(
            id,
            Track {
                duration,
                fraction: 0.0,
                from: 0.0,
                to: 1.0,
                run_duration: duration,
                elapsed: 0.0,
                paused: false,
            },
        );
        id
    }

    fn pause(&mut self, id: AnimationId) {
        if let Some(track) = self.tracks.get_mut(&id) {
            track.paused = true;
            track.restart_run();
        }
    }

    fn set_fraction_complete(&mut self, id: AnimationId, fraction: f64) {
        if let Some(track) = self.tracks.get_mut(&id) {
            track.fraction = fraction;
            track.restart_run();
        }
    }

    fn fraction_complete(&self, id: AnimationId) -> f64 {
        self.tracks.get(&id).map_or(0.0, |t| t.fraction)
    }

    fn continue_animation(&mut self, id: AnimationId, reversed: bool, duration_factor: f64) {
        if let Some(track) = self.tracks.get_mut(&id) {
            let factor = if duration_factor > 0.0 {
                duration_factor
            } else {
                1.0
            };
            track.to = if reversed { 0.0 } else { 1.0 };
            track.restart_run();
            track.run_duration = track.duration * factor * (track.to - track.from).abs();
            track.paused = false;
        }
    }

    fn advance(&mut self, id: AnimationId, dt: f64) -> AnimationStatus {
        let curve = self.curve;
        let Some(track) = self.tracks.get_mut(&id) else {
            return AnimationStatus::Running;
        };
        if track.paused {
            return AnimationStatus::Running;
        }
        track.elapsed += dt.max(0.0);
        let t = if track.run_duration > 0.0 {
            (track.elapsed / track.run_duration).min(1.0)
        } else {
            1.0
        };
        track.fraction = if t >= 1.0 {
            track.to
        } else {
            track.from + (track.to - track.from) * curve.apply(t)
        };
        track.status()
    }

    fn stop(&mut self, id: AnimationId) {
        self.tracks.remove(&id);
    }
}
