// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbitration between a scrollable region inside the sheet and the sheet's
//! own transitions.
//!
//! When the hosted content scrolls, a drag on it can mean "scroll the content"
//! or "move the sheet". A [`ScrollArbiter`] decides once per drag, at drag
//! start, and then routes the rest of the stream accordingly:
//!
//! - A transition already in flight always takes the drag over.
//! - Content scrolled away from its rest offset keeps the drag: the user is
//!   reading, not moving the sheet.
//! - Otherwise the sheet takes the drag if there is a state to head for in the
//!   drag direction.
//!
//! While the sheet owns the drag, the region's content offset is pinned at
//! rest so the content does not scroll along with the sheet.

use alloc::boxed::Box;

use kurbo::Vec2;
use log::trace;

use crate::applier::SheetApplier;
use crate::driver::AnimationDriver;
use crate::gesture::{Axis, Gesture};
use crate::machine::{BeginOutcome, TransitionMachine};

/// A scrollable region hosted inside the sheet.
pub trait ScrollRegion {
    /// Current content offset.
    fn content_offset(&self) -> Vec2;

    /// The offset the content rests at when not scrolled, typically the
    /// negated top content inset.
    fn rest_offset(&self) -> Vec2;

    /// Moves the content to `offset` without animation.
    fn set_content_offset(&mut self, offset: Vec2);
}

impl<R: ScrollRegion + ?Sized> ScrollRegion for Box<R> {
    fn content_offset(&self) -> Vec2 {
        (**self).content_offset()
    }

    fn rest_offset(&self) -> Vec2 {
        (**self).rest_offset()
    }

    fn set_content_offset(&mut self, offset: Vec2) {
        (**self).set_content_offset(offset);
    }
}

/// Who handles a drag on the scrollable region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDecision {
    /// The sheet moves; the region must not scroll.
    Cede,
    /// The region scrolls as usual.
    Scroll,
}

/// Routes drags on one [`ScrollRegion`] to a [`TransitionMachine`].
#[derive(Debug)]
pub struct ScrollArbiter<R> {
    region: R,
    ceded: bool,
    last_gesture: Option<Gesture>,
}

impl<R: ScrollRegion> ScrollArbiter<R> {
    /// Starts arbitrating drags on `region`.
    pub fn new(region: R) -> Self {
        Self {
            region,
            ceded: false,
            last_gesture: None,
        }
    }

    /// Returns `true` while the current drag belongs to the sheet.
    #[must_use]
    pub fn is_ceded(&self) -> bool {
        self.ceded
    }

    /// The arbitrated region.
    #[must_use]
    pub fn region(&self) -> &R {
        &self.region
    }

    /// Mutable access to the arbitrated region.
    pub fn region_mut(&mut self) -> &mut R {
        &mut self.region
    }

    /// Stops arbitrating and hands the region back.
    pub fn into_region(self) -> R {
        self.region
    }

    /// Decides who handles a drag starting on the region.
    ///
    /// On [`ScrollDecision::Cede`] the machine has already received the
    /// stream's `began`.
    pub fn will_begin_dragging<A, D>(
        &mut self,
        machine: &mut TransitionMachine<A, D>,
        gesture: &Gesture,
    ) -> ScrollDecision
    where
        A: SheetApplier,
        D: AnimationDriver,
    {
        self.ceded = false;
        self.last_gesture = Some(*gesture);

        if machine.is_transitioning() {
            // Interrupts a settle; a drag already in progress keeps its stream.
            machine.began(gesture);
            trace!("scroll: transition in flight, ceding drag to sheet");
            self.cede();
            return ScrollDecision::Cede;
        }
        if self.is_displaced(machine.config().axis, machine.config().rest_tolerance) {
            trace!("scroll: content displaced from rest, keeping drag");
            return ScrollDecision::Scroll;
        }
        if !machine.has_transition_for(gesture) {
            return ScrollDecision::Scroll;
        }

        match machine.began(gesture) {
            BeginOutcome::Tracking | BeginOutcome::Interrupted => {
                trace!("scroll: ceding drag to sheet");
                self.cede();
                ScrollDecision::Cede
            }
            BeginOutcome::Settled | BeginOutcome::Ignored => ScrollDecision::Scroll,
        }
    }

    /// Forwards a scroll sample while ceded.
    pub fn did_scroll<A, D>(
        &mut self,
        machine: &mut TransitionMachine<A, D>,
        gesture: &Gesture,
    ) -> ScrollDecision
    where
        A: SheetApplier,
        D: AnimationDriver,
    {
        if !self.ceded {
            return ScrollDecision::Scroll;
        }
        machine.changed(gesture);
        self.pin_at_rest();
        self.last_gesture = Some(*gesture);
        ScrollDecision::Cede
    }

    /// Ends a drag on the region, releasing the sheet with the last observed
    /// sample if it was ceded.
    pub fn did_end_dragging<A, D>(&mut self, machine: &mut TransitionMachine<A, D>, canceled: bool)
    where
        A: SheetApplier,
        D: AnimationDriver,
    {
        if !self.ceded {
            return;
        }
        self.ceded = false;
        let gesture = self.last_gesture.take().unwrap_or_default();
        if canceled {
            machine.canceled(&gesture);
        } else {
            machine.ended(&gesture);
        }
    }

    fn is_displaced(&self, axis: Axis, tolerance: f64) -> bool {
        let delta = self.region.content_offset() - self.region.rest_offset();
        axis.of_vec(delta).abs() > tolerance
    }

    fn cede(&mut self) {
        self.ceded = true;
        self.pin_at_rest();
    }

    fn pin_at_rest(&mut self) {
        let rest = self.region.rest_offset();
        self.region.set_content_offset(rest);
    }
}
