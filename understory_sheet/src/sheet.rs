// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;

use crate::applier::SheetApplier;
use crate::catalog::StateCatalog;
use crate::config::SheetConfig;
use crate::driver::AnimationDriver;
use crate::error::SheetError;
use crate::gesture::{Gesture, GesturePhase};
use crate::machine::{BeginOutcome, TransitionMachine};
use crate::scroll::{ScrollArbiter, ScrollDecision, ScrollRegion};
use crate::state::StateId;

/// A floating sheet: a [`TransitionMachine`] plus at most one arbitrated
/// scrollable region.
///
/// This is the surface a presenter talks to. Pointer streams on the sheet
/// itself go to [`began`](Self::began) and friends; streams on the hosted
/// scrollable content go through the `scroll_*` methods.
pub struct FloatingSheet<A, D> {
    machine: TransitionMachine<A, D>,
    scroll: Option<ScrollArbiter<Box<dyn ScrollRegion>>>,
}

impl<A: core::fmt::Debug, D: core::fmt::Debug> core::fmt::Debug for FloatingSheet<A, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FloatingSheet")
            .field("machine", &self.machine)
            .field("scrollable", &self.scroll.is_some())
            .finish()
    }
}

impl<A: SheetApplier, D: AnimationDriver> FloatingSheet<A, D> {
    /// Creates a sheet with no states.
    pub fn new(applier: A, driver: D, config: SheetConfig) -> Self {
        Self {
            machine: TransitionMachine::new(applier, driver, config),
            scroll: None,
        }
    }

    /// Installs `catalog` and moves to its first state.
    #[must_use]
    pub fn with_states(mut self, catalog: StateCatalog) -> Self {
        self.machine.replace_catalog(catalog);
        self
    }

    /// See [`TransitionMachine::set_states`].
    pub fn set_states(&mut self, catalog: StateCatalog) -> Result<(), SheetError> {
        self.machine.set_states(catalog)
    }

    /// See [`TransitionMachine::set_state`].
    pub fn set_state(&mut self, id: &StateId, animated: bool) -> Result<(), SheetError> {
        self.machine.set_state(id, animated)
    }

    /// The state the sheet last settled in.
    #[must_use]
    pub fn current_state(&self) -> Option<&StateId> {
        self.machine.current_state()
    }

    /// Starts following a pointer stream on the sheet.
    pub fn began(&mut self, gesture: &Gesture) -> BeginOutcome {
        self.machine.began(gesture)
    }

    /// Follows a pointer move on the sheet.
    pub fn changed(&mut self, gesture: &Gesture) {
        self.machine.changed(gesture);
    }

    /// Releases the sheet.
    pub fn ended(&mut self, gesture: &Gesture) {
        self.machine.ended(gesture);
    }

    /// Aborts the drag on the sheet.
    pub fn canceled(&mut self, gesture: &Gesture) {
        self.machine.canceled(gesture);
    }

    /// Dispatches a sample on the sheet by phase.
    pub fn handle_gesture(&mut self, phase: GesturePhase, gesture: &Gesture) {
        self.machine.handle_gesture(phase, gesture);
    }

    /// Frame tick; returns the state settled in during this tick, if any.
    pub fn advance(&mut self, dt: f64) -> Option<StateId> {
        self.machine.advance(dt)
    }

    /// Re-applies the current state after the host's geometry changed.
    pub fn layout_changed(&mut self) {
        self.machine.layout_changed();
    }

    /// Starts arbitrating `region`, returning the previously attached one.
    ///
    /// A drag the previous region had ceded to the sheet is canceled.
    pub fn attach_scrollable(
        &mut self,
        region: Box<dyn ScrollRegion>,
    ) -> Option<Box<dyn ScrollRegion>> {
        let previous = self.detach_scrollable();
        self.scroll = Some(ScrollArbiter::new(region));
        previous
    }

    /// Stops arbitrating and returns the attached region.
    ///
    /// A drag the region had ceded to the sheet is canceled, so the sheet
    /// settles back instead of waiting for a release that will never come.
    pub fn detach_scrollable(&mut self) -> Option<Box<dyn ScrollRegion>> {
        let mut arbiter = self.scroll.take()?;
        arbiter.did_end_dragging(&mut self.machine, true);
        Some(arbiter.into_region())
    }

    /// The attached scrollable region.
    #[must_use]
    pub fn scrollable(&self) -> Option<&dyn ScrollRegion> {
        self.scroll.as_ref().map(|s| &**s.region())
    }

    /// A drag starts on the attached region. Without a region the content
    /// always scrolls.
    pub fn scroll_will_begin_dragging(&mut self, gesture: &Gesture) -> ScrollDecision {
        match &mut self.scroll {
            Some(arbiter) => arbiter.will_begin_dragging(&mut self.machine, gesture),
            None => ScrollDecision::Scroll,
        }
    }

    /// The attached region scrolled.
    pub fn scroll_did_scroll(&mut self, gesture: &Gesture) -> ScrollDecision {
        match &mut self.scroll {
            Some(arbiter) => arbiter.did_scroll(&mut self.machine, gesture),
            None => ScrollDecision::Scroll,
        }
    }

    /// A drag on the attached region ended.
    pub fn scroll_did_end_dragging(&mut self, canceled: bool) {
        if let Some(arbiter) = &mut self.scroll {
            arbiter.did_end_dragging(&mut self.machine, canceled);
        }
    }

    /// The underlying machine.
    #[must_use]
    pub fn machine(&self) -> &TransitionMachine<A, D> {
        &self.machine
    }

    /// The host's applier.
    #[must_use]
    pub fn applier(&self) -> &A {
        self.machine.applier()
    }

    /// Mutable access to the host's applier.
    pub fn applier_mut(&mut self) -> &mut A {
        self.machine.applier_mut()
    }
}
