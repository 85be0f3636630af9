// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interruptible transition state machine.
//!
//! A [`TransitionMachine`] is always in one of three phases:
//!
//! - **Idle**: the sheet rests in its current state.
//! - **Dragging**: a gesture stream scrubs a paused animation between the
//!   current state and a provisional target.
//! - **Settling**: the animation runs on its own towards one of the two
//!   endpoints. A new gesture stream can interrupt it at any point and pick up
//!   exactly where the panel is.
//!
//! The current state only changes when a settle completes, so an interrupted
//! settle never leaves the sheet between two states as far as callers are
//! concerned.

use core::mem;

use kurbo::Vec2;
use log::{debug, trace};

use crate::applier::SheetApplier;
use crate::catalog::StateCatalog;
use crate::config::SheetConfig;
use crate::driver::{AnimationDriver, AnimationStatus};
use crate::error::SheetError;
use crate::gesture::{Gesture, GesturePhase};
use crate::selector::{self, Candidate};
use crate::state::StateId;
use crate::transition::{Transition, TransitionKind};

#[derive(Clone, Debug)]
enum Phase {
    Idle,
    Dragging(Transition),
    Settling(Transition),
}

/// Observable phase of a [`TransitionMachine`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Resting in the current state.
    Idle,
    /// Following a gesture stream.
    Dragging,
    /// Animating towards one endpoint of a transition.
    Settling,
}

/// What [`TransitionMachine::began`] did with a gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BeginOutcome {
    /// A new transition started and now follows the stream.
    Tracking,
    /// A settling transition was paused and now follows the stream.
    Interrupted,
    /// The target shares the current anchor on the drag axis; it was applied
    /// immediately and the machine stayed idle.
    Settled,
    /// Nothing to do: no current state, no state in the drag direction, or a
    /// drag already in progress.
    Ignored,
}

/// Drives a sheet between the states of a catalog.
///
/// The machine owns the host's [`SheetApplier`] and [`AnimationDriver`]; all
/// entry points take `&mut self` and are expected on the host's UI thread.
#[derive(Debug)]
pub struct TransitionMachine<A, D> {
    applier: A,
    driver: D,
    config: SheetConfig,
    catalog: StateCatalog,
    current: Option<StateId>,
    phase: Phase,
}

impl<A: SheetApplier, D: AnimationDriver> TransitionMachine<A, D> {
    /// Creates an idle machine with an empty catalog and no current state.
    pub fn new(applier: A, driver: D, config: SheetConfig) -> Self {
        Self {
            applier,
            driver,
            config,
            catalog: StateCatalog::empty(),
            current: None,
            phase: Phase::Idle,
        }
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> PhaseKind {
        match self.phase {
            Phase::Idle => PhaseKind::Idle,
            Phase::Dragging(_) => PhaseKind::Dragging,
            Phase::Settling(_) => PhaseKind::Settling,
        }
    }

    /// The state the sheet last settled in.
    #[must_use]
    pub fn current_state(&self) -> Option<&StateId> {
        self.current.as_ref()
    }

    /// The configured states.
    #[must_use]
    pub fn catalog(&self) -> &StateCatalog {
        &self.catalog
    }

    /// Fraction of the in-flight transition along its forward path, or `None`
    /// when idle. Not clamped while dragging.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        self.transition()
            .map(|t| self.driver.fraction_complete(t.animation))
    }

    /// The final state of the in-flight transition.
    #[must_use]
    pub fn target_state(&self) -> Option<&StateId> {
        self.transition().map(|t| &t.target)
    }

    /// How the in-flight transition is driven.
    #[must_use]
    pub fn transition_kind(&self) -> Option<TransitionKind> {
        self.transition().map(|t| t.kind)
    }

    /// Returns `true` while settling back to the initial state.
    #[must_use]
    pub fn is_reversing(&self) -> bool {
        matches!(&self.phase, Phase::Settling(t) if t.reversed)
    }

    /// Returns `true` while dragging or settling.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Returns `true` if `gesture` is or would be handled by a transition:
    /// one is already in flight, or a drag starting with this sample has a
    /// state to head for.
    #[must_use]
    pub fn has_transition_for(&self, gesture: &Gesture) -> bool {
        if self.is_transitioning() {
            return true;
        }
        let Some(current) = &self.current else {
            return false;
        };
        let ctx = self.applier.current_context();
        selector::next_state_in_direction(
            &self.catalog,
            &ctx,
            current,
            gesture.velocity,
            self.config.axis,
        )
        .is_some()
    }

    /// The host's applier.
    #[must_use]
    pub fn applier(&self) -> &A {
        &self.applier
    }

    /// Mutable access to the host's applier, e.g. to update its context.
    pub fn applier_mut(&mut self) -> &mut A {
        &mut self.applier
    }

    /// The animation driver.
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The tuning knobs.
    #[must_use]
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Starts following a gesture stream.
    pub fn began(&mut self, gesture: &Gesture) -> BeginOutcome {
        match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => self.begin_from_idle(gesture),
            Phase::Settling(mut transition) => {
                let axis = self.config.axis;
                if transition.is_degenerate(axis) {
                    self.driver.stop(transition.animation);
                    let landed = if transition.reversed {
                        transition.initial
                    } else {
                        transition.target
                    };
                    self.settle(landed);
                    return BeginOutcome::Settled;
                }
                self.driver.pause(transition.animation);
                let fraction = self.driver.fraction_complete(transition.animation);
                transition.track_from(gesture, fraction);
                transition.kind = TransitionKind::Interactive;
                transition.reversed = false;
                debug!(
                    "sheet: interrupted {} -> {} at {fraction}",
                    transition.initial, transition.target
                );
                self.phase = Phase::Dragging(transition);
                BeginOutcome::Interrupted
            }
            dragging @ Phase::Dragging(_) => {
                self.phase = dragging;
                BeginOutcome::Ignored
            }
        }
    }

    fn begin_from_idle(&mut self, gesture: &Gesture) -> BeginOutcome {
        let Some(current) = &self.current else {
            return BeginOutcome::Ignored;
        };
        let Some(initial) = self.catalog.get(current) else {
            return BeginOutcome::Ignored;
        };
        let ctx = self.applier.current_context();
        let axis = self.config.axis;
        let Some(target) =
            selector::next_state_in_direction(&self.catalog, &ctx, current, gesture.velocity, axis)
        else {
            trace!("sheet: no state in drag direction from {current}");
            return BeginOutcome::Ignored;
        };

        let initial_layout = initial.resolve(&ctx);
        let final_layout = target.resolve(&ctx);
        if (axis.of_point(final_layout.anchor()) - axis.of_point(initial_layout.anchor())).abs()
            < f64::EPSILON
        {
            debug!("sheet: {} shares the current anchor, applying", target.id);
            self.applier.apply_state(target, &ctx, false, None);
            self.current = Some(target.id.clone());
            return BeginOutcome::Settled;
        }

        let animation = self.driver.start(self.config.animation_duration);
        self.driver.pause(animation);
        self.applier.apply_state(target, &ctx, true, Some(animation));
        self.applier.apply_progress(&initial_layout, 0.0);

        let transition = Transition {
            kind: TransitionKind::Interactive,
            initial: initial.id.clone(),
            target: target.id.clone(),
            offset: gesture.position - initial_layout.anchor(),
            initial_layout,
            final_layout,
            animation,
            reversed: false,
        };
        debug!(
            "sheet: drag began {} -> {}",
            transition.initial, transition.target
        );
        self.phase = Phase::Dragging(transition);
        BeginOutcome::Tracking
    }

    /// Follows a pointer move while dragging.
    pub fn changed(&mut self, gesture: &Gesture) {
        let Phase::Dragging(transition) = &self.phase else {
            return;
        };
        let Some(progress) = transition.progress_for(gesture, self.config.axis) else {
            return;
        };
        trace!("sheet: progress {progress}");
        self.driver
            .set_fraction_complete(transition.animation, progress);
        self.applier
            .apply_progress(&transition.layout_at(progress), progress);
    }

    /// Releases the drag and lets the transition settle where the gesture was
    /// heading.
    pub fn ended(&mut self, gesture: &Gesture) {
        self.release(gesture, false);
    }

    /// Aborts the drag; the transition settles back to its initial state.
    pub fn canceled(&mut self, gesture: &Gesture) {
        self.release(gesture, true);
    }

    /// Dispatches a sample to the entry point matching `phase`.
    pub fn handle_gesture(&mut self, phase: GesturePhase, gesture: &Gesture) {
        match phase {
            GesturePhase::Began => {
                self.began(gesture);
            }
            GesturePhase::Changed => self.changed(gesture),
            GesturePhase::Ended => self.ended(gesture),
            GesturePhase::Canceled => self.canceled(gesture),
        }
    }

    fn release(&mut self, gesture: &Gesture, canceled: bool) {
        let mut transition = match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging(transition) => transition,
            other => {
                self.phase = other;
                return;
            }
        };
        let reversed = canceled || self.release_reverses(&transition, gesture);
        debug!(
            "sheet: released towards {}",
            if reversed {
                &transition.initial
            } else {
                &transition.target
            }
        );
        self.driver.continue_animation(
            transition.animation,
            reversed,
            self.config.continue_duration_factor,
        );
        transition.reversed = reversed;
        self.phase = Phase::Settling(transition);
    }

    /// Picks the endpoint pulling hardest on the projected stop point.
    fn release_reverses(&self, transition: &Transition, gesture: &Gesture) -> bool {
        let (Some(initial), Some(target)) = (
            self.catalog.get(&transition.initial),
            self.catalog.get(&transition.target),
        ) else {
            return false;
        };
        let point = transition.projected_point(gesture, self.config.deceleration);
        let a = Candidate {
            state: initial,
            anchor: transition.initial_anchor(),
        };
        let b = Candidate {
            state: target,
            anchor: transition.final_anchor(),
        };
        let ordered = if self.catalog.index_of(&initial.id) <= self.catalog.index_of(&target.id) {
            [a, b]
        } else {
            [b, a]
        };
        trace!("sheet: projected stop point {point:?}");
        selector::strongest(point, ordered).is_some_and(|s| s.id == transition.initial)
    }

    /// Frame tick. Returns the state the sheet settled in, if a settle
    /// completed during this tick.
    pub fn advance(&mut self, dt: f64) -> Option<StateId> {
        let Phase::Settling(transition) = &self.phase else {
            return None;
        };
        let animation = transition.animation;
        let status = self.driver.advance(animation, dt);
        let fraction = self.driver.fraction_complete(animation);
        self.applier
            .apply_progress(&transition.layout_at(fraction), fraction);
        let landed = match status {
            AnimationStatus::Running => return None,
            AnimationStatus::CompletedForward => transition.target.clone(),
            AnimationStatus::CompletedReverse => transition.initial.clone(),
        };
        self.driver.stop(animation);
        self.phase = Phase::Idle;
        self.settle(landed.clone());
        Some(landed)
    }

    /// Moves the sheet to `id`, animated if requested.
    ///
    /// Only valid while idle. Re-selecting the current state re-applies it
    /// without animation.
    pub fn set_state(&mut self, id: &StateId, animated: bool) -> Result<(), SheetError> {
        if self.catalog.is_empty() {
            return Err(SheetError::EmptyCatalog);
        }
        let Some(target) = self.catalog.get(id) else {
            return Err(SheetError::UnknownState(id.clone()));
        };
        if self.is_transitioning() {
            return Err(SheetError::Busy);
        }
        let initial = match &self.current {
            Some(current) if animated && current != id => self.catalog.get(current),
            _ => None,
        };
        let Some(initial) = initial else {
            debug!("sheet: set state {id}");
            self.settle(id.clone());
            return Ok(());
        };

        let ctx = self.applier.current_context();
        let animation = self.driver.start(self.config.animation_duration);
        let transition = Transition {
            kind: TransitionKind::Direct,
            initial: initial.id.clone(),
            target: target.id.clone(),
            offset: Vec2::ZERO,
            initial_layout: initial.resolve(&ctx),
            final_layout: target.resolve(&ctx),
            animation,
            reversed: false,
        };
        self.applier.apply_state(target, &ctx, true, Some(animation));
        self.applier
            .apply_progress(&transition.initial_layout, 0.0);
        debug!(
            "sheet: animating {} -> {}",
            transition.initial, transition.target
        );
        self.phase = Phase::Settling(transition);
        Ok(())
    }

    /// Replaces the catalog.
    ///
    /// Only valid while idle. The current state survives if the new catalog
    /// has a state of that name; otherwise the sheet moves to the first state
    /// without animation. An empty catalog clears the current state.
    pub fn set_states(&mut self, catalog: StateCatalog) -> Result<(), SheetError> {
        if self.is_transitioning() {
            return Err(SheetError::Busy);
        }
        self.replace_catalog(catalog);
        Ok(())
    }

    pub(crate) fn replace_catalog(&mut self, catalog: StateCatalog) {
        self.catalog = catalog;
        let next = match self.current.take() {
            Some(current) if self.catalog.contains(&current) => Some(current),
            _ => self.catalog.first().map(|s| s.id.clone()),
        };
        match next {
            Some(id) => self.settle(id),
            None => debug!("sheet: catalog cleared"),
        }
    }

    /// Re-applies the current state against a fresh context after the host's
    /// geometry changed. Ignored while a transition is in flight.
    pub fn layout_changed(&mut self) {
        if self.is_transitioning() {
            return;
        }
        if let Some(current) = self.current.clone() {
            self.settle(current);
        }
    }

    fn transition(&self) -> Option<&Transition> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Dragging(t) | Phase::Settling(t) => Some(t),
        }
    }

    /// Applies `id` immediately against a fresh context and makes it current.
    fn settle(&mut self, id: StateId) {
        let ctx = self.applier.current_context();
        if let Some(state) = self.catalog.get(&id) {
            self.applier.apply_state(state, &ctx, false, None);
        }
        debug!("sheet: settled in {id}");
        self.current = Some(id);
    }
}
