// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sheet --heading-base-level=0

//! Understory Sheet: headless floating sheet transitions.
//!
//! A floating sheet is a panel that rests in one of a few named configurations
//! (peeking at the bottom, half open, full screen, ...) and moves between them
//! under the user's finger. This crate owns the decisions; the host owns the
//! pixels and the clock.
//!
//! - **States** ([`SheetState`], [`StateCatalog`]): named resting
//!   configurations. Each one carries a [`PositionRule`] for its frame, a
//!   [`MaskRule`] for its visible region, an [`Appearance`] and a gravity
//!   coefficient. Rules resolve against a live [`SheetContext`].
//! - **Selection** ([`selector`]): the directional rule picks where a drag is
//!   heading; the gravitation rule picks where a release lands, using the
//!   fling's projected stop point ([`Gesture::projected_stop_point`]).
//! - **Transitions** ([`TransitionMachine`]): `Idle`, `Dragging` and
//!   `Settling` phases. Drags scrub a paused animation, releases let it run
//!   forward or back, and a new drag can grab a settling sheet mid-flight
//!   without a jump.
//! - **Scroll arbitration** ([`ScrollArbiter`]): decides per drag whether a
//!   scrollable region inside the sheet scrolls or hands the drag to the sheet.
//! - **Boundaries**: the host implements [`SheetApplier`] to put layouts on
//!   screen and [`AnimationDriver`] to run animations. [`FrameDriver`] is a
//!   ready-made driver advanced by explicit frame ticks.
//!
//! [`FloatingSheet`] bundles a machine with an optional scrollable region.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_sheet::{
//!     AnimationId, FloatingSheet, FrameDriver, Gesture, PositionRule, SheetApplier, SheetConfig,
//!     SheetContext, SheetState, StateCatalog,
//! };
//!
//! struct Host {
//!     size: Size,
//!     frame_y: f64,
//! }
//!
//! impl SheetApplier for Host {
//!     fn current_context(&self) -> SheetContext {
//!         SheetContext::new(self.size)
//!     }
//!
//!     fn apply_state(
//!         &mut self,
//!         state: &SheetState,
//!         ctx: &SheetContext,
//!         animated: bool,
//!         _animation: Option<AnimationId>,
//!     ) {
//!         if !animated {
//!             self.frame_y = state.anchor(ctx).y;
//!         }
//!     }
//! }
//!
//! let catalog = StateCatalog::new([
//!     SheetState::new("peek", PositionRule::bottom_band(200.0)),
//!     SheetState::new("full", PositionRule::Full),
//! ])
//! .unwrap();
//! let host = Host { size: Size::new(400.0, 800.0), frame_y: 0.0 };
//! let mut sheet = FloatingSheet::new(host, FrameDriver::default(), SheetConfig::default())
//!     .with_states(catalog);
//! assert_eq!(sheet.applier().frame_y, 600.0);
//!
//! // Fling the sheet upwards.
//! let finger = |y: f64| Gesture::new(Point::new(200.0, y), Vec2::new(0.0, -1200.0));
//! sheet.began(&finger(620.0));
//! sheet.changed(&finger(500.0));
//! sheet.ended(&finger(480.0));
//!
//! // Tick frames until the sheet lands.
//! let mut landed = None;
//! while landed.is_none() {
//!     landed = sheet.advance(1.0 / 60.0);
//! }
//! assert_eq!(landed.unwrap().as_str(), "full");
//! assert_eq!(sheet.applier().frame_y, 0.0);
//! ```
//!
//! ## Logging
//!
//! Phase changes are reported through the [`log`] facade at `debug` level,
//! per-sample progress and arbitration at `trace` level. No logger is
//! installed by this crate.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. The `std` feature (on by default)
//! and the `libm` feature are forwarded to Kurbo and Peniko.

#![no_std]

extern crate alloc;

mod appearance;
mod applier;
mod catalog;
mod config;
mod context;
mod driver;
mod error;
mod gesture;
mod machine;
mod rules;
mod scroll;
pub mod selector;
mod sheet;
mod state;
mod transition;

pub use appearance::{Appearance, Shadow};
pub use applier::SheetApplier;
pub use catalog::StateCatalog;
pub use config::SheetConfig;
pub use context::{ContentMetrics, RegionId, SheetContext};
pub use driver::{AnimationDriver, AnimationId, AnimationStatus, FrameDriver, TimingCurve};
pub use error::SheetError;
pub use gesture::{
    Axis, DEFAULT_DECELERATION, DEFAULT_VELOCITY_WINDOW, Gesture, GesturePhase, GestureTracker,
};
pub use machine::{BeginOutcome, PhaseKind, TransitionMachine};
pub use rules::{CustomMask, CustomRect, MaskRule, PositionRule};
pub use scroll::{ScrollArbiter, ScrollDecision, ScrollRegion};
pub use sheet::FloatingSheet;
pub use state::{SheetLayout, SheetState, StateId};
pub use transition::TransitionKind;
