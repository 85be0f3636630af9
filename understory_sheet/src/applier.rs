// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::context::SheetContext;
use crate::driver::AnimationId;
use crate::state::{SheetLayout, SheetState};

/// The view layer that materializes sheet states.
///
/// The engine decides *what* the sheet should look like; an applier decides
/// *how* that reaches the screen (frames, masks, shadows, overlay tint).
pub trait SheetApplier {
    /// Live geometry context of the hosting surface.
    fn current_context(&self) -> SheetContext;

    /// Materializes `state` resolved against `context`.
    ///
    /// When `animated` is `true` and an `animation` is given, the applier
    /// should register the change with that animation so the driver's
    /// fraction controls it. Otherwise the change is applied immediately.
    fn apply_state(
        &mut self,
        state: &SheetState,
        context: &SheetContext,
        animated: bool,
        animation: Option<AnimationId>,
    );

    /// Receives the interpolated layout on every progress update of a
    /// transition. `progress` is unclamped; over-drag arrives as values
    /// outside `0.0..=1.0`.
    ///
    /// Appliers driven by a native animation can ignore this.
    fn apply_progress(&mut self, layout: &SheetLayout, progress: f64) {
        let _ = (layout, progress);
    }
}
