// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named sheet states and their resolved layouts.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;
use core::hash::{Hash, Hasher};

use kurbo::{Point, Rect};

use crate::appearance::{Appearance, lerp};
use crate::context::SheetContext;
use crate::rules::{MaskRule, PositionRule};

/// Stable name of a sheet state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(Cow<'static, str>);

impl StateId {
    /// Creates an identifier from a static or owned name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// The state's name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for StateId {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// A named resting configuration of the sheet.
///
/// Equality and hashing only consider the [`id`](Self::id): two states with
/// the same name are the same state, whatever their rules.
///
/// ```
/// use kurbo::Size;
/// use understory_sheet::{PositionRule, SheetContext, SheetState};
///
/// let half = SheetState::new("half", PositionRule::relative_bottom_band(0.5)).with_gravity(2.0);
/// let ctx = SheetContext::new(Size::new(400.0, 800.0));
/// assert_eq!(half.anchor(&ctx).y, 400.0);
/// ```
#[derive(Clone, Debug)]
pub struct SheetState {
    /// Unique name within a catalog.
    pub id: StateId,
    /// Where the sheet's frame sits.
    pub position: PositionRule,
    /// How the sheet's content is clipped.
    pub mask: MaskRule,
    /// Corner radius, overlay tint and shadow.
    pub appearance: Appearance,
    /// Attraction during a free release; higher pulls harder. Must be
    /// positive and finite.
    pub gravity: f64,
}

impl SheetState {
    /// Creates a state with no mask, the default appearance and gravity `1.0`.
    pub fn new(id: impl Into<StateId>, position: PositionRule) -> Self {
        Self {
            id: id.into(),
            position,
            mask: MaskRule::None,
            appearance: Appearance::default(),
            gravity: 1.0,
        }
    }

    /// Sets the mask rule.
    #[must_use]
    pub fn with_mask(mut self, mask: MaskRule) -> Self {
        self.mask = mask;
        self
    }

    /// Sets the appearance.
    #[must_use]
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Sets the gravity coefficient.
    #[must_use]
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Representative point of the state: the top-left corner of its frame.
    #[must_use]
    pub fn anchor(&self, ctx: &SheetContext) -> Point {
        self.position.resolve(ctx).origin()
    }

    /// Resolves all rules against `ctx`.
    #[must_use]
    pub fn resolve(&self, ctx: &SheetContext) -> SheetLayout {
        let frame = self.position.resolve(ctx);
        SheetLayout {
            frame,
            mask: self.mask.effective(ctx, frame),
            appearance: self.appearance,
        }
    }
}

impl PartialEq for SheetState {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SheetState {}

impl Hash for SheetState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Concrete geometry and styling of the sheet.
///
/// Produced by [`SheetState::resolve`] for resting states and by
/// [`SheetLayout::lerp`] for frames in between two states.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SheetLayout {
    /// Frame of the sheet in surface coordinates.
    pub frame: Rect,
    /// Mask rectangle in content coordinates (the sheet bounds when unmasked).
    pub mask: Rect,
    /// Styling.
    pub appearance: Appearance,
}

impl SheetLayout {
    /// Top-left corner of the frame.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.frame.origin()
    }

    /// Interpolates between two layouts.
    ///
    /// `t` is not clamped so over-drag can be rendered as extrapolation;
    /// appliers that want a hard stop clamp it themselves.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            frame: lerp_rect(self.frame, other.frame, t),
            mask: lerp_rect(self.mask, other.mask, t),
            appearance: self.appearance.lerp(&other.appearance, t),
        }
    }
}

fn lerp_rect(a: Rect, b: Rect, t: f64) -> Rect {
    Rect::new(
        lerp(a.x0, b.x0, t),
        lerp(a.y0, b.y0, t),
        lerp(a.x1, b.x1, t),
        lerp(a.y1, b.y1, t),
    )
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use kurbo::Size;
    use std::collections::HashSet;

    #[test]
    fn equality_is_by_name() {
        let a = SheetState::new("full", PositionRule::Full);
        let b = SheetState::new("full", PositionRule::bottom_band(100.0)).with_gravity(3.0);
        let c = SheetState::new("half", PositionRule::Full);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<SheetState> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn resolve_uses_sheet_bounds_without_mask() {
        let ctx = SheetContext::new(Size::new(400.0, 800.0));
        let layout = SheetState::new("min", PositionRule::bottom_band(200.0)).resolve(&ctx);
        assert_eq!(layout.frame, Rect::new(0.0, 600.0, 400.0, 800.0));
        assert_eq!(layout.mask, Rect::new(0.0, 0.0, 400.0, 200.0));
        assert_eq!(layout.anchor(), Point::new(0.0, 600.0));
    }

    #[test]
    fn layout_lerp_extrapolates() {
        let ctx = SheetContext::new(Size::new(400.0, 800.0));
        let min = SheetState::new("min", PositionRule::bottom_band(200.0)).resolve(&ctx);
        let full = SheetState::new("full", PositionRule::Full).resolve(&ctx);

        assert_eq!(min.lerp(&full, 0.5).frame, Rect::new(0.0, 300.0, 400.0, 800.0));
        assert_eq!(min.lerp(&full, 1.5).anchor(), Point::new(0.0, -300.0));
    }
}
