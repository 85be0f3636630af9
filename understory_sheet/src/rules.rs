// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative position and mask rules.
//!
//! A rule is a pure function of a [`SheetContext`], expressed as a small
//! tagged variant. [`PositionRule::Custom`] and [`MaskRule::Custom`] wrap
//! arbitrary functions.
//!
//! ```
//! use kurbo::{Insets, Rect, Size};
//! use understory_sheet::{PositionRule, SheetContext};
//!
//! let ctx = SheetContext::new(Size::new(400.0, 800.0));
//! let band = PositionRule::bottom_band(200.0).inset(Insets::uniform(8.0));
//! assert_eq!(band.resolve(&ctx), Rect::new(8.0, 608.0, 392.0, 792.0));
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt;

use kurbo::{Insets, Rect};

use crate::context::{RegionId, SheetContext};

/// Shrinks `rect` by `insets` (negative insets grow it).
pub(crate) fn inset_rect(rect: Rect, insets: Insets) -> Rect {
    Rect::new(
        rect.x0 + insets.x0,
        rect.y0 + insets.y0,
        rect.x1 - insets.x1,
        rect.y1 - insets.y1,
    )
}

/// Arbitrary frame function wrapped for use in [`PositionRule::Custom`].
#[derive(Clone)]
pub struct CustomRect(Rc<dyn Fn(&SheetContext) -> Rect>);

impl CustomRect {
    /// Wraps a frame function.
    pub fn new(f: impl Fn(&SheetContext) -> Rect + 'static) -> Self {
        Self(Rc::new(f))
    }
}

impl fmt::Debug for CustomRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRect(..)")
    }
}

/// Arbitrary mask function wrapped for use in [`MaskRule::Custom`].
#[derive(Clone)]
pub struct CustomMask(Rc<dyn Fn(&SheetContext) -> Option<Rect>>);

impl CustomMask {
    /// Wraps a mask function.
    pub fn new(f: impl Fn(&SheetContext) -> Option<Rect> + 'static) -> Self {
        Self(Rc::new(f))
    }
}

impl fmt::Debug for CustomMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomMask(..)")
    }
}

/// Where the sheet's frame sits for a given state.
#[derive(Clone, Debug)]
pub enum PositionRule {
    /// The full bounds of the hosting surface.
    Full,
    /// A fixed-height band anchored to the bottom of the safe area, spanning
    /// the full width.
    BottomBand {
        /// Band height.
        height: f64,
        /// Grow the band down to the surface's bottom edge, covering the
        /// bottom safe-area strip instead of leaving a gap below it.
        extend: bool,
    },
    /// Like [`PositionRule::BottomBand`], with the height expressed as a
    /// fraction of the available height.
    RelativeBottomBand {
        /// Fraction of the available height, typically in `0.0..=1.0`.
        fraction: f64,
        /// Grow the band down to the surface's bottom edge.
        extend: bool,
    },
    /// Another rule's rectangle shrunk by edge insets (negative insets grow it).
    Inset {
        /// The rule being insetted.
        rule: Box<Self>,
        /// Edge insets applied to its rectangle.
        insets: Insets,
    },
    /// An arbitrary frame function.
    Custom(CustomRect),
}

impl PositionRule {
    /// Full bounds shrunk by `insets`.
    #[must_use]
    pub fn inset_from_bounds(insets: Insets) -> Self {
        Self::Full.inset(insets)
    }

    /// A band of `height` sitting on the bottom safe-area edge.
    #[must_use]
    pub fn bottom_band(height: f64) -> Self {
        Self::BottomBand {
            height,
            extend: false,
        }
    }

    /// A band whose height is `fraction` of the available height.
    #[must_use]
    pub fn relative_bottom_band(fraction: f64) -> Self {
        Self::RelativeBottomBand {
            fraction,
            extend: false,
        }
    }

    /// Wraps an arbitrary frame function.
    pub fn custom(f: impl Fn(&SheetContext) -> Rect + 'static) -> Self {
        Self::Custom(CustomRect::new(f))
    }

    /// Composes this rule with an inset transform.
    #[must_use]
    pub fn inset(self, insets: Insets) -> Self {
        Self::Inset {
            rule: Box::new(self),
            insets,
        }
    }

    /// Resolves the rule into a concrete frame in surface coordinates.
    #[must_use]
    pub fn resolve(&self, ctx: &SheetContext) -> Rect {
        match self {
            Self::Full => ctx.bounds(),
            Self::BottomBand { height, extend } => bottom_band(ctx, *height, *extend),
            Self::RelativeBottomBand { fraction, extend } => {
                bottom_band(ctx, ctx.available_size.height * fraction, *extend)
            }
            Self::Inset { rule, insets } => inset_rect(rule.resolve(ctx), *insets),
            Self::Custom(f) => (f.0)(ctx),
        }
    }
}

fn bottom_band(ctx: &SheetContext, height: f64, extend: bool) -> Rect {
    let size = ctx.available_size;
    let bottom = size.height - ctx.safe_area.y1;
    let y0 = bottom - height;
    let y1 = if extend { size.height } else { bottom };
    Rect::new(0.0, y0, size.width, y1)
}

/// How the sheet's content is clipped for a given state.
///
/// Mask rectangles live in the content's coordinate space. A rule that
/// resolves to `None` means "no mask": the sheet's own bounds are used for
/// masking and shadow purposes (see [`MaskRule::effective`]).
#[derive(Clone, Debug, Default)]
pub enum MaskRule {
    /// No mask.
    #[default]
    None,
    /// The content bounds shrunk by edge insets.
    ContentInset(Insets),
    /// The measured bounds of a nested content region.
    Region(RegionId),
    /// Another mask shrunk by edge insets (negative insets grow it).
    Inset {
        /// The rule being insetted.
        rule: Box<Self>,
        /// Edge insets applied to its rectangle.
        insets: Insets,
    },
    /// An arbitrary mask function.
    Custom(CustomMask),
}

impl MaskRule {
    /// Wraps an arbitrary mask function.
    pub fn custom(f: impl Fn(&SheetContext) -> Option<Rect> + 'static) -> Self {
        Self::Custom(CustomMask::new(f))
    }

    /// Composes this rule with an inset transform.
    #[must_use]
    pub fn inset(self, insets: Insets) -> Self {
        Self::Inset {
            rule: Box::new(self),
            insets,
        }
    }

    /// Resolves the rule, returning `None` for "no mask".
    #[must_use]
    pub fn resolve(&self, ctx: &SheetContext) -> Option<Rect> {
        match self {
            Self::None => None,
            Self::ContentInset(insets) => Some(inset_rect(ctx.content.bounds(), *insets)),
            Self::Region(id) => ctx.content.region(*id),
            Self::Inset { rule, insets } => rule.resolve(ctx).map(|r| inset_rect(r, *insets)),
            Self::Custom(f) => (f.0)(ctx),
        }
    }

    /// Resolves the rule, falling back to the bounds of a sheet with `frame`.
    #[must_use]
    pub fn effective(&self, ctx: &SheetContext, frame: Rect) -> Rect {
        self.resolve(ctx).unwrap_or_else(|| frame.size().to_rect())
    }
}
