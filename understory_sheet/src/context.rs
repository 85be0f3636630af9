// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry context: the live measurements that position and mask rules resolve against.

use kurbo::{Insets, Rect, Size};
use smallvec::SmallVec;

/// Identifier for a nested sub-region of the hosted content.
///
/// Hosts pick the numbering; the engine only uses it to look up measured
/// bounds in [`ContentMetrics`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegionId(pub u32);

/// Measurements of the content hosted inside the sheet.
///
/// All rectangles are in the content's own coordinate space, with the content
/// origin at `(0, 0)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentMetrics {
    /// Size of the content view.
    pub size: Size,
    regions: SmallVec<[(RegionId, Rect); 4]>,
}

impl ContentMetrics {
    /// Creates metrics for content of the given size with no measured regions.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            regions: SmallVec::new(),
        }
    }

    /// Records the bounds of a nested region, replacing an earlier measurement.
    #[must_use]
    pub fn with_region(mut self, id: RegionId, bounds: Rect) -> Self {
        self.set_region(id, bounds);
        self
    }

    /// Records the bounds of a nested region, replacing an earlier measurement.
    pub fn set_region(&mut self, id: RegionId, bounds: Rect) {
        if let Some(slot) = self.regions.iter_mut().find(|(k, _)| *k == id) {
            slot.1 = bounds;
        } else {
            self.regions.push((id, bounds));
        }
    }

    /// Returns the measured bounds of a nested region, if known.
    #[must_use]
    pub fn region(&self, id: RegionId) -> Option<Rect> {
        self.regions
            .iter()
            .find_map(|(k, r)| (*k == id).then_some(*r))
    }

    /// Bounds of the content itself.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.size.to_rect()
    }
}

/// Everything a state's rules need to produce concrete rectangles.
///
/// A context is cheap to build and is never cached across a transition: the
/// available size may change while a drag is in progress (rotation, an
/// on-screen keyboard), so the engine asks the applier for a fresh one at
/// every decision point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SheetContext {
    /// Size of the surface hosting the sheet.
    pub available_size: Size,
    /// Safe-area insets of the hosting surface.
    pub safe_area: Insets,
    /// Measurements of the hosted content.
    pub content: ContentMetrics,
}

impl SheetContext {
    /// Creates a context with no safe-area insets and empty content.
    #[must_use]
    pub fn new(available_size: Size) -> Self {
        Self {
            available_size,
            safe_area: Insets::ZERO,
            content: ContentMetrics::default(),
        }
    }

    /// Sets the safe-area insets.
    #[must_use]
    pub fn with_safe_area(mut self, safe_area: Insets) -> Self {
        self.safe_area = safe_area;
        self
    }

    /// Sets the content measurements.
    #[must_use]
    pub fn with_content(mut self, content: ContentMetrics) -> Self {
        self.content = content;
        self
    }

    /// Full bounds of the hosting surface.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.available_size.to_rect()
    }
}
