// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target selection: which state a point or a drag is heading for.
//!
//! Two rules are provided:
//!
//! - **Gravitation** ([`closest_state`], [`strongest`]): every candidate pulls
//!   on a query point with `gravity / (distance² + 1)`; the strongest pull
//!   wins. Used at release time, on the projected stop point of a fling.
//! - **Direction** ([`next_state_in_direction`]): the nearest state along the
//!   drag axis on the side the pointer is moving towards. Used to pick the
//!   provisional target when a drag begins.
//!
//! Ties are deterministic: candidates are visited in catalog order and a later
//! candidate only wins with a strictly larger score, so the first-listed state
//! wins every tie.
//!
//! ```
//! use kurbo::{Point, Size, Vec2};
//! use understory_sheet::{selector, Axis, PositionRule, SheetContext, SheetState, StateCatalog};
//!
//! let catalog = StateCatalog::new([
//!     SheetState::new("minimal", PositionRule::bottom_band(300.0)),
//!     SheetState::new("medium", PositionRule::bottom_band(500.0)),
//!     SheetState::new("full", PositionRule::Full),
//! ])
//! .unwrap();
//! let ctx = SheetContext::new(Size::new(400.0, 800.0));
//!
//! let up = selector::next_state_in_direction(
//!     &catalog, &ctx, &"medium".into(), Vec2::new(0.0, -50.0), Axis::Vertical,
//! );
//! assert_eq!(up.map(|s| s.id.as_str()), Some("full"));
//!
//! let near = selector::closest_state(&catalog, &ctx, Point::new(0.0, 480.0), None);
//! assert_eq!(near.map(|s| s.id.as_str()), Some("minimal"));
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::catalog::StateCatalog;
use crate::context::SheetContext;
use crate::gesture::Axis;
use crate::state::{SheetState, StateId};

/// Attraction of `point` towards a state anchored at `anchor`.
#[must_use]
pub fn gravitation_score(gravity: f64, point: Point, anchor: Point) -> f64 {
    gravity / (point.distance_squared(anchor) + 1.0)
}

/// A state considered by [`strongest`], with its anchor already resolved.
#[derive(Copy, Clone, Debug)]
pub struct Candidate<'a> {
    /// The candidate state.
    pub state: &'a SheetState,
    /// Its anchor point.
    pub anchor: Point,
}

/// The candidate with the largest gravitation score at `point`.
///
/// Candidates must be given in priority order; the first one wins ties.
pub fn strongest<'a>(
    point: Point,
    candidates: impl IntoIterator<Item = Candidate<'a>>,
) -> Option<&'a SheetState> {
    let mut best: Option<(f64, &'a SheetState)> = None;
    for c in candidates {
        let score = gravitation_score(c.state.gravity, point, c.anchor);
        match best {
            Some((s, _)) if score <= s => {}
            _ => best = Some((score, c.state)),
        }
    }
    best.map(|(_, state)| state)
}

/// The catalog state whose anchor pulls hardest on `point`.
///
/// `exclude` removes one state from consideration, typically the current one.
#[must_use]
pub fn closest_state<'a>(
    catalog: &'a StateCatalog,
    ctx: &SheetContext,
    point: Point,
    exclude: Option<&StateId>,
) -> Option<&'a SheetState> {
    strongest(
        point,
        catalog
            .iter()
            .filter(|s| Some(&s.id) != exclude)
            .map(|state| Candidate {
                state,
                anchor: state.anchor(ctx),
            }),
    )
}

/// The nearest state past `current` along `axis`, on the side `velocity` points to.
///
/// Positive velocity looks for the nearest anchor strictly greater than the
/// current one, negative velocity for the nearest strictly lesser. A
/// stationary pointer looks towards lesser coordinates. When several states
/// share the nearest coordinate, the first-listed one is returned in either
/// direction. Returns `None` when `current` is not in the catalog or nothing
/// lies in that direction.
#[must_use]
pub fn next_state_in_direction<'a>(
    catalog: &'a StateCatalog,
    ctx: &SheetContext,
    current: &StateId,
    velocity: Vec2,
    axis: Axis,
) -> Option<&'a SheetState> {
    let origin = axis.of_point(catalog.get(current)?.anchor(ctx));

    let mut ordered: SmallVec<[(f64, &'a SheetState); 8]> = catalog
        .iter()
        .filter(|s| s.id != *current)
        .map(|s| (axis.of_point(s.anchor(ctx)), s))
        .collect();
    // Stable: states sharing a coordinate keep catalog order.
    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

    if axis.of_vec(velocity) > 0.0 {
        ordered
            .iter()
            .find(|(coord, _)| *coord > origin)
            .map(|(_, s)| *s)
    } else {
        let nearest = ordered
            .iter()
            .rev()
            .find(|(coord, _)| *coord < origin)?
            .0;
        ordered
            .iter()
            .find(|(coord, _)| *coord == nearest)
            .map(|(_, s)| *s)
    }
}
