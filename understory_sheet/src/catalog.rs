// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::error::SheetError;
use crate::state::{SheetState, StateId};

/// Ordered, immutable set of the states a sheet can rest in.
///
/// Catalog order matters: it breaks ties during target selection (the
/// first-listed state wins) and its first entry is the state a fresh sheet
/// starts in.
///
/// ```
/// use understory_sheet::{PositionRule, SheetError, SheetState, StateCatalog};
///
/// let catalog = StateCatalog::new([
///     SheetState::new("min", PositionRule::bottom_band(120.0)),
///     SheetState::new("full", PositionRule::Full),
/// ])
/// .unwrap();
/// assert_eq!(catalog.index_of(&"full".into()), Some(1));
///
/// let dup = StateCatalog::new([
///     SheetState::new("min", PositionRule::Full),
///     SheetState::new("min", PositionRule::Full),
/// ]);
/// assert_eq!(dup.unwrap_err(), SheetError::DuplicateState("min".into()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct StateCatalog {
    states: Vec<SheetState>,
    index: HashMap<StateId, usize>,
}

impl StateCatalog {
    /// Builds a catalog, validating names and gravity coefficients.
    ///
    /// An empty catalog is valid; a sheet with no states ignores gestures and
    /// rejects programmatic state changes.
    pub fn new(states: impl IntoIterator<Item = SheetState>) -> Result<Self, SheetError> {
        let states: Vec<SheetState> = states.into_iter().collect();
        let mut index = HashMap::with_capacity(states.len());
        for (i, state) in states.iter().enumerate() {
            if !(state.gravity.is_finite() && state.gravity > 0.0) {
                return Err(SheetError::InvalidGravity {
                    state: state.id.clone(),
                    gravity: state.gravity,
                });
            }
            if index.insert(state.id.clone(), i).is_some() {
                return Err(SheetError::DuplicateState(state.id.clone()));
            }
        }
        Ok(Self { states, index })
    }

    /// A catalog with no states.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if there are no states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// States in catalog order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &SheetState> + '_ {
        self.states.iter()
    }

    /// States in catalog order, as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[SheetState] {
        &self.states
    }

    /// The first-listed state.
    #[must_use]
    pub fn first(&self) -> Option<&SheetState> {
        self.states.first()
    }

    /// Looks up a state by name.
    #[must_use]
    pub fn get(&self, id: &StateId) -> Option<&SheetState> {
        self.index.get(id).map(|&i| &self.states[i])
    }

    /// Catalog position of a state.
    #[must_use]
    pub fn index_of(&self, id: &StateId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Returns `true` if a state with this name exists.
    #[must_use]
    pub fn contains(&self, id: &StateId) -> bool {
        self.index.contains_key(id)
    }
}

impl<'a> IntoIterator for &'a StateCatalog {
    type Item = &'a SheetState;
    type IntoIter = core::slice::Iter<'a, SheetState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}
