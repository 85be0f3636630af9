// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::state::StateId;

/// Error returned by the configuration entry points of a sheet.
///
/// Gesture entry points never fail; they report ignored input through their
/// return values instead. Only catalog construction and programmatic state
/// changes surface errors.
#[derive(Clone, Debug, PartialEq)]
pub enum SheetError {
    /// The catalog has no states, so there is nothing to move to.
    EmptyCatalog,
    /// No state with this name exists in the catalog.
    UnknownState(StateId),
    /// Two states in a catalog share the same name.
    DuplicateState(StateId),
    /// A state's gravity coefficient is not a positive finite number.
    InvalidGravity {
        /// The offending state.
        state: StateId,
        /// The rejected coefficient.
        gravity: f64,
    },
    /// A transition is in flight; the request is only valid while idle.
    Busy,
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => f.write_str("the state catalog is empty"),
            Self::UnknownState(id) => write!(f, "no state named {id} in the catalog"),
            Self::DuplicateState(id) => write!(f, "state {id} appears more than once"),
            Self::InvalidGravity { state, gravity } => write!(
                f,
                "state {state} has gravity {gravity}, expected a positive finite value"
            ),
            Self::Busy => f.write_str("a transition is in flight"),
        }
    }
}

impl core::error::Error for SheetError {}
