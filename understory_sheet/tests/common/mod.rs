// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures: a host applier that records every call it receives.

#![allow(dead_code, reason = "not every test binary uses every fixture")]

use kurbo::{Point, Size, Vec2};
use understory_sheet::{
    AnimationId, FloatingSheet, FrameDriver, Gesture, PositionRule, SheetApplier, SheetConfig,
    SheetContext, SheetLayout, SheetState, StateCatalog, StateId, TimingCurve,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Apply {
        state: StateId,
        animated: bool,
        animation: Option<AnimationId>,
        frame_y: f64,
    },
    Progress {
        progress: f64,
        layout: SheetLayout,
    },
}

#[derive(Debug)]
pub struct Recorder {
    pub ctx: SheetContext,
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn new(size: Size) -> Self {
        Self {
            ctx: SheetContext::new(size),
            calls: Vec::new(),
        }
    }

    pub fn last_apply(&self) -> Option<&Call> {
        self.calls
            .iter()
            .rev()
            .find(|c| matches!(c, Call::Apply { .. }))
    }

    pub fn last_progress(&self) -> Option<(f64, SheetLayout)> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Progress { progress, layout } => Some((*progress, *layout)),
            Call::Apply { .. } => None,
        })
    }
}

impl SheetApplier for Recorder {
    fn current_context(&self) -> SheetContext {
        self.ctx.clone()
    }

    fn apply_state(
        &mut self,
        state: &SheetState,
        context: &SheetContext,
        animated: bool,
        animation: Option<AnimationId>,
    ) {
        self.calls.push(Call::Apply {
            state: state.id.clone(),
            animated,
            animation,
            frame_y: state.anchor(context).y,
        });
    }

    fn apply_progress(&mut self, layout: &SheetLayout, progress: f64) {
        self.calls.push(Call::Progress {
            progress,
            layout: *layout,
        });
    }
}

pub type Sheet = FloatingSheet<Recorder, FrameDriver>;

/// minimal anchors at y=500, medium at y=300, full at y=0 in a 400x800 surface.
pub fn three_states() -> StateCatalog {
    StateCatalog::new([
        SheetState::new("minimal", PositionRule::bottom_band(300.0)),
        SheetState::new("medium", PositionRule::bottom_band(500.0)),
        SheetState::new("full", PositionRule::Full),
    ])
    .unwrap()
}

pub fn sheet(catalog: StateCatalog) -> Sheet {
    FloatingSheet::new(
        Recorder::new(Size::new(400.0, 800.0)),
        FrameDriver::new(TimingCurve::Linear),
        SheetConfig::default(),
    )
    .with_states(catalog)
}

pub fn moving(y: f64, vy: f64) -> Gesture {
    Gesture::new(Point::new(200.0, y), Vec2::new(0.0, vy))
}

pub fn still(y: f64) -> Gesture {
    Gesture::at(Point::new(200.0, y))
}

/// Ticks frames until a settle completes, giving up after a few seconds.
pub fn run_to_rest(sheet: &mut Sheet) -> Option<StateId> {
    for _ in 0..600 {
        if let Some(id) = sheet.advance(1.0 / 120.0) {
            return Some(id);
        }
    }
    None
}

pub fn current(sheet: &Sheet) -> Option<&str> {
    sheet.current_state().map(StateId::as_str)
}
