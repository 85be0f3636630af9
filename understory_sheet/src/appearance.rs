// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;
use peniko::Color;

/// Drop shadow parameters of the sheet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Shadow {
    /// Shadow color; `None` disables the shadow.
    pub color: Option<Color>,
    /// Offset of the shadow from the sheet.
    pub offset: Vec2,
    /// Blur radius.
    pub radius: f64,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: None,
            offset: Vec2::ZERO,
            radius: 0.0,
            opacity: 0.0,
        }
    }
}

impl Shadow {
    /// Interpolates between two shadows.
    ///
    /// A shadow without a color fades through transparent: the missing side
    /// borrows the other side's color with zero opacity.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let color = match (self.color, other.color) {
            (Some(a), Some(b)) => Some(lerp_color(a, b, t)),
            (Some(c), None) | (None, Some(c)) => Some(c),
            (None, None) => None,
        };
        Self {
            color,
            offset: self.offset.lerp(other.offset, t),
            radius: lerp(self.radius, other.radius, t),
            opacity: lerp_f32(self.opacity, other.opacity, t),
        }
    }
}

/// Visual styling of the sheet in a given state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Appearance {
    /// Corner radius of the sheet's mask.
    pub corner_radius: f64,
    /// Tint drawn over the area behind the sheet.
    pub overlay: Color,
    /// Drop shadow.
    pub shadow: Shadow,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            corner_radius: 0.0,
            overlay: Color::TRANSPARENT,
            shadow: Shadow::default(),
        }
    }
}

impl Appearance {
    /// Sets the corner radius.
    #[must_use]
    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    /// Sets the overlay tint.
    #[must_use]
    pub fn with_overlay(mut self, overlay: Color) -> Self {
        self.overlay = overlay;
        self
    }

    /// Sets the drop shadow.
    #[must_use]
    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = shadow;
        self
    }

    /// Interpolates between two appearances.
    ///
    /// `t` is not clamped; values outside `0.0..=1.0` extrapolate.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            corner_radius: lerp(self.corner_radius, other.corner_radius, t),
            overlay: lerp_color(self.overlay, other.overlay, t),
            shadow: self.shadow.lerp(&other.shadow, t),
        }
    }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Color and opacity channels are stored as f32"
)]
fn lerp_f32(a: f32, b: f32, t: f64) -> f32 {
    a + (b - a) * t as f32
}

fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    let [r0, g0, b0, a0] = a.components;
    let [r1, g1, b1, a1] = b.components;
    Color::new([
        lerp_f32(r0, r1, t),
        lerp_f32(g0, g1, t),
        lerp_f32(b0, b1, t),
        lerp_f32(a0, a1, t),
    ])
}
