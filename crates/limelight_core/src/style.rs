//! Typed inline style overrides
//!
//! The host renders every node from its own stylesheet; Limelight only ever
//! writes *overrides* on top of that. [`InlineStyle`] models exactly the
//! properties the effect engine touches, and every field is an `Option`:
//! `None` means "no override, fall back to the stylesheet", which makes
//! reverting an effect a plain `None` write instead of a saved-and-restored
//! snapshot.

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color with components in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Construct from 8-bit channels (alpha stays 1.0)
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// A color taken from the host's theme palette rather than a literal value.
///
/// Roles keep the engine ignorant of actual theme values; the host resolves
/// them when it applies a style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorRole {
    /// Primary accent color (highlighted titles, prices)
    Accent,
    /// High-emphasis text color (hovered list items)
    Emphasis,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transform
// ─────────────────────────────────────────────────────────────────────────────

/// Translation plus uniform scale, applied about the node's own origin.
///
/// This is the full transform vocabulary the engine uses. An explicit
/// [`Transform::IDENTITY`] is *not* the same as no transform at all: writing
/// identity overrides whatever the stylesheet says, while `None` on
/// [`InlineStyle::transform`] lets the stylesheet win.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            scale: 1.0,
        }
    }

    pub const fn translate_x(x: f32) -> Self {
        Self::translate(x, 0.0)
    }

    pub const fn translate_y(y: f32) -> Self {
        Self::translate(0.0, y)
    }

    pub const fn uniform_scale(scale: f32) -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale,
        }
    }

    pub const fn with_scale(self, scale: f32) -> Self {
        Self { scale, ..self }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transition
// ─────────────────────────────────────────────────────────────────────────────

/// Interpolation curve for host-run transitions
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimingFunction {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// CSS-style cubic bezier with control points (x1, y1), (x2, y2)
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

/// Asks the host to interpolate the properties changed by the same write.
///
/// The engine writes target values and the curve; actually tweening between
/// old and new values over `duration_ms` is the host's job.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub duration_ms: f32,
    pub timing: TimingFunction,
}

impl Transition {
    pub const fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
        }
    }

    pub const fn with_duration(self, duration_ms: f32) -> Self {
        Self {
            duration_ms,
            ..self
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shadow
// ─────────────────────────────────────────────────────────────────────────────

/// Drop shadow override
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: Color,
}

impl Shadow {
    pub const fn new(offset_x: f32, offset_y: f32, blur: f32, color: Color) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            spread: 0.0,
            color,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InlineStyle
// ─────────────────────────────────────────────────────────────────────────────

/// Per-node style overrides written by the effect engine.
///
/// `None` in any field means the stylesheet value applies unchanged. The
/// engine reverts an effect by writing `None` back into the fields it set,
/// never by restoring captured values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InlineStyle {
    /// Opacity override in `0.0..=1.0`
    pub opacity: Option<f32>,
    /// Transform override; `Some(IDENTITY)` pins the node in place
    pub transform: Option<Transform>,
    /// Transition the host should run for this write's changes
    pub transition: Option<Transition>,
    /// Drop shadow override
    pub shadow: Option<Shadow>,
    /// Text color override, as a theme role
    pub color: Option<ColorRole>,
    /// Width override as a percentage of the parent, `0.0..=100.0`
    pub width_pct: Option<f32>,
    /// Node becomes the positioning anchor for its overlays
    pub anchored: Option<bool>,
    /// Node clips overlays to its own bounds
    pub clipped: Option<bool>,
}

impl InlineStyle {
    pub const EMPTY: InlineStyle = InlineStyle {
        opacity: None,
        transform: None,
        transition: None,
        shadow: None,
        color: None,
        width_pct: None,
        anchored: None,
        clipped: None,
    };

    /// True when no field overrides the stylesheet
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Drop every override
    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
