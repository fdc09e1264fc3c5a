//! Node markers
//!
//! Markers are the host-facing vocabulary for opting nodes into effects:
//! reveal categories, interactive roles, and the child roles the engine
//! looks up inside cards. They parse from kebab-case tokens so hosts can
//! lift them straight out of class-like metadata.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use thiserror::Error;

/// Inline storage for the common case of one or two markers per node
pub type MarkerSet = SmallVec<[Marker; 4]>;

/// Everything a node can be tagged with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    // Reveal categories. The bare `Fade`/`Slide`/`Scale` tokens are the
    // unsuffixed aliases; they behave like the `-up` forms.
    FadeUp,
    FadeIn,
    Fade,
    SlideUp,
    SlideLeft,
    SlideRight,
    Slide,
    ScaleUp,
    Scale,

    // Interactive roles
    ServiceCard,
    PricingCard,
    Button,
    NavLink,
    PagerDot,

    // Scroll-linked effects
    Parallax,
    ScrollProgress,

    // Child roles resolved relative to a hovered card
    ServiceIcon,
    ServiceTitle,
    ServiceFeature,
    PlanPrice,
    PlanFeature,
}

impl Marker {
    /// Every marker, in declaration order
    pub const ALL: [Marker; 21] = [
        Marker::FadeUp,
        Marker::FadeIn,
        Marker::Fade,
        Marker::SlideUp,
        Marker::SlideLeft,
        Marker::SlideRight,
        Marker::Slide,
        Marker::ScaleUp,
        Marker::Scale,
        Marker::ServiceCard,
        Marker::PricingCard,
        Marker::Button,
        Marker::NavLink,
        Marker::PagerDot,
        Marker::Parallax,
        Marker::ScrollProgress,
        Marker::ServiceIcon,
        Marker::ServiceTitle,
        Marker::ServiceFeature,
        Marker::PlanPrice,
        Marker::PlanFeature,
    ];

    /// Canonical kebab-case token
    pub const fn as_str(&self) -> &'static str {
        match self {
            Marker::FadeUp => "fade-up",
            Marker::FadeIn => "fade-in",
            Marker::Fade => "fade",
            Marker::SlideUp => "slide-up",
            Marker::SlideLeft => "slide-left",
            Marker::SlideRight => "slide-right",
            Marker::Slide => "slide",
            Marker::ScaleUp => "scale-up",
            Marker::Scale => "scale",
            Marker::ServiceCard => "service-card",
            Marker::PricingCard => "pricing-card",
            Marker::Button => "button",
            Marker::NavLink => "nav-link",
            Marker::PagerDot => "pager-dot",
            Marker::Parallax => "parallax",
            Marker::ScrollProgress => "scroll-progress",
            Marker::ServiceIcon => "service-icon",
            Marker::ServiceTitle => "service-title",
            Marker::ServiceFeature => "service-feature",
            Marker::PlanPrice => "plan-price",
            Marker::PlanFeature => "plan-feature",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token did not name a known marker
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown marker token: {0:?}")]
pub struct ParseMarkerError(pub String);

impl FromStr for Marker {
    type Err = ParseMarkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Marker::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParseMarkerError(s.to_string()))
    }
}

/// Parse a whitespace-separated token list into a marker set.
///
/// Fails on the first unknown token; duplicates are kept as given.
pub fn parse_markers(tokens: &str) -> Result<MarkerSet, ParseMarkerError> {
    tokens.split_whitespace().map(Marker::from_str).collect()
}
