//! # Cart Presentation Gate
//!
//! Decides whether adding to the cart also opens the cart drawer.
//!
//! ```text
//!   add_item ──► viewport? ──┬── Narrow  ──► drawer forced open
//!                            └── Desktop ──► drawer left alone
//!                                            (header dropdown handles it)
//! ```
//!
//! The store never measures the screen. The host passes the current
//! [`Viewport`] with each `add_item`, or a width for [`Breakpoint::classify`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::DEFAULT_DESKTOP_BREAKPOINT_PX;

/// Viewport class reported by the host at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Viewport {
    /// Below the desktop breakpoint (phones, small tablets).
    Narrow,
    #[default]
    Desktop,
}

impl Viewport {
    pub const fn is_narrow(self) -> bool {
        matches!(self, Viewport::Narrow)
    }
}

/// Whether an `add_item` on this viewport must force the drawer open.
#[inline]
pub const fn should_force_open(viewport: Viewport) -> bool {
    viewport.is_narrow()
}

/// Minimum width at which the desktop layout applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    pub desktop_min_width_px: u32,
}

impl Breakpoint {
    pub const fn new(desktop_min_width_px: u32) -> Self {
        Breakpoint {
            desktop_min_width_px,
        }
    }

    /// Classifies a viewport width in CSS pixels.
    ///
    /// ```rust
    /// use shopfront_core::presentation::{Breakpoint, Viewport};
    ///
    /// let bp = Breakpoint::default();
    /// assert_eq!(bp.classify(390), Viewport::Narrow);
    /// assert_eq!(bp.classify(1024), Viewport::Desktop);
    /// ```
    pub const fn classify(self, width_px: u32) -> Viewport {
        if width_px < self.desktop_min_width_px {
            Viewport::Narrow
        } else {
            Viewport::Desktop
        }
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Breakpoint::new(DEFAULT_DESKTOP_BREAKPOINT_PX)
    }
}
