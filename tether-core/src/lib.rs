//! # Tether Core
//!
//! Anchored floating-element positioning: the shared kernel behind
//! popovers, dropdown menus, selects, tooltips, and overflow menus.
//! Callers supply an anchor rectangle and a content size; the kernel
//! answers where the floating content goes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   tether-core                   │
//! ├────────────────────────┬────────────────────────┤
//! │  Placement calculator  │  Viewport fit checker  │
//! │  - 12 side/alignment   │  - padding + insets    │
//! │    variants            │  - per-surface policy  │
//! ├────────────────────────┴────────────────────────┤
//! │  Flip resolver: requested → opposite →          │
//! │  realignments → clamp (always on-screen)        │
//! ├─────────────────────────────────────────────────┤
//! │  Two-phase positioner                           │
//! │  render invisibly → measure → resolve → reveal  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Platform adapters (`tether-dom`, `tether-native`) supply anchor
//! measurement, scheduling, and viewport watching; everything in this
//! crate is pure, synchronous, and platform-agnostic.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod anchor;
pub mod bounds;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod positioner;
pub mod resolve;

pub use anchor::AnchorProvider;
pub use bounds::{clamp, fits, Bounds, FitPolicy};
pub use error::{TetherError, TetherResult};
pub use geometry::{AnchorRect, ContentSize, Position, SafeAreaInsets, Viewport};
pub use placement::{calculate, Alignment, Placement, Side};
pub use positioner::{
    Directive, Phase, Positioner, PositionerConfig, PositionerId, PositioningState, SettleDelay,
    TaskToken, SIZE_TOLERANCE,
};
pub use resolve::{resolve, ResolveOptions};

/// Tether core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
