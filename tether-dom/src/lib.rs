//! # Tether DOM
//!
//! Web adapter for the Tether positioning kernel: DOM anchor
//! measurement, cancellable frame/timeout scheduling, capture-phase
//! scroll + resize viewport watching, and dismissal listener
//! plumbing.
//!
//! The shared coordinate space is the viewport
//! (`getBoundingClientRect`, `position: fixed`), so no scroll offsets
//! enter the math. Every listener and scheduled callback is owned by
//! a handle that detaches synchronously on drop; nothing can fire
//! against a closed floating element.
//!
//! ```no_run
//! use tether_dom::{dom_config, FloatingElement};
//!
//! # fn demo(anchor: web_sys::Element) -> tether_core::TetherResult<()> {
//! let mut popover = FloatingElement::new(anchor, dom_config(), |state| {
//!     // Apply state.position; gate opacity on state.is_positioned.
//! })?;
//! popover.open()?;
//! // ...later, from the content's resize observation:
//! popover.set_content_size(240.0, 120.0);
//! // ...on dismiss:
//! popover.close();
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dismiss;
pub mod floating;
pub mod measure;
pub mod schedule;
pub mod watcher;

pub use dismiss::DismissListeners;
pub use floating::{dom_config, FloatingElement, DEFAULT_ESTIMATED_SIZE};
pub use measure::DomAnchorProvider;
pub use schedule::{next_frame, schedule, ScheduledTask};
pub use watcher::DomViewportWatcher;

/// Set up the panic hook for readable errors in the browser console.
pub fn init() {
    console_error_panic_hook::set_once();
}
