//! # Tether Native
//!
//! Native adapter for the Tether positioning kernel. Unlike the DOM,
//! native surfaces deliver anchor and content geometry through layout
//! callbacks, so there is nothing to poll and no global scroll
//! listener to attach: the host feeds measurements in as they arrive
//! and the kernel answers with positions. The one async concern is
//! the settle delay before reveal, handled by a tokio timer that
//! delivers its token back over a channel.
//!
//! ```no_run
//! use tether_core::{AnchorRect, ContentSize, SafeAreaInsets, Viewport};
//! use tether_native::{native_config, NativeFloating};
//!
//! # async fn demo() {
//! let (mut menu, mut events) = NativeFloating::new(native_config());
//! menu.open_with_anchor(
//!     AnchorRect::new(24.0, 120.0, 160.0, 44.0),
//!     Viewport::new(390.0, 844.0),
//!     SafeAreaInsets::new(47.0, 0.0, 34.0, 0.0),
//! );
//! // ...from the content's layout callback:
//! menu.content_layout(ContentSize::new(280.0, 320.0));
//! // ...in the UI loop:
//! while let Some(event) = events.recv().await {
//!     if menu.handle_event(event) {
//!         // Content is now visible at menu.state().position.
//!     }
//! }
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod host;
pub mod timer;

pub use host::{native_config, NativeFloating, NATIVE_SETTLE_MILLIS};
pub use timer::{HostEvent, SettleTimer, FRAME_MILLIS};
