//! Scroll/resize viewport watching.
//!
//! While a floating element is open its position must track the
//! anchor through page scrolls and window resizes. The scroll
//! listener is attached in the capturing phase so it also fires for
//! scrollable ancestors, not just the document. Listener removal in
//! `Drop` is synchronous and unconditional — this is the
//! leak-prevention contract, not an optimization.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use tether_core::{TetherError, TetherResult};

/// Watches `scroll` (capturing) and `resize` on the window, invoking
/// the callback on every event until dropped.
#[derive(Debug)]
pub struct DomViewportWatcher {
    window: web_sys::Window,
    on_change: Closure<dyn FnMut()>,
}

impl DomViewportWatcher {
    /// Attach the listeners.
    ///
    /// # Errors
    ///
    /// Returns [`TetherError::PlatformUnavailable`] outside a browser
    /// context or when listener registration is rejected.
    pub fn new(on_change: impl FnMut() + 'static) -> TetherResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| TetherError::PlatformUnavailable("no window object".to_owned()))?;
        let on_change = Closure::wrap(Box::new(on_change) as Box<dyn FnMut()>);

        let scroll_options = web_sys::AddEventListenerOptions::new();
        scroll_options.set_capture(true);
        window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                on_change.as_ref().unchecked_ref(),
                &scroll_options,
            )
            .and_then(|()| {
                window.add_event_listener_with_callback(
                    "resize",
                    on_change.as_ref().unchecked_ref(),
                )
            })
            .map_err(|e| {
                TetherError::PlatformUnavailable(format!("listener registration rejected: {e:?}"))
            })?;

        Ok(Self { window, on_change })
    }
}

impl Drop for DomViewportWatcher {
    fn drop(&mut self) {
        // Capture flag must match registration for removal to apply.
        let _ = self.window.remove_event_listener_with_callback_and_bool(
            "scroll",
            self.on_change.as_ref().unchecked_ref(),
            true,
        );
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_change.as_ref().unchecked_ref());
    }
}
