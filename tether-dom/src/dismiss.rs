//! Escape-key and outside-click dismissal listeners.
//!
//! Dismissal *policy* belongs to the caller; this module only
//! provides the listener plumbing. Clicks inside the floating content
//! or on the anchor never count as outside clicks, so toggling via
//! the trigger does not immediately reopen. Listeners detach
//! synchronously on drop.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use tether_core::{TetherError, TetherResult};

/// Attached dismissal listeners; removed when dropped.
pub struct DismissListeners {
    document: web_sys::Document,
    keydown: Option<Closure<dyn FnMut(web_sys::KeyboardEvent)>>,
    mousedown: Option<Closure<dyn FnMut(web_sys::MouseEvent)>>,
}

impl DismissListeners {
    /// Attach listeners for the given anchor/content pair.
    ///
    /// `on_escape` fires on the Escape key; `on_click_outside` fires
    /// on mousedown (capturing) outside both the content and the
    /// anchor. Pass `None` to skip either behavior.
    ///
    /// # Errors
    ///
    /// Returns [`TetherError::PlatformUnavailable`] outside a browser
    /// context or when listener registration is rejected.
    pub fn attach(
        anchor: web_sys::Element,
        content: web_sys::Element,
        on_escape: Option<Box<dyn Fn()>>,
        on_click_outside: Option<Box<dyn Fn()>>,
    ) -> TetherResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| TetherError::PlatformUnavailable("no document object".to_owned()))?;

        let keydown = match on_escape {
            Some(callback) => {
                let closure = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
                    if event.key() == "Escape" {
                        callback();
                    }
                }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);
                document
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                    .map_err(|e| {
                        TetherError::PlatformUnavailable(format!(
                            "listener registration rejected: {e:?}"
                        ))
                    })?;
                Some(closure)
            }
            None => None,
        };

        let mousedown = match on_click_outside {
            Some(callback) => {
                let closure = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
                    let target = event
                        .target()
                        .and_then(|t| t.dyn_into::<web_sys::Node>().ok());
                    let Some(target) = target else {
                        return;
                    };
                    if content.contains(Some(&target)) || anchor.contains(Some(&target)) {
                        return;
                    }
                    callback();
                }) as Box<dyn FnMut(web_sys::MouseEvent)>);
                document
                    .add_event_listener_with_callback_and_bool(
                        "mousedown",
                        closure.as_ref().unchecked_ref(),
                        true,
                    )
                    .map_err(|e| {
                        TetherError::PlatformUnavailable(format!(
                            "listener registration rejected: {e:?}"
                        ))
                    })?;
                Some(closure)
            }
            None => None,
        };

        Ok(Self {
            document,
            keydown,
            mousedown,
        })
    }
}

impl Drop for DismissListeners {
    fn drop(&mut self) {
        if let Some(closure) = &self.keydown {
            let _ = self
                .document
                .remove_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
        if let Some(closure) = &self.mousedown {
            let _ = self.document.remove_event_listener_with_callback_and_bool(
                "mousedown",
                closure.as_ref().unchecked_ref(),
                true,
            );
        }
    }
}
