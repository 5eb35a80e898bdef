//! DOM anchor measurement.
//!
//! Anchors are `web_sys::Element`s measured with
//! `getBoundingClientRect`; the shared coordinate space is the
//! viewport, matching `position: fixed` rendering of the floating
//! content. Safe-area insets are zero on web.

use tether_core::{AnchorProvider, AnchorRect, TetherError, TetherResult, Viewport};

/// Measures DOM elements and the window viewport.
#[derive(Debug, Clone)]
pub struct DomAnchorProvider {
    window: web_sys::Window,
}

impl DomAnchorProvider {
    /// Create a provider bound to the current window.
    ///
    /// # Errors
    ///
    /// Returns [`TetherError::PlatformUnavailable`] outside a browser
    /// context.
    pub fn new() -> TetherResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| TetherError::PlatformUnavailable("no window object".to_owned()))?;
        Ok(Self { window })
    }

    #[allow(clippy::cast_possible_truncation)] // CSS pixels fit f32
    fn window_dimension(
        value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>,
    ) -> TetherResult<f32> {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v as f32)
            .ok_or_else(|| {
                TetherError::PlatformUnavailable("window dimensions unreadable".to_owned())
            })
    }
}

impl AnchorProvider for DomAnchorProvider {
    type Anchor = web_sys::Element;

    #[allow(clippy::cast_possible_truncation)] // CSS pixels fit f32
    fn measure(&self, anchor: &Self::Anchor) -> TetherResult<AnchorRect> {
        if !anchor.is_connected() {
            return Err(TetherError::AnchorUnmeasurable(
                "element is detached from the document".to_owned(),
            ));
        }
        let rect = anchor.get_bounding_client_rect();
        Ok(AnchorRect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }

    fn viewport(&self) -> TetherResult<Viewport> {
        let width = Self::window_dimension(self.window.inner_width())?;
        let height = Self::window_dimension(self.window.inner_height())?;
        Ok(Viewport::new(width, height))
    }
}
