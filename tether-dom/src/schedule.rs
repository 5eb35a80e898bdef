//! Cancellable frame and timeout scheduling.
//!
//! The two-phase protocol has two suspension points: one frame after
//! mount (so refs attach before measuring) and the settle delay
//! before reveal. Both are represented as handles owned by the
//! caller; dropping a handle cancels the underlying
//! `requestAnimationFrame`/`setTimeout`, so closing a floating
//! element can never leave a callback to fire against a stale
//! instance.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use tether_core::{SettleDelay, TetherError, TetherResult};

/// A scheduled callback, cancelled when dropped.
#[derive(Debug)]
pub struct ScheduledTask {
    window: web_sys::Window,
    kind: TaskKind,
    // Keeps the callback alive until it fires or is cancelled.
    _closure: Closure<dyn FnMut()>,
}

#[derive(Debug)]
enum TaskKind {
    Frame(i32),
    Timeout(i32),
}

impl ScheduledTask {
    /// Cancel the task. Harmless if the callback already fired.
    pub fn cancel(&self) {
        match self.kind {
            TaskKind::Frame(id) => {
                let _ = self.window.cancel_animation_frame(id);
            }
            TaskKind::Timeout(id) => {
                self.window.clear_timeout_with_handle(id);
            }
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Schedule `callback` after the given settle delay.
///
/// `NextFrame` maps to `requestAnimationFrame`, `Millis` to
/// `setTimeout`.
///
/// # Errors
///
/// Returns [`TetherError::PlatformUnavailable`] outside a browser
/// context or when the browser rejects the scheduling call.
pub fn schedule(delay: SettleDelay, callback: impl FnMut() + 'static) -> TetherResult<ScheduledTask> {
    let window = web_sys::window()
        .ok_or_else(|| TetherError::PlatformUnavailable("no window object".to_owned()))?;
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);

    let kind = match delay {
        SettleDelay::NextFrame => window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map(TaskKind::Frame),
        SettleDelay::Millis(ms) => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let ms = ms.min(i32::MAX as u64) as i32;
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    ms,
                )
                .map(TaskKind::Timeout)
        }
    }
    .map_err(|e| TetherError::PlatformUnavailable(format!("scheduling rejected: {e:?}")))?;

    Ok(ScheduledTask {
        window,
        kind,
        _closure: closure,
    })
}

/// Schedule `callback` on the next rendering frame.
///
/// # Errors
///
/// Returns [`TetherError::PlatformUnavailable`] outside a browser
/// context.
pub fn next_frame(callback: impl FnMut() + 'static) -> TetherResult<ScheduledTask> {
    schedule(SettleDelay::NextFrame, callback)
}
