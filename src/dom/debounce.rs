//! Trailing-edge debounce on top of `setTimeout`.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Runs its callback once input has been quiet for `delay_ms`.
pub(crate) struct Debouncer {
    delay_ms: i32,
    timer: Option<i32>,
    callback: Closure<dyn FnMut()>,
}

impl Debouncer {
    pub(crate) fn new(delay_ms: u32, callback: Closure<dyn FnMut()>) -> Self {
        Self {
            delay_ms: i32::try_from(delay_ms).unwrap_or(i32::MAX),
            timer: None,
            callback,
        }
    }

    /// Restart the quiet period.
    pub(crate) fn schedule(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(timer_id) = self.timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        self.timer = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.callback.as_ref().unchecked_ref(),
                self.delay_ms,
            )
            .ok();
    }

    /// Forget the pending timer once it has fired.
    pub(crate) fn fired(&mut self) {
        self.timer = None;
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let (Some(window), Some(timer_id)) = (web_sys::window(), self.timer.take()) {
            window.clear_timeout_with_handle(timer_id);
        }
    }
}
