//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生 `setTimeout` 实现核心 crate 的 `TimerScheduler`。

use std::time::Duration;
use streamflow::debounce::TimerScheduler;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// 一次性定时器
///
/// 封装 `setTimeout` API。当 `Timeout` 被 drop 时，自动清除定时器。
/// 不能在自身回调执行期间被 drop。
pub struct Timeout {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(millis: u32, callback: Box<dyn FnOnce()>) -> Option<Self> {
        let closure = Closure::once(callback);
        let window = web_sys::window()?;

        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                i32::try_from(millis).unwrap_or(i32::MAX),
            )
            .map_err(|e| log::error!("设置定时器失败: {:?}", e))
            .ok()?;

        Some(Self {
            handle,
            _closure: closure,
        })
    }

    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// 基于 `setTimeout` 的调度器
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl TimerScheduler for BrowserScheduler {
    type Handle = Option<Timeout>;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, callback)
    }

    fn cancel(&self, handle: Self::Handle) {
        if let Some(timeout) = handle {
            timeout.cancel();
        }
    }
}
