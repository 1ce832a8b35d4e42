//! Browser backend for the retrohost runtime.
//!
//! Compiled to WebAssembly. Adapts a JS-side game handle to the runtime's
//! [`Engine`](retrohost_runtime::Engine) contract, paints frames onto a
//! `<canvas>` straight out of the engine's linear memory, and wires DOM
//! events to the input translator. JavaScript sees only [`Game`] and the
//! [`RunningGame`] handle returned by [`Game::start`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`api`] | `Game` builder and `RunningGame` handle exported to JS |
//! | [`engine`] | `JsEngine` / `JsEventSink` over the JS game handle |
//! | [`canvas`] | Canvas 2D drawable reading from shared memory |
//! | [`dom`] | DOM event and resize-observer subscriptions |
//! | [`input`] | DOM event to raw input conversion |
//! | [`files`] | Hidden file pickers and `FileReader` plumbing |
//! | [`animation`] | `requestAnimationFrame` loop and performance clock |

pub mod animation;
pub mod api;
pub mod canvas;
pub mod dom;
pub mod engine;
pub mod files;
pub mod input;
mod js;

use std::str::FromStr;
use std::sync::Once;

use wasm_bindgen::prelude::*;

pub use api::{Game, RunningGame};

static INIT: Once = Once::new();

/// Installs the console logger and, with the `console-panic` feature, the
/// panic hook. Only the first call has an effect.
///
/// `level` is a `log` level name (`"debug"`, `"warn"`...); defaults to `info`.
#[wasm_bindgen]
pub fn init_once(level: Option<String>) {
    INIT.call_once(|| {
        #[cfg(feature = "console-panic")]
        console_error_panic_hook::set_once();

        let level = level
            .as_deref()
            .and_then(|l| log::Level::from_str(l).ok())
            .unwrap_or(log::Level::Info);
        if console_log::init_with_level(level).is_ok() {
            log::debug!("console logger installed at {level}");
        }
    });
}
