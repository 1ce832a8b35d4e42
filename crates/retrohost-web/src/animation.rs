//! Frame scheduling on `requestAnimationFrame`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{Context, Result};
use retrohost_runtime::host::Schedule;
use retrohost_runtime::time::Clock;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Performance, Window};

use crate::js::describe;

/// `performance.now()`.
#[derive(Clone)]
pub struct PerformanceClock {
    performance: Performance,
}

impl PerformanceClock {
    pub fn new(window: &Window) -> Result<Self> {
        let performance = window.performance().context("window.performance unavailable")?;
        Ok(Self { performance })
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.performance.now()
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Calls `frame` once per animation frame until it returns
/// [`Schedule::Stop`] or the loop is cancelled.
pub struct AnimationLoop {
    window: Window,
    request_id: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl AnimationLoop {
    pub fn start(window: &Window, mut frame: impl FnMut() -> Schedule + 'static) -> Result<Self> {
        let request_id = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let win = window.clone();
        let id_cell = Rc::clone(&request_id);
        let holder = Rc::clone(&callback);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
            id_cell.set(None);
            if frame() == Schedule::Stop {
                // Breaks the closure's reference to itself.
                holder.borrow_mut().take();
                return;
            }
            let next = holder.borrow();
            let Some(cb) = next.as_ref() else {
                return;
            };
            match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => id_cell.set(Some(id)),
                Err(e) => log::error!("requestAnimationFrame failed: {}", describe(&e)),
            }
        }) as Box<dyn FnMut(f64)>));

        let id = {
            let first = callback.borrow();
            let cb = first.as_ref().context("frame callback missing")?;
            window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(|e| anyhow::anyhow!(describe(&e)))
                .context("requesting first animation frame")?
        };
        request_id.set(Some(id));

        Ok(Self {
            window: window.clone(),
            request_id,
            callback,
        })
    }

    /// Cancels the pending frame, if any. Idempotent.
    pub fn cancel(&self) {
        if let Some(id) = self.request_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        if let Ok(mut cb) = self.callback.try_borrow_mut() {
            cb.take();
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.request_id.get().is_some()
    }
}
