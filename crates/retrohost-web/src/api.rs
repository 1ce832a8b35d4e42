//! JS-facing API.
//!
//! ```js
//! init_once();
//! const running = new Game(handle, wasm.memory, "screen")
//!     .fullscreen()
//!     .withKeyboard()
//!     .withMouse()
//!     .withFileInput("rom", "o", 4, ".ch8")
//!     .logFps()
//!     .start();
//! // later
//! running.finish();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{Context, Result};
use js_sys::WebAssembly;
use retrohost_runtime::host::{GameHost, HostBuilder, ListenerKind, Schedule, SharedInput};
use retrohost_runtime::input::{FileBinding, KeyContract, KeyState, DEFAULT_MAX_SIZE_MB};
use retrohost_runtime::listener::Listener;
use retrohost_runtime::time::{Clock, FrameStamp};
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, HtmlElement, HtmlInputElement, KeyboardEvent, MouseEvent, Window};

use crate::animation::{AnimationLoop, PerformanceClock};
use crate::canvas::{create_canvas, CanvasDrawable};
use crate::dom::{measure, resolve_root, EventSubscription, SurfaceResize};
use crate::engine::{JsEngine, JsEventSink};
use crate::files::{create_picker, read_selection};
use crate::input::{pointer_action, pointer_sample, raw_key, SizeSource};
use crate::js::to_js_error;

type WebHost = GameHost<JsEngine, CanvasDrawable>;

/// Consuming builder for a running game.
#[wasm_bindgen]
pub struct Game {
    handle: JsValue,
    memory: WebAssembly::Memory,
    root: HtmlElement,
    canvas: HtmlCanvasElement,
    builder: HostBuilder,
}

#[wasm_bindgen]
impl Game {
    /// `root` is an element id or an element; the canvas is appended to it.
    #[wasm_bindgen(constructor)]
    pub fn new(game_handle: JsValue, memory: WebAssembly::Memory, root: JsValue) -> Result<Game, JsValue> {
        Self::create(game_handle, memory, &root).map_err(to_js_error)
    }

    pub fn fullscreen(mut self) -> Game {
        self.builder = self.builder.fullscreen();
        self
    }

    pub fn windowed(mut self, width: u32, height: u32) -> Game {
        self.builder = self.builder.windowed(width, height);
        self
    }

    #[wasm_bindgen(js_name = withKeyboard)]
    pub fn with_keyboard(mut self) -> Game {
        self.builder = self.builder.with_keyboard();
        self
    }

    /// Sends `(key, alt, ctrl, shift, meta, ts)` instead of `(keyCode, ts)`.
    #[wasm_bindgen(js_name = withKeyModifiers)]
    pub fn with_key_modifiers(mut self) -> Game {
        self.builder = self.builder.key_contract(KeyContract::KeyWithModifiers);
        self
    }

    #[wasm_bindgen(js_name = withMouse)]
    pub fn with_mouse(mut self) -> Game {
        self.builder = self.builder.with_mouse();
        self
    }

    #[wasm_bindgen(js_name = withClicks)]
    pub fn with_clicks(mut self) -> Game {
        self.builder = self.builder.with_clicks();
        self
    }

    /// Forwards pointer fractions outside `[0, 1]` as they are.
    #[wasm_bindgen(js_name = unclampedPointer)]
    pub fn unclamped_pointer(mut self) -> Game {
        self.builder = self.builder.clamp_pointer(false);
        self
    }

    #[wasm_bindgen(js_name = withFileInput)]
    pub fn with_file_input(
        mut self,
        name: String,
        bind_key: Option<String>,
        max_size_mb: Option<u32>,
        accept: Option<String>,
    ) -> Game {
        let mut binding = FileBinding::new(name).max_size_mb(max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB));
        if let Some(key) = bind_key {
            binding = binding.trigger_key(key);
        }
        if let Some(accept) = accept {
            binding = binding.accept(accept);
        }
        self.builder = self.builder.with_file_input(binding);
        self
    }

    #[wasm_bindgen(js_name = logFps)]
    pub fn log_fps(mut self) -> Game {
        self.builder = self.builder.log_fps();
        self
    }

    /// Attaches listeners and starts the frame loop.
    pub fn start(self) -> Result<RunningGame, JsValue> {
        self.launch().map_err(to_js_error)
    }
}

impl Game {
    fn create(handle: JsValue, memory: WebAssembly::Memory, root: &JsValue) -> Result<Self> {
        let root = resolve_root(root)?;
        root.set_tab_index(1);
        let document = web_sys::window()
            .and_then(|w| w.document())
            .context("no document")?;
        let canvas = create_canvas(&document, &root)?;
        Ok(Self {
            handle,
            memory,
            root,
            canvas,
            builder: HostBuilder::new(),
        })
    }

    fn launch(self) -> Result<RunningGame> {
        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;
        let config = self.builder.build();

        let engine = JsEngine::new(self.handle).context("reading the game handle")?;
        let drawable = CanvasDrawable::new(self.canvas.clone(), self.memory)?;
        let mut host = GameHost::new(config, engine, drawable);

        let pickers = host
            .config()
            .file_inputs
            .iter()
            .map(|binding| create_picker(&document, &self.root, binding))
            .collect::<Result<Vec<_>>>()?;

        let wiring = Wiring {
            window: window.clone(),
            root: self.root.clone(),
            canvas: self.canvas,
            input: host.input(),
            stamp: host.frame_stamp(),
            bindings: host.config().file_inputs.clone(),
            pickers,
            size_source: Cell::new(SizeSource::Root),
        };
        for kind in host.config().listener_plan() {
            host.register_listener(wiring.listener(&kind));
        }

        let clock = PerformanceClock::new(&window)?;
        let container = measure(wiring.size_source.get(), &window, &self.root);
        host.start(clock.now_ms(), container);

        let host = Rc::new(RefCell::new(host));
        let stop_requested = Rc::new(Cell::new(false));

        let frame_host = Rc::clone(&host);
        let frame_stop = Rc::clone(&stop_requested);
        let frames = AnimationLoop::start(&window, move || {
            let Ok(mut host) = frame_host.try_borrow_mut() else {
                log::warn!("frame skipped: host busy");
                return Schedule::Next;
            };
            if frame_stop.get() {
                host.finish();
                return Schedule::Stop;
            }
            let schedule = host.frame(clock.now_ms());
            if frame_stop.get() {
                host.finish();
                return Schedule::Stop;
            }
            schedule
        })?;

        Ok(RunningGame {
            host,
            frames,
            stop_requested,
        })
    }
}

/// Everything a DOM handler needs; handlers never touch the host itself.
struct Wiring {
    window: Window,
    root: HtmlElement,
    canvas: HtmlCanvasElement,
    input: SharedInput<JsEventSink>,
    stamp: FrameStamp,
    bindings: Vec<FileBinding>,
    pickers: Vec<HtmlInputElement>,
    /// Set by the surface-resize listener; the start size must match it.
    size_source: Cell<SizeSource>,
}

impl Wiring {
    fn listener(&self, kind: &ListenerKind) -> Listener {
        let root: &EventTarget = self.root.as_ref();
        let canvas: &EventTarget = self.canvas.as_ref();
        let input = self.input.clone();
        let stamp = self.stamp.clone();

        match kind {
            ListenerKind::KeyDown | ListenerKind::KeyUp => {
                let (event_type, state) = if *kind == ListenerKind::KeyDown {
                    ("keydown", KeyState::Pressed)
                } else {
                    ("keyup", KeyState::Released)
                };
                let sub = EventSubscription::new(root, event_type, move |e: Event| {
                    let Some(e) = e.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    input.borrow_mut().key(stamp.get(), state, &raw_key(e));
                    e.prevent_default();
                });
                Listener::new(kind.label(), sub)
            }
            ListenerKind::FocusLost => {
                let sub = EventSubscription::new(root, "blur", move |_| input.borrow_mut().focus_lost());
                Listener::new(kind.label(), sub)
            }
            ListenerKind::PointerDown | ListenerKind::PointerUp | ListenerKind::PointerMove => {
                let event_type = match kind {
                    ListenerKind::PointerDown => "mousedown",
                    ListenerKind::PointerUp => "mouseup",
                    _ => "mousemove",
                };
                let target = self.canvas.clone();
                let sub = EventSubscription::new(canvas, event_type, move |e: Event| {
                    let Some(e) = e.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    let Some(action) = pointer_action(event_type, e.button()) else {
                        return;
                    };
                    input.borrow_mut().pointer(stamp.get(), action, pointer_sample(e, &target));
                });
                Listener::new(kind.label(), sub)
            }
            ListenerKind::ContextMenu => {
                let sub = EventSubscription::new(canvas, "contextmenu", |e: Event| e.prevent_default());
                Listener::new(kind.label(), sub)
            }
            ListenerKind::Click => {
                let target = self.canvas.clone();
                let sub = EventSubscription::new(canvas, "click", move |e: Event| {
                    if let Some(e) = e.dyn_ref::<MouseEvent>() {
                        input.borrow_mut().click(pointer_sample(e, &target));
                    }
                });
                Listener::new(kind.label(), sub)
            }
            ListenerKind::FileTrigger { binding } => {
                let picker = self.pickers[*binding].clone();
                let file = self.bindings[*binding].clone();
                let sub = EventSubscription::new(root, "keydown", move |e: Event| {
                    if let Some(e) = e.dyn_ref::<KeyboardEvent>() {
                        if file.is_trigger(&e.key()) {
                            picker.click();
                        }
                    }
                });
                Listener::new(kind.label(), sub)
            }
            ListenerKind::FileChange { binding } => {
                let picker = self.pickers[*binding].clone();
                let file = self.bindings[*binding].clone();
                let target: &EventTarget = picker.as_ref();
                let sub = EventSubscription::new(target, "change", {
                    let picker = picker.clone();
                    move |_| read_selection(&picker, &file, &input)
                });
                Listener::new(kind.label(), sub)
            }
            ListenerKind::SurfaceResize => {
                let sub = SurfaceResize::new(&self.window, &self.root, move |width, height| {
                    input.borrow_mut().window_resized(width, height);
                });
                self.size_source.set(sub.source());
                Listener::new(kind.label(), sub)
            }
        }
    }
}

/// Handle to a started game. Dropping it finishes the game.
#[wasm_bindgen]
pub struct RunningGame {
    host: Rc<RefCell<WebHost>>,
    frames: AnimationLoop,
    stop_requested: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl RunningGame {
    /// Stops the loop and removes every listener. Idempotent.
    pub fn finish(&self) {
        self.stop_requested.set(true);
        self.frames.cancel();
        match self.host.try_borrow_mut() {
            Ok(mut host) => host.finish(),
            // Called from inside a frame; that frame finishes the host.
            Err(_) => log::debug!("finish deferred to the running frame"),
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.host.try_borrow().map_or(true, |h| h.is_running())
    }

    /// Forces a paint on the next frame.
    #[wasm_bindgen(js_name = requestRedraw)]
    pub fn request_redraw(&self) {
        if let Ok(mut host) = self.host.try_borrow_mut() {
            host.request_redraw();
        }
    }

    /// Frames ticked so far.
    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> f64 {
        self.host.try_borrow().map_or(0.0, |h| h.stats().ticks as f64)
    }

    /// Frames painted so far.
    #[wasm_bindgen(getter)]
    pub fn paints(&self) -> f64 {
        self.host.try_borrow().map_or(0.0, |h| h.stats().paints as f64)
    }
}

impl Drop for RunningGame {
    fn drop(&mut self) {
        self.finish();
    }
}
