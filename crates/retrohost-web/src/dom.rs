//! DOM subscriptions.
//!
//! Each type here implements [`Subscription`] so that the runtime's listener
//! registry decides when it is attached and guarantees it is detached.

use anyhow::{Context, Result, anyhow};
use js_sys::Array;
use retrohost_runtime::listener::Subscription;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, EventTarget, HtmlElement, ResizeObserver, ResizeObserverEntry, Window};

use crate::input::{container_extent, floor_extent, SizeSource};
use crate::js::describe;

/// Resolves the root from an element id or an element.
pub fn resolve_root(root: &JsValue) -> Result<HtmlElement> {
    if let Some(id) = root.as_string() {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .context("no document")?;
        return document
            .get_element_by_id(&id)
            .with_context(|| format!("no element with id {id:?}"))?
            .dyn_into()
            .map_err(|_| anyhow!("element {id:?} is not an HTML element"));
    }
    root.clone()
        .dyn_into()
        .map_err(|_| anyhow!("root must be an element id or an HTML element"))
}

/// One `addEventListener` registration.
pub struct EventSubscription {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventSubscription {
    pub fn new(target: &EventTarget, event_type: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
        Self {
            target: target.clone(),
            event_type,
            callback: Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>),
        }
    }
}

impl Subscription for EventSubscription {
    fn attach(&mut self) {
        if let Err(e) = self
            .target
            .add_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("adding {} listener failed: {}", self.event_type, describe(&e));
        }
    }

    fn detach(&mut self) {
        // Removal from a detached node is a no-op in the DOM.
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref());
    }
}

/// Observes the content-box size of an element.
pub struct ResizeSubscription {
    observer: ResizeObserver,
    target: Element,
    _callback: Closure<dyn FnMut(Array)>,
}

impl ResizeSubscription {
    /// `on_resize` receives the floored content size of the first entry.
    pub fn new(target: &Element, mut on_resize: impl FnMut(u32, u32) + 'static) -> Result<Self> {
        let callback = Closure::wrap(Box::new(move |entries: Array| {
            let Ok(entry) = entries.get(0).dyn_into::<ResizeObserverEntry>() else {
                return;
            };
            let rect = entry.content_rect();
            on_resize(floor_extent(rect.width()), floor_extent(rect.height()));
        }) as Box<dyn FnMut(Array)>);
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|e| anyhow!(describe(&e)))
            .context("constructing ResizeObserver")?;
        Ok(Self {
            observer,
            target: target.clone(),
            _callback: callback,
        })
    }
}

impl Subscription for ResizeSubscription {
    fn attach(&mut self) {
        self.observer.observe(&self.target);
    }

    fn detach(&mut self) {
        self.observer.disconnect();
    }
}

/// Container size tracking for fullscreen mode.
pub enum SurfaceResize {
    Observer(ResizeSubscription),
    /// Window `resize` events, when `ResizeObserver` is unavailable.
    Window(EventSubscription),
}

impl SurfaceResize {
    /// Reports `root`'s size through a `ResizeObserver`, or the window's
    /// inner size on `resize` events when observers are unavailable.
    pub fn new(window: &Window, root: &HtmlElement, on_resize: impl Fn(u32, u32) + Clone + 'static) -> Self {
        match ResizeSubscription::new(root, on_resize.clone()) {
            Ok(sub) => Self::Observer(sub),
            Err(e) => {
                log::warn!("{e:#}; falling back to window resize events");
                let win = window.clone();
                let root = root.clone();
                Self::Window(EventSubscription::new(window, "resize", move |_| {
                    let (width, height) = measure(SizeSource::Window, &win, &root);
                    on_resize(width, height);
                }))
            }
        }
    }
}

impl SurfaceResize {
    /// Source the reported sizes come from.
    pub fn source(&self) -> SizeSource {
        match self {
            Self::Observer(_) => SizeSource::Root,
            Self::Window(_) => SizeSource::Window,
        }
    }
}

/// Current container size as `source` reports it.
pub fn measure(source: SizeSource, window: &Window, root: &HtmlElement) -> (u32, u32) {
    let inner = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    container_extent(
        source,
        (root.client_width(), root.client_height()),
        (inner(window.inner_width()), inner(window.inner_height())),
    )
}

impl Subscription for SurfaceResize {
    fn attach(&mut self) {
        match self {
            Self::Observer(sub) => sub.attach(),
            Self::Window(sub) => sub.attach(),
        }
    }

    fn detach(&mut self) {
        match self {
            Self::Observer(sub) => sub.detach(),
            Self::Window(sub) => sub.detach(),
        }
    }
}
