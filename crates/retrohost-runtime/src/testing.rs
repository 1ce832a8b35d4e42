//! Scripted fakes shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::engine::{Engine, EngineError, EventSink, KeyInfo, TickSignal, WindowDescriptor};
use crate::listener::Subscription;
use crate::logging::{init_logging, LoggingConfig};
use crate::surface::LinearMemory;
use crate::time::Clock;

#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    WindowResize(u32, u32),
    MouseButton { ts: f64, x: f32, y: f32, button: u8, is_up: bool },
    MouseMove { ts: f64, x: f32, y: f32 },
    KeyDown(KeyInfo, f64),
    KeyUp(KeyInfo, f64),
    FileRead { field_name: String, file_name: String, len: usize },
    Click { x: f32, y: f32 },
}

/// Event sink recording every call. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink(Rc<RefCell<Vec<SinkCall>>>);

impl RecordingSink {
    pub fn calls(&self) -> Vec<SinkCall> {
        self.0.borrow().clone()
    }

    pub fn resizes(&self) -> Vec<(u32, u32)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                SinkCall::WindowResize(w, h) => Some((*w, *h)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, call: SinkCall) {
        self.0.borrow_mut().push(call);
    }
}

impl EventSink for RecordingSink {
    fn send_window_resize(&mut self, width: u32, height: u32) {
        self.push(SinkCall::WindowResize(width, height));
    }

    fn send_mouse_button(&mut self, ts: f64, x: f32, y: f32, button: u8, is_up: bool) {
        self.push(SinkCall::MouseButton { ts, x, y, button, is_up });
    }

    fn send_mouse_move(&mut self, ts: f64, x: f32, y: f32) {
        self.push(SinkCall::MouseMove { ts, x, y });
    }

    fn send_key_down(&mut self, key: &KeyInfo, ts: f64) {
        self.push(SinkCall::KeyDown(key.clone(), ts));
    }

    fn send_key_up(&mut self, key: &KeyInfo, ts: f64) {
        self.push(SinkCall::KeyUp(key.clone(), ts));
    }

    fn send_file_read(&mut self, field_name: &str, file_name: &str, bytes: &[u8]) {
        self.push(SinkCall::FileRead {
            field_name: field_name.to_string(),
            file_name: file_name.to_string(),
            len: bytes.len(),
        });
    }

    fn send_click(&mut self, x: f32, y: f32) {
        self.push(SinkCall::Click { x, y });
    }
}

/// Attach/detach counters of a [`CountingSubscription`].
#[derive(Debug, Clone, Default)]
pub struct SubscriptionCounts {
    attached: Rc<Cell<u32>>,
    detached: Rc<Cell<u32>>,
}

impl SubscriptionCounts {
    pub fn attached(&self) -> u32 {
        self.attached.get()
    }

    pub fn detached(&self) -> u32 {
        self.detached.get()
    }

    /// Attachments not yet detached.
    pub fn live(&self) -> u32 {
        self.attached() - self.detached()
    }
}

pub struct CountingSubscription {
    counts: SubscriptionCounts,
}

impl CountingSubscription {
    pub fn new() -> (Self, SubscriptionCounts) {
        let counts = SubscriptionCounts::default();
        (Self { counts: counts.clone() }, counts)
    }
}

impl Subscription for CountingSubscription {
    fn attach(&mut self) {
        self.counts.attached.set(self.counts.attached.get() + 1);
    }

    fn detach(&mut self) {
        self.counts.detached.set(self.counts.detached.get() + 1);
    }
}

/// Engine replaying a fixed list of tick results, then `Continue` forever.
pub struct ScriptedEngine {
    script: VecDeque<Result<TickSignal, EngineError>>,
    pub window: Result<WindowDescriptor, EngineError>,
    pub memory: LinearMemory,
    pub sink: RecordingSink,
    /// Timestamps passed to `tick`, in order.
    pub ticks: Vec<f64>,
    pub window_reads: Cell<u32>,
}

impl ScriptedEngine {
    pub fn new(signals: &[TickSignal]) -> Self {
        Self::with_results(signals.iter().copied().map(Ok).collect())
    }

    pub fn with_results(script: Vec<Result<TickSignal, EngineError>>) -> Self {
        init_logging(LoggingConfig::for_tests());
        let window = WindowDescriptor::packed(4, 3, 16);
        let memory = LinearMemory::new(16 + 4 * 3 * 4);
        let pattern: Vec<u8> = (0..48u8).collect();
        memory.write(16, &pattern);
        Self {
            script: script.into(),
            window: Ok(window),
            memory,
            sink: RecordingSink::default(),
            ticks: Vec::new(),
            window_reads: Cell::new(0),
        }
    }
}

impl Engine for ScriptedEngine {
    type Sink = RecordingSink;

    fn tick(&mut self, timestamp_ms: f64) -> Result<TickSignal, EngineError> {
        self.ticks.push(timestamp_ms);
        self.script.pop_front().unwrap_or(Ok(TickSignal::Continue))
    }

    fn window(&self) -> Result<WindowDescriptor, EngineError> {
        self.window_reads.set(self.window_reads.get() + 1);
        self.window.clone()
    }

    fn event_queue(&self) -> RecordingSink {
        self.sink.clone()
    }
}

/// Clock advancing by a fixed step on every read, starting one step in.
pub struct StepClock {
    step_ms: f64,
    now: Cell<f64>,
}

impl StepClock {
    pub fn new(step_ms: f64) -> Self {
        Self { step_ms, now: Cell::new(0.0) }
    }
}

impl Clock for StepClock {
    fn now_ms(&self) -> f64 {
        self.now.set(self.now.get() + self.step_ms);
        self.now.get()
    }
}
