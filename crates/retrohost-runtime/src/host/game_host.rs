use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::{Engine, TickSignal};
use crate::input::InputTranslator;
use crate::listener::{Listener, ListenerRegistry};
use crate::surface::{Drawable, SurfaceManager};
use crate::time::{Clock, FrameClock, FrameStamp};

use super::config::{HostConfig, SurfaceMode};
use super::fps::FpsCounter;

/// Input translator shared between the host and its listeners.
pub type SharedInput<S> = Rc<RefCell<InputTranslator<S>>>;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HostState {
    Idle,
    Running,
    /// Terminal.
    Finished,
}

/// What the frame callback should do next.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Schedule {
    /// Request another frame.
    Next,
    /// Do not reschedule.
    Stop,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct HostStats {
    pub ticks: u64,
    pub paints: u64,
    /// Frames where the engine answered `Continue` and no paint was pending.
    pub skipped_paints: u64,
    pub failed_paints: u64,
    pub resizes_forwarded: u64,
    pub teardowns: u64,
}

/// Drives an [`Engine`] once per frame and paints its image on demand.
///
/// `Idle → Running` on [`start`](Self::start), `Running → Finished` when the
/// engine answers [`TickSignal::Finished`] or on [`finish`](Self::finish).
/// All listeners are active exactly while running.
pub struct GameHost<E: Engine, D: Drawable> {
    config: HostConfig,
    engine: E,
    surface: SurfaceManager<D>,
    input: SharedInput<E::Sink>,
    listeners: ListenerRegistry,
    clock: FrameClock,
    fps: Option<FpsCounter>,

    state: HostState,
    /// Paint on the next frame regardless of the tick signal.
    force_redraw: bool,
    stats: HostStats,
}

impl<E: Engine, D: Drawable> GameHost<E, D> {
    pub fn new(config: HostConfig, engine: E, drawable: D) -> Self {
        let input = InputTranslator::new(engine.event_queue(), config.key_contract, config.clamp_pointer);
        let fps = config.fps.as_ref().map(|f| FpsCounter::new(f.interval_ms));
        Self {
            config,
            engine,
            surface: SurfaceManager::new(drawable),
            input: Rc::new(RefCell::new(input)),
            listeners: ListenerRegistry::new(),
            clock: FrameClock::new(),
            fps,
            state: HostState::Idle,
            force_redraw: true,
            stats: HostStats::default(),
        }
    }

    /// Hands a listener to the host.
    ///
    /// Attached immediately when running, at [`start`](Self::start) when idle,
    /// and dropped unattached once finished.
    pub fn register_listener(&mut self, mut listener: Listener) {
        match self.state {
            HostState::Idle => self.listeners.register(listener),
            HostState::Running => {
                listener.add();
                self.listeners.register(listener);
            }
            HostState::Finished => {
                log::warn!("host finished; dropping listener {}", listener.label());
            }
        }
    }

    /// Activates listeners, reports the initial surface size and arms a
    /// forced first paint.
    ///
    /// `container_size` is the current size of the enclosing container; it is
    /// reported in fullscreen mode, the configured size otherwise.
    pub fn start(&mut self, now_ms: f64, container_size: (u32, u32)) -> Schedule {
        match self.state {
            HostState::Idle => {}
            HostState::Running => {
                log::warn!("start() called on a running host");
                return Schedule::Next;
            }
            HostState::Finished => {
                log::warn!("start() called on a finished host");
                return Schedule::Stop;
            }
        }

        self.clock.reset(now_ms);
        let activated = self.listeners.activate_all();

        let (width, height) = match self.config.surface {
            SurfaceMode::Fullscreen => container_size,
            SurfaceMode::Windowed { width, height } => (width, height),
        };
        self.input.borrow_mut().window_resized(width, height);

        self.force_redraw = true;
        self.state = HostState::Running;
        log::info!("host started: {activated} listeners active, surface {width}x{height}");
        Schedule::Next
    }

    /// Runs one frame: tick, then paint if requested or pending.
    pub fn frame(&mut self, now_ms: f64) -> Schedule {
        if self.state != HostState::Running {
            return Schedule::Stop;
        }

        let time = self.clock.tick(now_ms);
        self.stats.ticks += 1;

        let signal = match self.engine.tick(time.timestamp_ms) {
            Ok(signal) => signal,
            Err(e) => {
                log::error!("{e}; continuing");
                TickSignal::Continue
            }
        };

        match signal {
            TickSignal::Finished => {
                log::debug!("engine finished at frame {}", time.frame_index);
                self.finish();
                return Schedule::Stop;
            }
            TickSignal::RequestRedraw => self.redraw(time.timestamp_ms),
            TickSignal::Continue if self.force_redraw => self.redraw(time.timestamp_ms),
            TickSignal::Continue => self.stats.skipped_paints += 1,
        }

        Schedule::Next
    }

    /// Runs frames back to back, stamped from `clock`, until the host stops
    /// or `max_frames` ran. Returns the number of frames run.
    ///
    /// For hosts without a frame-synchronized callback, e.g. headless runs.
    pub fn run_frames(&mut self, clock: &impl Clock, max_frames: usize) -> usize {
        let mut ran = 0;
        while ran < max_frames {
            ran += 1;
            if self.frame(clock.now_ms()) == Schedule::Stop {
                break;
            }
        }
        ran
    }

    /// Stops the host and releases every listener. Idempotent.
    pub fn finish(&mut self) {
        if self.state == HostState::Finished {
            return;
        }
        let released = self.listeners.release();
        self.state = HostState::Finished;
        self.stats.teardowns += 1;
        log::info!(
            "host finished after {} ticks and {} paints; released {released} listeners",
            self.stats.ticks,
            self.stats.paints
        );
    }

    fn redraw(&mut self, timestamp_ms: f64) {
        let window = match self.engine.window() {
            Ok(window) => window,
            Err(e) => {
                log::error!("{e}; skipping paint");
                self.stats.failed_paints += 1;
                return;
            }
        };

        if let Err(e) = self.surface.present(&window) {
            log::warn!("paint skipped: {e}");
            self.stats.failed_paints += 1;
            return;
        }

        self.force_redraw = false;
        self.stats.paints += 1;

        if let Some(sample) = self.fps.as_mut().and_then(|fps| fps.record(timestamp_ms)) {
            log::info!(
                "{:.0} fps ({:.1}ms per frame)",
                sample.frames_per_second,
                sample.ms_per_frame
            );
        }
    }

    /// Forces a paint on the next frame, e.g. after the drawable was cleared externally.
    pub fn request_redraw(&mut self) {
        self.force_redraw = true;
    }

    pub fn input(&self) -> SharedInput<E::Sink> {
        Rc::clone(&self.input)
    }

    /// Timestamp of the current frame, for stamping input events.
    pub fn frame_stamp(&self) -> FrameStamp {
        self.clock.stamp()
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == HostState::Running
    }

    pub fn stats(&self) -> HostStats {
        HostStats {
            resizes_forwarded: self.input.borrow().resizes_forwarded(),
            ..self.stats
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn active_listeners(&self) -> usize {
        self.listeners.active_count()
    }

    pub fn registered_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn surface(&self) -> &SurfaceManager<D> {
        &self.surface
    }
}
