use crate::input::{FileBinding, KeyContract};

/// How the drawable's size is communicated to the engine.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SurfaceMode {
    /// Follow the observed size of the enclosing container.
    #[default]
    Fullscreen,
    /// Fixed size, reported once at start.
    Windowed { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FpsConfig {
    pub interval_ms: f64,
}

impl Default for FpsConfig {
    fn default() -> Self {
        Self { interval_ms: 1000.0 }
    }
}

/// Host configuration, assembled before the host is built.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub surface: SurfaceMode,
    pub keyboard: bool,
    pub mouse: bool,
    /// Forward `click` events; only for engines implementing `send_click`.
    pub clicks: bool,
    pub key_contract: KeyContract,
    /// Clamp pointer fractions to `[0, 1]`.
    pub clamp_pointer: bool,
    pub file_inputs: Vec<FileBinding>,
    /// FPS logging; `None` disables it.
    pub fps: Option<FpsConfig>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceMode::Fullscreen,
            keyboard: false,
            mouse: false,
            clicks: false,
            key_contract: KeyContract::KeyCode,
            clamp_pointer: true,
            file_inputs: Vec::new(),
            fps: None,
        }
    }
}

/// One listener a backend must register for a configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ListenerKind {
    KeyDown,
    KeyUp,
    /// Root lost focus; held keys are forgotten.
    FocusLost,
    PointerDown,
    PointerUp,
    PointerMove,
    /// Suppresses the context menu over the drawable.
    ContextMenu,
    Click,
    /// File selection on the picker of `file_inputs[binding]`.
    FileChange { binding: usize },
    /// Trigger key opening the picker of `file_inputs[binding]`.
    FileTrigger { binding: usize },
    /// Container size observer (fullscreen only).
    SurfaceResize,
}

impl ListenerKind {
    pub fn label(&self) -> String {
        match self {
            Self::KeyDown => "root:keydown".to_string(),
            Self::KeyUp => "root:keyup".to_string(),
            Self::FocusLost => "root:blur".to_string(),
            Self::PointerDown => "canvas:mousedown".to_string(),
            Self::PointerUp => "canvas:mouseup".to_string(),
            Self::PointerMove => "canvas:mousemove".to_string(),
            Self::ContextMenu => "canvas:contextmenu".to_string(),
            Self::Click => "canvas:click".to_string(),
            Self::FileChange { binding } => format!("file[{binding}]:change"),
            Self::FileTrigger { binding } => format!("file[{binding}]:keydown"),
            Self::SurfaceResize => "root:resize".to_string(),
        }
    }
}

impl HostConfig {
    /// Listeners a backend registers for this configuration, in order.
    pub fn listener_plan(&self) -> Vec<ListenerKind> {
        let mut plan = Vec::new();
        if self.surface == SurfaceMode::Fullscreen {
            plan.push(ListenerKind::SurfaceResize);
        }
        if self.keyboard {
            plan.extend([ListenerKind::KeyDown, ListenerKind::KeyUp, ListenerKind::FocusLost]);
        }
        if self.mouse {
            plan.extend([
                ListenerKind::PointerDown,
                ListenerKind::PointerUp,
                ListenerKind::PointerMove,
                ListenerKind::ContextMenu,
            ]);
        }
        if self.clicks {
            plan.push(ListenerKind::Click);
        }
        for (binding, file) in self.file_inputs.iter().enumerate() {
            if file.trigger_key.is_some() {
                plan.push(ListenerKind::FileTrigger { binding });
            }
            plan.push(ListenerKind::FileChange { binding });
        }
        plan
    }
}

/// Fluent builder for [`HostConfig`].
///
/// Calls are order-independent; a later surface-mode call replaces an
/// earlier one.
///
/// ```rust,ignore
/// let config = HostBuilder::new()
///     .windowed(640, 480)
///     .with_keyboard()
///     .with_mouse()
///     .with_file_input(FileBinding::new("rom").trigger_key("o"))
///     .log_fps()
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct HostBuilder {
    config: HostConfig,
}

impl HostBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fullscreen(mut self) -> Self {
        self.config.surface = SurfaceMode::Fullscreen;
        self
    }

    pub fn windowed(mut self, width: u32, height: u32) -> Self {
        self.config.surface = SurfaceMode::Windowed { width, height };
        self
    }

    pub fn with_keyboard(mut self) -> Self {
        self.config.keyboard = true;
        self
    }

    pub fn with_mouse(mut self) -> Self {
        self.config.mouse = true;
        self
    }

    pub fn with_clicks(mut self) -> Self {
        self.config.clicks = true;
        self
    }

    pub fn key_contract(mut self, contract: KeyContract) -> Self {
        self.config.key_contract = contract;
        self
    }

    pub fn clamp_pointer(mut self, clamp: bool) -> Self {
        self.config.clamp_pointer = clamp;
        self
    }

    pub fn with_file_input(mut self, binding: FileBinding) -> Self {
        self.config.file_inputs.push(binding);
        self
    }

    pub fn log_fps(mut self) -> Self {
        self.config.fps.get_or_insert_with(FpsConfig::default);
        self
    }

    /// Sets the FPS logging interval; enables FPS logging.
    pub fn fps_interval(mut self, interval_ms: f64) -> Self {
        self.config.fps = Some(FpsConfig { interval_ms });
        self
    }

    pub fn build(self) -> HostConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── builder ───────────────────────────────────────────────────────────

    #[test]
    fn default_is_bare_fullscreen() {
        let c = HostBuilder::new().build();
        assert_eq!(c, HostConfig::default());
        assert_eq!(c.surface, SurfaceMode::Fullscreen);
        assert!(c.clamp_pointer);
        assert!(c.fps.is_none());
    }

    #[test]
    fn builder_is_order_independent() {
        let a = HostBuilder::new().with_mouse().windowed(320, 200).with_keyboard().build();
        let b = HostBuilder::new().with_keyboard().with_mouse().windowed(320, 200).build();
        assert_eq!(a, b);
    }

    #[test]
    fn last_surface_mode_wins() {
        let c = HostBuilder::new().windowed(10, 10).fullscreen().build();
        assert_eq!(c.surface, SurfaceMode::Fullscreen);
    }

    #[test]
    fn log_fps_keeps_custom_interval() {
        let c = HostBuilder::new().fps_interval(500.0).log_fps().build();
        assert_eq!(c.fps, Some(FpsConfig { interval_ms: 500.0 }));
        let d = HostBuilder::new().log_fps().build();
        assert_eq!(d.fps, Some(FpsConfig { interval_ms: 1000.0 }));
    }

    // ── listener plan ─────────────────────────────────────────────────────

    #[test]
    fn windowed_without_input_needs_no_listeners() {
        assert!(HostBuilder::new().windowed(1, 1).build().listener_plan().is_empty());
    }

    #[test]
    fn fullscreen_observes_container() {
        assert_eq!(HostBuilder::new().build().listener_plan(), vec![ListenerKind::SurfaceResize]);
    }

    #[test]
    fn full_plan() {
        let c = HostBuilder::new()
            .with_keyboard()
            .with_mouse()
            .with_file_input(FileBinding::new("a").trigger_key("o"))
            .with_file_input(FileBinding::new("b"))
            .build();
        assert_eq!(
            c.listener_plan(),
            vec![
                ListenerKind::SurfaceResize,
                ListenerKind::KeyDown,
                ListenerKind::KeyUp,
                ListenerKind::FocusLost,
                ListenerKind::PointerDown,
                ListenerKind::PointerUp,
                ListenerKind::PointerMove,
                ListenerKind::ContextMenu,
                ListenerKind::FileTrigger { binding: 0 },
                ListenerKind::FileChange { binding: 0 },
                ListenerKind::FileChange { binding: 1 },
            ]
        );
    }

    #[test]
    fn labels_are_unique_within_plan() {
        let c = HostBuilder::new()
            .with_keyboard()
            .with_mouse()
            .with_clicks()
            .with_file_input(FileBinding::new("a").trigger_key("o"))
            .build();
        let labels: Vec<String> = c.listener_plan().iter().map(ListenerKind::label).collect();
        let mut dedup = labels.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), labels.len());
    }
}
