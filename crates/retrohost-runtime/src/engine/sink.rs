use crate::input::Modifiers;

/// Keyboard payload in the shape the engine expects.
///
/// Engines speak one of two contracts: a legacy numeric key code, or the key
/// string plus modifier flags. A host uses exactly one, chosen by
/// [`KeyContract`](crate::input::KeyContract).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInfo {
    Code(u32),
    Named { key: String, modifiers: Modifiers },
}

/// Engine-owned intake for normalized events.
///
/// Calls are synchronous; whatever queuing happens behind them belongs to the
/// engine. Pointer coordinates are fractions of the drawable size.
pub trait EventSink {
    fn send_window_resize(&mut self, width: u32, height: u32);

    fn send_mouse_button(&mut self, timestamp_ms: f64, x: f32, y: f32, button: u8, is_up: bool);

    fn send_mouse_move(&mut self, timestamp_ms: f64, x: f32, y: f32);

    fn send_key_down(&mut self, key: &KeyInfo, timestamp_ms: f64);

    fn send_key_up(&mut self, key: &KeyInfo, timestamp_ms: f64);

    fn send_file_read(&mut self, field_name: &str, file_name: &str, bytes: &[u8]);

    /// Optional; engines without click support ignore it.
    fn send_click(&mut self, x: f32, y: f32) {
        let _ = (x, y);
    }
}
