//! JS game handle adapter.
//!
//! The handle is duck-typed: any object with `tick(ts)`, `window()` and
//! `event_queue()` methods works. `window()` returns an object with
//! `image_width()`, `image_height()`, `image_data_ptr()` and
//! `image_data_size()`.

use js_sys::{Array, Function, Reflect, Uint8Array};
use retrohost_runtime::engine::{Engine, EngineError, EventSink, KeyInfo, TickSignal, WindowDescriptor};
use wasm_bindgen::{JsCast, JsValue};

use crate::js::describe;

fn invoke(target: &JsValue, method: &'static str, args: &Array) -> Result<JsValue, EngineError> {
    let func = Reflect::get(target, &JsValue::from_str(method))
        .map_err(|e| EngineError::call_failed(method, describe(&e)))?;
    let func: Function = func
        .dyn_into()
        .map_err(|_| EngineError::malformed(method, "not a function"))?;
    func.apply(target, args)
        .map_err(|e| EngineError::call_failed(method, describe(&e)))
}

fn number(target: &JsValue, method: &'static str) -> Result<f64, EngineError> {
    invoke(target, method, &Array::new())?
        .as_f64()
        .ok_or_else(|| EngineError::malformed(method, "expected a number"))
}

/// Validates the four numbers of a JS window object.
pub fn descriptor_from_numbers(
    width: f64,
    height: f64,
    data_ptr: f64,
    data_size: f64,
) -> Result<WindowDescriptor, EngineError> {
    fn whole(method: &'static str, v: f64, max: f64) -> Result<f64, EngineError> {
        if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= max {
            Ok(v)
        } else {
            Err(EngineError::malformed(method, format!("{v} is not a valid size")))
        }
    }

    let max_len = usize::MAX as f64;
    Ok(WindowDescriptor {
        image_width: whole("image_width", width, f64::from(u32::MAX))? as u32,
        image_height: whole("image_height", height, f64::from(u32::MAX))? as u32,
        image_data_offset: whole("image_data_ptr", data_ptr, max_len)? as usize,
        image_data_byte_length: whole("image_data_size", data_size, max_len)? as usize,
    })
}

/// A JS game handle driven through reflection.
pub struct JsEngine {
    handle: JsValue,
    queue: JsEventSink,
}

impl JsEngine {
    /// Wraps `handle` and fetches its event queue once.
    pub fn new(handle: JsValue) -> Result<Self, EngineError> {
        let queue = invoke(&handle, "event_queue", &Array::new())?;
        if queue.is_undefined() || queue.is_null() {
            return Err(EngineError::malformed("event_queue", "returned nothing"));
        }
        Ok(Self { handle, queue: JsEventSink { queue } })
    }
}

impl Engine for JsEngine {
    type Sink = JsEventSink;

    fn tick(&mut self, timestamp_ms: f64) -> Result<TickSignal, EngineError> {
        let args = Array::of1(&JsValue::from_f64(timestamp_ms));
        let signal = invoke(&self.handle, "tick", &args)?;
        signal
            .as_string()
            .map(|s| TickSignal::from_wire(&s))
            .ok_or_else(|| EngineError::malformed("tick", "expected a string"))
    }

    fn window(&self) -> Result<WindowDescriptor, EngineError> {
        let window = invoke(&self.handle, "window", &Array::new())?;
        descriptor_from_numbers(
            number(&window, "image_width")?,
            number(&window, "image_height")?,
            number(&window, "image_data_ptr")?,
            number(&window, "image_data_size")?,
        )
    }

    fn event_queue(&self) -> JsEventSink {
        self.queue.clone()
    }
}

/// The JS event queue. Failed sends are logged and dropped.
#[derive(Clone)]
pub struct JsEventSink {
    queue: JsValue,
}

impl JsEventSink {
    fn send(&self, method: &'static str, args: &[JsValue]) {
        let args: Array = args.iter().collect();
        if let Err(e) = invoke(&self.queue, method, &args) {
            log::warn!("{e}");
        }
    }
}

fn key_args(key: &KeyInfo, timestamp_ms: f64) -> Vec<JsValue> {
    let ts = JsValue::from_f64(timestamp_ms);
    match key {
        KeyInfo::Code(code) => vec![JsValue::from(*code), ts],
        KeyInfo::Named { key, modifiers } => vec![
            JsValue::from_str(key),
            JsValue::from_bool(modifiers.alt),
            JsValue::from_bool(modifiers.ctrl),
            JsValue::from_bool(modifiers.shift),
            JsValue::from_bool(modifiers.meta),
            ts,
        ],
    }
}

impl EventSink for JsEventSink {
    fn send_window_resize(&mut self, width: u32, height: u32) {
        self.send("send_window_resize", &[JsValue::from(width), JsValue::from(height)]);
    }

    fn send_mouse_button(&mut self, timestamp_ms: f64, x: f32, y: f32, button: u8, is_up: bool) {
        self.send(
            "send_mouse_button",
            &[
                JsValue::from_f64(timestamp_ms),
                JsValue::from_f64(f64::from(x)),
                JsValue::from_f64(f64::from(y)),
                JsValue::from(button),
                JsValue::from_bool(is_up),
            ],
        );
    }

    fn send_mouse_move(&mut self, timestamp_ms: f64, x: f32, y: f32) {
        self.send(
            "send_mouse_move",
            &[
                JsValue::from_f64(timestamp_ms),
                JsValue::from_f64(f64::from(x)),
                JsValue::from_f64(f64::from(y)),
            ],
        );
    }

    fn send_key_down(&mut self, key: &KeyInfo, timestamp_ms: f64) {
        self.send("send_key_down", &key_args(key, timestamp_ms));
    }

    fn send_key_up(&mut self, key: &KeyInfo, timestamp_ms: f64) {
        self.send("send_key_up", &key_args(key, timestamp_ms));
    }

    fn send_file_read(&mut self, field_name: &str, file_name: &str, bytes: &[u8]) {
        self.send(
            "send_file_read",
            &[
                JsValue::from_str(field_name),
                JsValue::from_str(file_name),
                Uint8Array::from(bytes).into(),
            ],
        );
    }

    fn send_click(&mut self, x: f32, y: f32) {
        self.send(
            "send_click",
            &[JsValue::from_f64(f64::from(x)), JsValue::from_f64(f64::from(y))],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_accepts_whole_numbers() {
        let d = descriptor_from_numbers(320.0, 200.0, 1024.0, 256_000.0).unwrap();
        assert_eq!(d, WindowDescriptor::packed(320, 200, 1024));
    }

    #[test]
    fn descriptor_rejects_fractional_width() {
        let err = descriptor_from_numbers(320.5, 200.0, 0.0, 0.0).unwrap_err();
        assert_eq!(err.method(), "image_width");
    }

    #[test]
    fn descriptor_rejects_negative_pointer() {
        let err = descriptor_from_numbers(1.0, 1.0, -4.0, 4.0).unwrap_err();
        assert_eq!(err.method(), "image_data_ptr");
    }

    #[test]
    fn descriptor_rejects_nan_size() {
        let err = descriptor_from_numbers(1.0, 1.0, 0.0, f64::NAN).unwrap_err();
        assert_eq!(err.method(), "image_data_size");
    }
}
