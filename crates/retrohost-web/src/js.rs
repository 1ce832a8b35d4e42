use wasm_bindgen::{JsCast, JsValue};

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

/// Converts a setup failure into a JS `Error` carrying the whole context chain.
pub(crate) fn to_js_error(err: anyhow::Error) -> JsValue {
    js_sys::Error::new(&format!("{err:#}")).into()
}

/// Lifts a thrown JS value into `anyhow`.
pub(crate) fn js_err(value: JsValue) -> anyhow::Error {
    anyhow::anyhow!(describe(&value))
}
