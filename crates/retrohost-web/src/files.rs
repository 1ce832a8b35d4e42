//! Hidden file pickers.

use anyhow::{Context, Result, anyhow};
use js_sys::Uint8Array;
use retrohost_runtime::host::SharedInput;
use retrohost_runtime::input::FileBinding;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, File, FileReader, HtmlElement, HtmlInputElement, ProgressEvent};

use crate::engine::JsEventSink;
use crate::js::{describe, js_err};

/// Appends a hidden `<input type="file">` for `binding` to `root`.
pub fn create_picker(document: &Document, root: &HtmlElement, binding: &FileBinding) -> Result<HtmlInputElement> {
    let picker: HtmlInputElement = document
        .create_element("input")
        .map_err(js_err)
        .context("creating file input")?
        .dyn_into()
        .map_err(|_| anyhow!("created element is not an input"))?;
    picker.set_type("file");
    picker.set_hidden(true);
    if let Some(accept) = &binding.accept {
        picker.set_accept(accept);
    }
    root.append_child(&picker)
        .map_err(js_err)
        .with_context(|| format!("attaching file input {:?}", binding.field_name))?;
    Ok(picker)
}

/// Reads every file currently selected in `picker`.
pub fn read_selection(picker: &HtmlInputElement, binding: &FileBinding, input: &SharedInput<JsEventSink>) {
    let Some(files) = picker.files() else {
        return;
    };
    for i in 0..files.length() {
        if let Some(file) = files.get(i) {
            read_file(file, binding.clone(), input.clone());
        }
    }
}

fn read_file(file: File, binding: FileBinding, input: SharedInput<JsEventSink>) {
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            log::error!("FileReader unavailable: {}", describe(&e));
            return;
        }
    };

    let name = file.name();
    let loaded = reader.clone();
    let on_load_end = Closure::once_into_js(move |_: ProgressEvent| {
        let result = match loaded.result() {
            Ok(result) if !result.is_null() => result,
            _ => {
                log::warn!("reading {name:?} failed");
                return;
            }
        };
        let bytes = Uint8Array::new(&result).to_vec();
        let outcome = input.borrow_mut().file_loaded(&binding, &name, &bytes);
        if let Err(rejected) = outcome {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&rejected.user_message());
            }
        }
    });
    reader.set_onloadend(Some(on_load_end.unchecked_ref()));

    if let Err(e) = reader.read_as_array_buffer(&file) {
        log::error!("reading {:?}: {}", file.name(), describe(&e));
    }
}
