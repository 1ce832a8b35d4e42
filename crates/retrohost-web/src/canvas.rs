use anyhow::{Context, Result};
use js_sys::{ArrayBuffer, Uint8ClampedArray, WebAssembly};
use retrohost_runtime::engine::WindowDescriptor;
use retrohost_runtime::surface::{Drawable, SurfaceError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, ImageData};

use crate::js::{describe, js_err};

/// Creates a canvas and appends it to `root`.
pub fn create_canvas(document: &Document, root: &HtmlElement) -> Result<HtmlCanvasElement> {
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)
        .context("creating canvas")?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("created element is not a canvas"))?;
    root.append_child(&canvas)
        .map_err(js_err)
        .context("attaching canvas to root")?;
    Ok(canvas)
}

/// Canvas 2D surface that blits straight out of the engine's linear memory.
///
/// Every paint builds a fresh view over `memory.buffer`, since growing the
/// memory detaches the previous buffer.
pub struct CanvasDrawable {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    memory: WebAssembly::Memory,
}

impl CanvasDrawable {
    pub fn new(canvas: HtmlCanvasElement, memory: WebAssembly::Memory) -> Result<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(js_err)
            .context("requesting 2d context")?
            .context("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow::anyhow!("2d context has an unexpected type"))?;
        Ok(Self { canvas, context, memory })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn buffer(&self) -> JsValue {
        self.memory.buffer()
    }
}

fn rejected(e: JsValue) -> SurfaceError {
    SurfaceError::Rejected(describe(&e))
}

impl Drawable for CanvasDrawable {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }

    fn put_image(&mut self, window: &WindowDescriptor) -> Result<(), SurfaceError> {
        let (width, height) = window.dimensions();
        let range = window
            .pixel_range()
            .ok_or(SurfaceError::SizeOverflow { width, height })?;
        let offset = u32::try_from(range.start)
            .map_err(|_| SurfaceError::Rejected(format!("offset {} beyond 4 GiB", range.start)))?;
        let len = u32::try_from(range.len())
            .map_err(|_| SurfaceError::Rejected(format!("length {} beyond 4 GiB", range.len())))?;

        let view = Uint8ClampedArray::new_with_byte_offset_and_length(&self.buffer(), offset, len);
        let image = ImageData::new_with_js_u8_clamped_array_and_sh(&view, width, height).map_err(rejected)?;
        self.context.put_image_data(&image, 0.0, 0.0).map_err(rejected)
    }

    fn memory_len(&self) -> Option<usize> {
        self.buffer()
            .dyn_into::<ArrayBuffer>()
            .ok()
            .map(|b| b.byte_length() as usize)
    }
}
