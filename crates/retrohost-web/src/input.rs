//! DOM event to raw input conversion.

use retrohost_runtime::input::{Modifiers, MouseButton, PointerAction, PointerSample, RawKey};
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

/// Maps a mouse event type and DOM button id to a pointer action.
///
/// Buttons outside `0..=4` yield `None`; moves ignore the button.
pub fn pointer_action(event_type: &str, button: i16) -> Option<PointerAction> {
    match event_type {
        "mousedown" => MouseButton::from_dom(button).map(PointerAction::Down),
        "mouseup" => MouseButton::from_dom(button).map(PointerAction::Up),
        "mousemove" => Some(PointerAction::Move),
        _ => None,
    }
}

/// Pointer position relative to the canvas, against its pixel size.
pub fn pointer_sample(event: &MouseEvent, canvas: &HtmlCanvasElement) -> PointerSample {
    PointerSample {
        local_x: f64::from(event.offset_x()),
        local_y: f64::from(event.offset_y()),
        surface_width: canvas.width(),
        surface_height: canvas.height(),
    }
}

pub fn raw_key(event: &KeyboardEvent) -> RawKey {
    RawKey {
        key_code: event.key_code(),
        key: event.key(),
        code: event.code(),
        modifiers: Modifiers {
            shift: event.shift_key(),
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
            meta: event.meta_key(),
        },
        repeat: event.repeat(),
    }
}

/// Where fullscreen mode reads the container size from.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SizeSource {
    /// The root's client box, as a `ResizeObserver` reports it.
    #[default]
    Root,
    /// The window's inner size, for the `resize` event fallback.
    Window,
}

/// Picks the container size for `source`.
///
/// The size reported at start must come from the same source as later
/// resize notifications, or the first notification looks like a change.
pub fn container_extent(source: SizeSource, root_client: (i32, i32), window_inner: (f64, f64)) -> (u32, u32) {
    match source {
        SizeSource::Root => (
            floor_extent(f64::from(root_client.0)),
            floor_extent(f64::from(root_client.1)),
        ),
        SizeSource::Window => (floor_extent(window_inner.0), floor_extent(window_inner.1)),
    }
}

/// Floors a CSS pixel extent; negative or non-finite values become 0.
pub fn floor_extent(v: f64) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    v.floor().min(f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── pointer_action ────────────────────────────────────────────────────

    #[test]
    fn primary_down_and_up() {
        assert_eq!(pointer_action("mousedown", 0), Some(PointerAction::Down(MouseButton::Primary)));
        assert_eq!(pointer_action("mouseup", 2), Some(PointerAction::Up(MouseButton::Secondary)));
    }

    #[test]
    fn unknown_button_is_dropped() {
        assert_eq!(pointer_action("mousedown", 7), None);
        assert_eq!(pointer_action("mouseup", -1), None);
    }

    #[test]
    fn move_ignores_button() {
        assert_eq!(pointer_action("mousemove", 9), Some(PointerAction::Move));
    }

    #[test]
    fn other_events_are_not_pointer_actions() {
        assert_eq!(pointer_action("click", 0), None);
    }

    // ── container_extent ──────────────────────────────────────────────────

    #[test]
    fn root_source_reads_client_box() {
        assert_eq!(container_extent(SizeSource::Root, (640, 480), (1280.0, 720.0)), (640, 480));
    }

    #[test]
    fn window_source_reads_inner_size() {
        assert_eq!(container_extent(SizeSource::Window, (640, 480), (1280.5, 720.0)), (1280, 720));
    }

    #[test]
    fn fallback_start_size_matches_first_resize_event() {
        use retrohost_runtime::input::ResizeTracker;

        let inner = (1280.0, 720.0);
        let mut tracker = ResizeTracker::default();
        let (w, h) = container_extent(SizeSource::Window, (640, 480), inner);
        assert!(tracker.observe(w, h));
        // The first window resize event re-reports the unchanged inner size.
        let (w, h) = container_extent(SizeSource::Window, (0, 0), inner);
        assert!(!tracker.observe(w, h));
    }

    // ── floor_extent ──────────────────────────────────────────────────────

    #[test]
    fn extents_floor() {
        assert_eq!(floor_extent(799.9), 799);
        assert_eq!(floor_extent(400.0), 400);
    }

    #[test]
    fn bad_extents_are_zero() {
        assert_eq!(floor_extent(-3.0), 0);
        assert_eq!(floor_extent(f64::NAN), 0);
        assert_eq!(floor_extent(f64::INFINITY), 0);
    }
}
