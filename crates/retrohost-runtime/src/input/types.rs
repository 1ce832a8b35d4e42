/// Which keyboard payload the target engine understands.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum KeyContract {
    /// Numeric `keyCode`.
    #[default]
    KeyCode,
    /// `key` string plus modifier flags.
    KeyWithModifiers,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button as numbered by the DOM `MouseEvent.button` property.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
    Back,
    Forward,
}

impl MouseButton {
    /// Maps a DOM button id; anything outside `0..=4` has no engine meaning.
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            3 => Some(Self::Back),
            4 => Some(Self::Forward),
            _ => None,
        }
    }

    /// Id forwarded to the engine.
    pub fn id(self) -> u8 {
        match self {
            Self::Primary => 0,
            Self::Middle => 1,
            Self::Secondary => 2,
            Self::Back => 3,
            Self::Forward => 4,
        }
    }
}

/// Modifier keys state.
///
/// This is stored as booleans rather than bitflags to keep it explicit and stable.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerAction {
    Down(MouseButton),
    Up(MouseButton),
    Move,
}

/// Pointer position relative to the drawable, in drawable pixels,
/// together with the drawable size at the time of the event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerSample {
    pub local_x: f64,
    pub local_y: f64,
    pub surface_width: u32,
    pub surface_height: u32,
}

impl PointerSample {
    /// Position as fractions of the surface size.
    ///
    /// A zero-sized surface maps to `0.0` on that axis.
    pub fn fractions(&self, clamp: bool) -> (f32, f32) {
        (
            fraction(self.local_x, self.surface_width, clamp),
            fraction(self.local_y, self.surface_height, clamp),
        )
    }
}

fn fraction(local: f64, extent: u32, clamp: bool) -> f32 {
    if extent == 0 || !local.is_finite() {
        return 0.0;
    }
    let f = local / f64::from(extent);
    let f = if clamp { f.clamp(0.0, 1.0) } else { f };
    f as f32
}

/// Raw keyboard event as reported by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawKey {
    /// Legacy numeric key code.
    pub key_code: u32,
    /// Key string (`"a"`, `"Enter"`, `"ArrowUp"`...). Depends on modifiers.
    pub key: String,
    /// Physical key (`"KeyA"`, `"ShiftLeft"`...); empty when unknown.
    pub code: String,
    pub modifiers: Modifiers,
    /// True when the platform flags the event as auto-repeat.
    pub repeat: bool,
}
