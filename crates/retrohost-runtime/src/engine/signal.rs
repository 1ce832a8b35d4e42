/// Response of the engine to a single tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickSignal {
    /// State advanced; the visible image is unchanged.
    Continue,
    /// State advanced and the image must be repainted.
    RequestRedraw,
    /// The engine is done. Terminal.
    Finished,
}

impl TickSignal {
    /// Converts the engine's wire representation.
    ///
    /// Unknown values are treated as [`TickSignal::Continue`] so newer engines
    /// never stop an older host.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "Continue" => Self::Continue,
            "RequestRedraw" => Self::RequestRedraw,
            "Finished" => Self::Finished,
            other => {
                log::warn!("unknown tick signal {other:?}, treating it as Continue");
                Self::Continue
            }
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Continue => "Continue",
            Self::RequestRedraw => "RequestRedraw",
            Self::Finished => "Finished",
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == Self::Finished
    }
}
