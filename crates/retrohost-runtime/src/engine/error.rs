use std::fmt;

/// Failure of an engine capability call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The call itself threw or could not be dispatched.
    CallFailed {
        method: &'static str,
        message: String,
    },
    /// The call returned, but not in the shape the contract requires.
    Malformed {
        method: &'static str,
        message: String,
    },
}

impl EngineError {
    pub fn call_failed(method: &'static str, message: impl Into<String>) -> Self {
        Self::CallFailed { method, message: message.into() }
    }

    pub fn malformed(method: &'static str, message: impl Into<String>) -> Self {
        Self::Malformed { method, message: message.into() }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::CallFailed { method, .. } | Self::Malformed { method, .. } => method,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CallFailed { method, message } => {
                write!(f, "engine call `{method}` failed: {message}")
            }
            Self::Malformed { method, message } => {
                write!(f, "engine call `{method}` returned a malformed value: {message}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_method() {
        let e = EngineError::call_failed("tick", "TypeError: x is undefined");
        assert_eq!(e.to_string(), "engine call `tick` failed: TypeError: x is undefined");
        assert_eq!(e.method(), "tick");
    }

    #[test]
    fn malformed_display() {
        let e = EngineError::malformed("window", "image_width is not a number");
        assert!(e.to_string().contains("malformed"));
        assert_eq!(e.method(), "window");
    }
}
