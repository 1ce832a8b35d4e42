use std::fmt;

pub const DEFAULT_MAX_SIZE_MB: u32 = 8;

/// A named file input.
///
/// Files chosen through it reach the engine as
/// `(field_name, file_name, bytes)` when they fit in `max_size_mb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBinding {
    pub field_name: String,
    /// Key string that opens the picker, e.g. `"o"`.
    pub trigger_key: Option<String>,
    pub max_size_mb: u32,
    /// Value for the picker's `accept` attribute, e.g. `".png,.gif"`.
    pub accept: Option<String>,
}

impl FileBinding {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            trigger_key: None,
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            accept: None,
        }
    }

    pub fn trigger_key(mut self, key: impl Into<String>) -> Self {
        self.trigger_key = Some(key.into());
        self
    }

    pub fn max_size_mb(mut self, mb: u32) -> Self {
        self.max_size_mb = mb;
        self
    }

    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Limit in bytes (`max_size_mb` mebibytes).
    pub fn max_bytes(&self) -> u64 {
        u64::from(self.max_size_mb) * 1024 * 1024
    }

    /// Checks a loaded file against the size limit.
    pub fn admit(&self, file_name: &str, size_bytes: usize) -> Result<(), FileRejected> {
        if size_bytes as u64 <= self.max_bytes() {
            return Ok(());
        }
        Err(FileRejected {
            field_name: self.field_name.clone(),
            file_name: file_name.to_string(),
            size_bytes,
            max_size_mb: self.max_size_mb,
        })
    }

    pub fn is_trigger(&self, key: &str) -> bool {
        self.trigger_key.as_deref() == Some(key)
    }
}

/// A file that exceeded its binding's size limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRejected {
    pub field_name: String,
    pub file_name: String,
    pub size_bytes: usize,
    pub max_size_mb: u32,
}

impl FileRejected {
    /// Text shown to the user.
    pub fn user_message(&self) -> String {
        format!("File too large - max size is {}MB.", self.max_size_mb)
    }
}

impl fmt::Display for FileRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "file {:?} for field {:?} is {} bytes, over the {}MB limit",
            self.file_name, self.field_name, self.size_bytes, self.max_size_mb
        )
    }
}

impl std::error::Error for FileRejected {}
