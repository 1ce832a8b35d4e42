//! Logging utilities.
//!
//! Native logger initialization on top of the `log` facade. The browser
//! backend installs its own console logger instead.

mod init;

pub use init::{init_logging, LoggingConfig};
