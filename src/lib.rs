//! spelldrill - terminal spelling practice with spoken words
//!
//! Walks a fixed word list, speaking each word through a text-to-speech
//! backend and checking the user's typed spelling against it.

pub mod error;
pub mod quiz;
pub mod session;
pub mod speech;
pub mod ui;
pub mod words;

pub use error::{Result, SpellError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "spelldrill";
