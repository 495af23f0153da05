//! Platform abstraction layer
//!
//! Handles the outside world for the rest of the crate:
//! - Input: window key events to binding names
//! - Storage: where scores, saves and settings live on disk

pub mod input;
pub mod storage;

pub use input::key_name;
pub use storage::DataDir;
