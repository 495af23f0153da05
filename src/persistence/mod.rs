//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - State validation on load
//! - Atomic writes (tmp → save)
//! - Corruption detection and recovery

pub mod envelope;
pub mod error;
pub mod slot;

pub use envelope::{SAVE_VERSION, SaveEnvelope};
pub use error::PersistError;
pub use slot::{SaveSlot, write_atomic};
