//! Screens, buttons and input routing around the simulation

pub mod menu;
pub mod session;

pub use menu::{Button, ButtonId, buttons};
pub use session::{RunSummary, Screen, Session, Status};
