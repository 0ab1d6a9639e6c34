pub mod catalog;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod page;
pub mod render;
pub mod state;
pub mod switcher;

pub use controller::{ClickOutcome, Controller, Snapshot};
pub use error::{KinError, Result};
