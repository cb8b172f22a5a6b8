pub mod actions;
pub mod chain;
pub mod config;
pub mod confirm;
pub mod deployment;
pub mod error;
pub mod io;
pub mod paths;
pub mod registry;
pub mod remove;
pub mod session;
pub mod step;
pub mod types;

pub use error::{DesynthError, Result};
