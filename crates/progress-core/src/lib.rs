pub mod catalog;
pub mod config;
pub mod error;
pub mod io;
pub mod paths;
pub mod presenter;
pub mod project;
pub mod state;
pub mod store;
pub mod workspace;

pub use error::{ProgressError, Result};
