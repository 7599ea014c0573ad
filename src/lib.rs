pub mod config;
pub mod editor;
pub mod error;
pub mod notifications;
pub mod service;

pub use error::{NasConfigError, Result};
