//! The processing pipeline over a loaded file.

mod document;

pub use document::{Document, State};
pub use crate::config::Config;
