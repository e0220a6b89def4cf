//! INI document handling for Resource Manager
//!
//! Provides ordered settings blocks, a line-preserving document model,
//! and atomic file persistence.

pub mod document;
pub mod error;
pub mod io;
pub mod settings;

pub use document::{Document, Line, Section};
pub use error::{Error, Result};
pub use io::IniFile;
pub use settings::SettingsBlock;
