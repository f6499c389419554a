//! Filesystem module.
//!
//! Provides:
//! - Directory management
//! - Filename validation and indexing

pub mod naming;
pub mod paths;

pub use naming::{indexed_file_name, sanitize_filename};
pub use paths::{default_scripts_dir, ensure_dir};
