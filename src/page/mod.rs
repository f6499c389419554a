//! Post page handling.
//!
//! Provides:
//! - Extraction of the embedded rehydration payload
//! - Optional path access over the parsed payload

pub mod context;
pub mod extract;

pub use context::{JsonPath, PageContext, DEFAULT_SCOPE};
pub use extract::{extract_embedded_json, PAYLOAD_SCRIPT_ID};
