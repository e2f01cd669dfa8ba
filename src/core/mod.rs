/*!
 * Core Module
 * Constants, configuration and serialization helpers
 */

pub mod config;
pub mod json;
pub mod limits;
pub mod serde;

// Re-export for convenience
pub use config::ShellConfig;
pub use json::{JsonError, JsonResult};
