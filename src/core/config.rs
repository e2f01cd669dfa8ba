/*!
 * Shell Configuration
 * Environment-driven settings resolved once at startup
 */

use std::path::PathBuf;

use super::limits::{DEFAULT_HOSTNAME, DEFAULT_STORAGE_FILE};

/// Path of the persisted JSON document
pub const STORAGE_PATH_VAR: &str = "SHELL_STORAGE_PATH";

/// `1` or `true` switches log output to JSON
pub const TRACE_JSON_VAR: &str = "SHELL_TRACE_JSON";

/// Hostname shown in the prompt
pub const HOSTNAME_VAR: &str = "SHELL_HOSTNAME";

/// Runtime configuration for the shell and its storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub storage_path: PathBuf,
    pub trace_json: bool,
    pub hostname: String,
}

impl ShellConfig {
    /// Build configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let storage_path = std::env::var(STORAGE_PATH_VAR)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_FILE));

        let trace_json = std::env::var(TRACE_JSON_VAR)
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);

        let hostname = std::env::var(HOSTNAME_VAR)
            .ok()
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOSTNAME.to_string());

        Self {
            storage_path,
            trace_json,
            hostname,
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_FILE),
            trace_json: false,
            hostname: DEFAULT_HOSTNAME.to_string(),
        }
    }
}
