/*!
 * System Limits and Constants
 *
 * Centralized location for well-known folder names, storage defaults and
 * version strings, grouped by domain.
 */

// =============================================================================
// TREE LAYOUT
// =============================================================================

/// Name of the protected tree root
/// Appears as the first segment of every folder's full path
pub const ROOT_FOLDER: &str = "root";

/// Home folder directly under the root, target of `~`
pub const HOME_FOLDER: &str = "Home";

/// Default folder created inside Home on a fresh installation
pub const DESKTOP_FOLDER: &str = "Desktop";

/// Utility folder holding installed packages
pub const PACKAGES_FOLDER: &str = "packages";

/// Path segment resolving to the Home folder (first segment only)
pub const HOME_SEGMENT: &str = "~";

/// Path segment resolving to the parent folder
pub const PARENT_SEGMENT: &str = "..";

/// Separator between path segments
pub const PATH_SEPARATOR: char = '/';

/// Separator between a file's base name and its type
pub const EXTENSION_SEPARATOR: char = '.';

// =============================================================================
// STORAGE
// =============================================================================

/// Storage document used when no path is configured
pub const DEFAULT_STORAGE_FILE: &str = "osinfo.json";

// =============================================================================
// SHELL
// =============================================================================

/// Hostname shown in the prompt when none is configured
pub const DEFAULT_HOSTNAME: &str = "KtOS";

/// Operating system display name
pub const OS_NAME: &str = "KtOS";

/// Operating system version reported by `info`
pub const OS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package manager command name
pub const PACKAGE_MANAGER: &str = "jpkg";

/// File written into every installed package folder
pub const PACKAGE_VERSION_FILE: &str = "VERSION";
