// =============================================================================
// Application Identity
// =============================================================================

/// Crate name as it appears in log targets
pub const APP_LOG_TARGET: &str = "erm_agreements";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".erm-agreements";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "erm-agreements.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "ERM_AGREEMENTS_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "ERM_AGREEMENTS_LOG";

/// Environment variable for the filter name the content expression is stored under
pub const ENV_FILTER_NAME: &str = "ERM_AGREEMENTS_FILTER_NAME";

/// Environment variable for pretty-printed JSON output
pub const ENV_PRETTY: &str = "ERM_AGREEMENTS_PRETTY";

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit code when encode is skipped because a filter row is incomplete
pub const EXIT_INCOMPLETE_FILTER: u8 = 2;
