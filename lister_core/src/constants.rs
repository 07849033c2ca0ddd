// lister_core/src/constants.rs

/// One indentation unit of the report.
pub const DEFAULT_INDENT: &str = "  ";

/// Name offered for a report when no output path is given.
pub const DEFAULT_REPORT_NAME: &str = "component_variables.txt";

/// Name of the lister config .ron file.
pub const CONFIG_RON: &str = "lister_config.ron";

/// Basename of the rotating log files.
pub const LOG_BASENAME: &str = "component_lister";

/// Written for a value with nothing to show.
pub const NULL_LABEL: &str = "null";
