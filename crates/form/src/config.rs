use std::path::PathBuf;

use fieldrules_core::TypeKey;

/// Default type key used when `FIELDRULES_TYPE` is unset.
pub const DEFAULT_TYPE: &str = "Course";

/// Form handler configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    /// JSON rule schema; the built-in `Course` rules are used when absent.
    pub schema_path: Option<PathBuf>,
    /// Type key the submitted record is validated as.
    pub type_key: TypeKey,
    /// Print every violation instead of the single retry message.
    pub report: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            schema_path: None,
            type_key: TypeKey::from_static(DEFAULT_TYPE),
            report: false,
        }
    }
}

impl FormConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default    |
    /// |--------------------------|------------|
    /// | `FIELDRULES_SCHEMA_PATH` | --         |
    /// | `FIELDRULES_TYPE`        | `Course`   |
    /// | `FIELDRULES_REPORT`      | `false`    |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`FormConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let schema_path = lookup("FIELDRULES_SCHEMA_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let type_key = lookup("FIELDRULES_TYPE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(TypeKey::new)
            .unwrap_or_else(|| TypeKey::from_static(DEFAULT_TYPE));

        let report = lookup("FIELDRULES_REPORT")
            .map(|s| parse_flag(&s))
            .unwrap_or(false);

        Self {
            schema_path,
            type_key,
            report,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
