use crate::{GatewayError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FETCH_MODULE_DIRECTORY: &str = ".";
pub const DEFAULT_FETCH_MODULE_FILENAME: &str = "fetch.pb.ts";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Generation options read from the protoc `parameter` string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Leave lint checks on in generated files instead of disabling them
    pub enable_styling_check: bool,
    /// Generate static client methods rather than instance methods
    pub use_static_classes: bool,
    /// Keep proto field names instead of their JSON names
    pub use_proto_names: bool,
    pub fetch_module_directory: String,
    pub fetch_module_filename: String,
    pub log_level: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            enable_styling_check: false,
            use_static_classes: true,
            use_proto_names: false,
            fetch_module_directory: DEFAULT_FETCH_MODULE_DIRECTORY.to_string(),
            fetch_module_filename: DEFAULT_FETCH_MODULE_FILENAME.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl GenerationOptions {
    /// Parse a `key=value,key=value` parameter string. A bare key sets a flag.
    pub fn from_parameter(parameter: &str) -> Result<Self> {
        let mut options = Self::default();

        for part in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = match part.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (part, None),
            };

            match key {
                "enable_styling_check" => options.enable_styling_check = parse_flag(key, value)?,
                "use_static_classes" => options.use_static_classes = parse_flag(key, value)?,
                "use_proto_names" => options.use_proto_names = parse_flag(key, value)?,
                "fetch_module_directory" => {
                    options.fetch_module_directory = require_value(key, value)?
                }
                "fetch_module_filename" => {
                    options.fetch_module_filename = require_value(key, value)?
                }
                "loglevel" => options.log_level = require_value(key, value)?,
                _ => {
                    return Err(GatewayError::Parameter(format!(
                        "unknown parameter: {}",
                        key
                    )))
                }
            }
        }

        Ok(options)
    }

    /// Output path of the shared fetch module
    pub fn shared_module_path(&self) -> String {
        let dir = self.fetch_module_directory.trim_end_matches('/');
        if dir.is_empty() || dir == "." {
            return self.fetch_module_filename.clone();
        }
        let dir = dir.strip_prefix("./").unwrap_or(dir);
        format!("{}/{}", dir, self.fetch_module_filename)
    }
}

fn parse_flag(key: &str, value: Option<&str>) -> Result<bool> {
    match value {
        None | Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(GatewayError::Parameter(format!(
            "{} expects true or false, got {:?}",
            key, other
        ))),
    }
}

fn require_value(key: &str, value: Option<&str>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(GatewayError::Parameter(format!("{} requires a value", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_parameter() {
        let options = GenerationOptions::from_parameter("").unwrap();
        assert_eq!(options, GenerationOptions::default());
        assert!(options.use_static_classes);
        assert!(!options.enable_styling_check);
        assert_eq!(options.shared_module_path(), "fetch.pb.ts");
    }

    #[test]
    fn test_parse_all_keys() {
        let options = GenerationOptions::from_parameter(
            "enable_styling_check, use_static_classes=false,use_proto_names=true,\
             fetch_module_directory=web/gen/,fetch_module_filename=fetch.ts,loglevel=debug",
        )
        .unwrap();

        assert!(options.enable_styling_check);
        assert!(!options.use_static_classes);
        assert!(options.use_proto_names);
        assert_eq!(options.log_level, "debug");
        assert_eq!(options.shared_module_path(), "web/gen/fetch.ts");
    }

    #[test]
    fn test_shared_module_path_strips_dot_prefix() {
        let options = GenerationOptions {
            fetch_module_directory: "./lib".to_string(),
            ..Default::default()
        };
        assert_eq!(options.shared_module_path(), "lib/fetch.pb.ts");
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(matches!(
            GenerationOptions::from_parameter("use_static_classes=yes"),
            Err(GatewayError::Parameter(_))
        ));
        assert!(matches!(
            GenerationOptions::from_parameter("fetch_module_filename="),
            Err(GatewayError::Parameter(_))
        ));

        let err = GenerationOptions::from_parameter("emit_everything").unwrap_err();
        assert!(err.to_string().contains("emit_everything"));
    }
}
