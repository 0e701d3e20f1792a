//! Environment variable helpers for configuration loading

use std::str::FromStr;
use thiserror::Error;

/// Failure reading a configuration variable
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// Variable is set but does not parse
    #[error("{name} has invalid value '{value}'")]
    Invalid { name: String, value: String },
}

/// Read a variable, treating empty strings as unset
pub fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a variable or fall back to `default`
pub fn env_or(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

/// Read and parse a variable; `Ok(None)` when unset
pub fn env_parse<T: FromStr>(name: &str) -> Result<Option<T>, EnvError> {
    match env_opt(name) {
        None => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(|_| EnvError::Invalid {
            name: name.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_opt_treats_blank_as_unset() {
        unsafe {
            std::env::set_var("STOCKBRIEF_UTILS_TEST_BLANK", "   ");
        }
        assert_eq!(env_opt("STOCKBRIEF_UTILS_TEST_BLANK"), None);
        assert_eq!(env_or("STOCKBRIEF_UTILS_TEST_BLANK", "x"), "x");
        unsafe {
            std::env::remove_var("STOCKBRIEF_UTILS_TEST_BLANK");
        }
    }

    #[test]
    fn test_env_parse() {
        unsafe {
            std::env::set_var("STOCKBRIEF_UTILS_TEST_PORT", "8443");
            std::env::set_var("STOCKBRIEF_UTILS_TEST_BAD", "eighty");
        }
        assert_eq!(env_parse::<u16>("STOCKBRIEF_UTILS_TEST_PORT"), Ok(Some(8443)));
        assert_eq!(
            env_parse::<u16>("STOCKBRIEF_UTILS_TEST_BAD"),
            Err(EnvError::Invalid {
                name: "STOCKBRIEF_UTILS_TEST_BAD".to_string(),
                value: "eighty".to_string(),
            })
        );
        assert_eq!(env_parse::<u16>("STOCKBRIEF_UTILS_TEST_UNSET"), Ok(None));
        unsafe {
            std::env::remove_var("STOCKBRIEF_UTILS_TEST_PORT");
            std::env::remove_var("STOCKBRIEF_UTILS_TEST_BAD");
        }
    }
}
