//! Shared utilities for stockbrief
//!
//! Logging setup and small environment helpers used by the library and the
//! command-line binary.

pub mod config;
pub mod logging;

pub use config::{env_opt, env_or, env_parse, EnvError};
pub use logging::{init_tracing, LogFormat};
