//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), optional
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → InspectorConfig (validated, immutable)
//!     → passed by value to HttpServer at startup
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; running without a file is the common case
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{parse_config, read_config, ConfigError};
pub use schema::{
    InspectorConfig, LimitsConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
