//! Shared types, error model, and configuration for scriptbundle.
//!
//! This crate is the foundation depended on by all other scriptbundle crates.
//! It provides:
//! - [`ScriptBundleError`], the unified error type
//! - Domain types ([`DiscoveredFile`], [`VersionNumber`])
//! - Configuration ([`BundleConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    BundleConfig, CONFIG_FILE_NAME, ConfigOverrides, load_config, load_config_from,
    normalize_extension,
};
pub use error::{Result, ScriptBundleError};
pub use types::{DiscoveredFile, MAX_VERSION, OUTPUT_EXTENSION, VersionNumber};
