//! Configuration module for Council-Docs
//!
//! Settings come from built-in defaults, an optional TOML file, and finally
//! command-line overrides applied by the binary.
//!
//! # Example
//!
//! ```no_run
//! use council_docs::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("council-docs.toml")).unwrap();
//! println!("Saving documents into: {}", config.scraper.output);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ScraperConfig, UserAgentConfig, DEFAULT_DELAY_SECS, DEFAULT_FILTER,
    DEFAULT_OUTPUT_DIR,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
