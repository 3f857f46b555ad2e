//! Configuration loading and management for the pairing engine.
//!
//! This module provides the clinic pairing rules and header alias tables,
//! either from their built-in defaults or from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use stonebridge_pairing::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/stonebridge").unwrap();
//! println!("Priority interviewers: {:?}", config.rules().priority_interviewers);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AffinityRule, AliasTable, RulesConfig};
