//! envzero - natural-language development environment resolver
//!
//! Turns a free-text description of a development environment ("FastAPI with
//! React and Postgres") into an installation manifest: a stack label, the OS
//! packages to install and the application dependencies to install.
//!
//! # Core Concepts
//!
//! - **Rule**: declarative trigger -> contributions entry in an ordered table
//! - **Manifest**: the resolver's output; package lists are sorted and unique
//! - **Resolution Service**: validated HTTP boundary that runs the resolver on
//!   a bounded worker pool
//!
//! # Example Usage
//!
//! ```
//! use envzero::detect_stack;
//!
//! let manifest = detect_stack("React app with Node backend").unwrap();
//! assert_eq!(manifest.stack, "JavaScript/React");
//! assert!(manifest.app_dependencies.contains(&"express".to_string()));
//! ```
//!
//! # Project Structure
//!
//! - [`resolver`]: rule table and resolution algorithm
//! - [`service`]: request validation, dispatch and the HTTP surface
//! - [`stack`]: stack label identifiers
//! - [`config`]: environment-driven configuration
//! - [`cli`]: command-line interface

pub mod cli;
pub mod config;
pub mod resolver;
pub mod service;
pub mod stack;
pub mod util;

pub use config::{ConfigError, EnvzeroConfig};
pub use resolver::{detect_stack, detect_stack_value, Manifest, ResolveError, RuleSet};
pub use service::{ResolutionService, ResolveRequest, ResolveResponse, ServiceError};
pub use stack::StackId;
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
