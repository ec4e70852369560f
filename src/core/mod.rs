// Public modules
pub mod config;
pub mod error;
pub mod identity;
pub mod markers;
pub mod recipe;
pub mod release;
pub mod scm;

// Public modules for CLI access
pub mod defaults;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use identity::{PackageIdentity, Resolver};
