//! # strato-core
//!
//! Core abstractions for the Strato zone deployment system.
//!
//! This crate provides the foundational types shared across all Strato
//! components:
//!
//! - **Versions**: Strongly-typed, totally ordered platform versions
//! - **Node Model**: Point-in-time snapshots of fleet nodes and their roles
//! - **Zone Identity**: The system/region/environment triple a deployer
//!   operates in
//! - **Error Types**: Shared error definitions and result types
//! - **Observability**: Structured logging initialization and span helpers
//!
//! ## Crate Boundary
//!
//! `strato-core` is the only crate allowed to define shared primitives.
//! The deployment domain (`strato-deploy`) builds on these types but never
//! redefines them.
//!
//! ## Example
//!
//! ```rust
//! use strato_core::prelude::*;
//!
//! let zone = ZoneIdentity::new("main", "us-east-1", "prod")?;
//! let version: Version = "7.1.0".parse()?;
//! # Ok::<(), strato_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod node;
pub mod observability;
pub mod version;
pub mod zone;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use strato_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::node::{Node, NodeRole};
    pub use crate::version::Version;
    pub use crate::zone::ZoneIdentity;
}

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use node::{Node, NodeRole};
pub use observability::{init_logging, LogFormat};
pub use version::Version;
pub use zone::ZoneIdentity;
