//! Schema resource lookup.
//!
//! Imports and includes name other schema documents. A [`ResourceChain`] asks
//! its providers for the bytes of such a document in order, and the first
//! provider that has it wins.

mod chain;
mod config;
mod error;
mod provider;

pub use chain::ResourceChain;
pub use config::ResourceConfig;
pub use error::{ConfigError, ResourceError};
pub use provider::{DirProvider, MemoryProvider, ResourceProvider, ResourceStream};
