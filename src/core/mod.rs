//! Core Components
//!
//! Core infrastructure for identity-provider operations.

pub mod discovery;
pub mod fetch;
pub mod pipeline;
pub mod transport;

pub use discovery::*;
pub use fetch::*;
pub use pipeline::*;
pub use transport::*;
