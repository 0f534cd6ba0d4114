//! Identity Client Types
//!
//! Core type definitions for identity-provider operations.

pub mod config;
pub mod identity;
pub mod metadata;
pub mod token;

pub use config::*;
pub use identity::*;
pub use metadata::*;
pub use token::*;
