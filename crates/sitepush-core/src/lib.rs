//! Sitepush - Core Library
//!
//! Packaging and upload pipeline for deploying static sites: directory
//! traversal into an in-memory zip archive, credential validation against
//! the deployment service, and the multipart upload protocol.

pub mod archive;
pub mod client;
pub mod config;
pub mod deploy;
pub mod endpoints;
pub mod error;
pub mod types;

pub use archive::*;
pub use client::*;
pub use config::*;
pub use deploy::*;
pub use endpoints::*;
pub use error::*;
pub use types::*;
