//! Core library for the festival API.
//!
//! This crate provides the dataset model, loader, queries and HTTP routing used by both
//! the Lambda and the standalone server binaries.

pub mod config;
pub mod error;
pub mod http;
pub mod loader;
pub mod models;
pub mod query;

pub use config::Config;
pub use error::{Error, LoadError, Result};
pub use http::{error_response, handle, json_response, with_cors};
pub use loader::{CachedLoader, DatasetLoader, FileLoader, StaticLoader};
pub use models::{Dataset, ErrorBody, Festival, MessageBody};
