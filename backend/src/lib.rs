//! Artifact bucket retention service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Bucket lifecycle configuration on the object store
pub mod bucket_lifecycle;

/// Project service client
pub mod project_api;

/// HTTP routes
pub mod routes;

/// Server setup
pub mod server;

/// Configuration, errors and extractors
pub mod types;
