//! st-api: REST service adapter for the st CLI client
//!
//! This crate provides the implementation of the CloudApi trait over plain
//! REST with token-header authentication. It is the only crate that depends
//! on an HTTP client.

pub mod client;

pub use client::{CloudClient, Service};
