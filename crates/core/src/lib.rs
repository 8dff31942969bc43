//! st-core: Core library for the st cloud CLI client
//!
//! This crate provides the core functionality for the st CLI, including:
//! - Configuration and cloud profile management
//! - Domain types (projects, resource records, filter sets)
//! - The CloudApi trait for service operations
//! - The two-pass project cleanup orchestrator
//!
//! This crate is designed to be independent of any specific HTTP client,
//! allowing the orchestration to be tested against a mocked CloudApi.

pub mod backend;
pub mod cleanup;
pub mod cloud;
pub mod config;
pub mod confirm;
pub mod error;
pub mod traits;
pub mod types;

pub use cleanup::{BatchFailure, CleanupOptions, CleanupOutcome, PassReport, ProjectCleaner};
pub use cloud::{Cloud, CloudManager, Endpoints};
pub use config::{Config, ConfigManager};
pub use confirm::{AutoApprove, ConfirmGate, PromptGate};
pub use error::{Error, Result};
pub use traits::CloudApi;
pub use types::{FilterSet, Project, ResourceKind, ResourceRef};
