//! CloudApi trait definition
//!
//! This trait is the seam between the cleanup workflow and the service
//! adapters. It decouples the CLI from any concrete REST client and can be
//! mocked for testing.
//!
//! Every list operation takes the project scope and the filter set; the
//! filter values travel to the backend verbatim. Forced deletion variants
//! exist only for the volume-service resource types, which can get stuck in
//! non-deletable states.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{FilterSet, Project, ResourceRef};

/// Client interface for the identity, compute, image, and volume services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// Resolve a project by name or ID
    async fn find_project(&self, name_or_id: &str) -> Result<Project>;

    /// List all projects visible to the caller
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Delete a project
    async fn delete_project(&self, id: &str) -> Result<()>;

    /// List servers owned by a project
    async fn list_servers(&self, project_id: &str, filters: &FilterSet)
    -> Result<Vec<ResourceRef>>;

    /// Delete a server
    async fn delete_server(&self, id: &str) -> Result<()>;

    /// List images owned by a project
    async fn list_images(&self, project_id: &str, filters: &FilterSet) -> Result<Vec<ResourceRef>>;

    /// Delete an image
    async fn delete_image(&self, id: &str) -> Result<()>;

    /// List volume snapshots owned by a project
    async fn list_volume_snapshots(
        &self,
        project_id: &str,
        filters: &FilterSet,
    ) -> Result<Vec<ResourceRef>>;

    /// Delete a volume snapshot
    async fn delete_volume_snapshot(&self, id: &str) -> Result<()>;

    /// Force-delete a volume snapshot stuck in a non-deletable state
    async fn force_delete_volume_snapshot(&self, id: &str) -> Result<()>;

    /// List volume backups owned by a project
    async fn list_volume_backups(
        &self,
        project_id: &str,
        filters: &FilterSet,
    ) -> Result<Vec<ResourceRef>>;

    /// Delete a volume backup
    async fn delete_volume_backup(&self, id: &str) -> Result<()>;

    /// Force-delete a volume backup stuck in a non-deletable state
    async fn force_delete_volume_backup(&self, id: &str) -> Result<()>;

    /// List volumes owned by a project
    async fn list_volumes(&self, project_id: &str, filters: &FilterSet)
    -> Result<Vec<ResourceRef>>;

    /// Delete a volume
    async fn delete_volume(&self, id: &str) -> Result<()>;

    /// Force-delete a volume stuck in a non-deletable state
    async fn force_delete_volume(&self, id: &str) -> Result<()>;
}
