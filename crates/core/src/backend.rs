//! Per-kind enumeration and deletion dispatch
//!
//! Each resource kind maps onto one pair of CloudApi calls. The forced-delete
//! fallback lives here, not in the orchestrator: a kind that supports it
//! retries a failed plain delete exactly once via the forced variant, and only
//! counts as a failure when both attempts fail.

use tracing::debug;

use crate::error::Result;
use crate::traits::CloudApi;
use crate::types::{FilterSet, ResourceKind, ResourceRef};

impl ResourceKind {
    /// List resources of this kind owned by the given project
    pub async fn list(
        self,
        api: &dyn CloudApi,
        project_id: &str,
        filters: &FilterSet,
    ) -> Result<Vec<ResourceRef>> {
        match self {
            ResourceKind::Server => api.list_servers(project_id, filters).await,
            ResourceKind::Image => api.list_images(project_id, filters).await,
            ResourceKind::VolumeSnapshot => api.list_volume_snapshots(project_id, filters).await,
            ResourceKind::VolumeBackup => api.list_volume_backups(project_id, filters).await,
            ResourceKind::Volume => api.list_volumes(project_id, filters).await,
        }
    }

    /// Delete one resource of this kind, falling back to the forced variant
    /// once if the kind supports it
    pub async fn delete(self, api: &dyn CloudApi, id: &str) -> Result<()> {
        let plain = match self {
            ResourceKind::Server => api.delete_server(id).await,
            ResourceKind::Image => api.delete_image(id).await,
            ResourceKind::VolumeSnapshot => api.delete_volume_snapshot(id).await,
            ResourceKind::VolumeBackup => api.delete_volume_backup(id).await,
            ResourceKind::Volume => api.delete_volume(id).await,
        };

        let e = match plain {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        match self {
            ResourceKind::VolumeSnapshot => {
                debug!(kind = %self, id, error = %e, "plain delete failed, trying forced delete");
                api.force_delete_volume_snapshot(id).await
            }
            ResourceKind::VolumeBackup => {
                debug!(kind = %self, id, error = %e, "plain delete failed, trying forced delete");
                api.force_delete_volume_backup(id).await
            }
            ResourceKind::Volume => {
                debug!(kind = %self, id, error = %e, "plain delete failed, trying forced delete");
                api.force_delete_volume(id).await
            }
            ResourceKind::Server | ResourceKind::Image => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use crate::error::Error;
    use crate::traits::MockCloudApi;
    use crate::types::{FilterSet, ResourceKind};

    #[tokio::test]
    async fn test_list_dispatches_by_kind() {
        let mut api = MockCloudApi::new();
        api.expect_list_servers()
            .withf(|project, filters| project == "p1" && filters.is_empty())
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let filters = FilterSet::default();
        let found = ResourceKind::Server.list(&api, "p1", &filters).await;
        assert!(found.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_server_has_no_fallback() {
        let mut api = MockCloudApi::new();
        api.expect_delete_server()
            .with(eq("s1"))
            .times(1)
            .returning(|_| Err(Error::Conflict("locked".into())));

        let result = ResourceKind::Server.delete(&api, "s1").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_backup_falls_back_to_forced() {
        let mut api = MockCloudApi::new();
        api.expect_delete_volume_backup()
            .with(eq("b1"))
            .times(1)
            .returning(|_| Err(Error::Conflict("backup in error state".into())));
        api.expect_force_delete_volume_backup()
            .with(eq("b1"))
            .times(1)
            .returning(|_| Ok(()));

        let result = ResourceKind::VolumeBackup.delete(&api, "b1").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_forced_fallback_attempted_once() {
        let mut api = MockCloudApi::new();
        api.expect_delete_volume_snapshot()
            .times(1)
            .returning(|_| Err(Error::Conflict("snapshot in error state".into())));
        api.expect_force_delete_volume_snapshot()
            .times(1)
            .returning(|_| Err(Error::Conflict("still stuck".into())));

        let result = ResourceKind::VolumeSnapshot.delete(&api, "snap1").await;
        assert!(result.is_err());
    }
}
