//! Cloud service client
//!
//! Implements the CloudApi trait from st-core over plain REST: token-header
//! authentication, JSON envelopes, one base URL per service. Identity speaks
//! the /v3 API; image the /v2 API; compute and volume are rooted at their
//! configured endpoints.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tracing::debug;

use st_core::{Cloud, CloudApi, Error, FilterSet, Project, ResourceKind, ResourceRef, Result};

const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// The backend services the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Identity,
    Compute,
    Image,
    Volume,
}

impl Service {
    const fn name(self) -> &'static str {
        match self {
            Service::Identity => "identity",
            Service::Compute => "compute",
            Service::Image => "image",
            Service::Volume => "volume",
        }
    }
}

/// REST client for one cloud profile
pub struct CloudClient {
    http: reqwest::Client,
    cloud: Cloud,
}

impl CloudClient {
    /// Create a new client from a cloud profile
    pub fn new(cloud: Cloud) -> Result<Self> {
        cloud.validate()?;

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(cloud.insecure)
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, cloud })
    }

    /// The profile this client was built from
    pub fn cloud(&self) -> &Cloud {
        &self.cloud
    }

    /// Resolve the base endpoint for a service
    fn endpoint(&self, service: Service) -> Result<&str> {
        let endpoint = match service {
            Service::Identity => Some(self.cloud.identity_endpoint()),
            Service::Compute => self.cloud.endpoints.compute.as_deref(),
            Service::Image => self.cloud.endpoints.image.as_deref(),
            Service::Volume => self.cloud.endpoints.volume.as_deref(),
        };
        endpoint.ok_or_else(|| {
            Error::Config(format!(
                "No {} endpoint configured for cloud '{}'",
                service.name(),
                self.cloud.name
            ))
        })
    }

    fn service_url(&self, service: Service, path: &str) -> Result<String> {
        let base = self.endpoint(service)?;
        Ok(join_url(base, path))
    }

    async fn request_json<T: for<'de> Deserialize<'de>>(
        &self,
        service: Service,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        let url = self.service_url(service, path)?;
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .header(AUTH_TOKEN_HEADER, &self.cloud.token)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, &url));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Network(format!("Invalid response from {url}: {e}")))
    }

    /// Send a bodyless request where only the status matters (DELETE, POST
    /// action)
    async fn request_empty(
        &self,
        method: Method,
        service: Service,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<()> {
        let url = self.service_url(service, path)?;
        debug!(%url, method = %method, "request");

        let mut request = self
            .http
            .request(method, &url)
            .header(AUTH_TOKEN_HEADER, &self.cloud.token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, &url));
        }
        Ok(())
    }

    async fn delete(&self, service: Service, path: &str) -> Result<()> {
        self.request_empty(Method::DELETE, service, path, None).await
    }

    /// POST the forced-delete action the volume service understands
    async fn force_delete_action(&self, path: &str) -> Result<()> {
        self.request_empty(
            Method::POST,
            Service::Volume,
            path,
            Some(serde_json::json!({ "os-force_delete": {} })),
        )
        .await
    }

    async fn list_resources(
        &self,
        service: Service,
        path: &str,
        kind: ResourceKind,
        scope_key: &'static str,
        project_id: &str,
        filters: &FilterSet,
    ) -> Result<Vec<ResourceRef>> {
        let query = scoped_query(scope_key, project_id, filters);
        let envelope: serde_json::Value = self.request_json(service, path, &query).await?;
        Ok(collect_resources(&envelope, envelope_key(path), kind))
    }
}

/// Join a base endpoint and a path without doubling slashes
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Scope parameter plus the verbatim filter pairs
fn scoped_query(
    scope_key: &'static str,
    project_id: &str,
    filters: &FilterSet,
) -> Vec<(&'static str, String)> {
    let mut query = vec![(scope_key, project_id.to_string())];
    query.extend(filters.to_query());
    query
}

/// The envelope key is the last path segment ("servers", "snapshots", ...)
fn envelope_key(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

/// Pull (id, name) records out of a list envelope
fn collect_resources(envelope: &serde_json::Value, key: &str, kind: ResourceKind) -> Vec<ResourceRef> {
    envelope
        .get(key)
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let id = item.get("id")?.as_str()?.to_string();
                    let name = item
                        .get("name")
                        .and_then(|n| n.as_str())
                        .map(|n| n.to_string());
                    Some(ResourceRef::new(kind, id, name))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn status_error(status: StatusCode, url: &str) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::Auth(format!("{status} from {url}"))
        }
        StatusCode::NOT_FOUND => Error::NotFound(url.to_string()),
        StatusCode::CONFLICT => Error::Conflict(format!("{status} from {url}")),
        _ => Error::Network(format!("{status} from {url}")),
    }
}

#[derive(Debug, Deserialize)]
struct ApiProject {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "enabled_default")]
    enabled: bool,
}

fn enabled_default() -> bool {
    true
}

impl From<ApiProject> for Project {
    fn from(p: ApiProject) -> Self {
        Project {
            id: p.id,
            name: p.name,
            description: p.description,
            enabled: p.enabled,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProjectEnvelope {
    project: ApiProject,
}

#[derive(Debug, Deserialize)]
struct ProjectsEnvelope {
    projects: Vec<ApiProject>,
}

#[async_trait]
impl CloudApi for CloudClient {
    async fn find_project(&self, name_or_id: &str) -> Result<Project> {
        // Try as an ID first; fall back to a name lookup.
        let by_id: Result<ProjectEnvelope> = self
            .request_json(Service::Identity, &format!("v3/projects/{name_or_id}"), &[])
            .await;
        match by_id {
            Ok(envelope) => return Ok(envelope.project.into()),
            Err(Error::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        let envelope: ProjectsEnvelope = self
            .request_json(
                Service::Identity,
                "v3/projects",
                &[("name", name_or_id.to_string())],
            )
            .await?;
        envelope
            .projects
            .into_iter()
            .next()
            .map(Project::from)
            .ok_or_else(|| Error::NotFound(format!("project '{name_or_id}'")))
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let envelope: ProjectsEnvelope = self
            .request_json(Service::Identity, "v3/projects", &[])
            .await?;
        Ok(envelope.projects.into_iter().map(Project::from).collect())
    }

    async fn delete_project(&self, id: &str) -> Result<()> {
        self.delete(Service::Identity, &format!("v3/projects/{id}"))
            .await
    }

    async fn list_servers(
        &self,
        project_id: &str,
        filters: &FilterSet,
    ) -> Result<Vec<ResourceRef>> {
        self.list_resources(
            Service::Compute,
            "servers",
            ResourceKind::Server,
            "project_id",
            project_id,
            filters,
        )
        .await
    }

    async fn delete_server(&self, id: &str) -> Result<()> {
        self.delete(Service::Compute, &format!("servers/{id}")).await
    }

    async fn list_images(&self, project_id: &str, filters: &FilterSet) -> Result<Vec<ResourceRef>> {
        self.list_resources(
            Service::Image,
            "v2/images",
            ResourceKind::Image,
            "owner",
            project_id,
            filters,
        )
        .await
    }

    async fn delete_image(&self, id: &str) -> Result<()> {
        self.delete(Service::Image, &format!("v2/images/{id}")).await
    }

    async fn list_volume_snapshots(
        &self,
        project_id: &str,
        filters: &FilterSet,
    ) -> Result<Vec<ResourceRef>> {
        self.list_resources(
            Service::Volume,
            "snapshots",
            ResourceKind::VolumeSnapshot,
            "project_id",
            project_id,
            filters,
        )
        .await
    }

    async fn delete_volume_snapshot(&self, id: &str) -> Result<()> {
        self.delete(Service::Volume, &format!("snapshots/{id}")).await
    }

    async fn force_delete_volume_snapshot(&self, id: &str) -> Result<()> {
        self.force_delete_action(&format!("snapshots/{id}/action"))
            .await
    }

    async fn list_volume_backups(
        &self,
        project_id: &str,
        filters: &FilterSet,
    ) -> Result<Vec<ResourceRef>> {
        self.list_resources(
            Service::Volume,
            "backups",
            ResourceKind::VolumeBackup,
            "project_id",
            project_id,
            filters,
        )
        .await
    }

    async fn delete_volume_backup(&self, id: &str) -> Result<()> {
        self.delete(Service::Volume, &format!("backups/{id}")).await
    }

    async fn force_delete_volume_backup(&self, id: &str) -> Result<()> {
        self.force_delete_action(&format!("backups/{id}/action"))
            .await
    }

    async fn list_volumes(
        &self,
        project_id: &str,
        filters: &FilterSet,
    ) -> Result<Vec<ResourceRef>> {
        self.list_resources(
            Service::Volume,
            "volumes",
            ResourceKind::Volume,
            "project_id",
            project_id,
            filters,
        )
        .await
    }

    async fn delete_volume(&self, id: &str) -> Result<()> {
        self.delete(Service::Volume, &format!("volumes/{id}")).await
    }

    async fn force_delete_volume(&self, id: &str) -> Result<()> {
        self.force_delete_action(&format!("volumes/{id}/action"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud() -> Cloud {
        let mut cloud = Cloud::new("devstack", "https://keystone.local:5000", "tok");
        cloud.endpoints.compute = Some("https://nova.local:8774/v2.1/".to_string());
        cloud.endpoints.image = Some("https://glance.local:9292".to_string());
        cloud.endpoints.volume = Some("https://cinder.local:8776/v3".to_string());
        cloud
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://nova.local:8774/v2.1/", "servers"),
            "https://nova.local:8774/v2.1/servers"
        );
        assert_eq!(
            join_url("https://glance.local:9292", "/v2/images"),
            "https://glance.local:9292/v2/images"
        );
    }

    #[test]
    fn test_endpoint_resolution() {
        let client = CloudClient::new(cloud()).unwrap();
        assert_eq!(
            client.endpoint(Service::Identity).unwrap(),
            "https://keystone.local:5000"
        );
        assert_eq!(
            client.endpoint(Service::Volume).unwrap(),
            "https://cinder.local:8776/v3"
        );
    }

    #[test]
    fn test_missing_endpoint_is_config_error() {
        let bare = Cloud::new("bare", "https://keystone.local:5000", "tok");
        let client = CloudClient::new(bare).unwrap();
        assert!(matches!(
            client.endpoint(Service::Compute),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_scoped_query_filters_verbatim() {
        let filters = FilterSet {
            created_before: Some("2200-01-01".to_string()),
            updated_before: Some("2200-01-02".to_string()),
        };
        assert_eq!(
            scoped_query("project_id", "p1", &filters),
            vec![
                ("project_id", "p1".to_string()),
                ("created_at", "2200-01-01".to_string()),
                ("updated_at", "2200-01-02".to_string()),
            ]
        );
    }

    #[test]
    fn test_envelope_key() {
        assert_eq!(envelope_key("servers"), "servers");
        assert_eq!(envelope_key("v2/images"), "images");
        assert_eq!(envelope_key("snapshots/"), "snapshots");
    }

    #[test]
    fn test_collect_resources() {
        let envelope = serde_json::json!({
            "volumes": [
                { "id": "v1", "name": "data", "size": 10 },
                { "id": "v2", "name": null },
                { "status": "creating" }
            ]
        });
        let refs = collect_resources(&envelope, "volumes", ResourceKind::Volume);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].id, "v1");
        assert_eq!(refs[0].name.as_deref(), Some("data"));
        assert_eq!(refs[1].name, None);
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "u"),
            Error::Auth(_)
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, "u"),
            Error::Auth(_)
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "u"),
            Error::NotFound(_)
        ));
        assert!(matches!(
            status_error(StatusCode::CONFLICT, "u"),
            Error::Conflict(_)
        ));
        assert!(matches!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, "u"),
            Error::Network(_)
        ));
    }
}
