//! Cloud profile management
//!
//! Clouds are named references to a set of service endpoints and the token
//! used to authenticate against them. The profile also carries a default
//! project, used by `--auth-project`.

use serde::{Deserialize, Serialize};

use crate::config::ConfigManager;
use crate::error::{Error, Result};

/// Per-service endpoint overrides
///
/// The identity endpoint defaults to the auth URL; the other services have no
/// catalog discovery here and must be configured explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Endpoints {
    /// Identity service (defaults to the cloud's auth URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,

    /// Compute service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<String>,

    /// Image service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Volume service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
}

/// A cloud is a named set of service endpoints plus a credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    /// Unique name for this cloud
    pub name: String,

    /// Identity (auth) URL, e.g. "https://keystone.example.org:5000"
    pub auth_url: String,

    /// Pre-issued API token
    pub token: String,

    /// Region name
    #[serde(default = "default_region")]
    pub region: String,

    /// Default project name, used when a command is invoked with
    /// `--auth-project`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Allow insecure TLS connections
    #[serde(default)]
    pub insecure: bool,

    /// Per-service endpoint overrides
    #[serde(default)]
    pub endpoints: Endpoints,
}

fn default_region() -> String {
    "RegionOne".to_string()
}

impl Cloud {
    /// Create a new cloud with required fields
    pub fn new(
        name: impl Into<String>,
        auth_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            auth_url: auth_url.into(),
            token: token.into(),
            region: default_region(),
            project: None,
            insecure: false,
            endpoints: Endpoints::default(),
        }
    }

    /// Identity endpoint, falling back to the auth URL
    pub fn identity_endpoint(&self) -> &str {
        self.endpoints.identity.as_deref().unwrap_or(&self.auth_url)
    }

    /// Check every configured endpoint parses as a URL
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.auth_url)?;
        for endpoint in [
            &self.endpoints.identity,
            &self.endpoints.compute,
            &self.endpoints.image,
            &self.endpoints.volume,
        ]
        .into_iter()
        .flatten()
        {
            url::Url::parse(endpoint)?;
        }
        Ok(())
    }
}

/// Manager for cloud profile operations
pub struct CloudManager {
    config_manager: ConfigManager,
}

impl CloudManager {
    /// Create a new CloudManager with a specific ConfigManager
    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// Create a new CloudManager using the default config location
    pub fn new() -> Result<Self> {
        let config_manager = ConfigManager::new()?;
        Ok(Self { config_manager })
    }

    /// List all configured clouds
    pub fn list(&self) -> Result<Vec<Cloud>> {
        let config = self.config_manager.load()?;
        Ok(config.clouds)
    }

    /// Get a cloud by name
    pub fn get(&self, name: &str) -> Result<Cloud> {
        let config = self.config_manager.load()?;
        config
            .clouds
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::CloudNotFound(name.to_string()))
    }

    /// Add or update a cloud
    pub fn set(&self, cloud: Cloud) -> Result<()> {
        cloud.validate()?;

        let mut config = self.config_manager.load()?;

        // Remove existing cloud with same name
        config.clouds.retain(|c| c.name != cloud.name);
        config.clouds.push(cloud);

        self.config_manager.save(&config)
    }

    /// Remove a cloud
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut config = self.config_manager.load()?;
        let original_len = config.clouds.len();

        config.clouds.retain(|c| c.name != name);

        if config.clouds.len() == original_len {
            return Err(Error::CloudNotFound(name.to_string()));
        }

        self.config_manager.save(&config)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn temp_cloud_manager() -> (CloudManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_manager = ConfigManager::with_path(config_path);
        let cloud_manager = CloudManager::with_config_manager(config_manager);
        (cloud_manager, temp_dir)
    }

    #[test]
    fn test_cloud_new() {
        let cloud = Cloud::new("devstack", "https://keystone.local:5000", "tok");
        assert_eq!(cloud.name, "devstack");
        assert_eq!(cloud.region, "RegionOne");
        assert_eq!(cloud.identity_endpoint(), "https://keystone.local:5000");
        assert!(!cloud.insecure);
    }

    #[test]
    fn test_identity_endpoint_override() {
        let mut cloud = Cloud::new("devstack", "https://keystone.local:5000", "tok");
        cloud.endpoints.identity = Some("https://identity.local:5000".to_string());
        assert_eq!(cloud.identity_endpoint(), "https://identity.local:5000");
    }

    #[test]
    fn test_cloud_validate_rejects_bad_url() {
        let cloud = Cloud::new("bad", "not a url", "tok");
        assert!(cloud.validate().is_err());
    }

    #[test]
    fn test_cloud_manager_set_and_get() {
        let (manager, _temp_dir) = temp_cloud_manager();

        let mut cloud = Cloud::new("devstack", "https://keystone.local:5000", "tok");
        cloud.project = Some("demo".to_string());
        manager.set(cloud).unwrap();

        let loaded = manager.get("devstack").unwrap();
        assert_eq!(loaded.auth_url, "https://keystone.local:5000");
        assert_eq!(loaded.project.as_deref(), Some("demo"));
    }

    #[test]
    fn test_cloud_manager_get_missing() {
        let (manager, _temp_dir) = temp_cloud_manager();
        assert!(matches!(
            manager.get("nope"),
            Err(Error::CloudNotFound(_))
        ));
    }

    #[test]
    fn test_cloud_manager_set_replaces() {
        let (manager, _temp_dir) = temp_cloud_manager();

        manager
            .set(Cloud::new("devstack", "https://a.local:5000", "tok1"))
            .unwrap();
        manager
            .set(Cloud::new("devstack", "https://b.local:5000", "tok2"))
            .unwrap();

        let clouds = manager.list().unwrap();
        assert_eq!(clouds.len(), 1);
        assert_eq!(clouds[0].auth_url, "https://b.local:5000");
    }

    #[test]
    fn test_cloud_manager_remove() {
        let (manager, _temp_dir) = temp_cloud_manager();

        manager
            .set(Cloud::new("devstack", "https://a.local:5000", "tok"))
            .unwrap();
        manager.remove("devstack").unwrap();
        assert!(manager.list().unwrap().is_empty());

        assert!(matches!(
            manager.remove("devstack"),
            Err(Error::CloudNotFound(_))
        ));
    }
}
