//! Domain types for the cleanup workflow
//!
//! Projects are the unit of cleanup; every enumeration and deletion call is
//! scoped to exactly one project. Resource records are ephemeral: produced by
//! enumeration, consumed once by the reporter/deleter, never persisted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A project (tenant), the scope under which cloud resources live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project ID
    pub id: String,

    /// Human-readable project name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the project is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Resource types the cleanup pipeline knows how to enumerate and delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Server,
    Image,
    VolumeSnapshot,
    VolumeBackup,
    Volume,
}

impl ResourceKind {
    /// Fixed deletion order: servers first (they hold volumes), then images,
    /// then snapshots and backups (they depend on volumes), volumes last.
    pub const DELETION_ORDER: [ResourceKind; 5] = [
        ResourceKind::Server,
        ResourceKind::Image,
        ResourceKind::VolumeSnapshot,
        ResourceKind::VolumeBackup,
        ResourceKind::Volume,
    ];

    /// Singular human noun, used by the aggregate-failure message grammar
    pub const fn noun(self) -> &'static str {
        match self {
            ResourceKind::Server => "server",
            ResourceKind::Image => "image",
            ResourceKind::VolumeSnapshot => "volume snapshot",
            ResourceKind::VolumeBackup => "volume backup",
            ResourceKind::Volume => "volume",
        }
    }

    /// Canonical CLI token, as accepted by `--skip-resource`
    pub const fn token(self) -> &'static str {
        match self {
            ResourceKind::Server => "servers",
            ResourceKind::Image => "images",
            ResourceKind::VolumeSnapshot => "volume-snapshots",
            ResourceKind::VolumeBackup => "volume-backups",
            ResourceKind::Volume => "volumes",
        }
    }

    /// Whether this kind has a forced deletion variant for resources stuck
    /// in a non-deletable state
    pub const fn supports_force_delete(self) -> bool {
        matches!(
            self,
            ResourceKind::VolumeSnapshot | ResourceKind::VolumeBackup | ResourceKind::Volume
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "server" | "servers" => Ok(ResourceKind::Server),
            "image" | "images" => Ok(ResourceKind::Image),
            "volume-snapshot" | "volume-snapshots" => Ok(ResourceKind::VolumeSnapshot),
            "volume-backup" | "volume-backups" => Ok(ResourceKind::VolumeBackup),
            "volume" | "volumes" => Ok(ResourceKind::Volume),
            _ => Err(Error::UnknownResourceType(s.to_string())),
        }
    }
}

/// One resource discovered by enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Resource type
    pub kind: ResourceKind,

    /// Backend-assigned resource ID
    pub id: String,

    /// Human-readable name, if the backend reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name,
        }
    }
}

/// Creation/update time bounds applied identically to every backend queried
///
/// The values are passed to the backends verbatim; `validate` only rejects
/// strings no backend could interpret as a date or timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Only match resources created before this timestamp
    pub created_before: Option<String>,

    /// Only match resources updated before this timestamp
    pub updated_before: Option<String>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.created_before.is_none() && self.updated_before.is_none()
    }

    /// Render the filter set as query parameters, verbatim
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(created) = &self.created_before {
            params.push(("created_at", created.clone()));
        }
        if let Some(updated) = &self.updated_before {
            params.push(("updated_at", updated.clone()));
        }
        params
    }

    /// Check that every filter value parses as a date or timestamp
    pub fn validate(&self) -> Result<()> {
        for value in [&self.created_before, &self.updated_before]
            .into_iter()
            .flatten()
        {
            if !parses_as_time(value) {
                return Err(Error::InvalidFilter(format!(
                    "'{value}' is not a valid date or timestamp"
                )));
            }
        }
        Ok(())
    }
}

fn parses_as_time(s: &str) -> bool {
    s.parse::<jiff::civil::Date>().is_ok()
        || s.parse::<jiff::civil::DateTime>().is_ok()
        || s.parse::<jiff::Timestamp>().is_ok()
}
