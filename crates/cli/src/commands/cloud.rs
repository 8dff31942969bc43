//! Cloud profile management commands
//!
//! Clouds are named references to a set of service endpoints and the token
//! used to authenticate against them.

use clap::Subcommand;
use serde::Serialize;

use crate::exit_code::ExitCode;
use st_core::{Cloud, CloudManager};

/// Cloud subcommands for managing service connections
#[derive(Subcommand, Debug)]
pub enum CloudCommands {
    /// Add or update a cloud profile
    Set(SetArgs),

    /// List all configured clouds
    List(ListArgs),

    /// Remove a cloud profile
    Remove(RemoveArgs),
}

/// Arguments for the `cloud set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Cloud name (e.g., "devstack", "prod")
    pub name: String,

    /// Identity (auth) URL (e.g., "https://keystone.example.org:5000")
    pub auth_url: String,

    /// API token
    pub token: String,

    /// Region name (default: RegionOne)
    #[arg(long, default_value = "RegionOne")]
    pub region: String,

    /// Default project used by --auth-project
    #[arg(long)]
    pub project: Option<String>,

    /// Identity endpoint override (defaults to the auth URL)
    #[arg(long)]
    pub identity_endpoint: Option<String>,

    /// Compute service endpoint
    #[arg(long)]
    pub compute_endpoint: Option<String>,

    /// Image service endpoint
    #[arg(long)]
    pub image_endpoint: Option<String>,

    /// Volume service endpoint
    #[arg(long)]
    pub volume_endpoint: Option<String>,

    /// Allow insecure TLS connections
    #[arg(long, default_value = "false")]
    pub insecure: bool,
}

/// Arguments for the `cloud list` command
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show full details including endpoints
    #[arg(short, long)]
    pub long: bool,
}

/// Arguments for the `cloud remove` command
#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Name of the cloud to remove
    pub name: String,
}

/// JSON output for cloud list
#[derive(Serialize)]
struct CloudListOutput {
    clouds: Vec<CloudInfo>,
}

/// Cloud information for JSON output (without the token)
#[derive(Serialize)]
struct CloudInfo {
    name: String,
    auth_url: String,
    region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<String>,
}

impl From<&Cloud> for CloudInfo {
    fn from(cloud: &Cloud) -> Self {
        Self {
            name: cloud.name.clone(),
            auth_url: cloud.auth_url.clone(),
            region: cloud.region.clone(),
            project: cloud.project.clone(),
        }
    }
}

/// JSON output for cloud set/remove operations
#[derive(Serialize)]
struct CloudOperationOutput {
    success: bool,
    cloud: String,
    message: String,
}

/// Execute a cloud subcommand
pub async fn execute(cmd: CloudCommands, json_output: bool) -> ExitCode {
    let manager = match CloudManager::new() {
        Ok(m) => m,
        Err(e) => {
            if json_output {
                eprintln!("{}", serde_json::json!({"error": e.to_string()}));
            } else {
                eprintln!("Error: {e}");
            }
            return ExitCode::GeneralError;
        }
    };

    match cmd {
        CloudCommands::Set(args) => execute_set(args, &manager, json_output).await,
        CloudCommands::List(args) => execute_list(args, &manager, json_output).await,
        CloudCommands::Remove(args) => execute_remove(args, &manager, json_output).await,
    }
}

async fn execute_set(args: SetArgs, manager: &CloudManager, json_output: bool) -> ExitCode {
    if args.name.is_empty() {
        let msg = "Cloud name cannot be empty";
        if json_output {
            eprintln!("{}", serde_json::json!({"error": msg}));
        } else {
            eprintln!("Error: {msg}");
        }
        return ExitCode::UsageError;
    }

    let mut cloud = Cloud::new(&args.name, &args.auth_url, &args.token);
    cloud.region = args.region;
    cloud.project = args.project;
    cloud.insecure = args.insecure;
    cloud.endpoints.identity = args.identity_endpoint;
    cloud.endpoints.compute = args.compute_endpoint;
    cloud.endpoints.image = args.image_endpoint;
    cloud.endpoints.volume = args.volume_endpoint;

    match manager.set(cloud) {
        Ok(()) => {
            if json_output {
                let output = CloudOperationOutput {
                    success: true,
                    cloud: args.name.clone(),
                    message: format!("Cloud '{}' configured successfully", args.name),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).unwrap_or_default()
                );
            } else {
                println!("Cloud '{}' configured successfully.", args.name);
            }
            ExitCode::Success
        }
        Err(e @ st_core::Error::InvalidUrl(_)) => {
            if json_output {
                eprintln!("{}", serde_json::json!({"error": e.to_string()}));
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::UsageError
        }
        Err(e) => {
            if json_output {
                eprintln!("{}", serde_json::json!({"error": e.to_string()}));
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::GeneralError
        }
    }
}

async fn execute_list(args: ListArgs, manager: &CloudManager, json_output: bool) -> ExitCode {
    match manager.list() {
        Ok(clouds) => {
            if json_output {
                let output = CloudListOutput {
                    clouds: clouds.iter().map(CloudInfo::from).collect(),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).unwrap_or_default()
                );
            } else if clouds.is_empty() {
                println!("No clouds configured.");
            } else if args.long {
                for cloud in &clouds {
                    println!(
                        "{:<12} {} (region: {}, project: {})",
                        cloud.name,
                        cloud.auth_url,
                        cloud.region,
                        cloud.project.as_deref().unwrap_or("-")
                    );
                }
            } else {
                for cloud in &clouds {
                    println!("{:<12} {}", cloud.name, cloud.auth_url);
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            if json_output {
                eprintln!("{}", serde_json::json!({"error": e.to_string()}));
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::GeneralError
        }
    }
}

async fn execute_remove(args: RemoveArgs, manager: &CloudManager, json_output: bool) -> ExitCode {
    match manager.remove(&args.name) {
        Ok(()) => {
            if json_output {
                let output = CloudOperationOutput {
                    success: true,
                    cloud: args.name.clone(),
                    message: format!("Cloud '{}' removed successfully", args.name),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).unwrap_or_default()
                );
            } else {
                println!("Cloud '{}' removed successfully.", args.name);
            }
            ExitCode::Success
        }
        Err(st_core::Error::CloudNotFound(_)) => {
            if json_output {
                eprintln!(
                    "{}",
                    serde_json::json!({"error": format!("Cloud '{}' not found", args.name)})
                );
            } else {
                eprintln!("Error: Cloud '{}' not found.", args.name);
            }
            ExitCode::NotFound
        }
        Err(e) => {
            if json_output {
                eprintln!("{}", serde_json::json!({"error": e.to_string()}));
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::GeneralError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_info_redacts_token() {
        let cloud = Cloud::new("devstack", "https://keystone.local:5000", "secret");
        let info = CloudInfo::from(&cloud);
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("devstack"));
    }

    #[test]
    fn test_cloud_info_from_cloud() {
        let mut cloud = Cloud::new("devstack", "https://keystone.local:5000", "tok");
        cloud.project = Some("demo".to_string());
        let info = CloudInfo::from(&cloud);
        assert_eq!(info.name, "devstack");
        assert_eq!(info.region, "RegionOne");
        assert_eq!(info.project.as_deref(), Some("demo"));
    }
}
