//! `st project cleanup` - delete a project's resources, keeping the project
//!
//! Always runs a non-destructive enumeration pass first; the destructive
//! pass only happens after an explicit confirmation (or --auto-approve).

use clap::Args;

use super::{get_cloud_client, resolve_project, run_cleaner};
use crate::exit_code::ExitCode;
use crate::output::Formatter;
use st_core::{CleanupOptions, FilterSet, ResourceKind};

#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("scope").required(true).args(["project", "auth_project"]))]
pub struct CleanupArgs {
    /// Project name or ID to clean up
    #[arg(long)]
    pub project: Option<String>,

    /// Clean up the cloud profile's default project
    #[arg(long)]
    pub auth_project: bool,

    /// Enumerate only; delete nothing
    #[arg(long, conflicts_with = "auto_approve")]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub auto_approve: bool,

    /// Only delete resources created before this timestamp
    #[arg(long, value_name = "TIMESTAMP")]
    pub created_before: Option<String>,

    /// Only delete resources updated before this timestamp
    #[arg(long, value_name = "TIMESTAMP")]
    pub updated_before: Option<String>,

    /// Resource type to skip (repeatable)
    #[arg(long = "skip-resource", value_name = "TYPE")]
    pub skip_resource: Vec<ResourceKind>,
}

pub async fn execute(args: CleanupArgs, cloud: Option<&str>, formatter: &Formatter) -> ExitCode {
    let filters = FilterSet {
        created_before: args.created_before,
        updated_before: args.updated_before,
    };
    if let Err(e) = filters.validate() {
        formatter.error(&e.to_string());
        return ExitCode::UsageError;
    }

    let client = match get_cloud_client(cloud, formatter) {
        Ok(client) => client,
        Err(code) => return code,
    };

    let project =
        match resolve_project(&client, args.project.as_deref(), args.auth_project, formatter).await
        {
            Ok(project) => project,
            Err(code) => return code,
        };

    let options = CleanupOptions {
        filters,
        skip: args.skip_resource,
        dry_run: args.dry_run,
        delete_project: false,
    };

    run_cleaner(&client, project, options, args.auto_approve, formatter).await
}
