//! `st project purge` - delete a project's resources and then the project
//!
//! Purge is cleanup without filters or skip-lists, followed by deletion of
//! the project record itself. The project is only deleted when every
//! resource deletion succeeded; otherwise it is left in place so a later
//! run can retry.

use clap::Args;

use super::{get_cloud_client, resolve_project, run_cleaner};
use crate::exit_code::ExitCode;
use crate::output::Formatter;
use st_core::CleanupOptions;

#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("scope").required(true).args(["project", "auth_project"]))]
pub struct PurgeArgs {
    /// Project name or ID to purge
    #[arg(long)]
    pub project: Option<String>,

    /// Purge the cloud profile's default project
    #[arg(long)]
    pub auth_project: bool,

    /// Enumerate only; delete nothing
    #[arg(long, conflicts_with = "auto_approve")]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub auto_approve: bool,

    /// Delete the project's resources but keep the project record
    #[arg(long)]
    pub keep_project: bool,
}

pub async fn execute(args: PurgeArgs, cloud: Option<&str>, formatter: &Formatter) -> ExitCode {
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
        dry_run: args.dry_run,
        delete_project: !args.keep_project,
        ..CleanupOptions::default()
    };

    run_cleaner(&client, project, options, args.auto_approve, formatter).await
}
