//! Project commands
//!
//! Covers project listing and the destructive cleanup/purge workflows. The
//! two-pass orchestration itself lives in st-core; this module resolves the
//! project scope, builds the confirmation gate from the CLI flags, and
//! renders the reports.

use clap::Subcommand;
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, resource_table};
use st_api::CloudClient;
use st_core::{
    AutoApprove, CleanupOptions, CleanupOutcome, CloudApi, CloudManager, ConfirmGate, PassReport,
    Project, ProjectCleaner, PromptGate, ResourceRef,
};

mod cleanup;
mod list;
mod purge;
mod show;

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects
    List(list::ListArgs),

    /// Show one project
    Show(show::ShowArgs),

    /// Delete a project's resources, keeping the project
    Cleanup(cleanup::CleanupArgs),

    /// Delete a project's resources and the project itself
    Purge(purge::PurgeArgs),
}

/// Execute a project subcommand
pub async fn execute(
    cmd: ProjectCommands,
    cloud: Option<&str>,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    match cmd {
        ProjectCommands::List(args) => list::execute(args, cloud, &formatter).await,
        ProjectCommands::Show(args) => show::execute(args, cloud, &formatter).await,
        ProjectCommands::Cleanup(args) => cleanup::execute(args, cloud, &formatter).await,
        ProjectCommands::Purge(args) => purge::execute(args, cloud, &formatter).await,
    }
}

/// Helper to build a CloudClient from the selected cloud profile
pub(crate) fn get_cloud_client(
    cloud_name: Option<&str>,
    formatter: &Formatter,
) -> Result<CloudClient, ExitCode> {
    let manager = match CloudManager::new() {
        Ok(m) => m,
        Err(e) => {
            formatter.error(&format!("Failed to load configuration: {e}"));
            return Err(ExitCode::GeneralError);
        }
    };

    let cloud = match cloud_name {
        Some(name) => match manager.get(name) {
            Ok(cloud) => cloud,
            Err(st_core::Error::CloudNotFound(_)) => {
                formatter.error(&format!("Cloud '{name}' not found"));
                return Err(ExitCode::NotFound);
            }
            Err(e) => {
                formatter.error(&format!("Failed to load cloud '{name}': {e}"));
                return Err(ExitCode::GeneralError);
            }
        },
        None => {
            // With exactly one cloud configured there is nothing to choose.
            let mut clouds = match manager.list() {
                Ok(clouds) => clouds,
                Err(e) => {
                    formatter.error(&format!("Failed to load configuration: {e}"));
                    return Err(ExitCode::GeneralError);
                }
            };
            if clouds.len() == 1 {
                clouds.remove(0)
            } else {
                formatter.error("No cloud selected. Use --cloud or set OS_CLOUD.");
                return Err(ExitCode::UsageError);
            }
        }
    };

    CloudClient::new(cloud).map_err(|e| {
        formatter.error(&format!("Failed to create client: {e}"));
        ExitCode::from_core_error(&e)
    })
}

/// Resolve the project scope from `--project` or `--auth-project`
///
/// Scope resolution is the one fatal pre-pass error: nothing is enumerated
/// or deleted when the project cannot be found.
pub(crate) async fn resolve_project(
    client: &CloudClient,
    project: Option<&str>,
    auth_project: bool,
    formatter: &Formatter,
) -> Result<Project, ExitCode> {
    let name_or_id = if auth_project {
        match client.cloud().project.clone() {
            Some(project) => project,
            None => {
                formatter.error(&format!(
                    "Cloud '{}' has no default project; use --project",
                    client.cloud().name
                ));
                return Err(ExitCode::UsageError);
            }
        }
    } else {
        match project {
            Some(name_or_id) => name_or_id.to_string(),
            None => {
                formatter.error("Either --project or --auth-project is required");
                return Err(ExitCode::UsageError);
            }
        }
    };

    match client.find_project(&name_or_id).await {
        Ok(project) => Ok(project),
        Err(st_core::Error::NotFound(_)) => {
            formatter.error(&format!("Project '{name_or_id}' not found"));
            Err(ExitCode::NotFound)
        }
        Err(e) => {
            formatter.error(&format!("Failed to resolve project '{name_or_id}': {e}"));
            Err(ExitCode::from_core_error(&e))
        }
    }
}

/// JSON output for cleanup/purge runs
#[derive(Serialize)]
struct CleanupOutput<'a> {
    project: &'a str,
    dry_run: bool,
    executed: bool,
    discovered: &'a [ResourceRef],
    deleted: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<String>,
}

impl<'a> CleanupOutput<'a> {
    fn new(project: &'a str, dry_run: bool, outcome: &'a CleanupOutcome) -> Self {
        let failed: usize = outcome.failures().iter().map(|f| f.failed).sum();
        let deleted = outcome
            .report
            .as_ref()
            .map(|r| r.found.len().saturating_sub(failed))
            .unwrap_or(0);
        Self {
            project,
            dry_run,
            executed: outcome.executed,
            discovered: &outcome.preview.found,
            deleted,
            failures: outcome.failures().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Drive the two-pass cleanup and render its outcome
pub(crate) async fn run_cleaner(
    client: &CloudClient,
    project: Project,
    options: CleanupOptions,
    auto_approve: bool,
    formatter: &Formatter,
) -> ExitCode {
    let dry_run = options.dry_run;
    let delete_project = options.delete_project;
    let project_name = project.name.clone();
    let cleaner = ProjectCleaner::new(client, project, options);

    let mut preview = |report: &PassReport| {
        if formatter.is_json() {
            // The full report is emitted as one JSON document at the end.
            return;
        }
        if report.found.is_empty() {
            formatter.println("No resources found.");
        } else {
            formatter.println(&resource_table(&report.found).to_string());
        }
    };

    let mut gate: Box<dyn ConfirmGate> = if auto_approve {
        Box::new(AutoApprove)
    } else {
        Box::new(PromptGate::stdio())
    };

    let outcome = match cleaner.run(gate.as_mut(), &mut preview).await {
        Ok(outcome) => outcome,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_core_error(&e);
        }
    };

    if formatter.is_json() {
        formatter.json(&CleanupOutput::new(&project_name, dry_run, &outcome));
    }

    for failure in outcome.failures() {
        formatter.error(&failure.to_string());
    }
    if let Some(e) = outcome.failure_error() {
        return ExitCode::from_core_error(&e);
    }

    if dry_run {
        return ExitCode::Success;
    }
    if !outcome.executed {
        formatter.println("Aborted. No resources were deleted.");
        return ExitCode::Success;
    }

    let deleted = outcome.report.as_ref().map(|r| r.found.len()).unwrap_or(0);
    if delete_project {
        formatter.success(&format!(
            "Project '{project_name}' has been purged ({deleted} resource(s) deleted)."
        ));
    } else {
        formatter.success(&format!(
            "Deleted {deleted} resource(s) from project '{project_name}'."
        ));
    }
    ExitCode::Success
}
