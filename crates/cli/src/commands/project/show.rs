//! `st project show` - display one project

use clap::Args;

use super::{get_cloud_client, resolve_project};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project name or ID
    pub project: String,
}

pub async fn execute(args: ShowArgs, cloud: Option<&str>, formatter: &Formatter) -> ExitCode {
    let client = match get_cloud_client(cloud, formatter) {
        Ok(client) => client,
        Err(code) => return code,
    };

    let project = match resolve_project(&client, Some(&args.project), false, formatter).await {
        Ok(project) => project,
        Err(code) => return code,
    };

    if formatter.is_json() {
        formatter.json(&project);
    } else {
        formatter.println(&format!("ID:          {}", project.id));
        formatter.println(&format!("Name:        {}", project.name));
        formatter.println(&format!("Enabled:     {}", project.enabled));
        if let Some(description) = &project.description {
            formatter.println(&format!("Description: {description}"));
        }
    }
    ExitCode::Success
}
